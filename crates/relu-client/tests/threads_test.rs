//! Threads API tests against a mock server.

mod common;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

use common::{BEARER, TestApi};
use relu_client::{Error, ListFilters, NewMessage, RunInput, RunStatus, ThreadConfig, ThreadUpdate};

#[tokio::test]
async fn test_create_thread() {
    let api = TestApi::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/threads"))
        .and(header("authorization", BEARER))
        .and(body_json(json!({"title": "Research"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "thread_id": "t1",
            "title": "Research"
        })))
        .expect(1)
        .mount(&api.server)
        .await;

    let thread = api
        .relu
        .thread()
        .create(&ThreadConfig::titled("Research"))
        .await
        .unwrap();
    assert_eq!(thread.id, "t1");
}

#[tokio::test]
async fn test_create_thread_without_config() {
    let api = TestApi::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/threads"))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "t2"})))
        .expect(1)
        .mount(&api.server)
        .await;

    let thread = api.relu.thread().create(&ThreadConfig::default()).await.unwrap();
    assert_eq!(thread.id, "t2");
    assert!(thread.title.is_none());
}

#[tokio::test]
async fn test_blank_title_rejected_locally() {
    let api = TestApi::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&api.server)
        .await;
    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&api.server)
        .await;

    let err = api
        .relu
        .thread()
        .create(&ThreadConfig::titled("   "))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidRequest(_)));

    let update = ThreadUpdate {
        title: Some(String::new()),
        ..Default::default()
    };
    let err = api.relu.thread().update("t1", &update).await.unwrap_err();
    assert!(matches!(err, Error::InvalidRequest(_)));
}

#[tokio::test]
async fn test_get_update_delete_thread() {
    let api = TestApi::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/threads/t1"))
        .and(header("authorization", BEARER))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "t1"})))
        .expect(1)
        .mount(&api.server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/v1/threads/t1"))
        .and(header("authorization", BEARER))
        .and(body_json(json!({"title": "Renamed"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "t1", "title": "Renamed"})))
        .expect(1)
        .mount(&api.server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/v1/threads/t1"))
        .and(header("authorization", BEARER))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&api.server)
        .await;

    let threads = api.relu.thread();
    assert_eq!(threads.get("t1").await.unwrap().id, "t1");

    let update = ThreadUpdate {
        title: Some("Renamed".to_string()),
        ..Default::default()
    };
    let thread = threads.update("t1", &update).await.unwrap();
    assert_eq!(thread.title.as_deref(), Some("Renamed"));

    threads.delete("t1").await.unwrap();
}

#[tokio::test]
async fn test_list_threads() {
    let api = TestApi::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/threads"))
        .and(header("authorization", BEARER))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": "t1"}, {"id": "t2"}]
        })))
        .expect(1)
        .mount(&api.server)
        .await;

    let threads = api
        .relu
        .thread()
        .list_all(ListFilters::default())
        .await
        .unwrap();
    assert_eq!(threads.len(), 2);
}

#[tokio::test]
async fn test_run_sends_agent_and_input() {
    let api = TestApi::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/threads/t1/run"))
        .and(header("authorization", BEARER))
        .and(body_json(json!({"agent_id": "a1", "input": {"message": "hi"}})))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({
            "run_id": "r1",
            "thread_id": "t1",
            "agent_id": "a1",
            "status": "queued"
        })))
        .expect(1)
        .mount(&api.server)
        .await;

    let run = api
        .relu
        .thread()
        .run("t1", "a1", &RunInput::new("hi"))
        .await
        .unwrap();

    assert_eq!(run.id, "r1");
    assert_eq!(run.status, RunStatus::Queued);
    assert!(!run.status.is_terminal());
}

#[tokio::test]
async fn test_run_unknown_thread_is_not_found() {
    let api = TestApi::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/threads/t1/run"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&api.server)
        .await;

    let err = api
        .relu
        .thread()
        .run("t1", "a1", &RunInput::new("hi"))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_run_rejects_empty_input_locally() {
    let api = TestApi::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(202))
        .expect(0)
        .mount(&api.server)
        .await;

    let threads = api.relu.thread();
    let err = threads.run("t1", "a1", &RunInput::new("")).await.unwrap_err();
    assert!(matches!(err, Error::InvalidRequest(_)));

    let err = threads.run("t1", "", &RunInput::new("hi")).await.unwrap_err();
    assert!(matches!(err, Error::InvalidRequest(_)));
}

#[tokio::test]
async fn test_get_run() {
    let api = TestApi::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/threads/t1/runs/r1"))
        .and(header("authorization", BEARER))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "r1",
            "status": "completed",
            "output": {"text": "hello"},
            "completed_at": "2026-01-01T00:00:00Z"
        })))
        .expect(1)
        .mount(&api.server)
        .await;

    let run = api.relu.thread().get_run("t1", "r1").await.unwrap();
    assert!(run.status.is_terminal());
    assert_eq!(run.output.unwrap()["text"], "hello");
}

#[tokio::test]
async fn test_messages() {
    let api = TestApi::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/threads/t1/messages"))
        .and(header("authorization", BEARER))
        .and(body_json(json!({"role": "user", "content": "remember this"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "message_id": "m1",
            "type": "user",
            "content": "remember this"
        })))
        .expect(1)
        .mount(&api.server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/threads/t1/messages"))
        .and(header("authorization", BEARER))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "messages": [
                {"id": "m1", "role": "user", "content": "remember this"},
                {"id": "m2", "role": "assistant", "content": {"text": "noted"}}
            ]
        })))
        .expect(1)
        .mount(&api.server)
        .await;

    let threads = api.relu.thread();
    let message = threads
        .add_message("t1", &NewMessage::user("remember this"))
        .await
        .unwrap();
    assert_eq!(message.id, "m1");
    assert_eq!(message.role, "user");

    let messages = threads.messages("t1").await.unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].content["text"], "noted");
}

#[tokio::test]
async fn test_ids_are_path_encoded() {
    let api = TestApi::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/threads/a%2Fb"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "a/b"})))
        .expect(1)
        .mount(&api.server)
        .await;

    let thread = api.relu.thread().get("a/b").await.unwrap();
    assert_eq!(thread.id, "a/b");
}
