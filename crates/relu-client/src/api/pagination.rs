//! Cursor pagination shared by list operations.

use std::collections::HashSet;

use futures::Stream;
use serde::de::DeserializeOwned;

use crate::client::ApiClient;
use crate::error::Result;
use crate::types::{ListFilters, Page};

/// Fetch a single page.
pub(crate) async fn fetch_page<T: DeserializeOwned>(
    client: &ApiClient,
    filters: &ListFilters,
    cursor: Option<&str>,
) -> Result<Page<T>> {
    client.get_with_query(&[], &filters.to_query(cursor)).await
}

/// Lazily walk every page, following `next_cursor`.
///
/// Items are yielded as each page arrives. If a later page fails, the items
/// already yielded stay with the caller and the stream ends with the error.
/// A cursor the server already handed out ends the stream.
pub(crate) fn paginate<T>(
    client: ApiClient,
    filters: ListFilters,
) -> impl Stream<Item = Result<T>> + Send + 'static
where
    T: DeserializeOwned + Send + 'static,
{
    async_stream::try_stream! {
        let mut cursor: Option<String> = None;
        let mut seen: HashSet<String> = HashSet::new();
        loop {
            let page: Page<T> = fetch_page(&client, &filters, cursor.as_deref()).await?;
            let next = page.next_cursor.filter(|c| !c.is_empty());

            for item in page.items {
                yield item;
            }

            match next {
                Some(next) if seen.contains(&next) => {
                    tracing::warn!(
                        resource = client.resource_path(),
                        cursor = %next,
                        "Server repeated a cursor, stopping pagination"
                    );
                    break;
                }
                Some(next) => {
                    seen.insert(next.clone());
                    cursor = Some(next);
                }
                None => break,
            }
        }
    }
}
