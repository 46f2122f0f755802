//! API endpoint implementations.

mod agents;
mod pagination;
mod threads;

pub use agents::{AGENTS_PATH, AgentsApi};
pub use threads::{THREADS_PATH, ThreadsApi};

use crate::error::{Error, Result};

/// Reject empty IDs before they turn into a collection URL.
fn require_id<'a>(id: &'a str, kind: &str) -> Result<&'a str> {
    if id.trim().is_empty() {
        return Err(Error::InvalidRequest(format!("{} id must not be empty", kind)));
    }
    Ok(id)
}
