use std::future::Future;
use std::time::Duration;

use tracing::warn;

const MAX_CONFLICT_RETRIES: u32 = 5;

/// True when `err` is a UNIQUE index rejection raised by `index_name`.
///
/// Local engines report the typed `IndexExists` error, remote engines only forward its message.
pub fn is_index_violation(err: &surrealdb::Error, index_name: &str) -> bool {
    match err {
        surrealdb::Error::Db(surrealdb::error::Db::IndexExists { index, .. }) => index == index_name,
        other => {
            let msg = other.to_string();
            msg.contains("already contains") && msg.contains(index_name)
        }
    }
}

/// True when the store rejected a statement because `record` (raw `table:key`) is gone,
/// as an `ENFORCED` relation does for a missing endpoint.
pub fn is_missing_record(err: &surrealdb::Error, record: &str) -> bool {
    let msg = err.to_string();
    msg.contains(&format!("'{record}'")) && msg.contains("does not exist")
}

/// Optimistic transaction conflicts; the same statement may simply be issued again.
pub fn is_retryable(err: &surrealdb::Error) -> bool {
    err.to_string().contains("can be retried")
}

/// Runs `op` again while the store reports a write conflict, with a short linear backoff.
pub async fn with_conflict_retry<T, F, Fut>(label: &str, mut op: F) -> Result<T, surrealdb::Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, surrealdb::Error>>,
{
    let mut attempt = 0;
    loop {
        match op().await {
            Err(err) if attempt < MAX_CONFLICT_RETRIES && is_retryable(&err) => {
                attempt += 1;
                warn!(op = label, attempt, "write conflict, retrying");
                tokio::time::sleep(Duration::from_millis(5 * attempt as u64)).await;
            }
            res => return res,
        }
    }
}
