// Retrieval Use Cases

use crate::domain::{Job, JobId};
use crate::error::{AppError, Result};
use crate::port::JobStore;
use tracing::error;

/// All jobs in processing order (priority ascending, ties by id ascending)
pub async fn list_all(store: &dyn JobStore) -> Result<Vec<Job>> {
    store.list_ascending().await
}

/// Point lookup; `Ok(None)` when no job has this id
///
/// More than one row for an id means the uniqueness invariant is broken,
/// which fails with `AppError::Integrity` instead of picking a row.
pub async fn get_by_id(store: &dyn JobStore, id: JobId) -> Result<Option<Job>> {
    let mut rows = store.find_by_id(id).await?;

    match rows.len() {
        0 => Ok(None),
        1 => Ok(rows.pop()),
        n => {
            error!(job_id = id, rows = n, "Multiple jobs stored under one id");
            Err(AppError::Integrity(format!(
                "{} jobs stored with id {}",
                n, id
            )))
        }
    }
}
