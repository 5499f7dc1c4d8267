// Reprioritize Use Case

use super::retrieve;
use crate::domain::{Job, JobId, Priority};
use crate::error::{AppError, Result};
use crate::port::JobStore;
use tracing::{debug, info};

/// Overwrite a job's priority and return the job as stored afterwards.
///
/// Other jobs are never renumbered; the new value may tie with an existing one.
/// A missing id is reported as `AppError::NotFound` rather than a silent no-op.
pub async fn execute(store: &dyn JobStore, id: JobId, priority: Priority) -> Result<Job> {
    debug!(job_id = id, priority, "Reprioritizing job");

    let updated = store.update_priority(id, priority).await?;
    if !updated {
        return Err(AppError::job_not_found(id));
    }

    // Read back the authoritative row instead of echoing the input
    let job = retrieve::get_by_id(store, id)
        .await?
        .ok_or_else(|| AppError::job_not_found(id))?;

    info!(job_id = id, priority = job.priority, "Job reprioritized");

    Ok(job)
}
