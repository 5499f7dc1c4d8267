// Enqueue Use Case

use crate::domain::{assign_priorities, Job};
use crate::error::{AppError, Result};
use crate::port::TransactionalJobStore;
use tracing::{debug, info};

/// Execute enqueue use case (with transaction for atomicity)
///
/// Reads the current highest priority and inserts the batch numbered after it
/// inside one transaction, so two concurrent calls can never number their
/// batches from the same maximum. Either every job is stored or none is.
///
/// # Arguments
///
/// * `tx_store` - Transactional job store
/// * `descriptions` - Job descriptions in submission order
pub async fn execute<S>(tx_store: &dyn TransactionalJobStore, descriptions: &[S]) -> Result<Vec<Job>>
where
    S: AsRef<str> + Sync,
{
    if descriptions.is_empty() {
        debug!("Empty enqueue request, nothing to insert");
        return Ok(Vec::new());
    }

    // Start transaction to prevent overlapping priority ranges
    let mut tx = tx_store.begin_transaction().await?;

    let highest = tx.highest_priority().await?;
    let new_jobs = assign_priorities(highest, descriptions)?;

    let ids = tx.insert_batch(&new_jobs).await?;
    if ids.len() != new_jobs.len() {
        // Dropping the transaction rolls the batch back
        return Err(AppError::Integrity(format!(
            "store assigned {} ids for {} inserted jobs",
            ids.len(),
            new_jobs.len()
        )));
    }

    tx.commit().await?;

    let jobs: Vec<Job> = ids
        .into_iter()
        .zip(new_jobs)
        .map(|(id, new_job)| Job::pending(id, new_job))
        .collect();

    info!(
        count = jobs.len(),
        after_priority = highest,
        "Enqueued jobs"
    );

    Ok(jobs)
}
