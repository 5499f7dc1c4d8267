// Job Store Port (Interface)

use crate::domain::{Job, JobId, NewJob, Priority};
use crate::error::Result;
use async_trait::async_trait;

/// Repository interface for the durable job set
///
/// Writes that must be combined with a read (enqueue) go through
/// [`TransactionalJobStore`](super::TransactionalJobStore) instead.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Maximum priority over all stored jobs, or `EMPTY_QUEUE_PRIORITY` when empty
    async fn highest_priority(&self) -> Result<Priority>;

    /// Insert all records as one unit, returning the assigned ids in input order
    async fn insert_batch(&self, jobs: &[NewJob]) -> Result<Vec<JobId>>;

    /// Overwrite one job's priority
    ///
    /// Returns `false` when no job has this id (a no-op, not an error).
    async fn update_priority(&self, id: JobId, priority: Priority) -> Result<bool>;

    /// All rows carrying `id` (zero or one in a healthy store)
    async fn find_by_id(&self, id: JobId) -> Result<Vec<Job>>;

    /// Every job, ordered by priority ascending then id ascending
    async fn list_ascending(&self) -> Result<Vec<Job>>;
}
