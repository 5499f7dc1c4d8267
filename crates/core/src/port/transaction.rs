// Transaction port for atomic operations

use crate::domain::{JobId, NewJob, Priority};
use crate::error::Result;
use async_trait::async_trait;

/// Transaction trait for atomic multi-step operations
///
/// Dropping a transaction without committing discards its writes.
#[async_trait]
pub trait Transaction: Send {
    /// Commit the transaction
    async fn commit(self: Box<Self>) -> Result<()>;

    /// Rollback the transaction
    async fn rollback(self: Box<Self>) -> Result<()>;
}

/// Transactional JobStore operations
#[async_trait]
pub trait TransactionalJobStore: Send + Sync {
    /// Begin a new transaction
    ///
    /// No other write to the same store interleaves with an open transaction.
    async fn begin_transaction(&self) -> Result<Box<dyn JobStoreTransaction>>;
}

/// JobStore operations within a transaction
#[async_trait]
pub trait JobStoreTransaction: Transaction {
    /// Get highest priority (within transaction)
    async fn highest_priority(&mut self) -> Result<Priority>;

    /// Insert jobs (within transaction)
    async fn insert_batch(&mut self, jobs: &[NewJob]) -> Result<Vec<JobId>>;
}
