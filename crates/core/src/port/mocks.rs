// ============================================================================
// In-Memory Store for Testing
// ============================================================================

use super::{JobStore, JobStoreTransaction, Transaction, TransactionalJobStore};
use crate::domain::{Job, JobId, NewJob, Priority, EMPTY_QUEUE_PRIORITY};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Debug, Clone)]
struct MemState {
    rows: Vec<Job>,
    next_id: JobId,
}

impl MemState {
    fn highest_priority(&self) -> Priority {
        self.rows
            .iter()
            .map(|job| job.priority)
            .max()
            .unwrap_or(EMPTY_QUEUE_PRIORITY)
    }

    fn insert_batch(&mut self, jobs: &[NewJob]) -> Vec<JobId> {
        jobs.iter()
            .map(|new_job| {
                let id = self.next_id;
                self.next_id += 1;
                self.rows.push(Job::pending(id, new_job.clone()));
                id
            })
            .collect()
    }
}

/// Mock JobStore keeping rows in a Vec
///
/// One async mutex guards the whole state; a transaction holds it until it
/// commits or is dropped, which gives the same serializable write unit the
/// SQLite adapter provides.
#[derive(Clone)]
pub struct InMemoryJobStore {
    state: Arc<Mutex<MemState>>,
    fail_writes: Arc<AtomicBool>,
}

impl Default for InMemoryJobStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryJobStore {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MemState {
                rows: Vec::new(),
                next_id: 1,
            })),
            fail_writes: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Make every subsequent write fail with a store error
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Push a raw row without id checks (simulates a corrupted store)
    pub async fn inject_duplicate(&self, job: Job) {
        self.state.lock().await.rows.push(job);
    }

    pub async fn row_count(&self) -> usize {
        self.state.lock().await.rows.len()
    }

    fn check_writable(fail_writes: &AtomicBool) -> Result<()> {
        if fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::Store("injected write failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl JobStore for InMemoryJobStore {
    async fn highest_priority(&self) -> Result<Priority> {
        Ok(self.state.lock().await.highest_priority())
    }

    async fn insert_batch(&self, jobs: &[NewJob]) -> Result<Vec<JobId>> {
        Self::check_writable(&self.fail_writes)?;
        Ok(self.state.lock().await.insert_batch(jobs))
    }

    async fn update_priority(&self, id: JobId, priority: Priority) -> Result<bool> {
        Self::check_writable(&self.fail_writes)?;
        let mut state = self.state.lock().await;

        let mut updated = false;
        for job in state.rows.iter_mut().filter(|job| job.id == id) {
            job.priority = priority;
            updated = true;
        }
        Ok(updated)
    }

    async fn find_by_id(&self, id: JobId) -> Result<Vec<Job>> {
        let state = self.state.lock().await;
        Ok(state.rows.iter().filter(|job| job.id == id).cloned().collect())
    }

    async fn list_ascending(&self) -> Result<Vec<Job>> {
        let mut rows = self.state.lock().await.rows.clone();
        rows.sort_by_key(|job| (job.priority, job.id));
        Ok(rows)
    }
}

#[async_trait]
impl TransactionalJobStore for InMemoryJobStore {
    async fn begin_transaction(&self) -> Result<Box<dyn JobStoreTransaction>> {
        let guard = Arc::clone(&self.state).lock_owned().await;
        let staged = guard.clone();
        Ok(Box::new(InMemoryTransaction {
            guard,
            staged,
            fail_writes: Arc::clone(&self.fail_writes),
        }))
    }
}

/// Writes are staged on a copy and published on commit
pub struct InMemoryTransaction {
    guard: OwnedMutexGuard<MemState>,
    staged: MemState,
    fail_writes: Arc<AtomicBool>,
}

#[async_trait]
impl Transaction for InMemoryTransaction {
    async fn commit(self: Box<Self>) -> Result<()> {
        let InMemoryTransaction {
            mut guard, staged, ..
        } = *self;
        *guard = staged;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
impl JobStoreTransaction for InMemoryTransaction {
    async fn highest_priority(&mut self) -> Result<Priority> {
        Ok(self.staged.highest_priority())
    }

    async fn insert_batch(&mut self, jobs: &[NewJob]) -> Result<Vec<JobId>> {
        InMemoryJobStore::check_writable(&self.fail_writes)?;
        Ok(self.staged.insert_batch(jobs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_dropped_transaction_discards_writes() {
        let store = InMemoryJobStore::new();

        {
            let mut tx = store.begin_transaction().await.unwrap();
            tx.insert_batch(&[NewJob::new("lost", 1)]).await.unwrap();
        }

        assert_eq!(store.row_count().await, 0);
        assert_eq!(store.highest_priority().await.unwrap(), EMPTY_QUEUE_PRIORITY);
    }

    #[tokio::test]
    async fn test_committed_transaction_publishes_writes() {
        let store = InMemoryJobStore::new();

        let mut tx = store.begin_transaction().await.unwrap();
        let ids = tx
            .insert_batch(&[NewJob::new("a", 1), NewJob::new("b", 2)])
            .await
            .unwrap();
        tx.commit().await.unwrap();

        assert_eq!(ids, vec![1, 2]);
        assert_eq!(store.highest_priority().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_ids_are_sequential_across_batches() {
        let store = InMemoryJobStore::new();
        store.insert_batch(&[NewJob::new("a", 1)]).await.unwrap();

        let ids = store.insert_batch(&[NewJob::new("b", 2)]).await.unwrap();
        assert_eq!(ids, vec![2]);
    }
}
