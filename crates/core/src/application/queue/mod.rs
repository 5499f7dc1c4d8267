// Queue Service - Core use cases for priority queue management

pub mod enqueue;
pub mod reprioritize;
pub mod retrieve;

use crate::domain::{Job, JobId, Priority};
use crate::error::Result;
use crate::port::{JobStore, TransactionalJobStore};
use std::sync::Arc;

/// Queue Service
///
/// Holds no locks of its own: serialization of the enqueue read-then-write
/// is delegated to the store's transactions.
pub struct QueueService {
    store: Arc<dyn JobStore>,
    tx_store: Arc<dyn TransactionalJobStore>,
}

impl QueueService {
    pub fn new(store: Arc<dyn JobStore>, tx_store: Arc<dyn TransactionalJobStore>) -> Self {
        Self { store, tx_store }
    }

    /// Append jobs after the current highest priority, in submission order
    pub async fn enqueue<S>(&self, descriptions: &[S]) -> Result<Vec<Job>>
    where
        S: AsRef<str> + Sync,
    {
        enqueue::execute(self.tx_store.as_ref(), descriptions).await
    }

    /// Overwrite one job's priority
    pub async fn reprioritize(&self, id: JobId, priority: Priority) -> Result<Job> {
        reprioritize::execute(self.store.as_ref(), id, priority).await
    }

    /// All jobs in processing order
    pub async fn list_all(&self) -> Result<Vec<Job>> {
        retrieve::list_all(self.store.as_ref()).await
    }

    /// Point lookup by id
    pub async fn get_by_id(&self, id: JobId) -> Result<Option<Job>> {
        retrieve::get_by_id(self.store.as_ref(), id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::mocks::InMemoryJobStore;
    use std::collections::HashSet;

    fn service() -> (Arc<QueueService>, InMemoryJobStore) {
        let store = InMemoryJobStore::new();
        let service = QueueService::new(Arc::new(store.clone()), Arc::new(store.clone()));
        (Arc::new(service), store)
    }

    #[tokio::test]
    async fn test_priorities_monotonic_across_calls() {
        let (service, _) = service();

        let first = service.enqueue(&["a", "b"]).await.unwrap();
        let second = service.enqueue(&["c"]).await.unwrap();

        assert!(second[0].priority > first[0].priority);
        assert!(second[0].priority > first[1].priority);
    }

    #[tokio::test]
    async fn test_reprioritize_reorders_listing() {
        let (service, _) = service();
        let jobs = service.enqueue(&["x", "y"]).await.unwrap();
        assert_eq!(jobs[0].priority, 1);
        assert_eq!(jobs[1].priority, 2);

        service.reprioritize(jobs[0].id, 10).await.unwrap();
        let listed = service.list_all().await.unwrap();

        assert_eq!(listed[0].description, "y");
        assert_eq!(listed[0].priority, 2);
        assert_eq!(listed[1].description, "x");
        assert_eq!(listed[1].priority, 10);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_enqueue_distinct_priorities() {
        let (service, store) = service();

        let handles: Vec<_> = (0..32)
            .map(|i| {
                let service = Arc::clone(&service);
                tokio::spawn(async move { service.enqueue(&[format!("job-{}", i)]).await })
            })
            .collect();

        let mut priorities = HashSet::new();
        for handle in futures::future::join_all(handles).await {
            let jobs = handle.unwrap().unwrap();
            assert!(priorities.insert(jobs[0].priority));
        }

        assert_eq!(priorities.len(), 32);
        assert_eq!(store.row_count().await, 32);
    }
}
