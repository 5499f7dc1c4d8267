// Port Layer - Interfaces for external dependencies

pub mod job_store;
pub mod mocks; // In-memory store for tests
pub mod transaction;

// Re-exports
pub use job_store::JobStore;
pub use transaction::{JobStoreTransaction, Transaction, TransactionalJobStore};
