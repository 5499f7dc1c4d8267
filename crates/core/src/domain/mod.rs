// Domain Layer - Pure ordering logic and entities

pub mod error;
pub mod job;
pub mod priority;

// Re-exports
pub use error::DomainError;
pub use job::{Job, JobId, NewJob, Priority};
pub use priority::{assign_priorities, EMPTY_QUEUE_PRIORITY};
