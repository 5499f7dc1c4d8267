// Job Domain Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Job ID (assigned by the store at insert time, never reused)
pub type JobId = i64;

/// Priority (lower number = processed earlier)
pub type Priority = i64;

/// Job Entity
///
/// `description` is an opaque payload and is not an identity field:
/// two jobs may carry the same description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub description: String,
    pub priority: Priority,

    /// Set once when the job completes; completion itself happens outside this crate
    pub finished_at: Option<DateTime<Utc>>,
}

impl Job {
    /// Build the record of a job the store just accepted
    pub fn pending(id: JobId, new_job: NewJob) -> Self {
        Self {
            id,
            description: new_job.description,
            priority: new_job.priority,
            finished_at: None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished_at.is_some()
    }
}

/// Insert record handed to the store (id is assigned by the store)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewJob {
    pub description: String,
    pub priority: Priority,
}

impl NewJob {
    pub fn new(description: impl Into<String>, priority: Priority) -> Self {
        Self {
            description: description.into(),
            priority,
        }
    }
}
