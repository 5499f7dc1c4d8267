//! RPC Request/Response Types
//!
//! Defines the JSON-RPC method parameters and results.

use chrono::{DateTime, Utc};
use prioq_core::domain::{Job, JobId, Priority};
use serde::{Deserialize, Serialize};

/// Job as returned over the wire
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JobResponse {
    pub id: JobId,
    pub description: String,
    pub priority: Priority,
    pub finished_at: Option<DateTime<Utc>>,
}

impl From<Job> for JobResponse {
    fn from(job: Job) -> Self {
        Self {
            id: job.id,
            description: job.description,
            priority: job.priority,
            finished_at: job.finished_at,
        }
    }
}

/// jobs.enqueue.v1 - Enqueue jobs after the current highest priority
#[derive(Debug, Deserialize)]
pub struct EnqueueRequest {
    pub descriptions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnqueueResponse {
    pub jobs: Vec<JobResponse>,
}

/// jobs.list.v1 - List all jobs in processing order (takes no parameters)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse {
    pub jobs: Vec<JobResponse>,
}

/// jobs.get.v1 - Fetch one job
#[derive(Debug, Deserialize)]
pub struct GetRequest {
    pub job_id: JobId,
}

/// jobs.reprioritize.v1 - Overwrite a job's priority
#[derive(Debug, Deserialize)]
pub struct ReprioritizeRequest {
    pub job_id: JobId,
    pub priority: Priority,
}

/// Single-job result shared by jobs.get.v1 and jobs.reprioritize.v1
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobEnvelope {
    pub job: JobResponse,
}
