//! RPC Method Handlers
//!
//! Translates JSON-RPC parameters into queue service calls.

use crate::error::to_rpc_error;
use crate::types::{
    EnqueueRequest, EnqueueResponse, GetRequest, JobEnvelope, ListResponse, ReprioritizeRequest,
};
use jsonrpsee::types::ErrorObjectOwned;
use prioq_core::application::QueueService;
use prioq_core::error::AppError;
use std::sync::Arc;

/// RPC Handler with injected dependencies
pub struct RpcHandler {
    service: Arc<QueueService>,
}

impl RpcHandler {
    pub fn new(service: Arc<QueueService>) -> Self {
        Self { service }
    }

    /// jobs.enqueue.v1
    pub async fn enqueue(
        &self,
        params: EnqueueRequest,
    ) -> Result<EnqueueResponse, ErrorObjectOwned> {
        let jobs = self
            .service
            .enqueue(params.descriptions.as_slice())
            .await
            .map_err(to_rpc_error)?;

        Ok(EnqueueResponse {
            jobs: jobs.into_iter().map(Into::into).collect(),
        })
    }

    /// jobs.list.v1
    pub async fn list(&self) -> Result<ListResponse, ErrorObjectOwned> {
        let jobs = self.service.list_all().await.map_err(to_rpc_error)?;

        Ok(ListResponse {
            jobs: jobs.into_iter().map(Into::into).collect(),
        })
    }

    /// jobs.get.v1
    pub async fn get(&self, params: GetRequest) -> Result<JobEnvelope, ErrorObjectOwned> {
        let job = self
            .service
            .get_by_id(params.job_id)
            .await
            .map_err(to_rpc_error)?
            .ok_or_else(|| to_rpc_error(AppError::job_not_found(params.job_id)))?;

        Ok(JobEnvelope { job: job.into() })
    }

    /// jobs.reprioritize.v1
    pub async fn reprioritize(
        &self,
        params: ReprioritizeRequest,
    ) -> Result<JobEnvelope, ErrorObjectOwned> {
        let job = self
            .service
            .reprioritize(params.job_id, params.priority)
            .await
            .map_err(to_rpc_error)?;

        Ok(JobEnvelope { job: job.into() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::code;
    use prioq_core::port::mocks::InMemoryJobStore;

    fn handler() -> RpcHandler {
        let store = InMemoryJobStore::new();
        let service = QueueService::new(Arc::new(store.clone()), Arc::new(store));
        RpcHandler::new(Arc::new(service))
    }

    #[tokio::test]
    async fn test_enqueue_then_list() {
        let handler = handler();

        let created = handler
            .enqueue(EnqueueRequest {
                descriptions: vec!["x".to_string(), "y".to_string()],
            })
            .await
            .unwrap();
        let listed = handler.list().await.unwrap();

        assert_eq!(created.jobs.len(), 2);
        assert_eq!(listed.jobs, created.jobs);
    }

    #[tokio::test]
    async fn test_list_empty_serializes_as_array() {
        let handler = handler();

        let listed = handler.list().await.unwrap();
        let value = serde_json::to_value(&listed).unwrap();

        assert_eq!(value["jobs"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let handler = handler();

        let err = handler.get(GetRequest { job_id: 9 }).await.unwrap_err();

        assert_eq!(err.code(), code::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_reprioritize_missing_is_not_found() {
        let handler = handler();

        let err = handler
            .reprioritize(ReprioritizeRequest {
                job_id: 9,
                priority: 1,
            })
            .await
            .unwrap_err();

        assert_eq!(err.code(), code::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_reprioritize_returns_stored_job() {
        let handler = handler();
        let created = handler
            .enqueue(EnqueueRequest {
                descriptions: vec!["x".to_string()],
            })
            .await
            .unwrap();

        let updated = handler
            .reprioritize(ReprioritizeRequest {
                job_id: created.jobs[0].id,
                priority: 10,
            })
            .await
            .unwrap();

        assert_eq!(updated.job.priority, 10);
        assert_eq!(updated.job.description, "x");
    }
}
