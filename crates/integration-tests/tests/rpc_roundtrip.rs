//! JSON-RPC surface over a live server backed by SQLite

use std::sync::Arc;

use jsonrpsee::core::client::{ClientT, Error as ClientError};
use jsonrpsee::core::params::ObjectParams;
use jsonrpsee::http_client::{HttpClient, HttpClientBuilder};
use jsonrpsee::server::ServerHandle;
use prioq_api_rpc::error::code;
use prioq_api_rpc::types::{EnqueueResponse, JobEnvelope, ListResponse};
use prioq_api_rpc::{RpcServer, RpcServerConfig};
use prioq_core::application::QueueService;
use prioq_infra_sqlite::{create_pool, run_migrations, SqliteJobStore};

async fn start_server() -> (HttpClient, ServerHandle) {
    let pool = create_pool("sqlite::memory:").await.unwrap();
    run_migrations(&pool).await.unwrap();

    let store = Arc::new(SqliteJobStore::new(pool));
    let service = Arc::new(QueueService::new(store.clone(), store));

    let config = RpcServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
    };
    let (addr, handle) = RpcServer::new(config, service).start().await.unwrap();

    let client = HttpClientBuilder::default()
        .build(format!("http://{}", addr))
        .unwrap();
    (client, handle)
}

fn enqueue_params(descriptions: &[&str]) -> ObjectParams {
    let mut params = ObjectParams::new();
    params.insert("descriptions", descriptions).unwrap();
    params
}

fn job_params(job_id: i64, priority: Option<i64>) -> ObjectParams {
    let mut params = ObjectParams::new();
    params.insert("job_id", job_id).unwrap();
    if let Some(priority) = priority {
        params.insert("priority", priority).unwrap();
    }
    params
}

#[tokio::test]
async fn test_enqueue_list_reprioritize_over_rpc() {
    let (client, handle) = start_server().await;

    let empty: ListResponse = client
        .request("jobs.list.v1", ObjectParams::new())
        .await
        .unwrap();
    assert!(empty.jobs.is_empty());

    let created: EnqueueResponse = client
        .request("jobs.enqueue.v1", enqueue_params(&["x", "y"]))
        .await
        .unwrap();
    assert_eq!(created.jobs.len(), 2);
    assert_eq!(created.jobs[0].priority, 1);
    assert_eq!(created.jobs[1].priority, 2);

    let moved: JobEnvelope = client
        .request(
            "jobs.reprioritize.v1",
            job_params(created.jobs[0].id, Some(10)),
        )
        .await
        .unwrap();
    assert_eq!(moved.job.priority, 10);
    assert_eq!(moved.job.description, "x");

    let listed: ListResponse = client
        .request("jobs.list.v1", ObjectParams::new())
        .await
        .unwrap();
    let descriptions: Vec<_> = listed.jobs.iter().map(|j| j.description.as_str()).collect();
    assert_eq!(descriptions, vec!["y", "x"]);

    let fetched: JobEnvelope = client
        .request("jobs.get.v1", job_params(created.jobs[1].id, None))
        .await
        .unwrap();
    assert_eq!(fetched.job, created.jobs[1]);

    handle.stop().unwrap();
    handle.stopped().await;
}

#[tokio::test]
async fn test_missing_job_maps_to_not_found_code() {
    let (client, handle) = start_server().await;

    let get_err = client
        .request::<JobEnvelope, _>("jobs.get.v1", job_params(404, None))
        .await
        .unwrap_err();
    let reprioritize_err = client
        .request::<JobEnvelope, _>("jobs.reprioritize.v1", job_params(404, Some(1)))
        .await
        .unwrap_err();

    for err in [get_err, reprioritize_err] {
        match err {
            ClientError::Call(obj) => assert_eq!(obj.code(), code::NOT_FOUND),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    handle.stop().unwrap();
    handle.stopped().await;
}
