// SQLite JobStore Implementation

use crate::error::map_sqlx_error;
use crate::SqliteJobTransaction;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use prioq_core::domain::{Job, JobId, NewJob, Priority, EMPTY_QUEUE_PRIORITY};
use prioq_core::error::Result;
use prioq_core::port::{JobStore, JobStoreTransaction, TransactionalJobStore};
use sqlx::{SqliteConnection, SqlitePool};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// SQLite-backed job store
///
/// Every write runs under `write_gate`. A transaction keeps the gate from
/// begin to commit, so "read max, then insert" never interleaves with another
/// writer and never has to upgrade a stale WAL read snapshot.
pub struct SqliteJobStore {
    pool: SqlitePool,
    write_gate: Arc<Mutex<()>>,
}

impl SqliteJobStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            write_gate: Arc::new(Mutex::new(())),
        }
    }
}

pub(crate) async fn select_highest_priority(conn: &mut SqliteConnection) -> Result<Priority> {
    let highest: Option<i64> = sqlx::query_scalar("SELECT MAX(priority) FROM jobs")
        .fetch_one(&mut *conn)
        .await
        .map_err(map_sqlx_error)?;

    Ok(highest.unwrap_or(EMPTY_QUEUE_PRIORITY))
}

pub(crate) async fn insert_rows(conn: &mut SqliteConnection, jobs: &[NewJob]) -> Result<Vec<JobId>> {
    let mut ids = Vec::with_capacity(jobs.len());

    for job in jobs {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO jobs (description, priority) VALUES (?, ?) RETURNING id",
        )
        .bind(&job.description)
        .bind(job.priority)
        .fetch_one(&mut *conn)
        .await
        .map_err(map_sqlx_error)?;

        ids.push(id);
    }

    Ok(ids)
}

#[async_trait]
impl JobStore for SqliteJobStore {
    async fn highest_priority(&self) -> Result<Priority> {
        let mut conn = self.pool.acquire().await.map_err(map_sqlx_error)?;
        select_highest_priority(&mut conn).await
    }

    async fn insert_batch(&self, jobs: &[NewJob]) -> Result<Vec<JobId>> {
        let _gate = self.write_gate.lock().await;
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        let ids = insert_rows(&mut tx, jobs).await?;

        tx.commit().await.map_err(map_sqlx_error)?;
        debug!(count = ids.len(), "Inserted job batch");
        Ok(ids)
    }

    async fn update_priority(&self, id: JobId, priority: Priority) -> Result<bool> {
        let _gate = self.write_gate.lock().await;

        let result = sqlx::query("UPDATE jobs SET priority = ? WHERE id = ?")
            .bind(priority)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_by_id(&self, id: JobId) -> Result<Vec<Job>> {
        let rows: Vec<JobRow> = sqlx::query_as(
            "SELECT id, description, priority, finished_at FROM jobs WHERE id = ?",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(JobRow::into_job).collect())
    }

    async fn list_ascending(&self) -> Result<Vec<Job>> {
        let rows: Vec<JobRow> = sqlx::query_as(
            r#"
            SELECT id, description, priority, finished_at
            FROM jobs
            ORDER BY priority ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(JobRow::into_job).collect())
    }
}

#[async_trait]
impl TransactionalJobStore for SqliteJobStore {
    async fn begin_transaction(&self) -> Result<Box<dyn JobStoreTransaction>> {
        // Gate first: waiting writers must not sit on pooled connections
        let gate = Arc::clone(&self.write_gate).lock_owned().await;
        let tx = self.pool.begin().await.map_err(map_sqlx_error)?;
        Ok(Box::new(SqliteJobTransaction::new(tx, gate)))
    }
}

/// SQLite row representation
#[derive(Debug, sqlx::FromRow)]
struct JobRow {
    id: i64,
    description: String,
    priority: i64,
    finished_at: Option<DateTime<Utc>>,
}

impl JobRow {
    fn into_job(self) -> Job {
        Job {
            id: self.id,
            description: self.description,
            priority: self.priority,
            finished_at: self.finished_at,
        }
    }
}
