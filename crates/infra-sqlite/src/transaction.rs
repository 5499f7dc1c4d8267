// SQLite Transaction Implementation

use crate::error::map_sqlx_error;
use crate::job_store::{insert_rows, select_highest_priority};
use async_trait::async_trait;
use prioq_core::domain::{JobId, NewJob, Priority};
use prioq_core::error::Result;
use prioq_core::port::{JobStoreTransaction, Transaction};
use sqlx::{Sqlite, Transaction as SqlxTransaction};
use tokio::sync::OwnedMutexGuard;

/// A store transaction holding the store's write gate until it ends.
///
/// Field order matters: the sqlx transaction is dropped (and rolled back)
/// before the gate is released.
pub struct SqliteJobTransaction {
    tx: SqlxTransaction<'static, Sqlite>,
    _gate: OwnedMutexGuard<()>,
}

impl SqliteJobTransaction {
    pub fn new(tx: SqlxTransaction<'static, Sqlite>, gate: OwnedMutexGuard<()>) -> Self {
        Self { tx, _gate: gate }
    }
}

#[async_trait]
impl Transaction for SqliteJobTransaction {
    async fn commit(self: Box<Self>) -> Result<()> {
        self.tx.commit().await.map_err(map_sqlx_error)?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        self.tx.rollback().await.map_err(map_sqlx_error)?;
        Ok(())
    }
}

#[async_trait]
impl JobStoreTransaction for SqliteJobTransaction {
    async fn highest_priority(&mut self) -> Result<Priority> {
        select_highest_priority(&mut self.tx).await
    }

    async fn insert_batch(&mut self, jobs: &[NewJob]) -> Result<Vec<JobId>> {
        insert_rows(&mut self.tx, jobs).await
    }
}
