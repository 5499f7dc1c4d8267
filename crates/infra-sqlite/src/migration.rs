// Schema migrations
//
// Each migration is a whole SQL script executed as-is inside one transaction,
// then recorded in `schema_version`. Scripts never touch `schema_version`.

use crate::error::map_sqlx_error;
use prioq_core::error::Result;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info};

/// A numbered schema step
struct Migration {
    version: i64,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial schema",
    sql: include_str!("../migrations/001_initial_schema.sql"),
}];

/// Bring the schema up to the latest version
///
/// Already-applied versions are skipped, so this is safe on every start.
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at INTEGER NOT NULL
        )",
    )
    .execute(pool)
    .await
    .map_err(map_sqlx_error)?;

    let current: i64 = sqlx::query_scalar("SELECT COALESCE(MAX(version), 0) FROM schema_version")
        .fetch_one(pool)
        .await
        .map_err(map_sqlx_error)?;

    let pending: Vec<_> = MIGRATIONS.iter().filter(|m| m.version > current).collect();
    if pending.is_empty() {
        debug!(version = current, "Schema up to date");
        return Ok(());
    }

    for migration in pending {
        info!(
            version = migration.version,
            name = migration.name,
            "Applying migration"
        );
        let mut tx = pool.begin().await.map_err(map_sqlx_error)?;
        apply(&mut tx, migration.version, migration.sql).await?;
        tx.commit().await.map_err(map_sqlx_error)?;
    }

    Ok(())
}

/// Run one script and record its version on the given connection
async fn apply(conn: &mut SqliteConnection, version: i64, sql: &str) -> Result<()> {
    sqlx::raw_sql(sql)
        .execute(&mut *conn)
        .await
        .map_err(map_sqlx_error)?;

    sqlx::query("INSERT INTO schema_version (version, applied_at) VALUES (?, strftime('%s', 'now'))")
        .bind(version)
        .execute(&mut *conn)
        .await
        .map_err(map_sqlx_error)?;

    Ok(())
}
