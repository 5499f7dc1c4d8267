// sqlx::Error -> AppError::Store mapping

use prioq_core::error::AppError;

/// Convert sqlx::Error to AppError with structured information
pub fn map_sqlx_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) => {
            // SQLite error codes: https://www.sqlite.org/rescode.html
            match db_err.code().as_deref() {
                Some(code @ ("2067" | "1555")) => AppError::Store(format!(
                    "Unique constraint violation: {} ({})",
                    db_err.message(),
                    code
                )),
                Some("5") => {
                    AppError::Store(format!("Database locked (SQLITE_BUSY): {}", db_err.message()))
                }
                Some("13") => AppError::Store(format!("Database full: {}", db_err.message())),
                Some(code) => AppError::Store(format!(
                    "Database error [{}]: {}",
                    code,
                    db_err.message()
                )),
                None => AppError::Store(format!("Database error: {}", db_err.message())),
            }
        }
        sqlx::Error::RowNotFound => AppError::Store("Row not found".to_string()),
        sqlx::Error::ColumnNotFound(col) => AppError::Store(format!("Column not found: {}", col)),
        sqlx::Error::PoolTimedOut => AppError::Store("Timed out acquiring a connection".to_string()),
        // Connection, pool, protocol errors
        _ => AppError::Store(err.to_string()),
    }
}
