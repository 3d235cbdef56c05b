//! Streaming eligibility: a persisted on/off flag gating salary payments,
//! not a running timer. Payouts are driven by external calls.

use sqlx::SqlitePool;

use crate::ledger::error::LedgerError;

pub async fn start_stream(pool: &SqlitePool, employee_id: i64) -> Result<bool, LedgerError> {
    set_streaming(pool, employee_id, true).await
}

pub async fn pause_stream(pool: &SqlitePool, employee_id: i64) -> Result<bool, LedgerError> {
    set_streaming(pool, employee_id, false).await
}

/// Persists the flag and returns its new value. Setting the current value
/// again is a no-op success, so repeated starts or pauses are harmless.
async fn set_streaming(
    pool: &SqlitePool,
    employee_id: i64,
    active: bool,
) -> Result<bool, LedgerError> {
    let result = sqlx::query("UPDATE employees SET is_streaming = ? WHERE id = ?")
        .bind(active)
        .bind(employee_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(LedgerError::NotFound);
    }
    Ok(active)
}
