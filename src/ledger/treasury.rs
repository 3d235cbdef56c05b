//! The treasury singleton: the one piece of contended mutable state. Every
//! balance change is a single guarded UPDATE so a funds check can never pass
//! against a balance another request has not yet committed.

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::{Sqlite, SqlitePool};

use crate::ledger::error::LedgerError;
use crate::ledger::money;
use crate::model::treasury::Treasury;

const TREASURY_COLUMNS: &str =
    "id, total_balance_cents, onchain_balance_cents, last_tx_hash, last_synced_at, updated_at";

/// Returns the treasury row, creating it with zero balances on first access.
///
/// `INSERT OR IGNORE` on the fixed id makes the lazy create idempotent under
/// concurrent first requests; there is no read-then-insert window.
pub async fn get_or_create(pool: &SqlitePool) -> Result<Treasury, LedgerError> {
    sqlx::query(
        r#"
        INSERT OR IGNORE INTO treasury (id, total_balance_cents, onchain_balance_cents, updated_at)
        VALUES (1, 0, 0, ?)
        "#,
    )
    .bind(Utc::now())
    .execute(pool)
    .await?;

    fetch(pool).await
}

async fn fetch(pool: &SqlitePool) -> Result<Treasury, LedgerError> {
    let sql = format!("SELECT {TREASURY_COLUMNS} FROM treasury WHERE id = 1");
    Ok(sqlx::query_as::<_, Treasury>(&sql).fetch_one(pool).await?)
}

pub async fn deposit(pool: &SqlitePool, amount: Decimal) -> Result<Treasury, LedgerError> {
    let cents = money::to_cents(amount)?;
    if cents <= 0 {
        return Err(LedgerError::InvalidAmount);
    }

    get_or_create(pool).await?;
    sqlx::query(
        r#"
        UPDATE treasury
        SET total_balance_cents = total_balance_cents + ?, updated_at = ?
        WHERE id = 1
        "#,
    )
    .bind(cents)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    fetch(pool).await
}

pub async fn withdraw(pool: &SqlitePool, amount: Decimal) -> Result<Treasury, LedgerError> {
    let cents = money::to_cents(amount)?;
    if cents <= 0 {
        return Err(LedgerError::InvalidAmount);
    }

    get_or_create(pool).await?;
    let result = sqlx::query(
        r#"
        UPDATE treasury
        SET total_balance_cents = total_balance_cents - ?1, updated_at = ?2
        WHERE id = 1 AND total_balance_cents >= ?1
        "#,
    )
    .bind(cents)
    .bind(Utc::now())
    .execute(pool)
    .await?;
    if result.rows_affected() == 0 {
        return Err(LedgerError::InsufficientFunds);
    }

    fetch(pool).await
}

/// Debits the payout net amount inside the caller's open transaction, so the
/// balance decrement commits (or rolls back) together with the transaction
/// and bonus rows the payroll engine writes.
pub(crate) async fn debit_for_payout(
    db_tx: &mut sqlx::Transaction<'_, Sqlite>,
    net_cents: i64,
) -> Result<(), LedgerError> {
    let result = sqlx::query(
        r#"
        UPDATE treasury
        SET total_balance_cents = total_balance_cents - ?1, updated_at = ?2
        WHERE id = 1 AND total_balance_cents >= ?1
        "#,
    )
    .bind(net_cents)
    .bind(Utc::now())
    .execute(&mut **db_tx)
    .await?;
    if result.rows_affected() == 0 {
        return Err(LedgerError::InsufficientFunds);
    }
    Ok(())
}
