//! Payroll orchestration: salary payments and bonuses. Each operation is a
//! single database transaction, so the treasury debit and the rows recording
//! it persist together or not at all.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{Sqlite, SqlitePool};

use crate::ledger::error::LedgerError;
use crate::ledger::money;
use crate::ledger::tax;
use crate::ledger::treasury;
use crate::model::bonus::Bonus;
use crate::model::employee::Employee;
use crate::model::transaction::Transaction;

/// Pays a salary amount to a streaming employee.
///
/// Gross is taxed, the net is debited from the treasury and recorded as a
/// transaction. Fails without side effects on a missing employee, a paused
/// stream, a non-positive amount or insufficient treasury funds.
pub async fn pay_salary(
    pool: &SqlitePool,
    employee_id: i64,
    gross: Decimal,
    description: &str,
) -> Result<Transaction, LedgerError> {
    let employee = super::employee::get(pool, employee_id).await?;
    if !employee.is_streaming {
        return Err(LedgerError::StreamNotActive);
    }

    let (net_cents, tax_cents) = split_gross(pool, &employee, gross).await?;

    treasury::get_or_create(pool).await?;
    let mut db_tx = pool.begin().await?;
    treasury::debit_for_payout(&mut db_tx, net_cents).await?;
    let transaction = insert_transaction(
        &mut db_tx,
        employee_id,
        net_cents,
        tax_cents,
        description,
        Utc::now(),
    )
    .await?;
    db_tx.commit().await?;

    Ok(transaction)
}

/// Pays a discretionary bonus. Does not require an active stream.
///
/// The bonus row stores the gross amount and reason; its net effect on the
/// treasury is recorded in a companion transaction. Both rows and the debit
/// commit as one unit, so a bonus can never exist without its transaction.
pub async fn give_bonus(
    pool: &SqlitePool,
    employee_id: i64,
    gross: Decimal,
    reason: &str,
) -> Result<(Bonus, Transaction), LedgerError> {
    let employee = super::employee::get(pool, employee_id).await?;

    let (net_cents, tax_cents) = split_gross(pool, &employee, gross).await?;
    let description = format!("Bonus: {reason}");
    let created_at = Utc::now();

    treasury::get_or_create(pool).await?;
    let mut db_tx = pool.begin().await?;
    treasury::debit_for_payout(&mut db_tx, net_cents).await?;

    let gross_cents = net_cents + tax_cents;
    let result = sqlx::query(
        r#"
        INSERT INTO bonuses (employee_id, amount_cents, reason, created_at)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(employee_id)
    .bind(gross_cents)
    .bind(reason)
    .bind(created_at)
    .execute(&mut *db_tx)
    .await?;
    let bonus = Bonus {
        id: result.last_insert_rowid(),
        employee_id,
        amount_cents: gross_cents,
        reason: reason.to_string(),
        created_at,
    };

    let transaction = insert_transaction(
        &mut db_tx,
        employee_id,
        net_cents,
        tax_cents,
        &description,
        created_at,
    )
    .await?;
    db_tx.commit().await?;

    Ok((bonus, transaction))
}

/// Validates the gross amount and splits it into net and tax cents.
/// `net + tax == gross` holds exactly: tax is rounded once, net is the
/// remainder.
async fn split_gross(
    pool: &SqlitePool,
    employee: &Employee,
    gross: Decimal,
) -> Result<(i64, i64), LedgerError> {
    let gross_cents = money::to_cents(gross)?;
    if gross_cents <= 0 {
        return Err(LedgerError::InvalidAmount);
    }

    let tax_amount = tax::calculate_tax(pool, employee, gross).await?;
    let tax_cents = money::to_cents(tax_amount)?;
    Ok((gross_cents - tax_cents, tax_cents))
}

async fn insert_transaction(
    db_tx: &mut sqlx::Transaction<'_, Sqlite>,
    employee_id: i64,
    net_cents: i64,
    tax_cents: i64,
    description: &str,
    created_at: DateTime<Utc>,
) -> Result<Transaction, LedgerError> {
    let result = sqlx::query(
        r#"
        INSERT INTO transactions (employee_id, amount_cents, tax_cents, description, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(employee_id)
    .bind(net_cents)
    .bind(tax_cents)
    .bind(description)
    .bind(created_at)
    .execute(&mut **db_tx)
    .await?;

    Ok(Transaction {
        id: result.last_insert_rowid(),
        employee_id,
        amount_cents: net_cents,
        tax_cents,
        description: description.to_string(),
        created_at,
    })
}
