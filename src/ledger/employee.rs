//! Employee persistence used by the ledger core and the HTTP layer. Employees
//! own their transactions and bonuses; deleting one cascades to both.

use rust_decimal::Decimal;
use sqlx::SqlitePool;

use crate::ledger::error::LedgerError;
use crate::ledger::money;
use crate::model::employee::Employee;
use crate::model::transaction::Transaction;

const EMPLOYEE_COLUMNS: &str =
    "id, name, email, role, is_streaming, use_custom_tax, custom_tax_rate_bp, wallet_address";

pub async fn create(
    pool: &SqlitePool,
    name: &str,
    email: &str,
    role: &str,
) -> Result<Employee, LedgerError> {
    let result = sqlx::query(
        r#"
        INSERT INTO employees (name, email, role, is_streaming, use_custom_tax)
        VALUES (?, ?, ?, 0, 0)
        "#,
    )
    .bind(name)
    .bind(email)
    .bind(role)
    .execute(pool)
    .await
    .map_err(LedgerError::from_insert)?;

    get(pool, result.last_insert_rowid()).await
}

pub async fn get(pool: &SqlitePool, employee_id: i64) -> Result<Employee, LedgerError> {
    let sql = format!("SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = ?");
    sqlx::query_as::<_, Employee>(&sql)
        .bind(employee_id)
        .fetch_optional(pool)
        .await?
        .ok_or(LedgerError::NotFound)
}

pub async fn find_by_email(
    pool: &SqlitePool,
    email: &str,
) -> Result<Option<Employee>, LedgerError> {
    let sql = format!("SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE email = ?");
    Ok(sqlx::query_as::<_, Employee>(&sql)
        .bind(email)
        .fetch_optional(pool)
        .await?)
}

pub async fn list(pool: &SqlitePool) -> Result<Vec<Employee>, LedgerError> {
    let sql = format!("SELECT {EMPLOYEE_COLUMNS} FROM employees ORDER BY id");
    Ok(sqlx::query_as::<_, Employee>(&sql).fetch_all(pool).await?)
}

/// Deletes an employee together with its transactions and bonuses
/// (`ON DELETE CASCADE` on both child tables).
pub async fn delete(pool: &SqlitePool, employee_id: i64) -> Result<(), LedgerError> {
    let result = sqlx::query("DELETE FROM employees WHERE id = ?")
        .bind(employee_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(LedgerError::NotFound);
    }
    Ok(())
}

/// Sets or clears the employee's withholding override.
///
/// A set override requires a rate in [0,100]; clearing the flag always clears
/// the stored rate so a rate can never exist without the flag.
pub async fn set_tax_override(
    pool: &SqlitePool,
    employee_id: i64,
    use_custom_tax: bool,
    custom_tax_rate: Option<Decimal>,
) -> Result<Employee, LedgerError> {
    let rate_bp = if use_custom_tax {
        let rate = custom_tax_rate.ok_or(LedgerError::InvalidAmount)?;
        Some(money::rate_to_basis_points(rate)?)
    } else {
        None
    };

    let result = sqlx::query(
        "UPDATE employees SET use_custom_tax = ?, custom_tax_rate_bp = ? WHERE id = ?",
    )
    .bind(use_custom_tax)
    .bind(rate_bp)
    .bind(employee_id)
    .execute(pool)
    .await?;
    if result.rows_affected() == 0 {
        return Err(LedgerError::NotFound);
    }

    get(pool, employee_id).await
}

pub async fn set_wallet(
    pool: &SqlitePool,
    employee_id: i64,
    wallet_address: Option<&str>,
) -> Result<Employee, LedgerError> {
    let result = sqlx::query("UPDATE employees SET wallet_address = ? WHERE id = ?")
        .bind(wallet_address)
        .bind(employee_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(LedgerError::NotFound);
    }

    get(pool, employee_id).await
}

/// All ledger entries for one employee, oldest first.
pub async fn transactions(
    pool: &SqlitePool,
    employee_id: i64,
) -> Result<Vec<Transaction>, LedgerError> {
    Ok(sqlx::query_as::<_, Transaction>(
        r#"
        SELECT id, employee_id, amount_cents, tax_cents, description, created_at
        FROM transactions
        WHERE employee_id = ?
        ORDER BY id
        "#,
    )
    .bind(employee_id)
    .fetch_all(pool)
    .await?)
}
