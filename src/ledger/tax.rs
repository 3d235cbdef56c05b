//! Withholding computation: employee override, else company default, else a
//! static fallback rate. The result feeds directly into balance arithmetic,
//! so every path rounds through [`money::round_amount`].

use rust_decimal::Decimal;
use sqlx::SqlitePool;

use crate::ledger::error::LedgerError;
use crate::ledger::money;
use crate::model::employee::Employee;
use crate::model::settings::CompanySettings;

/// Fallback withholding rate (10.00%) in basis points. Also the value the
/// company settings singleton is created with.
pub const DEFAULT_TAX_RATE_BP: i64 = 1_000;

/// Computes the tax to withhold from `gross` for this employee.
///
/// Pure aside from the company-settings read: no row is mutated.
pub async fn calculate_tax(
    pool: &SqlitePool,
    employee: &Employee,
    gross: Decimal,
) -> Result<Decimal, LedgerError> {
    let rate_bp = match (employee.use_custom_tax, employee.custom_tax_rate_bp) {
        (true, Some(bp)) => bp,
        _ => company_default_rate_bp(pool).await?,
    };

    let rate = money::rate_from_basis_points(rate_bp);
    Ok(money::round_amount(gross * rate / Decimal::ONE_HUNDRED))
}

/// Company default rate, creating the settings singleton on first read.
pub async fn company_default_rate_bp(pool: &SqlitePool) -> Result<i64, LedgerError> {
    sqlx::query("INSERT OR IGNORE INTO company_settings (id, default_tax_rate_bp) VALUES (1, ?)")
        .bind(DEFAULT_TAX_RATE_BP)
        .execute(pool)
        .await?;

    let settings = sqlx::query_as::<_, CompanySettings>(
        "SELECT id, default_tax_rate_bp FROM company_settings WHERE id = 1",
    )
    .fetch_optional(pool)
    .await?;

    Ok(settings.map_or(DEFAULT_TAX_RATE_BP, |s| s.default_tax_rate_bp))
}

pub async fn set_company_default_rate(
    pool: &SqlitePool,
    rate: Decimal,
) -> Result<i64, LedgerError> {
    let rate_bp = money::rate_to_basis_points(rate)?;
    sqlx::query(
        r#"
        INSERT INTO company_settings (id, default_tax_rate_bp) VALUES (1, ?1)
        ON CONFLICT (id) DO UPDATE SET default_tax_rate_bp = ?1
        "#,
    )
    .bind(rate_bp)
    .execute(pool)
    .await?;
    Ok(rate_bp)
}
