//! Read-only rollups over the transaction log, computed on demand. Dashboard
//! traffic is low, so nothing here is cached.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{FromRow, SqlitePool};
use utoipa::ToSchema;

use crate::ledger::error::LedgerError;
use crate::ledger::money;

#[derive(Debug, Serialize, ToSchema)]
pub struct Earner {
    pub employee_id: i64,
    #[schema(example = "Jane Doe")]
    pub name: String,
    #[schema(value_type = String, example = "1250.00")]
    pub total_net: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MonthlySummary {
    #[schema(example = "2024-01")]
    pub month: String,
    #[schema(value_type = String, example = "80.00")]
    pub net: Decimal,
    #[schema(value_type = String, example = "20.00")]
    pub tax: Decimal,
}

/// Sum of all net amounts ever paid out.
pub async fn total_payout(pool: &SqlitePool) -> Result<Decimal, LedgerError> {
    let cents: Option<i64> = sqlx::query_scalar("SELECT SUM(amount_cents) FROM transactions")
        .fetch_one(pool)
        .await?;
    Ok(money::from_cents(cents.unwrap_or(0)))
}

/// Sum of all tax amounts ever withheld.
pub async fn total_tax_collected(pool: &SqlitePool) -> Result<Decimal, LedgerError> {
    let cents: Option<i64> = sqlx::query_scalar("SELECT SUM(tax_cents) FROM transactions")
        .fetch_one(pool)
        .await?;
    Ok(money::from_cents(cents.unwrap_or(0)))
}

/// Lifetime net received by one employee.
pub async fn employee_total_net(
    pool: &SqlitePool,
    employee_id: i64,
) -> Result<Decimal, LedgerError> {
    let cents: Option<i64> =
        sqlx::query_scalar("SELECT SUM(amount_cents) FROM transactions WHERE employee_id = ?")
            .bind(employee_id)
            .fetch_one(pool)
            .await?;
    Ok(money::from_cents(cents.unwrap_or(0)))
}

/// Number of employees currently eligible for salary payments.
pub async fn active_streams(pool: &SqlitePool) -> Result<i64, LedgerError> {
    Ok(
        sqlx::query_scalar("SELECT COUNT(*) FROM employees WHERE is_streaming = 1")
            .fetch_one(pool)
            .await?,
    )
}

#[derive(FromRow)]
struct EarnerRow {
    employee_id: i64,
    name: String,
    total_cents: i64,
}

/// Employees ranked by total net received, descending; ties broken by
/// employee id ascending so the order is stable across runs.
pub async fn top_earners(pool: &SqlitePool) -> Result<Vec<Earner>, LedgerError> {
    let rows = sqlx::query_as::<_, EarnerRow>(
        r#"
        SELECT e.id AS employee_id, e.name AS name, SUM(t.amount_cents) AS total_cents
        FROM employees e
        JOIN transactions t ON t.employee_id = e.id
        GROUP BY e.id
        ORDER BY total_cents DESC, e.id ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|r| Earner {
            employee_id: r.employee_id,
            name: r.name,
            total_net: money::from_cents(r.total_cents),
        })
        .collect())
}

#[derive(FromRow)]
struct SummaryRow {
    amount_cents: i64,
    tax_cents: i64,
    created_at: DateTime<Utc>,
}

/// Net and tax grouped by calendar month, ascending. Months without
/// transactions are omitted rather than zero-filled.
///
/// Grouping happens here, not in SQL: truncating the timestamp in one place
/// keeps the result independent of storage-dialect date functions.
pub async fn monthly_summary(pool: &SqlitePool) -> Result<Vec<MonthlySummary>, LedgerError> {
    let rows = sqlx::query_as::<_, SummaryRow>(
        "SELECT amount_cents, tax_cents, created_at FROM transactions",
    )
    .fetch_all(pool)
    .await?;

    let mut months: BTreeMap<String, (i64, i64)> = BTreeMap::new();
    for row in rows {
        let bucket = months.entry(month_key(row.created_at)).or_insert((0, 0));
        bucket.0 += row.amount_cents;
        bucket.1 += row.tax_cents;
    }

    Ok(months
        .into_iter()
        .map(|(month, (net_cents, tax_cents))| MonthlySummary {
            month,
            net: money::from_cents(net_cents),
            tax: money::from_cents(tax_cents),
        })
        .collect())
}

/// Truncates a UTC instant to its year-month key, e.g. `2024-01`.
fn month_key(at: DateTime<Utc>) -> String {
    format!("{:04}-{:02}", at.year(), at.month())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn month_key_zero_pads() {
        let at = Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 59).unwrap();
        assert_eq!(month_key(at), "2024-01");
        let at = Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap();
        assert_eq!(month_key(at), "2024-12");
    }
}
