use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Immutable ledger entry: the net amount credited to an employee and the tax
/// withheld from the gross. Rows are only ever appended.
#[derive(Debug, Clone, FromRow)]
pub struct Transaction {
    pub id: i64,
    pub employee_id: i64,
    /// Net amount paid, in cents.
    pub amount_cents: i64,
    /// Tax withheld, in cents.
    pub tax_cents: i64,
    pub description: String,
    pub created_at: DateTime<Utc>,
}
