use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Discretionary payment record. Stores the gross amount; the net effect on
/// the treasury lives in the companion transaction row created with it.
#[derive(Debug, Clone, FromRow)]
pub struct Bonus {
    pub id: i64,
    pub employee_id: i64,
    /// Gross bonus, in cents.
    pub amount_cents: i64,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}
