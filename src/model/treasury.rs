use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// The company treasury singleton (always id 1). `onchain_balance_cents` is a
/// reserved field for future settlement and is never mutated here.
#[derive(Debug, Clone, FromRow)]
pub struct Treasury {
    pub id: i64,
    pub total_balance_cents: i64,
    pub onchain_balance_cents: i64,
    pub last_tx_hash: Option<String>,
    pub last_synced_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}
