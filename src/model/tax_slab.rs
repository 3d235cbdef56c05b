use sqlx::FromRow;

/// Progressive tax bracket. CRUD-only data shape: no calculation path
/// consults these rows yet.
#[derive(Debug, Clone, FromRow)]
pub struct TaxSlab {
    pub id: i64,
    pub min_income_cents: i64,
    pub max_income_cents: Option<i64>,
    pub rate_bp: i64,
}
