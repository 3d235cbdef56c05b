use sqlx::FromRow;

/// Company-wide settings singleton (always id 1).
#[derive(Debug, Clone, FromRow)]
pub struct CompanySettings {
    pub id: i64,
    /// Default withholding rate in basis points, applied when an employee has
    /// no custom override.
    pub default_tax_rate_bp: i64,
}
