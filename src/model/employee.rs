use sqlx::FromRow;

/// Employee row. Monetary rates are stored in basis points (hundredths of a
/// percent) so they round-trip exactly; the API layer exposes them as decimal
/// percentages.
#[derive(Debug, Clone, FromRow)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub is_streaming: bool,
    pub use_custom_tax: bool,
    pub custom_tax_rate_bp: Option<i64>,
    pub wallet_address: Option<String>,
}
