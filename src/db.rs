use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

use crate::auth::password::hash_password;
use crate::ledger::{tax, treasury};
use crate::model::role::Role;

const CREATE_EMPLOYEES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS employees (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    role TEXT NOT NULL DEFAULT 'employee',
    is_streaming INTEGER NOT NULL DEFAULT 0,
    use_custom_tax INTEGER NOT NULL DEFAULT 0,
    custom_tax_rate_bp INTEGER,
    wallet_address TEXT
)
"#;

const CREATE_TRANSACTIONS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS transactions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    employee_id INTEGER NOT NULL REFERENCES employees(id) ON DELETE CASCADE,
    amount_cents INTEGER NOT NULL,
    tax_cents INTEGER NOT NULL DEFAULT 0,
    description TEXT NOT NULL DEFAULT '',
    created_at TEXT NOT NULL
)
"#;

const CREATE_BONUSES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS bonuses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    employee_id INTEGER NOT NULL REFERENCES employees(id) ON DELETE CASCADE,
    amount_cents INTEGER NOT NULL,
    reason TEXT NOT NULL DEFAULT '',
    created_at TEXT NOT NULL
)
"#;

const CREATE_TREASURY_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS treasury (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    total_balance_cents INTEGER NOT NULL DEFAULT 0 CHECK (total_balance_cents >= 0),
    onchain_balance_cents INTEGER NOT NULL DEFAULT 0,
    last_tx_hash TEXT,
    last_synced_at TEXT,
    updated_at TEXT NOT NULL
)
"#;

const CREATE_COMPANY_SETTINGS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS company_settings (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    default_tax_rate_bp INTEGER NOT NULL
)
"#;

const CREATE_TAX_SLABS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS tax_slabs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    min_income_cents INTEGER NOT NULL,
    max_income_cents INTEGER,
    rate_bp INTEGER NOT NULL
)
"#;

const CREATE_USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    email TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL,
    role_id INTEGER NOT NULL DEFAULT 2
)
"#;

const CREATE_REFRESH_TOKENS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS refresh_tokens (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    jti TEXT NOT NULL UNIQUE,
    expires_at TEXT NOT NULL,
    revoked INTEGER NOT NULL DEFAULT 0
)
"#;

pub async fn init_db(database_url: &str) -> SqlitePool {
    let options = SqliteConnectOptions::from_str(database_url)
        .expect("DATABASE_URL is not a valid sqlite URL")
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .connect_with(options)
        .await
        .expect("Failed to connect to database");

    init_schema(&pool)
        .await
        .expect("Failed to initialize database schema");

    pool
}

pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for statement in [
        CREATE_EMPLOYEES_TABLE,
        CREATE_TRANSACTIONS_TABLE,
        CREATE_BONUSES_TABLE,
        CREATE_TREASURY_TABLE,
        CREATE_COMPANY_SETTINGS_TABLE,
        CREATE_TAX_SLABS_TABLE,
        CREATE_USERS_TABLE,
        CREATE_REFRESH_TOKENS_TABLE,
    ] {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}

/// Idempotent startup data: one employer and one employee login, a streaming
/// demo employee, and the treasury/settings singletons.
pub async fn seed(pool: &SqlitePool) -> anyhow::Result<()> {
    seed_user(pool, "employer@test.com", "123456", Role::Employer).await?;
    seed_user(pool, "employee@test.com", "123456", Role::Employee).await?;

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees")
        .fetch_one(pool)
        .await?;
    if existing == 0 {
        sqlx::query(
            r#"
            INSERT INTO employees (name, email, role, is_streaming)
            VALUES ('Test Employee', 'employee@test.com', 'Developer', 1)
            "#,
        )
        .execute(pool)
        .await?;
        info!("Seeded demo employee");
    }

    treasury::get_or_create(pool).await?;
    tax::company_default_rate_bp(pool).await?;

    Ok(())
}

async fn seed_user(
    pool: &SqlitePool,
    email: &str,
    password: &str,
    role: Role,
) -> anyhow::Result<()> {
    let exists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = ?")
        .bind(email)
        .fetch_one(pool)
        .await?;
    if exists == 0 {
        sqlx::query("INSERT INTO users (email, password, role_id) VALUES (?, ?, ?)")
            .bind(email)
            .bind(hash_password(password))
            .bind(role as i64)
            .execute(pool)
            .await?;
        info!(email, "Seeded user");
    }
    Ok(())
}
