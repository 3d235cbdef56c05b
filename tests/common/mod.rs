use std::str::FromStr;

use rust_decimal::Decimal;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use streampay::db;
use streampay::ledger::{employee, money, stream, treasury};
use streampay::model::employee::Employee;

/// Fresh in-memory database. A single connection keeps the `:memory:` store
/// alive for the whole test and carries the foreign-keys pragma.
pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("memory sqlite URL")
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("connect to in-memory sqlite");

    db::init_schema(&pool).await.expect("initialize schema");
    pool
}

pub async fn seed_employee(pool: &SqlitePool, name: &str, email: &str, streaming: bool) -> Employee {
    let e = employee::create(pool, name, email, "Developer")
        .await
        .expect("create employee");
    if streaming {
        stream::start_stream(pool, e.id).await.expect("start stream");
    }
    employee::get(pool, e.id).await.expect("reload employee")
}

pub async fn fund_treasury(pool: &SqlitePool, amount: Decimal) {
    treasury::deposit(pool, amount).await.expect("deposit");
}

pub async fn balance(pool: &SqlitePool) -> Decimal {
    let t = treasury::get_or_create(pool).await.expect("treasury");
    money::from_cents(t.total_balance_cents)
}

pub async fn count_rows(pool: &SqlitePool, table: &str) -> i64 {
    let sql = format!("SELECT COUNT(*) FROM {table}");
    sqlx::query_scalar(&sql)
        .fetch_one(pool)
        .await
        .expect("count rows")
}
