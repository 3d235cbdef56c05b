//! Dashboard rollups computed from the transaction log.

mod common;

use chrono::{TimeZone, Utc};
use common::{count_rows, fund_treasury, seed_employee, test_pool};
use rust_decimal_macros::dec;
use sqlx::SqlitePool;

use streampay::ledger::{payroll, report};

async fn insert_transaction_at(
    pool: &SqlitePool,
    employee_id: i64,
    net_cents: i64,
    tax_cents: i64,
    year: i32,
    month: u32,
) {
    let created_at = Utc.with_ymd_and_hms(year, month, 15, 12, 0, 0).unwrap();
    sqlx::query(
        r#"
        INSERT INTO transactions (employee_id, amount_cents, tax_cents, description, created_at)
        VALUES (?, ?, ?, 'backfill', ?)
        "#,
    )
    .bind(employee_id)
    .bind(net_cents)
    .bind(tax_cents)
    .bind(created_at)
    .execute(pool)
    .await
    .expect("insert transaction");
}

#[actix_web::test]
async fn empty_log_reports_zeroes() {
    let pool = test_pool().await;

    assert_eq!(report::total_payout(&pool).await.unwrap(), dec!(0));
    assert_eq!(report::total_tax_collected(&pool).await.unwrap(), dec!(0));
    assert_eq!(report::active_streams(&pool).await.unwrap(), 0);
    assert!(report::top_earners(&pool).await.unwrap().is_empty());
    assert!(report::monthly_summary(&pool).await.unwrap().is_empty());
}

#[actix_web::test]
async fn totals_sum_the_whole_log() {
    let pool = test_pool().await;
    let emp = seed_employee(&pool, "Ada", "ada@company.com", true).await;
    fund_treasury(&pool, dec!(1000.00)).await;

    // default 10% withholding
    payroll::pay_salary(&pool, emp.id, dec!(100.00), "salary")
        .await
        .unwrap();
    payroll::give_bonus(&pool, emp.id, dec!(50.00), "bonus")
        .await
        .unwrap();

    assert_eq!(report::total_payout(&pool).await.unwrap(), dec!(135.00));
    assert_eq!(report::total_tax_collected(&pool).await.unwrap(), dec!(15.00));
    assert_eq!(
        report::employee_total_net(&pool, emp.id).await.unwrap(),
        dec!(135.00)
    );
}

#[actix_web::test]
async fn monthly_summary_groups_ascending_and_omits_empty_months() {
    let pool = test_pool().await;
    let emp = seed_employee(&pool, "Ada", "ada@company.com", false).await;

    // out-of-order inserts; February twice, nothing in between months
    insert_transaction_at(&pool, emp.id, 5_000, 1_000, 2024, 2).await;
    insert_transaction_at(&pool, emp.id, 8_000, 2_000, 2024, 1).await;
    insert_transaction_at(&pool, emp.id, 2_000, 500, 2024, 2).await;
    insert_transaction_at(&pool, emp.id, 1_000, 0, 2023, 12).await;

    let months = report::monthly_summary(&pool).await.unwrap();
    let keys: Vec<&str> = months.iter().map(|m| m.month.as_str()).collect();
    assert_eq!(keys, vec!["2023-12", "2024-01", "2024-02"]);

    assert_eq!(months[0].net, dec!(10.00));
    assert_eq!(months[1].net, dec!(80.00));
    assert_eq!(months[1].tax, dec!(20.00));
    assert_eq!(months[2].net, dec!(70.00));
    assert_eq!(months[2].tax, dec!(15.00));
}

#[actix_web::test]
async fn top_earners_rank_by_net_with_stable_ties() {
    let pool = test_pool().await;
    let a = seed_employee(&pool, "Ada", "ada@company.com", false).await;
    let b = seed_employee(&pool, "Brian", "brian@company.com", false).await;
    let c = seed_employee(&pool, "Cleo", "cleo@company.com", false).await;
    // no transactions for this one: excluded from the ranking
    seed_employee(&pool, "Dara", "dara@company.com", false).await;

    insert_transaction_at(&pool, a.id, 5_000, 0, 2024, 1).await;
    insert_transaction_at(&pool, b.id, 9_000, 0, 2024, 1).await;
    insert_transaction_at(&pool, c.id, 3_000, 0, 2024, 1).await;
    insert_transaction_at(&pool, c.id, 2_000, 0, 2024, 2).await;

    let earners = report::top_earners(&pool).await.unwrap();
    let order: Vec<i64> = earners.iter().map(|e| e.employee_id).collect();
    // Brian 90, then Ada and Cleo tied at 50 -> lower id first
    assert_eq!(order, vec![b.id, a.id, c.id]);
    assert_eq!(earners[0].total_net, dec!(90.00));
    assert_eq!(earners[1].total_net, dec!(50.00));
    assert_eq!(earners[2].total_net, dec!(50.00));
}

#[actix_web::test]
async fn active_streams_counts_eligible_employees() {
    let pool = test_pool().await;
    seed_employee(&pool, "Ada", "ada@company.com", true).await;
    seed_employee(&pool, "Brian", "brian@company.com", true).await;
    seed_employee(&pool, "Cleo", "cleo@company.com", false).await;

    assert_eq!(report::active_streams(&pool).await.unwrap(), 2);
    assert_eq!(count_rows(&pool, "employees").await, 3);
}
