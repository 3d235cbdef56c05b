//! End-to-end ledger behavior: treasury accounting, payroll atomicity and
//! the streaming gate, all against an in-memory database.

mod common;

use common::{balance, count_rows, fund_treasury, seed_employee, test_pool};
use futures::future::join_all;
use rust_decimal_macros::dec;

use streampay::ledger::error::LedgerError;
use streampay::ledger::{employee, payroll, stream, tax, treasury};

#[actix_web::test]
async fn replay_identity_holds_over_mixed_operations() {
    let pool = test_pool().await;
    let emp = seed_employee(&pool, "Ada", "ada@company.com", true).await;
    employee::set_tax_override(&pool, emp.id, true, Some(dec!(10)))
        .await
        .unwrap();

    treasury::deposit(&pool, dec!(1000.00)).await.unwrap();
    treasury::deposit(&pool, dec!(250.50)).await.unwrap();
    treasury::withdraw(&pool, dec!(100.00)).await.unwrap();
    // gross 200 at 10% -> net 180
    payroll::pay_salary(&pool, emp.id, dec!(200.00), "March salary")
        .await
        .unwrap();
    // gross 50 at 10% -> net 45
    payroll::give_bonus(&pool, emp.id, dec!(50.00), "spot award")
        .await
        .unwrap();

    // 1000 + 250.50 - 100 - 180 - 45
    assert_eq!(balance(&pool).await, dec!(925.50));
}

#[actix_web::test]
async fn salary_with_custom_tax_splits_exactly() {
    let pool = test_pool().await;
    let emp = seed_employee(&pool, "Ada", "ada@company.com", true).await;
    employee::set_tax_override(&pool, emp.id, true, Some(dec!(20)))
        .await
        .unwrap();
    fund_treasury(&pool, dec!(1000.00)).await;

    let tx = payroll::pay_salary(&pool, emp.id, dec!(100.00), "June salary")
        .await
        .unwrap();

    assert_eq!(tx.tax_cents, 2_000);
    assert_eq!(tx.amount_cents, 8_000);
    assert_eq!(tx.amount_cents + tx.tax_cents, 10_000);
    assert_eq!(balance(&pool).await, dec!(920.00));
    assert_eq!(count_rows(&pool, "transactions").await, 1);
}

#[actix_web::test]
async fn net_plus_tax_equals_gross_with_odd_cents() {
    let pool = test_pool().await;
    let emp = seed_employee(&pool, "Ada", "ada@company.com", true).await;
    fund_treasury(&pool, dec!(1000.00)).await;

    // default company rate 10%: tax on 100.01 is 10.001, rounded half-even
    let tx = payroll::pay_salary(&pool, emp.id, dec!(100.01), "odd cents")
        .await
        .unwrap();

    assert_eq!(tx.tax_cents, 1_000);
    assert_eq!(tx.amount_cents, 9_001);
    assert_eq!(tx.amount_cents + tx.tax_cents, 10_001);
}

#[actix_web::test]
async fn insufficient_funds_leaves_ledger_untouched() {
    let pool = test_pool().await;
    let emp = seed_employee(&pool, "Ada", "ada@company.com", true).await;
    fund_treasury(&pool, dec!(50.00)).await;

    // default 10% tax: net 90 > 50
    let err = payroll::pay_salary(&pool, emp.id, dec!(100.00), "salary")
        .await
        .unwrap_err();

    assert!(matches!(err, LedgerError::InsufficientFunds));
    assert_eq!(balance(&pool).await, dec!(50.00));
    assert_eq!(count_rows(&pool, "transactions").await, 0);
}

#[actix_web::test]
async fn paused_employee_cannot_be_paid() {
    let pool = test_pool().await;
    let emp = seed_employee(&pool, "Ada", "ada@company.com", false).await;
    fund_treasury(&pool, dec!(500.00)).await;

    let err = payroll::pay_salary(&pool, emp.id, dec!(100.00), "salary")
        .await
        .unwrap_err();

    assert!(matches!(err, LedgerError::StreamNotActive));
    assert_eq!(balance(&pool).await, dec!(500.00));
    assert_eq!(count_rows(&pool, "transactions").await, 0);
}

#[actix_web::test]
async fn unknown_employee_is_not_found() {
    let pool = test_pool().await;
    fund_treasury(&pool, dec!(500.00)).await;

    let err = payroll::pay_salary(&pool, 999, dec!(100.00), "salary")
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::NotFound));

    let err = payroll::give_bonus(&pool, 999, dec!(100.00), "bonus")
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::NotFound));
}

#[actix_web::test]
async fn non_positive_amounts_are_rejected() {
    let pool = test_pool().await;
    let emp = seed_employee(&pool, "Ada", "ada@company.com", true).await;
    fund_treasury(&pool, dec!(500.00)).await;

    for gross in [dec!(0), dec!(-5.00)] {
        let err = payroll::pay_salary(&pool, emp.id, gross, "salary")
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidAmount));
    }

    // more than two decimal places is malformed, not rounded
    let err = payroll::pay_salary(&pool, emp.id, dec!(10.005), "salary")
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::InvalidAmount));

    assert_eq!(balance(&pool).await, dec!(500.00));
    assert_eq!(count_rows(&pool, "transactions").await, 0);
}

#[actix_web::test]
async fn bonus_writes_bonus_and_transaction_together() {
    let pool = test_pool().await;
    let emp = seed_employee(&pool, "Ada", "ada@company.com", true).await;
    employee::set_tax_override(&pool, emp.id, true, Some(dec!(20)))
        .await
        .unwrap();
    fund_treasury(&pool, dec!(1000.00)).await;

    let (bonus, tx) = payroll::give_bonus(&pool, emp.id, dec!(250.00), "Q2 performance")
        .await
        .unwrap();

    // bonus keeps the gross, the companion transaction keeps the net effect
    assert_eq!(bonus.amount_cents, 25_000);
    assert_eq!(tx.amount_cents, 20_000);
    assert_eq!(tx.tax_cents, 5_000);
    assert_eq!(tx.description, "Bonus: Q2 performance");
    assert_eq!(count_rows(&pool, "bonuses").await, 1);
    assert_eq!(count_rows(&pool, "transactions").await, 1);
    assert_eq!(balance(&pool).await, dec!(800.00));
}

#[actix_web::test]
async fn bonus_does_not_require_active_stream() {
    let pool = test_pool().await;
    let emp = seed_employee(&pool, "Ada", "ada@company.com", false).await;
    fund_treasury(&pool, dec!(1000.00)).await;

    payroll::give_bonus(&pool, emp.id, dec!(100.00), "retention")
        .await
        .unwrap();
    assert_eq!(count_rows(&pool, "bonuses").await, 1);
}

#[actix_web::test]
async fn failed_bonus_leaves_no_rows_behind() {
    let pool = test_pool().await;
    let emp = seed_employee(&pool, "Ada", "ada@company.com", true).await;
    fund_treasury(&pool, dec!(10.00)).await;

    let err = payroll::give_bonus(&pool, emp.id, dec!(100.00), "too generous")
        .await
        .unwrap_err();

    assert!(matches!(err, LedgerError::InsufficientFunds));
    assert_eq!(count_rows(&pool, "bonuses").await, 0);
    assert_eq!(count_rows(&pool, "transactions").await, 0);
    assert_eq!(balance(&pool).await, dec!(10.00));
}

#[actix_web::test]
async fn concurrent_payouts_never_overdraw() {
    let pool = test_pool().await;
    let emp = seed_employee(&pool, "Ada", "ada@company.com", true).await;
    // zero withholding so each payout debits exactly its gross
    employee::set_tax_override(&pool, emp.id, true, Some(dec!(0)))
        .await
        .unwrap();
    fund_treasury(&pool, dec!(250.00)).await;

    let attempts = (0..5).map(|i| {
        let pool = pool.clone();
        let employee_id = emp.id;
        async move { payroll::pay_salary(&pool, employee_id, dec!(100.00), &format!("run {i}")).await }
    });
    let results = join_all(attempts).await;

    let succeeded = results.iter().filter(|r| r.is_ok()).count();
    let exhausted = results
        .iter()
        .filter(|r| matches!(r, Err(LedgerError::InsufficientFunds)))
        .count();

    assert_eq!(succeeded, 2);
    assert_eq!(exhausted, 3);
    assert_eq!(balance(&pool).await, dec!(50.00));
    assert_eq!(count_rows(&pool, "transactions").await, 2);
}

#[actix_web::test]
async fn stream_toggle_is_idempotent() {
    let pool = test_pool().await;
    let emp = seed_employee(&pool, "Ada", "ada@company.com", false).await;

    assert!(stream::start_stream(&pool, emp.id).await.unwrap());
    assert!(stream::start_stream(&pool, emp.id).await.unwrap());
    assert!(employee::get(&pool, emp.id).await.unwrap().is_streaming);

    assert!(!stream::pause_stream(&pool, emp.id).await.unwrap());
    assert!(!stream::pause_stream(&pool, emp.id).await.unwrap());
    assert!(!employee::get(&pool, emp.id).await.unwrap().is_streaming);

    let err = stream::start_stream(&pool, 999).await.unwrap_err();
    assert!(matches!(err, LedgerError::NotFound));
}

#[actix_web::test]
async fn duplicate_email_is_rejected() {
    let pool = test_pool().await;
    seed_employee(&pool, "Ada", "ada@company.com", false).await;

    let err = employee::create(&pool, "Imposter", "ada@company.com", "Tester")
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::DuplicateIdentity));
}

#[actix_web::test]
async fn deleting_employee_cascades_to_ledger_rows() {
    let pool = test_pool().await;
    let emp = seed_employee(&pool, "Ada", "ada@company.com", true).await;
    fund_treasury(&pool, dec!(1000.00)).await;
    payroll::pay_salary(&pool, emp.id, dec!(100.00), "salary")
        .await
        .unwrap();
    payroll::give_bonus(&pool, emp.id, dec!(50.00), "bonus")
        .await
        .unwrap();
    let drained = balance(&pool).await;

    employee::delete(&pool, emp.id).await.unwrap();

    assert_eq!(count_rows(&pool, "transactions").await, 0);
    assert_eq!(count_rows(&pool, "bonuses").await, 0);
    // deleting history does not refund the treasury
    assert_eq!(balance(&pool).await, drained);

    let err = employee::delete(&pool, emp.id).await.unwrap_err();
    assert!(matches!(err, LedgerError::NotFound));
}

#[actix_web::test]
async fn treasury_singleton_is_created_once() {
    let pool = test_pool().await;

    let first = treasury::get_or_create(&pool).await.unwrap();
    let second = treasury::get_or_create(&pool).await.unwrap();

    assert_eq!(first.id, 1);
    assert_eq!(second.id, 1);
    assert_eq!(first.total_balance_cents, 0);
    assert_eq!(count_rows(&pool, "treasury").await, 1);
}

#[actix_web::test]
async fn deposits_and_withdrawals_validate_amounts() {
    let pool = test_pool().await;

    for amount in [dec!(0), dec!(-10.00), dec!(1.005)] {
        assert!(matches!(
            treasury::deposit(&pool, amount).await.unwrap_err(),
            LedgerError::InvalidAmount
        ));
        assert!(matches!(
            treasury::withdraw(&pool, amount).await.unwrap_err(),
            LedgerError::InvalidAmount
        ));
    }

    fund_treasury(&pool, dec!(100.00)).await;
    let err = treasury::withdraw(&pool, dec!(100.01)).await.unwrap_err();
    assert!(matches!(err, LedgerError::InsufficientFunds));
    assert_eq!(balance(&pool).await, dec!(100.00));

    let t = treasury::withdraw(&pool, dec!(100.00)).await.unwrap();
    assert_eq!(t.total_balance_cents, 0);
}

#[actix_web::test]
async fn company_default_rate_is_lazily_created_and_updatable() {
    let pool = test_pool().await;

    assert_eq!(tax::company_default_rate_bp(&pool).await.unwrap(), 1_000);
    assert_eq!(count_rows(&pool, "company_settings").await, 1);

    tax::set_company_default_rate(&pool, dec!(25)).await.unwrap();
    assert_eq!(tax::company_default_rate_bp(&pool).await.unwrap(), 2_500);

    let emp = seed_employee(&pool, "Ada", "ada@company.com", true).await;
    fund_treasury(&pool, dec!(1000.00)).await;
    let tx = payroll::pay_salary(&pool, emp.id, dec!(100.00), "salary")
        .await
        .unwrap();
    assert_eq!(tx.tax_cents, 2_500);
}

#[actix_web::test]
async fn tax_override_requires_rate_and_bounds() {
    let pool = test_pool().await;
    let emp = seed_employee(&pool, "Ada", "ada@company.com", false).await;

    // enabling without a rate is malformed
    let err = employee::set_tax_override(&pool, emp.id, true, None)
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::InvalidAmount));

    let err = employee::set_tax_override(&pool, emp.id, true, Some(dec!(100.5)))
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::InvalidAmount));

    let updated = employee::set_tax_override(&pool, emp.id, true, Some(dec!(15.25)))
        .await
        .unwrap();
    assert_eq!(updated.custom_tax_rate_bp, Some(1_525));

    // clearing the flag always clears the stored rate
    let cleared = employee::set_tax_override(&pool, emp.id, false, Some(dec!(15.25)))
        .await
        .unwrap();
    assert!(!cleared.use_custom_tax);
    assert_eq!(cleared.custom_tax_rate_bp, None);
}
