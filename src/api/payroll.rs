use actix_web::{web, HttpResponse, Responder};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use utoipa::ToSchema;

use crate::auth::auth::AuthUser;
use crate::ledger::{money, payroll};
use crate::model::bonus::Bonus;
use crate::model::transaction::Transaction;

#[derive(Deserialize, ToSchema)]
pub struct CreateTransaction {
    #[schema(example = 1)]
    pub employee_id: i64,

    /// Gross salary amount; tax is withheld from it.
    #[schema(value_type = String, example = "100.00")]
    pub amount: Decimal,

    #[schema(example = "June salary")]
    pub description: String,
}

#[derive(Serialize, ToSchema)]
pub struct TransactionResponse {
    pub id: i64,
    pub employee_id: i64,

    /// Net amount credited.
    #[schema(value_type = String, example = "80.00")]
    pub amount: Decimal,

    #[schema(value_type = String, example = "20.00")]
    pub tax_amount: Decimal,

    pub description: String,

    #[schema(value_type = String, format = "date-time")]
    pub timestamp: DateTime<Utc>,
}

impl TransactionResponse {
    pub fn from_row(t: Transaction) -> Self {
        Self {
            id: t.id,
            employee_id: t.employee_id,
            amount: money::from_cents(t.amount_cents),
            tax_amount: money::from_cents(t.tax_cents),
            description: t.description,
            timestamp: t.created_at,
        }
    }
}

#[derive(Deserialize, ToSchema)]
pub struct CreateBonus {
    /// Gross bonus amount.
    #[schema(value_type = String, example = "250.00")]
    pub amount: Decimal,

    #[schema(example = "Q2 performance")]
    pub reason: String,
}

#[derive(Serialize, ToSchema)]
pub struct BonusResponse {
    pub id: i64,
    pub employee_id: i64,

    /// Gross bonus recorded.
    #[schema(value_type = String, example = "250.00")]
    pub amount: Decimal,

    pub reason: String,

    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
}

impl BonusResponse {
    fn from_row(b: Bonus) -> Self {
        Self {
            id: b.id,
            employee_id: b.employee_id,
            amount: money::from_cents(b.amount_cents),
            reason: b.reason,
            created_at: b.created_at,
        }
    }
}

/// Pay a salary amount to a streaming employee
#[utoipa::path(
    post,
    path = "/api/transactions",
    request_body = CreateTransaction,
    responses(
        (status = 200, description = "Salary paid", body = TransactionResponse),
        (status = 400, description = "Stream paused, bad amount or insufficient funds"),
        (status = 404, description = "Employee not found")
    ),
    tag = "Payroll",
    security(("bearer_auth" = []))
)]
pub async fn create_transaction(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateTransaction>,
) -> actix_web::Result<impl Responder> {
    auth.require_employer()?;

    match payroll::pay_salary(
        pool.get_ref(),
        payload.employee_id,
        payload.amount,
        &payload.description,
    )
    .await
    {
        Ok(t) => Ok(HttpResponse::Ok().json(TransactionResponse::from_row(t))),
        Err(e) => Ok(super::ledger_error_response(e)),
    }
}

/// Give a discretionary bonus (stream not required)
#[utoipa::path(
    post,
    path = "/api/bonuses/{employee_id}",
    params(("employee_id", description = "Employee ID")),
    request_body = CreateBonus,
    responses(
        (status = 200, description = "Bonus recorded", body = BonusResponse),
        (status = 400, description = "Bad amount or insufficient funds"),
        (status = 404, description = "Employee not found")
    ),
    tag = "Payroll",
    security(("bearer_auth" = []))
)]
pub async fn give_bonus(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    payload: web::Json<CreateBonus>,
) -> actix_web::Result<impl Responder> {
    auth.require_employer()?;

    match payroll::give_bonus(
        pool.get_ref(),
        path.into_inner(),
        payload.amount,
        &payload.reason,
    )
    .await
    {
        Ok((bonus, _transaction)) => Ok(HttpResponse::Ok().json(BonusResponse::from_row(bonus))),
        Err(e) => Ok(super::ledger_error_response(e)),
    }
}
