use actix_web::{web, HttpResponse, Responder};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use utoipa::ToSchema;

use crate::auth::auth::AuthUser;
use crate::ledger::{money, treasury};
use crate::model::treasury::Treasury;

#[derive(Deserialize, ToSchema)]
pub struct TreasuryAction {
    #[schema(value_type = String, example = "1000.00")]
    pub amount: Decimal,
}

#[derive(Serialize, ToSchema)]
pub struct TreasuryResponse {
    pub id: i64,

    /// Spendable off-chain balance.
    #[schema(value_type = String, example = "10000.00")]
    pub total_balance: Decimal,

    /// Reserved for future settlement; never mutated here.
    #[schema(value_type = String, example = "0.00")]
    pub onchain_balance: Decimal,

    pub last_tx_hash: Option<String>,

    #[schema(value_type = Option<String>, format = "date-time")]
    pub last_synced_at: Option<DateTime<Utc>>,
}

impl TreasuryResponse {
    fn from_row(t: Treasury) -> Self {
        Self {
            id: t.id,
            total_balance: money::from_cents(t.total_balance_cents),
            onchain_balance: money::from_cents(t.onchain_balance_cents),
            last_tx_hash: t.last_tx_hash,
            last_synced_at: t.last_synced_at,
        }
    }
}

/// Current treasury balances (created lazily on first access)
#[utoipa::path(
    get,
    path = "/api/treasury",
    responses((status = 200, description = "Treasury state", body = TreasuryResponse)),
    tag = "Treasury",
    security(("bearer_auth" = []))
)]
pub async fn get_treasury(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
) -> actix_web::Result<impl Responder> {
    auth.require_employer()?;

    match treasury::get_or_create(pool.get_ref()).await {
        Ok(t) => Ok(HttpResponse::Ok().json(TreasuryResponse::from_row(t))),
        Err(e) => Ok(super::ledger_error_response(e)),
    }
}

/// Deposit into the treasury
#[utoipa::path(
    post,
    path = "/api/treasury/deposit",
    request_body = TreasuryAction,
    responses(
        (status = 200, description = "Updated treasury", body = TreasuryResponse),
        (status = 400, description = "Amount must be greater than 0")
    ),
    tag = "Treasury",
    security(("bearer_auth" = []))
)]
pub async fn deposit_treasury(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    payload: web::Json<TreasuryAction>,
) -> actix_web::Result<impl Responder> {
    auth.require_employer()?;

    match treasury::deposit(pool.get_ref(), payload.amount).await {
        Ok(t) => Ok(HttpResponse::Ok().json(TreasuryResponse::from_row(t))),
        Err(e) => Ok(super::ledger_error_response(e)),
    }
}

/// Withdraw from the treasury
#[utoipa::path(
    post,
    path = "/api/treasury/withdraw",
    request_body = TreasuryAction,
    responses(
        (status = 200, description = "Updated treasury", body = TreasuryResponse),
        (status = 400, description = "Bad amount or insufficient balance")
    ),
    tag = "Treasury",
    security(("bearer_auth" = []))
)]
pub async fn withdraw_treasury(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    payload: web::Json<TreasuryAction>,
) -> actix_web::Result<impl Responder> {
    auth.require_employer()?;

    match treasury::withdraw(pool.get_ref(), payload.amount).await {
        Ok(t) => Ok(HttpResponse::Ok().json(TreasuryResponse::from_row(t))),
        Err(e) => Ok(super::ledger_error_response(e)),
    }
}
