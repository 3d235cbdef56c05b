use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use sqlx::SqlitePool;

use crate::auth::auth::AuthUser;
use crate::ledger::report;
use crate::ledger::report::{Earner, MonthlySummary};

/// Sum of all net amounts paid out
#[utoipa::path(
    get,
    path = "/api/dashboard/total-payout",
    responses((status = 200, description = "Total net paid")),
    tag = "Dashboard",
    security(("bearer_auth" = []))
)]
pub async fn total_payout(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
) -> actix_web::Result<impl Responder> {
    auth.require_employer()?;

    match report::total_payout(pool.get_ref()).await {
        Ok(total) => Ok(HttpResponse::Ok().json(json!({ "total_paid_net": total }))),
        Err(e) => Ok(super::ledger_error_response(e)),
    }
}

/// Sum of all tax withheld
#[utoipa::path(
    get,
    path = "/api/dashboard/total-tax",
    responses((status = 200, description = "Total tax collected")),
    tag = "Dashboard",
    security(("bearer_auth" = []))
)]
pub async fn total_tax(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
) -> actix_web::Result<impl Responder> {
    auth.require_employer()?;

    match report::total_tax_collected(pool.get_ref()).await {
        Ok(total) => Ok(HttpResponse::Ok().json(json!({ "total_tax_collected": total }))),
        Err(e) => Ok(super::ledger_error_response(e)),
    }
}

/// Count of employees with an active stream
#[utoipa::path(
    get,
    path = "/api/dashboard/active-streams",
    responses((status = 200, description = "Active stream count")),
    tag = "Dashboard",
    security(("bearer_auth" = []))
)]
pub async fn active_streams(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
) -> actix_web::Result<impl Responder> {
    auth.require_employer()?;

    match report::active_streams(pool.get_ref()).await {
        Ok(count) => Ok(HttpResponse::Ok().json(json!({ "active_streams": count }))),
        Err(e) => Ok(super::ledger_error_response(e)),
    }
}

/// Employees ranked by total net received
#[utoipa::path(
    get,
    path = "/api/dashboard/top-earners",
    responses((status = 200, description = "Ranked earners", body = [Earner])),
    tag = "Dashboard",
    security(("bearer_auth" = []))
)]
pub async fn top_earners(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
) -> actix_web::Result<impl Responder> {
    auth.require_employer()?;

    match report::top_earners(pool.get_ref()).await {
        Ok(earners) => Ok(HttpResponse::Ok().json(earners)),
        Err(e) => Ok(super::ledger_error_response(e)),
    }
}

/// Net and tax grouped by calendar month, ascending
#[utoipa::path(
    get,
    path = "/api/dashboard/monthly-summary",
    responses((status = 200, description = "Monthly rollup", body = [MonthlySummary])),
    tag = "Dashboard",
    security(("bearer_auth" = []))
)]
pub async fn monthly_summary(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
) -> actix_web::Result<impl Responder> {
    auth.require_employer()?;

    match report::monthly_summary(pool.get_ref()).await {
        Ok(months) => Ok(HttpResponse::Ok().json(months)),
        Err(e) => Ok(super::ledger_error_response(e)),
    }
}
