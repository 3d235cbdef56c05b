use actix_web::{web, HttpResponse, Responder};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::SqlitePool;
use tracing::error;
use utoipa::ToSchema;

use crate::auth::auth::AuthUser;
use crate::ledger::{money, tax};
use crate::model::tax_slab::TaxSlab;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct CompanyTaxSettings {
    #[schema(value_type = String, example = "10.00")]
    pub default_tax_rate: Decimal,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateTaxSlab {
    #[schema(value_type = String, example = "0.00")]
    pub min_income: Decimal,
    #[schema(value_type = Option<String>, example = "50000.00")]
    pub max_income: Option<Decimal>,
    #[schema(value_type = String, example = "15.00")]
    pub tax_rate: Decimal,
}

#[derive(Serialize, ToSchema)]
pub struct TaxSlabResponse {
    pub id: i64,
    #[schema(value_type = String, example = "0.00")]
    pub min_income: Decimal,
    #[schema(value_type = Option<String>, example = "50000.00")]
    pub max_income: Option<Decimal>,
    #[schema(value_type = String, example = "15.00")]
    pub tax_rate: Decimal,
}

impl TaxSlabResponse {
    fn from_row(s: TaxSlab) -> Self {
        Self {
            id: s.id,
            min_income: money::from_cents(s.min_income_cents),
            max_income: s.max_income_cents.map(money::from_cents),
            tax_rate: money::rate_from_basis_points(s.rate_bp),
        }
    }
}

/// Company default withholding rate (created lazily at 10.00)
#[utoipa::path(
    get,
    path = "/api/settings/company-tax",
    responses((status = 200, description = "Default rate", body = CompanyTaxSettings)),
    tag = "Settings",
    security(("bearer_auth" = []))
)]
pub async fn get_company_tax(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
) -> actix_web::Result<impl Responder> {
    auth.require_employer()?;

    match tax::company_default_rate_bp(pool.get_ref()).await {
        Ok(rate_bp) => Ok(HttpResponse::Ok().json(CompanyTaxSettings {
            default_tax_rate: money::rate_from_basis_points(rate_bp),
        })),
        Err(e) => Ok(super::ledger_error_response(e)),
    }
}

/// Update the company default withholding rate
#[utoipa::path(
    post,
    path = "/api/settings/company-tax",
    request_body = CompanyTaxSettings,
    responses(
        (status = 200, description = "Updated rate", body = CompanyTaxSettings),
        (status = 400, description = "Rate out of range")
    ),
    tag = "Settings",
    security(("bearer_auth" = []))
)]
pub async fn update_company_tax(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    payload: web::Json<CompanyTaxSettings>,
) -> actix_web::Result<impl Responder> {
    auth.require_employer()?;

    match tax::set_company_default_rate(pool.get_ref(), payload.default_tax_rate).await {
        Ok(rate_bp) => Ok(HttpResponse::Ok().json(CompanyTaxSettings {
            default_tax_rate: money::rate_from_basis_points(rate_bp),
        })),
        Err(e) => Ok(super::ledger_error_response(e)),
    }
}

/// List progressive tax brackets (data shape only; unused by payroll)
#[utoipa::path(
    get,
    path = "/api/settings/tax-slabs",
    responses((status = 200, description = "Tax slabs", body = [TaxSlabResponse])),
    tag = "Settings",
    security(("bearer_auth" = []))
)]
pub async fn list_tax_slabs(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
) -> actix_web::Result<impl Responder> {
    auth.require_employer()?;

    let rows = sqlx::query_as::<_, TaxSlab>(
        "SELECT id, min_income_cents, max_income_cents, rate_bp FROM tax_slabs ORDER BY min_income_cents",
    )
    .fetch_all(pool.get_ref())
    .await;

    match rows {
        Ok(rows) => {
            let out: Vec<TaxSlabResponse> =
                rows.into_iter().map(TaxSlabResponse::from_row).collect();
            Ok(HttpResponse::Ok().json(out))
        }
        Err(e) => {
            error!(error = %e, "Failed to fetch tax slabs");
            Ok(HttpResponse::InternalServerError().json(json!({
                "message": "Internal Server Error"
            })))
        }
    }
}

/// Create a tax bracket
#[utoipa::path(
    post,
    path = "/api/settings/tax-slabs",
    request_body = CreateTaxSlab,
    responses(
        (status = 200, description = "Created slab", body = TaxSlabResponse),
        (status = 400, description = "Malformed amounts or rate")
    ),
    tag = "Settings",
    security(("bearer_auth" = []))
)]
pub async fn create_tax_slab(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateTaxSlab>,
) -> actix_web::Result<impl Responder> {
    auth.require_employer()?;

    let min_income_cents = match money::to_cents(payload.min_income) {
        Ok(v) => v,
        Err(e) => return Ok(super::ledger_error_response(e)),
    };
    let max_income_cents = match payload.max_income.map(money::to_cents).transpose() {
        Ok(v) => v,
        Err(e) => return Ok(super::ledger_error_response(e)),
    };
    let rate_bp = match money::rate_to_basis_points(payload.tax_rate) {
        Ok(v) => v,
        Err(e) => return Ok(super::ledger_error_response(e)),
    };

    let result = sqlx::query(
        "INSERT INTO tax_slabs (min_income_cents, max_income_cents, rate_bp) VALUES (?, ?, ?)",
    )
    .bind(min_income_cents)
    .bind(max_income_cents)
    .bind(rate_bp)
    .execute(pool.get_ref())
    .await;

    match result {
        Ok(r) => Ok(HttpResponse::Ok().json(TaxSlabResponse {
            id: r.last_insert_rowid(),
            min_income: payload.min_income,
            max_income: payload.max_income,
            tax_rate: payload.tax_rate,
        })),
        Err(e) => {
            error!(error = %e, "Failed to create tax slab");
            Ok(HttpResponse::InternalServerError().json(json!({
                "message": "Internal Server Error"
            })))
        }
    }
}

/// Delete a tax bracket
#[utoipa::path(
    delete,
    path = "/api/settings/tax-slabs/{slab_id}",
    params(("slab_id", description = "Tax slab ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Tax slab not found")
    ),
    tag = "Settings",
    security(("bearer_auth" = []))
)]
pub async fn delete_tax_slab(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    auth.require_employer()?;

    let result = sqlx::query("DELETE FROM tax_slabs WHERE id = ?")
        .bind(path.into_inner())
        .execute(pool.get_ref())
        .await;

    match result {
        Ok(r) if r.rows_affected() == 0 => Ok(HttpResponse::NotFound().json(json!({
            "message": "Tax slab not found"
        }))),
        Ok(_) => Ok(HttpResponse::Ok().json(json!({ "message": "Deleted" }))),
        Err(e) => {
            error!(error = %e, "Failed to delete tax slab");
            Ok(HttpResponse::InternalServerError().json(json!({
                "message": "Internal Server Error"
            })))
        }
    }
}
