use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use sqlx::SqlitePool;

use crate::auth::auth::AuthUser;
use crate::ledger::stream;

/// Mark an employee as eligible for salary payments
#[utoipa::path(
    post,
    path = "/api/stream/start/{employee_id}",
    params(("employee_id", description = "Employee ID")),
    responses(
        (status = 200, description = "Stream started"),
        (status = 404, description = "Employee not found")
    ),
    tag = "Stream",
    security(("bearer_auth" = []))
)]
pub async fn start_stream(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    auth.require_employer()?;

    let employee_id = path.into_inner();
    match stream::start_stream(pool.get_ref(), employee_id).await {
        Ok(is_streaming) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "employee_id": employee_id,
            "is_streaming": is_streaming,
        }))),
        Err(e) => Ok(super::ledger_error_response(e)),
    }
}

/// Pause an employee's salary eligibility
#[utoipa::path(
    post,
    path = "/api/stream/pause/{employee_id}",
    params(("employee_id", description = "Employee ID")),
    responses(
        (status = 200, description = "Stream paused"),
        (status = 404, description = "Employee not found")
    ),
    tag = "Stream",
    security(("bearer_auth" = []))
)]
pub async fn pause_stream(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    auth.require_employer()?;

    let employee_id = path.into_inner();
    match stream::pause_stream(pool.get_ref(), employee_id).await {
        Ok(is_streaming) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "employee_id": employee_id,
            "is_streaming": is_streaming,
        }))),
        Err(e) => Ok(super::ledger_error_response(e)),
    }
}
