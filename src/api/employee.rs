use actix_web::{web, HttpResponse, Responder};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::SqlitePool;
use utoipa::ToSchema;

use crate::api::payroll::TransactionResponse;
use crate::auth::auth::AuthUser;
use crate::ledger::{employee, money, report};
use crate::model::employee::Employee;

#[derive(Deserialize, ToSchema)]
pub struct CreateEmployee {
    #[schema(example = "Jane Doe")]
    pub name: String,
    #[schema(example = "jane@company.com", format = "email")]
    pub email: String,
    #[schema(example = "Developer")]
    pub role: String,
}

#[derive(Serialize, ToSchema)]
pub struct EmployeeResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub is_streaming: bool,
    pub use_custom_tax: bool,
    #[schema(value_type = Option<String>, example = "15.00")]
    pub custom_tax_rate: Option<Decimal>,
    pub wallet_address: Option<String>,
    pub transactions: Vec<TransactionResponse>,
}

impl EmployeeResponse {
    pub fn from_row(e: Employee, transactions: Vec<TransactionResponse>) -> Self {
        Self {
            id: e.id,
            name: e.name,
            email: e.email,
            role: e.role,
            is_streaming: e.is_streaming,
            use_custom_tax: e.use_custom_tax,
            custom_tax_rate: e.custom_tax_rate_bp.map(money::rate_from_basis_points),
            wallet_address: e.wallet_address,
            transactions,
        }
    }
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateEmployeeTax {
    pub use_custom_tax: bool,
    #[schema(value_type = Option<String>, example = "20.00")]
    pub custom_tax_rate: Option<Decimal>,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateEmployeeWallet {
    #[schema(example = "0x52908400098527886E0F7030069857D2E4169EE7")]
    pub wallet_address: String,
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = CreateEmployee,
    responses(
        (status = 200, description = "Employee created", body = EmployeeResponse),
        (status = 409, description = "Email already exists"),
    ),
    tag = "Employee",
    security(("bearer_auth" = []))
)]
pub async fn create_employee(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateEmployee>,
) -> actix_web::Result<impl Responder> {
    auth.require_employer()?;

    match employee::create(pool.get_ref(), &payload.name, &payload.email, &payload.role).await {
        Ok(e) => Ok(HttpResponse::Ok().json(EmployeeResponse::from_row(e, Vec::new()))),
        Err(e) => Ok(super::ledger_error_response(e)),
    }
}

/// List Employees
#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "All employees", body = [EmployeeResponse])
    ),
    tag = "Employee",
    security(("bearer_auth" = []))
)]
pub async fn list_employees(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
) -> actix_web::Result<impl Responder> {
    auth.require_employer()?;

    match employee::list(pool.get_ref()).await {
        Ok(rows) => {
            let out: Vec<EmployeeResponse> = rows
                .into_iter()
                .map(|e| EmployeeResponse::from_row(e, Vec::new()))
                .collect();
            Ok(HttpResponse::Ok().json(out))
        }
        Err(e) => Ok(super::ledger_error_response(e)),
    }
}

/// Get Employee by ID (includes its transactions)
#[utoipa::path(
    get,
    path = "/api/employees/{employee_id}",
    params(("employee_id", description = "Employee ID")),
    responses(
        (status = 200, description = "Employee found", body = EmployeeResponse),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee",
    security(("bearer_auth" = []))
)]
pub async fn get_employee(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    auth.require_employer()?;

    let employee_id = path.into_inner();
    let row = match employee::get(pool.get_ref(), employee_id).await {
        Ok(row) => row,
        Err(e) => return Ok(super::ledger_error_response(e)),
    };
    match employee::transactions(pool.get_ref(), employee_id).await {
        Ok(txs) => {
            let txs = txs.into_iter().map(TransactionResponse::from_row).collect();
            Ok(HttpResponse::Ok().json(EmployeeResponse::from_row(row, txs)))
        }
        Err(e) => Ok(super::ledger_error_response(e)),
    }
}

/// List one employee's transactions
#[utoipa::path(
    get,
    path = "/api/employees/{employee_id}/transactions",
    params(("employee_id", description = "Employee ID")),
    responses(
        (status = 200, description = "Transactions", body = [TransactionResponse]),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee",
    security(("bearer_auth" = []))
)]
pub async fn employee_transactions(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    auth.require_employer()?;

    let employee_id = path.into_inner();
    if let Err(e) = employee::get(pool.get_ref(), employee_id).await {
        return Ok(super::ledger_error_response(e));
    }
    match employee::transactions(pool.get_ref(), employee_id).await {
        Ok(txs) => {
            let txs: Vec<TransactionResponse> =
                txs.into_iter().map(TransactionResponse::from_row).collect();
            Ok(HttpResponse::Ok().json(txs))
        }
        Err(e) => Ok(super::ledger_error_response(e)),
    }
}

/// Update the employee's withholding override
#[utoipa::path(
    put,
    path = "/api/employees/{employee_id}/tax",
    params(("employee_id", description = "Employee ID")),
    request_body = UpdateEmployeeTax,
    responses(
        (status = 200, description = "Tax updated"),
        (status = 400, description = "Rate missing or out of range"),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee",
    security(("bearer_auth" = []))
)]
pub async fn update_employee_tax(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    body: web::Json<UpdateEmployeeTax>,
) -> actix_web::Result<impl Responder> {
    auth.require_employer()?;

    match employee::set_tax_override(
        pool.get_ref(),
        path.into_inner(),
        body.use_custom_tax,
        body.custom_tax_rate,
    )
    .await
    {
        Ok(_) => Ok(HttpResponse::Ok().json(json!({ "message": "Tax updated" }))),
        Err(e) => Ok(super::ledger_error_response(e)),
    }
}

/// Set the employee's on-chain wallet address
#[utoipa::path(
    put,
    path = "/api/employees/{employee_id}/wallet",
    params(("employee_id", description = "Employee ID")),
    request_body = UpdateEmployeeWallet,
    responses(
        (status = 200, description = "Wallet updated"),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee",
    security(("bearer_auth" = []))
)]
pub async fn update_employee_wallet(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    body: web::Json<UpdateEmployeeWallet>,
) -> actix_web::Result<impl Responder> {
    auth.require_employer()?;

    match employee::set_wallet(
        pool.get_ref(),
        path.into_inner(),
        Some(body.wallet_address.as_str()),
    )
    .await
    {
        Ok(e) => Ok(HttpResponse::Ok().json(json!({
            "message": "Wallet updated",
            "wallet_address": e.wallet_address
        }))),
        Err(e) => Ok(super::ledger_error_response(e)),
    }
}

/// Delete Employee (cascades to its transactions and bonuses)
#[utoipa::path(
    delete,
    path = "/api/employees/{employee_id}",
    params(("employee_id", description = "Employee ID")),
    responses(
        (status = 200, description = "Successfully deleted"),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee",
    security(("bearer_auth" = []))
)]
pub async fn delete_employee(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    auth.require_employer()?;

    match employee::delete(pool.get_ref(), path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({ "message": "Successfully deleted" }))),
        Err(e) => Ok(super::ledger_error_response(e)),
    }
}

/// Profile of the employee matching the authenticated email
#[utoipa::path(
    get,
    path = "/api/me/profile",
    responses((status = 200, description = "Profile")),
    tag = "Self",
    security(("bearer_auth" = []))
)]
pub async fn my_profile(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
) -> actix_web::Result<impl Responder> {
    let row = match employee::find_by_email(pool.get_ref(), &auth.email).await {
        Ok(row) => row,
        Err(e) => return Ok(super::ledger_error_response(e)),
    };

    let Some(row) = row else {
        return Ok(HttpResponse::Ok().json(json!({
            "email": auth.email,
            "employee": null,
            "total_earned": "0.00",
        })));
    };

    let total_earned = match report::employee_total_net(pool.get_ref(), row.id).await {
        Ok(total) => total,
        Err(e) => return Ok(super::ledger_error_response(e)),
    };

    Ok(HttpResponse::Ok().json(json!({
        "email": auth.email,
        "employee": EmployeeResponse::from_row(row, Vec::new()),
        "total_earned": total_earned,
    })))
}

/// Transactions of the employee matching the authenticated email
#[utoipa::path(
    get,
    path = "/api/me/transactions",
    responses((status = 200, description = "Transactions", body = [TransactionResponse])),
    tag = "Self",
    security(("bearer_auth" = []))
)]
pub async fn my_transactions(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
) -> actix_web::Result<impl Responder> {
    let row = match employee::find_by_email(pool.get_ref(), &auth.email).await {
        Ok(row) => row,
        Err(e) => return Ok(super::ledger_error_response(e)),
    };

    let Some(row) = row else {
        return Ok(HttpResponse::Ok().json(Vec::<TransactionResponse>::new()));
    };

    match employee::transactions(pool.get_ref(), row.id).await {
        Ok(txs) => {
            let txs: Vec<TransactionResponse> =
                txs.into_iter().map(TransactionResponse::from_row).collect();
            Ok(HttpResponse::Ok().json(txs))
        }
        Err(e) => Ok(super::ledger_error_response(e)),
    }
}
