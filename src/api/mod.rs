pub mod blockchain;
pub mod dashboard;
pub mod employee;
pub mod payroll;
pub mod settings;
pub mod stream;
pub mod treasury;

use actix_web::HttpResponse;
use serde_json::json;
use tracing::error;

use crate::ledger::error::LedgerError;

/// Maps a ledger outcome to its HTTP shape. Domain violations keep their
/// message; storage failures are logged and collapsed to a 500.
pub(crate) fn ledger_error_response(err: LedgerError) -> HttpResponse {
    match err {
        LedgerError::NotFound => HttpResponse::NotFound().json(json!({
            "message": err.to_string()
        })),
        LedgerError::InvalidAmount
        | LedgerError::StreamNotActive
        | LedgerError::InsufficientFunds => HttpResponse::BadRequest().json(json!({
            "message": err.to_string()
        })),
        LedgerError::DuplicateIdentity => HttpResponse::Conflict().json(json!({
            "message": err.to_string()
        })),
        LedgerError::Storage(e) => {
            error!(error = %e, "Storage error");
            HttpResponse::InternalServerError().json(json!({
                "message": "Internal Server Error"
            }))
        }
    }
}
