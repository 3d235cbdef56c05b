use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::auth::auth::AuthUser;
use crate::config::Config;

/// CorePayroll ABI subset handed to frontends for wallet integration.
const CORE_PAYROLL_ABI: [&str; 7] = [
    "function getTreasuryBalance() view returns (uint256)",
    "function startStream(address _employee, uint256 _ratePerSecond) external",
    "function stopStream(address _employee) external",
    "function claimableAmount(address _employee) view returns (uint256)",
    "function withdraw() external",
    "function emergencyWithdraw() external",
    "receive() external payable",
];

/// Contract address and ABI for frontend integration. Placeholder only: the
/// server performs no on-chain settlement.
#[utoipa::path(
    get,
    path = "/api/blockchain/config",
    responses((status = 200, description = "Chain integration config")),
    tag = "Blockchain",
    security(("bearer_auth" = []))
)]
pub async fn get_blockchain_config(
    _auth: AuthUser,
    config: web::Data<Config>,
) -> actix_web::Result<impl Responder> {
    Ok(HttpResponse::Ok().json(json!({
        "contract_address": config.contract_address,
        "abi": CORE_PAYROLL_ABI,
        "rpc_url": config.chain_rpc_url,
    })))
}
