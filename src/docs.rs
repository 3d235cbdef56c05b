use crate::api::employee::{
    CreateEmployee, EmployeeResponse, UpdateEmployeeTax, UpdateEmployeeWallet,
};
use crate::api::payroll::{BonusResponse, CreateBonus, CreateTransaction, TransactionResponse};
use crate::api::settings::{CompanyTaxSettings, CreateTaxSlab, TaxSlabResponse};
use crate::api::treasury::{TreasuryAction, TreasuryResponse};
use crate::ledger::report::{Earner, MonthlySummary};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "StreamPay Ledger API",
        version = "1.0.0",
        description = r#"
## StreamPay — payroll ledger backend

Tracks a company treasury, streams salary to employees with tax withholding,
records bonuses and serves aggregated financial reporting.

### 🔹 Key Features
- **Treasury**
  - Deposit, withdraw, and inspect the company balance
- **Payroll**
  - Pay salaries to streaming employees, give bonuses
- **Streaming**
  - Toggle an employee's salary eligibility
- **Dashboard**
  - Payout/tax totals, top earners, monthly summaries

### 🔐 Security
Endpoints under `/api` are protected with **JWT Bearer authentication**.
Ledger mutations require the **Employer** role.

### 📦 Response Format
- JSON-based RESTful responses
- Monetary values are exact decimal strings

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::employee::create_employee,
        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::employee_transactions,
        crate::api::employee::update_employee_tax,
        crate::api::employee::update_employee_wallet,
        crate::api::employee::delete_employee,
        crate::api::employee::my_profile,
        crate::api::employee::my_transactions,

        crate::api::stream::start_stream,
        crate::api::stream::pause_stream,

        crate::api::payroll::create_transaction,
        crate::api::payroll::give_bonus,

        crate::api::treasury::get_treasury,
        crate::api::treasury::deposit_treasury,
        crate::api::treasury::withdraw_treasury,

        crate::api::dashboard::total_payout,
        crate::api::dashboard::total_tax,
        crate::api::dashboard::active_streams,
        crate::api::dashboard::top_earners,
        crate::api::dashboard::monthly_summary,

        crate::api::settings::get_company_tax,
        crate::api::settings::update_company_tax,
        crate::api::settings::list_tax_slabs,
        crate::api::settings::create_tax_slab,
        crate::api::settings::delete_tax_slab,

        crate::api::blockchain::get_blockchain_config,
    ),
    components(
        schemas(
            CreateEmployee,
            EmployeeResponse,
            UpdateEmployeeTax,
            UpdateEmployeeWallet,
            CreateTransaction,
            TransactionResponse,
            CreateBonus,
            BonusResponse,
            TreasuryAction,
            TreasuryResponse,
            CompanyTaxSettings,
            CreateTaxSlab,
            TaxSlabResponse,
            Earner,
            MonthlySummary
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Employee", description = "Employee management APIs"),
        (name = "Stream", description = "Salary streaming eligibility APIs"),
        (name = "Payroll", description = "Salary and bonus payment APIs"),
        (name = "Treasury", description = "Company treasury APIs"),
        (name = "Dashboard", description = "Financial reporting APIs"),
        (name = "Settings", description = "Tax configuration APIs"),
        (name = "Self", description = "Employee self-service APIs"),
        (name = "Blockchain", description = "On-chain integration placeholders"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
