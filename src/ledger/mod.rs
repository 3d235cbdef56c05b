//! Treasury accounting core: balance mutations, tax withholding, payroll
//! orchestration and reporting rollups. Nothing in here touches HTTP types;
//! handlers pass validated input in and map [`error::LedgerError`] out.

pub mod employee;
pub mod error;
pub mod money;
pub mod payroll;
pub mod report;
pub mod stream;
pub mod tax;
pub mod treasury;
