//! StreamPay library crate.
//!
//! Exposes the payroll ledger core (`ledger`) and the HTTP surface around it
//! as reusable modules; the binary in `main.rs` only wires configuration,
//! logging and the server together.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod docs;
pub mod ledger;
pub mod model;
pub mod models;
pub mod routes;
