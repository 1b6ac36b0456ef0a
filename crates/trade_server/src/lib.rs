//! JSON HTTP API for the trade toolkit
//!
//! Exposes scenario pricing, route lookup, currency conversion, rate
//! forecasting, the trade assistant and risk reports over axum.

pub mod error;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use routes::{build_router, AppState};
pub use server::Server;

/// Server version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
