//! HTTP boundary for Tallybook.
//!
//! # Responsibility
//! - Translate REST requests into core service calls and serialize results.
//! - Map `ServiceError` onto client/server error responses.
//! - Own process configuration for the server binary.

pub mod config;
pub mod http;
pub mod routes;
pub mod state;

pub use config::Config;
pub use http::HttpServer;
pub use state::AppState;
