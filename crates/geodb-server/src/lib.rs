//! geodb-server
//! ============
//!
//! Read-only JSON/HTTP lookup service over the `geodb-core` dataset.
//! The binary wires [`config::ServerConfig`] and logging around
//! [`web::WebServer`]; tests drive [`web::router`] directly.

pub mod config;
pub mod web;
