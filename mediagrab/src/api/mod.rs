//! HTTP API: server setup, routes, wire models, and error mapping.

pub mod error;
pub mod models;
pub mod routes;
pub mod server;
