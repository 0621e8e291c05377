//! HTTP handlers.

pub mod check;

/// `GET /health`
pub async fn health() -> &'static str { "ok" }
