//! Request/response DTOs.

pub mod auth;
pub mod order;
pub mod pay;
pub mod product;
pub mod store;

use serde::Serialize;

/// Generic error body used by extractors and middleware.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
