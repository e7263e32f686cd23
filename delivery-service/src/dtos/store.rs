use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Create/update payload for a store.
#[derive(Debug, Deserialize, Validate)]
pub struct StoreRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 20))]
    pub phone: String,
    /// Category names; missing ones are created.
    #[serde(default)]
    pub categories: Vec<String>,
}

/// Identifier envelope returned by store mutations.
#[derive(Debug, Serialize)]
pub struct StoreIdResponse {
    pub store_id: Uuid,
}

/// Single-store detail, including its category names.
#[derive(Debug, Serialize)]
pub struct StoreDetailResponse {
    #[serde(flatten)]
    pub store: crate::models::StoreResponse,
    pub categories: Vec<String>,
}
