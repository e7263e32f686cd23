use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Creation payload: names the target store.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductRequest {
    pub store_id: Uuid,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(range(min = 0))]
    pub price: i64,
    pub description: Option<String>,
}

/// Update payload: the store binding never changes.
#[derive(Debug, Deserialize, Validate)]
pub struct ProductRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(range(min = 0))]
    pub price: i64,
    pub description: Option<String>,
}

/// Identifier envelope returned by product mutations.
#[derive(Debug, Serialize)]
pub struct ProductIdResponse {
    pub product_id: Uuid,
}

/// Query for listing a store's products.
#[derive(Debug, Deserialize)]
pub struct ProductsQuery {
    pub store_id: Uuid,
}
