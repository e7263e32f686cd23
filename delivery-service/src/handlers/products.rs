//! Product handlers.
//!
//! Update responds 201 Created; the original API always has, and clients
//! depend on it.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use service_core::error::AppError;
use uuid::Uuid;

use crate::dtos::product::{
    CreateProductRequest, ProductIdResponse, ProductRequest, ProductsQuery,
};
use crate::models::ProductResponse;
use crate::services::Actor;
use crate::utils::validation::ValidatedJson;
use crate::AppState;

pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductsQuery>,
) -> Result<(StatusCode, Json<Vec<ProductResponse>>), AppError> {
    let products = state.products.products_of_store(query.store_id).await?;
    Ok((StatusCode::OK, Json(products)))
}

pub async fn create_product(
    State(state): State<AppState>,
    actor: Actor,
    ValidatedJson(request): ValidatedJson<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductIdResponse>), AppError> {
    let product_id = state.products.create_product(&actor, request).await?;
    Ok((StatusCode::CREATED, Json(ProductIdResponse { product_id })))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
    actor: Actor,
    ValidatedJson(request): ValidatedJson<ProductRequest>,
) -> Result<(StatusCode, Json<ProductIdResponse>), AppError> {
    let product_id = state
        .products
        .update_product(&actor, product_id, request)
        .await?;
    Ok((StatusCode::CREATED, Json(ProductIdResponse { product_id })))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
    actor: Actor,
) -> Result<(StatusCode, Json<ProductIdResponse>), AppError> {
    let product_id = state.products.delete_product(&actor, product_id).await?;
    Ok((StatusCode::OK, Json(ProductIdResponse { product_id })))
}
