//! Store handlers. Mutations pass the authenticated actor down to the
//! service layer; the policy decision happens there, not here.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use service_core::error::AppError;
use uuid::Uuid;

use crate::dtos::store::{StoreDetailResponse, StoreIdResponse, StoreRequest};
use crate::models::StoreResponse;
use crate::services::Actor;
use crate::utils::validation::ValidatedJson;
use crate::AppState;

pub async fn list_stores(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Vec<StoreResponse>>), AppError> {
    let stores = state.stores.list_stores().await?;
    Ok((StatusCode::OK, Json(stores)))
}

pub async fn get_store(
    State(state): State<AppState>,
    Path(store_id): Path<Uuid>,
) -> Result<(StatusCode, Json<StoreDetailResponse>), AppError> {
    let store = state.stores.get_store(store_id).await?;
    Ok((StatusCode::OK, Json(store)))
}

pub async fn my_stores(
    State(state): State<AppState>,
    actor: Actor,
) -> Result<(StatusCode, Json<Vec<StoreResponse>>), AppError> {
    let stores = state.stores.stores_of_owner(&actor).await?;
    Ok((StatusCode::OK, Json(stores)))
}

pub async fn create_store(
    State(state): State<AppState>,
    actor: Actor,
    ValidatedJson(request): ValidatedJson<StoreRequest>,
) -> Result<(StatusCode, Json<StoreIdResponse>), AppError> {
    let store_id = state.stores.create_store(&actor, request).await?;
    Ok((StatusCode::CREATED, Json(StoreIdResponse { store_id })))
}

pub async fn update_store(
    State(state): State<AppState>,
    Path(store_id): Path<Uuid>,
    actor: Actor,
    ValidatedJson(request): ValidatedJson<StoreRequest>,
) -> Result<(StatusCode, Json<StoreIdResponse>), AppError> {
    let store_id = state.stores.update_store(&actor, store_id, request).await?;
    Ok((StatusCode::OK, Json(StoreIdResponse { store_id })))
}

pub async fn delete_store(
    State(state): State<AppState>,
    Path(store_id): Path<Uuid>,
    actor: Actor,
) -> Result<(StatusCode, Json<StoreIdResponse>), AppError> {
    let store_id = state.stores.delete_store(&actor, store_id).await?;
    Ok((StatusCode::OK, Json(StoreIdResponse { store_id })))
}
