//! Order handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use service_core::error::AppError;
use uuid::Uuid;

use crate::dtos::order::{CreateOrderRequest, OrderIdResponse};
use crate::models::OrderResponse;
use crate::services::Actor;
use crate::utils::validation::ValidatedJson;
use crate::AppState;

pub async fn create_order(
    State(state): State<AppState>,
    actor: Actor,
    ValidatedJson(request): ValidatedJson<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderIdResponse>), AppError> {
    let order_id = state.orders.create_order(&actor, request).await?;
    Ok((StatusCode::CREATED, Json(OrderIdResponse { order_id })))
}

pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
    actor: Actor,
) -> Result<(StatusCode, Json<OrderResponse>), AppError> {
    let order = state.orders.get_order(&actor, order_id).await?;
    Ok((StatusCode::OK, Json(order)))
}
