//! Payment handlers for the gateway ready/approve handshake.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use service_core::error::AppError;

use crate::dtos::pay::{PayApproveResponse, PayReadyResponse, PayRequest, PaySuccessQuery};
use crate::services::Actor;
use crate::utils::validation::ValidatedJson;
use crate::AppState;

pub async fn ready_to_pay(
    State(state): State<AppState>,
    actor: Actor,
    ValidatedJson(request): ValidatedJson<PayRequest>,
) -> Result<(StatusCode, Json<PayReadyResponse>), AppError> {
    let response = state.pay.ready_to_pay(&actor, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn after_pay(
    State(state): State<AppState>,
    actor: Actor,
    Query(query): Query<PaySuccessQuery>,
) -> Result<(StatusCode, Json<PayApproveResponse>), AppError> {
    tracing::info!(tid = %query.tid, "Payment approval callback");
    let response = state
        .pay
        .approve_pay(&actor, &query.pg_token, &query.tid)
        .await?;
    Ok((StatusCode::OK, Json(response)))
}
