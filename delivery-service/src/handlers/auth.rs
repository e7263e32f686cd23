//! Registration and login handlers.

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use service_core::error::AppError;

use crate::dtos::auth::{LoginRequest, SignupRequest};
use crate::services::TokenResponse;
use crate::utils::validation::ValidatedJson;
use crate::AppState;

pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SignupRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let username = state.auth.signup(request).await?;
    Ok((StatusCode::CREATED, Json(json!({ "username": username }))))
}

pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<(StatusCode, Json<TokenResponse>), AppError> {
    let tokens = state.auth.login(request).await?;
    Ok((StatusCode::OK, Json(tokens)))
}
