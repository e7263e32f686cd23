use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Payment initiation payload.
#[derive(Debug, Deserialize, Validate)]
pub struct PayRequest {
    pub order_id: Uuid,
    #[validate(length(min = 1, max = 100))]
    pub item_name: String,
}

/// Returned by the ready step; the client follows the redirect URL and comes
/// back with a `pg_token`.
#[derive(Debug, Serialize)]
pub struct PayReadyResponse {
    pub tid: String,
    pub next_redirect_pc_url: String,
    pub created_at: String,
}

/// Query parameters of the gateway success redirect.
#[derive(Debug, Deserialize)]
pub struct PaySuccessQuery {
    pub pg_token: String,
    pub tid: String,
}

#[derive(Debug, Serialize)]
pub struct PayApproveResponse {
    pub aid: String,
    pub tid: String,
    pub order_id: Uuid,
    pub total_amount: i64,
    pub approved_at: String,
}
