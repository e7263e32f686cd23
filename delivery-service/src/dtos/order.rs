use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrderRequest {
    #[validate(length(min = 1), nested)]
    pub items: Vec<OrderLineItem>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct OrderLineItem {
    pub product_id: Uuid,
    #[validate(range(min = 1))]
    pub quantity: i32,
}

/// Identifier envelope returned by order creation.
#[derive(Debug, Serialize)]
pub struct OrderIdResponse {
    pub order_id: Uuid,
}
