//! Order model - orders and their product line items.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Order entity. Discounts default to zero for user-placed orders.
#[derive(Debug, Clone, FromRow)]
pub struct Order {
    pub order_id: Uuid,
    pub username: String,
    pub final_pay: i64,
    pub discount_rate: i32,
    pub discount_amount: i64,
    pub created_utc: DateTime<Utc>,
}

impl Order {
    /// Create an empty order for a user, with zero totals and discounts.
    pub fn from_user(username: String) -> Self {
        Self {
            order_id: Uuid::new_v4(),
            username,
            final_pay: 0,
            discount_rate: 0,
            discount_amount: 0,
            created_utc: Utc::now(),
        }
    }

    pub fn update_final_pay(&mut self, price: i64) {
        self.final_pay = price;
    }
}

/// Order line item, snapshotting the unit price at order time.
#[derive(Debug, Clone, FromRow)]
pub struct OrderProduct {
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: i64,
}

/// Order response for API.
#[derive(Debug, Clone, Serialize)]
pub struct OrderResponse {
    pub order_id: Uuid,
    pub username: String,
    pub final_pay: i64,
    pub discount_rate: i32,
    pub discount_amount: i64,
    pub created_utc: DateTime<Utc>,
    pub items: Vec<OrderItemResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderItemResponse {
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: i64,
}

impl From<OrderProduct> for OrderItemResponse {
    fn from(i: OrderProduct) -> Self {
        Self {
            product_id: i.product_id,
            quantity: i.quantity,
            unit_price: i.unit_price,
        }
    }
}
