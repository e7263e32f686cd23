//! Product model.
//!
//! A product belongs to exactly one store; its effective owner is the store's
//! owning user. There is no product-level ownership column.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Product entity. Prices are whole KRW, no subunit.
#[derive(Debug, Clone, FromRow)]
pub struct Product {
    pub product_id: Uuid,
    pub store_id: Uuid,
    pub name: String,
    pub price: i64,
    pub description: Option<String>,
    pub created_utc: DateTime<Utc>,
    pub deleted_utc: Option<DateTime<Utc>>,
    pub deleted_by: Option<String>,
}

impl Product {
    pub fn new(store_id: Uuid, name: String, price: i64, description: Option<String>) -> Self {
        Self {
            product_id: Uuid::new_v4(),
            store_id,
            name,
            price,
            description,
            created_utc: Utc::now(),
            deleted_utc: None,
            deleted_by: None,
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_utc.is_some()
    }

    pub fn mark_deleted(&mut self, deleted_by: String, deleted_utc: DateTime<Utc>) {
        self.deleted_utc = Some(deleted_utc);
        self.deleted_by = Some(deleted_by);
    }
}

/// Product response for API.
#[derive(Debug, Clone, Serialize)]
pub struct ProductResponse {
    pub product_id: Uuid,
    pub store_id: Uuid,
    pub name: String,
    pub price: i64,
    pub description: Option<String>,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        Self {
            product_id: p.product_id,
            store_id: p.store_id,
            name: p.name,
            price: p.price,
            description: p.description,
        }
    }
}
