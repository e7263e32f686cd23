//! Store model - stores, categories, and the join rows linking them.
//!
//! A store belongs to exactly one owning user at creation and ownership is
//! never transferred. Deleting a store is a soft delete: the row is stamped
//! with a deletion timestamp and the deleting actor, never removed.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Store entity.
#[derive(Debug, Clone, FromRow)]
pub struct Store {
    pub store_id: Uuid,
    pub owner_username: String,
    pub name: String,
    pub phone: String,
    pub created_utc: DateTime<Utc>,
    pub deleted_utc: Option<DateTime<Utc>>,
    pub deleted_by: Option<String>,
}

impl Store {
    /// Create a new store owned by `owner_username`.
    pub fn new(owner_username: String, name: String, phone: String) -> Self {
        Self {
            store_id: Uuid::new_v4(),
            owner_username,
            name,
            phone,
            created_utc: Utc::now(),
            deleted_utc: None,
            deleted_by: None,
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_utc.is_some()
    }

    /// Stamp the soft-delete markers.
    pub fn mark_deleted(&mut self, deleted_by: String, deleted_utc: DateTime<Utc>) {
        self.deleted_utc = Some(deleted_utc);
        self.deleted_by = Some(deleted_by);
    }
}

/// Food category, linked to stores through `store_categories`.
#[derive(Debug, Clone, FromRow)]
pub struct Category {
    pub category_id: Uuid,
    pub name: String,
}

impl Category {
    pub fn new(name: String) -> Self {
        Self {
            category_id: Uuid::new_v4(),
            name,
        }
    }
}

/// Store response for API.
#[derive(Debug, Clone, Serialize)]
pub struct StoreResponse {
    pub store_id: Uuid,
    pub owner_username: String,
    pub name: String,
    pub phone: String,
    pub created_utc: DateTime<Utc>,
}

impl From<Store> for StoreResponse {
    fn from(s: Store) -> Self {
        Self {
            store_id: s.store_id,
            owner_username: s.owner_username,
            name: s.name,
            phone: s.phone,
            created_utc: s.created_utc,
        }
    }
}
