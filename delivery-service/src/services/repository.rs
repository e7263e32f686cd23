//! Persistence collaborator trait.
//!
//! Every find returns `Option`: "not found" is a value, not an error, and the
//! callers decide how to surface it. Soft deletes stamp the deleting actor
//! and timestamp; nothing is ever removed.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use service_core::error::AppError;
use uuid::Uuid;

use crate::models::{Order, OrderProduct, Payment, Product, Store, User};

#[async_trait]
pub trait DeliveryRepository: Send + Sync {
    // Users
    async fn find_user(&self, username: &str) -> Result<Option<User>, AppError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn insert_user(&self, user: &User) -> Result<(), AppError>;

    // Stores. Reads exclude soft-deleted rows.
    async fn find_store(&self, store_id: Uuid) -> Result<Option<Store>, AppError>;
    async fn list_stores(&self) -> Result<Vec<Store>, AppError>;
    async fn stores_of_owner(&self, username: &str) -> Result<Vec<Store>, AppError>;
    /// Insert the store and its category join rows in one transaction.
    /// Categories are created by name when missing.
    async fn insert_store(&self, store: &Store, categories: &[String]) -> Result<(), AppError>;
    async fn update_store(&self, store_id: Uuid, name: &str, phone: &str)
        -> Result<(), AppError>;
    async fn soft_delete_store(
        &self,
        store_id: Uuid,
        deleted_by: &str,
        deleted_utc: DateTime<Utc>,
    ) -> Result<(), AppError>;
    async fn categories_of_store(&self, store_id: Uuid) -> Result<Vec<String>, AppError>;

    // Products. Reads exclude soft-deleted rows.
    async fn find_product(&self, product_id: Uuid) -> Result<Option<Product>, AppError>;
    async fn products_of_store(&self, store_id: Uuid) -> Result<Vec<Product>, AppError>;
    async fn store_id_of_product(&self, product_id: Uuid) -> Result<Option<Uuid>, AppError>;
    async fn insert_product(&self, product: &Product) -> Result<(), AppError>;
    async fn update_product(
        &self,
        product_id: Uuid,
        name: &str,
        price: i64,
        description: Option<&str>,
    ) -> Result<(), AppError>;
    async fn soft_delete_product(
        &self,
        product_id: Uuid,
        deleted_by: &str,
        deleted_utc: DateTime<Utc>,
    ) -> Result<(), AppError>;

    // Orders
    /// Insert the order and its line items in one transaction.
    async fn insert_order(&self, order: &Order, items: &[OrderProduct]) -> Result<(), AppError>;
    async fn find_order(&self, order_id: Uuid) -> Result<Option<Order>, AppError>;
    async fn order_items(&self, order_id: Uuid) -> Result<Vec<OrderProduct>, AppError>;

    // Payments
    async fn insert_payment(&self, payment: &Payment) -> Result<(), AppError>;
    async fn find_payment(&self, tid: &str) -> Result<Option<Payment>, AppError>;
    async fn find_payment_by_order(&self, order_id: Uuid) -> Result<Option<Payment>, AppError>;
    async fn approve_payment(
        &self,
        tid: &str,
        aid: &str,
        approved_utc: DateTime<Utc>,
    ) -> Result<(), AppError>;
}
