//! In-memory repository for hermetic tests.
//!
//! Mirrors the Postgres implementation's read semantics: finds and listings
//! skip soft-deleted rows, soft deletes only stamp markers.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use service_core::error::AppError;
use uuid::Uuid;

use crate::models::{Category, Order, OrderProduct, Payment, PaymentStatus, Product, Store, User};

use super::repository::DeliveryRepository;

#[derive(Default)]
pub struct InMemoryRepository {
    users: Mutex<HashMap<String, User>>,
    stores: Mutex<HashMap<Uuid, Store>>,
    categories: Mutex<HashMap<String, Category>>,
    store_categories: Mutex<Vec<(Uuid, Uuid)>>,
    products: Mutex<HashMap<Uuid, Product>>,
    orders: Mutex<HashMap<Uuid, Order>>,
    order_items: Mutex<Vec<OrderProduct>>,
    payments: Mutex<HashMap<String, Payment>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a store directly, bypassing the service layer. Test setup only.
    pub fn seed_store(&self, store: Store) {
        self.stores.lock().unwrap().insert(store.store_id, store);
    }

    /// Insert a product directly, bypassing the service layer. Test setup only.
    pub fn seed_product(&self, product: Product) {
        self.products
            .lock()
            .unwrap()
            .insert(product.product_id, product);
    }
}

#[async_trait]
impl DeliveryRepository for InMemoryRepository {
    async fn find_user(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.lock().unwrap().get(username).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn insert_user(&self, user: &User) -> Result<(), AppError> {
        self.users
            .lock()
            .unwrap()
            .insert(user.username.clone(), user.clone());
        Ok(())
    }

    async fn find_store(&self, store_id: Uuid) -> Result<Option<Store>, AppError> {
        Ok(self
            .stores
            .lock()
            .unwrap()
            .get(&store_id)
            .filter(|s| !s.is_deleted())
            .cloned())
    }

    async fn list_stores(&self) -> Result<Vec<Store>, AppError> {
        let mut stores: Vec<Store> = self
            .stores
            .lock()
            .unwrap()
            .values()
            .filter(|s| !s.is_deleted())
            .cloned()
            .collect();
        stores.sort_by_key(|s| s.created_utc);
        Ok(stores)
    }

    async fn stores_of_owner(&self, username: &str) -> Result<Vec<Store>, AppError> {
        let mut stores: Vec<Store> = self
            .stores
            .lock()
            .unwrap()
            .values()
            .filter(|s| !s.is_deleted() && s.owner_username == username)
            .cloned()
            .collect();
        stores.sort_by_key(|s| s.created_utc);
        Ok(stores)
    }

    async fn insert_store(&self, store: &Store, categories: &[String]) -> Result<(), AppError> {
        let mut category_ids = Vec::new();
        {
            let mut known = self.categories.lock().unwrap();
            for name in categories {
                let category = known
                    .entry(name.clone())
                    .or_insert_with(|| Category::new(name.clone()));
                category_ids.push(category.category_id);
            }
        }
        self.stores
            .lock()
            .unwrap()
            .insert(store.store_id, store.clone());
        let mut joins = self.store_categories.lock().unwrap();
        for category_id in category_ids {
            joins.push((store.store_id, category_id));
        }
        Ok(())
    }

    async fn update_store(
        &self,
        store_id: Uuid,
        name: &str,
        phone: &str,
    ) -> Result<(), AppError> {
        if let Some(store) = self.stores.lock().unwrap().get_mut(&store_id) {
            store.name = name.to_string();
            store.phone = phone.to_string();
        }
        Ok(())
    }

    async fn soft_delete_store(
        &self,
        store_id: Uuid,
        deleted_by: &str,
        deleted_utc: DateTime<Utc>,
    ) -> Result<(), AppError> {
        if let Some(store) = self.stores.lock().unwrap().get_mut(&store_id) {
            store.mark_deleted(deleted_by.to_string(), deleted_utc);
        }
        Ok(())
    }

    async fn categories_of_store(&self, store_id: Uuid) -> Result<Vec<String>, AppError> {
        let joins = self.store_categories.lock().unwrap();
        let categories = self.categories.lock().unwrap();
        let names = joins
            .iter()
            .filter(|(sid, _)| *sid == store_id)
            .filter_map(|(_, cid)| {
                categories
                    .values()
                    .find(|c| c.category_id == *cid)
                    .map(|c| c.name.clone())
            })
            .collect();
        Ok(names)
    }

    async fn find_product(&self, product_id: Uuid) -> Result<Option<Product>, AppError> {
        Ok(self
            .products
            .lock()
            .unwrap()
            .get(&product_id)
            .filter(|p| !p.is_deleted())
            .cloned())
    }

    async fn products_of_store(&self, store_id: Uuid) -> Result<Vec<Product>, AppError> {
        let mut products: Vec<Product> = self
            .products
            .lock()
            .unwrap()
            .values()
            .filter(|p| !p.is_deleted() && p.store_id == store_id)
            .cloned()
            .collect();
        products.sort_by_key(|p| p.created_utc);
        Ok(products)
    }

    async fn store_id_of_product(&self, product_id: Uuid) -> Result<Option<Uuid>, AppError> {
        Ok(self
            .products
            .lock()
            .unwrap()
            .get(&product_id)
            .filter(|p| !p.is_deleted())
            .map(|p| p.store_id))
    }

    async fn insert_product(&self, product: &Product) -> Result<(), AppError> {
        self.products
            .lock()
            .unwrap()
            .insert(product.product_id, product.clone());
        Ok(())
    }

    async fn update_product(
        &self,
        product_id: Uuid,
        name: &str,
        price: i64,
        description: Option<&str>,
    ) -> Result<(), AppError> {
        if let Some(product) = self.products.lock().unwrap().get_mut(&product_id) {
            product.name = name.to_string();
            product.price = price;
            product.description = description.map(|d| d.to_string());
        }
        Ok(())
    }

    async fn soft_delete_product(
        &self,
        product_id: Uuid,
        deleted_by: &str,
        deleted_utc: DateTime<Utc>,
    ) -> Result<(), AppError> {
        if let Some(product) = self.products.lock().unwrap().get_mut(&product_id) {
            product.mark_deleted(deleted_by.to_string(), deleted_utc);
        }
        Ok(())
    }

    async fn insert_order(&self, order: &Order, items: &[OrderProduct]) -> Result<(), AppError> {
        self.orders
            .lock()
            .unwrap()
            .insert(order.order_id, order.clone());
        self.order_items.lock().unwrap().extend_from_slice(items);
        Ok(())
    }

    async fn find_order(&self, order_id: Uuid) -> Result<Option<Order>, AppError> {
        Ok(self.orders.lock().unwrap().get(&order_id).cloned())
    }

    async fn order_items(&self, order_id: Uuid) -> Result<Vec<OrderProduct>, AppError> {
        Ok(self
            .order_items
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.order_id == order_id)
            .cloned()
            .collect())
    }

    async fn insert_payment(&self, payment: &Payment) -> Result<(), AppError> {
        self.payments
            .lock()
            .unwrap()
            .insert(payment.tid.clone(), payment.clone());
        Ok(())
    }

    async fn find_payment(&self, tid: &str) -> Result<Option<Payment>, AppError> {
        Ok(self.payments.lock().unwrap().get(tid).cloned())
    }

    async fn find_payment_by_order(&self, order_id: Uuid) -> Result<Option<Payment>, AppError> {
        Ok(self
            .payments
            .lock()
            .unwrap()
            .values()
            .find(|p| p.order_id == order_id)
            .cloned())
    }

    async fn approve_payment(
        &self,
        tid: &str,
        aid: &str,
        approved_utc: DateTime<Utc>,
    ) -> Result<(), AppError> {
        if let Some(payment) = self.payments.lock().unwrap().get_mut(tid) {
            payment.status_code = PaymentStatus::Approved.as_str().to_string();
            payment.aid = Some(aid.to_string());
            payment.approved_utc = Some(approved_utc);
        }
        Ok(())
    }
}
