//! Ownership resolution for stores and products.
//!
//! Answers "who owns the store behind this resource" ahead of a policy
//! decision. Missing identifiers surface as [`AppError::NotFound`], never as
//! a panic or a silent default.

use std::sync::Arc;

use service_core::error::AppError;
use uuid::Uuid;

use super::repository::DeliveryRepository;

#[derive(Clone)]
pub struct OwnershipResolver {
    repository: Arc<dyn DeliveryRepository>,
}

impl OwnershipResolver {
    pub fn new(repository: Arc<dyn DeliveryRepository>) -> Self {
        Self { repository }
    }

    /// Username of the user owning `store_id`.
    pub async fn store_owner(&self, store_id: Uuid) -> Result<String, AppError> {
        let store = self
            .repository
            .find_store(store_id)
            .await?
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("store {} not found", store_id)))?;
        Ok(store.owner_username)
    }

    /// Store id owning `product_id`.
    pub async fn product_store(&self, product_id: Uuid) -> Result<Uuid, AppError> {
        self.repository
            .store_id_of_product(product_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(anyhow::anyhow!("product {} not found", product_id))
            })
    }

    /// Username of the user owning the store behind `product_id`.
    pub async fn product_owner(&self, product_id: Uuid) -> Result<String, AppError> {
        let store_id = self.product_store(product_id).await?;
        self.store_owner(store_id).await
    }
}
