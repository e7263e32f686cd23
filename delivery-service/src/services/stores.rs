//! Store service: resolve ownership, evaluate policy, then mutate.
//!
//! Every mutation checks the policy before the repository is touched; a
//! denial maps to `Forbidden` carrying the policy's reason string.

use std::sync::Arc;

use chrono::Utc;
use service_core::error::AppError;
use uuid::Uuid;

use crate::dtos::store::{StoreDetailResponse, StoreRequest};
use crate::models::{Store, StoreResponse};

use super::metrics;
use super::ownership::OwnershipResolver;
use super::policy::{Actor, Denial, Operation, PolicyService, Resource};
use super::repository::DeliveryRepository;

#[derive(Clone)]
pub struct StoreService {
    repository: Arc<dyn DeliveryRepository>,
    resolver: OwnershipResolver,
}

impl StoreService {
    pub fn new(repository: Arc<dyn DeliveryRepository>) -> Self {
        let resolver = OwnershipResolver::new(repository.clone());
        Self {
            repository,
            resolver,
        }
    }

    fn deny(actor: &Actor, operation: Operation, denial: Denial) -> AppError {
        metrics::record_denial(Resource::Store, operation);
        tracing::warn!(
            username = %actor.username,
            role = %actor.role,
            operation = operation.as_str(),
            "Store mutation denied"
        );
        AppError::Forbidden(anyhow::anyhow!(denial.reason))
    }

    /// Register a store owned by the actor, with its category rows.
    pub async fn create_store(
        &self,
        actor: &Actor,
        request: StoreRequest,
    ) -> Result<Uuid, AppError> {
        PolicyService::evaluate(actor, Resource::Store, Operation::Create, None)
            .map_err(|d| Self::deny(actor, Operation::Create, d))?;

        let store = Store::new(actor.username.clone(), request.name, request.phone);
        let store_id = store.store_id;
        self.repository
            .insert_store(&store, &request.categories)
            .await?;

        tracing::info!(%store_id, owner = %actor.username, "Store created");
        Ok(store_id)
    }

    pub async fn update_store(
        &self,
        actor: &Actor,
        store_id: Uuid,
        request: StoreRequest,
    ) -> Result<Uuid, AppError> {
        let owner = self.resolver.store_owner(store_id).await?;
        PolicyService::evaluate(actor, Resource::Store, Operation::Update, Some(&owner))
            .map_err(|d| Self::deny(actor, Operation::Update, d))?;

        self.repository
            .update_store(store_id, &request.name, &request.phone)
            .await?;
        Ok(store_id)
    }

    /// Soft delete: stamps the deletion timestamp and the deleting actor.
    pub async fn delete_store(&self, actor: &Actor, store_id: Uuid) -> Result<Uuid, AppError> {
        let owner = self.resolver.store_owner(store_id).await?;
        PolicyService::evaluate(actor, Resource::Store, Operation::Delete, Some(&owner))
            .map_err(|d| Self::deny(actor, Operation::Delete, d))?;

        self.repository
            .soft_delete_store(store_id, &actor.username, Utc::now())
            .await?;

        tracing::info!(%store_id, deleted_by = %actor.username, "Store soft-deleted");
        Ok(store_id)
    }

    pub async fn get_store(&self, store_id: Uuid) -> Result<StoreDetailResponse, AppError> {
        let store = self
            .repository
            .find_store(store_id)
            .await?
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("store {} not found", store_id)))?;
        let categories = self.repository.categories_of_store(store_id).await?;
        Ok(StoreDetailResponse {
            store: store.into(),
            categories,
        })
    }

    pub async fn list_stores(&self) -> Result<Vec<StoreResponse>, AppError> {
        let stores = self.repository.list_stores().await?;
        Ok(stores.into_iter().map(Into::into).collect())
    }

    pub async fn stores_of_owner(&self, actor: &Actor) -> Result<Vec<StoreResponse>, AppError> {
        let stores = self.repository.stores_of_owner(&actor.username).await?;
        Ok(stores.into_iter().map(Into::into).collect())
    }
}
