//! Product service: resolve the owning store, evaluate policy, then mutate.

use std::sync::Arc;

use chrono::Utc;
use service_core::error::AppError;
use uuid::Uuid;

use crate::dtos::product::{CreateProductRequest, ProductRequest};
use crate::models::{Product, ProductResponse, UserRole};

use super::metrics;
use super::ownership::OwnershipResolver;
use super::policy::{Actor, Denial, Operation, PolicyService, Resource};
use super::repository::DeliveryRepository;

#[derive(Clone)]
pub struct ProductService {
    repository: Arc<dyn DeliveryRepository>,
    resolver: OwnershipResolver,
}

impl ProductService {
    pub fn new(repository: Arc<dyn DeliveryRepository>) -> Self {
        let resolver = OwnershipResolver::new(repository.clone());
        Self {
            repository,
            resolver,
        }
    }

    fn deny(actor: &Actor, operation: Operation, denial: Denial) -> AppError {
        metrics::record_denial(Resource::Product, operation);
        tracing::warn!(
            username = %actor.username,
            role = %actor.role,
            operation = operation.as_str(),
            "Product mutation denied"
        );
        AppError::Forbidden(anyhow::anyhow!(denial.reason))
    }

    /// Register a product under the request's store.
    ///
    /// A CUSTOMER is rejected on role alone, before any store lookup, so a
    /// nonexistent store still yields the forbidden outcome for them. For
    /// every other role the store must exist.
    pub async fn create_product(
        &self,
        actor: &Actor,
        request: CreateProductRequest,
    ) -> Result<Uuid, AppError> {
        let owner = if actor.role == UserRole::Customer {
            None
        } else {
            Some(self.resolver.store_owner(request.store_id).await?)
        };
        PolicyService::evaluate(
            actor,
            Resource::Product,
            Operation::Create,
            owner.as_deref(),
        )
        .map_err(|d| Self::deny(actor, Operation::Create, d))?;

        let product = Product::new(
            request.store_id,
            request.name,
            request.price,
            request.description,
        );
        let product_id = product.product_id;
        self.repository.insert_product(&product).await?;

        tracing::info!(%product_id, store_id = %request.store_id, "Product created");
        Ok(product_id)
    }

    pub async fn update_product(
        &self,
        actor: &Actor,
        product_id: Uuid,
        request: ProductRequest,
    ) -> Result<Uuid, AppError> {
        let owner = self.resolver.product_owner(product_id).await?;
        PolicyService::evaluate(actor, Resource::Product, Operation::Update, Some(&owner))
            .map_err(|d| Self::deny(actor, Operation::Update, d))?;

        self.repository
            .update_product(
                product_id,
                &request.name,
                request.price,
                request.description.as_deref(),
            )
            .await?;
        Ok(product_id)
    }

    /// Soft delete: stamps the deletion timestamp and the deleting actor.
    pub async fn delete_product(&self, actor: &Actor, product_id: Uuid) -> Result<Uuid, AppError> {
        let owner = self.resolver.product_owner(product_id).await?;
        PolicyService::evaluate(actor, Resource::Product, Operation::Delete, Some(&owner))
            .map_err(|d| Self::deny(actor, Operation::Delete, d))?;

        self.repository
            .soft_delete_product(product_id, &actor.username, Utc::now())
            .await?;

        tracing::info!(%product_id, deleted_by = %actor.username, "Product soft-deleted");
        Ok(product_id)
    }

    pub async fn products_of_store(
        &self,
        store_id: Uuid,
    ) -> Result<Vec<ProductResponse>, AppError> {
        let products = self.repository.products_of_store(store_id).await?;
        Ok(products.into_iter().map(Into::into).collect())
    }
}
