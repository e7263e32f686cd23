//! Order service: build an order from product line items.

use std::sync::Arc;

use service_core::error::AppError;
use uuid::Uuid;

use crate::dtos::order::CreateOrderRequest;
use crate::models::{Order, OrderProduct, OrderResponse};

use super::policy::Actor;
use super::repository::DeliveryRepository;

#[derive(Clone)]
pub struct OrderService {
    repository: Arc<dyn DeliveryRepository>,
}

impl OrderService {
    pub fn new(repository: Arc<dyn DeliveryRepository>) -> Self {
        Self { repository }
    }

    /// Create an order for the actor. Unit prices are snapshotted from the
    /// current product rows; the final pay is their quantity-weighted sum.
    /// Discounts default to zero for user-placed orders.
    pub async fn create_order(
        &self,
        actor: &Actor,
        request: CreateOrderRequest,
    ) -> Result<Uuid, AppError> {
        let mut order = Order::from_user(actor.username.clone());
        let mut items = Vec::with_capacity(request.items.len());
        let mut total: i64 = 0;

        for line in &request.items {
            let product = self
                .repository
                .find_product(line.product_id)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(anyhow::anyhow!("product {} not found", line.product_id))
                })?;
            total += product.price * i64::from(line.quantity);
            items.push(OrderProduct {
                order_id: order.order_id,
                product_id: product.product_id,
                quantity: line.quantity,
                unit_price: product.price,
            });
        }

        order.update_final_pay(total);
        self.repository.insert_order(&order, &items).await?;

        tracing::info!(order_id = %order.order_id, username = %actor.username, final_pay = total, "Order created");
        Ok(order.order_id)
    }

    /// Fetch an order. Only the ordering user may read it.
    pub async fn get_order(&self, actor: &Actor, order_id: Uuid) -> Result<OrderResponse, AppError> {
        let order = self
            .repository
            .find_order(order_id)
            .await?
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("order {} not found", order_id)))?;

        if order.username != actor.username {
            return Err(AppError::Forbidden(anyhow::anyhow!(
                "only the ordering user may view this order"
            )));
        }

        let items = self.repository.order_items(order_id).await?;
        Ok(OrderResponse {
            order_id: order.order_id,
            username: order.username,
            final_pay: order.final_pay,
            discount_rate: order.discount_rate,
            discount_amount: order.discount_amount,
            created_utc: order.created_utc,
            items: items.into_iter().map(Into::into).collect(),
        })
    }
}
