//! Pay service: orchestrates the gateway ready/approve handshake around the
//! persisted payment state.

use std::sync::Arc;

use chrono::Utc;
use service_core::error::AppError;

use crate::dtos::pay::{PayApproveResponse, PayReadyResponse, PayRequest};
use crate::models::{Payment, PaymentStatus, UserRole};

use super::kakaopay::KakaoPayClient;
use super::metrics;
use super::policy::Actor;
use super::repository::DeliveryRepository;

#[derive(Clone)]
pub struct PayService {
    repository: Arc<dyn DeliveryRepository>,
    gateway: KakaoPayClient,
}

impl PayService {
    pub fn new(repository: Arc<dyn DeliveryRepository>, gateway: KakaoPayClient) -> Self {
        Self {
            repository,
            gateway,
        }
    }

    // Payments are a customer flow; staff and owners settle differently.
    fn require_customer(actor: &Actor) -> Result<(), AppError> {
        if actor.role != UserRole::Customer {
            return Err(AppError::Forbidden(anyhow::anyhow!(
                "only CUSTOMER accounts can make payments"
            )));
        }
        Ok(())
    }

    /// Start the payment for one of the actor's orders. Persists a `ready`
    /// payment keyed by the gateway `tid`.
    pub async fn ready_to_pay(
        &self,
        actor: &Actor,
        request: PayRequest,
    ) -> Result<PayReadyResponse, AppError> {
        Self::require_customer(actor)?;

        let order = self
            .repository
            .find_order(request.order_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(anyhow::anyhow!("order {} not found", request.order_id))
            })?;

        if order.username != actor.username {
            return Err(AppError::Forbidden(anyhow::anyhow!(
                "only the ordering user may pay for this order"
            )));
        }

        if let Some(existing) = self.repository.find_payment_by_order(order.order_id).await? {
            if existing.is_approved() {
                return Err(AppError::Conflict(anyhow::anyhow!(
                    "order {} is already paid",
                    order.order_id
                )));
            }
        }

        let item_count = self.repository.order_items(order.order_id).await?.len();
        let ready = self
            .gateway
            .ready(
                order.order_id,
                &actor.username,
                &request.item_name,
                item_count.max(1) as u32,
                order.final_pay,
            )
            .await
            .map_err(|e| AppError::BadGateway(e.to_string()))?;

        let payment = Payment::ready(
            ready.tid.clone(),
            order.order_id,
            actor.username.clone(),
            order.final_pay,
        );
        self.repository.insert_payment(&payment).await?;
        metrics::record_payment(PaymentStatus::Ready.as_str());

        Ok(PayReadyResponse {
            tid: ready.tid,
            next_redirect_pc_url: ready.next_redirect_pc_url,
            created_at: ready.created_at,
        })
    }

    /// Approve the payment identified by `tid` using the `pg_token` the user
    /// came back with.
    pub async fn approve_pay(
        &self,
        actor: &Actor,
        pg_token: &str,
        tid: &str,
    ) -> Result<PayApproveResponse, AppError> {
        Self::require_customer(actor)?;

        let payment = self
            .repository
            .find_payment(tid)
            .await?
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("payment {} not found", tid)))?;

        if payment.username != actor.username {
            return Err(AppError::Forbidden(anyhow::anyhow!(
                "only the paying user may approve this payment"
            )));
        }

        if payment.is_approved() {
            return Err(AppError::Conflict(anyhow::anyhow!(
                "payment {} is already approved",
                tid
            )));
        }

        let approve = self
            .gateway
            .approve(tid, payment.order_id, &actor.username, pg_token)
            .await
            .map_err(|e| AppError::BadGateway(e.to_string()))?;

        self.repository
            .approve_payment(tid, &approve.aid, Utc::now())
            .await?;
        metrics::record_payment(PaymentStatus::Approved.as_str());

        Ok(PayApproveResponse {
            aid: approve.aid,
            tid: approve.tid,
            order_id: payment.order_id,
            total_amount: approve.amount.total,
            approved_at: approve.approved_at,
        })
    }
}
