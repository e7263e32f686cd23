//! Kakao Pay gateway client.
//!
//! Implements the ready/approve handshake of Kakao Pay's one-time payment
//! API. Requests are form-encoded and authenticated with the admin key.

use anyhow::{anyhow, Result};
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::KakaoPayConfig;

/// Kakao Pay client for the payment-ready / payment-approve handshake.
#[derive(Clone)]
pub struct KakaoPayClient {
    client: Client,
    config: KakaoPayConfig,
}

#[derive(Debug, Serialize)]
struct ReadyRequest<'a> {
    cid: &'a str,
    partner_order_id: String,
    partner_user_id: &'a str,
    item_name: &'a str,
    quantity: u32,
    total_amount: i64,
    tax_free_amount: i64,
    approval_url: &'a str,
    cancel_url: &'a str,
    fail_url: &'a str,
}

/// Response from the payment-ready call.
#[derive(Debug, Clone, Deserialize)]
pub struct KakaoPayReadyResponse {
    /// Gateway transaction id; key for the approve call.
    pub tid: String,
    /// Redirect URL the client opens to authorize the payment.
    pub next_redirect_pc_url: String,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
struct ApproveRequest<'a> {
    cid: &'a str,
    tid: &'a str,
    partner_order_id: String,
    partner_user_id: &'a str,
    pg_token: &'a str,
}

/// Response from the payment-approve call.
#[derive(Debug, Clone, Deserialize)]
pub struct KakaoPayApproveResponse {
    /// Gateway approval id.
    pub aid: String,
    pub tid: String,
    pub amount: KakaoPayAmount,
    pub approved_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KakaoPayAmount {
    pub total: i64,
    #[serde(default)]
    pub tax_free: i64,
}

/// Gateway error payload.
#[derive(Debug, Deserialize)]
struct KakaoPayError {
    code: i64,
    msg: String,
}

impl KakaoPayClient {
    pub fn new(config: KakaoPayConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn auth_header(&self) -> String {
        format!("KakaoAK {}", self.config.admin_key.expose_secret())
    }

    /// Start a payment: register the order with the gateway and get back a
    /// `tid` plus the redirect URL for user authorization.
    pub async fn ready(
        &self,
        order_id: Uuid,
        username: &str,
        item_name: &str,
        quantity: u32,
        total_amount: i64,
    ) -> Result<KakaoPayReadyResponse> {
        let request = ReadyRequest {
            cid: &self.config.cid,
            partner_order_id: order_id.to_string(),
            partner_user_id: username,
            item_name,
            quantity,
            total_amount,
            tax_free_amount: 0,
            approval_url: &self.config.approval_url,
            cancel_url: &self.config.cancel_url,
            fail_url: &self.config.fail_url,
        };

        let url = format!("{}/v1/payment/ready", self.config.api_base_url);
        let response = self
            .client
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, self.auth_header())
            .form(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        tracing::debug!(status = %status, body = %body, "Kakao Pay ready response");

        if status.is_success() {
            let ready: KakaoPayReadyResponse = serde_json::from_str(&body)?;
            tracing::info!(tid = %ready.tid, %order_id, "Kakao Pay transaction ready");
            Ok(ready)
        } else {
            Err(Self::gateway_error("ready", &body))
        }
    }

    /// Complete a payment after the user authorized it and came back with a
    /// `pg_token`.
    pub async fn approve(
        &self,
        tid: &str,
        order_id: Uuid,
        username: &str,
        pg_token: &str,
    ) -> Result<KakaoPayApproveResponse> {
        let request = ApproveRequest {
            cid: &self.config.cid,
            tid,
            partner_order_id: order_id.to_string(),
            partner_user_id: username,
            pg_token,
        };

        let url = format!("{}/v1/payment/approve", self.config.api_base_url);
        let response = self
            .client
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, self.auth_header())
            .form(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        tracing::debug!(status = %status, body = %body, "Kakao Pay approve response");

        if status.is_success() {
            let approve: KakaoPayApproveResponse = serde_json::from_str(&body)?;
            tracing::info!(tid = %approve.tid, aid = %approve.aid, "Kakao Pay transaction approved");
            Ok(approve)
        } else {
            Err(Self::gateway_error("approve", &body))
        }
    }

    fn gateway_error(step: &str, body: &str) -> anyhow::Error {
        match serde_json::from_str::<KakaoPayError>(body) {
            Ok(err) => {
                tracing::error!(code = err.code, msg = %err.msg, "Kakao Pay {} failed", step);
                anyhow!("Kakao Pay error {}: {}", err.code, err.msg)
            }
            Err(_) => anyhow!("Kakao Pay {} failed: {}", step, body),
        }
    }
}
