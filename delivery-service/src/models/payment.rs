//! Payment model - gateway transactions keyed by the gateway `tid`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Payment status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Ready,
    Approved,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Ready => "ready",
            PaymentStatus::Approved => "approved",
        }
    }
}

/// Payment entity. Created in `ready` state when the gateway handshake
/// starts; flipped to `approved` once the gateway confirms.
#[derive(Debug, Clone, FromRow)]
pub struct Payment {
    pub tid: String,
    pub order_id: Uuid,
    pub username: String,
    pub status_code: String,
    pub amount: i64,
    pub created_utc: DateTime<Utc>,
    pub approved_utc: Option<DateTime<Utc>>,
    pub aid: Option<String>,
}

impl Payment {
    pub fn ready(tid: String, order_id: Uuid, username: String, amount: i64) -> Self {
        Self {
            tid,
            order_id,
            username,
            status_code: PaymentStatus::Ready.as_str().to_string(),
            amount,
            created_utc: Utc::now(),
            approved_utc: None,
            aid: None,
        }
    }

    pub fn is_approved(&self) -> bool {
        self.status_code == PaymentStatus::Approved.as_str()
    }
}
