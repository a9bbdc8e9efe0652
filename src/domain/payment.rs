use std::fmt;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::member::MemberId;
use super::order::PaymentMethod;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Success,
    Failed,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Success => "SUCCESS",
            PaymentStatus::Failed => "FAILED",
        };
        f.write_str(s)
    }
}

/// What the gateway is asked to charge for an unsaved order.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentRequest {
    pub member_id: MemberId,
    pub amount: BigDecimal,
    pub method: PaymentMethod,
}

/// Gateway answer for one authorization call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentResult {
    pub payment_id: Uuid,
    pub status: PaymentStatus,
    pub amount: BigDecimal,
    pub method: PaymentMethod,
    pub processed_at: DateTime<Utc>,
}

impl PaymentResult {
    pub fn is_success(&self) -> bool {
        self.status == PaymentStatus::Success
    }

    pub fn into_payment(self) -> Payment {
        Payment {
            id: self.payment_id,
            status: self.status,
            amount: self.amount,
            method: self.method,
            processed_at: self.processed_at,
        }
    }
}

/// Payment record linked to exactly one order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub status: PaymentStatus,
    pub amount: BigDecimal,
    pub method: PaymentMethod,
    pub processed_at: DateTime<Utc>,
}
