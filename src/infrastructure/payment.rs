use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::Utc;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::Order;
use crate::domain::payment::{PaymentRequest, PaymentResult, PaymentStatus};
use crate::domain::ports::PaymentGateway;

/// Gateway stand-in that answers every authorization with a fixed status.
#[derive(Debug)]
pub struct ScriptedPaymentGateway {
    status: PaymentStatus,
    calls: AtomicUsize,
}

impl ScriptedPaymentGateway {
    pub fn new(status: PaymentStatus) -> Self {
        Self {
            status,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn approving() -> Self {
        Self::new(PaymentStatus::Success)
    }

    pub fn declining() -> Self {
        Self::new(PaymentStatus::Failed)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PaymentGateway for ScriptedPaymentGateway {
    fn authorize(
        &self,
        order: &Order,
        request: &PaymentRequest,
    ) -> Result<PaymentResult, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        log::debug!(
            "authorizing {} via {:?} for member {} at store {}",
            request.amount,
            request.method,
            order.member_id,
            order.store_id
        );

        Ok(PaymentResult {
            payment_id: Uuid::new_v4(),
            status: self.status,
            amount: request.amount.clone(),
            method: request.method,
            processed_at: Utc::now(),
        })
    }
}
