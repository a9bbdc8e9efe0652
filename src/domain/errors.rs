use thiserror::Error;
use uuid::Uuid;

use super::member::MemberId;
use super::payment::PaymentStatus;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Member Not Found: {0}")]
    MemberNotFound(MemberId),
    #[error("Store Not Found: {0}")]
    StoreNotFound(Uuid),
    #[error("Item Not Found: {0}")]
    ItemNotFound(Uuid),
    #[error("Item {item_id} is not sold by store {store_id}")]
    ItemNotInStore { item_id: Uuid, store_id: Uuid },
    #[error("Order Not Found: {0}")]
    OrderNotFound(Uuid),
    #[error("Payment Failed: gateway returned {0}")]
    PaymentFailed(PaymentStatus),
    #[error("Access Denied")]
    AccessDenied,
    #[error("Order Time Out: order {0} can no longer be changed")]
    OrderTimeOut(Uuid),
    #[error("Order Already Cancelled: {0}")]
    AlreadyCancelled(Uuid),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Stable client-facing error code.
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::MemberNotFound(_) => "M-001",
            DomainError::StoreNotFound(_) => "S-001",
            DomainError::ItemNotFound(_) => "I-001",
            DomainError::ItemNotInStore { .. } => "I-002",
            DomainError::OrderNotFound(_) => "O-001",
            DomainError::OrderTimeOut(_) => "O-002",
            DomainError::AlreadyCancelled(_) => "O-003",
            DomainError::PaymentFailed(_) => "P-001",
            DomainError::AccessDenied => "A-001",
            DomainError::InvalidInput(_) => "V-001",
            DomainError::Internal(_) => "D-001",
        }
    }
}
