use std::collections::HashSet;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::DomainError;
use super::member::{Item, MemberId};
use super::payment::Payment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    Online,
    Offline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Card,
    Cash,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Created,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub city: String,
    pub street: String,
    pub zipcode: String,
}

// ── Requests ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct OrderLineRequest {
    pub item_id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderRequest {
    pub store_id: Uuid,
    pub order_type: OrderType,
    pub payment_method: PaymentMethod,
    pub delivery_address: Address,
    #[serde(default)]
    pub store_request: Option<String>,
    pub lines: Vec<OrderLineRequest>,
}

/// Partial update; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateOrderRequest {
    #[serde(default)]
    pub delivery_address: Option<Address>,
    /// A blank string clears the request text.
    #[serde(default)]
    pub store_request: Option<String>,
    /// Replaces the whole line list when present.
    #[serde(default)]
    pub lines: Option<Vec<OrderLineRequest>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CancelOrderRequest {
    #[serde(default)]
    pub reason: Option<String>,
}

/// Rejects an empty line list, non-positive quantities and repeated items.
pub fn validate_lines(lines: &[OrderLineRequest]) -> Result<(), DomainError> {
    if lines.is_empty() {
        return Err(DomainError::InvalidInput(
            "an order needs at least one line".to_string(),
        ));
    }

    let mut seen = HashSet::with_capacity(lines.len());
    for line in lines {
        if line.quantity <= 0 {
            return Err(DomainError::InvalidInput(format!(
                "quantity for item {} must be positive, got {}",
                line.item_id, line.quantity
            )));
        }
        if !seen.insert(line.item_id) {
            return Err(DomainError::InvalidInput(format!(
                "item {} appears more than once",
                line.item_id
            )));
        }
    }
    Ok(())
}

pub(crate) fn normalize_text(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}

// ── Aggregate ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub item_id: Uuid,
    pub item_name: String,
    pub quantity: i32,
    /// Price copied from the catalog when the line was first priced.
    pub unit_price: BigDecimal,
}

impl OrderLine {
    pub fn snapshot(item: &Item, quantity: i32) -> Self {
        Self {
            item_id: item.id,
            item_name: item.name.clone(),
            quantity,
            unit_price: item.price.clone(),
        }
    }

    pub fn line_total(&self) -> BigDecimal {
        &self.unit_price * &BigDecimal::from(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Assigned by the repository on first save.
    pub id: Option<Uuid>,
    pub member_id: MemberId,
    pub store_id: Uuid,
    pub order_type: OrderType,
    pub payment_method: PaymentMethod,
    pub delivery_address: Address,
    pub store_request: Option<String>,
    pub lines: Vec<OrderLine>,
    pub status: OrderStatus,
    pub payment: Option<Payment>,
    pub cancel_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Builds an unsaved order from already priced lines.
    pub fn new(
        member_id: MemberId,
        request: &CreateOrderRequest,
        lines: Vec<OrderLine>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            member_id,
            store_id: request.store_id,
            order_type: request.order_type,
            payment_method: request.payment_method,
            delivery_address: request.delivery_address.clone(),
            store_request: normalize_text(request.store_request.clone()),
            lines,
            status: OrderStatus::Created,
            payment: None,
            cancel_reason: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn persisted_id(&self) -> Result<Uuid, DomainError> {
        self.id
            .ok_or_else(|| DomainError::Internal("order has not been persisted".to_string()))
    }

    pub fn total(&self) -> BigDecimal {
        self.lines
            .iter()
            .fold(BigDecimal::from(0), |acc, line| acc + line.line_total())
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == OrderStatus::Cancelled
    }

    pub fn line_for(&self, item_id: Uuid) -> Option<&OrderLine> {
        self.lines.iter().find(|l| l.item_id == item_id)
    }

    pub fn attach_payment(&mut self, payment: Payment) {
        self.payment = Some(payment);
    }

    /// `lines` must already be priced.
    pub fn apply_update(
        &mut self,
        delivery_address: Option<Address>,
        store_request: Option<String>,
        lines: Option<Vec<OrderLine>>,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        self.ensure_open()?;

        if let Some(address) = delivery_address {
            self.delivery_address = address;
        }
        if store_request.is_some() {
            self.store_request = normalize_text(store_request);
        }
        if let Some(lines) = lines {
            self.lines = lines;
        }
        self.updated_at = now;
        Ok(())
    }

    pub fn cancel(&mut self, reason: Option<String>, now: DateTime<Utc>) -> Result<(), DomainError> {
        self.ensure_open()?;

        self.status = OrderStatus::Cancelled;
        self.cancel_reason = normalize_text(reason);
        self.updated_at = now;
        Ok(())
    }

    /// Fails once the order has been cancelled.
    pub fn ensure_open(&self) -> Result<(), DomainError> {
        if self.is_cancelled() {
            let id = self.persisted_id()?;
            return Err(DomainError::AlreadyCancelled(id));
        }
        Ok(())
    }
}
