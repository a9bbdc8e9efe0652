use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::errors::DomainError;
use super::member::{MemberId, Store};
use super::order::{Address, Order, OrderLine, OrderStatus, OrderType, PaymentMethod};
use super::payment::{Payment, PaymentStatus};

/// Returned by create, update and cancel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderResponse {
    pub order_id: Uuid,
    pub status: OrderStatus,
    pub total_price: BigDecimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<&Order> for OrderResponse {
    type Error = DomainError;

    fn try_from(order: &Order) -> Result<Self, Self::Error> {
        Ok(Self {
            order_id: order.persisted_id()?,
            status: order.status,
            total_price: order.total(),
            created_at: order.created_at,
            updated_at: order.updated_at,
        })
    }
}

/// One row of a member, store or search listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderSummary {
    pub order_id: Uuid,
    pub member_id: MemberId,
    pub store_id: Uuid,
    pub status: OrderStatus,
    pub total_price: BigDecimal,
    pub item_count: usize,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<&Order> for OrderSummary {
    type Error = DomainError;

    fn try_from(order: &Order) -> Result<Self, Self::Error> {
        Ok(Self {
            order_id: order.persisted_id()?,
            member_id: order.member_id,
            store_id: order.store_id,
            status: order.status,
            total_price: order.total(),
            item_count: order.lines.len(),
            created_at: order.created_at,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreSummary {
    pub store_id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderLineView {
    pub item_id: Uuid,
    pub item_name: String,
    pub quantity: i32,
    pub unit_price: BigDecimal,
    pub line_total: BigDecimal,
}

impl From<&OrderLine> for OrderLineView {
    fn from(line: &OrderLine) -> Self {
        Self {
            item_id: line.item_id,
            item_name: line.item_name.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price.clone(),
            line_total: line.line_total(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentSummary {
    pub payment_id: Uuid,
    pub status: PaymentStatus,
    pub amount: BigDecimal,
    pub method: PaymentMethod,
}

impl From<&Payment> for PaymentSummary {
    fn from(payment: &Payment) -> Self {
        Self {
            payment_id: payment.id,
            status: payment.status,
            amount: payment.amount.clone(),
            method: payment.method,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderDetail {
    pub order_id: Uuid,
    pub member_id: MemberId,
    pub store: StoreSummary,
    pub order_type: OrderType,
    pub status: OrderStatus,
    pub delivery_address: Address,
    pub store_request: Option<String>,
    pub lines: Vec<OrderLineView>,
    pub total_price: BigDecimal,
    pub payment: Option<PaymentSummary>,
    pub cancel_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OrderDetail {
    pub fn new(order: &Order, store: &Store) -> Result<Self, DomainError> {
        Ok(Self {
            order_id: order.persisted_id()?,
            member_id: order.member_id,
            store: StoreSummary {
                store_id: store.id,
                name: store.name.clone(),
            },
            order_type: order.order_type,
            status: order.status,
            delivery_address: order.delivery_address.clone(),
            store_request: order.store_request.clone(),
            lines: order.lines.iter().map(OrderLineView::from).collect(),
            total_price: order.total(),
            payment: order.payment.as_ref().map(PaymentSummary::from),
            cancel_reason: order.cancel_reason.clone(),
            created_at: order.created_at,
            updated_at: order.updated_at,
        })
    }
}
