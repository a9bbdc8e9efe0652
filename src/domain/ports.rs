use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::errors::DomainError;
use super::member::{Item, Member, MemberId, Store};
use super::order::Order;
use super::payment::{PaymentRequest, PaymentResult};

pub trait MemberLookup: Send + Sync {
    fn find_member(&self, id: MemberId) -> Result<Option<Member>, DomainError>;
}

pub trait StoreLookup: Send + Sync {
    fn find_store(&self, id: Uuid) -> Result<Option<Store>, DomainError>;
}

pub trait ItemLookup: Send + Sync {
    fn find_item(&self, id: Uuid) -> Result<Option<Item>, DomainError>;
}

pub trait OrderRepository: Send + Sync {
    /// Inserts or replaces the order. An order without an id gets one here.
    fn save(&self, order: Order) -> Result<Order, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError>;
    fn find_by_member(&self, member_id: MemberId) -> Result<Vec<Order>, DomainError>;
    fn find_by_store(&self, store_id: Uuid) -> Result<Vec<Order>, DomainError>;
    /// Orders of `member_id` whose store name and any line's product name
    /// match the given filters. `None` means no constraint.
    fn search(
        &self,
        member_id: MemberId,
        store_name: Option<&str>,
        product_name: Option<&str>,
    ) -> Result<Vec<Order>, DomainError>;
}

/// Every record lookup the workflow needs, behind one bound.
pub trait Repositories: MemberLookup + StoreLookup + ItemLookup + OrderRepository {}

impl<T> Repositories for T where T: MemberLookup + StoreLookup + ItemLookup + OrderRepository {}

/// External payment provider. One synchronous call per order creation.
pub trait PaymentGateway: Send + Sync {
    fn authorize(
        &self,
        order: &Order,
        request: &PaymentRequest,
    ) -> Result<PaymentResult, DomainError>;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
