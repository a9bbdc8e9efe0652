use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::member::MemberId;
use crate::domain::order::Order;
use crate::domain::ports::Repositories;
use crate::domain::views::{OrderDetail, OrderSummary};

use super::access::{authorize, authorize_store, Operation};

/// Read side of the workflow.
pub struct OrderQuery<'a, R> {
    repos: &'a R,
}

impl<'a, R: Repositories> OrderQuery<'a, R> {
    pub fn new(repos: &'a R) -> Self {
        Self { repos }
    }

    pub fn get_detail(
        &self,
        order_id: Uuid,
        member_id: MemberId,
    ) -> Result<OrderDetail, DomainError> {
        let order = self
            .repos
            .find_by_id(order_id)?
            .ok_or(DomainError::OrderNotFound(order_id))?;
        let member = self
            .repos
            .find_member(member_id)?
            .ok_or(DomainError::MemberNotFound(member_id))?;
        let store = self
            .repos
            .find_store(order.store_id)?
            .ok_or(DomainError::StoreNotFound(order.store_id))?;

        authorize(&order, &store, &member, Operation::Read)?;
        OrderDetail::new(&order, &store)
    }

    /// The caller is expected to have established that it is `member_id`.
    pub fn get_by_member(&self, member_id: MemberId) -> Result<Vec<OrderSummary>, DomainError> {
        log::debug!("listing orders of member {}", member_id);
        summarize(self.repos.find_by_member(member_id)?)
    }

    pub fn get_by_store(
        &self,
        store_id: Uuid,
        member_id: MemberId,
    ) -> Result<Vec<OrderSummary>, DomainError> {
        let store = self
            .repos
            .find_store(store_id)?
            .ok_or(DomainError::StoreNotFound(store_id))?;

        authorize_store(&store, member_id)?;
        summarize(self.repos.find_by_store(store.id)?)
    }

    /// Blank filters are treated as absent.
    pub fn search(
        &self,
        member_id: MemberId,
        store_name: Option<&str>,
        product_name: Option<&str>,
    ) -> Result<Vec<OrderSummary>, DomainError> {
        let store_name = store_name.map(str::trim).filter(|s| !s.is_empty());
        let product_name = product_name.map(str::trim).filter(|s| !s.is_empty());
        log::debug!(
            "searching orders of member {} (store: {:?}, product: {:?})",
            member_id,
            store_name,
            product_name
        );

        summarize(self.repos.search(member_id, store_name, product_name)?)
    }
}

fn summarize(orders: Vec<Order>) -> Result<Vec<OrderSummary>, DomainError> {
    orders.iter().map(OrderSummary::try_from).collect()
}
