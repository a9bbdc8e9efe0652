use uuid::Uuid;

use crate::config::WorkflowConfig;
use crate::domain::errors::DomainError;
use crate::domain::member::MemberId;
use crate::domain::order::{
    validate_lines, CancelOrderRequest, CreateOrderRequest, Order, UpdateOrderRequest,
};
use crate::domain::ports::{Clock, PaymentGateway, Repositories, SystemClock};
use crate::domain::views::{OrderDetail, OrderResponse, OrderSummary};

use super::access::{authorize, Operation};
use super::factory::{price_lines, OrderFactory};
use super::query::OrderQuery;
use super::window::MutationWindow;

/// Entry point for every order operation. The acting member is always passed
/// in by the caller; nothing here establishes identity.
///
/// The workflow does not guard against two concurrent mutations of the same
/// order. Rejecting the losing write (for example with versioned saves) is
/// required of the storage layer; the in-memory adapter is last writer wins.
pub struct OrderWorkflow<R, P, C = SystemClock> {
    repos: R,
    payments: P,
    clock: C,
    window: MutationWindow,
}

impl<R, P> OrderWorkflow<R, P, SystemClock>
where
    R: Repositories,
    P: PaymentGateway,
{
    pub fn new(repos: R, payments: P) -> Self {
        Self::with_clock(repos, payments, SystemClock)
    }
}

impl<R, P, C> OrderWorkflow<R, P, C>
where
    R: Repositories,
    P: PaymentGateway,
    C: Clock,
{
    pub fn with_clock(repos: R, payments: P, clock: C) -> Self {
        Self {
            repos,
            payments,
            clock,
            window: MutationWindow::default(),
        }
    }

    pub fn with_config(mut self, config: &WorkflowConfig) -> Self {
        self.window = config.mutation_window();
        self
    }

    pub fn repos(&self) -> &R {
        &self.repos
    }

    pub fn payments(&self) -> &P {
        &self.payments
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn create_order(
        &self,
        request: &CreateOrderRequest,
        member_id: MemberId,
    ) -> Result<OrderResponse, DomainError> {
        let order = OrderFactory::new(&self.repos, &self.payments, &self.clock)
            .create(request, member_id)?;
        OrderResponse::try_from(&order)
    }

    /// Updates never re-run payment, even when lines change.
    pub fn update_order(
        &self,
        order_id: Uuid,
        request: UpdateOrderRequest,
        member_id: MemberId,
    ) -> Result<OrderResponse, DomainError> {
        let mut order = self.load_for_mutation(order_id, member_id, Operation::Update)?;

        let lines = match &request.lines {
            Some(requested) => {
                validate_lines(requested)?;
                Some(price_lines(&self.repos, order.store_id, requested, Some(&order))?)
            }
            None => None,
        };
        order.apply_update(
            request.delivery_address,
            request.store_request,
            lines,
            self.clock.now(),
        )?;

        let saved = self.repos.save(order)?;
        log::info!("member {} updated order {}", member_id, order_id);
        OrderResponse::try_from(&saved)
    }

    pub fn cancel_order(
        &self,
        order_id: Uuid,
        request: CancelOrderRequest,
        member_id: MemberId,
    ) -> Result<OrderResponse, DomainError> {
        let mut order = self.load_for_mutation(order_id, member_id, Operation::Cancel)?;
        order.cancel(request.reason, self.clock.now())?;

        let saved = self.repos.save(order)?;
        log::info!("member {} cancelled order {}", member_id, order_id);
        OrderResponse::try_from(&saved)
    }

    pub fn get_order_detail(
        &self,
        order_id: Uuid,
        member_id: MemberId,
    ) -> Result<OrderDetail, DomainError> {
        OrderQuery::new(&self.repos).get_detail(order_id, member_id)
    }

    pub fn get_orders_for_member(
        &self,
        member_id: MemberId,
    ) -> Result<Vec<OrderSummary>, DomainError> {
        OrderQuery::new(&self.repos).get_by_member(member_id)
    }

    pub fn get_orders_for_store(
        &self,
        store_id: Uuid,
        member_id: MemberId,
    ) -> Result<Vec<OrderSummary>, DomainError> {
        OrderQuery::new(&self.repos).get_by_store(store_id, member_id)
    }

    pub fn search_orders(
        &self,
        member_id: MemberId,
        store_name: Option<&str>,
        product_name: Option<&str>,
    ) -> Result<Vec<OrderSummary>, DomainError> {
        OrderQuery::new(&self.repos).search(member_id, store_name, product_name)
    }

    // Order, member and store lookups, then access, window and terminal-state
    // checks, in that order.
    fn load_for_mutation(
        &self,
        order_id: Uuid,
        member_id: MemberId,
        operation: Operation,
    ) -> Result<Order, DomainError> {
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

        authorize(&order, &store, &member, operation)?;
        self.window.check_window(&order, self.clock.now())?;
        order.ensure_open()?;
        Ok(order)
    }
}
