use crate::domain::errors::DomainError;
use crate::domain::member::MemberId;
use crate::domain::order::{validate_lines, CreateOrderRequest, Order, OrderLine, OrderLineRequest};
use crate::domain::payment::PaymentRequest;
use crate::domain::ports::{Clock, ItemLookup, PaymentGateway, Repositories};
use uuid::Uuid;

/// Builds, charges and persists new orders.
pub struct OrderFactory<'a, R, P, C> {
    repos: &'a R,
    payments: &'a P,
    clock: &'a C,
}

impl<'a, R, P, C> OrderFactory<'a, R, P, C>
where
    R: Repositories,
    P: PaymentGateway,
    C: Clock,
{
    pub fn new(repos: &'a R, payments: &'a P, clock: &'a C) -> Self {
        Self {
            repos,
            payments,
            clock,
        }
    }

    /// Nothing is written unless the gateway reports success.
    pub fn create(
        &self,
        request: &CreateOrderRequest,
        member_id: MemberId,
    ) -> Result<Order, DomainError> {
        let member = self
            .repos
            .find_member(member_id)?
            .ok_or(DomainError::MemberNotFound(member_id))?;
        let store = self
            .repos
            .find_store(request.store_id)?
            .ok_or(DomainError::StoreNotFound(request.store_id))?;

        validate_lines(&request.lines)?;
        let lines = price_lines(self.repos, store.id, &request.lines, None)?;

        let mut order = Order::new(member.id, request, lines, self.clock.now());
        let payment_request = PaymentRequest {
            member_id: member.id,
            amount: order.total(),
            method: order.payment_method,
        };

        let result = self.payments.authorize(&order, &payment_request)?;
        if !result.is_success() {
            log::warn!(
                "payment of {} for member {} at store {} returned {}",
                payment_request.amount,
                member.id,
                store.id,
                result.status
            );
            return Err(DomainError::PaymentFailed(result.status));
        }
        order.attach_payment(result.into_payment());

        let saved = self.repos.save(order)?;
        log::info!(
            "member {} placed order {:?} at {} for {}",
            member.id,
            saved.id,
            store.name,
            payment_request.amount
        );
        Ok(saved)
    }
}

/// Resolves every requested item and prices the line. Every item must belong
/// to `store_id`. Items already on `existing` keep their frozen unit price;
/// new ones take the catalog price.
pub(crate) fn price_lines<I>(
    items: &I,
    store_id: Uuid,
    requested: &[OrderLineRequest],
    existing: Option<&Order>,
) -> Result<Vec<OrderLine>, DomainError>
where
    I: ItemLookup + ?Sized,
{
    requested
        .iter()
        .map(|line| {
            let item = items
                .find_item(line.item_id)?
                .ok_or(DomainError::ItemNotFound(line.item_id))?;
            if item.store_id != store_id {
                return Err(DomainError::ItemNotInStore {
                    item_id: item.id,
                    store_id,
                });
            }

            match existing.and_then(|order| order.line_for(item.id)) {
                Some(frozen) => Ok(OrderLine {
                    quantity: line.quantity,
                    ..frozen.clone()
                }),
                None => Ok(OrderLine::snapshot(&item, line.quantity)),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use bigdecimal::BigDecimal;
    use uuid::Uuid;

    use super::*;
    use crate::application::testing::Fixture;
    use crate::domain::payment::PaymentStatus;
    use crate::domain::ports::OrderRepository;
    use crate::infrastructure::ScriptedPaymentGateway;

    #[test]
    fn create_prices_lines_and_persists_once() {
        let fx = Fixture::new();
        let gateway = ScriptedPaymentGateway::approving();
        let factory = OrderFactory::new(&fx.repos, &gateway, &fx.clock);

        let order = factory
            .create(&fx.request(&[(fx.coffee.id, 2)]), fx.customer.id)
            .expect("create failed");

        assert!(order.id.is_some());
        assert_eq!(order.total(), BigDecimal::from(2000));
        assert_eq!(order.lines[0].unit_price, BigDecimal::from(1000));
        assert_eq!(order.created_at, fx.clock.now());
        assert_eq!(
            order.payment.as_ref().map(|p| p.status),
            Some(PaymentStatus::Success)
        );
        assert_eq!(fx.repos.save_count(), 1);
        assert_eq!(gateway.calls(), 1);
    }

    #[test]
    fn total_is_sum_over_all_lines() {
        let fx = Fixture::new();
        let gateway = ScriptedPaymentGateway::approving();
        let factory = OrderFactory::new(&fx.repos, &gateway, &fx.clock);

        let order = factory
            .create(
                &fx.request(&[(fx.coffee.id, 3), (fx.cake.id, 2)]),
                fx.customer.id,
            )
            .expect("create failed");

        let expected = order
            .lines
            .iter()
            .fold(BigDecimal::from(0), |acc, l| {
                acc + &l.unit_price * &BigDecimal::from(l.quantity)
            });
        assert_eq!(order.total(), expected);
        assert_eq!(order.total(), BigDecimal::from(3 * 1000 + 2 * 2500));
    }

    #[test]
    fn declined_payment_persists_nothing() {
        let fx = Fixture::new();
        let gateway = ScriptedPaymentGateway::declining();
        let factory = OrderFactory::new(&fx.repos, &gateway, &fx.clock);

        let err = factory
            .create(&fx.request(&[(fx.coffee.id, 2)]), fx.customer.id)
            .unwrap_err();

        assert!(matches!(err, DomainError::PaymentFailed(PaymentStatus::Failed)));
        assert_eq!(fx.repos.save_count(), 0);
        assert!(fx.repos.find_by_member(fx.customer.id).unwrap().is_empty());
    }

    #[test]
    fn pending_payment_counts_as_failure() {
        let fx = Fixture::new();
        let gateway = ScriptedPaymentGateway::new(PaymentStatus::Pending);
        let factory = OrderFactory::new(&fx.repos, &gateway, &fx.clock);

        let err = factory
            .create(&fx.request(&[(fx.coffee.id, 1)]), fx.customer.id)
            .unwrap_err();

        assert!(matches!(err, DomainError::PaymentFailed(PaymentStatus::Pending)));
        assert_eq!(fx.repos.save_count(), 0);
    }

    #[test]
    fn unknown_member_is_rejected_before_payment() {
        let fx = Fixture::new();
        let gateway = ScriptedPaymentGateway::approving();
        let factory = OrderFactory::new(&fx.repos, &gateway, &fx.clock);

        let err = factory
            .create(&fx.request(&[(fx.coffee.id, 1)]), 999)
            .unwrap_err();

        assert!(matches!(err, DomainError::MemberNotFound(999)));
        assert_eq!(gateway.calls(), 0);
    }

    #[test]
    fn unknown_store_is_rejected() {
        let fx = Fixture::new();
        let gateway = ScriptedPaymentGateway::approving();
        let factory = OrderFactory::new(&fx.repos, &gateway, &fx.clock);
        let mut request = fx.request(&[(fx.coffee.id, 1)]);
        request.store_id = Uuid::new_v4();

        let err = factory.create(&request, fx.customer.id).unwrap_err();

        assert!(matches!(err, DomainError::StoreNotFound(id) if id == request.store_id));
        assert_eq!(gateway.calls(), 0);
    }

    #[test]
    fn unknown_item_is_rejected() {
        let fx = Fixture::new();
        let gateway = ScriptedPaymentGateway::approving();
        let factory = OrderFactory::new(&fx.repos, &gateway, &fx.clock);
        let missing = Uuid::new_v4();

        let err = factory
            .create(&fx.request(&[(fx.coffee.id, 1), (missing, 3)]), fx.customer.id)
            .unwrap_err();

        assert!(matches!(err, DomainError::ItemNotFound(id) if id == missing));
        assert_eq!(gateway.calls(), 0);
        assert_eq!(fx.repos.save_count(), 0);
    }

    #[test]
    fn item_from_another_store_is_rejected() {
        let fx = Fixture::new();
        let gateway = ScriptedPaymentGateway::approving();
        let factory = OrderFactory::new(&fx.repos, &gateway, &fx.clock);

        let err = factory
            .create(
                &fx.request(&[(fx.coffee.id, 1), (fx.bagel.id, 1)]),
                fx.customer.id,
            )
            .unwrap_err();

        assert!(matches!(
            err,
            DomainError::ItemNotInStore { item_id, store_id }
                if item_id == fx.bagel.id && store_id == fx.store.id
        ));
        assert_eq!(gateway.calls(), 0);
        assert_eq!(fx.repos.save_count(), 0);
    }

    #[test]
    fn empty_or_non_positive_lines_are_invalid() {
        let fx = Fixture::new();
        let gateway = ScriptedPaymentGateway::approving();
        let factory = OrderFactory::new(&fx.repos, &gateway, &fx.clock);

        let empty = factory.create(&fx.request(&[]), fx.customer.id);
        let negative = factory.create(&fx.request(&[(fx.coffee.id, -1)]), fx.customer.id);

        assert!(matches!(empty, Err(DomainError::InvalidInput(_))));
        assert!(matches!(negative, Err(DomainError::InvalidInput(_))));
        assert_eq!(gateway.calls(), 0);
    }

    #[test]
    fn price_lines_keeps_frozen_price_for_existing_items() {
        let fx = Fixture::new();
        let gateway = ScriptedPaymentGateway::approving();
        let factory = OrderFactory::new(&fx.repos, &gateway, &fx.clock);
        let order = factory
            .create(&fx.request(&[(fx.coffee.id, 1)]), fx.customer.id)
            .expect("create failed");

        fx.repos
            .set_item_price(fx.coffee.id, BigDecimal::from(1500))
            .unwrap();
        fx.repos
            .set_item_price(fx.cake.id, BigDecimal::from(3000))
            .unwrap();

        let requested = [
            OrderLineRequest {
                item_id: fx.coffee.id,
                quantity: 4,
            },
            OrderLineRequest {
                item_id: fx.cake.id,
                quantity: 1,
            },
        ];
        let lines = price_lines(&fx.repos, fx.store.id, &requested, Some(&order)).unwrap();

        assert_eq!(lines[0].unit_price, BigDecimal::from(1000));
        assert_eq!(lines[0].quantity, 4);
        assert_eq!(lines[1].unit_price, BigDecimal::from(3000));
    }
}
