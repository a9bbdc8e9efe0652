use bigdecimal::BigDecimal;
use chrono::{TimeZone, Utc};
use uuid::Uuid;

use crate::domain::member::{Item, Member, Role, Store};
use crate::domain::order::{Address, CreateOrderRequest, OrderLineRequest, OrderType, PaymentMethod};
use crate::infrastructure::{InMemoryMarketplace, ManualClock};

/// Two customers and two owners with one store each. `coffee` and `cake`
/// belong to `store`, `bagel` to the other owner's store.
pub(crate) struct Fixture {
    pub repos: InMemoryMarketplace,
    pub clock: ManualClock,
    pub customer: Member,
    pub other_customer: Member,
    pub owner: Member,
    pub other_owner: Member,
    pub store: Store,
    pub coffee: Item,
    pub cake: Item,
    pub bagel: Item,
}

impl Fixture {
    pub fn new() -> Self {
        let customer = member(1, "customer", Role::Customer);
        let owner = member(2, "owner", Role::Owner);
        let other_owner = member(3, "other-owner", Role::Owner);
        let other_customer = member(4, "other-customer", Role::Customer);

        let store = Store {
            id: Uuid::new_v4(),
            name: "Morning Cafe".to_string(),
            owner_id: owner.id,
        };
        let other_store = Store {
            id: Uuid::new_v4(),
            name: "Evening Bakery".to_string(),
            owner_id: other_owner.id,
        };
        let coffee = Item {
            id: Uuid::new_v4(),
            store_id: store.id,
            name: "Iced Coffee".to_string(),
            price: BigDecimal::from(1000),
        };
        let cake = Item {
            id: Uuid::new_v4(),
            store_id: store.id,
            name: "Cheese Cake".to_string(),
            price: BigDecimal::from(2500),
        };
        let bagel = Item {
            id: Uuid::new_v4(),
            store_id: other_store.id,
            name: "Sesame Bagel".to_string(),
            price: BigDecimal::from(1800),
        };

        let repos = InMemoryMarketplace::new()
            .with_member(customer.clone())
            .with_member(other_customer.clone())
            .with_member(owner.clone())
            .with_member(other_owner.clone())
            .with_store(store.clone())
            .with_store(other_store)
            .with_item(coffee.clone())
            .with_item(cake.clone())
            .with_item(bagel.clone());

        let clock = ManualClock::new(
            Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0)
                .single()
                .unwrap_or_else(Utc::now),
        );

        Self {
            repos,
            clock,
            customer,
            other_customer,
            owner,
            other_owner,
            store,
            coffee,
            cake,
            bagel,
        }
    }

    pub fn request(&self, lines: &[(Uuid, i32)]) -> CreateOrderRequest {
        CreateOrderRequest {
            store_id: self.store.id,
            order_type: OrderType::Online,
            payment_method: PaymentMethod::Card,
            delivery_address: Address {
                city: "Seoul".to_string(),
                street: "Main Street".to_string(),
                zipcode: "12345".to_string(),
            },
            store_request: Some("less sugar please".to_string()),
            lines: lines
                .iter()
                .map(|&(item_id, quantity)| OrderLineRequest { item_id, quantity })
                .collect(),
        }
    }
}

fn member(id: i64, username: &str, role: Role) -> Member {
    Member {
        id,
        username: username.to_string(),
        role,
    }
}
