use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};

use bigdecimal::BigDecimal;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::member::{Item, Member, MemberId, Store};
use crate::domain::order::Order;
use crate::domain::ports::{ItemLookup, MemberLookup, OrderRepository, StoreLookup};

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl<T> From<PoisonError<T>> for DomainError {
    fn from(e: PoisonError<T>) -> Self {
        DomainError::Internal(e.to_string())
    }
}

// ── Repository ────────────────────────────────────────────────────────────────

/// Members, stores, items and orders held in process memory.
///
/// Each write holds the map lock, but saves are unversioned: when two callers
/// load and save the same order, the last writer wins.
#[derive(Debug, Default)]
pub struct InMemoryMarketplace {
    members: RwLock<HashMap<MemberId, Member>>,
    stores: RwLock<HashMap<Uuid, Store>>,
    items: RwLock<HashMap<Uuid, Item>>,
    orders: RwLock<HashMap<Uuid, Order>>,
    saves: AtomicUsize,
}

impl InMemoryMarketplace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_member(mut self, member: Member) -> Self {
        self.members
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(member.id, member);
        self
    }

    pub fn with_store(mut self, store: Store) -> Self {
        self.stores
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(store.id, store);
        self
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.items
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(item.id, item);
        self
    }

    /// Changes the catalog price of an item. Existing orders are unaffected.
    pub fn set_item_price(&self, item_id: Uuid, price: BigDecimal) -> Result<(), DomainError> {
        let mut items = self.items.write()?;
        let item = items
            .get_mut(&item_id)
            .ok_or(DomainError::ItemNotFound(item_id))?;
        item.price = price;
        Ok(())
    }

    /// Number of `save` calls served so far.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn order_count(&self) -> Result<usize, DomainError> {
        Ok(self.orders.read()?.len())
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn newest_first(mut orders: Vec<Order>) -> Vec<Order> {
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    orders
}

impl MemberLookup for InMemoryMarketplace {
    fn find_member(&self, id: MemberId) -> Result<Option<Member>, DomainError> {
        Ok(self.members.read()?.get(&id).cloned())
    }
}

impl StoreLookup for InMemoryMarketplace {
    fn find_store(&self, id: Uuid) -> Result<Option<Store>, DomainError> {
        Ok(self.stores.read()?.get(&id).cloned())
    }
}

impl ItemLookup for InMemoryMarketplace {
    fn find_item(&self, id: Uuid) -> Result<Option<Item>, DomainError> {
        Ok(self.items.read()?.get(&id).cloned())
    }
}

impl OrderRepository for InMemoryMarketplace {
    fn save(&self, mut order: Order) -> Result<Order, DomainError> {
        let id = *order.id.get_or_insert_with(Uuid::new_v4);
        self.orders.write()?.insert(id, order.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(order)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError> {
        Ok(self.orders.read()?.get(&id).cloned())
    }

    fn find_by_member(&self, member_id: MemberId) -> Result<Vec<Order>, DomainError> {
        let orders = self.orders.read()?;
        Ok(newest_first(
            orders
                .values()
                .filter(|o| o.member_id == member_id)
                .cloned()
                .collect(),
        ))
    }

    fn find_by_store(&self, store_id: Uuid) -> Result<Vec<Order>, DomainError> {
        let orders = self.orders.read()?;
        Ok(newest_first(
            orders
                .values()
                .filter(|o| o.store_id == store_id)
                .cloned()
                .collect(),
        ))
    }

    fn search(
        &self,
        member_id: MemberId,
        store_name: Option<&str>,
        product_name: Option<&str>,
    ) -> Result<Vec<Order>, DomainError> {
        let orders = self.orders.read()?;
        let stores = self.stores.read()?;

        let matches_store = |order: &Order| match store_name {
            None => true,
            Some(name) => stores
                .get(&order.store_id)
                .is_some_and(|s| contains_ignore_case(&s.name, name)),
        };
        let matches_product = |order: &Order| match product_name {
            None => true,
            Some(name) => order
                .lines
                .iter()
                .any(|l| contains_ignore_case(&l.item_name, name)),
        };

        Ok(newest_first(
            orders
                .values()
                .filter(|o| o.member_id == member_id)
                .filter(|o| matches_store(*o))
                .filter(|o| matches_product(*o))
                .cloned()
                .collect(),
        ))
    }
}
