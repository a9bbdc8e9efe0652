//! Who may act on an order.
//!
//! A customer may act on the orders they placed; an owner may act on orders
//! placed against their store. Reads and mutations share the same rule.

use crate::domain::errors::DomainError;
use crate::domain::member::{Member, MemberId, Role, Store};
use crate::domain::order::Order;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Update,
    Cancel,
}

/// Pure ownership rule over the actor's role and the two owning ids.
pub fn may_access(
    role: Role,
    actor_id: MemberId,
    order_member_id: MemberId,
    store_owner_id: MemberId,
) -> bool {
    match role {
        Role::Customer => actor_id == order_member_id,
        Role::Owner => actor_id == store_owner_id,
    }
}

/// `store` must be the store the order was placed against.
pub fn authorize(
    order: &Order,
    store: &Store,
    actor: &Member,
    operation: Operation,
) -> Result<(), DomainError> {
    if may_access(actor.role, actor.id, order.member_id, store.owner_id) {
        return Ok(());
    }

    log::warn!(
        "member {} ({:?}) denied {:?} on order {:?}",
        actor.id,
        actor.role,
        operation,
        order.id
    );
    Err(DomainError::AccessDenied)
}

/// Store-wide listings are reserved to the store's owner.
pub fn authorize_store(store: &Store, actor_id: MemberId) -> Result<(), DomainError> {
    if store.owner_id == actor_id {
        return Ok(());
    }

    log::warn!("member {} denied order listing of store {}", actor_id, store.id);
    Err(DomainError::AccessDenied)
}
