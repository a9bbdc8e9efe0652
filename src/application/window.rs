use chrono::{DateTime, Duration, Utc};

use crate::domain::errors::DomainError;
use crate::domain::order::Order;

pub const DEFAULT_MUTATION_WINDOW_SECS: i64 = 5 * 60;

/// Time after creation during which an order may still be updated or
/// cancelled. The boundary is inclusive: an order exactly `length` old passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationWindow {
    length: Duration,
}

impl MutationWindow {
    pub fn new(length: Duration) -> Self {
        Self { length }
    }

    pub fn length(&self) -> Duration {
        self.length
    }

    pub fn check_window(&self, order: &Order, now: DateTime<Utc>) -> Result<(), DomainError> {
        let elapsed = now - order.created_at;
        if elapsed <= self.length {
            return Ok(());
        }

        let id = order.persisted_id()?;
        log::warn!(
            "order {} is {}s old, past the {}s mutation window",
            id,
            elapsed.num_seconds(),
            self.length.num_seconds()
        );
        Err(DomainError::OrderTimeOut(id))
    }
}

impl Default for MutationWindow {
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_MUTATION_WINDOW_SECS))
    }
}
