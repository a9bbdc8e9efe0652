pub mod access;
pub mod factory;
pub mod order_service;
pub mod query;
pub mod window;

#[cfg(test)]
mod testing;

pub use order_service::OrderWorkflow;
