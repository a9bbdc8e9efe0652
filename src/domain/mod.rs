pub mod errors;
pub mod member;
pub mod order;
pub mod payment;
pub mod ports;
pub mod views;
