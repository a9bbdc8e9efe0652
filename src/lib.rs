pub mod application;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infrastructure;

pub use application::OrderWorkflow;
pub use config::WorkflowConfig;
pub use domain::errors::DomainError;
pub use errors::ErrorBody;
