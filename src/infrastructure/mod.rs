pub mod clock;
pub mod memory;
pub mod payment;

pub use clock::ManualClock;
pub use memory::InMemoryMarketplace;
pub use payment::ScriptedPaymentGateway;
