// Adapters layer: reference implementations of the domain ports.

pub mod credit_policy;
pub mod memory;
pub mod notification;

pub use credit_policy::{CreditTier, TieredCreditPolicy};
pub use memory::{InMemoryCourseCatalog, InMemoryStudentDirectory};
pub use notification::{OutboxNotificationGateway, SentEmail};
