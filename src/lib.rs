pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::{
    InMemoryCourseCatalog, InMemoryStudentDirectory, OutboxNotificationGateway, TieredCreditPolicy,
};
pub use config::RosterConfig;
pub use crate::core::enrollment::EnrollmentService;
pub use utils::error::{EnrollmentError, Result};
