#[cfg(feature = "cli")]
pub mod cli;
pub mod roster;

pub use roster::{RosterAdapters, RosterConfig};

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};
