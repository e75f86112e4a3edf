pub mod adapters;
pub mod api;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{Cli, Command};

pub use adapters::{gemini::GeminiClient, storage::LocalStorage};
pub use config::Settings;
pub use core::monitor::ComplianceMonitor;
pub use utils::error::{ComplianceError, Result};
