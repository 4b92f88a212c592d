pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use config::ResolvedConfig;
pub use crate::core::{client::ApiClient, runner::SmokeRunner};
pub use utils::error::{Result, SmokeError};
