use crate::config::{default_probe_paths, DEFAULT_BASE_URL, DEFAULT_EMAIL, DEFAULT_PASSWORD};
use crate::core::ConfigProvider;
use crate::domain::model::Credentials;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Command line flags. Every value is optional so a config file can fill
/// whatever the user did not pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "avatar-smoke")]
#[command(about = "Smoke test for avatar upload and static file serving")]
pub struct CliConfig {
    #[arg(long, help = "TOML config file")]
    pub config: Option<String>,

    #[arg(long, help = "Server base URL [default: http://localhost]")]
    pub base_url: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub password: Option<String>,

    #[arg(long, value_delimiter = ',', help = "Paths probed with HEAD")]
    pub probe_paths: Vec<String>,

    #[arg(long, help = "Image uploaded as the test user's avatar")]
    pub avatar_file: Option<String>,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(long, help = "Exit non-zero when any step fails")]
    pub strict: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Copy safe to write to logs.
    pub fn redacted(&self) -> Self {
        Self {
            password: self.password.as_ref().map(|_| "***".to_string()),
            ..self.clone()
        }
    }
}

/// Flags alone, without any `--config` file.
impl ConfigProvider for CliConfig {
    fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    fn credentials(&self) -> Credentials {
        Credentials {
            email: self.email.as_deref().unwrap_or(DEFAULT_EMAIL).to_string(),
            password: self.password.as_deref().unwrap_or(DEFAULT_PASSWORD).to_string(),
        }
    }

    fn probe_paths(&self) -> &[String] {
        if self.probe_paths.is_empty() {
            default_probe_paths()
        } else {
            &self.probe_paths
        }
    }

    fn avatar_file(&self) -> Option<&Path> {
        self.avatar_file.as_deref().map(Path::new)
    }

    fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}
