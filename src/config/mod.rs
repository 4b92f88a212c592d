#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::domain::model::Credentials;
use crate::utils::error::{Result, SmokeError};
use crate::utils::validation::{self, Validate};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;
use toml_config::TomlConfig;

pub const DEFAULT_BASE_URL: &str = "http://localhost";
pub const DEFAULT_EMAIL: &str = "test@example.com";
pub const DEFAULT_PASSWORD: &str = "password123";
pub const DEFAULT_PROBE_PATHS: [&str; 2] = ["/uploads/avatars/test.jpg", "/api/health"];

pub fn default_probe_paths() -> &'static [String] {
    static PATHS: OnceLock<Vec<String>> = OnceLock::new();
    PATHS.get_or_init(|| DEFAULT_PROBE_PATHS.iter().map(|p| p.to_string()).collect())
}

/// Settings after defaults, config file and command line have been layered.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub email: String,
    pub password: String,
    pub probe_paths: Vec<String>,
    pub avatar_file: Option<PathBuf>,
    pub timeout_seconds: Option<u64>,
    pub strict: bool,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            email: DEFAULT_EMAIL.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            probe_paths: default_probe_paths().to_vec(),
            avatar_file: None,
            timeout_seconds: None,
            strict: false,
        }
    }
}

impl ResolvedConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_credentials(mut self, email: impl Into<String>, password: impl Into<String>) -> Self {
        self.email = email.into();
        self.password = password.into();
        self
    }

    pub fn with_probe_paths(mut self, paths: Vec<String>) -> Self {
        self.probe_paths = paths;
        self
    }

    pub fn with_avatar_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.avatar_file = Some(path.into());
        self
    }

    pub fn with_timeout_seconds(mut self, seconds: u64) -> Self {
        self.timeout_seconds = Some(seconds);
        self
    }

    /// Overlay values present in a config file.
    pub fn merge_toml(mut self, file: &TomlConfig) -> Self {
        if let Some(base_url) = file.base_url() {
            self.base_url = base_url.to_string();
        }
        if let Some(email) = file.email() {
            self.email = email.to_string();
        }
        if let Some(password) = file.password() {
            self.password = password.to_string();
        }
        if let Some(paths) = file.probe_paths() {
            self.probe_paths = paths.to_vec();
        }
        if let Some(avatar_file) = file.avatar_file() {
            self.avatar_file = Some(PathBuf::from(avatar_file));
        }
        if let Some(timeout) = file.timeout_seconds() {
            self.timeout_seconds = Some(timeout);
        }
        self
    }

    /// Defaults, then `--config` file, then explicit flags.
    #[cfg(feature = "cli")]
    pub fn from_cli(cli: &cli::CliConfig) -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = &cli.config {
            tracing::debug!("Loading config file: {}", path);
            let file = TomlConfig::from_file(path).map_err(|e| match e {
                SmokeError::IoError(io) => SmokeError::ConfigError {
                    message: format!("cannot read {}: {}", path, io),
                },
                other => other,
            })?;
            config = config.merge_toml(&file);
        }

        if let Some(base_url) = &cli.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(email) = &cli.email {
            config.email = email.clone();
        }
        if let Some(password) = &cli.password {
            config.password = password.clone();
        }
        if !cli.probe_paths.is_empty() {
            config.probe_paths = cli.probe_paths.clone();
        }
        if let Some(avatar_file) = &cli.avatar_file {
            config.avatar_file = Some(PathBuf::from(avatar_file));
        }
        if let Some(timeout) = cli.timeout_seconds {
            config.timeout_seconds = Some(timeout);
        }
        config.strict = cli.strict;

        Ok(config)
    }
}

impl ConfigProvider for ResolvedConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn credentials(&self) -> Credentials {
        Credentials {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }

    fn probe_paths(&self) -> &[String] {
        &self.probe_paths
    }

    fn avatar_file(&self) -> Option<&Path> {
        self.avatar_file.as_deref()
    }

    fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

impl Validate for ResolvedConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("base_url", &self.base_url)?;
        validation::validate_non_empty_string("email", &self.email)?;
        validation::validate_probe_paths("probe_paths", &self.probe_paths)?;

        if let Some(timeout) = self.timeout_seconds {
            validation::validate_positive_number("timeout_seconds", timeout, 1)?;
        }

        if let Some(path) = &self.avatar_file {
            validation::validate_path("avatar_file", &path.to_string_lossy())?;
        }

        Ok(())
    }
}
