use crate::config::{default_probe_paths, DEFAULT_BASE_URL, DEFAULT_EMAIL, DEFAULT_PASSWORD};
use crate::core::ConfigProvider;
use crate::domain::model::Credentials;
use crate::utils::error::{Result, SmokeError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub target: Option<TargetConfig>,
    pub credentials: Option<CredentialsConfig>,
    pub probes: Option<ProbesConfig>,
    pub upload: Option<UploadConfig>,
    pub http: Option<HttpConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialsConfig {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbesConfig {
    pub paths: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    pub avatar_file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub timeout_seconds: Option<u64>,
}

impl TomlConfig {
    /// Loads and parses a TOML config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SmokeError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SmokeError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` placeholders from the environment; unset variables stay literal.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SmokeError::ConfigError {
            message: format!("invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn base_url(&self) -> Option<&str> {
        self.target.as_ref()?.base_url.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.credentials.as_ref()?.email.as_deref()
    }

    pub fn password(&self) -> Option<&str> {
        self.credentials.as_ref()?.password.as_deref()
    }

    pub fn probe_paths(&self) -> Option<&[String]> {
        self.probes.as_ref()?.paths.as_deref()
    }

    pub fn avatar_file(&self) -> Option<&str> {
        self.upload.as_ref()?.avatar_file.as_deref()
    }

    pub fn timeout_seconds(&self) -> Option<u64> {
        self.http.as_ref()?.timeout_seconds
    }
}

// Inherent accessors return the raw file values; the provider fills defaults.
impl ConfigProvider for TomlConfig {
    fn base_url(&self) -> &str {
        TomlConfig::base_url(self).unwrap_or(DEFAULT_BASE_URL)
    }

    fn credentials(&self) -> Credentials {
        Credentials {
            email: self.email().unwrap_or(DEFAULT_EMAIL).to_string(),
            password: self.password().unwrap_or(DEFAULT_PASSWORD).to_string(),
        }
    }

    fn probe_paths(&self) -> &[String] {
        TomlConfig::probe_paths(self).unwrap_or(default_probe_paths())
    }

    fn avatar_file(&self) -> Option<&Path> {
        TomlConfig::avatar_file(self).map(Path::new)
    }

    fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds().map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[target]
base_url = "http://staging.local"

[credentials]
email = "qa@example.com"
password = "hunter22"

[probes]
paths = ["/api/health"]

[upload]
avatar_file = "./fixtures/avatar.png"

[http]
timeout_seconds = 10
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.base_url(), Some("http://staging.local"));
        assert_eq!(config.email(), Some("qa@example.com"));
        assert_eq!(config.password(), Some("hunter22"));
        assert_eq!(config.probe_paths().unwrap().len(), 1);
        assert_eq!(config.avatar_file(), Some("./fixtures/avatar.png"));
        assert_eq!(config.timeout_seconds(), Some(10));
    }

    #[test]
    fn test_empty_toml_is_all_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.base_url().is_none());
        assert!(config.probe_paths().is_none());
        assert!(config.timeout_seconds().is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("AVATAR_SMOKE_TEST_PASSWORD", "from-env");

        let toml_content = r#"
[credentials]
email = "test@example.com"
password = "${AVATAR_SMOKE_TEST_PASSWORD}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.password(), Some("from-env"));

        std::env::remove_var("AVATAR_SMOKE_TEST_PASSWORD");
    }

    #[test]
    fn test_unset_env_var_is_left_literal() {
        let toml_content = r#"
[target]
base_url = "${AVATAR_SMOKE_SURELY_UNSET_VAR}"
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.base_url(), Some("${AVATAR_SMOKE_SURELY_UNSET_VAR}"));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[target\nbase_url = 1").unwrap_err();
        assert!(matches!(err, SmokeError::ConfigError { .. }));
    }

    #[test]
    fn test_provider_fills_unset_values_with_defaults() {
        let config = TomlConfig::from_toml_str("[http]\ntimeout_seconds = 4\n").unwrap();
        let provider: &dyn ConfigProvider = &config;

        assert_eq!(provider.base_url(), DEFAULT_BASE_URL);
        assert_eq!(provider.credentials().email, DEFAULT_EMAIL);
        assert_eq!(provider.credentials().password, DEFAULT_PASSWORD);
        assert_eq!(provider.probe_paths(), default_probe_paths());
        assert!(provider.avatar_file().is_none());
        assert_eq!(provider.timeout(), Some(Duration::from_secs(4)));
    }

    #[test]
    fn test_provider_prefers_file_values() {
        let config = TomlConfig::from_toml_str(
            "[target]\nbase_url = \"http://qa.local\"\n[probes]\npaths = [\"/x\"]\n[upload]\navatar_file = \"me.png\"\n",
        )
        .unwrap();
        let provider: &dyn ConfigProvider = &config;

        assert_eq!(provider.base_url(), "http://qa.local");
        assert_eq!(provider.probe_paths(), &["/x".to_string()]);
        assert_eq!(provider.avatar_file(), Some(Path::new("me.png")));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[target]\nbase_url = \"http://file.local\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.base_url(), Some("http://file.local"));
    }
}
