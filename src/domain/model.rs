use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub message: Option<String>,
    pub avatar: String,
    #[serde(default)]
    pub avatar_history: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvatarHistory {
    pub current_avatar: Option<String>,
    #[serde(default)]
    pub avatar_history: Vec<String>,
}

/// Result of a single HEAD request.
#[derive(Debug, Clone)]
pub struct ProbeResult {
    pub url: String,
    pub status: Option<u16>,
    pub error: Option<String>,
}

impl ProbeResult {
    pub fn reached(&self) -> bool {
        self.status.is_some()
    }

    pub fn status_line(&self) -> String {
        match (self.status, &self.error) {
            (Some(status), _) => format!("✅ {}: {}", self.url, status),
            (None, Some(err)) => format!("❌ {}: {}", self.url, err),
            (None, None) => format!("❌ {}: no response", self.url),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Passed(String),
    Failed(String),
    Skipped(String),
}

impl StepOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, StepOutcome::Failed(_))
    }
}

#[derive(Debug, Clone)]
pub struct StepReport {
    pub name: String,
    pub outcome: StepOutcome,
    pub duration: Duration,
}

#[derive(Debug, Clone, Default)]
pub struct SmokeReport {
    pub steps: Vec<StepReport>,
    /// Status lines in the order they were printed.
    pub transcript: Vec<String>,
}

impl SmokeReport {
    pub fn push(&mut self, step: StepReport) {
        self.steps.push(step);
    }

    pub fn passed(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s.outcome, StepOutcome::Passed(_)))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.steps.iter().filter(|s| s.outcome.is_failure()).count()
    }

    pub fn skipped(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s.outcome, StepOutcome::Skipped(_)))
            .count()
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }

    pub fn step(&self, name: &str) -> Option<&StepReport> {
        self.steps.iter().find(|s| s.name == name)
    }

    /// Process exit code: 0 unless `strict` and some step failed.
    pub fn exit_code(&self, strict: bool) -> i32 {
        if strict && self.has_failures() {
            1
        } else {
            0
        }
    }
}

/// Shortens a token for display: first 20 characters, then `...`.
pub fn token_preview(token: &str) -> String {
    let head: String = token.chars().take(20).collect();
    format!("{}...", head)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_preview_truncates_to_twenty_chars() {
        let token = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.payload";
        assert_eq!(token_preview(token), "eyJhbGciOiJIUzI1NiIs...");
    }

    #[test]
    fn test_token_preview_short_and_multibyte() {
        assert_eq!(token_preview("abc"), "abc...");
        let token = "令牌".repeat(15);
        assert_eq!(token_preview(&token), format!("{}...", "令牌".repeat(10)));
    }

    #[test]
    fn test_upload_response_uses_camel_case() {
        let body = r#"{"message":"ok","avatar":"/uploads/avatars/a.png","avatarHistory":["/old.png"]}"#;
        let parsed: UploadResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.avatar, "/uploads/avatars/a.png");
        assert_eq!(parsed.avatar_history, vec!["/old.png".to_string()]);
    }

    #[test]
    fn test_probe_status_line() {
        let ok = ProbeResult {
            url: "http://localhost/api/health".to_string(),
            status: Some(200),
            error: None,
        };
        assert!(ok.reached());
        assert_eq!(ok.status_line(), "✅ http://localhost/api/health: 200");

        let down = ProbeResult {
            url: "http://localhost/api/health".to_string(),
            status: None,
            error: Some("connection refused".to_string()),
        };
        assert!(!down.reached());
        assert!(down.status_line().starts_with("❌"));
    }

    #[test]
    fn test_report_counters() {
        let mut report = SmokeReport::default();
        for (name, outcome) in [
            ("login", StepOutcome::Passed("ok".into())),
            ("avatar_upload", StepOutcome::Skipped("no file".into())),
            ("static_files", StepOutcome::Failed("1 unreachable".into())),
        ] {
            report.push(StepReport {
                name: name.to_string(),
                outcome,
                duration: Duration::ZERO,
            });
        }
        assert_eq!(report.passed(), 1);
        assert_eq!(report.skipped(), 1);
        assert_eq!(report.failed(), 1);
        assert!(report.has_failures());
        assert!(report.step("login").is_some());
        assert_eq!(report.exit_code(false), 0);
        assert_eq!(report.exit_code(true), 1);
    }

    #[test]
    fn test_strict_exit_code_is_zero_without_failures() {
        let mut report = SmokeReport::default();
        report.push(StepReport {
            name: "login".to_string(),
            outcome: StepOutcome::Passed("ok".into()),
            duration: Duration::ZERO,
        });
        assert_eq!(report.exit_code(true), 0);
    }
}
