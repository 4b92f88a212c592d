use crate::core::client::ApiClient;
use crate::domain::model::{token_preview, Credentials, StepOutcome};
use crate::domain::ports::{SmokeContext, SmokeStep};
use crate::utils::error::SmokeError;
use async_trait::async_trait;
use std::path::PathBuf;

pub struct LoginStep {
    client: ApiClient,
    credentials: Credentials,
}

impl LoginStep {
    pub fn new(client: ApiClient, credentials: Credentials) -> Self {
        Self { client, credentials }
    }
}

#[async_trait]
impl SmokeStep for LoginStep {
    fn name(&self) -> &str {
        "login"
    }

    fn banner(&self) -> Option<&str> {
        Some("=== Avatar upload test ===")
    }

    fn is_gate(&self) -> bool {
        true
    }

    async fn run(&self, context: &mut SmokeContext) -> StepOutcome {
        match self.client.login(&self.credentials).await {
            Ok(token) => {
                context.say(format!("✅ Login succeeded, token: {}", token_preview(&token)));
                context.token = Some(token);
                StepOutcome::Passed("token issued".to_string())
            }
            Err(SmokeError::LoginRejected { status }) => {
                context.say(format!("❌ Login failed: {}", status));
                StepOutcome::Failed(format!("status {}", status))
            }
            Err(e) => {
                tracing::error!("Login request errored: {}", e);
                context.say(format!("❌ Error during test: {}", e));
                StepOutcome::Failed(e.to_string())
            }
        }
    }
}

pub struct AvatarUploadStep {
    client: ApiClient,
    file: Option<PathBuf>,
}

impl AvatarUploadStep {
    pub fn new(client: ApiClient, file: Option<PathBuf>) -> Self {
        Self { client, file }
    }
}

#[async_trait]
impl SmokeStep for AvatarUploadStep {
    fn name(&self) -> &str {
        "avatar_upload"
    }

    fn should_run(&self, context: &SmokeContext) -> bool {
        self.file.is_some() && context.token.is_some()
    }

    fn skip_note(&self) -> Option<String> {
        Some("📝 Avatar upload needs a real file; skipped".to_string())
    }

    async fn run(&self, context: &mut SmokeContext) -> StepOutcome {
        let (Some(file), Some(token)) = (&self.file, context.token.clone()) else {
            return StepOutcome::Skipped("no file or token".to_string());
        };

        match self.client.upload_avatar(&token, file).await {
            Ok(uploaded) => {
                context.say(format!("✅ Avatar uploaded: {}", uploaded.avatar));
                tracing::debug!("Avatar history length: {}", uploaded.avatar_history.len());
                context.uploaded_avatar = Some(uploaded.avatar.clone());
                StepOutcome::Passed(uploaded.avatar)
            }
            Err(SmokeError::UploadError { message }) => {
                context.say(format!("❌ Avatar upload failed: {}", message));
                StepOutcome::Failed(message)
            }
            Err(e) => {
                context.say(format!("❌ Avatar upload failed: {}", e));
                StepOutcome::Failed(e.to_string())
            }
        }
    }
}

/// Confirms the server now reports the uploaded avatar as current.
pub struct AvatarHistoryStep {
    client: ApiClient,
}

impl AvatarHistoryStep {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SmokeStep for AvatarHistoryStep {
    fn name(&self) -> &str {
        "avatar_history"
    }

    fn should_run(&self, context: &SmokeContext) -> bool {
        context.uploaded_avatar.is_some() && context.token.is_some()
    }

    async fn run(&self, context: &mut SmokeContext) -> StepOutcome {
        let (Some(token), Some(expected)) = (context.token.clone(), context.uploaded_avatar.clone())
        else {
            return StepOutcome::Skipped("nothing uploaded".to_string());
        };

        match self.client.avatar_history(&token).await {
            Ok(history) if history.current_avatar.as_deref() == Some(expected.as_str()) => {
                context.say(format!("✅ Avatar history current: {}", expected));
                StepOutcome::Passed(expected)
            }
            Ok(history) => {
                let current = history.current_avatar.unwrap_or_else(|| "none".to_string());
                context.say(format!(
                    "❌ Avatar history mismatch: expected {}, server reports {}",
                    expected, current
                ));
                StepOutcome::Failed(format!("current avatar is {}", current))
            }
            Err(e) => {
                context.say(format!("❌ Avatar history failed: {}", e));
                StepOutcome::Failed(e.to_string())
            }
        }
    }
}

pub struct StaticFilesStep {
    client: ApiClient,
    paths: Vec<String>,
}

impl StaticFilesStep {
    pub fn new(client: ApiClient, paths: Vec<String>) -> Self {
        Self { client, paths }
    }
}

#[async_trait]
impl SmokeStep for StaticFilesStep {
    fn name(&self) -> &str {
        "static_files"
    }

    fn banner(&self) -> Option<&str> {
        Some("\n=== Static file serving test ===")
    }

    async fn run(&self, context: &mut SmokeContext) -> StepOutcome {
        let mut urls: Vec<String> = self.paths.iter().map(|p| self.client.url(p)).collect();
        if let Some(avatar) = &context.uploaded_avatar {
            urls.push(self.client.url(avatar));
        }

        let mut unreachable = 0;
        for url in &urls {
            let probe = self.client.head(url).await;
            if !probe.reached() {
                unreachable += 1;
            }
            context.say(probe.status_line());
        }

        if unreachable == 0 {
            StepOutcome::Passed(format!("{} urls answered", urls.len()))
        } else {
            StepOutcome::Failed(format!("{} of {} urls unreachable", unreachable, urls.len()))
        }
    }
}
