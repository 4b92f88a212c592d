use crate::domain::model::{Credentials, StepOutcome};
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn credentials(&self) -> Credentials;
    fn probe_paths(&self) -> &[String];
    fn avatar_file(&self) -> Option<&Path>;
    fn timeout(&self) -> Option<Duration>;
}

/// State handed from one step to the next within a run.
#[derive(Debug, Clone, Default)]
pub struct SmokeContext {
    pub token: Option<String>,
    pub uploaded_avatar: Option<String>,
    transcript: Vec<String>,
    echo: bool,
}

impl SmokeContext {
    /// A context that prints every status line to stdout as it is emitted.
    pub fn echoing() -> Self {
        Self {
            echo: true,
            ..Default::default()
        }
    }

    pub fn say(&mut self, line: impl Into<String>) {
        let line = line.into();
        if self.echo {
            println!("{}", line);
        }
        self.transcript.push(line);
    }

    pub fn into_transcript(self) -> Vec<String> {
        self.transcript
    }
}

#[async_trait]
pub trait SmokeStep: Send + Sync {
    fn name(&self) -> &str;

    /// Section header printed before the step runs.
    fn banner(&self) -> Option<&str> {
        None
    }

    fn should_run(&self, _context: &SmokeContext) -> bool {
        true
    }

    /// Line printed instead of running the step.
    fn skip_note(&self) -> Option<String> {
        None
    }

    /// A failed step stops the run when this returns true.
    fn is_gate(&self) -> bool {
        false
    }

    async fn run(&self, context: &mut SmokeContext) -> StepOutcome;
}
