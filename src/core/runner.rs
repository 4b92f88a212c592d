use crate::core::client::ApiClient;
use crate::core::steps::{AvatarHistoryStep, AvatarUploadStep, LoginStep, StaticFilesStep};
use crate::domain::model::{SmokeReport, StepOutcome, StepReport};
use crate::domain::ports::{ConfigProvider, SmokeContext, SmokeStep};
use crate::utils::error::Result;
use std::time::Instant;

/// Runs smoke steps in order, sharing one context between them.
pub struct SmokeRunner {
    steps: Vec<Box<dyn SmokeStep>>,
    echo: bool,
}

impl SmokeRunner {
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            echo: true,
        }
    }

    /// Login, optional avatar upload and history check, then HEAD probes.
    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let client = ApiClient::new(config.base_url(), config.timeout())?;

        let mut runner = Self::new();
        runner.add_step(Box::new(LoginStep::new(client.clone(), config.credentials())));
        runner.add_step(Box::new(AvatarUploadStep::new(
            client.clone(),
            config.avatar_file().map(|p| p.to_path_buf()),
        )));
        runner.add_step(Box::new(AvatarHistoryStep::new(client.clone())));
        runner.add_step(Box::new(StaticFilesStep::new(
            client,
            config.probe_paths().to_vec(),
        )));
        Ok(runner)
    }

    /// Keep status lines in the report only, without printing them.
    pub fn quiet(mut self) -> Self {
        self.echo = false;
        self
    }

    pub fn add_step(&mut self, step: Box<dyn SmokeStep>) {
        self.steps.push(step);
    }

    pub async fn run(&self) -> SmokeReport {
        let mut context = if self.echo {
            SmokeContext::echoing()
        } else {
            SmokeContext::default()
        };
        let mut report = SmokeReport::default();

        for step in &self.steps {
            let started = Instant::now();

            if !step.should_run(&context) {
                tracing::debug!("Skipping step '{}'", step.name());
                let note = step.skip_note();
                if let Some(line) = &note {
                    context.say(line.clone());
                }
                report.push(StepReport {
                    name: step.name().to_string(),
                    outcome: StepOutcome::Skipped(note.unwrap_or_else(|| "not applicable".to_string())),
                    duration: started.elapsed(),
                });
                continue;
            }

            if let Some(banner) = step.banner() {
                context.say(banner);
            }

            tracing::info!("Running step '{}'", step.name());
            let outcome = step.run(&mut context).await;
            let failed = outcome.is_failure();
            tracing::info!("Step '{}' finished: {:?}", step.name(), outcome);

            report.push(StepReport {
                name: step.name().to_string(),
                outcome,
                duration: started.elapsed(),
            });

            if failed && step.is_gate() {
                tracing::warn!("Step '{}' failed, stopping run", step.name());
                break;
            }
        }

        report.transcript = context.into_transcript();
        report
    }
}

impl Default for SmokeRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FixedStep {
        name: String,
        outcome: StepOutcome,
        gate: bool,
        runnable: bool,
    }

    impl FixedStep {
        fn new(name: &str, outcome: StepOutcome) -> Self {
            Self {
                name: name.to_string(),
                outcome,
                gate: false,
                runnable: true,
            }
        }

        fn gate(mut self) -> Self {
            self.gate = true;
            self
        }

        fn not_runnable(mut self) -> Self {
            self.runnable = false;
            self
        }
    }

    #[async_trait]
    impl SmokeStep for FixedStep {
        fn name(&self) -> &str {
            &self.name
        }

        fn should_run(&self, _context: &SmokeContext) -> bool {
            self.runnable
        }

        fn is_gate(&self) -> bool {
            self.gate
        }

        async fn run(&self, context: &mut SmokeContext) -> StepOutcome {
            context.say(format!("ran {}", self.name));
            self.outcome.clone()
        }
    }

    #[tokio::test]
    async fn test_failed_gate_stops_run() {
        let mut runner = SmokeRunner::new().quiet();
        runner.add_step(Box::new(
            FixedStep::new("first", StepOutcome::Failed("nope".into())).gate(),
        ));
        runner.add_step(Box::new(FixedStep::new("second", StepOutcome::Passed("ok".into()))));

        let report = runner.run().await;

        assert_eq!(report.steps.len(), 1);
        assert_eq!(report.transcript, vec!["ran first".to_string()]);
        assert!(report.has_failures());
    }

    #[tokio::test]
    async fn test_non_gate_failure_continues() {
        let mut runner = SmokeRunner::new().quiet();
        runner.add_step(Box::new(FixedStep::new("first", StepOutcome::Failed("nope".into()))));
        runner.add_step(Box::new(FixedStep::new("second", StepOutcome::Passed("ok".into()))));

        let report = runner.run().await;

        assert_eq!(report.steps.len(), 2);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.passed(), 1);
    }

    #[tokio::test]
    async fn test_unrunnable_step_is_recorded_as_skipped() {
        let mut runner = SmokeRunner::new().quiet();
        runner.add_step(Box::new(
            FixedStep::new("optional", StepOutcome::Passed("ok".into())).not_runnable(),
        ));

        let report = runner.run().await;

        assert_eq!(report.skipped(), 1);
        assert!(report.transcript.is_empty());
    }
}
