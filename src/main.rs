use avatar_smoke::utils::{logger, validation::Validate};
use avatar_smoke::{CliConfig, ResolvedConfig, SmokeRunner};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting avatar-smoke");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli.redacted());
    }

    let config = match ResolvedConfig::from_cli(&cli).and_then(|c| c.validate().map(|_| c)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(e.exit_code());
        }
    };

    let runner = SmokeRunner::from_config(&config)?;
    let report = runner.run().await;

    tracing::info!(
        "Smoke run finished: {} passed, {} failed, {} skipped",
        report.passed(),
        report.failed(),
        report.skipped()
    );

    let exit_code = report.exit_code(config.strict);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }

    Ok(())
}
