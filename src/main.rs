use anyhow::Context;
use clap::Parser;
use contextmap::cli::{Cli, prompt_company};
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("contextmap=info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        },
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cwd = std::env::current_dir().context("Failed to read the working directory")?;
    tracing::info!("Working directory: {}", cwd.display());

    let settings = cli.into_settings().context("Failed to load settings")?;
    tracing::info!(
        "Template {} exists: {}",
        settings.template.display(),
        settings.template.exists()
    );

    let company = match settings.company.clone() {
        Some(company) => company,
        None => prompt_company(std::io::stdin().lock(), std::io::stdout())
            .context("Failed to read the company name")?
            .context("No company name entered")?,
    };

    let report = contextmap::pipeline::run(&settings, &company)
        .with_context(|| format!("Failed to generate {}", settings.output.display()))?;
    tracing::info!("Done: {} replacements", report.total());

    Ok(())
}
