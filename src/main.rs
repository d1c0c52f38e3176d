use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use fx_analyzer::adapters::{HtmlView, HttpAnalysisService, HttpServiceConfig, TerminalView};
use fx_analyzer::application::{ActivationOutcome, AnalysisTrigger};
use fx_analyzer::config::{AppConfig, LoggingConfig, MarkupPolicy, OutputFormat, ViewConfig};
use fx_analyzer::ports::{AnalysisService, AnalysisView};

#[derive(Parser, Debug)]
#[command(name = "fx-analyzer")]
#[command(about = "Trigger a currency pair analysis and render the predictions")]
struct Cli {
    /// Analysis server root, e.g. http://127.0.0.1:5000
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Request timeout in seconds (default: wait indefinitely)
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Output format: text or html
    #[arg(long, global = true)]
    format: Option<OutputFormat>,

    /// Write the HTML page to this file instead of stdout
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Insert server text into HTML without escaping
    #[arg(long, global = true)]
    raw_markup: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, Default)]
enum Command {
    /// Run one analysis and render the results (default)
    #[default]
    Analyze,
    /// Check that the analysis server is up
    Health,
}

impl Cli {
    /// Command line flags take precedence over environment configuration.
    fn apply(&self, config: &mut AppConfig) {
        if let Some(ref base_url) = self.base_url {
            config.client.base_url = base_url.clone();
        }
        if self.timeout_secs.is_some() {
            config.client.timeout_secs = self.timeout_secs;
        }
        if let Some(format) = self.format {
            config.view.format = format;
        }
        if self.output.is_some() {
            config.view.output = self.output.clone();
        }
        if self.raw_markup {
            config.view.markup = MarkupPolicy::Raw;
        }
    }
}

fn init_logging(config: &LoggingConfig) {
    let filter = config.env_filter();
    if config.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = AppConfig::load().context("loading configuration")?;
    cli.apply(&mut config);
    config.validate().context("validating configuration")?;

    init_logging(&config.logging);

    let service: Arc<dyn AnalysisService> = Arc::new(HttpAnalysisService::new(
        HttpServiceConfig::from(&config.client),
    )?);

    match cli.command.unwrap_or_default() {
        Command::Analyze => run_analyze(service, &config.view).await,
        Command::Health => run_health(service.as_ref()).await,
    }
}

async fn run_analyze(
    service: Arc<dyn AnalysisService>,
    view_config: &ViewConfig,
) -> anyhow::Result<ExitCode> {
    let outcome = match view_config.format {
        OutputFormat::Text => {
            let view: Arc<dyn AnalysisView> = Arc::new(TerminalView::stdout());
            AnalysisTrigger::new(service, view).activate().await
        }
        OutputFormat::Html => {
            let view = Arc::new(HtmlView::new(view_config.markup));
            let outcome = AnalysisTrigger::new(service, view.clone()).activate().await;

            match view_config.output {
                Some(ref path) => {
                    view.write_to(path)
                        .with_context(|| format!("writing {}", path.display()))?;
                    info!(path = %path.display(), "Wrote analysis page");
                }
                None => print!("{}", view.render_page()),
            }
            outcome
        }
    };

    Ok(exit_code(&outcome))
}

async fn run_health(service: &dyn AnalysisService) -> anyhow::Result<ExitCode> {
    match service.health().await {
        Ok(health) => {
            println!("Server status: {}", health.status);
            Ok(if health.is_healthy() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Err(err) => {
            println!("Request failed: {}", err);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn exit_code(outcome: &ActivationOutcome) -> ExitCode {
    if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
