//! Decision Matrix - command-line entry point
//!
//! ## Commands
//!
//! - `analyze`: Prompt for a decision (or load one), rank it and report
//! - `serve`: Run the HTTP API

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use decision_matrix::adapters::cli::{AnalyzeOptions, AnalyzeRunner, EXIT_STARTUP, EXIT_VALIDATION};
use decision_matrix::adapters::http::{app_router, AnalysisAppState};
use decision_matrix::adapters::{FileMatrixVault, JsonShapeValidator};
use decision_matrix::application::AnalyzeDecisionHandler;
use decision_matrix::config::AppConfig;
use decision_matrix::domain::analysis::SensitivityRange;

#[derive(Parser)]
#[command(name = "decision-matrix")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Weighted-sum decision analysis with sensitivity checks", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank a decision and show breakdown and sensitivity warnings
    Analyze(AnalyzeArgs),

    /// Serve the HTTP API
    Serve {
        /// Port to listen on (overrides configuration)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[derive(Args)]
struct AnalyzeArgs {
    /// Resume from a saved decision instead of prompting
    #[arg(short, long)]
    load: Option<PathBuf>,

    /// Save the validated decision (.json, .yaml or .yml)
    #[arg(short, long)]
    save: Option<PathBuf>,

    /// Relative weight change swept in each direction (e.g. 0.1 for ±10%)
    #[arg(long)]
    span: Option<f64>,

    /// Perturbation steps on each side of the current weights
    #[arg(long)]
    steps: Option<usize>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {:#}", e);
            return ExitCode::from(EXIT_STARTUP);
        }
    };

    let directive = match (&cli.command, cli.verbose) {
        (Commands::Serve { .. }, _) | (_, true) => config.server.log_level.clone(),
        _ => "warn".to_string(),
    };
    init_tracing(cli.json_logs, &directive);

    match cli.command {
        Commands::Analyze(args) => cmd_analyze(args, &config),
        Commands::Serve { port } => match cmd_serve(port, config).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!(error = %e, "Server failed");
                eprintln!("error: {:#}", e);
                ExitCode::from(EXIT_STARTUP)
            }
        },
    }
}

fn load_config() -> Result<AppConfig> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Logs go to stderr; stdout carries the report.
fn init_tracing(json: bool, directive: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn cmd_analyze(args: AnalyzeArgs, config: &AppConfig) -> ExitCode {
    let options = AnalyzeOptions {
        load: args.load,
        save: args.save,
        span: args.span.unwrap_or(config.analysis.sensitivity_span),
        steps: args.steps.unwrap_or(config.analysis.sensitivity_steps),
        json: args.json,
    };

    let runner = AnalyzeRunner::new(Arc::new(FileMatrixVault::new()));
    match runner.run(&options, io::stdin().lock(), io::stdout().lock(), io::stderr()) {
        Ok(status) => ExitCode::from(status),
        Err(e) => {
            error!(error = %e, "Terminal I/O failed");
            ExitCode::from(EXIT_VALIDATION)
        }
    }
}

async fn cmd_serve(port: Option<u16>, config: AppConfig) -> Result<()> {
    let mut server = config.server.clone();
    if let Some(port) = port {
        server.port = port;
    }
    let addr = server.socket_addr()?;

    let range = SensitivityRange::symmetric(
        config.analysis.sensitivity_span,
        config.analysis.sensitivity_steps,
    )?;
    let state = AnalysisAppState {
        validator: Arc::new(JsonShapeValidator::new(
            config.analysis.max_alternatives,
            config.analysis.max_criteria,
        )),
        handler: Arc::new(AnalyzeDecisionHandler::new(
            Arc::new(FileMatrixVault::new()),
            range,
        )),
        analysis: config.analysis.clone(),
        verbose_errors: config.features.verbose_errors,
    };
    let app = app_router(state, &server);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!(%addr, "Decision matrix API listening");

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
