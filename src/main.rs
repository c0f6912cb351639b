//! make3dBrain: turn a DICOM series, NIFTI volume, or FreeSurfer pial
//! surfaces into a pair of 3D-printable STL hemispheres.
//!
//! Main entry point that wires configuration, logging, signal handling and
//! the conversion pipeline together.

use std::path::PathBuf;

use clap::Parser;
use clap::error::ErrorKind as ClapErrorKind;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{EnvFilter, fmt};

use brainmesh_core::config::AppConfig;
use brainmesh_core::config::logging::LogFormat;
use brainmesh_core::error::AppError;
use brainmesh_core::types::JobParams;
use brainmesh_pipeline::{Backends, CompletionMessage, Orchestrator, Toolchain};

mod cli;
mod output;

use cli::Cli;
use output::RunSummary;

/// Names a configuration file when `--config` is not given.
const CONFIG_ENV: &str = "MAKE3DBRAIN_CONFIG";

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => e.exit(),
            _ => {
                let _ = e.print();
                std::process::exit(1);
            }
        },
    };

    let config = match load_configuration(&cli) {
        Ok(c) => c,
        Err(e) => {
            output::print_error(&format!("Failed to load configuration: {}", e));
            std::process::exit(1);
        }
    };

    init_logging(&config, cli.verbose);

    if let Err(e) = run(cli, config).await {
        tracing::error!(kind = %e.kind, "{}", e.message);
        output::print_error(&e.to_string());
        std::process::exit(e.exit_code());
    }
}

/// Load configuration from the optional file and the environment
fn load_configuration(cli: &Cli) -> Result<AppConfig, AppError> {
    let path = cli
        .config
        .clone()
        .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

    AppConfig::load(path.as_deref())
}

/// Initialize tracing on stderr
fn init_logging(config: &AppConfig, verbose: bool) {
    let level = if verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match config.logging.format {
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Pretty => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

/// Validate arguments, run the conversion, and print the summary
async fn run(cli: Cli, config: AppConfig) -> Result<(), AppError> {
    let job = JobParams::new(
        &cli.input,
        &cli.dest,
        &cli.filename,
        cli.email.as_deref(),
    )?;

    tracing::info!(
        "Starting make3dBrain v{} for '{}'",
        env!("CARGO_PKG_VERSION"),
        job.filename
    );

    let toolchain = Toolchain::new(config.tools.clone());
    let backends = Backends::external(&toolchain, &config);
    let orchestrator = Orchestrator::new(config, backends).with_preflight(toolchain);

    let cancel = CancellationToken::new();
    tokio::spawn(cancel_on_signal(cancel.clone()));

    let report = orchestrator.run(&job, cancel).await?;

    let summary = RunSummary {
        report: &report,
        instructions: job
            .email
            .is_none()
            .then(|| CompletionMessage::instructions(&report)),
    };
    output::print_summary(&summary, cli.format);

    Ok(())
}

/// Cancel `token` on Ctrl+C or SIGTERM
async fn cancel_on_signal(token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::warn!("Interrupt received, stopping after the running stage is killed");
    token.cancel();
}
