//! newsforge - layout fingerprint extraction and template synthesis
//!
//! Main entry point for the newsforge CLI.

mod app;
mod cli;
mod cmd_extract;
mod cmd_template;

use clap::Parser;
use tracing::{info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use newsforge_config::{Config, ConfigLoader, ConfigValidator, LoggingConfig};

use crate::app::App;
use crate::cli::{Cli, Commands};

fn init_tracing(logging: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = logging.dir();
    std::fs::create_dir_all(&log_dir)?;

    // Daily rotation, keep two weeks
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("newsforge")
        .filename_suffix("log")
        .max_log_files(14)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Flushes the file writer on exit
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        // Console layer on stderr; stdout carries command output
        .with(
            fmt::layer()
                .with_target(true)
                .with_ansi(true)
                .with_writer(std::io::stderr),
        )
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

fn validate_config(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let validation = ConfigValidator::validate(config);
    for warning in &validation.warnings {
        warn!("Config {}: {}", warning.path, warning.message);
    }
    if !validation.is_valid() {
        let errors: Vec<String> = validation.errors.iter().map(|e| e.to_string()).collect();
        return Err(format!("Invalid configuration: {}", errors.join("; ")).into());
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = ConfigLoader::load_or_default(&cli.config)?;
    init_tracing(&config.logging)?;
    validate_config(&config)?;
    info!("Loaded configuration from {:?}", cli.config);

    let app = App::new(&config);
    let result = match cli.command {
        Commands::Extract { url, name, brand } => {
            cmd_extract::extract(&app, &url, &name, brand.as_deref()).await
        }
        Commands::Fingerprint { url, with_preview } => {
            cmd_extract::fingerprint(&app, &url, with_preview).await
        }
        Commands::Templates { action } => {
            cmd_template::handle_template_command(&app, action).await
        }
        Commands::Render {
            template_id,
            title,
            body,
        } => cmd_template::render(&app, &template_id, &title, &body).await,
        Commands::Synthesize { metadata } => cmd_extract::synthesize_file(&metadata).await,
    };

    app.shutdown().await;
    result
}
