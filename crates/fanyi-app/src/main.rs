use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use fanyi_config::Config;
use fanyi_translator::{DeepLTranslator, TranslationPipeline};

use tokio::signal;

pub mod commands;
pub mod controller;
pub mod display;
pub mod events;
pub mod io;
pub mod logging;
pub mod profile;
pub mod reload;
pub mod state;


use self::commands::TextOp;
use self::controller::AppController;
use self::events::pipeline_settings;
use self::state::AppState;

/// Grace period for tasks to wind down after Ctrl+C
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Parser, Debug)]
#[command(name = "fanyi", version, about = "Clipboard translation helper")]
struct Cli {
    /// Debug-level logging unless RUST_LOG is set
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Log as JSON
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Watch the clipboard and external calls, translating new text
    Run {
        /// JSON profile, defaults to $FANYI_PROFILE
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Run a single text operation
    Text {
        #[command(subcommand)]
        op: TextOp,
    },
    /// Check whether REMOTE is newer than the local version
    Upgrade {
        remote: String,
        #[arg(long, default_value = env!("CARGO_PKG_VERSION"))]
        local: String,
    },
    /// Write a profile with default settings
    InitProfile {
        path: PathBuf,
        #[arg(long, default_value = "main")]
        name: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Err(e) = dotenvy::dotenv() {
        // a missing .env is the normal case
        if !e.not_found() {
            eprintln!("Failed to load .env: {e}");
        }
    }
    logging::init(cli.verbose, cli.json)?;

    match cli.command.unwrap_or(Command::Run { config: None }) {
        Command::Run { config } => {
            let profile_path = profile::resolve_profile_path(config.as_deref());
            let config = profile::load_config(profile_path.as_deref())?;
            run(config, profile_path).await
        }
        Command::Text { op } => {
            println!("{}", commands::run_text(&op)?);
            Ok(())
        }
        Command::Upgrade { remote, local } => {
            println!("{}", commands::run_upgrade(&remote, &local)?);
            Ok(())
        }
        Command::InitProfile { path, name } => profile::init_profile(&path, &name),
    }
}

async fn run(config: Config, profile_path: Option<PathBuf>) -> anyhow::Result<()> {
    config.validate()?;

    let pipeline = build_pipeline(&config)?;
    let state = Arc::new(AppState::new(config).with_profile_path(profile_path));
    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks(pipeline);

    tokio::select! {
        result = signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::error!("Failed to listen for Ctrl+C: {e}");
            }
            tracing::info!("Shutdown requested");
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::warn!("Task exited early"),
                Ok(Err(e)) => tracing::error!("Task failed: {e:#}"),
                Err(e) => tracing::error!("Task panicked: {e}"),
            }
        }
    }

    controller.shutdown();

    let drain = async {
        while let Some(result) = tasks.join_next().await {
            match result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => tracing::warn!("Task ended with error: {e:#}"),
                Err(e) => tracing::warn!("Task join error: {e}"),
            }
        }
    };
    if tokio::time::timeout(SHUTDOWN_TIMEOUT, drain).await.is_err() {
        tracing::warn!("Tasks did not stop in time, aborting");
        tasks.shutdown().await;
    }

    Ok(())
}

fn build_pipeline(config: &Config) -> anyhow::Result<Option<Arc<TranslationPipeline>>> {
    if !config.translator.is_usable() {
        return Ok(None);
    }

    let translator = DeepLTranslator::new(
        config.translator.api_key.clone(),
        config.translator.api_url.clone(),
        Duration::from_secs(config.timeout_seconds),
    )?;
    tracing::info!("Using translator: {}", config.translator.provider);

    Ok(Some(Arc::new(TranslationPipeline::new(
        Box::new(translator),
        pipeline_settings(&config.text),
    ))))
}
