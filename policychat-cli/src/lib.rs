//! PolicyChat front ends: the ratatui chat screen and the stdio REPL

pub mod cli;
pub mod commands;
pub mod stdio;
pub mod tui;

pub use cli::{Cli, RunMode};

use policychat_core::{AppConfig, DispatchOptions, HttpBackend, PolicyChat};
use std::error::Error;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt};
use tui::screens::chat::{ChatResult, run_chat};

pub async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let quiet_mode = cli.mode == RunMode::Tui && cli.log_file.is_none();
    init_tracing(quiet_mode, cli.log_file.as_deref())?;
    info!("Starting policychat");
    debug!(mode = ?cli.mode, config = ?cli.config, "CLI arguments parsed");

    let config = load_config(&cli)?;
    let backend = HttpBackend::from_config(&config)?;
    let chat = PolicyChat::new(backend, DispatchOptions::from(&config));
    preselect(&chat, &cli, &config).await;

    info!(mode = ?cli.mode, base_url = %config.base_url, "Running client in selected mode");
    match cli.mode {
        RunMode::Tui => match run_chat(chat, config.base_url.clone()).await? {
            ChatResult::Exit => {}
            ChatResult::Error(message) => eprintln!("Chat error: {message}"),
        },
        RunMode::Stdio => {
            stdio::run(chat).await?;
        }
    }
    info!("Client execution finished");
    Ok(())
}

/// File config, then environment, then CLI flags.
fn load_config(cli: &Cli) -> Result<AppConfig, Box<dyn Error>> {
    let config_path = cli.config.as_deref().map(Path::new);
    let mut config = AppConfig::load(config_path)?;
    if let Some(path) = config_path {
        info!(path = %path.display(), "Loaded configuration from file");
    } else {
        info!("Loaded configuration from default path");
    }

    if let Some(base_url) = cli.base_url.as_deref() {
        info!(url = base_url, "Overriding backend URL based on CLI flag");
        config = config.with_base_url(base_url)?;
    }
    Ok(config)
}

/// Apply the tier and key given up front so the user is not asked again.
async fn preselect<B>(chat: &PolicyChat<B>, cli: &Cli, config: &AppConfig)
where
    B: policychat_core::PolicyBackend + 'static,
{
    let session = chat.session();
    let mut state = session.lock().await;

    if let Some(key) = cli.api_key.clone().or_else(|| config.resolve_api_key()) {
        state.set_api_key(key);
    }
    if let Some(tier) = cli.tier.or(config.default_tier) {
        state.select_model(tier);
        if state.api_key().is_some() {
            state.confirm_api_key();
        }
    }
}

fn init_tracing(quiet: bool, log_file: Option<&Path>) -> std::io::Result<()> {
    static INIT: std::sync::Once = std::sync::Once::new();
    let writer = log_file.map(File::create).transpose()?;

    INIT.call_once(|| {
        let filter = if quiet {
            EnvFilter::new("off")
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
        };
        let builder = fmt().with_env_filter(filter).with_target(false).with_level(true);
        match writer {
            Some(file) => builder.with_ansi(false).with_writer(Mutex::new(file)).init(),
            None => builder.with_writer(std::io::stderr).init(),
        }
    });
    Ok(())
}
