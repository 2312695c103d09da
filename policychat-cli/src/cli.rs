use clap::{Parser, ValueEnum};
use policychat_core::domain::ModelTier;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "policychat",
    version,
    about = "Ask questions about your organization's policy documents"
)]
pub struct Cli {
    /// Configuration file path (defaults to config/policychat.toml)
    #[arg(long, short)]
    pub config: Option<String>,
    /// Backend base URL, overriding the config file and POLICYCHAT_BASE_URL
    #[arg(long)]
    pub base_url: Option<String>,
    #[arg(long, short, value_enum, default_value_t = RunMode::Tui)]
    pub mode: RunMode,
    /// Preselect the model tier and skip the selector
    #[arg(long, value_parser = parse_tier)]
    pub tier: Option<ModelTier>,
    /// API key for the closed tier (otherwise read from `api_key_env`)
    #[arg(long)]
    pub api_key: Option<String>,
    /// Write logs to this file (the TUI is otherwise silent)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum RunMode {
    /// Full-screen terminal interface
    Tui,
    /// Line-oriented chat on stdin/stdout
    Stdio,
}

fn parse_tier(value: &str) -> Result<ModelTier, String> {
    ModelTier::parse(value).ok_or_else(|| format!("unknown model tier '{value}' (expected open or closed)"))
}
