//! Slash commands and file path handling shared by the TUI and stdio modes

use policychat_core::domain::{ModelTier, UploadFile};
use std::path::PathBuf;

pub const HELP_TEXT: &str = r#"Available commands:
  /help               - Show this help
  /upload [paths...]  - Upload PDF files (opens the upload dialog without paths)
  /files              - List documents uploaded in this session
  /remove N           - Forget uploaded document number N
  /library            - List documents the service has indexed
  /model open|closed  - Switch model tier
  /key                - Enter the API key for the closed tier
  /clear-error        - Dismiss the error banner
  /exit               - Exit chat"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    None,
    ShowHelp,
    Upload(Vec<String>),
    ListFiles,
    Remove(usize),
    InvalidRemove(String),
    Library,
    Model(ModelTier),
    InvalidModel(String),
    ApiKey,
    ClearError,
    Exit,
    Unknown(String),
}

/// Check if input is a command
pub fn is_command(input: &str) -> bool {
    input.starts_with('/') || input.starts_with(':')
}

/// Parse a command line. `/remove` takes the 1-based position shown by
/// `/files` and yields a 0-based index.
pub fn parse_command(input: &str) -> CommandResult {
    let cmd = input.trim().trim_start_matches(['/', ':']);
    let (name, rest) = match cmd.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (cmd, ""),
    };
    let name = name.to_ascii_lowercase();

    match name.as_str() {
        "" => CommandResult::None,

        "help" | "?" => CommandResult::ShowHelp,

        "upload" | "up" => CommandResult::Upload(split_paths(rest)),

        "files" | "uploads" => CommandResult::ListFiles,

        "remove" | "rm" => match rest.parse::<usize>() {
            Ok(n) if n > 0 => CommandResult::Remove(n - 1),
            _ => CommandResult::InvalidRemove(rest.to_string()),
        },

        "library" | "indexed" | "docs" => CommandResult::Library,

        "model" | "tier" => match ModelTier::parse(rest) {
            Some(tier) => CommandResult::Model(tier),
            None => CommandResult::InvalidModel(rest.to_string()),
        },

        "key" | "apikey" => CommandResult::ApiKey,

        "clear-error" | "dismiss" => CommandResult::ClearError,

        "exit" | "quit" | "bye" => CommandResult::Exit,

        _ => CommandResult::Unknown(name),
    }
}

/// Split a list of paths the way terminals paste dropped files: separated by
/// whitespace, with quotes or backslash escapes protecting embedded spaces.
pub fn split_paths(input: &str) -> Vec<String> {
    let mut paths = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some('\''), c) => current.push(c),
            (None, '\'' | '"') => quote = Some(c),
            (_, '\\') => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            (None, c) if c.is_whitespace() => {
                if !current.is_empty() {
                    paths.push(std::mem::take(&mut current));
                }
            }
            (_, c) => current.push(c),
        }
    }
    if !current.is_empty() {
        paths.push(current);
    }

    paths
        .into_iter()
        .map(|p| match p.strip_prefix("file://") {
            Some(stripped) => stripped.to_string(),
            None => p,
        })
        .collect()
}

pub fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).into_owned())
}

/// Read every path into an upload. The first unreadable path aborts.
pub async fn load_files(paths: &[String]) -> Result<Vec<UploadFile>, String> {
    let mut files = Vec::with_capacity(paths.len());
    for raw in paths {
        let path = expand_path(raw);
        let file = UploadFile::from_path(&path)
            .await
            .map_err(|err| format!("Could not read {}: {err}", path.display()))?;
        files.push(file);
    }
    Ok(files)
}
