//! Line-oriented chat on stdin/stdout
//!
//! Plain lines are questions; lines starting with `/` or `:` are the same
//! commands the TUI accepts. The session store is shared with the dispatchers
//! exactly as in the TUI, only the rendering differs.

use crate::commands::{CommandResult, HELP_TEXT, is_command, load_files, parse_command};
use policychat_core::domain::ModelTier;
use policychat_core::{PolicyBackend, PolicyChat};
use thiserror::Error;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Lines};
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum StdioError {
    #[error("stdin/stdout I/O error: {0}")]
    Io(#[from] std::io::Error),
}

enum LoopControl {
    Continue,
    Exit,
}

pub async fn run<B>(chat: PolicyChat<B>) -> Result<(), StdioError>
where
    B: PolicyBackend + 'static,
{
    run_with(chat, BufReader::new(io::stdin()), io::stdout()).await
}

/// Drive the REPL over any line source and sink.
pub async fn run_with<B, R, W>(chat: PolicyChat<B>, reader: R, mut stdout: W) -> Result<(), StdioError>
where
    B: PolicyBackend + 'static,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();

    write_line(&mut stdout, "PolicyChat - ask about your organization's policies").await?;
    write_line(&mut stdout, "Type /help for commands.\n").await?;

    let (needs_tier, needs_key) = {
        let session = chat.session();
        let state = session.lock().await;
        (state.model_tier().is_none(), state.is_api_key_prompt_visible())
    };
    if needs_tier {
        if !choose_tier(&chat, &mut lines, &mut stdout).await? {
            return Ok(());
        }
    } else if needs_key {
        read_api_key(&chat, &mut lines, &mut stdout).await?;
    }

    loop {
        prompt(&mut stdout, &chat).await?;
        let Some(line) = lines.next_line().await? else {
            write_line(&mut stdout, "\nInput closed. Leaving PolicyChat.").await?;
            break;
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        if is_command(input) {
            match handle_command(input, &chat, &mut lines, &mut stdout).await? {
                LoopControl::Continue => continue,
                LoopControl::Exit => break,
            }
        } else {
            handle_question(&chat, input, &mut stdout).await?;
        }
    }

    stdout.flush().await?;
    Ok(())
}

async fn prompt<B, W>(stdout: &mut W, chat: &PolicyChat<B>) -> Result<(), StdioError>
where
    B: PolicyBackend + 'static,
    W: AsyncWrite + Unpin,
{
    let tier = chat
        .session()
        .lock()
        .await
        .model_tier()
        .map(ModelTier::as_str)
        .unwrap_or("none");
    stdout.write_all(format!("\n[{tier}] > ").as_bytes()).await?;
    stdout.flush().await?;
    Ok(())
}

/// Ask for a tier until one is given. Returns false when input closed.
async fn choose_tier<B, R, W>(
    chat: &PolicyChat<B>,
    lines: &mut Lines<R>,
    stdout: &mut W,
) -> Result<bool, StdioError>
where
    B: PolicyBackend + 'static,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    loop {
        stdout.write_all(b"Choose a model [open/closed]: ").await?;
        stdout.flush().await?;
        let Some(line) = lines.next_line().await? else {
            return Ok(false);
        };
        match ModelTier::parse(&line) {
            Some(tier) => {
                select_tier(chat, tier, lines, stdout).await?;
                return Ok(true);
            }
            None => write_line(stdout, "Please answer 'open' or 'closed'.").await?,
        }
    }
}

async fn select_tier<B, R, W>(
    chat: &PolicyChat<B>,
    tier: ModelTier,
    lines: &mut Lines<R>,
    stdout: &mut W,
) -> Result<(), StdioError>
where
    B: PolicyBackend + 'static,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let needs_key = {
        let session = chat.session();
        let mut state = session.lock().await;
        state.select_model(tier);
        let needs_key = state.is_api_key_prompt_visible() && state.api_key().is_none();
        if !needs_key {
            state.confirm_api_key();
        }
        needs_key
    };
    write_line(stdout, &format!("Model: {tier}")).await?;
    if needs_key {
        read_api_key(chat, lines, stdout).await?;
    }
    Ok(())
}

async fn read_api_key<B, R, W>(
    chat: &PolicyChat<B>,
    lines: &mut Lines<R>,
    stdout: &mut W,
) -> Result<(), StdioError>
where
    B: PolicyBackend + 'static,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    stdout.write_all(b"API key: ").await?;
    stdout.flush().await?;
    let key = lines.next_line().await?.unwrap_or_default();

    let session = chat.session();
    let mut state = session.lock().await;
    state.set_api_key(key.trim());
    state.confirm_api_key();
    let message = if state.api_key().is_some() {
        "API key saved for this session."
    } else {
        "No API key set; questions go out unauthenticated."
    };
    drop(state);
    write_line(stdout, message).await
}

async fn handle_question<B, W>(chat: &PolicyChat<B>, question: &str, stdout: &mut W) -> Result<(), StdioError>
where
    B: PolicyBackend + 'static,
    W: AsyncWrite + Unpin,
{
    info!("Processing STDIO question");
    write_line(stdout, "Thinking...").await?;
    match chat.submit_query(question).await {
        Some(Ok(answer)) => {
            write_line(stdout, "\nAI:").await?;
            write_line(stdout, &answer).await?;
        }
        Some(Err(err)) => {
            let text = chat
                .session()
                .lock()
                .await
                .last_error()
                .unwrap_or_default()
                .to_string();
            write_line(stdout, &format!("\nSystem: {text}")).await?;
            write_line(stdout, &format!("({})", err.user_message())).await?;
        }
        None => write_line(stdout, "A question is already pending.").await?,
    }
    Ok(())
}

async fn handle_command<B, R, W>(
    input: &str,
    chat: &PolicyChat<B>,
    lines: &mut Lines<R>,
    stdout: &mut W,
) -> Result<LoopControl, StdioError>
where
    B: PolicyBackend + 'static,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let result = parse_command(input);
    debug!(?result, "Processing STDIO command");
    let session = chat.session();

    match result {
        CommandResult::None => {}

        CommandResult::ShowHelp => write_line(stdout, HELP_TEXT).await?,

        CommandResult::Upload(paths) if paths.is_empty() => {
            write_line(stdout, "Usage: /upload <file.pdf> [more.pdf ...]").await?;
        }

        CommandResult::Upload(paths) => {
            let files = match load_files(&paths).await {
                Ok(files) => files,
                Err(message) => {
                    write_line(stdout, &message).await?;
                    return Ok(LoopControl::Continue);
                }
            };
            write_line(stdout, &format!("Uploading {} file(s)...", files.len())).await?;
            match chat.submit_upload(files).await {
                Some(Ok(records)) => {
                    for record in records {
                        write_line(stdout, &format!("✓ {} - {}", record.name, record.message)).await?;
                    }
                }
                Some(Err(failure)) => write_line(stdout, &failure.to_string()).await?,
                None => write_line(stdout, "Another upload is still running.").await?,
            }
        }

        CommandResult::ListFiles => {
            let listing: Vec<String> = session
                .lock()
                .await
                .uploaded_files()
                .iter()
                .enumerate()
                .map(|(i, f)| format!("{}. {} - {}", i + 1, f.name, f.message))
                .collect();
            if listing.is_empty() {
                write_line(stdout, "No documents uploaded in this session.").await?;
            } else {
                write_line(stdout, &listing.join("\n")).await?;
            }
        }

        CommandResult::Remove(index) => {
            let removed = session.lock().await.remove_uploaded_file(index);
            match removed {
                Some(record) => write_line(stdout, &format!("Removed {}", record.name)).await?,
                None => write_line(stdout, &format!("No uploaded document number {}", index + 1)).await?,
            }
        }

        CommandResult::InvalidRemove(arg) => {
            write_line(stdout, &format!("Usage: /remove N (got '{arg}')")).await?;
        }

        CommandResult::Library => match chat.refresh_indexed_files().await {
            Ok(0) => write_line(stdout, "The service has no indexed documents.").await?,
            Ok(_) => {
                let listing: Vec<String> = session
                    .lock()
                    .await
                    .indexed_files()
                    .iter()
                    .map(|f| format!("• {} ({} chunks)", f.filename, f.chunk_count))
                    .collect();
                write_line(stdout, &listing.join("\n")).await?;
            }
            Err(err) => {
                write_line(stdout, &format!("Could not load indexed documents: {}", err.user_message())).await?;
            }
        },

        CommandResult::Model(tier) => select_tier(chat, tier, lines, stdout).await?,

        CommandResult::InvalidModel(arg) => {
            write_line(stdout, &format!("Unknown model '{arg}'. Use /model open or /model closed")).await?;
        }

        CommandResult::ApiKey => {
            let requested = session.lock().await.request_api_key();
            if requested {
                read_api_key(chat, lines, stdout).await?;
            } else {
                write_line(stdout, "The open model does not use an API key.").await?;
            }
        }

        CommandResult::ClearError => {
            session.lock().await.dismiss_error();
            write_line(stdout, "Error cleared.").await?;
        }

        CommandResult::Exit => {
            write_line(stdout, "Goodbye.").await?;
            return Ok(LoopControl::Exit);
        }

        CommandResult::Unknown(cmd) => {
            write_line(stdout, &format!("Unknown command '{cmd}'. Type /help for available commands.")).await?;
        }
    }

    Ok(LoopControl::Continue)
}

async fn write_line<W: AsyncWrite + Unpin>(stdout: &mut W, text: &str) -> Result<(), StdioError> {
    stdout.write_all(text.as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await?;
    Ok(())
}
