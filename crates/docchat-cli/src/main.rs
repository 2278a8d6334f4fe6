//! docchat REPL - upload documents and chat about them from the terminal.

use std::borrow::Cow::{self, Borrowed, Owned};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use tracing_subscriber::EnvFilter;

use docchat_client::{BackendConfig, HttpBackend};
use docchat_core::session::{ChatMessage, MessageRole, SessionController};
use docchat_core::FilePayload;

mod export;
mod prefs;

use prefs::{Preferences, Theme};

const COMMANDS: &[&str] = &[
    "/load", "/files", "/use", "/drop", "/export", "/theme", "/help", "/quit",
];

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = BackendConfig::load().map_err(|err| anyhow::anyhow!(err.to_string()))?;
    let backend = Arc::new(HttpBackend::from_config(&config));
    let controller = SessionController::new(backend);
    let mut preferences = Preferences::load();

    println!("{}", "docchat - chat with your documents".bold());
    println!("Backend: {}", config.base_url);
    println!("Type /help for commands, /quit to exit.\n");

    let mut rl: Editor<CliHelper, rustyline::history::DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    // Transcript entries already shown; everything past this index is new
    let mut seen = 0usize;

    loop {
        match rl.readline(&prompt(preferences.theme)) {
            Ok(line) => {
                let line = line.trim().to_string();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                if line == "/quit" || line == "/exit" {
                    break;
                }
                if !dispatch(&controller, &mut preferences, &line).await {
                    continue;
                }
                print_new_messages(&controller, &mut seen, preferences.theme).await;
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("Input error: {err}");
                break;
            }
        }
    }

    Ok(())
}

fn prompt(theme: Theme) -> String {
    match theme {
        Theme::Light => "you> ".to_string(),
        Theme::Dark => "you> ".bright_white().to_string(),
    }
}

/// Handles one line of input. Returns whether the transcript may have grown.
async fn dispatch(
    controller: &SessionController,
    preferences: &mut Preferences,
    line: &str,
) -> bool {
    let (command, rest) = match line.split_once(' ') {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (line, ""),
    };

    match command {
        "/help" => {
            print_help();
            false
        }
        "/load" => {
            if rest.is_empty() {
                println!("Usage: /load <path> [<path>...]");
                return false;
            }
            let payloads = match read_payloads(rest) {
                Ok(payloads) => payloads,
                Err(err) => {
                    println!("{}", err.to_string().red());
                    return false;
                }
            };
            // Results land in the transcript; ordering is the controller's job
            let _ = controller.upload_batch(payloads).await;
            true
        }
        "/files" => {
            list_files(controller).await;
            false
        }
        "/use" => {
            if rest.is_empty() {
                println!("Usage: /use <file-id>");
                return false;
            }
            if !controller.select_active(rest).await {
                println!("No such file: {rest}");
                return false;
            }
            true
        }
        "/drop" => {
            if rest.is_empty() {
                println!("Usage: /drop <file-id>");
                return false;
            }
            let _ = controller.delete_file(rest).await;
            true
        }
        "/export" => {
            if rest.is_empty() {
                println!("Usage: /export <path>");
                return false;
            }
            let messages = controller.messages().await;
            match export::write_html(Path::new(rest), &messages, preferences.theme) {
                Ok(()) => println!("Transcript written to {rest}"),
                Err(err) => println!("{}", format!("Export failed: {err}").red()),
            }
            false
        }
        "/theme" => {
            preferences.theme = preferences.theme.toggled();
            if let Err(err) = preferences.save() {
                println!("Could not persist theme preference: {err}");
            }
            println!("Theme: {}", preferences.theme.label());
            false
        }
        _ if command.starts_with('/') => {
            println!("Unknown command: {command}. Type /help for commands.");
            false
        }
        _ => {
            // Anything else is a question for the active document
            let _ = controller.ask(line).await;
            true
        }
    }
}

fn read_payloads(args: &str) -> Result<Vec<FilePayload>> {
    let mut payloads = Vec::new();
    for arg in args.split_whitespace() {
        let path = PathBuf::from(arg);
        let bytes = fs::read(&path).with_context(|| format!("Cannot read {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| arg.to_string());
        payloads.push(FilePayload::new(name, bytes));
    }
    Ok(payloads)
}

async fn list_files(controller: &SessionController) {
    let files = controller.files().await;
    if files.is_empty() {
        println!("No files uploaded yet. Use /load <path>.");
        return;
    }
    let active = controller.active_file().await.map(|f| f.id);
    for file in files {
        let marker = if active.as_deref() == Some(file.id.as_str()) {
            "*"
        } else {
            " "
        };
        println!("{marker} {}  {}", file.id, file.name);
    }
}

async fn print_new_messages(controller: &SessionController, seen: &mut usize, theme: Theme) {
    let messages = controller.messages().await;
    for message in &messages[*seen..] {
        println!("{}", render_message(message, theme));
    }
    *seen = messages.len();
}

fn render_message(message: &ChatMessage, theme: Theme) -> String {
    match message.role {
        MessageRole::User => {
            let prefix = "you ".blue();
            format!("{prefix} {}", message.text)
        }
        MessageRole::Assistant => {
            let prefix = match theme {
                Theme::Light => "chat".green(),
                Theme::Dark => "chat".bright_green(),
            };
            format!("{prefix} {}", message.text)
        }
    }
}

fn print_help() {
    println!("Commands:");
    println!("  /load <path> [<path>...]  upload one or more documents");
    println!("  /files                    list uploaded files (* marks the active one)");
    println!("  /use <file-id>            scope questions to this file");
    println!("  /drop <file-id>           delete a file from the backend");
    println!("  /export <path>            write the transcript as HTML");
    println!("  /theme                    toggle light/dark theme");
    println!("  /quit                     exit");
    println!("Anything else is sent as a question about the active file.");
}
