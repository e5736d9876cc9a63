//! REPL command parsing.
//!
//! Bare text is search input; everything else is a slash command. Parsing
//! is lossless about intent: bad arguments come back as `Invalid` with the
//! message to show, so the main loop never has to second-guess.

use std::path::PathBuf;

/// Slash commands offered to completion and hints.
pub const COMMAND_NAMES: &[&str] = &[
    "/login",
    "/register",
    "/logout",
    "/select",
    "/pick",
    "/ai",
    "/reset-ai",
    "/generate",
    "/copy",
    "/download",
    "/upload",
    "/logs",
    "/show",
    "/help",
    "/quit",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Bare text: search input for the suggestion flow.
    Search(String),
    Login {
        username: Option<String>,
        password: Option<String>,
    },
    Register,
    Logout,
    /// Select autocomplete suggestion `n` (1-based).
    Select(usize),
    /// Select AI diagnosis `n` (1-based).
    Pick(usize),
    /// Submit symptom text to the AI assistant.
    Ai(String),
    ResetAi,
    Generate,
    Copy,
    Download,
    Upload(PathBuf),
    Logs,
    Show,
    Help,
    Quit,
    /// Unusable input, with the message to display.
    Invalid(String),
}

pub fn parse(line: &str) -> Command {
    let line = line.trim();
    if !line.starts_with('/') {
        return Command::Search(line.to_string());
    }

    let mut parts = line.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let rest = line[name.len()..].trim();

    match name {
        "/login" => {
            let username = parts.next().map(str::to_string);
            let password = parts.next().map(str::to_string);
            Command::Login { username, password }
        }
        "/register" => Command::Register,
        "/logout" => Command::Logout,
        "/select" => parse_index(rest, "/select <number>", Command::Select),
        "/pick" => parse_index(rest, "/pick <number>", Command::Pick),
        "/ai" => {
            // Validation of empty symptoms happens in the assistant flow so
            // the message matches the form's.
            Command::Ai(rest.to_string())
        }
        "/reset-ai" => Command::ResetAi,
        "/generate" => Command::Generate,
        "/copy" => Command::Copy,
        "/download" => Command::Download,
        "/upload" => {
            if rest.is_empty() {
                Command::Invalid("Usage: /upload <path-to-bundle.json>".to_string())
            } else {
                Command::Upload(PathBuf::from(rest))
            }
        }
        "/logs" => Command::Logs,
        "/show" => Command::Show,
        "/help" => Command::Help,
        "/quit" | "/exit" => Command::Quit,
        other => Command::Invalid(format!("Unknown command: {other}. Try /help.")),
    }
}

fn parse_index(rest: &str, usage: &str, build: fn(usize) -> Command) -> Command {
    match rest.parse::<usize>() {
        Ok(n) if n >= 1 => build(n),
        _ => Command::Invalid(format!("Usage: {usage}")),
    }
}
