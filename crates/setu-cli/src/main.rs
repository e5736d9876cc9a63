use std::borrow::Cow::{self, Borrowed, Owned};
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::Editor;
use rustyline::{Context, Helper};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};
use tracing_subscriber::EnvFilter;

use setu_application::{
    AssistantService, ConditionService, FlowEvent, SessionService, SuggestionService,
    TranslationService, Workbench,
};
use setu_client::{ApiClient, ClientConfig};
use setu_core::auth::{Credentials, Registration};
use setu_core::terminology::TerminologyApi;
use setu_core::SetuError;
use setu_infrastructure::TokenStorage;

mod commands;
mod render;

use commands::{Command, COMMAND_NAMES};

/// Terminal client for the NAMASTE ↔ ICD-11 terminology service.
#[derive(Parser)]
#[command(name = "setu", version, about)]
struct Args {
    /// Base URL of the terminology service (overrides SETU_BASE_URL and
    /// ~/.config/setu/config.toml)
    #[arg(long)]
    base_url: Option<String>,

    /// Debug-level logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: COMMAND_NAMES.iter().map(|name| name.to_string()).collect(),
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

fn lock(workbench: &Arc<Mutex<Workbench>>) -> MutexGuard<'_, Workbench> {
    workbench.lock().unwrap_or_else(|e| e.into_inner())
}

/// Drains flow events: folds each into the workbench, then renders it.
async fn handle_events(
    mut events: UnboundedReceiver<FlowEvent>,
    workbench: Arc<Mutex<Workbench>>,
    session: Arc<SessionService>,
    client: Arc<ApiClient>,
) {
    while let Some(event) = events.recv().await {
        lock(&workbench).apply(&event);
        match &event {
            FlowEvent::SuggestionsCleared => {}
            FlowEvent::Suggestions(list) => render::suggestions(list),
            FlowEvent::TranslationStarted(selected) => {
                render::notice(&format!("Translating {} ...", selected.display));
            }
            FlowEvent::TranslationReady(pair) => {
                let selected = lock(&workbench).selected.clone();
                render::translation(selected.as_ref(), pair);
            }
            FlowEvent::JobCreated { job_id, status } => {
                render::notice(&format!(
                    "AI job {job_id} accepted ({status}). Polling for the result..."
                ));
            }
            FlowEvent::JobStatusChanged { status, attempt } => {
                render::job_status(&status.to_string(), *attempt);
            }
            FlowEvent::DiagnosesReady(list) => render::diagnoses(list),
            FlowEvent::AssistantFailed(reason) => render::error(reason),
            FlowEvent::AssistantExhausted => {
                render::error("The AI job did not resolve in time; giving up. Use /ai to retry.");
            }
            FlowEvent::SessionExpired => {
                if let Err(err) = session.logout() {
                    tracing::warn!(%err, "failed to clear the stored token");
                }
                client.set_token(None);
                lock(&workbench).reset();
                render::error("Session expired. Please log in again.");
            }
        }
    }
}

/// The main entry point for the Setu REPL.
///
/// Sets up the API client and flow services, restores a persisted session,
/// and runs a rustyline loop. Asynchronous results (suggestions,
/// translations, AI polling) arrive on an mpsc channel drained by a
/// background task, so the prompt stays responsive while flows run.
#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if args.verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // ===== Backend Initialization =====
    let config = ClientConfig::resolve(args.base_url);
    let client = Arc::new(ApiClient::new(config.base_url.clone()));
    let session = Arc::new(SessionService::new(client.clone(), TokenStorage::new()?));

    // A present token file restores the authenticated view across restarts.
    match session.restore() {
        Ok(Some(token)) => {
            client.set_token(Some(token));
            render::success("Restored previous session.");
        }
        Ok(None) => {}
        Err(err) => tracing::warn!(%err, "could not read the stored token"),
    }

    let (event_tx, event_rx) = unbounded_channel::<FlowEvent>();
    let terminology: Arc<dyn TerminologyApi> = client.clone();
    let suggest = Arc::new(SuggestionService::new(terminology.clone(), event_tx.clone()));
    let translate = Arc::new(TranslationService::new(terminology, event_tx.clone()));
    let assistant = Arc::new(AssistantService::new(client.clone(), event_tx.clone()));
    let condition = Arc::new(ConditionService::new(client.clone(), client.clone()));
    drop(event_tx);

    let workbench = Arc::new(Mutex::new(Workbench::new()));

    // Spawn the event drain so results print while the prompt is open.
    let event_task = tokio::spawn(handle_events(
        event_rx,
        workbench.clone(),
        session.clone(),
        client.clone(),
    ));

    // ===== REPL Setup =====
    let helper = CliHelper::new();
    let mut rl = Editor::new()?;
    rl.set_helper(Some(helper));

    render::banner(client.base_url());

    // ===== Main REPL Loop =====
    loop {
        let readline = rl.readline("setu> ");

        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                let command = commands::parse(trimmed);
                let authenticated = client.has_token();

                let needs_auth = matches!(
                    command,
                    Command::Search(_)
                        | Command::Select(_)
                        | Command::Pick(_)
                        | Command::Ai(_)
                        | Command::ResetAi
                        | Command::Generate
                        | Command::Copy
                        | Command::Download
                        | Command::Upload(_)
                        | Command::Logs
                        | Command::Show
                        | Command::Logout
                );
                if needs_auth && !authenticated {
                    render::error("Please /login first (or /register).");
                    continue;
                }

                match command {
                    Command::Help => render::help(authenticated),
                    Command::Quit => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    Command::Invalid(message) => render::error(&message),

                    Command::Login { username, password } => {
                        if authenticated {
                            render::notice("Already logged in. /logout first.");
                            continue;
                        }
                        login(&mut rl, &session, &client, &workbench, username, password).await;
                    }
                    Command::Register => {
                        if authenticated {
                            render::notice("Already logged in. /logout first.");
                            continue;
                        }
                        register(&mut rl, &session, &workbench).await;
                    }
                    Command::Logout => {
                        assistant.reset().await;
                        if let Err(err) = session.logout() {
                            tracing::warn!(%err, "failed to clear the stored token");
                        }
                        client.set_token(None);
                        lock(&workbench).reset();
                        render::success("Logged out.");
                    }

                    Command::Search(term) => {
                        lock(&workbench).search_term = term.clone();
                        suggest.input_changed(&term).await;
                    }
                    Command::Select(n) => {
                        let suggestion = lock(&workbench).suggestions.get(n - 1).cloned();
                        match suggestion {
                            Some(suggestion) => translate.select(suggestion.as_concept()),
                            None => render::error(&format!("No suggestion {n}.")),
                        }
                    }
                    Command::Pick(n) => {
                        let diagnosis = lock(&workbench).diagnoses.get(n - 1).cloned();
                        match diagnosis {
                            Some(diagnosis) => translate.select(diagnosis.as_concept()),
                            None => render::error(&format!("No AI diagnosis {n}.")),
                        }
                    }

                    Command::Ai(symptoms) => match assistant.submit(&symptoms).await {
                        Ok(()) => {}
                        Err(err) if err.is_validation() => render::error(&err.to_string()),
                        Err(err) => {
                            tracing::debug!(%err, "job creation failed");
                            render::error("Failed to start AI diagnosis job.");
                        }
                    },
                    Command::ResetAi => {
                        assistant.reset().await;
                        lock(&workbench).reset_assistant();
                        render::notice("Assistant reset. Enter /ai <symptoms> for a new analysis.");
                    }

                    Command::Generate => {
                        let (selected, pair) = {
                            let state = lock(&workbench);
                            (state.selected.clone(), state.translation.clone())
                        };
                        match condition.generate(selected.as_ref(), pair.as_ref()).await {
                            Ok(Some(record)) => {
                                render::record(&record);
                                lock(&workbench).record = Some(record);
                            }
                            Ok(None) => render::notice(
                                "Nothing to generate: select a term and wait for a real translation.",
                            ),
                            Err(err) => {
                                tracing::debug!(%err, "generation failed");
                                render::error(&format!("Error generating FHIR record: {err}"));
                            }
                        }
                    }
                    Command::Copy => {
                        let record = lock(&workbench).record.clone();
                        match record {
                            Some(record) => match record.to_pretty_json() {
                                // Plain, uncolored output so it pastes cleanly.
                                Ok(text) => println!("{text}"),
                                Err(err) => render::error(&err.to_string()),
                            },
                            None => render::notice("No record yet. /generate first."),
                        }
                    }
                    Command::Download => {
                        let record = lock(&workbench).record.clone();
                        match record {
                            Some(record) => {
                                let result = std::env::current_dir()
                                    .map_err(SetuError::from)
                                    .and_then(|dir| condition.save_download(&record, &dir));
                                match result {
                                    Ok(path) => render::success(&format!(
                                        "Saved {}.",
                                        path.display()
                                    )),
                                    Err(err) => {
                                        render::error(&format!("Could not save the record: {err}"))
                                    }
                                }
                            }
                            None => render::notice("No record yet. /generate first."),
                        }
                    }

                    Command::Upload(path) => match condition.upload_bundle(&path).await {
                        Ok(stored) => render::success(&format!(
                            "Bundle uploaded successfully! Stored: {stored} entry(s)"
                        )),
                        Err(err) => {
                            tracing::debug!(%err, "bundle upload failed");
                            render::error("Failed to upload bundle.");
                        }
                    },
                    Command::Logs => match condition.audit_logs().await {
                        Ok(entries) => render::audit_logs(&entries),
                        Err(err) => {
                            tracing::debug!(%err, "audit log fetch failed");
                            render::error("Failed to load audit logs.");
                        }
                    },
                    Command::Show => show_state(&workbench),
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type /quit to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {err:?}").red());
                break;
            }
        }
    }

    // Stop any in-flight poll loop before shutting down.
    assistant.reset().await;
    event_task.abort();

    Ok(())
}

async fn login(
    rl: &mut Editor<CliHelper, rustyline::history::DefaultHistory>,
    session: &Arc<SessionService>,
    client: &Arc<ApiClient>,
    workbench: &Arc<Mutex<Workbench>>,
    username: Option<String>,
    password: Option<String>,
) {
    let prefill = lock(workbench).login_username.clone();
    let username = match username {
        Some(username) => username,
        None => {
            let prompt = match &prefill {
                Some(name) => format!("Username [{name}]: "),
                None => "Username: ".to_string(),
            };
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim().to_string();
                    if line.is_empty() {
                        prefill.unwrap_or_default()
                    } else {
                        line
                    }
                }
                Err(_) => return,
            }
        }
    };
    let password = match password {
        Some(password) => password,
        None => match rl.readline("Password: ") {
            Ok(line) => line.trim().to_string(),
            Err(_) => return,
        },
    };

    match session
        .login(&Credentials::new(username.clone(), password))
        .await
    {
        Ok(token) => {
            client.set_token(Some(token));
            lock(workbench).login_username = None;
            render::success(&format!("Logged in as {username}."));
        }
        Err(err) => {
            tracing::debug!(%err, "login rejected");
            render::error("Login failed. Please check your username and password.");
        }
    }
}

async fn register(
    rl: &mut Editor<CliHelper, rustyline::history::DefaultHistory>,
    session: &Arc<SessionService>,
    workbench: &Arc<Mutex<Workbench>>,
) {
    let full_name = match rl.readline("Full name (e.g., Dr. Sanjay Gupta): ") {
        Ok(line) => line.trim().to_string(),
        Err(_) => return,
    };
    let username = match rl.readline("Username (your ABHA ID, e.g., ABHA-91-1234): ") {
        Ok(line) => line.trim().to_string(),
        Err(_) => return,
    };
    let password = match rl.readline("Password: ") {
        Ok(line) => line.trim().to_string(),
        Err(_) => return,
    };

    let registration = Registration::new(username.clone(), full_name, password);
    match session.register(&registration).await {
        Ok(()) => {
            // Terminal rendition of the auto-switch to the login form: the
            // username is pre-filled for the next /login.
            lock(workbench).login_username = Some(username);
            render::success("Registration successful! Please log in.");
            render::notice("Your username is pre-filled for /login.");
        }
        Err(SetuError::Validation(message)) => render::error(&message),
        Err(SetuError::Api { message, .. }) => render::error(&message),
        Err(err) => {
            tracing::debug!(%err, "registration failed");
            render::error("Registration failed. Please try again.");
        }
    }
}

fn show_state(workbench: &Arc<Mutex<Workbench>>) {
    let state = lock(workbench);
    println!("{}", "Current state".bold());
    println!(
        "  Search term:  {}",
        if state.search_term.is_empty() {
            "-".to_string()
        } else {
            state.search_term.clone()
        }
    );
    println!("  Suggestions:  {}", state.suggestions.len());
    match &state.selected {
        Some(selected) => println!("  Selected:     {} ({})", selected.display, selected.code),
        None => println!("  Selected:     -"),
    }
    match &state.translation {
        Some(pair) => println!(
            "  Translation:  TM2 {} / Biomed {}",
            pair.tm.code, pair.biomed.code
        ),
        None => println!("  Translation:  -"),
    }
    match &state.job_status {
        Some(status) => println!("  AI job:       {status} ({} results)", state.diagnoses.len()),
        None => println!("  AI job:       - ({} results)", state.diagnoses.len()),
    }
    println!(
        "  FHIR record:  {}",
        if state.record.is_some() {
            "generated"
        } else {
            "-"
        }
    );
}
