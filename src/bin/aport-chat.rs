//! Interactive chat REPL against the portal backend.
//!
//! # Usage
//!
//! ```bash
//! # Basic usage with default settings
//! aport-chat
//!
//! # Point at another backend
//! aport-chat --base-url http://backend.example:4321/
//!
//! # Use a specific config and session file
//! aport-chat --config ~/.aport/config.yaml --session ~/.aport/session.json
//! ```
//!
//! # Commands
//!
//! While chatting, you can use slash commands:
//! - `/help` - Show available commands
//! - `/register` - Create an account
//! - `/login` - Log in and persist the session
//! - `/logout` - Clear the persisted session
//! - `/session` - Show the current session state
//! - `/quit` - Exit the application

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use arrrg::CommandLine;
use arrrg_derive::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use time::OffsetDateTime;

use aport::{
    AuthClient, ChatClient, ChatThread, FALLBACK_REPLY, PortalConfig, SessionStore,
};

const DEFAULT_GREETING: &str =
    "Hello! I can help with questions about your documents and tasks. Ask away.";

/// Command-line arguments for the aport-chat tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
struct Args {
    /// Backend base URL, overriding the config file and environment.
    #[arrrg(optional, "Backend base URL (overrides config and APORT_BASE_URL)", "URL")]
    base_url: Option<String>,

    /// Path to the YAML config file.
    #[arrrg(optional, "Config file path (default: ~/.aport/config.yaml)", "PATH")]
    config: Option<String>,

    /// Path to the persisted session file.
    #[arrrg(optional, "Session file path (default: ~/.aport/session.json)", "PATH")]
    session: Option<String>,

    /// Assistant greeting seeding the transcript.
    #[arrrg(optional, "Assistant greeting used to seed the transcript", "TEXT")]
    greeting: Option<String>,
}

fn default_path(file: &str) -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".aport").join(file)
}

fn help_text() -> &'static str {
    "/help      Show this help\n\
     /register  Create an account\n\
     /login     Log in and persist the session\n\
     /logout    Clear the persisted session\n\
     /session   Show the current session state\n\
     /quit      Exit"
}

async fn handle_login(
    rl: &mut DefaultEditor,
    auth: &AuthClient,
    store: &SessionStore,
) -> Result<(), Box<dyn std::error::Error>> {
    let phone = rl.readline("Phone: ")?;
    let password = rl.readline("Password: ")?;

    match auth.login(&phone, &password).await {
        Ok(outcome) => {
            let session: aport::Session = outcome.into();
            let expiry = session
                .expires_at_time()
                .map(|t| t.to_string())
                .unwrap_or_else(|| session.expires_at.clone());
            store.save(session)?;
            println!("Logged in. Access token expires at {expiry}.");
        }
        Err(err) => eprintln!("error: {err}"),
    }
    Ok(())
}

async fn handle_register(
    rl: &mut DefaultEditor,
    auth: &AuthClient,
) -> Result<(), Box<dyn std::error::Error>> {
    let phone = rl.readline("Phone: ")?;
    let password = rl.readline("Password: ")?;

    match auth.register(&phone, &password).await {
        Ok(outcome) => println!("Registered user {}. Now /login.", outcome.user_id),
        Err(err) => eprintln!("error: {err}"),
    }
    Ok(())
}

fn print_session(store: &SessionStore) {
    match store.session() {
        Some(session) => {
            println!("Logged in; access token expires at {}.", session.expires_at);
            if session.is_expired(OffsetDateTime::now_utc()) {
                println!("The stored token looks expired; the backend will say for sure.");
            }
        }
        None => println!("Not logged in."),
    }
}

/// Main entry point for the aport-chat application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = Args::from_command_line_relaxed("aport-chat [OPTIONS]");

    let config_path = args
        .config
        .map(PathBuf::from)
        .unwrap_or_else(|| default_path("config.yaml"));
    let session_path = args
        .session
        .map(PathBuf::from)
        .unwrap_or_else(|| default_path("session.json"));

    let mut config = PortalConfig::load_or_default(&config_path)?;
    if let Some(base_url) = args.base_url {
        config.base_url = Some(base_url);
    }

    if let Some(parent) = session_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let portal = config.portal()?;
    let store = Arc::new(SessionStore::open(&session_path)?);
    let auth = AuthClient::new(portal.clone());
    let thread = ChatThread::with_greeting(
        ChatClient::new(portal.clone(), store.clone()),
        args.greeting.unwrap_or_else(|| DEFAULT_GREETING.to_string()),
    );

    let mut rl = DefaultEditor::new()?;

    // No cancellation exists for an in-flight call; Ctrl+C asks the loop
    // to exit once the current one settles.
    let interrupted = Arc::new(AtomicBool::new(false));
    let interrupted_clone = interrupted.clone();
    ctrlc::set_handler(move || {
        interrupted_clone.store(true, Ordering::Relaxed);
    })?;

    println!("Aport chat ({})", portal.base_url());
    println!("Type /help for commands, /quit to exit\n");
    println!("Assistant: {}\n", thread.messages()[0].content);

    loop {
        if interrupted.load(Ordering::Relaxed) {
            println!("Goodbye!");
            break;
        }

        let readline = rl.readline("You: ");

        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                if let Some(command) = line.strip_prefix('/') {
                    match command {
                        "quit" | "exit" => {
                            println!("Goodbye!");
                            break;
                        }
                        "help" => {
                            for line in help_text().lines() {
                                println!("    {}", line);
                            }
                        }
                        "register" => handle_register(&mut rl, &auth).await?,
                        "login" => handle_login(&mut rl, &auth, &store).await?,
                        "logout" => {
                            store.clear()?;
                            println!("Logged out.");
                        }
                        "session" => print_session(&store),
                        other => {
                            eprintln!("Unknown command: /{other} (try /help)");
                        }
                    }
                    continue;
                }

                match thread.send(line).await {
                    Ok(reply) => println!("Assistant: {reply}\n"),
                    Err(err) => {
                        eprintln!("error: {err}");
                        println!("Assistant: {FALLBACK_REPLY}\n");
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("Goodbye!");
                break;
            }
            Err(err) => {
                eprintln!("readline error: {err}");
                break;
            }
        }
    }

    Ok(())
}
