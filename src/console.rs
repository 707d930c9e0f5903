//! Console channel — reads lines from stdin, drives the chat session,
//! prints replies to stdout.
//!
//! Sign-in comes first; the chat loop only starts for an authenticated
//! user. Because the loop awaits each turn before prompting again, a
//! second send can never overlap an in-flight one — the surface provides
//! the mutual exclusion the session contract leaves open.
//!
//! Every failure here converts to a printed soft message; nothing short of
//! a broken credential store takes the console down. Runs until the
//! `shutdown` token is cancelled (Ctrl-C) or stdin is closed.

use std::io::Write as _;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::auth::{AccessPolicy, AuthError, Authenticator, Capability, User};
use crate::chat::ChatSession;
use crate::config::Config;
use crate::error::AppError;
use crate::knowledge::{Category, KnowledgeEntry, KnowledgeStore};
use crate::llm::LlmProvider;

const HELP: &str = "\
Commands:
  /list            show knowledge base topics
  /add             add a knowledge entry (editors only)
  /remove <topic>  remove all entries with that exact topic (editors only)
  /logout          end this session and sign in again
  /quit            exit
Anything else is sent to the assistant.";

// ── run ──────────────────────────────────────────────────────────────────────

pub async fn run(
    config: &Config,
    store: &mut KnowledgeStore,
    authenticator: &Authenticator,
    policy: &AccessPolicy,
    provider: LlmProvider,
    shutdown: CancellationToken,
) -> Result<(), AppError> {
    info!("console channel started — Ctrl-C to quit");
    println!("─────────────────────────────────");
    println!(" {} assistant  (Ctrl-C to quit)", config.store_name);
    println!("─────────────────────────────────");

    let stdin = tokio::io::stdin();
    let mut lines = BufReader::new(stdin).lines();

    'session: loop {
        let Some(user) = login(&mut lines, authenticator, &shutdown).await? else {
            break;
        };
        println!("Welcome, {}! Ask about products, support, or policies.", user.username);
        println!("{HELP}");

        let mut session = ChatSession::new(provider.clone());

        loop {
            let Some(input) = read_line(&mut lines, "> ", &shutdown).await? else {
                break 'session;
            };
            if input.is_empty() {
                continue;
            }

            debug!(input = %input, "console received line");

            if let Some(command) = input.strip_prefix('/') {
                match dispatch(command, &mut lines, store, policy, &user, &shutdown).await? {
                    Flow::Continue => continue,
                    Flow::Logout => {
                        session.reset();
                        info!(username = %user.username, "session closed on logout");
                        println!("Logged out.");
                        continue 'session;
                    }
                    Flow::Quit => break 'session,
                }
            }

            let reply = session.send_user_message(store, &input).await;
            println!("{}", reply.text);
        }
    }

    info!("console channel shutting down");
    Ok(())
}

// ── sign-in ──────────────────────────────────────────────────────────────────

/// Prompt for credentials until a pair verifies. `None` on EOF/shutdown.
///
/// Empty username or password is rejected before any lookup — required-field
/// validation belongs to this surface, not the credential store.
async fn login(
    lines: &mut Lines<BufReader<Stdin>>,
    authenticator: &Authenticator,
    shutdown: &CancellationToken,
) -> Result<Option<User>, AppError> {
    loop {
        let Some(username) = read_line(lines, "username: ", shutdown).await? else {
            return Ok(None);
        };
        let Some(password) = read_line(lines, "password: ", shutdown).await? else {
            return Ok(None);
        };

        if username.is_empty() || password.is_empty() {
            println!("Please enter both username and password.");
            continue;
        }

        match authenticator.verify(&username, &password) {
            Ok(user) => {
                info!(username = %user.username, "sign-in succeeded");
                return Ok(Some(user));
            }
            Err(AuthError::InvalidCredentials) => {
                println!("Invalid username or password.");
            }
            Err(e @ AuthError::Store(_)) => {
                return Err(AppError::Console(e.to_string()));
            }
        }
    }
}

// ── commands ─────────────────────────────────────────────────────────────────

enum Flow {
    Continue,
    Logout,
    Quit,
}

async fn dispatch(
    command: &str,
    lines: &mut Lines<BufReader<Stdin>>,
    store: &mut KnowledgeStore,
    policy: &AccessPolicy,
    user: &User,
    shutdown: &CancellationToken,
) -> Result<Flow, AppError> {
    let (name, arg) = match command.split_once(' ') {
        Some((n, a)) => (n, a.trim()),
        None => (command, ""),
    };

    match name {
        "quit" => return Ok(Flow::Quit),
        "logout" => return Ok(Flow::Logout),
        "help" => println!("{HELP}"),
        "list" => {
            for entry in store.list() {
                println!("  [{}] {}", entry.category, entry.topic);
            }
        }
        "remove" => {
            if !policy.allows(user, Capability::RemoveKnowledge) {
                println!("You don't have permission to remove knowledge entries.");
            } else if arg.is_empty() {
                println!("Usage: /remove <topic>");
            } else if let Err(e) = store.remove_by_topic(arg) {
                warn!(error = %e, "failed to remove knowledge entry");
                println!("Could not update the knowledge base. Please try again.");
            } else {
                println!("Removed all entries with topic '{arg}'.");
            }
        }
        "add" => {
            if !policy.allows(user, Capability::EnrichKnowledge) {
                // Denied before any prompt — nothing is ever added.
                println!("You don't have permission to add knowledge entries.");
            } else if enrich(lines, store, user, shutdown).await?.is_none() {
                return Ok(Flow::Quit);
            }
        }
        other => println!("Unknown command: /{other} — try /help"),
    }

    Ok(Flow::Continue)
}

/// Interactive enrichment flow. `None` on EOF/shutdown mid-flow.
async fn enrich(
    lines: &mut Lines<BufReader<Stdin>>,
    store: &mut KnowledgeStore,
    user: &User,
    shutdown: &CancellationToken,
) -> Result<Option<()>, AppError> {
    let Some(topic) = read_line(lines, "topic: ", shutdown).await? else {
        return Ok(None);
    };
    if topic.is_empty() {
        println!("Topic must not be empty.");
        return Ok(Some(()));
    }

    let prompt = format!(
        "category ({}): ",
        Category::ALL.map(|c| c.as_str()).join("/")
    );
    let Some(category_input) = read_line(lines, &prompt, shutdown).await? else {
        return Ok(None);
    };
    let category = match category_input.parse::<Category>() {
        Ok(c) => c,
        Err(e) => {
            println!("{e}");
            return Ok(Some(()));
        }
    };

    let Some(content) = read_line(lines, "content: ", shutdown).await? else {
        return Ok(None);
    };
    if content.is_empty() {
        println!("Content must not be empty.");
        return Ok(Some(()));
    }

    let entry = KnowledgeEntry {
        topic,
        content,
        category,
        created_by: user.username.clone(),
    };

    match store.add(entry) {
        Ok(stored) => {
            info!(topic = %stored.topic, created_by = %stored.created_by, "knowledge base enriched");
            println!("Added '{}' to the knowledge base.", stored.topic);
        }
        Err(e) => {
            warn!(error = %e, "failed to persist knowledge entry");
            println!("Could not update the knowledge base. Please try again.");
        }
    }

    Ok(Some(()))
}

// ── line input ───────────────────────────────────────────────────────────────

/// Print `prompt`, then wait for the next stdin line or shutdown.
/// Returns the trimmed line, or `None` on EOF, read error, or cancellation.
async fn read_line(
    lines: &mut Lines<BufReader<Stdin>>,
    prompt: &str,
    shutdown: &CancellationToken,
) -> Result<Option<String>, AppError> {
    print!("{prompt}");
    let _ = std::io::stdout().flush();

    tokio::select! {
        biased;

        _ = shutdown.cancelled() => {
            println!("\n[console] shutdown signal received");
            Ok(None)
        }

        line = lines.next_line() => {
            match line {
                Err(e) => {
                    warn!("console read error: {e}");
                    Ok(None)
                }
                Ok(None) => {
                    info!("console stdin closed");
                    Ok(None)
                }
                Ok(Some(input)) => Ok(Some(input.trim().to_string())),
            }
        }
    }
}
