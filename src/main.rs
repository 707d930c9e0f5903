//! Duka Bot — console entry point.
//!
//! Startup sequence:
//!   1. Load .env (if present)
//!   2. Load config
//!   3. Init logger at configured level
//!   4. Open knowledge store (seed fallback inside)
//!   5. Load credential store + access policy
//!   6. Build LLM provider
//!   7. Run the console channel until Ctrl-C or EOF

use tokio_util::sync::CancellationToken;
use tracing::info;

use duka_bot::auth::{AccessPolicy, Authenticator};
use duka_bot::error::AppError;
use duka_bot::knowledge::KnowledgeStore;
use duka_bot::{config, console, llm, logger};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[tokio::main(flavor = "current_thread")]
async fn run() -> Result<(), AppError> {
    // Load .env if present — ignore errors (file is optional).
    let _ = dotenvy::dotenv();

    let config = config::load()?;
    logger::init(&config.log_level)?;

    info!(
        store = %config.store_name,
        work_dir = %config.work_dir.display(),
        log_level = %config.log_level,
        "config loaded"
    );

    std::fs::create_dir_all(&config.work_dir)?;

    let mut store = KnowledgeStore::open(&config.knowledge_file);
    info!(entries = store.len(), "knowledge store ready");

    let authenticator = Authenticator::local(&config.users_file)
        .map_err(|e| AppError::Config(e.to_string()))?;
    let policy = AccessPolicy::default();

    let provider = llm::providers::build(&config.llm, config.llm_api_key.clone())
        .map_err(|e| AppError::Config(e.to_string()))?;
    info!(provider = %config.llm.provider, "completion provider ready");

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_token.cancel();
        }
    });

    console::run(&config, &mut store, &authenticator, &policy, provider, shutdown).await
}
