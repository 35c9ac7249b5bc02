pub mod auth;
pub mod campaign;
pub mod chat;
pub mod competitor;
pub mod completion;
pub mod config;
pub mod revenue;
pub mod shell;
pub mod status;

use anyhow::{Context, Result};
use client::{ApiClient, MarketMindApi, SessionStore};
use rpassword::prompt_password;
use shared::config::client::ClientConfig;
use std::io::{self, Write};
use std::sync::Arc;
use tracing::debug;

/// Everything a command needs to talk to the backend.
pub struct Dashboard {
    pub config: ClientConfig,
    pub api: Arc<dyn MarketMindApi>,
    pub session: Arc<SessionStore>,
}

impl Dashboard {
    pub fn connect(config: ClientConfig) -> Result<Self> {
        let api = ApiClient::new(&config).context("failed to build HTTP client")?;
        debug!(base_url = %api.base_url(), health_url = %config.health_url, "client ready");
        Ok(Self {
            config,
            api: Arc::new(api),
            session: Arc::new(SessionStore::new()),
        })
    }
}

/// Prints `message` without a newline so input continues on the same line.
pub fn flush_prompt(message: &str) {
    print!("{message}");
    io::stdout().flush().ok();
}

/// Reads one trimmed line from stdin after printing `message`.
fn prompt(message: &str) -> Result<String> {
    flush_prompt(message);
    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .context("failed to read input")?;
    Ok(input.trim().to_string())
}

/// Reads a password without echo.
async fn read_password(message: &'static str) -> Result<String> {
    read_blocking(move || prompt_password(message))
        .await
        .context("failed to read password")
}

/// Runs a blocking terminal read on the blocking pool, so the runtime keeps
/// serving the stdin reader and the health monitor meanwhile.
async fn read_blocking<F>(read: F) -> Result<String>
where
    F: FnOnce() -> io::Result<String> + Send + 'static,
{
    let input = tokio::task::spawn_blocking(read)
        .await
        .context("prompt was interrupted")?;
    Ok(input?)
}
