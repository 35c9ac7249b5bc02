//! Log output for the CLI.
//!
//! Events go to stderr so command output on stdout stays pipeable.

use shared::config::client::{LogFormat, LoggingConfig};
use std::env;
use std::io::{self, IsTerminal};
use tracing::Subscriber;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. `RUST_LOG` wins over the configured level.
///
/// A second call keeps the subscriber that is already installed.
pub fn initialize_tracing(logging: &LoggingConfig) {
    let directives = env::var("RUST_LOG").ok();
    let ansi = io::stderr().is_terminal();
    let subscriber = build_subscriber(logging, directives.as_deref(), ansi, io::stderr);

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

fn build_subscriber<W>(
    logging: &LoggingConfig,
    directives: Option<&str>,
    ansi: bool,
    writer: W,
) -> Box<dyn Subscriber + Send + Sync>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let builder = fmt::fmt()
        .with_env_filter(build_env_filter(logging, directives))
        .with_target(false)
        .with_writer(writer);

    match logging.format {
        LogFormat::Json => Box::new(builder.json().with_ansi(false).finish()),
        LogFormat::Text => Box::new(builder.with_ansi(ansi).finish()),
    }
}

/// Valid `directives` replace the configured level entirely.
fn build_env_filter(logging: &LoggingConfig, directives: Option<&str>) -> EnvFilter {
    if let Some(directives) = directives.filter(|d| !d.trim().is_empty())
        && let Ok(filter) = EnvFilter::try_new(directives)
    {
        return filter;
    }

    let level = logging
        .level
        .parse::<LevelFilter>()
        .unwrap_or(LevelFilter::INFO);
    EnvFilter::default().add_directive(level.into())
}
