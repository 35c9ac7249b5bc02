//! Main entry point for the MarketMind command-line dashboard.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use shared::config::client::ClientConfig;
use std::path::PathBuf;

mod commands;
mod telemetry;

use commands::{
    Dashboard, auth::LoginArgs, auth::RegisterArgs, campaign::CampaignArgs, chat::ChatArgs,
    competitor::CompetitorArgs, revenue::RevenueArgs, status::StatusArgs,
};

/// MarketMind CLI
#[derive(Parser)]
#[command(name = "marketmind")]
#[command(about = "Command-line dashboard for the MarketMind marketing backend", long_about = None)]
pub struct Cli {
    /// Path to a configuration file (yaml, json or toml)
    #[arg(
        long,
        global = true,
        help = "Path to a configuration file (e.g., config.yaml). If not provided, defaults and MARKETMIND_* variables are used."
    )]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Subcommands for the MarketMind CLI
#[derive(Subcommand)]
enum Commands {
    /// Analyze a competitor's positioning and market gaps
    Competitor(CompetitorArgs),

    /// Simulate revenue and project the next months
    Revenue(RevenueArgs),

    /// Generate a campaign plan with ad copy
    Campaign(CampaignArgs),

    /// Talk to the MarketMind assistant
    Chat(ChatArgs),

    /// Sign in to MarketMind
    Login(LoginArgs),

    /// Create a MarketMind account
    Register(RegisterArgs),

    /// Check whether the backend is online
    Status(StatusArgs),

    /// Start the interactive dashboard
    Shell,

    /// Generate shell completion scripts for the CLI
    Completion {
        /// The shell type for which to generate the completion script (e.g., bash, zsh, fish, powershell)
        #[arg(
            long,
            short,
            value_enum,
            help = "The shell type for which to generate the completion script (e.g., bash, zsh, fish, powershell)"
        )]
        shell: clap_complete::Shell,
    },

    /// Generate a configuration file
    Config {
        /// Format of the configuration file to generate (yaml, json or toml). Defaults to yaml.
        #[arg(
            long,
            short,
            default_value = "yaml",
            help = "Format of the configuration file to generate (yaml, json or toml). Defaults to yaml."
        )]
        format: String,

        /// Directory to write the file into
        #[arg(long, short, default_value = ".")]
        dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();

    let command = match cli.command {
        Commands::Completion { shell } => {
            commands::completion::generate_completion(shell);
            return Ok(());
        }
        Commands::Config { format, dir } => {
            let path = commands::config::generate_config(&format, &dir)?;
            println!(
                "Configuration file '{}' generated successfully.",
                path.display()
            );
            return Ok(());
        }
        command => command,
    };

    let config = ClientConfig::load_config(cli.config.as_deref())
        .context("failed to load configuration")?;
    telemetry::initialize_tracing(&config.logging);
    let dashboard = Dashboard::connect(config)?;

    match command {
        Commands::Competitor(args) => commands::competitor::analyze(&dashboard, args).await,
        Commands::Revenue(args) => commands::revenue::simulate(&dashboard, args).await,
        Commands::Campaign(args) => commands::campaign::generate(&dashboard, args).await,
        Commands::Chat(args) => commands::chat::start_chat(&dashboard, args).await,
        Commands::Login(args) => commands::auth::login(&dashboard, args).await,
        Commands::Register(args) => commands::auth::register(&dashboard, args).await,
        Commands::Status(args) => commands::status::status(&dashboard, args).await,
        Commands::Shell => commands::shell::run(&dashboard).await,
        Commands::Completion { .. } | Commands::Config { .. } => Ok(()),
    }
}
