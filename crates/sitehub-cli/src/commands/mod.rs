//! CLI command definitions and dispatch.

pub mod config;
pub mod migrate;
pub mod user;

use clap::{Parser, Subcommand};

use sitehub_core::config::AppConfig;
use sitehub_core::error::AppError;
use sitehub_database::DatabasePool;

use crate::output::OutputFormat;

/// SiteHub: construction common data environment
#[derive(Debug, Parser)]
#[command(name = "sitehub", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment (loads `config/default.toml` plus `config/<env>.toml`)
    #[arg(short, long, env = "SITEHUB_ENV", default_value = "development")]
    pub config: String,

    /// Directory holding the configuration files
    #[arg(long, default_value = "config")]
    pub config_dir: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Log more (`-v` info, `-vv` debug); `RUST_LOG` overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// User management
    User(user::UserArgs),
    /// Configuration inspection
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Migrate(args) => migrate::execute(args, self).await,
            Commands::User(args) => user::execute(args, self).await,
            Commands::Config(args) => config::execute(args, self).await,
        }
    }

    /// Load configuration for the selected environment.
    pub fn load_config(&self) -> Result<AppConfig, AppError> {
        AppConfig::load_from(&self.config_dir, &self.config)
    }
}

/// Connect to the configured database.
pub async fn create_db_pool(config: &AppConfig) -> Result<DatabasePool, AppError> {
    DatabasePool::connect(&config.database).await
}
