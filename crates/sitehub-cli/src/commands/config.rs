//! Configuration inspection commands.

use clap::{Args, Subcommand};

use sitehub_core::error::AppError;
use sitehub_database::connection::mask_password;

use super::Cli;
use crate::output;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration with secrets masked
    Show,
    /// Validate the configuration files
    Validate,
}

/// Execute config commands
pub async fn execute(args: &ConfigArgs, cli: &Cli) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let mut config = cli.load_config()?;
            config.database.url = mask_password(&config.database.url);
            config.auth.jwt_secret = "****".to_string();
            output::print_item(&config, cli.format);
        }
        ConfigCommand::Validate => match cli.load_config() {
            Ok(config) => {
                output::print_success(&format!(
                    "Configuration '{}' in '{}' is valid",
                    cli.config, cli.config_dir
                ));
                output::print_kv("Server", &config.server.bind_address());
                output::print_kv("Database", &mask_password(&config.database.url));
                output::print_kv(
                    "Uploads",
                    &config.storage.uploads_dir().display().to_string(),
                );
                output::print_kv("Registration", &config.auth.allow_registration.to_string());
            }
            Err(e) => {
                output::print_error(&format!("Configuration invalid: {e}"));
                return Err(e);
            }
        },
    }

    Ok(())
}
