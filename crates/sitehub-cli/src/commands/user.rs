//! User management commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use sitehub_auth::{PasswordHasher, PasswordValidator};
use sitehub_core::error::AppError;
use sitehub_core::types::PageRequest;
use sitehub_database::repositories::UserRepository;
use sitehub_entity::user::{CreateUser, UpdateUser, User, UserRole, UserStatus};

use super::Cli;
use crate::output;

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Create a user
    Create {
        /// Username
        username: String,
        /// Role: admin, manager, contributor or viewer
        #[arg(short, long, default_value = "viewer")]
        role: UserRole,
        /// Email address
        #[arg(short, long)]
        email: Option<String>,
        /// Display name
        #[arg(long)]
        display_name: Option<String>,
        /// Password (prompted for when omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// List users
    List {
        /// Filter by role
        #[arg(short, long)]
        role: Option<UserRole>,
        /// Username, display name or email substring
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Change a user's role
    SetRole {
        /// Username
        username: String,
        /// New role
        role: UserRole,
    },
    /// Enable a user
    Enable {
        /// Username
        username: String,
    },
    /// Disable a user
    Disable {
        /// Username
        username: String,
    },
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    id: String,
    username: String,
    name: String,
    email: String,
    role: String,
    status: String,
    last_login: String,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.to_string(),
            username: u.username.clone(),
            name: u.label().to_string(),
            email: u.email.clone().unwrap_or_default(),
            role: u.role.to_string(),
            status: u.status.to_string(),
            last_login: u
                .last_login_at
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "never".to_string()),
        }
    }
}

fn prompt_password() -> Result<String, AppError> {
    dialoguer::Password::new()
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()
        .map_err(|e| AppError::internal(format!("Input error: {e}")))
}

async fn find_user(repo: &UserRepository, username: &str) -> Result<User, AppError> {
    repo.find_by_username(username)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User '{username}' not found")))
}

/// Execute user commands
pub async fn execute(args: &UserArgs, cli: &Cli) -> Result<(), AppError> {
    let config = cli.load_config()?;
    let db = super::create_db_pool(&config).await?;
    let user_repo = UserRepository::new(db.pg());

    match &args.command {
        UserCommand::Create {
            username,
            role,
            email,
            display_name,
            password,
        } => {
            let password = match password {
                Some(p) => p.clone(),
                None => prompt_password()?,
            };
            PasswordValidator::new(&config.auth).validate(&password)?;
            let password_hash = PasswordHasher::new().hash_password(&password)?;

            let user = user_repo
                .create(&CreateUser {
                    username: username.trim().to_string(),
                    email: email.clone(),
                    password_hash,
                    display_name: display_name.clone(),
                    role: *role,
                })
                .await?;
            output::print_success(&format!("User '{}' created ({})", user.username, user.role));
        }
        UserCommand::List { role, search } => {
            let page = user_repo
                .find_all(*role, search.as_deref(), &PageRequest::new(1, 100))
                .await?;
            let rows: Vec<UserRow> = page.items.iter().map(UserRow::from).collect();
            output::print_list(&rows, cli.format);
            if page.total_items > page.items.len() as u64 {
                println!("Showing {} of {} users.", page.items.len(), page.total_items);
            }
        }
        UserCommand::SetRole { username, role } => {
            let user = find_user(&user_repo, username).await?;
            user_repo
                .update(
                    user.id,
                    &UpdateUser {
                        role: Some(*role),
                        ..Default::default()
                    },
                )
                .await?;
            output::print_success(&format!("User '{username}' is now {role}"));
        }
        UserCommand::Enable { username } => {
            let user = find_user(&user_repo, username).await?;
            user_repo
                .update(
                    user.id,
                    &UpdateUser {
                        status: Some(UserStatus::Active),
                        ..Default::default()
                    },
                )
                .await?;
            output::print_success(&format!("User '{username}' enabled"));
        }
        UserCommand::Disable { username } => {
            let user = find_user(&user_repo, username).await?;
            user_repo
                .update(
                    user.id,
                    &UpdateUser {
                        status: Some(UserStatus::Inactive),
                        ..Default::default()
                    },
                )
                .await?;
            output::print_success(&format!("User '{username}' disabled"));
        }
    }

    db.close().await;
    Ok(())
}
