//! Sign-in, sign-out and profile commands.

use clap::{Args, Subcommand};
use dialoguer::{Input, Password};

use super::prompt_error;
use crate::output::{self, OutputFormat};
use docrepo_core::config::ClientConfig;
use docrepo_core::error::AppError;

/// Arguments for auth commands
#[derive(Debug, Args)]
pub struct AuthArgs {
    /// Auth subcommand
    #[command(subcommand)]
    pub command: AuthCommand,
}

/// Auth subcommands
#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// Sign in and save the session
    Signin {
        /// E-mail address (will prompt if not provided)
        #[arg(short, long)]
        email: Option<String>,
        /// Password (will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Forget the saved session
    Signout,
    /// Show the signed-in user
    Whoami {
        /// Fetch the profile from the server instead of the saved copy
        #[arg(long)]
        refresh: bool,
    },
    /// Change the display name
    Profile {
        /// New full name
        #[arg(long)]
        fullname: String,
    },
    /// Change the password
    Passwd,
}

/// Execute auth commands
pub async fn execute(args: &AuthArgs, config: &ClientConfig, format: OutputFormat) -> Result<(), AppError> {
    let mut session = super::restore_session(config).await?;

    match &args.command {
        AuthCommand::Signin { email, password } => {
            let email = match email {
                Some(e) => e.clone(),
                None => Input::new()
                    .with_prompt("E-mail")
                    .interact_text()
                    .map_err(prompt_error)?,
            };
            let password = match password {
                Some(p) => p.clone(),
                None => Password::new()
                    .with_prompt("Password")
                    .interact()
                    .map_err(prompt_error)?,
            };
            let user = session.sign_in(&email, &password).await?;
            output::print_success(&format!("Signed in as {} ({})", user.email, user.role));
        }
        AuthCommand::Signout => {
            session.sign_out().await?;
            output::print_success("Signed out");
        }
        AuthCommand::Whoami { refresh } => {
            let user = if *refresh {
                session.reload_profile().await?
            } else {
                session.require_user()?
            };
            match format {
                OutputFormat::Json => output::print_json(user),
                OutputFormat::Table => {
                    output::print_kv("E-mail", &user.email);
                    output::print_kv("Name", &user.fullname);
                    output::print_kv("Role", &user.role.to_string());
                    output::print_kv("Last sign-in", &output::format_time(user.last_sign_in));
                    output::print_kv("Sign-ins", &user.number_of_sign_ins.to_string());
                }
            }
        }
        AuthCommand::Profile { fullname } => {
            let user = session.update_profile(fullname).await?;
            output::print_success(&format!("Name changed to '{}'", user.fullname));
        }
        AuthCommand::Passwd => {
            session.require_user()?;
            let current = Password::new()
                .with_prompt("Current password")
                .interact()
                .map_err(prompt_error)?;
            let new = Password::new()
                .with_prompt("New password")
                .with_confirmation("Confirm new password", "Passwords do not match")
                .interact()
                .map_err(prompt_error)?;
            session.change_password(&current, &new).await?;
            output::print_success("Password changed");
        }
    }

    Ok(())
}
