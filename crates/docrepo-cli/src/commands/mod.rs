//! CLI command definitions and dispatch.

pub mod analytics;
pub mod auth;
pub mod bookmarks;
pub mod comments;
pub mod docs;
pub mod users;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use docrepo_client::{ApiClient, FileKeyValueStore};
use docrepo_core::config::ClientConfig;
use docrepo_core::error::AppError;
use docrepo_service::Session;

/// DocRepo: document repository client
#[derive(Debug, Parser)]
#[command(name = "docrepo", version, about, long_about = None)]
pub struct Cli {
    /// Path to a configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sign in, sign out and manage the profile
    Auth(auth::AuthArgs),
    /// User listing, export and import (admin)
    Users(users::UsersArgs),
    /// Browse and manage documents
    Docs(docs::DocsArgs),
    /// Bookmarked documents and folders
    Bookmarks(bookmarks::BookmarksArgs),
    /// Document comments
    Comments(comments::CommentsArgs),
    /// Two-week usage comparison
    Analytics(analytics::AnalyticsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &ClientConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Auth(args) => auth::execute(args, config, self.format).await,
            Commands::Users(args) => users::execute(args, config, self.format).await,
            Commands::Docs(args) => docs::execute(args, config, self.format).await,
            Commands::Bookmarks(args) => bookmarks::execute(args, config, self.format).await,
            Commands::Comments(args) => comments::execute(args, config, self.format).await,
            Commands::Analytics(args) => analytics::execute(args, config, self.format).await,
        }
    }
}

/// Helper: build an API client backed by the session file
pub async fn create_client(config: &ClientConfig) -> Result<ApiClient, AppError> {
    let store = Arc::new(FileKeyValueStore::new(&config.session.store_path));
    ApiClient::new(&config.api, store).await
}

/// Helper: restore the saved session
pub async fn restore_session(config: &ClientConfig) -> Result<Session, AppError> {
    Session::restore(create_client(config).await?).await
}

/// Helper: map a dialoguer failure
pub fn prompt_error(err: dialoguer::Error) -> AppError {
    AppError::internal(format!("Input error: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_users_export() {
        let cli = Cli::try_parse_from([
            "docrepo", "--format", "json", "users", "export", "selected", "--email", "a@x.com",
            "--email", "b@x.com",
        ])
        .expect("parse");
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(matches!(cli.command, Commands::Users(_)));
    }

    #[test]
    fn test_parse_docs_upload() {
        let cli = Cli::try_parse_from([
            "docrepo", "docs", "upload", "a.pdf", "b.pdf", "--folder", "hr/policies",
        ])
        .expect("parse");
        let Commands::Docs(args) = cli.command else {
            panic!("expected docs command");
        };
        match args.command {
            docs::DocsCommand::Upload { files, folder, icon } => {
                assert_eq!(files.len(), 2);
                assert_eq!(folder, "hr/policies");
                assert!(icon.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_upload_requires_files() {
        assert!(Cli::try_parse_from(["docrepo", "docs", "upload"]).is_err());
    }

    #[test]
    fn test_parse_rejects_unknown_activity() {
        assert!(Cli::try_parse_from(["docrepo", "users", "list", "--activity", "dormant"]).is_err());
    }
}
