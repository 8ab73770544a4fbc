//! Bookmark commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use docrepo_core::config::ClientConfig;
use docrepo_core::error::AppError;
use docrepo_service::DocumentBrowser;

/// Arguments for bookmark commands
#[derive(Debug, Args)]
pub struct BookmarksArgs {
    /// Bookmarks subcommand
    #[command(subcommand)]
    pub command: BookmarksCommand,
}

/// Bookmarks subcommands
#[derive(Debug, Subcommand)]
pub enum BookmarksCommand {
    /// List bookmarks
    List,
    /// Bookmark an entry, or remove its bookmark
    Toggle {
        /// Key of the document or folder
        key: String,
    },
    /// Remove a bookmark by item key
    Remove {
        /// Key of the bookmarked item
        key: String,
    },
}

/// Bookmark display row for table output
#[derive(Debug, Serialize, Tabled)]
struct BookmarkRow {
    /// Item key
    key: String,
    /// Name
    name: String,
    /// Type
    #[tabled(rename = "type")]
    #[serde(rename = "type")]
    kind: String,
    /// Created
    created: String,
}

/// Execute bookmark commands
pub async fn execute(args: &BookmarksArgs, config: &ClientConfig, format: OutputFormat) -> Result<(), AppError> {
    let client = super::create_client(config).await?;

    match &args.command {
        BookmarksCommand::List => {
            let rows: Vec<BookmarkRow> = client
                .bookmarks()
                .await?
                .into_iter()
                .map(|b| BookmarkRow {
                    key: b.item_id,
                    name: b.item_name,
                    kind: format!("{:?}", b.item_type).to_lowercase(),
                    created: output::format_time(b.created_at),
                })
                .collect();
            output::print_list(&rows, format);
        }
        BookmarksCommand::Toggle { key } => {
            let key = key.trim_matches('/');
            let parent = key.rsplit_once('/').map(|(p, _)| p).unwrap_or_default();
            let mut browser = DocumentBrowser::new(client);
            browser.open_folder(parent).await?;
            if browser.toggle_bookmark(key).await? {
                output::print_success(&format!("Bookmarked '{key}'"));
            } else {
                output::print_success(&format!("Removed bookmark '{key}'"));
            }
        }
        BookmarksCommand::Remove { key } => {
            client.remove_bookmark(key).await?;
            output::print_success(&format!("Removed bookmark '{key}'"));
        }
    }

    Ok(())
}
