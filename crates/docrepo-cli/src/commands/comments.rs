//! Comment commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use docrepo_core::config::ClientConfig;
use docrepo_core::error::AppError;
use docrepo_service::CommentFeed;
use docrepo_service::comments::{FeedComment, document_kind};

/// Arguments for comment commands
#[derive(Debug, Args)]
pub struct CommentsArgs {
    /// Comments subcommand
    #[command(subcommand)]
    pub command: CommentsCommand,
}

/// Comments subcommands
#[derive(Debug, Subcommand)]
pub enum CommentsCommand {
    /// List comments, newest first
    List {
        /// Only comments on this document
        #[arg(short, long)]
        document: Option<String>,
        /// Only comments matching this text
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Comment on a document
    Add {
        /// Document key
        document: String,
        /// Comment text
        text: String,
    },
    /// Change a comment's text
    Edit {
        /// Comment ID
        id: String,
        /// New text
        text: String,
    },
    /// Delete a comment
    Delete {
        /// Comment ID
        id: String,
    },
}

/// Comment display row for table output
#[derive(Debug, Serialize, Tabled)]
struct CommentRow {
    /// Comment ID
    id: String,
    /// Document
    document: String,
    /// Kind
    kind: String,
    /// Author
    author: String,
    /// Comment
    comment: String,
    /// Posted
    posted: String,
}

impl From<&FeedComment> for CommentRow {
    fn from(c: &FeedComment) -> Self {
        let edited = if c.comment.is_edited() { " (edited)" } else { "" };
        Self {
            id: c.comment.id.clone(),
            document: c.document_name.clone(),
            kind: document_kind(&c.comment.document_id).to_string(),
            author: c.comment.author().to_string(),
            comment: c.comment.content.clone(),
            posted: format!("{}{edited}", output::format_time(Some(c.comment.created_at))),
        }
    }
}

/// Execute comment commands
pub async fn execute(args: &CommentsArgs, config: &ClientConfig, format: OutputFormat) -> Result<(), AppError> {
    let session = super::restore_session(config).await?;
    let mut feed = CommentFeed::new(session.client().clone());

    match &args.command {
        CommentsCommand::List { document, search } => {
            feed.load().await?;
            let mut matches = feed.search(search.as_deref().unwrap_or_default());
            if let Some(document) = document {
                matches.retain(|c| &c.comment.document_id == document);
            }
            let rows: Vec<CommentRow> = matches.into_iter().map(CommentRow::from).collect();
            output::print_list(&rows, format);
        }
        CommentsCommand::Add { document, text } => {
            let email = session.require_user()?.email.clone();
            let posted = feed.reply(&email, document, text).await?;
            output::print_success(&format!("Comment {} added", posted.comment.id));
        }
        CommentsCommand::Edit { id, text } => {
            feed.load().await?;
            feed.edit(id, text).await?;
            output::print_success(&format!("Comment {id} updated"));
        }
        CommentsCommand::Delete { id } => {
            feed.load().await?;
            feed.delete(id).await?;
            output::print_success(&format!("Comment {id} deleted"));
        }
    }

    Ok(())
}
