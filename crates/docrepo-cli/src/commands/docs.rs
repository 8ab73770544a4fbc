//! Document browsing and management commands.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use super::prompt_error;
use crate::output::{self, OutputFormat};
use docrepo_core::config::ClientConfig;
use docrepo_core::error::AppError;
use docrepo_entity::document::DocumentItem;
use docrepo_service::DocumentBrowser;
use docrepo_service::browser::IconUpload;
use docrepo_service::upload::{NotificationOutcome, UploadBatch, UploadEntry};

/// Arguments for document commands
#[derive(Debug, Args)]
pub struct DocsArgs {
    /// Docs subcommand
    #[command(subcommand)]
    pub command: DocsCommand,
}

/// Docs subcommands
#[derive(Debug, Subcommand)]
pub enum DocsCommand {
    /// List a folder
    Ls {
        /// Folder key (root when omitted)
        #[arg(default_value = "")]
        path: String,
        /// Only show entries whose name contains this text
        #[arg(long)]
        filter: Option<String>,
    },
    /// Get a retrieval URL for a file
    Open {
        /// File key
        key: String,
    },
    /// Create a folder
    Mkdir {
        /// Folder name
        name: String,
        /// Parent folder key (root when omitted)
        #[arg(short, long, default_value = "")]
        parent: String,
        /// Icon image for the folder
        #[arg(long)]
        icon: Option<PathBuf>,
    },
    /// Upload files into a folder
    Upload {
        /// Files to upload, in order
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Destination folder key (root when omitted)
        #[arg(short, long, default_value = "")]
        folder: String,
        /// Icon image stored with every uploaded file
        #[arg(long)]
        icon: Option<PathBuf>,
    },
    /// Delete a document
    Rm {
        /// Document key
        key: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Document display row for table output
#[derive(Debug, Serialize, Tabled)]
struct ItemRow {
    /// Name
    name: String,
    /// Type
    #[tabled(rename = "type")]
    #[serde(rename = "type")]
    kind: String,
    /// Key
    key: String,
    /// Bookmarked
    bookmarked: String,
    /// Icon
    icon: String,
}

impl From<&DocumentItem> for ItemRow {
    fn from(item: &DocumentItem) -> Self {
        Self {
            name: item.name.clone(),
            kind: item.item_type.to_string(),
            key: item.key.clone(),
            bookmarked: if item.is_bookmarked { "★" } else { "" }.to_string(),
            icon: item.icon_url.clone().unwrap_or_default(),
        }
    }
}

/// Execute document commands
pub async fn execute(args: &DocsArgs, config: &ClientConfig, format: OutputFormat) -> Result<(), AppError> {
    let session = super::restore_session(config).await?;
    let mut browser = DocumentBrowser::new(session.client().clone());

    match &args.command {
        DocsCommand::Ls { path, filter } => {
            browser.open_folder(path).await?;
            if let Some(filter) = filter {
                browser.set_filter(filter.as_str());
            }
            if format == OutputFormat::Table {
                let crumbs: Vec<String> = browser.breadcrumbs().into_iter().map(|c| c.name).collect();
                println!("/{}", crumbs.join("/"));
            }
            let rows: Vec<ItemRow> = browser.visible_items().into_iter().map(ItemRow::from).collect();
            output::print_list(&rows, format);
        }
        DocsCommand::Open { key } => {
            let viewer = session.current_user().map(|u| u.email.as_str());
            let opened = browser.open_file(key, viewer).await?;
            match format {
                OutputFormat::Json => output::print_json(&opened),
                OutputFormat::Table => {
                    output::print_kv("Key", &opened.key);
                    output::print_kv("URL", &opened.url);
                    let viewer = if opened.preview.is_viewable() {
                        format!("{:?}", opened.preview)
                    } else {
                        "download only".to_string()
                    };
                    output::print_kv("Viewer", &viewer);
                }
            }
        }
        DocsCommand::Mkdir { name, parent, icon } => {
            let icon = match icon {
                Some(path) => Some(IconUpload::from_path(path, config.upload.max_icon_bytes).await?),
                None => None,
            };
            browser.open_folder(parent).await?;
            let created = browser.create_folder(name, icon).await?;
            output::print_success(&format!("Created folder '{}'", created.key));
            if let Some(e) = created.icon_error {
                output::print_warning(&format!("Folder icon was not saved: {}", e.message));
            }
        }
        DocsCommand::Upload { files, folder, icon } => {
            let icon = match icon {
                Some(path) => Some(IconUpload::from_path(path, config.upload.max_icon_bytes).await?),
                None => None,
            };
            let mut batch = UploadBatch::new();
            for path in files {
                let entry = UploadEntry::from_path(path).await?;
                batch.push(match &icon {
                    Some(icon) => entry.with_icon(icon.clone()),
                    None => entry,
                });
            }

            let notify = session.is_admin() && config.upload.notify_on_admin_upload;
            let report = batch
                .upload_all(session.client(), folder.trim_matches('/'), notify)
                .await?;

            match format {
                OutputFormat::Json => output::print_json(&report),
                OutputFormat::Table => {
                    for key in &report.uploaded {
                        output::print_success(&format!("Uploaded {key}"));
                    }
                    for (file, reason) in &report.icon_failures {
                        output::print_warning(&format!("Icon for {file} was not saved: {reason}"));
                    }
                    if let NotificationOutcome::Failed(reason) = &report.notification {
                        output::print_warning(&format!("Users were not notified: {reason}"));
                    }
                }
            }
        }
        DocsCommand::Rm { key, yes } => {
            let confirmed = *yes
                || dialoguer::Confirm::new()
                    .with_prompt(format!("Delete '{key}'?"))
                    .default(false)
                    .interact()
                    .map_err(prompt_error)?;
            if !confirmed {
                output::print_warning("Aborted");
                return Ok(());
            }
            browser.delete_document(key).await?;
            output::print_success(&format!("Deleted '{key}'"));
        }
    }

    Ok(())
}
