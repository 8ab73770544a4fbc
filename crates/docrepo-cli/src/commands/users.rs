//! Admin user listing, export and import commands.

use std::path::PathBuf;

use chrono::Utc;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use docrepo_core::config::ClientConfig;
use docrepo_core::error::AppError;
use docrepo_core::types::{ActivityFilter, ExportFormat, ExportScope};
use docrepo_service::analytics::format_duration;
use docrepo_service::export::{download_file_name, save_blob};
use docrepo_service::import::{TEMPLATE_FILE_NAME, import_users_file, write_template};
use docrepo_service::listing::ListedUser;
use docrepo_service::{ExportController, UserListController};

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UsersArgs {
    /// Users subcommand
    #[command(subcommand)]
    pub command: UsersCommand,
}

/// Users subcommands
#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    /// List users with their activity
    List {
        /// Search text
        #[arg(short, long, default_value = "")]
        search: String,
        /// Activity filter: all, active or inactive
        #[arg(short, long, default_value = "all")]
        activity: ActivityFilter,
        /// Number of pages to fetch
        #[arg(short, long, default_value_t = 1)]
        pages: u32,
    },
    /// Download users as CSV or XLSX
    Export {
        /// Which users: all, active, inactive or selected
        scope: ExportScope,
        /// File format (defaults to the configured one)
        #[arg(long)]
        file_format: Option<ExportFormat>,
        /// E-mail to include in a `selected` export (repeatable)
        #[arg(short, long = "email")]
        emails: Vec<String>,
        /// Directory to write to (defaults to the configured one)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Import users from a spreadsheet (.xlsx, .xls or .csv)
    Import {
        /// Spreadsheet path
        file: PathBuf,
    },
    /// Write the import template
    Template {
        /// Destination file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    /// E-mail
    email: String,
    /// Name
    name: String,
    /// Role
    role: String,
    /// Status
    status: String,
    /// Sign-ins
    sign_ins: u64,
    /// Last sign-in
    last_sign_in: String,
    /// Documents viewed
    documents: u64,
    /// Time spent
    time_spent: String,
}

impl From<&ListedUser> for UserRow {
    fn from(row: &ListedUser) -> Self {
        let u = &row.user;
        Self {
            email: u.email.clone(),
            name: u.fullname.clone(),
            role: u.role.to_string(),
            status: row.status.to_string(),
            sign_ins: u.number_of_sign_ins,
            last_sign_in: output::format_time(u.last_sign_in),
            documents: u.documents_viewed,
            time_spent: format_duration(u.time_spent),
        }
    }
}

/// Execute user commands
pub async fn execute(args: &UsersArgs, config: &ClientConfig, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        UsersCommand::List {
            search,
            activity,
            pages,
        } => {
            let client = super::create_client(config).await?;
            let mut list = UserListController::new(client, &config.listing);
            list.apply_filters(search, *activity).await?;

            let mut rows: Vec<UserRow> = list.records().iter().map(UserRow::from).collect();
            let totals = list.totals();
            for _ in 1..*pages {
                if !list.has_next_page() {
                    break;
                }
                list.go_next().await?;
                rows.extend(list.records().iter().map(UserRow::from));
            }

            output::print_list(&rows, format);
            if format == OutputFormat::Table {
                output::print_kv("Total users", &totals.total_users.to_string());
                output::print_kv("Active", &totals.active_users.to_string());
                output::print_kv("Inactive", &totals.inactive_users.to_string());
                if let Some(cursor) = list.next_cursor().filter(|_| list.has_next_page()) {
                    output::print_kv("Next cursor", cursor);
                }
            }
        }
        UsersCommand::Export {
            scope,
            file_format,
            emails,
            output: dir,
        } => {
            if *scope == ExportScope::Selected && emails.is_empty() {
                return Err(AppError::validation(
                    "A selected export needs at least one --email",
                ));
            }
            let file_format = file_format.unwrap_or(config.export.default_format);
            let export = ExportController::new(super::create_client(config).await?);

            let mut report = |bytes: u64| eprint!("\rDownloaded {bytes} bytes");
            let blob = export
                .export_scope(*scope, emails, file_format, Some(&mut report))
                .await?;
            if *scope != ExportScope::Selected {
                eprintln!();
            }

            let name = download_file_name(*scope, file_format, Utc::now().timestamp_millis());
            let dir = dir
                .clone()
                .unwrap_or_else(|| PathBuf::from(&config.export.output_dir));
            let path = save_blob(&dir, &name, &blob).await?;
            output::print_success(&format!(
                "Saved {} ({} bytes, {})",
                path.display(),
                blob.size(),
                blob.mime_type
            ));
        }
        UsersCommand::Import { file } => {
            let client = super::create_client(config).await?;
            let results = import_users_file(&client, file).await?;
            match format {
                OutputFormat::Json => output::print_json(&results),
                OutputFormat::Table => {
                    output::print_success(&format!("Processed {} employees", results.processed()));
                    output::print_kv("Added", &results.new_employees_added.to_string());
                    output::print_kv("Unchanged", &results.unchanged_employees.to_string());
                    output::print_kv("Removed", &results.former_employees_removed.to_string());
                    for message in results.error_messages() {
                        output::print_warning(&message);
                    }
                }
            }
        }
        UsersCommand::Template { output: path } => {
            let path = path
                .clone()
                .unwrap_or_else(|| PathBuf::from(TEMPLATE_FILE_NAME));
            write_template(&path).await?;
            output::print_success(&format!("Template written to {}", path.display()));
        }
    }

    Ok(())
}
