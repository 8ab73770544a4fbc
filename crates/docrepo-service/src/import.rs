//! Bulk user import from spreadsheets.

use std::path::Path;

use bytes::Bytes;
use tracing::info;

use docrepo_client::ApiClient;
use docrepo_core::error::AppError;
use docrepo_core::result::AppResult;
use docrepo_entity::import::ImportResults;

/// Starter file offered to admins.
pub const IMPORT_TEMPLATE: &str =
    "fullname,email,ad-id\nJohn Doe,john@example.com,john123\nJane Smith,jane@example.com,jane456";

/// Default name of the template file.
pub const TEMPLATE_FILE_NAME: &str = "user_import_template.csv";

/// MIME type of an importable file, or a validation error for any
/// extension other than `.xlsx`, `.xls` or `.csv`.
pub fn import_mime_type(file_name: &str) -> AppResult<&'static str> {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "xlsx" => Ok("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
        "xls" => Ok("application/vnd.ms-excel"),
        "csv" => Ok("text/csv"),
        _ => Err(AppError::validation(format!(
            "Unsupported import file '{file_name}': use .xlsx, .xls or .csv"
        ))),
    }
}

/// Upload an import file. The extension is checked before any request.
pub async fn import_users(client: &ApiClient, file_name: &str, content: Bytes) -> AppResult<ImportResults> {
    let mime_type = import_mime_type(file_name)?;
    let response = client.import_users(file_name, mime_type, content).await?;
    let results = response.results;
    info!(
        added = results.new_employees_added,
        unchanged = results.unchanged_employees,
        removed = results.former_employees_removed,
        errors = results.errors.len(),
        "User import finished"
    );
    Ok(results)
}

/// Read an import file from disk and upload it.
pub async fn import_users_file(client: &ApiClient, path: &Path) -> AppResult<ImportResults> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| AppError::validation(format!("'{}' is not a file", path.display())))?;
    import_mime_type(&file_name)?;
    let content = tokio::fs::read(path).await?;
    import_users(client, &file_name, Bytes::from(content)).await
}

/// Write [`IMPORT_TEMPLATE`] to `path`.
pub async fn write_template(path: &Path) -> AppResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, IMPORT_TEMPLATE).await?;
    Ok(())
}
