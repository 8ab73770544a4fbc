//! Client configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! an optional TOML file plus `DOCREPO__*` environment variables. Every
//! field has a default, so an empty configuration is valid.

pub mod api;
pub mod logging;
pub mod transfer;
pub mod users;

use serde::{Deserialize, Serialize};

use self::api::{ApiConfig, SessionConfig};
use self::logging::LoggingConfig;
use self::transfer::{ExportConfig, UploadConfig};
use self::users::ListingConfig;

use crate::error::AppError;

/// Root client configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    /// REST API settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// Durable session store settings.
    #[serde(default)]
    pub session: SessionConfig,
    /// User listing settings.
    #[serde(default)]
    pub listing: ListingConfig,
    /// User export settings.
    #[serde(default)]
    pub export: ExportConfig,
    /// File and icon upload settings.
    #[serde(default)]
    pub upload: UploadConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ClientConfig {
    /// Load configuration.
    ///
    /// Merges `config/default.toml` (if present), the explicit file at
    /// `path` (if given), and environment variables prefixed with
    /// `DOCREPO` using `__` as the section separator.
    pub fn load(path: Option<&str>) -> Result<Self, AppError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false));

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(true));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix("DOCREPO")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_source() {
        let cfg: ClientConfig = config::Config::builder()
            .build()
            .expect("build")
            .try_deserialize()
            .expect("deserialize");
        assert_eq!(cfg.api.base_url, "http://localhost:3000");
        assert_eq!(cfg.listing.page_size, 20);
        assert_eq!(cfg.listing.search_debounce_ms, 600);
        assert_eq!(cfg.listing.active_window_days, 7);
        assert_eq!(cfg.upload.max_icon_bytes, 2 * 1024 * 1024);
        assert_eq!(cfg.logging.format, "pretty");
    }

    #[test]
    fn test_partial_override() {
        let cfg: ClientConfig = config::Config::builder()
            .set_override("api.base_url", "https://repo.example.com")
            .expect("override")
            .set_override("listing.page_size", 50)
            .expect("override")
            .build()
            .expect("build")
            .try_deserialize()
            .expect("deserialize");
        assert_eq!(cfg.api.base_url, "https://repo.example.com");
        assert_eq!(cfg.listing.page_size, 50);
        assert_eq!(cfg.listing.search_debounce_ms, 600);
    }
}
