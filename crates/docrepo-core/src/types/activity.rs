//! Activity filter for the user listing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Three-way engagement filter applied to the user listing and export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityFilter {
    /// No filtering.
    #[default]
    All,
    /// Users who signed in recently.
    Active,
    /// Everyone else.
    Inactive,
}

impl ActivityFilter {
    /// Query-string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    /// Value for the listing's `activity` parameter; `All` is sent as no
    /// parameter at all.
    pub fn as_query(&self) -> Option<&'static str> {
        match self {
            Self::All => None,
            other => Some(other.as_str()),
        }
    }
}

impl fmt::Display for ActivityFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityFilter {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            other => Err(AppError::validation(format!(
                "Unknown activity filter '{other}' (expected all, active or inactive)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_omitted_from_query() {
        assert_eq!(ActivityFilter::All.as_query(), None);
        assert_eq!(ActivityFilter::Active.as_query(), Some("active"));
        assert_eq!(ActivityFilter::Inactive.as_query(), Some("inactive"));
    }

    #[test]
    fn test_parse() {
        assert_eq!("Active".parse::<ActivityFilter>().ok(), Some(ActivityFilter::Active));
        assert!("dormant".parse::<ActivityFilter>().is_err());
    }
}
