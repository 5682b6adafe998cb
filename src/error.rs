use std::path::PathBuf;

use thiserror::Error;
use tracing::warn;

use crate::catalog::Category;

/// Domain-specific errors for the step palette
#[derive(Error, Debug)]
pub enum PaletteError {
    #[error("{category:?} element '{title}' has no identity (neither uri nor name)")]
    MissingIdentity { category: Category, title: String },

    #[error("Unknown category token: '{0}'")]
    UnknownToken(String),

    #[error("Failed to read catalog '{path}': {source}")]
    Catalog {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog: {0}")]
    CatalogParse(#[source] serde_json::Error),

    #[error("Preference store I/O failed for '{path}': {source}")]
    PreferenceIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse preference store: {0}")]
    PreferenceParse(#[source] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl PaletteError {
    /// Short message suitable for a status line
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingIdentity { title, .. } => {
                format!("'{}' cannot be selected: it has no identity", title)
            }
            Self::UnknownToken(token) => format!("Unknown category '{}'", token),
            Self::Catalog { path, .. } => format!("Could not read catalog {}", path.display()),
            Self::CatalogParse(_) => "Catalog file is not valid JSON".to_string(),
            Self::PreferenceIo { path, .. } => {
                format!("Could not update preferences at {}", path.display())
            }
            Self::PreferenceParse(_) => "Preference file is not valid JSON".to_string(),
            Self::Config(msg) => format!("Configuration issue: {}", msg),
        }
    }
}

pub type Result<T> = std::result::Result<T, PaletteError>;

/// Extension trait for silent error logging with caller location tracking.
/// Use when the operation is recoverable and the user doesn't need to know.
///
/// ```ignore
/// use step_palette::error::ResultExt;
///
/// let config = load_config_from(&path).warn_on_err();
/// ```
pub trait ResultExt<T> {
    /// Log as warning with caller location and return None.
    fn warn_on_err(self) -> Option<T>;
}

impl<T, E: std::fmt::Debug> ResultExt<T> for std::result::Result<T, E> {
    #[track_caller]
    fn warn_on_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                let caller = std::panic::Location::caller();
                warn!(
                    error = ?error,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation had warning"
                );
                None
            }
        }
    }
}
