//! Error types for the organizer

use thiserror::Error;

/// Result type alias for organizer operations
pub type Result<T> = std::result::Result<T, OrganizerError>;

/// Everything that can go wrong while mutating the store.
///
/// Validation variants are raised before any state is touched; the
/// `Io`/`Json` variants wrap filesystem and persistence failures.
#[derive(Error, Debug)]
pub enum OrganizerError {
    #[error("Name cannot be blank")]
    BlankName,

    #[error("The tab '{0}' already exists")]
    DuplicateCategory(String),

    #[error("A GDD with the file name '{0}' already exists in this tab")]
    DuplicateDocument(String),

    #[error("No tab named '{0}'")]
    CategoryNotFound(String),

    #[error("GDD not found in this tab")]
    DocumentNotFound,

    #[error("File system error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
