//! Error types for the Jotter core library.

use thiserror::Error;

/// All errors that can occur within the Jotter core library.
#[derive(Debug, Error)]
pub enum JotterError {
    /// A SQLite operation failed.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A note ID was requested that does not exist in the store.
    #[error("Note not found: {0}")]
    NoteNotFound(String),

    /// The opened file is not a valid Jotter notebook.
    #[error("Invalid notebook: {0}")]
    InvalidNotebook(String),

    /// An I/O operation on the filesystem failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A logged operation could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias that pins the error type to [`JotterError`].
pub type Result<T> = std::result::Result<T, JotterError>;

impl JotterError {
    /// Returns a short, human-readable message suitable for display to the end user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Database(e) => format!("Failed to save: {e}"),
            Self::NoteNotFound(_) => "Note no longer exists".to_string(),
            Self::InvalidNotebook(_) => "Could not open notebook file".to_string(),
            Self::Io(e) => format!("File error: {e}"),
            Self::Json(e) => format!("Data format error: {e}"),
        }
    }
}
