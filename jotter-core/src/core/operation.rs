//! Mutation records for the notebook operation log.

use serde::{Deserialize, Serialize};

/// A single note mutation recorded in the notebook operation log.
///
/// Every variant carries a stable `operation_id` and a wall-clock
/// `timestamp`. Updates record the complete title and content rather than a
/// diff, so replaying the log in any suffix order ends on a real note state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Operation {
    /// A new note was added.
    CreateNote {
        /// Stable UUID for this operation.
        operation_id: String,
        /// Unix timestamp (seconds) when the operation was created.
        timestamp: i64,
        /// ID assigned to the new note.
        note_id: String,
        /// Stored title, after the untitled fallback.
        title: String,
        content: String,
    },
    /// An existing note's title and content were replaced.
    UpdateNote {
        operation_id: String,
        timestamp: i64,
        note_id: String,
        title: String,
        content: String,
    },
    /// A single note was deleted.
    DeleteNote {
        operation_id: String,
        timestamp: i64,
        note_id: String,
    },
    /// The whole notebook was cleared.
    DeleteAllNotes {
        operation_id: String,
        timestamp: i64,
        /// Number of notes removed.
        deleted_count: usize,
    },
}

impl Operation {
    /// Returns the stable identifier for this operation.
    #[must_use]
    pub fn operation_id(&self) -> &str {
        match self {
            Self::CreateNote { operation_id, .. }
            | Self::UpdateNote { operation_id, .. }
            | Self::DeleteNote { operation_id, .. }
            | Self::DeleteAllNotes { operation_id, .. } => operation_id,
        }
    }

    /// Returns the wall-clock Unix timestamp (seconds) when this operation was created.
    #[must_use]
    pub fn timestamp(&self) -> i64 {
        match self {
            Self::CreateNote { timestamp, .. }
            | Self::UpdateNote { timestamp, .. }
            | Self::DeleteNote { timestamp, .. }
            | Self::DeleteAllNotes { timestamp, .. } => *timestamp,
        }
    }

    /// Returns the note this operation touched, if it targets a single note.
    #[must_use]
    pub fn note_id(&self) -> Option<&str> {
        match self {
            Self::CreateNote { note_id, .. }
            | Self::UpdateNote { note_id, .. }
            | Self::DeleteNote { note_id, .. } => Some(note_id),
            Self::DeleteAllNotes { .. } => None,
        }
    }

    /// Name stored in the `operation_type` column.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::CreateNote { .. } => "CreateNote",
            Self::UpdateNote { .. } => "UpdateNote",
            Self::DeleteNote { .. } => "DeleteNote",
            Self::DeleteAllNotes { .. } => "DeleteAllNotes",
        }
    }
}
