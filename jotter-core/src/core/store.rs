//! The note store contract shared by every backend.
//!
//! Components never reach for a global store; they are handed a
//! `&dyn NoteStore` (or `&mut`) by their owner. [`crate::Notebook`] backs the
//! trait with SQLite and [`crate::MemoryNoteStore`] with a plain `Vec`.

use crate::{Note, Result};
use serde::{Deserialize, Serialize};

/// A full-state replacement of one note's editable fields.
///
/// Updates always carry both title and content, so whichever request is
/// applied last leaves the note in a state the user actually typed, never a
/// mix of two edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    pub id: String,
    pub title: String,
    pub content: String,
}

impl UpdateRequest {
    pub fn new(id: impl Into<String>, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Query and mutation operations on the durable note set.
pub trait NoteStore {
    /// Returns every note whose title or content contains `query`
    /// (case-insensitive), in insertion order.
    ///
    /// The result must equal [`crate::filter_notes`] applied to the full set.
    fn search(&self, query: &str) -> Result<Vec<Note>>;

    /// Fetches a single note by ID.
    ///
    /// # Errors
    ///
    /// Returns [`crate::JotterError::NoteNotFound`] if no note has that ID.
    fn get(&self, id: &str) -> Result<Note>;

    /// Creates a note, assigning a fresh ID. A blank title becomes
    /// [`crate::UNTITLED`].
    fn add(&mut self, title: &str, content: &str) -> Result<Note>;

    /// Replaces the title and content of an existing note.
    ///
    /// Re-applying a request whose values already match the stored note is a
    /// no-op: nothing is written and the returned note is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`crate::JotterError::NoteNotFound`] if no note has the
    /// request's ID.
    fn update(&mut self, request: &UpdateRequest) -> Result<Note>;

    /// Removes the note with `id`. Returns `false` if it did not exist, which
    /// is not an error.
    fn delete_by_id(&mut self, id: &str) -> Result<bool>;

    /// Removes every note and returns how many were deleted.
    fn delete_all(&mut self) -> Result<usize>;
}
