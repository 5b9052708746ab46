//! In-memory [`NoteStore`] used to stub the notebook in tests and previews.

use crate::{filter_notes, resolve_title, JotterError, Note, NoteStore, Result, UpdateRequest};
use uuid::Uuid;

/// A volatile note store holding notes in insertion order.
#[derive(Debug, Default, Clone)]
pub struct MemoryNoteStore {
    notes: Vec<Note>,
}

impl MemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of notes currently held.
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

impl NoteStore for MemoryNoteStore {
    fn search(&self, query: &str) -> Result<Vec<Note>> {
        Ok(filter_notes(&self.notes, query))
    }

    fn get(&self, id: &str) -> Result<Note> {
        self.notes
            .iter()
            .find(|n| n.id == id)
            .cloned()
            .ok_or_else(|| JotterError::NoteNotFound(id.to_string()))
    }

    fn add(&mut self, title: &str, content: &str) -> Result<Note> {
        let now = chrono::Utc::now().timestamp();
        let note = Note {
            id: Uuid::new_v4().to_string(),
            title: resolve_title(title),
            content: content.to_string(),
            created_at: now,
            modified_at: now,
        };
        self.notes.push(note.clone());
        Ok(note)
    }

    fn update(&mut self, request: &UpdateRequest) -> Result<Note> {
        let note = self
            .notes
            .iter_mut()
            .find(|n| n.id == request.id)
            .ok_or_else(|| JotterError::NoteNotFound(request.id.clone()))?;

        if note.title != request.title || note.content != request.content {
            note.title = request.title.clone();
            note.content = request.content.clone();
            note.modified_at = chrono::Utc::now().timestamp();
        }
        Ok(note.clone())
    }

    fn delete_by_id(&mut self, id: &str) -> Result<bool> {
        let before = self.notes.len();
        self.notes.retain(|n| n.id != id);
        Ok(self.notes.len() != before)
    }

    fn delete_all(&mut self) -> Result<usize> {
        let count = self.notes.len();
        self.notes.clear();
        Ok(count)
    }
}
