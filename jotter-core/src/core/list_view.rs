//! State behind the note list screen.
//!
//! [`NoteList`] caches the full store result and derives the visible notes
//! from it whenever the query changes. A store result that has not arrived
//! yet is reported as [`ListState::Loading`], never as an empty list.

use crate::{filter_notes, Note, NoteStore, Result};

/// What the list screen should render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListState {
    /// The store has not produced a result yet.
    Loading,
    /// The store result is available but no note matches the query.
    Empty,
    /// Notes to show, in store order.
    Populated(Vec<Note>),
}

impl ListState {
    /// Visible notes; empty while loading or when nothing matches.
    pub fn notes(&self) -> &[Note] {
        match self {
            Self::Populated(notes) => notes,
            Self::Loading | Self::Empty => &[],
        }
    }
}

/// Search-as-you-type view model over a [`NoteStore`] result.
#[derive(Debug, Default)]
pub struct NoteList {
    all: Option<Vec<Note>>,
    query: String,
}

impl NoteList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-fetches the full note set from `store`.
    ///
    /// # Errors
    ///
    /// Propagates any store failure; the previously cached set is kept.
    pub fn refresh(&mut self, store: &dyn NoteStore) -> Result<()> {
        let notes = store.search("")?;
        log::debug!("note list refreshed with {} notes", notes.len());
        self.all = Some(notes);
        Ok(())
    }

    /// Installs a store result obtained elsewhere.
    pub fn set_notes(&mut self, notes: Vec<Note>) {
        self.all = Some(notes);
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Number of cached notes, or `None` while loading.
    pub fn total(&self) -> Option<usize> {
        self.all.as_ref().map(Vec::len)
    }

    /// Derives the visible list from the cached notes and the current query.
    pub fn state(&self) -> ListState {
        match &self.all {
            None => ListState::Loading,
            Some(all) => {
                let visible = filter_notes(all, &self.query);
                if visible.is_empty() {
                    ListState::Empty
                } else {
                    ListState::Populated(visible)
                }
            }
        }
    }
}
