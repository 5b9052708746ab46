//! Search-as-you-type filtering of the note list.
//!
//! The list view fetches the full note set once and re-derives the visible
//! subset from it on every query change, so this module must stay pure and
//! cheap: one linear scan, no allocation beyond the lower-cased query and the
//! per-note lower-cased fields.

use crate::Note;

/// Returns `true` if `query` occurs in the note's title or content,
/// ignoring case.
///
/// An empty query matches every note.
pub fn matches_query(note: &Note, query: &str) -> bool {
    contains_folded(note, &query.to_lowercase())
}

/// Returns the notes whose title or content contains `query` as a
/// case-insensitive substring, preserving the order of `notes`.
///
/// # Examples
///
/// ```rust
/// use jotter_core::{filter_notes, Note};
///
/// let notes = vec![Note {
///     id: "1".to_string(),
///     title: "Hello".to_string(),
///     content: String::new(),
///     created_at: 0,
///     modified_at: 0,
/// }];
/// assert_eq!(filter_notes(&notes, "HELLO").len(), 1);
/// assert!(filter_notes(&notes, "bye").is_empty());
/// ```
pub fn filter_notes(notes: &[Note], query: &str) -> Vec<Note> {
    if query.is_empty() {
        return notes.to_vec();
    }
    let needle = query.to_lowercase();
    notes
        .iter()
        .filter(|note| contains_folded(note, &needle))
        .cloned()
        .collect()
}

fn contains_folded(note: &Note, needle: &str) -> bool {
    note.title.to_lowercase().contains(needle) || note.content.to_lowercase().contains(needle)
}
