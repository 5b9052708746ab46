//! Core library for Jotter, a local-first note store with search-as-you-type.
//!
//! The primary entry point is [`Notebook`], which represents an open `.jotter`
//! database file. Front ends talk to it through the [`NoteStore`] trait so the
//! same list and edit logic can run against [`MemoryNoteStore`] in tests.
//!
//! Types are re-exported from their respective sub-modules for convenience;
//! consumers should import from the crate root rather than the `core` module.

pub mod core;

// Re-export commonly used types.
#[doc(inline)]
pub use core::{
    edit_session::{AutoSavePolicy, EditSession},
    error::{JotterError, Result},
    filter::{filter_notes, matches_query},
    list_view::{ListState, NoteList},
    memory::MemoryNoteStore,
    note::{resolve_title, Note, UNTITLED},
    notebook::Notebook,
    operation::Operation,
    operation_log::{OperationLog, OperationSummary, PurgeStrategy},
    storage::Storage,
    store::{NoteStore, UpdateRequest},
};
