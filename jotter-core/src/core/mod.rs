//! Internal domain modules for the Jotter core library.
//!
//! All public types from these modules are re-exported at the crate root
//! with `#[doc(inline)]`; import from there in preference to this module.

pub mod edit_session;
pub mod error;
pub mod filter;
pub mod list_view;
pub mod memory;
pub mod note;
pub mod notebook;
pub mod operation;
pub mod operation_log;
pub mod storage;
pub mod store;

#[doc(inline)]
pub use edit_session::{AutoSavePolicy, EditSession};
#[doc(inline)]
pub use error::{JotterError, Result};
#[doc(inline)]
pub use filter::{filter_notes, matches_query};
#[doc(inline)]
pub use list_view::{ListState, NoteList};
#[doc(inline)]
pub use memory::MemoryNoteStore;
#[doc(inline)]
pub use note::{resolve_title, Note, UNTITLED};
#[doc(inline)]
pub use notebook::Notebook;
#[doc(inline)]
pub use operation::Operation;
#[doc(inline)]
pub use operation_log::{OperationLog, OperationSummary, PurgeStrategy};
#[doc(inline)]
pub use storage::Storage;
#[doc(inline)]
pub use store::{NoteStore, UpdateRequest};
