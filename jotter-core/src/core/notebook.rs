//! SQLite-backed note store.

use crate::{
    filter_notes, resolve_title, JotterError, Note, NoteStore, Operation, OperationLog,
    OperationSummary, PurgeStrategy, Result, Storage, UpdateRequest,
};
use log::{debug, info};
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;
use uuid::Uuid;

/// An open Jotter notebook backed by a SQLite database.
///
/// `Notebook` is the durable [`NoteStore`]. Every mutation runs in its own
/// transaction together with the matching [`Operation`] log entry, so the log
/// never disagrees with the notes table.
pub struct Notebook {
    storage: Storage,
    operation_log: OperationLog,
}

impl Notebook {
    /// Creates a new notebook database at `path` and initialises the schema.
    ///
    /// # Errors
    ///
    /// Returns [`crate::JotterError::Database`] for any SQLite failure.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let storage = Storage::create(&path)?;
        let notebook = Self::with_storage(storage)?;
        info!("created notebook at {}", path.as_ref().display());
        Ok(notebook)
    }

    /// Opens an existing notebook database at `path`, migrating it if needed.
    ///
    /// # Errors
    ///
    /// Returns [`crate::JotterError::InvalidNotebook`] if the file is not a
    /// Jotter notebook, or [`crate::JotterError::Database`] for any SQLite failure.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let storage = Storage::open(&path)?;
        debug!("opened notebook at {}", path.as_ref().display());
        Ok(Self {
            storage,
            operation_log: default_log(),
        })
    }

    /// Opens `path` if it exists, otherwise creates it (and its parent directories).
    pub fn open_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::open(path);
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        Self::create(path)
    }

    /// Creates a throwaway notebook that lives only as long as the value.
    pub fn open_in_memory() -> Result<Self> {
        Self::with_storage(Storage::in_memory()?)
    }

    fn with_storage(storage: Storage) -> Result<Self> {
        let created_at = chrono::Utc::now().timestamp().to_string();
        storage.connection().execute(
            "INSERT OR IGNORE INTO notebook_meta (key, value) VALUES (?, ?)",
            ["created_at", created_at.as_str()],
        )?;
        Ok(Self {
            storage,
            operation_log: default_log(),
        })
    }

    /// Returns the underlying SQLite connection.
    pub fn connection(&self) -> &Connection {
        self.storage.connection()
    }

    /// Unix timestamp at which this notebook file was created.
    pub fn created_at(&self) -> Result<Option<i64>> {
        let value: Option<String> = self
            .connection()
            .query_row(
                "SELECT value FROM notebook_meta WHERE key = 'created_at'",
                [],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value.and_then(|v| v.parse().ok()))
    }

    /// Returns every note in insertion order.
    pub fn list_all_notes(&self) -> Result<Vec<Note>> {
        let mut stmt = self.connection().prepare(
            "SELECT id, title, content, created_at, modified_at FROM notes ORDER BY seq",
        )?;
        let notes = stmt
            .query_map([], map_note_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(notes)
    }

    /// Returns the number of notes stored.
    pub fn count_notes(&self) -> Result<usize> {
        let count: i64 = self
            .connection()
            .query_row("SELECT COUNT(*) FROM notes", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Returns operation summaries matching the given filters, newest first.
    pub fn list_operations(
        &self,
        type_filter: Option<&str>,
        since: Option<i64>,
        until: Option<i64>,
    ) -> Result<Vec<OperationSummary>> {
        self.operation_log.list(self.connection(), type_filter, since, until)
    }

    /// Deletes all operations from the log. Returns the number deleted.
    pub fn purge_all_operations(&self) -> Result<usize> {
        self.operation_log.purge_all(self.connection())
    }

    fn commit_with_log<F>(&mut self, op: &Operation, apply: F) -> Result<usize>
    where
        F: FnOnce(&rusqlite::Transaction) -> Result<usize>,
    {
        let tx = self.storage.connection_mut().transaction()?;
        let changed = apply(&tx)?;
        self.operation_log.log(&tx, op)?;
        self.operation_log.purge_if_needed(&tx)?;
        tx.commit()?;
        Ok(changed)
    }
}

impl NoteStore for Notebook {
    /// Loads the full set and filters it in Rust; SQLite `LIKE` only folds
    /// ASCII case.
    fn search(&self, query: &str) -> Result<Vec<Note>> {
        let all = self.list_all_notes()?;
        Ok(filter_notes(&all, query))
    }

    fn get(&self, id: &str) -> Result<Note> {
        self.connection()
            .query_row(
                "SELECT id, title, content, created_at, modified_at FROM notes WHERE id = ?",
                [id],
                map_note_row,
            )
            .optional()?
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

        let op = Operation::CreateNote {
            operation_id: Uuid::new_v4().to_string(),
            timestamp: now,
            note_id: note.id.clone(),
            title: note.title.clone(),
            content: note.content.clone(),
        };
        self.commit_with_log(&op, |tx| {
            Ok(tx.execute(
                "INSERT INTO notes (id, title, content, created_at, modified_at)
                 VALUES (?, ?, ?, ?, ?)",
                rusqlite::params![note.id, note.title, note.content, note.created_at, note.modified_at],
            )?)
        })?;

        info!("added note {}", note.id);
        Ok(note)
    }

    fn update(&mut self, request: &UpdateRequest) -> Result<Note> {
        let current = self.get(&request.id)?;
        if current.title == request.title && current.content == request.content {
            debug!("note {} unchanged, skipping write", request.id);
            return Ok(current);
        }

        let now = chrono::Utc::now().timestamp();
        let op = Operation::UpdateNote {
            operation_id: Uuid::new_v4().to_string(),
            timestamp: now,
            note_id: request.id.clone(),
            title: request.title.clone(),
            content: request.content.clone(),
        };
        self.commit_with_log(&op, |tx| {
            let changed = tx.execute(
                "UPDATE notes SET title = ?1, content = ?2, modified_at = ?3 WHERE id = ?4",
                rusqlite::params![request.title, request.content, now, request.id],
            )?;
            // Row vanished since the read above; dropping the transaction rolls back.
            if changed == 0 {
                return Err(JotterError::NoteNotFound(request.id.clone()));
            }
            Ok(changed)
        })?;

        debug!("updated note {}", request.id);
        Ok(Note {
            title: request.title.clone(),
            content: request.content.clone(),
            modified_at: now,
            ..current
        })
    }

    fn delete_by_id(&mut self, id: &str) -> Result<bool> {
        let exists: bool = self.connection().query_row(
            "SELECT COUNT(*) FROM notes WHERE id = ?",
            [id],
            |row| row.get::<_, i64>(0).map(|count| count > 0),
        )?;
        if !exists {
            debug!("delete of missing note {id} ignored");
            return Ok(false);
        }

        let op = Operation::DeleteNote {
            operation_id: Uuid::new_v4().to_string(),
            timestamp: chrono::Utc::now().timestamp(),
            note_id: id.to_string(),
        };
        let changed = self.commit_with_log(&op, |tx| {
            Ok(tx.execute("DELETE FROM notes WHERE id = ?", [id])?)
        })?;

        info!("deleted note {id}");
        Ok(changed > 0)
    }

    fn delete_all(&mut self) -> Result<usize> {
        let tx = self.storage.connection_mut().transaction()?;
        let deleted = tx.execute("DELETE FROM notes", [])?;
        let op = Operation::DeleteAllNotes {
            operation_id: Uuid::new_v4().to_string(),
            timestamp: chrono::Utc::now().timestamp(),
            deleted_count: deleted,
        };
        self.operation_log.log(&tx, &op)?;
        self.operation_log.purge_if_needed(&tx)?;
        tx.commit()?;

        info!("deleted all notes ({deleted})");
        Ok(deleted)
    }
}

fn default_log() -> OperationLog {
    OperationLog::new(PurgeStrategy::KeepLast { keep_last: 1000 })
}

/// Row-mapping closure for `rusqlite::Row` → [`Note`].
///
/// Expects the column order `id, title, content, created_at, modified_at`.
fn map_note_row(row: &rusqlite::Row) -> rusqlite::Result<Note> {
    Ok(Note {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        created_at: row.get(3)?,
        modified_at: row.get(4)?,
    })
}
