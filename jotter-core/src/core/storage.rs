use crate::Result;
use rusqlite::Connection;
use std::path::Path;

/// Owns the SQLite connection of a notebook and keeps its schema current.
pub struct Storage {
    conn: Connection,
}

impl Storage {
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(include_str!("schema.sql"))?;
        Ok(Self { conn })
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(include_str!("schema.sql"))?;
        Ok(Self { conn })
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut conn = Connection::open(path)?;

        // Validate database structure
        let table_count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master
             WHERE type='table'
             AND name IN ('notes', 'operations', 'notebook_meta')",
            [],
            |row| row.get(0),
        )?;

        if table_count != 3 {
            return Err(crate::JotterError::InvalidNotebook(
                "Not a valid Jotter notebook".to_string(),
            ));
        }

        // Migrate: notebooks written before edits were tracked lack modified_at
        let column_exists: bool = conn.query_row(
            "SELECT COUNT(*) FROM pragma_table_info('notes') WHERE name='modified_at'",
            [],
            |row| row.get::<_, i64>(0).map(|count| count > 0),
        )?;

        if !column_exists {
            log::info!("migrating notebook: adding notes.modified_at");
            // Column and backfill land together or not at all.
            let tx = conn.transaction()?;
            tx.execute_batch(
                "ALTER TABLE notes ADD COLUMN modified_at INTEGER NOT NULL DEFAULT 0;
                 UPDATE notes SET modified_at = created_at;",
            )?;
            tx.commit()?;
        }

        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }
}
