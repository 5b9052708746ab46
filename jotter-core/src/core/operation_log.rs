//! Durable operation log and purge strategies for a Jotter notebook.

use crate::{Operation, Result};
use rusqlite::{Connection, Transaction};
use serde::{Deserialize, Serialize};

/// Seconds in one day; used to convert `retention_days` to a Unix timestamp cutoff.
const SECONDS_PER_DAY: i64 = 86_400;

/// Controls which old operations are removed from the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurgeStrategy {
    /// Retain only the most recent `keep_last` operations.
    KeepLast { keep_last: usize },
    /// Retain operations for up to `retention_days` before removing them.
    MaxAge { retention_days: u32 },
}

/// A row of the operation log, without the full serialized payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationSummary {
    pub operation_id: String,
    pub timestamp: i64,
    pub operation_type: String,
    pub note_id: Option<String>,
}

/// Records note mutations to the `operations` table and purges stale entries.
pub struct OperationLog {
    strategy: PurgeStrategy,
}

impl OperationLog {
    /// Creates a new `OperationLog` with the given purge strategy.
    pub fn new(strategy: PurgeStrategy) -> Self {
        Self { strategy }
    }

    /// Serialises `op` and appends it to the `operations` table within `tx`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::JotterError::Database`] if the INSERT fails, or
    /// [`crate::JotterError::Json`] if `op` cannot be serialised.
    pub fn log(&self, tx: &Transaction, op: &Operation) -> Result<()> {
        let op_json = serde_json::to_string(op)?;

        tx.execute(
            "INSERT INTO operations (operation_id, timestamp, operation_type, note_id, operation_data)
             VALUES (?, ?, ?, ?, ?)",
            rusqlite::params![
                op.operation_id(),
                op.timestamp(),
                op.type_name(),
                op.note_id(),
                op_json,
            ],
        )?;

        Ok(())
    }

    /// Deletes old operations from the log according to the purge strategy.
    ///
    /// Call this after every [`log`](Self::log) call to keep the table bounded in size.
    ///
    /// # Errors
    ///
    /// Returns [`crate::JotterError::Database`] if the DELETE fails.
    pub fn purge_if_needed(&self, tx: &Transaction) -> Result<()> {
        match self.strategy {
            PurgeStrategy::KeepLast { keep_last } => {
                tx.execute(
                    "DELETE FROM operations WHERE id NOT IN (
                        SELECT id FROM operations ORDER BY id DESC LIMIT ?
                    )",
                    [keep_last as i64],
                )?;
            }
            PurgeStrategy::MaxAge { retention_days } => {
                let cutoff = chrono::Utc::now().timestamp()
                    - (i64::from(retention_days) * SECONDS_PER_DAY);
                tx.execute("DELETE FROM operations WHERE timestamp < ?", [cutoff])?;
            }
        }
        Ok(())
    }

    /// Returns operation summaries matching the given filters, newest first.
    ///
    /// `since` and `until` are inclusive Unix-second bounds.
    pub fn list(
        &self,
        conn: &Connection,
        type_filter: Option<&str>,
        since: Option<i64>,
        until: Option<i64>,
    ) -> Result<Vec<OperationSummary>> {
        let mut stmt = conn.prepare(
            "SELECT operation_id, timestamp, operation_type, note_id
             FROM operations
             WHERE (?1 IS NULL OR operation_type = ?1)
               AND (?2 IS NULL OR timestamp >= ?2)
               AND (?3 IS NULL OR timestamp <= ?3)
             ORDER BY id DESC",
        )?;
        let rows = stmt
            .query_map(rusqlite::params![type_filter, since, until], |row| {
                Ok(OperationSummary {
                    operation_id: row.get(0)?,
                    timestamp: row.get(1)?,
                    operation_type: row.get(2)?,
                    note_id: row.get(3)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// Deletes every logged operation. Returns the number deleted.
    pub fn purge_all(&self, conn: &Connection) -> Result<usize> {
        let deleted = conn.execute("DELETE FROM operations", [])?;
        Ok(deleted)
    }
}
