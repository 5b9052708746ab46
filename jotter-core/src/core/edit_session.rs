//! Auto-saving editor state for a single note.
//!
//! Every edit is persisted as a full-state [`UpdateRequest`], either on the
//! keystroke itself ([`AutoSavePolicy::Immediate`]) or once typing pauses
//! ([`AutoSavePolicy::Debounced`]). Time is supplied by the caller, so the
//! session needs no timer thread and is deterministic under test.

use crate::{Note, NoteStore, Result, UpdateRequest};
use std::time::{Duration, Instant};

/// When edits reach the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoSavePolicy {
    /// Save on every edit.
    Immediate,
    /// Save once `debounce` has passed since the last edit, or `max_wait`
    /// since the first unsaved edit, whichever comes first.
    Debounced { debounce: Duration, max_wait: Duration },
}

impl Default for AutoSavePolicy {
    fn default() -> Self {
        Self::Debounced {
            debounce: Duration::from_millis(500),
            max_wait: Duration::from_secs(3),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct PendingEdits {
    first_edit_at: Instant,
    last_edit_at: Instant,
}

/// Editor for one existing note.
#[derive(Debug)]
pub struct EditSession {
    saved: Note,
    title: String,
    content: String,
    policy: AutoSavePolicy,
    pending: Option<PendingEdits>,
}

impl EditSession {
    /// Starts editing `note` as last read from the store.
    pub fn new(note: Note, policy: AutoSavePolicy) -> Self {
        Self {
            title: note.title.clone(),
            content: note.content.clone(),
            saved: note,
            policy,
            pending: None,
        }
    }

    pub fn note_id(&self) -> &str {
        &self.saved.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// The note as the store last confirmed it.
    pub fn saved(&self) -> &Note {
        &self.saved
    }

    /// `true` when the editor holds text the store has not seen.
    pub fn is_dirty(&self) -> bool {
        self.title != self.saved.title || self.content != self.saved.content
    }

    /// Replaces the title. Returns `true` if the edit was saved right away.
    pub fn set_title(&mut self, store: &mut dyn NoteStore, title: &str, now: Instant) -> Result<bool> {
        self.title = title.to_string();
        self.record_edit(store, now)
    }

    /// Replaces the content. Returns `true` if the edit was saved right away.
    pub fn set_content(&mut self, store: &mut dyn NoteStore, content: &str, now: Instant) -> Result<bool> {
        self.content = content.to_string();
        self.record_edit(store, now)
    }

    /// Saves pending edits whose debounce window has elapsed.
    pub fn poll(&mut self, store: &mut dyn NoteStore, now: Instant) -> Result<bool> {
        match (self.policy, self.pending) {
            (AutoSavePolicy::Debounced { debounce, max_wait }, Some(pending))
                if now.duration_since(pending.last_edit_at) >= debounce
                    || now.duration_since(pending.first_edit_at) >= max_wait =>
            {
                self.save(store)
            }
            _ => Ok(false),
        }
    }

    /// Saves any unsaved edits immediately, e.g. when leaving the editor.
    pub fn flush(&mut self, store: &mut dyn NoteStore) -> Result<bool> {
        if self.pending.is_none() && !self.is_dirty() {
            return Ok(false);
        }
        self.save(store)
    }

    /// Deletes the note being edited, discarding unsaved edits.
    ///
    /// Returns whether the store still held the note.
    pub fn delete(self, store: &mut dyn NoteStore) -> Result<bool> {
        if self.pending.is_some() {
            log::debug!("discarding unsaved edits to {}", self.saved.id);
        }
        store.delete_by_id(&self.saved.id)
    }

    fn record_edit(&mut self, store: &mut dyn NoteStore, now: Instant) -> Result<bool> {
        match self.policy {
            AutoSavePolicy::Immediate => self.save(store),
            AutoSavePolicy::Debounced { .. } => {
                self.pending = Some(match self.pending {
                    Some(p) => PendingEdits { last_edit_at: now, ..p },
                    None => PendingEdits {
                        first_edit_at: now,
                        last_edit_at: now,
                    },
                });
                Ok(false)
            }
        }
    }

    fn save(&mut self, store: &mut dyn NoteStore) -> Result<bool> {
        let request = UpdateRequest::new(self.saved.id.clone(), self.title.clone(), self.content.clone());
        // On failure `pending` is kept so the next poll or flush retries.
        self.saved = store.update(&request)?;
        self.pending = None;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{JotterError, MemoryNoteStore};

    const DEBOUNCE: Duration = Duration::from_millis(300);
    const MAX_WAIT: Duration = Duration::from_secs(2);

    fn debounced() -> AutoSavePolicy {
        AutoSavePolicy::Debounced {
            debounce: DEBOUNCE,
            max_wait: MAX_WAIT,
        }
    }

    fn setup() -> (MemoryNoteStore, Note) {
        let mut store = MemoryNoteStore::new();
        let note = store.add("Groceries", "milk").unwrap();
        (store, note)
    }

    #[test]
    fn test_immediate_saves_every_keystroke() {
        let (mut store, note) = setup();
        let mut session = EditSession::new(note.clone(), AutoSavePolicy::Immediate);
        let t0 = Instant::now();

        for (i, text) in ["milk,", "milk, e", "milk, eggs"].iter().enumerate() {
            let saved = session
                .set_content(&mut store, text, t0 + Duration::from_millis(i as u64))
                .unwrap();
            assert!(saved);
            assert_eq!(store.get(&note.id).unwrap().content, *text);
        }
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_debounced_waits_for_pause() {
        let (mut store, note) = setup();
        let mut session = EditSession::new(note.clone(), debounced());
        let t0 = Instant::now();

        assert!(!session.set_title(&mut store, "Shopping", t0).unwrap());
        assert!(session.is_dirty());
        assert!(!session.poll(&mut store, t0 + DEBOUNCE / 2).unwrap());
        assert_eq!(store.get(&note.id).unwrap().title, "Groceries");

        assert!(session.poll(&mut store, t0 + DEBOUNCE).unwrap());
        assert_eq!(store.get(&note.id).unwrap().title, "Shopping");
        assert!(!session.is_dirty());

        // Nothing pending any more.
        assert!(!session.poll(&mut store, t0 + DEBOUNCE * 10).unwrap());
    }

    #[test]
    fn test_debounced_saves_full_state() {
        let (mut store, note) = setup();
        let mut session = EditSession::new(note.clone(), debounced());
        let t0 = Instant::now();

        session.set_title(&mut store, "Shopping", t0).unwrap();
        session.set_content(&mut store, "milk, eggs", t0).unwrap();
        session.poll(&mut store, t0 + DEBOUNCE).unwrap();

        let stored = store.get(&note.id).unwrap();
        assert_eq!(stored.title, "Shopping");
        assert_eq!(stored.content, "milk, eggs");
    }

    #[test]
    fn test_debounced_max_wait_forces_save_while_typing() {
        let (mut store, note) = setup();
        let mut session = EditSession::new(note.clone(), debounced());
        let t0 = Instant::now();
        let step = DEBOUNCE / 2;

        let mut now = t0;
        let mut text = String::from("milk");
        while now.duration_since(t0) < MAX_WAIT {
            text.push('!');
            session.set_content(&mut store, &text, now).unwrap();
            now += step;
            let saved = session.poll(&mut store, now).unwrap();
            if now.duration_since(t0) < MAX_WAIT {
                assert!(!saved);
            }
        }
        assert!(!session.is_dirty());
        assert_eq!(store.get(&note.id).unwrap().content, text);
    }

    #[test]
    fn test_flush_saves_pending_edits() {
        let (mut store, note) = setup();
        let mut session = EditSession::new(note.clone(), debounced());

        session.set_title(&mut store, "Shopping", Instant::now()).unwrap();
        assert!(session.flush(&mut store).unwrap());
        assert_eq!(store.get(&note.id).unwrap().title, "Shopping");
        assert!(!session.flush(&mut store).unwrap());
    }

    #[test]
    fn test_delete_discards_pending_edits() {
        let (mut store, note) = setup();
        let mut session = EditSession::new(note, debounced());
        session.set_title(&mut store, "Gone", Instant::now()).unwrap();

        assert!(session.delete(&mut store).unwrap());
        assert!(store.is_empty());
    }

    #[test]
    fn test_failed_save_stays_dirty() {
        let (mut store, note) = setup();
        let mut session = EditSession::new(note.clone(), AutoSavePolicy::Immediate);
        store.delete_by_id(&note.id).unwrap();

        let err = session.set_title(&mut store, "Orphan", Instant::now()).unwrap_err();
        assert!(matches!(err, JotterError::NoteNotFound(_)));
        assert!(session.is_dirty());
        assert_eq!(session.title(), "Orphan");
    }

    #[test]
    fn test_default_policy_is_debounced() {
        assert!(matches!(AutoSavePolicy::default(), AutoSavePolicy::Debounced { .. }));
    }
}
