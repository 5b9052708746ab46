//! Both store backends must honour the same observable contract.

use jotter_core::{
    filter_notes, AutoSavePolicy, EditSession, ListState, MemoryNoteStore, NoteList, NoteStore,
    Notebook, UpdateRequest,
};
use std::time::Instant;

fn titles(notes: &[jotter_core::Note]) -> Vec<String> {
    notes.iter().map(|n| n.title.clone()).collect()
}

fn exercise(store: &mut dyn NoteStore) {
    let groceries = store.add("Groceries", "milk, eggs").unwrap();
    let todo = store.add("Todo", "buy milk").unwrap();
    let untitled = store.add("", "x").unwrap();
    assert_eq!(untitled.title, "Untitled");

    let all = store.search("").unwrap();
    assert_eq!(titles(&all), vec!["Groceries", "Todo", "Untitled"]);

    for query in ["milk", "EGGS", "x", "o", "nothing", ""] {
        assert_eq!(store.search(query).unwrap(), filter_notes(&all, query), "query {query:?}");
    }

    let request = UpdateRequest::new(&todo.id, "Todo", "buy oat milk");
    let first = store.update(&request).unwrap();
    assert_eq!(store.update(&request).unwrap(), first);

    assert!(store.delete_by_id(&groceries.id).unwrap());
    assert!(!store.delete_by_id(&groceries.id).unwrap());
    assert_eq!(titles(&store.search("milk").unwrap()), vec!["Todo"]);

    assert_eq!(store.delete_all().unwrap(), 2);
    assert!(store.search("").unwrap().is_empty());
}

#[test]
fn memory_store_honours_contract() {
    exercise(&mut MemoryNoteStore::new());
}

#[test]
fn notebook_honours_contract() {
    exercise(&mut Notebook::open_in_memory().unwrap());
}

#[test]
fn list_and_edit_flow_against_notebook_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.jotter");
    let mut notebook = Notebook::create(&path).unwrap();

    let mut list = NoteList::new();
    assert_eq!(list.state(), ListState::Loading);
    list.refresh(&notebook).unwrap();
    assert_eq!(list.state(), ListState::Empty);

    let note = notebook.add("Groceries", "milk").unwrap();
    let mut session = EditSession::new(note.clone(), AutoSavePolicy::Immediate);
    session.set_content(&mut notebook, "milk, eggs", Instant::now()).unwrap();
    drop(notebook);

    let notebook = Notebook::open(&path).unwrap();
    list.refresh(&notebook).unwrap();
    list.set_query("EGGS");
    match list.state() {
        ListState::Populated(notes) => {
            assert_eq!(notes.len(), 1);
            assert_eq!(notes[0].id, note.id);
            assert_eq!(notes[0].content, "milk, eggs");
        }
        other => panic!("expected populated list, got {other:?}"),
    }
}
