use crate::{FileTokenStore, MemoryTokenStore, TokenStore};

#[test]
fn given_missing_file_when_loaded_then_no_token() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileTokenStore::at(dir.path().join("session.token"));

    assert!(store.load().unwrap().is_none());
}

#[test]
fn given_saved_token_when_loaded_then_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileTokenStore::at(dir.path().join("session.token"));

    store.save("my-token").unwrap();

    assert_eq!(store.load().unwrap().as_deref(), Some("my-token"));
}

#[test]
fn given_missing_parent_directory_when_saved_then_it_is_created() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileTokenStore::at(dir.path().join("nested").join("session.token"));

    store.save("my-token").unwrap();

    assert_eq!(store.load().unwrap().as_deref(), Some("my-token"));
}

#[test]
fn given_cleared_store_when_loaded_then_no_token() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileTokenStore::at(dir.path().join("session.token"));

    store.save("my-token").unwrap();
    store.clear().unwrap();

    assert!(store.load().unwrap().is_none());
    // Clearing twice is fine.
    store.clear().unwrap();
}

#[test]
fn given_whitespace_only_file_when_loaded_then_treated_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.token");
    std::fs::write(&path, "\n  \n").unwrap();

    let store = FileTokenStore::at(path);

    assert!(store.load().unwrap().is_none());
}

#[test]
fn given_memory_store_then_save_load_clear_round_trip() {
    let store = MemoryTokenStore::new();

    assert!(store.load().unwrap().is_none());
    store.save("tok").unwrap();
    assert_eq!(store.load().unwrap().as_deref(), Some("tok"));
    store.clear().unwrap();
    assert!(store.load().unwrap().is_none());
}
