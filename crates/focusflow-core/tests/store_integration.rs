//! On-disk storage integration tests.

use tempfile::tempdir;

use focusflow_core::store::{
    ApiKeyStore, ChatMessage, ChatStore, DataTransfer, SessionStore, SqliteStore,
};

#[test]
fn sessions_survive_a_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("focusflow.db");

    {
        let store = SqliteStore::open_at(&path).unwrap();
        let sessions = SessionStore::new(&store);
        sessions.append(1500, "First block of the day.").unwrap();
        sessions.append(3000, "Long afternoon session.").unwrap();
    }

    let store = SqliteStore::open_at(&path).unwrap();
    let listed = SessionStore::new(&store).list().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].notes, "First block of the day.");
    assert_eq!(listed[1].duration_secs, 3000);
}

#[test]
fn export_import_round_trips_across_databases() {
    let dir = tempdir().unwrap();

    let source = SqliteStore::open_at(&dir.path().join("source.db")).unwrap();
    let sessions = SessionStore::new(&source);
    sessions.append(1500, "Reviewed flashcards.").unwrap();
    ChatStore::new(&source)
        .replace(&[
            ChatStore::greeting(),
            ChatMessage::user("How do I stay motivated?"),
            ChatMessage::model("Track streaks, not hours.", Some(1.1)),
        ])
        .unwrap();

    let document = DataTransfer::new(&source).export().unwrap();

    let target = SqliteStore::open_at(&dir.path().join("target.db")).unwrap();
    DataTransfer::new(&target).import(&document).unwrap();

    assert_eq!(
        SessionStore::new(&target).list().unwrap(),
        SessionStore::new(&source).list().unwrap()
    );
    assert_eq!(
        ChatStore::new(&target).list().unwrap(),
        ChatStore::new(&source).list().unwrap()
    );
}

#[test]
fn api_key_persists_in_the_same_database() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("focusflow.db");

    {
        let store = SqliteStore::open_at(&path).unwrap();
        ApiKeyStore::new(&store).set("AIza-disk-key").unwrap();
    }

    let store = SqliteStore::open_at(&path).unwrap();
    assert_eq!(
        ApiKeyStore::new(&store).get().unwrap().unwrap(),
        "AIza-disk-key"
    );
}
