//! Integration tests for `HistoryStore` over the in-memory session store.
//!
//! These tests verify that:
//! - Appends beyond capacity keep exactly the newest turns in order
//! - Indexed deletion removes one turn and keeps the rest in order
//! - Out-of-range deletion changes nothing
//! - Clearing always leaves an empty log
//! - Sessions never see each other's turns

use std::sync::Arc;

use parley_conversation::{HistoryConfig, HistoryError, HistoryStore};
use parley_core::{SessionId, SessionStorage, Turn};
use parley_session::SessionManager;

fn store() -> (Arc<SessionManager>, HistoryStore<Arc<SessionManager>>) {
    let sessions = Arc::new(SessionManager::default());
    let store = HistoryStore::new(Arc::clone(&sessions));
    (sessions, store)
}

async fn seed(store: &HistoryStore<Arc<SessionManager>>, id: &SessionId, count: usize) {
    for i in 0..count {
        store
            .append(id, format!("user {i}"), format!("bot {i}"))
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn test_append_caps_history_at_fifty() {
    let (_, store) = store();
    let id = SessionId::new();

    seed(&store, &id, 120).await;

    let history = store.get_history(&id).await.unwrap();
    assert_eq!(history.len(), 50);
    let expected: Vec<Turn> = (70..120)
        .map(|i| Turn::new(format!("user {i}"), format!("bot {i}")))
        .collect();
    assert_eq!(history, expected);
}

#[tokio::test]
async fn test_custom_capacity() {
    let sessions = Arc::new(SessionManager::default());
    let store =
        HistoryStore::new(sessions).with_config(HistoryConfig::default().with_max_turns(3));
    let id = SessionId::new();

    seed(&store, &id, 5).await;

    let inputs: Vec<String> = store
        .get_history(&id)
        .await
        .unwrap()
        .iter()
        .map(|t| t.user_input().to_string())
        .collect();
    assert_eq!(inputs, vec!["user 2", "user 3", "user 4"]);
}

#[tokio::test]
async fn test_append_marks_session_permanent() {
    let (sessions, store) = store();
    let id = SessionId::new();
    assert!(!sessions.load(&id).await.unwrap().permanent);

    store.append(&id, "hello", "hi there").await.unwrap();

    let session = sessions.load(&id).await.unwrap();
    assert!(session.permanent);
    assert_eq!(session.history, vec![Turn::new("hello", "hi there")]);
}

#[tokio::test]
async fn test_delete_at_valid_index() {
    let (_, store) = store();
    let id = SessionId::new();
    seed(&store, &id, 4).await;

    let removed = store.delete_at(&id, 1).await.unwrap();

    assert_eq!(removed, Turn::new("user 1", "bot 1"));
    let inputs: Vec<String> = store
        .get_history(&id)
        .await
        .unwrap()
        .iter()
        .map(|t| t.user_input().to_string())
        .collect();
    assert_eq!(inputs, vec!["user 0", "user 2", "user 3"]);
}

#[tokio::test]
async fn test_delete_at_invalid_index_leaves_log_unchanged() {
    let (_, store) = store();
    let id = SessionId::new();
    seed(&store, &id, 3).await;
    let before = store.get_history(&id).await.unwrap();

    for index in [-1, 3, 99] {
        let err = store.delete_at(&id, index).await.unwrap_err();
        assert!(matches!(err, HistoryError::InvalidIndex { len: 3, .. }));
    }

    assert_eq!(store.get_history(&id).await.unwrap(), before);
}

#[tokio::test]
async fn test_delete_on_empty_history() {
    let (_, store) = store();
    let err = store.delete_at(&SessionId::new(), 0).await.unwrap_err();
    assert!(matches!(err, HistoryError::InvalidIndex { index: 0, len: 0 }));
}

#[tokio::test]
async fn test_clear_empties_history() {
    let (_, store) = store();
    let id = SessionId::new();

    store.clear(&id).await.unwrap();
    assert!(store.get_history(&id).await.unwrap().is_empty());

    seed(&store, &id, 60).await;
    store.clear(&id).await.unwrap();
    assert!(store.get_history(&id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_sessions_are_isolated() {
    let (_, store) = store();
    let alice = SessionId::new();
    let bob = SessionId::new();

    store.append(&alice, "from alice", "ok").await.unwrap();
    store.append(&bob, "from bob", "ok").await.unwrap();
    store.clear(&alice).await.unwrap();

    assert!(store.get_history(&alice).await.unwrap().is_empty());
    assert_eq!(
        store.get_history(&bob).await.unwrap(),
        vec![Turn::new("from bob", "ok")]
    );
}

#[tokio::test]
async fn test_dyn_storage() {
    let storage: Arc<dyn SessionStorage> = Arc::new(SessionManager::default());
    let store: HistoryStore = HistoryStore::new(storage);
    let id = SessionId::new();

    store.append(&id, "hello", "hi").await.unwrap();

    assert_eq!(store.get_history(&id).await.unwrap().len(), 1);
}
