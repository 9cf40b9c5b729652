use async_trait::async_trait;
use breachwatch_persist::{
    ConversationRecord, ConversationStore, HistoryConfig, HistoryService, MemoryRecordStore,
    NewConversation, PersistError, RecordFilter, RecordStore, SortOrder,
};
use breachwatch_types::Session;
use chrono::{TimeZone, Utc};
use serde_json::json;
use std::sync::Arc;

struct UnavailableStore;

#[async_trait]
impl RecordStore for UnavailableStore {
    async fn insert(&self, _record: NewConversation) -> breachwatch_persist::Result<ConversationRecord> {
        Err(PersistError::Store("connection refused".to_string()))
    }

    async fn select(
        &self,
        _filter: &RecordFilter,
        _order: SortOrder,
    ) -> breachwatch_persist::Result<Vec<ConversationRecord>> {
        Err(PersistError::Store("connection refused".to_string()))
    }

    async fn delete(&self, _filter: &RecordFilter) -> breachwatch_persist::Result<u64> {
        Err(PersistError::Store("connection refused".to_string()))
    }
}

fn record(id: &str, user: &str, thread: &str, title: &str, minute: u32) -> ConversationRecord {
    ConversationRecord {
        id: id.to_string(),
        user_id: user.to_string(),
        query: format!("query {}", id),
        response: format!("response {}", id),
        thread_id: thread.to_string(),
        title: Some(title.to_string()),
        timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 10, minute, 0).unwrap(),
    }
}

fn service_for(server: &mockito::Server) -> HistoryService {
    HistoryService::new(&HistoryConfig::new(server.url())).unwrap()
}

#[tokio::test]
async fn test_read_by_thread_falls_back_when_service_fails() {
    let mut server = mockito::Server::new_async().await;
    let primary = server
        .mock("GET", "/history/u-1")
        .match_query(mockito::Matcher::UrlEncoded("thread_id".into(), "t-1".into()))
        .with_status(502)
        .create_async()
        .await;

    // Seeded out of order; the fallback must come back oldest first
    let direct = Arc::new(MemoryRecordStore::with_records(vec![
        record("3", "u-1", "t-1", "t", 30),
        record("1", "u-1", "t-1", "t", 10),
        record("x", "u-1", "t-2", "other", 15),
        record("2", "u-1", "t-1", "t", 20),
    ]));
    let store = ConversationStore::new(direct, Some(service_for(&server)));

    let records = store.read_by_thread(&Session::active("u-1"), "t-1").await;

    primary.assert_async().await;
    let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
}

#[tokio::test]
async fn test_primary_success_is_not_merged_with_fallback() {
    let mut server = mockito::Server::new_async().await;
    let _primary = server
        .mock("GET", "/history/u-1")
        .match_query(mockito::Matcher::UrlEncoded("thread_id".into(), "t-1".into()))
        .with_status(200)
        .with_body(
            json!({
                "status": "success",
                "history": [{
                    "id": "svc-1",
                    "user_id": "u-1",
                    "query": "what is log4shell",
                    "response": "A JNDI injection flaw.",
                    "timestamp": "2024-05-01T09:00:00+00:00",
                    "thread_id": "t-1",
                    "title": "log4shell"
                }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let direct = Arc::new(MemoryRecordStore::with_records(vec![record(
        "db-1", "u-1", "t-1", "t", 10,
    )]));
    let store = ConversationStore::new(direct, Some(service_for(&server)));

    let records = store.read_by_thread(&Session::active("u-1"), "t-1").await;

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, "svc-1");
}

#[tokio::test]
async fn test_malformed_service_payload_falls_back() {
    let mut server = mockito::Server::new_async().await;
    let _primary = server
        .mock("GET", "/history/u-1")
        .with_status(200)
        .with_body(json!({ "status": "success", "rows": [] }).to_string())
        .create_async()
        .await;

    let direct = Arc::new(MemoryRecordStore::with_records(vec![
        record("1", "u-1", "t-1", "t", 10),
        record("2", "u-1", "t-2", "t", 20),
    ]));
    let store = ConversationStore::new(direct, Some(service_for(&server)));

    let records = store.read_all_for_user(&Session::active("u-1")).await;

    let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["2", "1"]);
}

#[tokio::test]
async fn test_exhausted_paths_return_empty() {
    let mut server = mockito::Server::new_async().await;
    let _primary = server
        .mock("GET", "/history/u-1")
        .match_query(mockito::Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let store = ConversationStore::new(Arc::new(UnavailableStore), Some(service_for(&server)));
    let session = Session::active("u-1");

    assert!(store.read_by_thread(&session, "t-1").await.is_empty());

    let err = store.try_read_by_thread(&session, "t-1").await.unwrap_err();
    match err {
        PersistError::Exhausted { operation, last } => {
            assert_eq!(operation, "read_by_thread");
            assert!(last.contains("connection refused"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_anonymous_reads_do_no_io() {
    let mut server = mockito::Server::new_async().await;
    let primary = server
        .mock("GET", mockito::Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let store = ConversationStore::new(Arc::new(UnavailableStore), Some(service_for(&server)));

    assert!(store.read_all_for_user(&Session::Anonymous).await.is_empty());
    assert!(store.list_threads(&Session::Anonymous).await.is_empty());
    assert!(matches!(
        store.try_read_by_thread(&Session::Anonymous, "t").await,
        Err(PersistError::Unauthenticated)
    ));
    primary.assert_async().await;
}

#[tokio::test]
async fn test_list_threads_uses_service_listing() {
    let mut server = mockito::Server::new_async().await;
    let _primary = server
        .mock("GET", "/threads/u-1")
        .with_status(200)
        .with_body(
            json!({
                "status": "success",
                "threads": [
                    { "thread_id": "t-9", "title": "Service title" },
                    { "thread_id": "t-8", "title": null }
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let store = ConversationStore::new(Arc::new(UnavailableStore), Some(service_for(&server)));
    let threads = store.list_threads(&Session::active("u-1")).await;

    assert_eq!(threads.len(), 2);
    assert_eq!(threads[0].thread_id, "t-9");
    assert_eq!(threads[0].title, "Service title");
    assert_eq!(threads[0].timestamp, None);
    assert_eq!(threads[1].title, "");
}

#[tokio::test]
async fn test_list_threads_fallback_reconciles_newest_first() {
    let mut server = mockito::Server::new_async().await;
    let _primary = server
        .mock("GET", "/threads/u-1")
        .with_status(404)
        .create_async()
        .await;

    let direct = Arc::new(MemoryRecordStore::with_records(vec![
        record("1", "u-1", "A", "first A", 1),
        record("2", "u-1", "B", "only B", 2),
        record("3", "u-1", "A", "latest A", 3),
        record("4", "u-2", "C", "someone else", 4),
    ]));
    let store = ConversationStore::new(direct, Some(service_for(&server)));

    let threads = store.list_threads(&Session::active("u-1")).await;

    let listed: Vec<(&str, &str)> = threads
        .iter()
        .map(|t| (t.thread_id.as_str(), t.title.as_str()))
        .collect();
    assert_eq!(listed, vec![("A", "latest A"), ("B", "only B")]);
}

#[tokio::test]
async fn test_insert_requires_session() {
    let direct = Arc::new(MemoryRecordStore::new());
    let store = ConversationStore::new(direct.clone(), None);

    let err = store
        .insert(&Session::Anonymous, "q", "r", None, None)
        .await
        .unwrap_err();

    assert!(matches!(err, PersistError::Unauthenticated));
    assert!(direct.is_empty().await);
}

#[tokio::test]
async fn test_insert_generates_and_reuses_thread() {
    let direct = Arc::new(MemoryRecordStore::new());
    let store = ConversationStore::new(direct.clone(), None);
    let session = Session::active("u-1");

    let thread = store
        .insert(&session, "how do infostealers work", "They exfiltrate...", None, None)
        .await
        .unwrap();
    let follow_up = store
        .insert(&session, "how to detect them", "Look for...", Some(thread.as_str()), None)
        .await
        .unwrap();

    assert_eq!(thread, follow_up);
    let records = store.read_by_thread(&session, &thread).await;
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].query, "how do infostealers work");
    assert_eq!(records[0].title.as_deref(), Some("how do infostealers work..."));
}

#[tokio::test]
async fn test_delete_thread_removes_only_that_thread() {
    let direct = Arc::new(MemoryRecordStore::with_records(vec![
        record("1", "u-1", "T", "t", 1),
        record("2", "u-1", "T", "t", 2),
        record("3", "u-1", "keep", "k", 3),
    ]));
    let store = ConversationStore::new(direct.clone(), None);
    let session = Session::active("u-1");

    assert!(store.delete_thread(&session, "T").await);

    assert!(store.read_by_thread(&session, "T").await.is_empty());
    let remaining = store.read_all_for_user(&session).await;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].thread_id, "keep");
}

#[tokio::test]
async fn test_delete_thread_reports_failure() {
    let store = ConversationStore::new(Arc::new(UnavailableStore), None);

    assert!(!store.delete_thread(&Session::active("u-1"), "T").await);
    assert!(!store.delete_thread(&Session::Anonymous, "T").await);
}

#[tokio::test]
async fn test_unreachable_service_falls_back_to_direct_store() {
    let service = HistoryService::new(&HistoryConfig::new("http://127.0.0.1:1")).unwrap();
    let direct = Arc::new(MemoryRecordStore::with_records(vec![
        record("2", "u-1", "t-1", "t", 20),
        record("1", "u-1", "t-1", "t", 10),
    ]));
    let store = ConversationStore::new(direct, Some(service));

    let records = store.read_by_thread(&Session::active("u-1"), "t-1").await;

    let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2"]);
}

#[tokio::test]
async fn test_service_timestamps_without_offset_are_accepted() {
    let mut server = mockito::Server::new_async().await;
    let _primary = server
        .mock("GET", "/history/u-1")
        .match_query(mockito::Matcher::UrlEncoded("thread_id".into(), "t-1".into()))
        .with_status(200)
        .with_body(
            json!({
                "status": "success",
                "history": [
                    {
                        "id": "svc-2",
                        "user_id": "u-1",
                        "query": "follow up",
                        "response": "r",
                        "timestamp": "2024-05-01T10:05:00.123456",
                        "thread_id": "t-1"
                    },
                    {
                        "id": "svc-1",
                        "user_id": "u-1",
                        "query": "first",
                        "response": "r",
                        "timestamp": "2024-05-01T10:00:00+00:00",
                        "thread_id": "t-1"
                    }
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let store = ConversationStore::new(Arc::new(UnavailableStore), Some(service_for(&server)));

    let records = store
        .try_read_by_thread(&Session::active("u-1"), "t-1")
        .await
        .unwrap();

    let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["svc-1", "svc-2"]);
    assert_eq!(
        records[1].timestamp,
        Utc.with_ymd_and_hms(2024, 5, 1, 10, 5, 0).unwrap() + chrono::Duration::microseconds(123456)
    );
}

#[tokio::test]
async fn test_blank_thread_id_is_rejected_before_io() {
    let mut server = mockito::Server::new_async().await;
    let primary = server
        .mock("GET", mockito::Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let direct = Arc::new(MemoryRecordStore::with_records(vec![
        record("1", "u-1", "t-1", "t", 10),
        record("2", "u-1", "t-2", "t", 20),
    ]));
    let store = ConversationStore::new(direct, Some(service_for(&server)));
    let session = Session::active("u-1");

    assert!(matches!(
        store.try_read_by_thread(&session, "  ").await,
        Err(PersistError::InvalidInput(_))
    ));
    assert!(store.read_by_thread(&session, "").await.is_empty());
    primary.assert_async().await;
}
