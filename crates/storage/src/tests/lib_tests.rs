use super::*;
use serde_json::json;

#[tokio::test]
async fn health_check_succeeds_for_live_pool() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage.health_check().await.expect("health check");
}

#[tokio::test]
async fn sets_overwrites_and_reads_items() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    assert_eq!(storage.get_item("token").await.expect("get"), None);

    storage.set_item("token", "first").await.expect("set");
    storage.set_item("token", "second").await.expect("overwrite");

    assert_eq!(
        storage.get_item("token").await.expect("get").as_deref(),
        Some("second")
    );
    assert_eq!(storage.keys().await.expect("keys"), vec!["token".to_string()]);
}

#[tokio::test]
async fn remove_item_reports_whether_anything_was_deleted() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage.set_item("a", "1").await.expect("set");

    assert!(storage.remove_item("a").await.expect("remove"));
    assert!(!storage.remove_item("a").await.expect("remove again"));
}

#[tokio::test]
async fn clear_removes_tokens_and_snapshot() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage.set_item("clientToken", "secret").await.expect("token");
    storage
        .save_snapshot(&json!({ "core": { "blockchainId": "abc" } }))
        .await
        .expect("snapshot");

    assert_eq!(storage.clear().await.expect("clear"), 2);
    assert!(storage.items().await.expect("items").is_empty());
    assert_eq!(storage.load_snapshot().await.expect("load"), None);
}

#[tokio::test]
async fn snapshot_round_trips_as_json() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let snapshot = json!({ "core": { "blockchainId": 0, "configured": false } });
    storage.save_snapshot(&snapshot).await.expect("save");

    assert_eq!(storage.load_snapshot().await.expect("load"), Some(snapshot));
}

#[tokio::test]
async fn corrupt_snapshot_is_reported() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage
        .set_item(STATE_SNAPSHOT_KEY, "{not json")
        .await
        .expect("set");

    let err = storage.load_snapshot().await.expect_err("corrupt");
    assert!(err.to_string().contains("not valid json"));
}

#[tokio::test]
async fn creates_database_file_when_missing() {
    let temp_root = tempfile::tempdir().expect("tempdir");
    let db_path = temp_root.path().join("nested").join("dashboard.db");
    let database_url = format!("sqlite://{}", db_path.to_string_lossy().replace('\\', "/"));

    let storage = Storage::new(&database_url).await.expect("db");
    drop(storage);

    assert!(
        db_path.exists(),
        "database file should exist: {}",
        db_path.display()
    );
}

#[test]
fn memory_url_has_no_parent_directory() {
    assert_eq!(sqlite_path("sqlite::memory:"), None);
    assert_eq!(
        sqlite_path("sqlite://./data/dashboard.db?mode=rwc"),
        Some(PathBuf::from("./data/dashboard.db"))
    );
}
