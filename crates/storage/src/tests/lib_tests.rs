use super::*;

#[tokio::test]
async fn saves_and_loads_sessions() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage.save_session("desk", "6UL;").await.expect("save");

    let session = storage
        .load_session("desk")
        .await
        .expect("load")
        .expect("session exists");
    assert_eq!(session.name, "desk");
    assert_eq!(session.encoding, "6UL;");
    assert_eq!(session.created_at, session.updated_at);
}

#[tokio::test]
async fn health_check_succeeds_for_live_pool() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage.health_check().await.expect("health check");
}

#[tokio::test]
async fn missing_session_loads_as_none() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    assert!(storage.load_session("nope").await.expect("load").is_none());
    assert!(storage.load_encoding("nope").await.expect("load").is_none());
}

#[tokio::test]
async fn saving_again_overwrites_encoding() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage.save_session("desk", "6UL;").await.expect("save");
    storage.save_session("desk", "5UL;5").await.expect("save again");

    let sessions = storage.list_sessions().await.expect("list");
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].encoding, "5UL;5");
    assert!(sessions[0].updated_at >= sessions[0].created_at);
}

#[tokio::test]
async fn lists_and_deletes_sessions() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage.save_session("alpha", "1;").await.expect("alpha");
    storage.save_session("beta", "2;").await.expect("beta");

    let mut names: Vec<String> = storage
        .list_sessions()
        .await
        .expect("list")
        .into_iter()
        .map(|s| s.name)
        .collect();
    names.sort();
    assert_eq!(names, vec!["alpha".to_string(), "beta".to_string()]);

    assert!(storage.delete_session("alpha").await.expect("delete"));
    assert!(!storage.delete_session("alpha").await.expect("delete twice"));
    assert_eq!(storage.list_sessions().await.expect("list").len(), 1);
}

#[tokio::test]
async fn creates_database_file_when_missing() {
    let suffix = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = std::env::temp_dir().join(format!("deep_control_storage_test_{suffix}"));
    let db_path = temp_root.join("nested").join("storage.db");
    let database_url = format!("sqlite://{}", db_path.to_string_lossy().replace('\\', "/"));

    let storage = Storage::new(&database_url).await.expect("db");
    storage.save_session("desk", "6UL;").await.expect("save");
    drop(storage);

    assert!(
        db_path.exists(),
        "database file should exist: {}",
        db_path.display()
    );

    let reopened = Storage::new(&database_url).await.expect("reopen");
    assert_eq!(
        reopened.load_encoding("desk").await.expect("load").as_deref(),
        Some("6UL;")
    );
    drop(reopened);

    std::fs::remove_dir_all(temp_root).expect("cleanup");
}

#[tokio::test]
async fn creates_missing_parent_directories() {
    let suffix = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = std::env::temp_dir().join(format!("deep_control_storage_dirs_{suffix}"));
    let data_dir = temp_root.join("a").join("b");
    let database_url = format!(
        "sqlite://{}",
        data_dir.join("pads.db").to_string_lossy().replace('\\', "/")
    );
    assert!(!data_dir.exists());

    let storage = Storage::new(&database_url).await.expect("db");
    storage.health_check().await.expect("health check");
    assert!(data_dir.is_dir());
    drop(storage);

    std::fs::remove_dir_all(temp_root).expect("cleanup");
}

#[test]
fn memory_url_has_no_path() {
    assert_eq!(sqlite_path("sqlite::memory:"), None);
    assert_eq!(sqlite_path("sqlite::memory:?cache=shared"), None);
    assert_eq!(sqlite_path("postgres://db/pads"), None);
    assert_eq!(sqlite_path("sqlite:pads.db"), Some(PathBuf::from("pads.db")));
    assert_eq!(
        sqlite_path("sqlite://./data/pads.db?mode=rwc"),
        Some(PathBuf::from("./data/pads.db"))
    );
}
