use super::*;

use std::collections::HashMap;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| vars.get(name).cloned()
}

#[test]
fn defaults_apply_without_file_or_env() {
    let settings = resolve_settings(None, env_from(&[])).expect("settings");
    assert_eq!(settings, Settings::default());
}

#[test]
fn file_values_override_defaults() {
    let settings = resolve_settings(
        Some("database_url = \"sqlite://./tmp/d.db\"\npersist_state = false\n"),
        env_from(&[]),
    )
    .expect("settings");
    assert_eq!(settings.database_url, "sqlite://./tmp/d.db");
    assert!(!settings.persist_state);
    assert!(!settings.log_json);
}

#[test]
fn environment_overrides_file() {
    let settings = resolve_settings(
        Some("database_url = \"sqlite://./file.db\"\n"),
        env_from(&[
            ("DASHBOARD_DATABASE_URL", "sqlite://./legacy.db"),
            ("APP__DATABASE_URL", "sqlite://./app.db"),
            ("APP__LOG_JSON", "yes"),
        ]),
    )
    .expect("settings");
    assert_eq!(settings.database_url, "sqlite://./app.db");
    assert!(settings.log_json);
}

#[test]
fn rejects_unknown_keys_and_bad_flags() {
    assert!(resolve_settings(Some("bind_addr = \"x\"\n"), env_from(&[])).is_err());
    assert!(resolve_settings(None, env_from(&[("APP__PERSIST_STATE", "maybe")])).is_err());
}

#[test]
fn missing_config_file_falls_back_to_defaults() {
    let temp_root = tempfile::tempdir().expect("tempdir");
    let settings = load_settings(&temp_root.path().join("absent.toml")).expect("settings");
    assert_eq!(settings.persist_state, Settings::default().persist_state);
}

#[test]
fn normalizes_plain_file_path_to_sqlite_url() {
    assert_eq!(
        normalize_database_url("./data/test.db"),
        "sqlite://./data/test.db"
    );
    assert_eq!(normalize_database_url("  "), Settings::default().database_url);
    assert_eq!(normalize_database_url("sqlite::memory:"), "sqlite::memory:");
}

#[test]
fn creates_parent_dir_for_sqlite_url() {
    let temp_root = tempfile::tempdir().expect("tempdir");
    let db_path = temp_root.path().join("data").join("dashboard.db");

    prepare_database_url(db_path.to_string_lossy().as_ref()).expect("prepare db url");
    assert!(temp_root.path().join("data").exists());
}
