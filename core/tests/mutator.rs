use std::fs;
use std::path::Path;
use std::path::PathBuf;

use mcpreg_core::MutateErr;
use mcpreg_core::MutationStatus;
use mcpreg_core::ServerEntry;
use mcpreg_core::mutator;
use mcpreg_core::mutator::DEFAULT_INDENT;
use mcpreg_core::paths::backup_path;
use pretty_assertions::assert_eq;
use tempfile::TempDir;
use tempfile::tempdir;

fn entry(command: &str, args: &[&str]) -> ServerEntry {
    ServerEntry {
        command: command.to_string(),
        args: args.iter().map(|s| s.to_string()).collect(),
    }
}

fn doc_path(dir: &TempDir) -> PathBuf {
    dir.path().join("claude_desktop_config.json")
}

#[expect(clippy::unwrap_used)]
fn read_servers(path: &Path) -> serde_json::Value {
    let text = fs::read_to_string(path).unwrap();
    let root: serde_json::Value = serde_json::from_str(&text).unwrap();
    root.get("mcpServers").cloned().unwrap()
}

#[test]
#[expect(clippy::unwrap_used)]
fn upsert_twice_is_byte_for_byte_idempotent() {
    let dir = tempdir().unwrap();
    let path = doc_path(&dir);

    let first = mutator::upsert(&path, "exec-reports", entry("srv", &["--x"]), DEFAULT_INDENT)
        .unwrap();
    assert_eq!(first.status, MutationStatus::Added);
    let after_first = fs::read(&path).unwrap();

    let second = mutator::upsert(&path, "exec-reports", entry("srv", &["--x"]), DEFAULT_INDENT)
        .unwrap();
    assert_eq!(second.status, MutationStatus::Unchanged);
    let after_second = fs::read(&path).unwrap();

    assert_eq!(after_first, after_second);
    assert!(!backup_path(&path).exists());
}

#[test]
#[expect(clippy::unwrap_used)]
fn update_replaces_the_entry_and_reports_both_values() {
    let dir = tempdir().unwrap();
    let path = doc_path(&dir);

    mutator::upsert(&path, "exec-reports", entry("a", &["x"]), DEFAULT_INDENT).unwrap();
    let outcome =
        mutator::upsert(&path, "exec-reports", entry("a", &["x", "y"]), DEFAULT_INDENT).unwrap();

    assert_eq!(outcome.status, MutationStatus::Updated);
    assert!(outcome.message.contains(r#"command `a` args ["x"]"#));
    assert!(outcome.message.contains(r#"command `a` args ["x", "y"]"#));

    let servers = read_servers(&path);
    assert_eq!(
        servers["exec-reports"],
        serde_json::json!({"command": "a", "args": ["x", "y"]})
    );
    assert!(!backup_path(&path).exists());
}

#[test]
#[expect(clippy::unwrap_used)]
fn unrelated_keys_and_entries_survive_an_upsert_in_order() {
    let dir = tempdir().unwrap();
    let path = doc_path(&dir);
    fs::write(
        &path,
        concat!(
            "{\n",
            "  \"unrelatedSetting\": true,\n",
            "  \"mcpServers\": {\n",
            "    \"other-server\": {\n",
            "      \"command\": \"other\",\n",
            "      \"args\": []\n",
            "    }\n",
            "  }\n",
            "}\n"
        ),
    )
    .unwrap();

    let outcome =
        mutator::upsert(&path, "exec-reports", entry("srv", &["--x"]), DEFAULT_INDENT).unwrap();
    assert_eq!(outcome.status, MutationStatus::Added);

    let text = fs::read_to_string(&path).unwrap();
    let root: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(root["unrelatedSetting"], serde_json::json!(true));
    assert_eq!(
        root["mcpServers"]["other-server"],
        serde_json::json!({"command": "other", "args": []})
    );

    // Key order is preserved: unrelated key first, existing entry before
    // the inserted one.
    let unrelated = text.find("unrelatedSetting").unwrap();
    let servers = text.find("mcpServers").unwrap();
    let other = text.find("other-server").unwrap();
    let inserted = text.find("exec-reports").unwrap();
    assert!(unrelated < servers);
    assert!(other < inserted);
}

#[test]
#[expect(clippy::unwrap_used)]
fn upsert_creates_the_document_and_missing_directories() {
    let dir = tempdir().unwrap();
    let path = dir
        .path()
        .join("nested")
        .join("Claude")
        .join("claude_desktop_config.json");

    let outcome = mutator::upsert(
        &path,
        "exec-reports",
        entry("srv", &["--env-file", "/opt/app/.env"]),
        DEFAULT_INDENT,
    )
    .unwrap();
    assert_eq!(outcome.status, MutationStatus::Added);

    let servers = read_servers(&path);
    let map = servers.as_object().unwrap();
    assert_eq!(map.len(), 1);
    assert_eq!(
        map["exec-reports"],
        serde_json::json!({"command": "srv", "args": ["--env-file", "/opt/app/.env"]})
    );
    assert!(!backup_path(&path).exists());
}

#[test]
#[expect(clippy::unwrap_used)]
fn a_failed_transaction_restores_the_document_exactly() {
    let dir = tempdir().unwrap();
    let path = doc_path(&dir);
    // Invalid JSON trips the parse step after the backup was taken, so
    // the failure path has to put the original bytes back.
    let original = b"{ this is not json".to_vec();
    fs::write(&path, &original).unwrap();

    let err = mutator::upsert(&path, "exec-reports", entry("srv", &[]), DEFAULT_INDENT)
        .unwrap_err();
    assert!(matches!(err, MutateErr::Parse(_)));

    assert_eq!(fs::read(&path).unwrap(), original);
    assert!(!backup_path(&path).exists());
}

#[test]
#[expect(clippy::unwrap_used)]
fn remove_reports_not_found_and_leaves_the_file_alone() {
    let dir = tempdir().unwrap();
    let path = doc_path(&dir);
    mutator::upsert(&path, "other-server", entry("other", &[]), DEFAULT_INDENT).unwrap();
    let before = fs::read(&path).unwrap();

    let outcome = mutator::remove(&path, "exec-reports").unwrap();
    assert_eq!(outcome.status, MutationStatus::NotFound);
    assert_eq!(fs::read(&path).unwrap(), before);
    assert!(!backup_path(&path).exists());
}

#[test]
#[expect(clippy::unwrap_used)]
fn remove_deletes_only_the_named_entry() {
    let dir = tempdir().unwrap();
    let path = doc_path(&dir);
    mutator::upsert(&path, "other-server", entry("other", &[]), DEFAULT_INDENT).unwrap();
    mutator::upsert(&path, "exec-reports", entry("srv", &["--x"]), DEFAULT_INDENT).unwrap();

    let outcome = mutator::remove(&path, "exec-reports").unwrap();
    assert_eq!(outcome.status, MutationStatus::Removed);

    let servers = read_servers(&path);
    let map = servers.as_object().unwrap();
    assert_eq!(map.len(), 1);
    assert!(map.contains_key("other-server"));
    assert!(!backup_path(&path).exists());
}

#[test]
#[expect(clippy::unwrap_used)]
fn remove_from_a_missing_file_does_not_create_one() {
    let dir = tempdir().unwrap();
    let path = doc_path(&dir);

    assert!(!mutator::exists(&path));
    let outcome = mutator::remove(&path, "exec-reports").unwrap();
    assert_eq!(outcome.status, MutationStatus::MissingFile);
    assert!(!path.exists());
}

#[test]
#[expect(clippy::unwrap_used)]
fn remove_reports_no_registry_for_an_absent_or_empty_registry() {
    let dir = tempdir().unwrap();
    let path = doc_path(&dir);

    fs::write(&path, "{\"unrelatedSetting\": true}\n").unwrap();
    let outcome = mutator::remove(&path, "exec-reports").unwrap();
    assert_eq!(outcome.status, MutationStatus::NoRegistry);

    fs::write(&path, "{\"mcpServers\": {}}\n").unwrap();
    let outcome = mutator::remove(&path, "exec-reports").unwrap();
    assert_eq!(outcome.status, MutationStatus::NoRegistry);
}

#[test]
#[expect(clippy::unwrap_used)]
fn args_order_is_significant_for_equality() {
    let dir = tempdir().unwrap();
    let path = doc_path(&dir);

    mutator::upsert(&path, "exec-reports", entry("a", &["x", "y"]), DEFAULT_INDENT).unwrap();
    let outcome =
        mutator::upsert(&path, "exec-reports", entry("a", &["y", "x"]), DEFAULT_INDENT).unwrap();
    assert_eq!(outcome.status, MutationStatus::Updated);
}

#[test]
#[expect(clippy::unwrap_used)]
fn validation_errors_surface_before_any_file_io() {
    let dir = tempdir().unwrap();
    let path = doc_path(&dir);

    let err = mutator::upsert(&path, "", entry("srv", &[]), DEFAULT_INDENT).unwrap_err();
    assert!(matches!(err, MutateErr::EmptyName));

    let err = mutator::upsert(&path, "exec-reports", entry("", &[]), DEFAULT_INDENT).unwrap_err();
    assert!(matches!(err, MutateErr::EmptyCommand));

    assert!(!path.exists());
}

#[test]
#[expect(clippy::unwrap_used)]
fn entries_lists_the_registry_and_tolerates_absence() {
    let dir = tempdir().unwrap();
    let path = doc_path(&dir);
    assert!(mutator::entries(&path).unwrap().is_empty());

    mutator::upsert(&path, "exec-reports", entry("srv", &["--x"]), DEFAULT_INDENT).unwrap();
    let listed = mutator::entries(&path).unwrap();
    assert_eq!(
        listed,
        vec![("exec-reports".to_string(), entry("srv", &["--x"]))]
    );
}
