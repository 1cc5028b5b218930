// tests/snapshot_store.rs

use serde_json::json;
use tempfile::TempDir;

use shell_matchers::config::SnapshotSection;
use shell_matchers::snapshot::{
    FileSnapshotStore, MemorySnapshotStore, SnapshotKey, SnapshotOutcome, SnapshotStore,
    SnapshotUpdate,
};

fn key(test: &str, index: usize) -> SnapshotKey {
    SnapshotKey {
        test: test.to_string(),
        matcher: "toHaveStdoutMatchingSnapshot",
        index,
    }
}

#[test]
fn key_display_and_entry_name() {
    let k = key("prints a greeting", 2);
    assert_eq!(k.entry_name(), "toHaveStdoutMatchingSnapshot 2");
    assert_eq!(k.to_string(), "prints a greeting: toHaveStdoutMatchingSnapshot 2");
}

#[test]
fn update_modes_parse() {
    assert_eq!("new".parse::<SnapshotUpdate>().unwrap(), SnapshotUpdate::New);
    assert_eq!(" ALL ".parse::<SnapshotUpdate>().unwrap(), SnapshotUpdate::All);
    assert_eq!("none".parse::<SnapshotUpdate>().unwrap(), SnapshotUpdate::None);
    assert!("sometimes".parse::<SnapshotUpdate>().is_err());
    assert_eq!(SnapshotUpdate::default(), SnapshotUpdate::New);
}

#[test]
fn file_store_writes_new_snapshots_then_matches() {
    let tmp = TempDir::new().unwrap();
    let store = FileSnapshotStore::new(tmp.path().join("snaps"), SnapshotUpdate::New);

    let k = key("greets/world", 1);
    assert_eq!(store.check(&k, &json!("Hello\n")).unwrap(), SnapshotOutcome::Written);
    assert_eq!(store.check(&k, &json!("Hello\n")).unwrap(), SnapshotOutcome::Matched);
    assert_eq!(
        store.check(&k, &json!("Bye\n")).unwrap(),
        SnapshotOutcome::Mismatch {
            stored: json!("Hello\n")
        }
    );

    // Unsafe path characters are escaped in the file name.
    let path = store.file_for("greets/world");
    assert_eq!(path.file_name().unwrap(), "greets%2Fworld.snap.json");
    let on_disk: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(on_disk, json!({ "toHaveStdoutMatchingSnapshot 1": "Hello\n" }));
}

#[test]
fn tests_differing_only_in_punctuation_keep_separate_snapshots() {
    let tmp = TempDir::new().unwrap();
    let store = FileSnapshotStore::new(tmp.path(), SnapshotUpdate::New);

    assert_eq!(store.check(&key("it works!", 1), &json!("A")).unwrap(), SnapshotOutcome::Written);
    assert_eq!(store.check(&key("it works?", 1), &json!("B")).unwrap(), SnapshotOutcome::Written);
    assert_eq!(store.check(&key("it_works_", 1), &json!("C")).unwrap(), SnapshotOutcome::Written);

    assert_ne!(store.file_for("it works!"), store.file_for("it works?"));
    assert_ne!(store.file_for("it works!"), store.file_for("it_works_"));
    assert_eq!(store.check(&key("it works!", 1), &json!("A")).unwrap(), SnapshotOutcome::Matched);
    assert_eq!(store.check(&key("it works?", 1), &json!("B")).unwrap(), SnapshotOutcome::Matched);
}

#[test]
fn file_store_keeps_other_entries_of_the_test() {
    let tmp = TempDir::new().unwrap();
    let store = FileSnapshotStore::new(tmp.path(), SnapshotUpdate::New);

    store.check(&key("t", 1), &json!(1)).unwrap();
    store.check(&key("t", 2), &json!(2)).unwrap();

    let on_disk: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(store.file_for("t")).unwrap()).unwrap();
    assert_eq!(
        on_disk,
        json!({
            "toHaveStdoutMatchingSnapshot 1": 1,
            "toHaveStdoutMatchingSnapshot 2": 2,
        })
    );
}

#[test]
fn file_store_update_all_overwrites() {
    let tmp = TempDir::new().unwrap();
    let k = key("t", 1);

    FileSnapshotStore::new(tmp.path(), SnapshotUpdate::New)
        .check(&k, &json!("old"))
        .unwrap();

    let store = FileSnapshotStore::new(tmp.path(), SnapshotUpdate::All);
    assert_eq!(store.check(&k, &json!("new")).unwrap(), SnapshotOutcome::Written);
    assert_eq!(store.check(&k, &json!("new")).unwrap(), SnapshotOutcome::Matched);
}

#[test]
fn file_store_update_none_never_writes() {
    let tmp = TempDir::new().unwrap();
    let store = FileSnapshotStore::new(tmp.path().join("snaps"), SnapshotUpdate::None);

    let outcome = store.check(&key("t", 1), &json!("x")).unwrap();
    assert_eq!(outcome, SnapshotOutcome::Missing);
    assert!(!outcome.pass());
    assert!(!store.dir().exists());
}

#[test]
fn file_store_rejects_non_object_files() {
    let tmp = TempDir::new().unwrap();
    let store = FileSnapshotStore::new(tmp.path(), SnapshotUpdate::New);
    std::fs::write(store.file_for("t"), "[1, 2]").unwrap();

    assert!(store.check(&key("t", 1), &json!("x")).is_err());
}

#[test]
fn file_store_from_config() {
    let section = SnapshotSection {
        dir: "custom-snaps".into(),
        update: SnapshotUpdate::All,
    };
    let store = FileSnapshotStore::from_config(&section);
    assert_eq!(store.dir(), std::path::Path::new("custom-snaps"));
}

#[test]
fn memory_store_follows_the_same_rules() {
    let store = MemorySnapshotStore::new(SnapshotUpdate::None);
    assert!(store.is_empty());
    assert_eq!(store.check(&key("t", 1), &json!(0)).unwrap(), SnapshotOutcome::Missing);

    store.insert(key("t", 1), json!(0));
    assert_eq!(store.check(&key("t", 1), &json!(0)).unwrap(), SnapshotOutcome::Matched);
    assert_eq!(
        store.check(&key("t", 1), &json!(1)).unwrap(),
        SnapshotOutcome::Mismatch { stored: json!(0) }
    );
    assert_eq!(store.len(), 1);
}

#[test]
fn memory_store_seeding_replaces_and_is_visible() {
    let store = MemorySnapshotStore::new(SnapshotUpdate::New);
    store.insert(key("t", 1), json!("first"));
    store.insert(key("t", 1), json!("second"));

    assert_eq!(store.len(), 1);
    assert!(!store.is_empty());
    assert_eq!(store.get(&key("t", 1)), Some(json!("second")));
    assert_eq!(store.get(&key("t", 2)), None);
    assert_eq!(store.check(&key("t", 1), &json!("second")).unwrap(), SnapshotOutcome::Matched);
}
