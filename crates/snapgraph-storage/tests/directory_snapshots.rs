//! End-to-end loads from snapshot directories on disk.

use std::fs;
use std::path::Path;

use serde_json::json;

use snapgraph_core::{ExtractOptions, NodeOrder};
use snapgraph_storage::{load_snapshot, DirectoryStore, SnapshotId, SnapshotStore, StorageError};

fn write_json(dir: &Path, name: &str, value: serde_json::Value) {
    fs::write(dir.join(name), serde_json::to_string_pretty(&value).unwrap()).unwrap();
}

fn onboarding_root() -> tempfile::TempDir {
    let root = tempfile::tempdir().unwrap();
    for snapshot in ["prod", "staging"] {
        let dir = root.path().join(snapshot);
        fs::create_dir(&dir).unwrap();
        write_json(
            &dir,
            "messages.json",
            json!([{
                "__reference_comparison_key": "<<MessageConfig:Welcome[ClientProgram:Onboarding]>>",
                "message": {"subject": "Hi", "body": "Hello", "notificationText": null},
                "reward": "<<Incentive:Bonus[ClientProgram:Onboarding]>>"
            }]),
        );
    }
    fs::write(root.path().join("README.txt"), "not a snapshot").unwrap();
    root
}

#[test]
fn lists_snapshot_directories_only() {
    let root = onboarding_root();
    let store = DirectoryStore::new(root.path());
    assert_eq!(
        store.list_snapshots().unwrap(),
        vec![SnapshotId::from("prod"), SnapshotId::from("staging")]
    );
}

#[test]
fn identical_snapshots_share_fingerprint() {
    let root = onboarding_root();
    let store = DirectoryStore::new(root.path());
    let summaries = store.summaries().unwrap();
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].documents, 1);
    assert_eq!(summaries[0].fingerprint, summaries[1].fingerprint);

    write_json(&root.path().join("staging"), "extra.json", json!([]));
    let summaries = store.summaries().unwrap();
    assert_eq!(summaries[1].documents, 2);
    assert_ne!(summaries[0].fingerprint, summaries[1].fingerprint);
}

#[test]
fn loads_closed_node_set_from_disk() {
    let root = onboarding_root();
    let store = DirectoryStore::new(root.path());
    let snapshot = load_snapshot(&store, &"prod".into(), &ExtractOptions::default()).unwrap();
    assert_eq!(snapshot.nodes.len(), 2);
    let orders: Vec<NodeOrder> = snapshot.nodes.values().map(|n| n.order).collect();
    assert_eq!(orders, vec![NodeOrder::Primary, NodeOrder::Secondary]);
}

#[test]
fn unreadable_document_fails_the_load() {
    let root = onboarding_root();
    fs::write(root.path().join("prod").join("broken.json"), "[{").unwrap();
    let store = DirectoryStore::new(root.path());
    let err = load_snapshot(&store, &"prod".into(), &ExtractOptions::default()).unwrap_err();
    assert!(matches!(err, StorageError::Parse { .. }));
}
