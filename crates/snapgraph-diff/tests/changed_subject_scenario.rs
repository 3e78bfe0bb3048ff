//! Staging edits the welcome message subject; the unexported incentive it
//! points at stays secondary on both sides.

use serde_json::{json, Value};

use snapgraph_core::ExtractOptions;
use snapgraph_diff::{build_report, render_summary, CanonicalOptions, CellKind, DiffStatus};
use snapgraph_storage::{load_snapshot, InMemoryStore};

const WELCOME: &str = "<<MessageConfig:Welcome[ClientProgram:Onboarding]>>";
const BONUS: &str = "<<Incentive:Bonus[ClientProgram:Onboarding]>>";

fn welcome(subject: &str) -> Value {
    json!([{
        "__reference_comparison_key": WELCOME,
        "message": {"subject": subject, "body": "Hello", "notificationText": null},
        "reward": BONUS
    }])
}

fn store() -> InMemoryStore {
    let mut store = InMemoryStore::new();
    store.add_document("prod", "messages.json", welcome("Welcome"));
    store.add_document("staging", "messages.json", welcome("Welcome aboard"));
    store
}

#[test]
fn message_changes_and_incentive_stays_same() {
    let store = store();
    let options = ExtractOptions::default();
    let prod = load_snapshot(&store, &"prod".into(), &options).unwrap();
    let staging = load_snapshot(&store, &"staging".into(), &options).unwrap();

    let report = build_report(
        prod.id.as_str(),
        &prod.nodes,
        staging.id.as_str(),
        &staging.nodes,
        &CanonicalOptions::default(),
    )
    .unwrap();

    assert_eq!(report.diff.changed, vec![WELCOME.to_string()]);
    assert!(report.diff.added_in_a.is_empty());
    assert!(report.diff.added_in_b.is_empty());
    assert_eq!(report.diff.status_a[WELCOME], DiffStatus::Changed);
    assert_eq!(report.diff.status_a[BONUS], DiffStatus::Same);
    assert_eq!(report.diff.status_b[BONUS], DiffStatus::Same);

    let change = &report.changes[0];
    let removed: Vec<&str> = change
        .rows
        .iter()
        .filter(|row| row.left.kind == CellKind::Removed)
        .map(|row| row.left.text.as_str())
        .collect();
    let added: Vec<&str> = change
        .rows
        .iter()
        .filter(|row| row.right.kind == CellKind::Added)
        .map(|row| row.right.text.as_str())
        .collect();
    assert_eq!(removed, vec!["\"subject\": \"Welcome\""]);
    assert_eq!(added, vec!["\"subject\": \"Welcome aboard\""]);

    let summary = render_summary(&report);
    assert!(summary.contains("Unique to prod (Snapshot A):\n  None"));
    assert!(summary.contains("Unique to staging (Snapshot B):\n  None"));
}

#[test]
fn deep_edits_beyond_the_limit_compare_same() {
    let mut store = store();
    store.add_document("deep_a", "d.json", json!([{"__reference_comparison_key": WELCOME, "a": {"b": {"c": 1}}}]));
    store.add_document("deep_b", "d.json", json!([{"__reference_comparison_key": WELCOME, "a": {"b": {"c": 2}}}]));
    let options = ExtractOptions::default();
    let a = load_snapshot(&store, &"deep_a".into(), &options).unwrap();
    let b = load_snapshot(&store, &"deep_b".into(), &options).unwrap();

    let shallow = CanonicalOptions { max_depth: 3 };
    let report = build_report("deep_a", &a.nodes, "deep_b", &b.nodes, &shallow).unwrap();
    assert!(report.diff.is_identical());

    let report = build_report("deep_a", &a.nodes, "deep_b", &b.nodes, &CanonicalOptions::default()).unwrap();
    assert_eq!(report.diff.changed, vec![WELCOME.to_string()]);
}
