//! Subcommand implementations.
//!
//! Every `run_*` function prints its own output and errors and returns the
//! process exit code: 0 = success, 1 = usage or lookup error, 3 = I/O or
//! parse error, 4 = export failure.

use std::collections::HashSet;

use serde::Serialize;

use snapgraph_core::key::short_label;
use snapgraph_core::{CoreError, EntityClass, ExtractOptions, NodeDetail, NodeFilter, NodeOrder};
use snapgraph_diff::{build_report, render_summary, CanonicalOptions};
use snapgraph_export::{write_export_file, ExportKind};
use snapgraph_storage::{load_snapshot, DirectoryStore, Snapshot, SnapshotStore, StorageError};

use crate::config::Settings;

fn storage_exit(err: &StorageError) -> i32 {
    match err {
        StorageError::SnapshotNotFound(_) => 1,
        _ => 3,
    }
}

fn load(settings: &Settings, id: &str) -> Result<Snapshot, i32> {
    let store = DirectoryStore::new(&settings.root);
    load_snapshot(&store, &id.into(), &ExtractOptions::default()).map_err(|e| {
        eprintln!("Error: failed to load snapshot '{}': {}", id, e);
        storage_exit(&e)
    })
}

fn print_json<T: Serialize>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            0
        }
        Err(e) => {
            eprintln!("Error: failed to serialize output: {}", e);
            3
        }
    }
}

pub fn run_list(settings: &Settings) -> i32 {
    let store = DirectoryStore::new(&settings.root);
    let summaries = match store.summaries() {
        Ok(summaries) => summaries,
        Err(e) => {
            eprintln!("Error: {}", e);
            return storage_exit(&e);
        }
    };
    if summaries.is_empty() {
        println!("No snapshots in {}", settings.root.display());
    }
    for summary in summaries {
        println!(
            "{}\t{} documents\t{}",
            summary.id,
            summary.documents,
            &summary.fingerprint[..16]
        );
    }
    0
}

pub fn run_graph(
    settings: &Settings,
    id: &str,
    classes: &[String],
    programs: &[String],
    primary_only: bool,
    json: bool,
) -> i32 {
    let mut filter = NodeFilter {
        primary_only,
        ..NodeFilter::default()
    };
    if !classes.is_empty() {
        let mut parsed = HashSet::new();
        for class in classes {
            match class.parse::<EntityClass>() {
                Ok(class) => {
                    parsed.insert(class);
                }
                Err(msg) => {
                    eprintln!("Error: {}", msg);
                    return 1;
                }
            }
        }
        filter.classes = Some(parsed);
    }
    if !programs.is_empty() {
        filter.programs = Some(programs.iter().cloned().collect());
    }

    let snapshot = match load(settings, id) {
        Ok(snapshot) => snapshot,
        Err(code) => return code,
    };
    let graph = snapshot.graph().filtered(&filter);
    if json {
        return print_json(&graph.export());
    }

    let secondary = graph.nodes().filter(|n| n.order == NodeOrder::Secondary).count();
    println!("Snapshot: {}", snapshot.id);
    println!(
        "Nodes: {} ({} primary, {} secondary)",
        graph.node_count(),
        graph.node_count() - secondary,
        secondary
    );
    println!("Edges: {}", graph.edge_count());
    if !snapshot.report.collisions.is_empty() {
        println!("Duplicate keys: {}", snapshot.report.collisions.join(", "));
    }
    for (program, names) in graph.program_clusters() {
        let program = if program.is_empty() { "(no program)" } else { program };
        println!("\n{} ({})", program, names.len());
        for name in names {
            println!("  {:<40} {}", short_label(name), name);
        }
    }
    0
}

pub fn run_node(settings: &Settings, id: &str, name: &str) -> i32 {
    let snapshot = match load(settings, id) {
        Ok(snapshot) => snapshot,
        Err(code) => return code,
    };
    match NodeDetail::build(&snapshot.graph(), name) {
        Ok(detail) => {
            print!("{}", detail);
            0
        }
        Err(e @ CoreError::NodeNotFound { .. }) => {
            eprintln!("Error: {} in snapshot '{}'", e, id);
            1
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            3
        }
    }
}

pub fn run_diff(settings: &Settings, a: &str, b: &str, json: bool) -> i32 {
    let snapshot_a = match load(settings, a) {
        Ok(snapshot) => snapshot,
        Err(code) => return code,
    };
    let snapshot_b = match load(settings, b) {
        Ok(snapshot) => snapshot,
        Err(code) => return code,
    };
    let options = CanonicalOptions {
        max_depth: settings.max_depth,
    };
    let report = match build_report(a, &snapshot_a.nodes, b, &snapshot_b.nodes, &options) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 3;
        }
    };
    if json {
        return print_json(&report);
    }
    print!("{}", render_summary(&report));
    0
}

pub fn run_export(settings: &Settings, id: &str, kind: &str) -> i32 {
    let kinds = if kind == "all" {
        ExportKind::ALL.to_vec()
    } else {
        match kind.parse::<ExportKind>() {
            Ok(kind) => vec![kind],
            Err(e) => {
                eprintln!("Error: {}", e);
                return 1;
            }
        }
    };
    let snapshot = match load(settings, id) {
        Ok(snapshot) => snapshot,
        Err(code) => return code,
    };
    for kind in kinds {
        match write_export_file(&settings.content_dir, id, kind, snapshot.primary_nodes()) {
            Ok(outcome) => println!("Wrote {} {} to {}", outcome.rows, kind, outcome.path.display()),
            Err(e) => {
                eprintln!("Error: failed to export {}: {}", kind, e);
                return 4;
            }
        }
    }
    0
}
