//! Node detail view: everything a side panel shows for one selected node.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::class::EntityClass;
use crate::error::CoreError;
use crate::graph::ReferenceGraph;
use crate::node::NodeOrder;

/// Pre-computed detail panel for one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDetail {
    pub name: String,
    pub display_name: String,
    pub class: EntityClass,
    pub program: String,
    pub order: NodeOrder,
    pub query: bool,
    /// Labelled content fields with non-blank text.
    pub content: Vec<(String, String)>,
    pub refers_to: Vec<String>,
    pub referred_by: Vec<String>,
    /// Pretty-printed raw document, primary nodes only.
    pub raw: Option<String>,
}

impl NodeDetail {
    /// Collects the detail panel for `name`.
    pub fn build(graph: &ReferenceGraph, name: &str) -> Result<NodeDetail, CoreError> {
        let node = graph.node(name).ok_or_else(|| CoreError::NodeNotFound {
            name: name.to_string(),
        })?;
        let content = node
            .content
            .as_ref()
            .map(|content| {
                content
                    .meaningful_fields()
                    .into_iter()
                    .map(|(label, text)| (label.to_string(), text.to_string()))
                    .collect()
            })
            .unwrap_or_default();
        let raw = node
            .raw
            .as_ref()
            .filter(|raw| !is_empty_json(raw))
            .and_then(|raw| serde_json::to_string_pretty(raw).ok());

        Ok(NodeDetail {
            name: node.name.clone(),
            display_name: node.display_name.clone(),
            class: node.class,
            program: node.program.clone(),
            order: node.order,
            query: node.query,
            content,
            refers_to: graph.refers_to(name)?.into_iter().map(|n| n.name.clone()).collect(),
            referred_by: graph.referred_by(name)?.into_iter().map(|n| n.name.clone()).collect(),
            raw,
        })
    }
}

fn is_empty_json(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => true,
        serde_json::Value::Object(map) => map.is_empty(),
        serde_json::Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

impl fmt::Display for NodeDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `**` marks implied nodes, `*` marks counts that can be incomplete
        // because unexported entities or queries may also reference a node.
        let implied = if self.order == NodeOrder::Secondary { " **" } else { "" };
        writeln!(f, "Name: {}{}", self.name, implied)?;
        writeln!(f, "Display Name: {}", self.display_name)?;
        writeln!(f, "Type: {}", self.class)?;
        writeln!(f, "Program: {}", self.program)?;
        writeln!(f, "Includes Query: {}", if self.query { "True" } else { "False" })?;

        if !self.content.is_empty() {
            writeln!(f, "\nContent:")?;
            for (label, text) in &self.content {
                writeln!(f, "  {}: {}", label, text.trim_end())?;
            }
        }

        writeln!(f, "\nRefers To ({}){}:", self.refers_to.len(), implied)?;
        write_list(f, &self.refers_to)?;
        writeln!(f, "Referred By ({})*:", self.referred_by.len())?;
        write_list(f, &self.referred_by)?;

        if let Some(raw) = &self.raw {
            writeln!(f, "\nRaw JSON:\n{}", raw)?;
        }
        Ok(())
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, names: &[String]) -> fmt::Result {
    if names.is_empty() {
        return writeln!(f, "  None");
    }
    for name in names {
        writeln!(f, "  {}", name)?;
    }
    Ok(())
}
