//! Node types for the reference graph.
//!
//! A [`Node`] is one configuration entity. Primary nodes come from real
//! documents and keep their raw JSON; secondary nodes are stubs synthesized
//! for keys that are referenced but never defined.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::class::EntityClass;
use crate::key::ReferenceKey;

/// Whether a node was backed by a document or synthesized by closure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeOrder {
    Primary,
    Secondary,
}

/// Class-specific payload pulled out of a primary node's document.
///
/// Field values are the document's text; absent or `null` fields are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeContent {
    Message {
        body: Option<String>,
        subject: Option<String>,
        notification_text: Option<String>,
    },
    Incentive {
        name: Option<String>,
        info: Option<String>,
    },
    CustomField {
        field_type: Option<String>,
        field_data_type: Option<String>,
        default_value: Option<String>,
    },
    /// Concatenated HTML of the layout's elements, one per line.
    PageLayout { html: String },
}

impl NodeContent {
    /// Labelled fields that carry non-blank text, in display order.
    ///
    /// Used by detail views to decide whether a content section is worth
    /// showing at all.
    pub fn meaningful_fields(&self) -> Vec<(&'static str, &str)> {
        let fields: Vec<(&'static str, Option<&str>)> = match self {
            NodeContent::Message {
                body,
                subject,
                notification_text,
            } => vec![
                ("Subject", subject.as_deref()),
                ("Notification Text", notification_text.as_deref()),
                ("Body", body.as_deref()),
            ],
            NodeContent::Incentive { name, info } => {
                vec![("Incentive Name", name.as_deref()), ("Info", info.as_deref())]
            }
            NodeContent::CustomField {
                field_type,
                field_data_type,
                default_value,
            } => vec![
                ("Field Type", field_type.as_deref()),
                ("Data Type", field_data_type.as_deref()),
                ("Default", default_value.as_deref()),
            ],
            NodeContent::PageLayout { html } => vec![("HTML Content", Some(html.as_str()))],
        };
        fields
            .into_iter()
            .filter_map(|(label, text)| text.filter(|t| !t.trim().is_empty()).map(|t| (label, t)))
            .collect()
    }
}

/// One entity in a loaded snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Full reference key; unique within a snapshot.
    pub name: String,
    pub display_name: String,
    pub class: EntityClass,
    pub program: String,
    pub content: Option<NodeContent>,
    /// Outgoing reference keys, first-seen order, never containing `name`.
    pub connections: Vec<String>,
    pub order: NodeOrder,
    /// True when the document mentions a query marker.
    pub query: bool,
    /// Original document item, primary nodes only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<Value>,
}

impl Node {
    /// Builds a secondary stub for a referenced-but-undefined key.
    ///
    /// Returns `None` when the key is malformed or its class is not
    /// recognized. Program-class stubs are their own program.
    pub fn secondary(name: &str) -> Option<Node> {
        let class = crate::class::classify(name)?;
        let key = ReferenceKey::parse(name)?;
        let program = if class == EntityClass::ClientProgram {
            key.display_name.clone()
        } else {
            key.program
        };
        Some(Node {
            name: name.to_string(),
            display_name: key.display_name,
            class,
            program,
            content: None,
            connections: Vec::new(),
            order: NodeOrder::Secondary,
            query: false,
            raw: None,
        })
    }

    pub fn is_primary(&self) -> bool {
        self.order == NodeOrder::Primary
    }
}

/// Nodes of one snapshot keyed by name, in extraction order.
pub type NodeSet = IndexMap<String, Node>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secondary_stub_has_no_payload() {
        let node = Node::secondary("<<Incentive:Bonus[ClientProgram:Onboarding]>>").unwrap();
        assert_eq!(node.class, EntityClass::Incentive);
        assert_eq!(node.display_name, "Bonus");
        assert_eq!(node.program, "Onboarding");
        assert_eq!(node.order, NodeOrder::Secondary);
        assert!(node.content.is_none());
        assert!(node.connections.is_empty());
        assert!(node.raw.is_none());
        assert!(!node.query);
    }

    #[test]
    fn program_stub_is_its_own_program() {
        let node = Node::secondary("<<ClientProgram:Onboarding>>").unwrap();
        assert_eq!(node.display_name, "Onboarding");
        assert_eq!(node.program, "Onboarding");
    }

    #[test]
    fn no_stub_for_unrecognized_keys() {
        assert!(Node::secondary("<<Widget:W[ClientProgram:P]>>").is_none());
        assert!(Node::secondary("not a key").is_none());
    }

    #[test]
    fn meaningful_fields_skip_blank_values() {
        let content = NodeContent::Message {
            body: Some("Hello".into()),
            subject: Some("   ".into()),
            notification_text: None,
        };
        assert_eq!(content.meaningful_fields(), vec![("Body", "Hello")]);

        let empty = NodeContent::PageLayout { html: String::new() };
        assert!(empty.meaningful_fields().is_empty());
    }

    #[test]
    fn order_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&NodeOrder::Primary).unwrap(), "\"primary\"");
        assert_eq!(serde_json::to_string(&NodeOrder::Secondary).unwrap(), "\"secondary\"");
    }
}
