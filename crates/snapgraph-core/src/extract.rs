//! Node extraction from raw snapshot documents.
//!
//! A snapshot document is either a flat array of items or an object whose
//! items are bucketed by category under a `_children` object. Both are
//! flattened to a single item stream; every item carrying a recognized
//! reference key becomes one primary [`Node`].
//!
//! Missing per-class fields never fail an item. Only a document whose top
//! level cannot be flattened is an error.

use serde_json::Value;

use crate::class::{classify, EntityClass};
use crate::error::CoreError;
use crate::key::{scan_references, value_mentions, ReferenceKey};
use crate::node::{Node, NodeContent, NodeOrder, NodeSet};

/// Default value shown for custom fields whose value comes from a formula.
pub const FORMULA_SENTINEL: &str = "Calculated Using Formula";

/// Field names and marker strings used while extracting nodes.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Item field holding the item's own reference key.
    pub marker_field: String,
    /// Object field holding category buckets in bucketed documents.
    pub bucket_field: String,
    /// Substring flagging an item that embeds a query.
    pub query_marker: String,
    /// Substring flagging a formula-driven custom field.
    pub formula_marker: String,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        ExtractOptions {
            marker_field: "__reference_comparison_key".to_string(),
            bucket_field: "_children".to_string(),
            query_marker: "qry".to_string(),
            formula_marker: "_dummy__formula".to_string(),
        }
    }
}

/// Result of extracting every document of one snapshot.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Primary nodes keyed by name, in first-extraction order.
    pub nodes: NodeSet,
    /// Names extracted more than once; the last item's fields won.
    pub collisions: Vec<String>,
}

/// Accumulates primary nodes across the documents of a snapshot.
#[derive(Debug, Default)]
pub struct Extractor {
    options: ExtractOptions,
    extraction: Extraction,
}

impl Extractor {
    pub fn new(options: ExtractOptions) -> Self {
        Extractor {
            options,
            extraction: Extraction::default(),
        }
    }

    /// Extracts all nodes of one document.
    ///
    /// Returns the number of nodes the document contributed. A name seen
    /// before is overwritten in place: the later item's fields win while
    /// the node keeps its first position.
    pub fn add_document(&mut self, document: Value) -> Result<usize, CoreError> {
        let items = flatten_document(document, &self.options)?;
        let mut added = 0;
        for item in items {
            let Some(node) = extract_node(item, &self.options) else {
                continue;
            };
            if self.extraction.nodes.contains_key(&node.name) {
                tracing::warn!(name = %node.name, "duplicate reference key, keeping the later item");
                self.extraction.collisions.push(node.name.clone());
            }
            self.extraction.nodes.insert(node.name.clone(), node);
            added += 1;
        }
        tracing::debug!(nodes = added, "extracted document");
        Ok(added)
    }

    pub fn finish(self) -> Extraction {
        self.extraction
    }
}

/// Extracts primary nodes from a sequence of already-parsed documents.
pub fn extract_nodes<I>(documents: I, options: &ExtractOptions) -> Result<Extraction, CoreError>
where
    I: IntoIterator<Item = Value>,
{
    let mut extractor = Extractor::new(options.clone());
    for document in documents {
        extractor.add_document(document)?;
    }
    Ok(extractor.finish())
}

/// Flattens a document into its item stream.
///
/// Arrays are returned as-is. Objects must carry a bucket object; every
/// array bucket contributes the object items that have a marker field.
/// Non-array buckets are ignored.
pub fn flatten_document(document: Value, options: &ExtractOptions) -> Result<Vec<Value>, CoreError> {
    match document {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => {
            let buckets = match map.remove(&options.bucket_field) {
                Some(Value::Object(buckets)) => buckets,
                Some(_) => {
                    return Err(CoreError::MalformedDocument {
                        reason: format!("'{}' is not an object", options.bucket_field),
                    })
                }
                None => {
                    return Err(CoreError::MalformedDocument {
                        reason: format!("object document has no '{}' field", options.bucket_field),
                    })
                }
            };
            let mut items = Vec::new();
            for (_, bucket) in buckets {
                if let Value::Array(entries) = bucket {
                    items.extend(entries.into_iter().filter(|entry| {
                        entry
                            .as_object()
                            .is_some_and(|obj| obj.contains_key(&options.marker_field))
                    }));
                }
            }
            Ok(items)
        }
        other => Err(CoreError::MalformedDocument {
            reason: format!("expected an array or object, found {}", json_kind(&other)),
        }),
    }
}

/// Builds a primary node from one item, or `None` when the item has no
/// usable key or its class is not recognized.
pub fn extract_node(item: Value, options: &ExtractOptions) -> Option<Node> {
    let name = item.as_object()?.get(&options.marker_field)?.as_str()?.trim().to_string();
    if name.is_empty() {
        return None;
    }
    let Some(class) = classify(&name) else {
        tracing::trace!(key = %name, "skipping item with unrecognized class");
        return None;
    };
    let key = ReferenceKey::parse(&name)?;

    let content = extract_content(&item, class, options);
    let connections = scan_references(&item)
        .into_iter()
        .filter(|reference| *reference != name)
        .collect();
    let query = value_mentions(&item, &options.query_marker);

    Some(Node {
        name,
        display_name: key.display_name,
        class,
        program: key.program,
        content,
        connections,
        order: NodeOrder::Primary,
        query,
        raw: Some(item),
    })
}

/// Pulls the class-specific payload out of an item.
pub fn extract_content(item: &Value, class: EntityClass, options: &ExtractOptions) -> Option<NodeContent> {
    match class {
        EntityClass::MessageConfig => {
            let message = item.get("message");
            let field = |name: &str| message.and_then(|m| m.get(name)).and_then(field_text);
            Some(NodeContent::Message {
                body: field("body"),
                subject: field("subject"),
                notification_text: field("notificationText"),
            })
        }
        EntityClass::Incentive => Some(NodeContent::Incentive {
            name: item.get("name").and_then(field_text),
            info: item.get("info").and_then(field_text),
        }),
        EntityClass::CustomFieldDef => {
            let mut default_value = item.get("defaultValue").and_then(field_text);
            if default_value.is_none() && value_mentions(item, &options.formula_marker) {
                default_value = Some(FORMULA_SENTINEL.to_string());
            }
            Some(NodeContent::CustomField {
                field_type: item.get("fieldType").and_then(field_text),
                field_data_type: item.get("fieldDataType").and_then(field_text),
                default_value,
            })
        }
        EntityClass::ClientPageLayout => {
            let elements = item.get("pageLayoutElements")?;
            let mut html = String::new();
            for element in elements.as_array().into_iter().flatten() {
                if let Some(text) = element.get("HTMLContent").and_then(Value::as_str) {
                    if !text.trim().is_empty() {
                        html.push_str(text);
                        html.push('\n');
                    }
                }
            }
            Some(NodeContent::PageLayout { html })
        }
        _ => None,
    }
}

/// Text of a scalar field: strings verbatim, `null` as absent, anything
/// else as compact JSON.
fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
