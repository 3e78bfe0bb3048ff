//! The export kinds and their column layouts.

use std::fmt;
use std::str::FromStr;

use snapgraph_core::{EntityClass, Node, NodeContent};

use crate::error::ExportError;

/// One CSV export, tied to one entity class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportKind {
    Messages,
    Incentives,
    CustomFields,
    PageLayouts,
}

/// Written in place of an absent custom field default or page layout body.
const ABSENT: &str = "None";

impl ExportKind {
    pub const ALL: [ExportKind; 4] = [
        ExportKind::Messages,
        ExportKind::Incentives,
        ExportKind::CustomFields,
        ExportKind::PageLayouts,
    ];

    /// Class whose primary nodes this export lists.
    pub fn class(self) -> EntityClass {
        match self {
            ExportKind::Messages => EntityClass::MessageConfig,
            ExportKind::Incentives => EntityClass::Incentive,
            ExportKind::CustomFields => EntityClass::CustomFieldDef,
            ExportKind::PageLayouts => EntityClass::ClientPageLayout,
        }
    }

    /// File name suffix, as in `<snapshot>_<suffix>.csv`.
    pub fn suffix(self) -> &'static str {
        match self {
            ExportKind::Messages => "messages",
            ExportKind::Incentives => "incentives",
            ExportKind::CustomFields => "custom_fields",
            ExportKind::PageLayouts => "page_layouts",
        }
    }

    pub fn headers(self) -> &'static [&'static str] {
        match self {
            ExportKind::Messages => &[
                "Identification",
                "Program",
                "System Name",
                "Subject",
                "Body",
                "Notification Text",
                "References",
            ],
            ExportKind::Incentives => &[
                "Identification",
                "Program",
                "System Name",
                "Display Name",
                "Content",
                "References",
            ],
            ExportKind::CustomFields => &[
                "Identification",
                "Program",
                "System Name",
                "Class Type",
                "Field Type",
                "Default Value",
                "References",
            ],
            ExportKind::PageLayouts => &[
                "Identification",
                "Program",
                "System Name",
                "HTML Content",
                "References",
            ],
        }
    }

    /// CSV record for `node`, or `None` when the node is not part of this
    /// export (wrong class or secondary).
    pub fn record(self, node: &Node) -> Option<Vec<String>> {
        if node.class != self.class() || !node.is_primary() {
            return None;
        }
        let text = |field: &Option<String>| field.clone().unwrap_or_default();
        let content: Vec<String> = match (self, &node.content) {
            (
                ExportKind::Messages,
                Some(NodeContent::Message {
                    body,
                    subject,
                    notification_text,
                }),
            ) => vec![text(subject), text(body), text(notification_text)],
            (ExportKind::Messages, _) => vec![String::new(); 3],
            (ExportKind::Incentives, Some(NodeContent::Incentive { name, info })) => {
                vec![text(name), text(info)]
            }
            (ExportKind::Incentives, _) => vec![String::new(); 2],
            (
                ExportKind::CustomFields,
                Some(NodeContent::CustomField {
                    field_type,
                    field_data_type,
                    default_value,
                }),
            ) => vec![
                text(field_type),
                text(field_data_type),
                default_value.clone().unwrap_or_else(|| ABSENT.to_string()),
            ],
            (ExportKind::CustomFields, _) => vec![String::new(), String::new(), ABSENT.to_string()],
            (ExportKind::PageLayouts, Some(NodeContent::PageLayout { html })) => vec![html.clone()],
            (ExportKind::PageLayouts, _) => vec![ABSENT.to_string()],
        };

        let mut record = Vec::with_capacity(self.headers().len());
        record.push(node.name.clone());
        record.push(node.program.clone());
        record.push(node.display_name.clone());
        record.extend(content);
        record.push(node.connections.join(";"));
        Some(record)
    }
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportKind::Messages => "messages",
            ExportKind::Incentives => "incentives",
            ExportKind::CustomFields => "custom-fields",
            ExportKind::PageLayouts => "page-layouts",
        };
        f.write_str(name)
    }
}

impl FromStr for ExportKind {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExportKind::ALL
            .into_iter()
            .find(|kind| kind.to_string() == s || kind.suffix() == s)
            .ok_or_else(|| ExportError::UnknownKind(s.to_string()))
    }
}
