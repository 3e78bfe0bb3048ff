//! Reference key grammar.
//!
//! Configuration exports name every entity with a bracketed key of the form
//! `<<Class:Name[ClientProgram:Program]>>`. Keys are embedded verbatim
//! wherever one entity points at another, so finding references is a lexical
//! scan rather than a schema walk.
//!
//! Scanning visits object keys and string leaves of a parsed document one at
//! a time, so a match can never straddle two JSON values.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexSet;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::class::{classify, EntityClass};
use crate::error::CoreError;

static REFERENCE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<<[^>]+>>").expect("reference pattern is a valid regex"));

const PROGRAM_TAG: &str = "ClientProgram:";

/// A reference key decomposed into its positional parts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReferenceKey {
    /// Text between `<<` and the first `:`.
    pub class_prefix: String,
    /// Second `:`-separated field of the head, trimmed.
    pub display_name: String,
    /// Owning program. Empty when the key carries no `[...]` segment.
    pub program: String,
}

impl ReferenceKey {
    /// Parses a key, returning `None` when the text is not key-shaped.
    ///
    /// Key-shaped means: starts with `<<`, ends with `>>`, and has a `:`
    /// before any `[` segment.
    pub fn parse(key: &str) -> Option<ReferenceKey> {
        let inner = key.strip_prefix("<<")?.strip_suffix(">>")?;
        let bracket = inner.find('[');
        let head = match bracket {
            Some(idx) => &inner[..idx],
            None => inner,
        }
        .trim();

        let mut fields = head.split(':');
        let class_prefix = fields.next()?.to_string();
        let display_name = fields.next()?.trim().to_string();

        let program = match bracket {
            Some(idx) => {
                let segment = &inner[idx + 1..];
                let segment = match segment.rfind(']') {
                    Some(end) => &segment[..end],
                    None => segment,
                };
                segment.replace(PROGRAM_TAG, "").trim().to_string()
            }
            None if class_prefix == EntityClass::ClientProgram.prefix() => display_name.clone(),
            None => String::new(),
        };

        Some(ReferenceKey {
            class_prefix,
            display_name,
            program,
        })
    }

    /// The recognized class of this key, if any.
    pub fn class(&self) -> Option<EntityClass> {
        EntityClass::from_prefix(&self.class_prefix)
    }
}

impl FromStr for ReferenceKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReferenceKey::parse(s).ok_or_else(|| CoreError::InvalidKey {
            key: s.to_string(),
            reason: "expected <<Class:Name[ClientProgram:Program]>>".to_string(),
        })
    }
}

impl fmt::Display for ReferenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.program.is_empty() || self.class() == Some(EntityClass::ClientProgram) {
            write!(f, "<<{}:{}>>", self.class_prefix, self.display_name)
        } else {
            write!(
                f,
                "<<{}:{}[{}{}]>>",
                self.class_prefix, self.display_name, PROGRAM_TAG, self.program
            )
        }
    }
}

/// True when `text` has the bare bracket shape: `<<`...`>>` containing `:`.
pub fn is_key_shaped(text: &str) -> bool {
    text.starts_with("<<") && text.ends_with(">>") && text.contains(':')
}

/// Compact label for reports: the `Class:Name` head without brackets.
pub fn short_label(key: &str) -> &str {
    let body = key.strip_prefix("<<").unwrap_or(key);
    let body = match body.find('[') {
        Some(idx) => &body[..idx],
        None => body.strip_suffix(">>").unwrap_or(body),
    };
    body.trim()
}

/// All bracket-shaped substrings of `text`, deduplicated, in first-seen order.
pub fn scan_text(text: &str) -> Vec<String> {
    let mut found = IndexSet::new();
    collect_matches(text, &mut found);
    found.into_iter().collect()
}

/// All bracket-shaped substrings found in any object key or string leaf of
/// `value`, deduplicated, in document order.
pub fn scan_value(value: &Value) -> Vec<String> {
    let mut found = IndexSet::new();
    walk_strings(value, &mut |text| collect_matches(text, &mut found));
    found.into_iter().collect()
}

/// Like [`scan_value`] but keeps only keys of a recognized class.
pub fn scan_references(value: &Value) -> Vec<String> {
    scan_value(value)
        .into_iter()
        .filter(|key| classify(key).is_some())
        .collect()
}

/// True when any object key or string leaf of `value` contains `needle`.
pub fn value_mentions(value: &Value, needle: &str) -> bool {
    let mut hit = false;
    walk_strings(value, &mut |text| {
        if !hit && text.contains(needle) {
            hit = true;
        }
    });
    hit
}

fn collect_matches(text: &str, found: &mut IndexSet<String>) {
    for m in REFERENCE_PATTERN.find_iter(text) {
        let key = m.as_str().trim();
        if !key.is_empty() && !found.contains(key) {
            found.insert(key.to_string());
        }
    }
}

fn walk_strings(value: &Value, visit: &mut dyn FnMut(&str)) {
    match value {
        Value::String(s) => visit(s),
        Value::Array(items) => {
            for item in items {
                walk_strings(item, visit);
            }
        }
        Value::Object(map) => {
            for (k, v) in map {
                visit(k);
                walk_strings(v, visit);
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_standard_key() {
        let key = ReferenceKey::parse("<<MessageConfig:Welcome[ClientProgram:Onboarding]>>").unwrap();
        assert_eq!(key.class_prefix, "MessageConfig");
        assert_eq!(key.display_name, "Welcome");
        assert_eq!(key.program, "Onboarding");
        assert_eq!(key.class(), Some(EntityClass::MessageConfig));
    }

    #[test]
    fn trims_whitespace_around_parts() {
        let key = ReferenceKey::parse("<<Incentive: Big Bonus  [ClientProgram: Rewards ]>>").unwrap();
        assert_eq!(key.display_name, "Big Bonus");
        assert_eq!(key.program, "Rewards");
    }

    #[test]
    fn program_key_is_its_own_program() {
        let key = ReferenceKey::parse("<<ClientProgram:Onboarding>>").unwrap();
        assert_eq!(key.display_name, "Onboarding");
        assert_eq!(key.program, "Onboarding");
    }

    #[test]
    fn key_without_program_segment_has_empty_program() {
        let key = ReferenceKey::parse("<<Rule:Lonely>>").unwrap();
        assert_eq!(key.display_name, "Lonely");
        assert_eq!(key.program, "");
    }

    #[test]
    fn rejects_text_that_is_not_key_shaped() {
        assert!(ReferenceKey::parse("MessageConfig:Welcome").is_none());
        assert!(ReferenceKey::parse("<<MessageConfig:Welcome").is_none());
        assert!(ReferenceKey::parse("<<Welcome[ClientProgram:P]>>").is_none());
        assert!("<<nope>>".parse::<ReferenceKey>().is_err());
    }

    #[test]
    fn display_rebuilds_the_key() {
        let text = "<<Rule:Check[ClientProgram:Ops]>>";
        assert_eq!(ReferenceKey::parse(text).unwrap().to_string(), text);
        let program = "<<ClientProgram:Ops>>";
        assert_eq!(ReferenceKey::parse(program).unwrap().to_string(), program);
    }

    #[test]
    fn short_label_drops_brackets() {
        assert_eq!(
            short_label("<<MessageConfig:Welcome[ClientProgram:Onboarding]>>"),
            "MessageConfig:Welcome"
        );
        assert_eq!(short_label("<<ClientProgram:Onboarding>>"), "ClientProgram:Onboarding");
    }

    #[test]
    fn scan_text_dedupes_in_first_seen_order() {
        let text = "see <<Rule:B[ClientProgram:P]>> then <<Rule:A[ClientProgram:P]>> and <<Rule:B[ClientProgram:P]>>";
        assert_eq!(
            scan_text(text),
            vec!["<<Rule:B[ClientProgram:P]>>", "<<Rule:A[ClientProgram:P]>>"]
        );
    }

    #[test]
    fn scan_value_visits_keys_and_nested_leaves() {
        let doc = json!({
            "rules": ["<<Rule:A[ClientProgram:P]>>", {"deep": "x <<Incentive:I[ClientProgram:P]>> y"}],
            "<<ClientTopic:T[ClientProgram:P]>>": 1,
            "count": 3
        });
        let found = scan_value(&doc);
        assert_eq!(found.len(), 3);
        assert!(found.contains(&"<<ClientTopic:T[ClientProgram:P]>>".to_string()));
        assert!(found.contains(&"<<Incentive:I[ClientProgram:P]>>".to_string()));
    }

    #[test]
    fn scan_value_never_joins_adjacent_values() {
        let doc = json!(["<<Rule:", "A[ClientProgram:P]>>"]);
        assert!(scan_value(&doc).is_empty());
    }

    #[test]
    fn scan_references_drops_unrecognized_classes() {
        let doc = json!({"a": "<<Widget:W[ClientProgram:P]>>", "b": "<<Rule:R[ClientProgram:P]>>"});
        assert_eq!(scan_references(&doc), vec!["<<Rule:R[ClientProgram:P]>>"]);
    }

    #[test]
    fn value_mentions_checks_keys_and_strings() {
        let doc = json!({"filter": {"qryId": 4}, "name": "plain"});
        assert!(value_mentions(&doc, "qry"));
        assert!(!value_mentions(&doc, "_dummy__formula"));
        assert!(!value_mentions(&json!(42), "qry"));
    }
}
