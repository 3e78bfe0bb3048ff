//! The closed set of entity classes a reference key can name.
//!
//! Classification is a single lookup from a key's class prefix to an
//! [`EntityClass`] variant. Anything outside the table is unrecognized and
//! never becomes a node.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::key::ReferenceKey;

/// Kinds of configuration entity that participate in the reference graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityClass {
    MessageConfig,
    ClientTopic,
    StandaloneFormula,
    ClientPageLayout,
    MessageCategory,
    CustomFieldDef,
    Incentive,
    Rule,
    RuleSet,
    ClientProgram,
    ClientRaffle,
    ClientReward,
    ClientTaskHandlerDefinition,
}

impl EntityClass {
    /// Every recognized class, in declaration order.
    pub const ALL: [EntityClass; 13] = [
        EntityClass::MessageConfig,
        EntityClass::ClientTopic,
        EntityClass::StandaloneFormula,
        EntityClass::ClientPageLayout,
        EntityClass::MessageCategory,
        EntityClass::CustomFieldDef,
        EntityClass::Incentive,
        EntityClass::Rule,
        EntityClass::RuleSet,
        EntityClass::ClientProgram,
        EntityClass::ClientRaffle,
        EntityClass::ClientReward,
        EntityClass::ClientTaskHandlerDefinition,
    ];

    /// The class prefix as it appears inside a reference key.
    pub fn prefix(self) -> &'static str {
        match self {
            EntityClass::MessageConfig => "MessageConfig",
            EntityClass::ClientTopic => "ClientTopic",
            EntityClass::StandaloneFormula => "StandaloneFormula",
            EntityClass::ClientPageLayout => "ClientPageLayout",
            EntityClass::MessageCategory => "MessageCategory",
            EntityClass::CustomFieldDef => "CustomFieldDef",
            EntityClass::Incentive => "Incentive",
            EntityClass::Rule => "Rule",
            EntityClass::RuleSet => "RuleSet",
            EntityClass::ClientProgram => "ClientProgram",
            EntityClass::ClientRaffle => "ClientRaffle",
            EntityClass::ClientReward => "ClientReward",
            EntityClass::ClientTaskHandlerDefinition => "ClientTaskHandlerDefinition",
        }
    }

    /// Looks up a class by its exact key prefix.
    pub fn from_prefix(prefix: &str) -> Option<EntityClass> {
        EntityClass::ALL.into_iter().find(|class| class.prefix() == prefix)
    }
}

impl fmt::Display for EntityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

impl FromStr for EntityClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityClass::from_prefix(s).ok_or_else(|| format!("unknown entity class '{}'", s))
    }
}

/// Classifies a reference key string.
///
/// Returns `None` for text that is not a well-formed key, for unknown class
/// prefixes, and for `RuleSet` keys that mention `None` (exports emit those
/// for unassigned rule sets).
pub fn classify(key: &str) -> Option<EntityClass> {
    let parsed = ReferenceKey::parse(key)?;
    let class = EntityClass::from_prefix(&parsed.class_prefix)?;
    if class == EntityClass::RuleSet && key.contains("None") {
        return None;
    }
    Some(class)
}
