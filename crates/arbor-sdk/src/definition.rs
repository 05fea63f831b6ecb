//! Serializable tree definitions
//!
//! A definition document describes one tree:
//!
//! ```yaml
//! tree:
//!   id: diamond_pricing
//!   description: Price per carat by grade
//!   nodes:
//!     weight:
//!       rules:
//!         - when: "weight >= 9"
//!           result: { pricePerCarat: 5500 }
//!   root:
//!     rules:
//!       - when: "color == 'D'"
//!         then: {}
//!       - when: "color == 'Z'"
//!         then: { ref: weight }
//! ```
//!
//! `then` is either an inline node or a reference to an entry of `nodes`.
//! Named nodes are compiled once and shared by every rule that references
//! them. JSON documents with the same shape are accepted too.

use crate::error::Result;
use arbor_core::Results;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Top-level definition document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TreeDocument {
    pub tree: TreeDefinition,
}

impl TreeDocument {
    /// Parse a YAML document
    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Parse a JSON document
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Read a document from disk; `.json` files are parsed as JSON, everything else as YAML
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json(&content)
        } else {
            Self::from_yaml(&content)
        }
    }
}

/// One decision tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TreeDefinition {
    /// Tree identifier, unique within an engine
    pub id: String,

    /// Free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Named nodes that rules can reference
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub nodes: BTreeMap<String, NodeDefinition>,

    /// Entry node
    pub root: NodeDefinition,
}

/// A node and its ordered rules
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeDefinition {
    #[serde(default)]
    pub rules: Vec<RuleDefinition>,
}

/// A rule: an expression plus either a child node or a result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleDefinition {
    /// Expression guarding the rule
    pub when: String,

    /// Child node evaluated when the rule matches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub then: Option<ChildDefinition>,

    /// Result returned when the rule matches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Results>,
}

/// Child of a decision rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChildDefinition {
    /// Reference to a named node
    Ref(NodeRef),
    /// Node written in place
    Inline(NodeDefinition),
}

/// `{ ref: name }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeRef {
    #[serde(rename = "ref")]
    pub name: String,
}
