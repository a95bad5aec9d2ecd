#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for grove.
//!
//! Two layers:
//! - **Deserialization layer**: 1:1 mapping to tree-sitter's `node-types.json`
//! - **Artifact layer**: the type table produced by code generation and
//!   consumed by the runtime registry (`TypeTable`)

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::Deserialize;

mod table;
pub mod utils;


pub use table::{Cardinality, FieldDef, FieldTypeRef, NodeTypeDef, TypeTable};

// ============================================================================
// Deserialization Layer
// ============================================================================

fn default_true() -> bool {
    true
}

/// Raw node definition from `node-types.json`.
///
/// Missing `named` is read as `true`, matching how hand-written
/// specifications usually omit it for productions.
#[derive(Debug, Clone, Deserialize)]
pub struct RawNode {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default = "default_true")]
    pub named: bool,
    #[serde(default)]
    pub root: bool,
    #[serde(default)]
    pub extra: bool,
    /// Declaration order is kept; generated accessors follow it.
    #[serde(default)]
    pub fields: IndexMap<String, RawCardinality>,
    pub children: Option<RawCardinality>,
    pub subtypes: Option<Vec<RawTypeRef>>,
}

impl RawNode {
    /// Minimal descriptor with no fields and no subtypes.
    pub fn new(type_name: impl Into<String>, named: bool) -> Self {
        Self {
            type_name: type_name.into(),
            named,
            root: false,
            extra: false,
            fields: IndexMap::new(),
            children: None,
            subtypes: None,
        }
    }

    pub fn is_supertype(&self) -> bool {
        self.subtypes.as_ref().is_some_and(|s| !s.is_empty())
    }
}

/// Cardinality constraints for a field or children slot.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCardinality {
    #[serde(default)]
    pub multiple: bool,
    #[serde(default = "default_true")]
    pub required: bool,
    #[serde(default)]
    pub types: Vec<RawTypeRef>,
}

/// Reference to a node type.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTypeRef {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default = "default_true")]
    pub named: bool,
}

/// Errors raised while reading a grammar specification.
///
/// Any of these aborts generation; no partial artifact is produced.
#[derive(Debug, thiserror::Error)]
pub enum SpecError {
    #[error("invalid node-types JSON: {0}")]
    Json(#[source] serde_json::Error),

    #[error("malformed node-type descriptor #{index}: {source}")]
    Descriptor {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("node-type descriptor #{index} has an empty `type`")]
    EmptyType { index: usize },

    #[error("duplicate node type `{name}` (named: {named})")]
    DuplicateType { name: String, named: bool },
}

/// Parse `node-types.json` content into raw nodes.
///
/// Each descriptor is decoded separately so the error names the offending
/// entry (e.g. a descriptor without a `type` key).
pub fn parse_node_types(json: &str) -> Result<Vec<RawNode>, SpecError> {
    let values: Vec<serde_json::Value> = serde_json::from_str(json).map_err(SpecError::Json)?;

    let mut nodes = Vec::with_capacity(values.len());
    for (index, value) in values.into_iter().enumerate() {
        let node =
            RawNode::deserialize(value).map_err(|source| SpecError::Descriptor { index, source })?;
        nodes.push(node);
    }

    validate_node_types(&nodes)?;
    Ok(nodes)
}

/// Check invariants that serde cannot express: non-empty and unique
/// `(type, named)` pairs.
pub fn validate_node_types(nodes: &[RawNode]) -> Result<(), SpecError> {
    let mut seen: HashSet<(&str, bool)> = HashSet::with_capacity(nodes.len());
    for (index, node) in nodes.iter().enumerate() {
        if node.type_name.is_empty() {
            return Err(SpecError::EmptyType { index });
        }
        if !seen.insert((node.type_name.as_str(), node.named)) {
            return Err(SpecError::DuplicateType {
                name: node.type_name.clone(),
                named: node.named,
            });
        }
    }
    Ok(())
}
