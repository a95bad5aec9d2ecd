//! Generated type table.
//!
//! The table is the only artifact shared between code generation and the
//! runtime registry. It is embedded as JSON in generated Rust modules and can
//! also be written next to them as a standalone file.

use serde::{Deserialize, Serialize};

/// Cardinality info for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cardinality {
    pub multiple: bool,
    pub required: bool,
}

/// Reference from a field to one of its declared types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldTypeRef {
    pub grammar_type: String,
    pub named: bool,
    /// `None` when the reference does not name a descriptor of the grammar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
}

/// A named field slot of a generated type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    pub cardinality: Cardinality,
    #[serde(default)]
    pub types: Vec<FieldTypeRef>,
}

impl FieldDef {
    /// True when every declared type resolved to a generated identifier.
    pub fn is_resolved(&self) -> bool {
        self.types.iter().all(|t| t.identifier.is_some())
    }
}

/// One generated node type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeTypeDef {
    pub grammar_type: String,
    pub named: bool,
    pub identifier: String,
    /// Parent identifier; `None` means the universal base type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Identifiers of the kinds viewable as this type: the type itself
    /// followed by its transitive subtypes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub kinds: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldDef>,
}

impl NodeTypeDef {
    pub fn accepts(&self, kind: &str) -> bool {
        self.identifier == kind || self.kinds.iter().any(|k| k == kind)
    }

    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Name -> type table for one grammar, in generation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeTable {
    /// Identifier of the universal base type the table was generated against.
    pub base: String,
    pub types: Vec<NodeTypeDef>,
}

impl TypeTable {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            types: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NodeTypeDef> {
        self.types.iter()
    }

    /// Look up a type by grammar name and namedness.
    pub fn get(&self, grammar_type: &str, named: bool) -> Option<&NodeTypeDef> {
        self.types
            .iter()
            .find(|t| t.grammar_type == grammar_type && t.named == named)
    }

    pub fn by_identifier(&self, identifier: &str) -> Option<&NodeTypeDef> {
        self.types.iter().find(|t| t.identifier == identifier)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Pretty JSON; stable for identical tables.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
