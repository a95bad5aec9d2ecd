//! Grammar type name -> node type mapping.

use std::collections::HashMap;
use std::sync::Arc;

use grove_core::{FieldDef, NodeTypeDef, TypeTable};

use crate::bootstrap::ModuleRef;
use crate::error::RegistrationError;

/// Default identifier of the universal base type.
pub const DEFAULT_BASE: &str = "SyntaxNode";

/// The concrete type a node was materialized as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeType {
    identifier: String,
    /// `None` for the universal base type.
    def: Option<NodeTypeDef>,
}

impl NodeType {
    fn base(identifier: &str) -> Self {
        Self {
            identifier: identifier.to_string(),
            def: None,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn is_base(&self) -> bool {
        self.def.is_none()
    }

    pub fn definition(&self) -> Option<&NodeTypeDef> {
        self.def.as_ref()
    }

    pub fn parent(&self) -> Option<&str> {
        self.def.as_ref().and_then(|d| d.parent.as_deref())
    }

    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.def.as_ref().and_then(|d| d.field(name))
    }

    /// Whether a node of `kind` (an identifier) can be viewed as this type.
    pub fn accepts(&self, kind: &str) -> bool {
        match &self.def {
            Some(def) => def.accepts(kind),
            None => true,
        }
    }
}

/// Maps `(grammar type, named)` to node types.
///
/// Starts with only the universal base type. Tables are merged additively;
/// registering a grammar type again replaces its previous entry.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    base: Arc<NodeType>,
    named: HashMap<String, Arc<NodeType>>,
    anonymous: HashMap<String, Arc<NodeType>>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::with_base(DEFAULT_BASE)
    }

    pub fn with_base(identifier: &str) -> Self {
        Self {
            base: Arc::new(NodeType::base(identifier)),
            named: HashMap::new(),
            anonymous: HashMap::new(),
        }
    }

    pub fn base(&self) -> &Arc<NodeType> {
        &self.base
    }

    /// Number of registered grammar types, not counting the base.
    pub fn len(&self) -> usize {
        self.named.len() + self.anonymous.len()
    }

    pub fn is_empty(&self) -> bool {
        self.named.is_empty() && self.anonymous.is_empty()
    }

    pub fn register(&mut self, table: &TypeTable) {
        if table.base != self.base.identifier {
            tracing::debug!(
                table_base = %table.base,
                registry_base = %self.base.identifier,
                "registering table generated against another base type"
            );
        }
        for def in table.iter() {
            let map = if def.named {
                &mut self.named
            } else {
                &mut self.anonymous
            };
            map.insert(
                def.grammar_type.clone(),
                Arc::new(NodeType {
                    identifier: def.identifier.clone(),
                    def: Some(def.clone()),
                }),
            );
        }
        tracing::debug!(types = table.len(), total = self.len(), "registered type table");
    }

    /// Read and merge the table behind `module`.
    ///
    /// Not deduplicated; see [`crate::Bootstrap`] for load-once semantics.
    pub fn load(&mut self, module: &ModuleRef) -> Result<(), RegistrationError> {
        let table = module.read_table()?;
        self.register(&table);
        Ok(())
    }

    pub fn lookup(&self, grammar_type: &str, named: bool) -> Option<&Arc<NodeType>> {
        if named {
            self.named.get(grammar_type)
        } else {
            self.anonymous.get(grammar_type)
        }
    }

    /// Node type for a raw node; unregistered types map to the base type.
    pub fn resolve(&self, grammar_type: &str, named: bool) -> Arc<NodeType> {
        match self.lookup(grammar_type, named) {
            Some(ty) => Arc::clone(ty),
            None => {
                tracing::trace!(grammar_type, named, "unregistered node type, using base");
                Arc::clone(&self.base)
            }
        }
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.named
            .values()
            .chain(self.anonymous.values())
            .map(|t| t.identifier())
    }
}
