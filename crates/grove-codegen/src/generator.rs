//! Type table construction and module generation.

use grove_core::{
    Cardinality, FieldDef, FieldTypeRef, NodeTypeDef, RawNode, TypeTable, parse_node_types,
    validate_node_types,
};

use crate::GenerateError;
use crate::config::{ANY_NODE, GenerateConfig, UNKNOWN_VARIANT};
use crate::emit::emit_rust;
use crate::inheritance::InheritanceAnalyzer;
use crate::naming::NameResolver;

/// Output of one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedModule {
    /// Rust source of the generated module.
    pub source: String,
    /// Table embedded in `source`, also usable as a standalone artifact.
    pub table: TypeTable,
}

impl GeneratedModule {
    pub fn table_json(&self) -> Result<String, GenerateError> {
        Ok(self.table.to_json()?)
    }
}

/// Builds the type table for a set of descriptors.
///
/// Each call starts with a fresh name resolver, so identical input always
/// yields identical identifiers.
pub struct TypeGenerator<'a> {
    nodes: &'a [RawNode],
    config: &'a GenerateConfig,
}

impl<'a> TypeGenerator<'a> {
    pub fn new(nodes: &'a [RawNode], config: &'a GenerateConfig) -> Self {
        Self { nodes, config }
    }

    pub fn build_table(&self) -> Result<TypeTable, GenerateError> {
        self.config.validate()?;
        validate_node_types(self.nodes)?;

        let mut resolver = NameResolver::new(&self.config.token_suffix);
        resolver.reserve(&self.config.base_type_name);
        resolver.reserve(ANY_NODE);
        resolver.reserve(UNKNOWN_VARIANT);
        let identifiers = resolver.resolve_all(self.nodes);

        let analyzer = InheritanceAnalyzer::new(self.nodes);
        let mut table = TypeTable::new(&self.config.base_type_name);

        for idx in analyzer.inheritance_order() {
            let node = analyzer.node(idx);
            let kinds = std::iter::once(idx)
                .chain(analyzer.subtypes_of(idx))
                .map(|i| identifiers[i].clone())
                .collect();
            let fields = node
                .fields
                .iter()
                .map(|(name, slot)| FieldDef {
                    name: name.clone(),
                    cardinality: Cardinality {
                        multiple: slot.multiple,
                        required: slot.required,
                    },
                    types: slot
                        .types
                        .iter()
                        .map(|r| FieldTypeRef {
                            grammar_type: r.type_name.clone(),
                            named: r.named,
                            identifier: analyzer
                                .index_of(&r.type_name, r.named)
                                .map(|i| identifiers[i].clone()),
                        })
                        .collect(),
                })
                .collect();

            table.types.push(NodeTypeDef {
                grammar_type: node.type_name.clone(),
                named: node.named,
                identifier: identifiers[idx].clone(),
                parent: analyzer.parent(idx).map(|p| identifiers[p].clone()),
                kinds,
                fields,
            });
        }

        tracing::debug!(types = table.len(), "built type table");
        Ok(table)
    }

    pub fn generate(&self) -> Result<GeneratedModule, GenerateError> {
        let table = self.build_table()?;
        let json = table.to_json()?;
        let source = emit_rust(&table, self.config, &json);
        tracing::debug!(
            module = %self.config.module_name,
            bytes = source.len(),
            "generated module"
        );
        Ok(GeneratedModule { source, table })
    }
}

/// Generate a module from parsed descriptors.
pub fn generate(
    nodes: &[RawNode],
    config: &GenerateConfig,
) -> Result<GeneratedModule, GenerateError> {
    TypeGenerator::new(nodes, config).generate()
}

/// Generate a module from `node-types.json` content.
pub fn generate_from_json(
    json: &str,
    config: &GenerateConfig,
) -> Result<GeneratedModule, GenerateError> {
    let nodes = parse_node_types(json)?;
    generate(&nodes, config)
}
