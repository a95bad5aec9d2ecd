//! Bundled tree-sitter grammars, each with node types generated at build time.
//!
//! Every enabled language gets a module (`grove_langs::python`, ...) holding
//! its generated `nodes`, and a [`Lang`] handle for lookup by name or file
//! extension.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use arborium_tree_sitter::Language;
use grove::{
    Error, IncrementalDocument, ModuleRef, ParseError, Parser, RegistrationError,
    TreeSitterEngine, TypeRegistry,
};

pub mod builtin;

pub use builtin::*;

#[cfg(test)]
mod lib_tests;

/// A bundled language.
#[derive(Debug, Clone)]
pub struct Lang {
    name: &'static str,
    aliases: &'static [&'static str],
    extensions: &'static [&'static str],
    language: fn() -> Language,
    node_types_json: &'static str,
    module: ModuleRef,
}

impl Lang {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn aliases(&self) -> &'static [&'static str] {
        self.aliases
    }

    pub fn extensions(&self) -> &'static [&'static str] {
        self.extensions
    }

    pub fn language(&self) -> Language {
        (self.language)()
    }

    /// The grammar's `node-types.json`, as bundled.
    pub fn node_types_json(&self) -> &'static str {
        self.node_types_json
    }

    /// The generated module's table.
    pub fn module(&self) -> &ModuleRef {
        &self.module
    }

    /// A registry holding only this language's types.
    pub fn registry(&self) -> Result<TypeRegistry, RegistrationError> {
        let mut registry = TypeRegistry::new();
        registry.load(&self.module)?;
        Ok(registry)
    }

    pub fn engine(&self) -> Result<TreeSitterEngine, ParseError> {
        TreeSitterEngine::new(&self.language())
    }

    pub fn parser(&self) -> Result<Parser<TreeSitterEngine>, Error> {
        Ok(Parser::new(self.engine()?, self.registry()?.into()))
    }

    pub fn document(
        &self,
        text: impl Into<String>,
    ) -> Result<IncrementalDocument<TreeSitterEngine>, Error> {
        IncrementalDocument::create(text, self.engine()?, self.registry()?.into())
    }
}
