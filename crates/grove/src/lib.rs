//! Grove: typed, immutable concrete-syntax trees with incremental editing.
//!
//! A [`ParseEngine`] produces raw trees; the [`Materializer`] turns them into
//! immutable [`Node`]s whose kinds come from a [`TypeRegistry`] filled with
//! tables generated by `grove-codegen`. [`IncrementalDocument`] keeps text,
//! engine tree and materialized root in step across edits.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! let mut registry = grove::TypeRegistry::new();
//! grove_langs::python::nodes::register(&mut registry)?;
//! let engine = grove::TreeSitterEngine::new(&grove_langs::python::lang().language())?;
//! let mut doc = grove::IncrementalDocument::create("x = 1\n", engine, Arc::new(registry))?;
//! doc.edit(4, 5, 5, "2")?;
//! assert_eq!(doc.text(), "x = 2\n");
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod bootstrap;
pub mod document;
pub mod dump;
pub mod engine;
pub mod error;
pub mod materialize;
pub mod node;
pub mod parser;
pub mod registry;
pub mod text;
pub mod tree_sitter;
pub mod typed;

#[cfg(test)]
mod test_utils;

#[cfg(test)]
mod node_tests;

pub use bootstrap::{Bootstrap, ModuleRef};
pub use document::IncrementalDocument;
pub use dump::{DumpOptions, dump};
pub use engine::{InputEdit, ParseEngine, RawNode, SyntaxTree};
pub use error::{
    EditError, Error, FieldError, MaterializeError, ParseError, RegistrationError, Result,
};
pub use materialize::Materializer;
pub use node::{Descendants, Node};
pub use parser::Parser;
pub use registry::{DEFAULT_BASE, NodeType, TypeRegistry};
pub use text::{Point, decode_lossy, point_at};
pub use tree_sitter::TreeSitterEngine;
pub use typed::TypedNode;

pub use grove_core::{Cardinality, FieldDef, FieldTypeRef, NodeTypeDef, TypeTable};
