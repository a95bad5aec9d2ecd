#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Code generation from tree-sitter `node-types.json`.
//!
//! Pipeline:
//! 1. `NameResolver` assigns each `(type, named)` descriptor a unique Rust identifier
//! 2. `InheritanceAnalyzer` orders descriptors leaves-first along supertype edges
//! 3. `TypeGenerator` builds the `TypeTable` and renders the Rust module

pub mod config;
pub mod emit;
pub mod generator;
pub mod inheritance;
pub mod naming;


pub use config::GenerateConfig;
pub use generator::{GeneratedModule, TypeGenerator, generate, generate_from_json};
pub use inheritance::InheritanceAnalyzer;
pub use naming::NameResolver;

use grove_core::SpecError;

/// Errors from code generation. Nothing is produced when one is returned.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error(transparent)]
    Spec(#[from] SpecError),

    #[error("invalid {option} `{value}`: not a Rust identifier")]
    InvalidConfig { option: &'static str, value: String },

    #[error("failed to serialize type table: {0}")]
    Table(#[from] serde_json::Error),
}
