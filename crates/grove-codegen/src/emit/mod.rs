//! Source renderers for generated type tables.

pub mod rust;

#[cfg(test)]
mod rust_tests;

pub use rust::emit_rust;
