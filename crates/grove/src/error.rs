//! Runtime error types.

use std::ops::Range;
use std::path::PathBuf;

/// A generated artifact could not be loaded into a registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error("type table not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read type table {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed type table `{module}`: {source}")]
    Malformed {
        module: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("type table `{module}` defines no types")]
    Empty { module: String },
}

/// A raw parse tree violates the node model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MaterializeError {
    #[error("`{grammar_type}` spans {range:?}, outside a source of {len} bytes")]
    InvalidRange {
        grammar_type: String,
        range: Range<usize>,
        len: usize,
    },

    #[error("child `{child}` at {child_range:?} is not inside parent `{parent}` at {parent_range:?}")]
    ChildOutsideParent {
        parent: String,
        parent_range: Range<usize>,
        child: String,
        child_range: Range<usize>,
    },

    #[error("children of `{parent}` out of order: {previous:?} then {next:?}")]
    ChildrenOutOfOrder {
        parent: String,
        previous: Range<usize>,
        next: Range<usize>,
    },
}

/// The parse engine produced no tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("language rejected by parser: {0}")]
    Language(String),

    #[error("parser produced no tree")]
    NoTree,
}

/// An edit was rejected or could not be applied. The document is unchanged.
#[derive(Debug, thiserror::Error)]
pub enum EditError {
    #[error("invalid edit range {start}..{old_end} for a document of {len} bytes")]
    InvalidRange {
        start: usize,
        old_end: usize,
        len: usize,
    },

    #[error("edit offset {offset} is not on a UTF-8 character boundary")]
    NotCharBoundary { offset: usize },

    #[error("new end {new_end} does not match start {start} plus {inserted} inserted bytes")]
    LengthMismatch {
        start: usize,
        new_end: usize,
        inserted: usize,
    },

    #[error("reparse failed: {0}")]
    Parse(#[from] ParseError),

    #[error("rematerialization failed: {0}")]
    Materialize(#[from] MaterializeError),
}

/// Field lookup on a typed node.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("`{kind}` has no `{field}` child")]
    RequiredFieldMissing { kind: String, field: String },
}

/// Any runtime error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error(transparent)]
    Materialize(#[from] MaterializeError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Edit(#[from] EditError),

    #[error(transparent)]
    Field(#[from] FieldError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
