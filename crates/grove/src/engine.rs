//! Parsing engine contract.
//!
//! The runtime never parses by itself. A `ParseEngine` turns bytes into a
//! `SyntaxTree`, optionally reusing a previously edited tree, and the tree
//! exposes its nodes through `RawNode`.

use std::ops::Range;

use crate::error::ParseError;
use crate::text::Point;

/// Description of a text edit, in the shape incremental parsers expect.
///
/// `start_position` and `old_end_position` are measured in the text before
/// the edit, `new_end_position` in the text after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEdit {
    pub start_byte: usize,
    pub old_end_byte: usize,
    pub new_end_byte: usize,
    pub start_position: Point,
    pub old_end_position: Point,
    pub new_end_position: Point,
}

/// A node of an engine-produced tree.
pub trait RawNode: Clone {
    fn type_name(&self) -> &str;

    fn named(&self) -> bool;

    fn span(&self) -> Range<usize>;

    fn start_point(&self) -> Point;

    fn end_point(&self) -> Point;

    /// Children in order, each with the field it occupies.
    fn children_with_fields(&self) -> Vec<(Self, Option<&str>)>;
}

/// An engine-produced tree.
pub trait SyntaxTree: Clone {
    type Node<'t>: RawNode
    where
        Self: 't;

    fn root(&self) -> Self::Node<'_>;

    /// Adjust the tree's positions for `edit` so it can guide a reparse.
    fn apply_edit(&mut self, edit: &InputEdit);
}

/// Something that parses source bytes into a `SyntaxTree`.
pub trait ParseEngine {
    type Tree: SyntaxTree;

    /// Parse `text`. `old_tree`, if given, must already reflect the edit
    /// that produced `text`.
    fn parse(&mut self, text: &[u8], old_tree: Option<&Self::Tree>)
    -> Result<Self::Tree, ParseError>;
}
