//! `ParseEngine` backed by tree-sitter.

use std::ops::Range;

use arborium_tree_sitter as ts;

use crate::engine::{InputEdit, ParseEngine, RawNode, SyntaxTree};
use crate::error::ParseError;
use crate::text::Point;

impl RawNode for ts::Node<'_> {
    fn type_name(&self) -> &str {
        self.kind()
    }

    fn named(&self) -> bool {
        self.is_named()
    }

    fn span(&self) -> Range<usize> {
        self.byte_range()
    }

    fn start_point(&self) -> Point {
        self.start_position().into()
    }

    fn end_point(&self) -> Point {
        self.end_position().into()
    }

    fn children_with_fields(&self) -> Vec<(Self, Option<&str>)> {
        let mut cursor = self.walk();
        let mut result = Vec::new();
        if cursor.goto_first_child() {
            loop {
                result.push((cursor.node(), cursor.field_name()));
                if !cursor.goto_next_sibling() {
                    break;
                }
            }
        }
        result
    }
}

impl SyntaxTree for ts::Tree {
    type Node<'t>
        = ts::Node<'t>
    where
        Self: 't;

    fn root(&self) -> ts::Node<'_> {
        self.root_node()
    }

    fn apply_edit(&mut self, edit: &InputEdit) {
        self.edit(&ts::InputEdit {
            start_byte: edit.start_byte,
            old_end_byte: edit.old_end_byte,
            new_end_byte: edit.new_end_byte,
            start_position: edit.start_position.into(),
            old_end_position: edit.old_end_position.into(),
            new_end_position: edit.new_end_position.into(),
        });
    }
}

/// Parses with a tree-sitter language.
pub struct TreeSitterEngine {
    parser: ts::Parser,
}

impl TreeSitterEngine {
    pub fn new(language: &ts::Language) -> Result<Self, ParseError> {
        let mut parser = ts::Parser::new();
        parser
            .set_language(language)
            .map_err(|e| ParseError::Language(e.to_string()))?;
        Ok(Self { parser })
    }
}

impl ParseEngine for TreeSitterEngine {
    type Tree = ts::Tree;

    fn parse(&mut self, text: &[u8], old_tree: Option<&ts::Tree>) -> Result<ts::Tree, ParseError> {
        self.parser.parse(text, old_tree).ok_or(ParseError::NoTree)
    }
}
