//! Source text, engine tree and materialized root kept in step across edits.

use std::sync::Arc;

use crate::engine::{InputEdit, ParseEngine, SyntaxTree};
use crate::error::{EditError, Error};
use crate::materialize::Materializer;
use crate::node::Node;
use crate::registry::TypeRegistry;
use crate::text::point_at;

/// A document that re-parses incrementally on every edit.
///
/// `text`, the engine tree and `root` change together: an edit that fails
/// at any step leaves all three as they were.
pub struct IncrementalDocument<E: ParseEngine> {
    text: String,
    engine: E,
    tree: E::Tree,
    root: Node,
    registry: Arc<TypeRegistry>,
}

impl<E: ParseEngine> IncrementalDocument<E> {
    pub fn create(
        text: impl Into<String>,
        mut engine: E,
        registry: Arc<TypeRegistry>,
    ) -> Result<Self, Error> {
        let text = text.into();
        let tree = engine.parse(text.as_bytes(), None)?;
        let source: Arc<[u8]> = Arc::from(text.as_bytes());
        let root = Materializer::new(&registry).build(&tree.root(), &source)?;
        tracing::debug!(bytes = text.len(), "created document");
        Ok(Self {
            text,
            engine,
            tree,
            root,
            registry,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn tree(&self) -> &E::Tree {
        &self.tree
    }

    pub fn registry(&self) -> &Arc<TypeRegistry> {
        &self.registry
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Replace `start_byte..old_end_byte` with `new_text`.
    ///
    /// `new_end_byte` must equal `start_byte + new_text.len()`. Returns the
    /// new root.
    ///
    /// The new end point is measured in the edited text, not the current one,
    /// since that is where tree-sitter expects it.
    pub fn edit(
        &mut self,
        start_byte: usize,
        old_end_byte: usize,
        new_end_byte: usize,
        new_text: &str,
    ) -> Result<&Node, EditError> {
        let len = self.text.len();
        if start_byte > old_end_byte || old_end_byte > len {
            return Err(EditError::InvalidRange {
                start: start_byte,
                old_end: old_end_byte,
                len,
            });
        }
        for offset in [start_byte, old_end_byte] {
            if !self.text.is_char_boundary(offset) {
                return Err(EditError::NotCharBoundary { offset });
            }
        }
        if new_end_byte != start_byte + new_text.len() {
            return Err(EditError::LengthMismatch {
                start: start_byte,
                new_end: new_end_byte,
                inserted: new_text.len(),
            });
        }

        let mut text = String::with_capacity(len - (old_end_byte - start_byte) + new_text.len());
        text.push_str(&self.text[..start_byte]);
        text.push_str(new_text);
        text.push_str(&self.text[old_end_byte..]);

        let edit = InputEdit {
            start_byte,
            old_end_byte,
            new_end_byte,
            start_position: point_at(self.text.as_bytes(), start_byte),
            old_end_position: point_at(self.text.as_bytes(), old_end_byte),
            new_end_position: point_at(text.as_bytes(), new_end_byte),
        };

        let mut old_tree = self.tree.clone();
        old_tree.apply_edit(&edit);
        let tree = self.engine.parse(text.as_bytes(), Some(&old_tree))?;
        let source: Arc<[u8]> = Arc::from(text.as_bytes());
        let root = Materializer::new(&self.registry).build(&tree.root(), &source)?;

        tracing::debug!(
            start = start_byte,
            old_end = old_end_byte,
            new_end = new_end_byte,
            bytes = text.len(),
            "applied edit"
        );
        self.text = text;
        self.tree = tree;
        self.root = root;
        Ok(&self.root)
    }
}
