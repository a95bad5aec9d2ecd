//! One-shot parsing into materialized trees.

use std::sync::Arc;

use crate::engine::{ParseEngine, SyntaxTree};
use crate::error::Error;
use crate::materialize::Materializer;
use crate::node::Node;
use crate::registry::TypeRegistry;

/// An engine paired with the registry its trees are materialized against.
pub struct Parser<E: ParseEngine> {
    engine: E,
    registry: Arc<TypeRegistry>,
}

impl<E: ParseEngine> Parser<E> {
    pub fn new(engine: E, registry: Arc<TypeRegistry>) -> Self {
        Self { engine, registry }
    }

    pub fn registry(&self) -> &Arc<TypeRegistry> {
        &self.registry
    }

    pub fn parse(&mut self, text: &str) -> Result<Node, Error> {
        self.parse_incremental(text, None).map(|(_, root)| root)
    }

    /// Parse `text` reusing `old_tree`, which must already carry the edit
    /// that produced `text`. Returns the engine tree for the next round.
    pub fn parse_incremental(
        &mut self,
        text: &str,
        old_tree: Option<&E::Tree>,
    ) -> Result<(E::Tree, Node), Error> {
        let tree = self.engine.parse(text.as_bytes(), old_tree)?;
        let source: Arc<[u8]> = Arc::from(text.as_bytes());
        let root = Materializer::new(&self.registry).build(&tree.root(), &source)?;
        Ok((tree, root))
    }

    pub fn into_engine(self) -> E {
        self.engine
    }
}
