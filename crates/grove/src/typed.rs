//! Statically typed views over nodes.

use crate::node::Node;

/// A generated node type: a newtype over [`Node`] bound to one grammar type.
///
/// `KINDS` lists every kind identifier the type can view: itself and, for
/// supertypes, all transitive subtypes.
pub trait TypedNode: Sized {
    const GRAMMAR_TYPE: &'static str;
    const NAMED: bool;
    const IDENTIFIER: &'static str;
    const KINDS: &'static [&'static str];

    /// Wrap `node` without checking its kind.
    fn from_node_unchecked(node: Node) -> Self;

    fn as_node(&self) -> &Node;

    fn can_cast(node: &Node) -> bool {
        Self::KINDS.contains(&node.kind().identifier())
    }

    fn cast(node: Node) -> Option<Self> {
        if Self::can_cast(&node) {
            Some(Self::from_node_unchecked(node))
        } else {
            None
        }
    }

    fn into_node(self) -> Node {
        self.as_node().clone()
    }
}
