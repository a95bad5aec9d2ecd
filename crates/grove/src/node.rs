//! Immutable concrete-syntax tree nodes.
//!
//! A `Node` is a cheap handle (`Arc`) to an immutable value. Every edit
//! returns a new node; untouched children are shared with the original, and
//! path edits rebuild only the ancestors of the changed node.

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Range;
use std::sync::{Arc, LazyLock};

use serde::Serialize;
use serde::ser::SerializeStruct;

use crate::error::{FieldError, MaterializeError};
use crate::registry::NodeType;
use crate::text::{Point, decode_lossy};

#[derive(Clone)]
pub(crate) struct NodeData {
    pub(crate) kind: Arc<NodeType>,
    pub(crate) grammar_type: Arc<str>,
    pub(crate) named: bool,
    pub(crate) byte_range: Range<usize>,
    pub(crate) start_point: Point,
    pub(crate) end_point: Point,
    /// Source of the parse this node came from, shared by the whole tree.
    pub(crate) source: Arc<[u8]>,
    pub(crate) field_name: Option<Arc<str>>,
    pub(crate) children: Arc<[Node]>,
}

/// Children are released level by level so deep trees drop without recursion.
impl Drop for NodeData {
    fn drop(&mut self) {
        if self.children.is_empty() {
            return;
        }
        let mut pending = vec![std::mem::replace(&mut self.children, no_children())];
        while let Some(mut children) = pending.pop() {
            // Shared lists only lose a reference here.
            let Some(nodes) = Arc::get_mut(&mut children) else {
                continue;
            };
            for node in nodes {
                if let Some(data) = Arc::get_mut(&mut node.0)
                    && !data.children.is_empty()
                {
                    pending.push(std::mem::replace(&mut data.children, no_children()));
                }
            }
        }
    }
}

fn no_children() -> Arc<[Node]> {
    static EMPTY: LazyLock<Arc<[Node]>> = LazyLock::new(|| Arc::from([]));
    Arc::clone(&EMPTY)
}

/// A node of a materialized tree.
///
/// Equality and hashing use the kind identifier and the byte range only.
#[derive(Clone)]
pub struct Node(Arc<NodeData>);

impl Node {
    pub(crate) fn from_data(data: NodeData) -> Self {
        Self(Arc::new(data))
    }

    fn patched(&self, patch: impl FnOnce(&mut NodeData)) -> Self {
        let mut data = (*self.0).clone();
        patch(&mut data);
        Self::from_data(data)
    }

    pub fn kind(&self) -> &NodeType {
        &self.0.kind
    }

    /// Raw grammar type reported by the parser, kept even when the kind fell
    /// back to the base type.
    pub fn grammar_type(&self) -> &str {
        &self.0.grammar_type
    }

    pub fn is_named(&self) -> bool {
        self.0.named
    }

    pub fn byte_range(&self) -> Range<usize> {
        self.0.byte_range.clone()
    }

    pub fn start_byte(&self) -> usize {
        self.0.byte_range.start
    }

    pub fn end_byte(&self) -> usize {
        self.0.byte_range.end
    }

    pub fn start_point(&self) -> Point {
        self.0.start_point
    }

    pub fn end_point(&self) -> Point {
        self.0.end_point
    }

    /// Source bytes covered by this node.
    pub fn bytes(&self) -> &[u8] {
        &self.0.source[self.0.byte_range.clone()]
    }

    /// Node text, with invalid UTF-8 dropped.
    pub fn text(&self) -> Cow<'_, str> {
        decode_lossy(self.bytes())
    }

    /// Field this node occupies in its parent.
    pub fn field_name(&self) -> Option<&str> {
        self.0.field_name.as_deref()
    }

    pub fn children(&self) -> &[Node] {
        &self.0.children
    }

    pub fn child(&self, index: usize) -> Option<&Node> {
        self.0.children.get(index)
    }

    pub fn child_count(&self) -> usize {
        self.0.children.len()
    }

    pub fn named_children(&self) -> impl Iterator<Item = &Node> {
        self.children().iter().filter(|c| c.is_named())
    }

    /// Children tagged with `field`, in order.
    pub fn field_children<'a>(&'a self, field: &'a str) -> impl Iterator<Item = Node> + 'a {
        self.children()
            .iter()
            .filter(move |c| c.field_name() == Some(field))
            .cloned()
    }

    pub fn optional_field(&self, field: &str) -> Option<Node> {
        self.field_children(field).next()
    }

    pub fn required_field(&self, field: &str) -> Result<Node, FieldError> {
        self.optional_field(field)
            .ok_or_else(|| FieldError::RequiredFieldMissing {
                kind: self.kind().identifier().to_string(),
                field: field.to_string(),
            })
    }

    /// This node and all its descendants in preorder.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// Whether both handles point at the same allocation.
    pub fn ptr_eq(&self, other: &Node) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn with_children(&self, children: Vec<Node>) -> Node {
        self.patched(|d| d.children = children.into())
    }

    /// Insert `child` at `index`; indices past the end append.
    pub fn insert_child(&self, index: usize, child: Node) -> Node {
        let mut children = self.children().to_vec();
        let index = index.min(children.len());
        children.insert(index, child);
        self.with_children(children)
    }

    /// Replace every child equal to `old` with `new`.
    pub fn replace_child(&self, old: &Node, new: Node) -> Node {
        let children = self
            .children()
            .iter()
            .map(|c| if c == old { new.clone() } else { c.clone() })
            .collect();
        self.with_children(children)
    }

    /// Remove every child equal to `child`.
    pub fn delete_child(&self, child: &Node) -> Node {
        let children = self
            .children()
            .iter()
            .filter(|c| *c != child)
            .cloned()
            .collect();
        self.with_children(children)
    }

    pub fn with_field_name(&self, field: Option<&str>) -> Node {
        self.patched(|d| d.field_name = field.map(Arc::from))
    }

    /// Re-point this node at another span of its source.
    pub fn with_span(
        &self,
        byte_range: Range<usize>,
        start_point: Point,
        end_point: Point,
    ) -> Result<Node, MaterializeError> {
        if byte_range.start > byte_range.end || byte_range.end > self.0.source.len() {
            return Err(MaterializeError::InvalidRange {
                grammar_type: self.grammar_type().to_string(),
                range: byte_range,
                len: self.0.source.len(),
            });
        }
        Ok(self.patched(|d| {
            d.byte_range = byte_range;
            d.start_point = start_point;
            d.end_point = end_point;
        }))
    }

    /// Child indices leading from this node to the first descendant equal
    /// to `target` (preorder). The empty path is this node itself.
    pub fn path_to(&self, target: &Node) -> Option<Vec<usize>> {
        if self == target {
            return Some(Vec::new());
        }
        // Each entry holds a node and the index of its next unvisited child.
        let mut stack: Vec<(&Node, usize)> = vec![(self, 0)];
        while let Some(top) = stack.last_mut() {
            let node: &Node = top.0;
            let Some(child) = node.child(top.1) else {
                stack.pop();
                continue;
            };
            top.1 += 1;
            if child == target {
                return Some(stack.iter().map(|(_, next)| next - 1).collect());
            }
            stack.push((child, 0));
        }
        None
    }

    pub fn node_at(&self, path: &[usize]) -> Option<&Node> {
        let mut node = self;
        for &index in path {
            node = node.child(index)?;
        }
        Some(node)
    }

    /// Rebuild the node at `path` with `update`, copying only its ancestors.
    pub fn update_at(&self, path: &[usize], update: impl FnOnce(&Node) -> Node) -> Option<Node> {
        let mut ancestors = Vec::with_capacity(path.len());
        let mut node = self;
        for &index in path {
            ancestors.push(node);
            node = node.child(index)?;
        }

        let mut updated = update(node);
        for (ancestor, &index) in ancestors.into_iter().zip(path).rev() {
            let mut children = ancestor.children().to_vec();
            children[index] = updated;
            updated = ancestor.with_children(children);
        }
        Some(updated)
    }

    pub fn replace_at(&self, path: &[usize], new: Node) -> Option<Node> {
        self.update_at(path, |_| new)
    }

    /// Replace the first descendant equal to `old`, returning the new root.
    pub fn replace_descendant(&self, old: &Node, new: Node) -> Option<Node> {
        let path = self.path_to(old)?;
        self.replace_at(&path, new)
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.0.kind.identifier() == other.0.kind.identifier()
            && self.0.byte_range == other.0.byte_range
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.kind.identifier().hash(state);
        self.0.byte_range.hash(state);
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}@{}..{}",
            self.kind().identifier(),
            self.start_byte(),
            self.end_byte()
        )
    }
}

/// Recurses once per tree level; very deep trees need a larger stack.
impl Serialize for Node {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("Node", 10)?;
        state.serialize_field("kind", self.kind().identifier())?;
        state.serialize_field("type", self.grammar_type())?;
        state.serialize_field("named", &self.is_named())?;
        state.serialize_field("field", &self.field_name())?;
        state.serialize_field("start_byte", &self.start_byte())?;
        state.serialize_field("end_byte", &self.end_byte())?;
        state.serialize_field("start_point", &self.start_point())?;
        state.serialize_field("end_point", &self.end_point())?;
        state.serialize_field("text", &self.text())?;
        state.serialize_field("children", self.children())?;
        state.end()
    }
}

/// Preorder iterator over a subtree.
pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<&'a Node> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}
