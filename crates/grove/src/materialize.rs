//! Building `Node` trees from engine trees.

use std::collections::HashMap;
use std::ops::Range;
use std::sync::Arc;

use crate::engine::RawNode;
use crate::error::MaterializeError;
use crate::node::{Node, NodeData};
use crate::registry::TypeRegistry;

/// Turns a raw tree into nodes, picking each node's kind from a registry.
///
/// Unregistered grammar types become the registry's base type.
pub struct Materializer<'r> {
    registry: &'r TypeRegistry,
}

impl<'r> Materializer<'r> {
    pub fn new(registry: &'r TypeRegistry) -> Self {
        Self { registry }
    }

    /// Materialize `raw` and its subtree over `source`.
    ///
    /// `source` is shared by every node built; node text is a view into it.
    pub fn build<N: RawNode>(&self, raw: &N, source: &Arc<[u8]>) -> Result<Node, MaterializeError> {
        let mut build = Build {
            registry: self.registry,
            source,
            strings: HashMap::new(),
            count: 0,
        };
        let root = build.tree(raw)?;
        tracing::trace!(nodes = build.count, bytes = source.len(), "materialized tree");
        Ok(root)
    }
}

struct Build<'a> {
    registry: &'a TypeRegistry,
    source: &'a Arc<[u8]>,
    /// Interned grammar type and field names.
    strings: HashMap<String, Arc<str>>,
    count: usize,
}

/// A raw node whose children are still being built.
struct Frame<N> {
    raw: N,
    range: Range<usize>,
    field: Option<Arc<str>>,
    pending: std::vec::IntoIter<(N, Option<Arc<str>>)>,
    children: Vec<Node>,
    previous: Option<Range<usize>>,
}

impl<N: RawNode> Frame<N> {
    /// Check that `child` lies inside this node and after the previous child.
    fn accept(&mut self, child: &N) -> Result<(), MaterializeError> {
        let child_range = child.span();
        if child_range.start < self.range.start || child_range.end > self.range.end {
            return Err(MaterializeError::ChildOutsideParent {
                parent: self.raw.type_name().to_string(),
                parent_range: self.range.clone(),
                child: child.type_name().to_string(),
                child_range,
            });
        }
        if let Some(prev) = &self.previous
            && child_range.start < prev.end
        {
            return Err(MaterializeError::ChildrenOutOfOrder {
                parent: self.raw.type_name().to_string(),
                previous: prev.clone(),
                next: child_range,
            });
        }
        self.previous = Some(child_range);
        Ok(())
    }
}

impl Build<'_> {
    fn intern(&mut self, s: &str) -> Arc<str> {
        if let Some(interned) = self.strings.get(s) {
            return Arc::clone(interned);
        }
        let interned: Arc<str> = Arc::from(s);
        self.strings.insert(s.to_string(), Arc::clone(&interned));
        interned
    }

    /// Depth-first over an explicit stack, so nesting depth is bounded by
    /// memory rather than the call stack.
    fn tree<N: RawNode>(&mut self, root: &N) -> Result<Node, MaterializeError> {
        let mut ancestors: Vec<Frame<N>> = Vec::new();
        let mut frame = self.open(root.clone(), None)?;
        loop {
            if let Some((child, field)) = frame.pending.next() {
                frame.accept(&child)?;
                let child_frame = self.open(child, field)?;
                ancestors.push(std::mem::replace(&mut frame, child_frame));
                continue;
            }
            let node = self.finish(frame);
            match ancestors.pop() {
                Some(mut parent) => {
                    parent.children.push(node);
                    frame = parent;
                }
                None => return Ok(node),
            }
        }
    }

    fn open<N: RawNode>(
        &mut self,
        raw: N,
        field: Option<Arc<str>>,
    ) -> Result<Frame<N>, MaterializeError> {
        let range = raw.span();
        if range.start > range.end || range.end > self.source.len() {
            return Err(MaterializeError::InvalidRange {
                grammar_type: raw.type_name().to_string(),
                range,
                len: self.source.len(),
            });
        }

        let pending: Vec<_> = raw
            .children_with_fields()
            .into_iter()
            .map(|(child, child_field)| (child, child_field.map(|f| self.intern(f))))
            .collect();
        Ok(Frame {
            children: Vec::with_capacity(pending.len()),
            pending: pending.into_iter(),
            raw,
            range,
            field,
            previous: None,
        })
    }

    fn finish<N: RawNode>(&mut self, frame: Frame<N>) -> Node {
        self.count += 1;
        let raw = &frame.raw;
        Node::from_data(NodeData {
            kind: self.registry.resolve(raw.type_name(), raw.named()),
            grammar_type: self.intern(raw.type_name()),
            named: raw.named(),
            byte_range: frame.range,
            start_point: raw.start_point(),
            end_point: raw.end_point(),
            source: Arc::clone(self.source),
            field_name: frame.field,
            children: frame.children.into(),
        })
    }
}
