//! Supertype graph over node-type descriptors.
//!
//! Edges run subtype -> supertype. Descriptors are addressed by their
//! declaration index; `(type, named)` pairs map to indices via `index_of`.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

use grove_core::RawNode;

#[derive(Debug)]
pub struct InheritanceAnalyzer<'a> {
    nodes: &'a [RawNode],
    index: HashMap<(&'a str, bool), usize>,
    /// Direct supertypes in edge discovery order.
    supertypes: Vec<Vec<usize>>,
    /// Direct subtypes in declaration order of the supertype's list.
    subtypes: Vec<Vec<usize>>,
}

impl<'a> InheritanceAnalyzer<'a> {
    pub fn new(nodes: &'a [RawNode]) -> Self {
        let index: HashMap<(&str, bool), usize> = nodes
            .iter()
            .enumerate()
            .map(|(i, n)| ((n.type_name.as_str(), n.named), i))
            .collect();

        let mut supertypes = vec![Vec::new(); nodes.len()];
        let mut subtypes = vec![Vec::new(); nodes.len()];

        for (sup, node) in nodes.iter().enumerate() {
            let Some(refs) = &node.subtypes else {
                continue;
            };
            for sub_ref in refs {
                let Some(&sub) = index.get(&(sub_ref.type_name.as_str(), sub_ref.named)) else {
                    tracing::debug!(
                        supertype = %node.type_name,
                        subtype = %sub_ref.type_name,
                        "dropping subtype reference without a descriptor"
                    );
                    continue;
                };
                if sub == sup {
                    tracing::debug!(
                        grammar_type = %node.type_name,
                        "ignoring self-referencing subtype"
                    );
                    continue;
                }
                if subtypes[sup].contains(&sub) {
                    continue;
                }
                subtypes[sup].push(sub);
                supertypes[sub].push(sup);
            }
        }

        Self {
            nodes,
            index,
            supertypes,
            subtypes,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, idx: usize) -> &'a RawNode {
        &self.nodes[idx]
    }

    pub fn index_of(&self, type_name: &str, named: bool) -> Option<usize> {
        self.index.get(&(type_name, named)).copied()
    }

    /// Leaves-first topological order: every subtype precedes its
    /// supertypes, ties broken by declaration order.
    ///
    /// A cyclic graph has no such order; declaration order is returned
    /// instead and a warning is logged.
    pub fn inheritance_order(&self) -> Vec<usize> {
        match self.topological_order() {
            Some(order) => order,
            None => {
                tracing::warn!(
                    types = self.nodes.len(),
                    "supertype graph has a cycle; using declaration order"
                );
                (0..self.nodes.len()).collect()
            }
        }
    }

    pub fn is_acyclic(&self) -> bool {
        self.topological_order().is_some()
    }

    fn topological_order(&self) -> Option<Vec<usize>> {
        let mut pending: Vec<usize> = self.subtypes.iter().map(Vec::len).collect();
        let mut ready: BinaryHeap<Reverse<usize>> = pending
            .iter()
            .enumerate()
            .filter(|(_, count)| **count == 0)
            .map(|(i, _)| Reverse(i))
            .collect();

        let mut order = Vec::with_capacity(self.nodes.len());
        while let Some(Reverse(idx)) = ready.pop() {
            order.push(idx);
            for &sup in &self.supertypes[idx] {
                pending[sup] -= 1;
                if pending[sup] == 0 {
                    ready.push(Reverse(sup));
                }
            }
        }

        (order.len() == self.nodes.len()).then_some(order)
    }

    /// First supertype edge discovered for `idx`.
    ///
    /// Types listed under several supertypes keep only the first one as
    /// their parent; `subtypes_of` still sees every edge.
    pub fn parent(&self, idx: usize) -> Option<usize> {
        self.supertypes[idx].first().copied()
    }

    pub fn supertypes_of(&self, idx: usize) -> &[usize] {
        &self.supertypes[idx]
    }

    pub fn direct_subtypes(&self, idx: usize) -> &[usize] {
        &self.subtypes[idx]
    }

    /// All transitive subtypes of `idx` in depth-first preorder, without
    /// `idx` itself. Terminates on cyclic graphs.
    pub fn subtypes_of(&self, idx: usize) -> Vec<usize> {
        let mut seen = HashSet::from([idx]);
        let mut out = Vec::new();
        let mut stack: Vec<usize> = self.subtypes[idx].iter().rev().copied().collect();
        while let Some(sub) = stack.pop() {
            if !seen.insert(sub) {
                continue;
            }
            out.push(sub);
            stack.extend(self.subtypes[sub].iter().rev().copied());
        }
        out
    }
}
