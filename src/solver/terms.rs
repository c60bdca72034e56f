//! Lazy, memoized composition of node terms.

use std::collections::HashMap;

use super::formula::{Assignment, Formula, Term};
use crate::circuit::NodeId;
use crate::error::Result;
use crate::node::{Node, NodeKind};

/// Per-graph cache of node terms over one [`Formula`].
#[derive(Debug, Clone, Default)]
pub struct TermCache {
    formula: Formula,
    terms: HashMap<NodeId, Term>,
}

impl TermCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Term of `root`, composing and caching any missing input terms first.
    ///
    /// Uses an explicit worklist, so the depth of the wiring does not
    /// bound the call stack. The wiring must be acyclic.
    pub fn term(&mut self, nodes: &[Node], root: NodeId) -> Result<Term> {
        let mut stack = vec![root];

        while let Some(&id) = stack.last() {
            if self.terms.contains_key(&id) {
                stack.pop();
                continue;
            }

            let node = &nodes[id.0];
            let pending: Vec<NodeId> = node
                .logic_inputs()
                .iter()
                .copied()
                .filter(|input| !self.terms.contains_key(input))
                .collect();
            if !pending.is_empty() {
                stack.extend(pending.into_iter().rev());
                continue;
            }

            let term = self.compose(node)?;
            self.terms.insert(id, term);
            stack.pop();
        }

        Ok(self.terms[&root])
    }

    /// Cached term of `id`, if it has been composed.
    pub fn cached(&self, id: NodeId) -> Option<Term> {
        self.terms.get(&id).copied()
    }

    /// Check the assertions against the cached definitions.
    pub fn check(&self, asserted: &[Term]) -> Result<Assignment> {
        self.formula.check(asserted)
    }

    /// Number of named variables created so far.
    pub fn variable_count(&self) -> usize {
        self.formula.variable_count()
    }

    /// Forget every term; used when the wiring changes.
    pub fn clear(&mut self) {
        self.formula = Formula::new();
        self.terms.clear();
    }

    fn compose(&mut self, node: &Node) -> Result<Term> {
        let inputs = node.logic_inputs();
        let term = match (&node.kind, inputs) {
            (
                NodeKind::InputSource(_) | NodeKind::ForcedInput | NodeKind::LeafCircuit { .. },
                _,
            ) => self.formula.variable(&node.name),
            (NodeKind::Wire | NodeKind::Door, [input]) => self.terms[input],
            (NodeKind::Not, [input]) => self.formula.not(self.terms[input]),
            (NodeKind::And, [a, b]) => {
                let (a, b) = (self.terms[a], self.terms[b]);
                self.formula.and(a, b)
            }
            _ => return Err(node.arity_violation(inputs.len())),
        };
        Ok(term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::InputKind;

    fn wired(name: &str, kind: NodeKind, inputs: &[usize]) -> Node {
        let mut node = Node::new(name, kind, Vec::new());
        node.inputs = inputs.iter().map(|&i| NodeId(i)).collect();
        node
    }

    #[test]
    fn test_terms_are_memoized() {
        let nodes = vec![
            wired("A", NodeKind::InputSource(InputKind::Control), &[]),
            wired("N", NodeKind::Not, &[0]),
        ];
        let mut cache = TermCache::new();

        let first = cache.term(&nodes, NodeId(1)).unwrap();
        let second = cache.term(&nodes, NodeId(1)).unwrap();
        assert_eq!(first, second);
        assert_eq!(cache.variable_count(), 1);
        assert!(cache.cached(NodeId(0)).is_some());
    }

    #[test]
    fn test_shared_input_composed_once() {
        let nodes = vec![
            wired("A", NodeKind::InputSource(InputKind::Control), &[]),
            wired("W1", NodeKind::Wire, &[0]),
            wired("W2", NodeKind::Wire, &[0]),
            wired("G", NodeKind::And, &[1, 2]),
        ];
        let mut cache = TermCache::new();

        let gate = cache.term(&nodes, NodeId(3)).unwrap();
        assert_eq!(cache.variable_count(), 1);
        assert_eq!(cache.cached(NodeId(1)), cache.cached(NodeId(0)));

        let assignment = cache.check(&[gate]).unwrap();
        assert_eq!(assignment.get("A"), Some(true));
    }

    #[test]
    fn test_deep_chain_does_not_recurse() {
        let mut nodes = vec![wired("A", NodeKind::InputSource(InputKind::Control), &[])];
        for i in 1..50_000 {
            nodes.push(wired(&format!("W{i}"), NodeKind::Wire, &[i - 1]));
        }
        let mut cache = TermCache::new();

        let end = cache.term(&nodes, NodeId(nodes.len() - 1)).unwrap();
        assert_eq!(Some(end), cache.cached(NodeId(0)));
    }

    #[test]
    fn test_clear_forgets_terms() {
        let nodes = vec![wired("A", NodeKind::InputSource(InputKind::Control), &[])];
        let mut cache = TermCache::new();
        cache.term(&nodes, NodeId(0)).unwrap();

        cache.clear();
        assert!(cache.cached(NodeId(0)).is_none());
        assert_eq!(cache.variable_count(), 0);
    }

    #[test]
    fn test_unwired_gate_is_arity_error() {
        let nodes = vec![wired("G", NodeKind::And, &[])];
        let mut cache = TermCache::new();
        assert!(cache.term(&nodes, NodeId(0)).is_err());
    }
}
