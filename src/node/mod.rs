//! Logic elements of a level's puzzle wiring.
//!
//! The element set is closed and small:
//! - Boundary: input sources, forced inputs, leaf circuits
//! - Internal: wires, AND gates, NOT gates
//! - Sink: doors
//!
//! Boundary nodes contribute a free boolean variable. Internal nodes combine
//! their inputs' terms. Doors are the targets a player wants to open.

mod registry;

pub use registry::{Constructor, KindRegistry};

use std::fmt;

use crate::circuit::NodeId;
use crate::error::{CircuitError, Result};
use crate::map::FrameState;

/// Which map object produced an input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    KeyReceptacle,
    Control,
}

/// Which map object produced a leaf circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafKind {
    Toggle,
    Extender,
}

/// The kind of a logic element.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Raw player-controlled input
    InputSource(InputKind),
    /// Input fixed to true; only created by `Graph::mark_as_input`
    ForcedInput,
    /// Stateful circuit element with its own independent variable.
    ///
    /// Its single input is bookkeeping only and never feeds the logic.
    LeafCircuit {
        kind: LeafKind,
        frame_state: Option<FrameState>,
    },
    /// Passthrough
    Wire,
    /// Conjunction of two inputs
    And,
    /// Negation of one input
    Not,
    /// Sink; opened when its input is true
    Door,
}

impl NodeKind {
    /// Exact number of inputs this kind must be wired with.
    pub fn required_inputs(&self) -> usize {
        match self {
            NodeKind::InputSource(_) | NodeKind::ForcedInput => 0,
            NodeKind::LeafCircuit { .. } => 1,
            NodeKind::Wire | NodeKind::Not | NodeKind::Door => 1,
            NodeKind::And => 2,
        }
    }

    /// Boundary kinds own a variable and are declared inputs of a netlist.
    pub fn is_boundary(&self) -> bool {
        match self {
            NodeKind::InputSource(_) | NodeKind::ForcedInput | NodeKind::LeafCircuit { .. } => true,
            NodeKind::Wire | NodeKind::And | NodeKind::Not | NodeKind::Door => false,
        }
    }

    /// Sink kinds are solve targets and declared outputs of a netlist.
    pub fn is_sink(&self) -> bool {
        matches!(self, NodeKind::Door)
    }

    /// Name used in diagnostics, matching the map's type tag where one exists.
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::InputSource(InputKind::KeyReceptacle) => "KeyReceptacle",
            NodeKind::InputSource(InputKind::Control) => "Control",
            NodeKind::ForcedInput => "ForcedInput",
            NodeKind::LeafCircuit {
                kind: LeafKind::Toggle,
                ..
            } => "Toggle",
            NodeKind::LeafCircuit {
                kind: LeafKind::Extender,
                ..
            } => "Extender",
            NodeKind::Wire => "Wire",
            NodeKind::And => "And",
            NodeKind::Not => "Inverter",
            NodeKind::Door => "Door",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A logic element.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Unique name within the graph
    pub name: String,
    pub kind: NodeKind,
    /// Upstream names as given by the map
    pub input_names: Vec<String>,
    /// Upstream nodes, filled in by `Graph::build`
    pub inputs: Vec<NodeId>,
}

impl Node {
    /// Create an unresolved node.
    pub fn new(name: impl Into<String>, kind: NodeKind, input_names: Vec<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            input_names,
            inputs: Vec::new(),
        }
    }

    /// Create a forced input with no inputs.
    pub fn forced(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::ForcedInput, Vec::new())
    }

    /// Inputs whose terms feed this node's term.
    ///
    /// Empty for boundary kinds, including leaf circuits whose single input
    /// carries no signal.
    pub fn logic_inputs(&self) -> &[NodeId] {
        if self.kind.is_boundary() {
            &[]
        } else {
            &self.inputs
        }
    }

    /// Validate resolved wiring against this node's kind.
    ///
    /// `resolved` are this node's inputs; `nodes` is the whole arena, used to
    /// inspect a leaf circuit's input.
    pub fn check(&self, resolved: &[NodeId], nodes: &[Node]) -> Result<()> {
        let expected = self.kind.required_inputs();
        if resolved.len() != expected {
            return Err(self.arity_violation(resolved.len()));
        }

        if let NodeKind::LeafCircuit { .. } = self.kind {
            let input = &nodes[resolved[0].0];
            if !input.input_names.is_empty() {
                return Err(CircuitError::NestedInputViolation {
                    node: self.name.clone(),
                    kind: self.kind.label(),
                    input: input.name.clone(),
                    actual: input.input_names.len(),
                });
            }
        }

        Ok(())
    }

    /// Arity error for this node with `actual` inputs.
    pub fn arity_violation(&self, actual: usize) -> CircuitError {
        CircuitError::ArityViolation {
            node: self.name.clone(),
            kind: self.kind.label(),
            expected: self.kind.required_inputs(),
            actual,
        }
    }
}
