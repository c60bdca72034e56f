//! Netlist extraction.
//!
//! Flattens the logic feeding a set of doors into a small Verilog module
//! that formal tools can consume:
//!
//! ```text
//! module dut(input A, input B, output D);
//!
//! assign D = G;
//! assign G = A & B;
//!
//! always @(*) assert (!D);
//! endmodule
//! ```
//!
//! Boundary nodes become module inputs, doors become outputs, and each
//! internal node becomes one `assign`. A counterexample to a door's
//! assertion is an input pattern that opens it.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use crate::circuit::NodeId;
use crate::error::{CircuitError, Result};
use crate::node::{Node, NodeKind};

/// A flattened subgraph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Netlist {
    /// Declared inputs in first-discovery order
    pub inputs: Vec<String>,
    /// Declared outputs in first-discovery order
    pub outputs: Vec<String>,
    pub assignments: Vec<String>,
    /// One per door
    pub assertions: Vec<String>,
}

impl Netlist {
    /// Write the rendered module to `path`.
    pub fn write(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_string()).map_err(|e| CircuitError::ExportWrite {
            path: path.display().to_string(),
            source: e,
        })
    }
}

impl fmt::Display for Netlist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ports: Vec<String> = self
            .inputs
            .iter()
            .map(|name| format!("input {}", name))
            .chain(self.outputs.iter().map(|name| format!("output {}", name)))
            .collect();
        writeln!(f, "module dut({});", ports.join(", "))?;
        writeln!(f)?;
        for assignment in &self.assignments {
            writeln!(f, "{}", assignment)?;
        }
        writeln!(f)?;
        for assertion in &self.assertions {
            writeln!(f, "{}", assertion)?;
        }
        writeln!(f, "endmodule")
    }
}

/// Traversal state for flattening.
///
/// Several roots may be visited into one context; nodes shared between
/// them are emitted once.
#[derive(Debug)]
pub struct Extraction<'g> {
    nodes: &'g [Node],
    visited: HashSet<NodeId>,
    inputs: Vec<NodeId>,
    outputs: Vec<NodeId>,
    assignments: Vec<String>,
    assertions: Vec<String>,
}

impl<'g> Extraction<'g> {
    /// Start an extraction over a built node arena.
    pub fn new(nodes: &'g [Node]) -> Self {
        Self {
            nodes,
            visited: HashSet::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            assignments: Vec::new(),
            assertions: Vec::new(),
        }
    }

    /// Visit `root` and everything feeding it, depth-first in input order.
    ///
    /// Fails if a node's wiring does not match its kind, which `build`
    /// rules out.
    pub fn visit(&mut self, root: NodeId) -> Result<()> {
        let nodes = self.nodes;
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if !self.visited.insert(id) {
                continue;
            }
            let node = &nodes[id.0];

            match node.kind {
                NodeKind::InputSource(_) | NodeKind::ForcedInput | NodeKind::LeafCircuit { .. } => {
                    self.inputs.push(id);
                    continue;
                }
                NodeKind::Door => {
                    let line = self.assign(node)?;
                    self.outputs.push(id);
                    self.assignments.push(line);
                    self.assertions.push(format!("always @(*) assert (!{});", node.name));
                }
                NodeKind::Wire | NodeKind::And | NodeKind::Not => {
                    let line = self.assign(node)?;
                    self.assignments.push(line);
                }
            }

            stack.extend(node.inputs.iter().rev().copied());
        }
        Ok(())
    }

    /// Finish the traversal.
    pub fn finish(self) -> Netlist {
        let nodes = self.nodes;
        let name = |id: &NodeId| nodes[id.0].name.clone();
        Netlist {
            inputs: self.inputs.iter().map(name).collect(),
            outputs: self.outputs.iter().map(name).collect(),
            assignments: self.assignments,
            assertions: self.assertions,
        }
    }

    fn assign(&self, node: &Node) -> Result<String> {
        let name = |id: &NodeId| self.nodes[id.0].name.as_str();
        let expr = match (&node.kind, node.inputs.as_slice()) {
            (NodeKind::And, [a, b]) => format!("{} & {}", name(a), name(b)),
            (NodeKind::Not, [input]) => format!("~{}", name(input)),
            (NodeKind::Wire | NodeKind::Door, [input]) => name(input).to_string(),
            _ => return Err(node.arity_violation(node.inputs.len())),
        };
        Ok(format!("assign {} = {};", node.name, expr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::Graph;
    use crate::map::Record;

    fn built(records: Vec<Record>) -> Graph {
        let mut graph = Graph::new();
        for record in records {
            graph.add(record).unwrap();
        }
        graph.build().unwrap();
        graph
    }

    #[test]
    fn test_render_and_gate() {
        let graph = built(vec![
            Record::new(1, "A", "Control"),
            Record::new(2, "B", "KeyReceptacle"),
            Record::new(3, "G", "And").with_input("A\nB"),
            Record::new(4, "D", "Door").with_input("G"),
        ]);
        let netlist = graph.extract(["D"]).unwrap();
        assert_eq!(
            netlist.to_string(),
            "module dut(input A, input B, output D);\n\
             \n\
             assign D = G;\n\
             assign G = A & B;\n\
             \n\
             always @(*) assert (!D);\n\
             endmodule\n"
        );
    }

    #[test]
    fn test_diamond_lists_shared_input_once() {
        let graph = built(vec![
            Record::new(1, "A", "Control"),
            Record::new(2, "L", "Wire").with_input("A"),
            Record::new(3, "R", "Inverter").with_input("A"),
            Record::new(4, "G", "And").with_input("L\nR"),
            Record::new(5, "D", "Door").with_input("G"),
        ]);
        let netlist = graph.extract(["D"]).unwrap();
        assert_eq!(netlist.inputs, vec!["A"]);
        assert_eq!(
            netlist.assignments,
            vec![
                "assign D = G;",
                "assign G = L & R;",
                "assign L = A;",
                "assign R = ~A;",
            ]
        );
    }

    #[test]
    fn test_one_assertion_per_door_in_discovery_order() {
        let graph = built(vec![
            Record::new(1, "A", "Control"),
            Record::new(2, "D1", "Door").with_input("A"),
            Record::new(3, "W", "Wire").with_input("D1"),
            Record::new(4, "D2", "Door").with_input("W"),
        ]);
        let netlist = graph.extract(["D2", "D1", "D2"]).unwrap();
        assert_eq!(netlist.outputs, vec!["D2", "D1"]);
        assert_eq!(
            netlist.assertions,
            vec!["always @(*) assert (!D2);", "always @(*) assert (!D1);"]
        );
    }

    #[test]
    fn test_boundary_nodes_stop_traversal() {
        let graph = built(vec![
            Record::new(1, "A", "Control"),
            Record::new(2, "T", "Toggle").with_input("A"),
            Record::new(3, "D", "Door").with_input("T"),
        ]);
        let netlist = graph.extract(["D"]).unwrap();
        assert_eq!(netlist.inputs, vec!["T"]);
        assert_eq!(netlist.assignments, vec!["assign D = T;"]);
    }

    #[test]
    fn test_forced_input_is_declared_input() {
        let mut graph = built(vec![
            Record::new(1, "A", "Control"),
            Record::new(2, "N", "Inverter").with_input("A"),
            Record::new(3, "D", "Door").with_input("N"),
        ]);
        graph.mark_as_input("N").unwrap();
        let netlist = graph.extract(["D"]).unwrap();
        assert_eq!(netlist.inputs, vec!["N"]);
        assert_eq!(netlist.assignments, vec!["assign D = N;"]);
    }

    #[test]
    fn test_unwired_gate_is_reported() {
        let nodes = vec![Node::new("G", NodeKind::And, vec!["A".into()])];
        let mut extraction = Extraction::new(&nodes);
        let err = extraction.visit(NodeId(0)).unwrap_err();
        assert!(matches!(
            err,
            CircuitError::ArityViolation { ref node, expected: 2, actual: 0, .. } if node == "G"
        ));
    }

    #[test]
    fn test_empty_netlist() {
        let graph = built(vec![]);
        let netlist = graph.extract(Vec::<&str>::new()).unwrap();
        assert_eq!(netlist.to_string(), "module dut();\n\n\nendmodule\n");
    }

    #[test]
    fn test_write_file() {
        let graph = built(vec![
            Record::new(1, "A", "Control"),
            Record::new(2, "D", "Door").with_input("A"),
        ]);
        let netlist = graph.extract(["D"]).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dut.v");
        netlist.write(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), netlist.to_string());
    }
}
