//! Wiring validation.

use std::collections::VecDeque;

use super::NodeId;
use crate::error::{CircuitError, Result};
use crate::node::Node;

/// Reject logic wiring that loops back on itself.
///
/// `wiring[i]` holds the resolved inputs of `nodes[i]`. Only edges that
/// carry a signal count; a leaf circuit's bookkeeping input never does.
/// Runs Kahn's algorithm; if some nodes never reach in-degree zero, one
/// cycle among them is reported in signal-flow order.
pub fn check_acyclic(nodes: &[Node], wiring: &[Vec<NodeId>]) -> Result<()> {
    let n = nodes.len();
    let mut in_degree = vec![0usize; n];
    let mut consumers: Vec<Vec<usize>> = vec![Vec::new(); n];

    for (idx, node) in nodes.iter().enumerate() {
        if node.kind.is_boundary() {
            continue;
        }
        for input in &wiring[idx] {
            in_degree[idx] += 1;
            consumers[input.0].push(idx);
        }
    }

    let mut queue: VecDeque<usize> = (0..n).filter(|&idx| in_degree[idx] == 0).collect();
    let mut sorted = 0usize;
    while let Some(idx) = queue.pop_front() {
        sorted += 1;
        for &consumer in &consumers[idx] {
            in_degree[consumer] -= 1;
            if in_degree[consumer] == 0 {
                queue.push_back(consumer);
            }
        }
    }

    if sorted == n {
        return Ok(());
    }

    // Every unsorted node has an unsorted input, so walking inputs from any
    // of them must revisit a node.
    let Some(start) = (0..n).find(|&idx| in_degree[idx] > 0) else {
        return Ok(());
    };
    let mut trail = vec![start];
    let mut current = start;
    let cycle_start = loop {
        let next = wiring[current]
            .iter()
            .map(|input| input.0)
            .find(|&input| in_degree[input] > 0)
            .unwrap_or(start);
        if let Some(pos) = trail.iter().position(|&idx| idx == next) {
            break pos;
        }
        trail.push(next);
        current = next;
    };

    let mut path: Vec<&str> = trail[cycle_start..]
        .iter()
        .rev()
        .map(|&idx| nodes[idx].name.as_str())
        .collect();
    path.push(path[0]);
    Err(CircuitError::CycleDetected {
        path: path.join(" -> "),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{InputKind, LeafKind, NodeKind};

    fn node(name: &str, kind: NodeKind) -> Node {
        Node::new(name, kind, Vec::new())
    }

    fn ids(inputs: &[usize]) -> Vec<NodeId> {
        inputs.iter().map(|&i| NodeId(i)).collect()
    }

    #[test]
    fn test_dag_passes() {
        let nodes = vec![
            node("A", NodeKind::InputSource(InputKind::Control)),
            node("N", NodeKind::Not),
            node("G", NodeKind::And),
            node("D", NodeKind::Door),
        ];
        let wiring = vec![ids(&[]), ids(&[0]), ids(&[0, 1]), ids(&[2])];
        assert!(check_acyclic(&nodes, &wiring).is_ok());
    }

    #[test]
    fn test_self_loop() {
        let nodes = vec![node("W", NodeKind::Wire)];
        let wiring = vec![ids(&[0])];
        let err = check_acyclic(&nodes, &wiring).unwrap_err();
        assert!(matches!(err, CircuitError::CycleDetected { ref path } if path == "W -> W"));
    }

    #[test]
    fn test_cycle_reported_in_signal_order() {
        // D reads W1, W1 reads W2, W2 reads W1
        let nodes = vec![
            node("D", NodeKind::Door),
            node("W1", NodeKind::Wire),
            node("W2", NodeKind::Wire),
        ];
        let wiring = vec![ids(&[1]), ids(&[2]), ids(&[1])];
        let err = check_acyclic(&nodes, &wiring).unwrap_err();
        match err {
            CircuitError::CycleDetected { path } => {
                assert!(path == "W1 -> W2 -> W1" || path == "W2 -> W1 -> W2", "{path}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_leaf_input_does_not_close_a_cycle() {
        // T's bookkeeping input is W, which reads T
        let nodes = vec![
            node(
                "T",
                NodeKind::LeafCircuit {
                    kind: LeafKind::Toggle,
                    frame_state: None,
                },
            ),
            node("W", NodeKind::Wire),
        ];
        let wiring = vec![ids(&[1]), ids(&[0])];
        assert!(check_acyclic(&nodes, &wiring).is_ok());
    }
}
