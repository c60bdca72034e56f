//! Logic graph structure.

use std::collections::{BTreeMap, HashMap};

use tracing::{debug, info, trace};

use super::types::{NodeId, Target};
use super::validate::check_acyclic;
use crate::error::{CircuitError, Result};
use crate::map::Record;
use crate::netlist::{Extraction, Netlist};
use crate::node::{KindRegistry, Node, NodeKind};
use crate::solver::{Assignment, Term, TermCache};

/// A level's logic wiring.
///
/// Nodes are added unresolved, then wired and validated once by
/// [`Graph::build`]. Wiring refers to nodes by arena index, so the graph is
/// the only owner of its nodes.
#[derive(Debug)]
pub struct Graph {
    /// Tag to constructor table used by `add`
    registry: KindRegistry,

    /// Node arena in insertion order
    nodes: Vec<Node>,

    /// Mapping from node names to node IDs
    by_name: HashMap<String, NodeId>,

    /// Every circuit record seen, named or not (for diagnostics)
    records: BTreeMap<u32, Record>,

    /// Lazily composed boolean terms
    terms: TermCache,

    finalized: bool,
}

impl Graph {
    /// Create an empty graph using the built-in element tags.
    pub fn new() -> Self {
        Self::with_registry(KindRegistry::standard())
    }

    /// Create an empty graph with a custom tag table.
    pub fn with_registry(registry: KindRegistry) -> Self {
        Self {
            registry,
            nodes: Vec::new(),
            by_name: HashMap::new(),
            records: BTreeMap::new(),
            terms: TermCache::new(),
            finalized: false,
        }
    }

    /// Ingest one map record.
    ///
    /// Records with an unregistered tag are decoration and are skipped.
    /// Unnamed circuit records are remembered for diagnostics but never
    /// become nodes.
    pub fn add(&mut self, record: Record) -> Result<()> {
        if self.finalized {
            return Err(CircuitError::AlreadyFinalized);
        }

        let Some(constructor) = self.registry.resolve(&record.tag) else {
            trace!(id = record.id, tag = %record.tag, "skipping non-circuit object");
            return Ok(());
        };

        if self.records.contains_key(&record.id) {
            return Err(CircuitError::DuplicateId { id: record.id });
        }

        let Some(name) = record.name.clone() else {
            debug!("Ignoring unnamed object {} (type: {})", record.id, record.tag);
            self.records.insert(record.id, record);
            return Ok(());
        };

        if self.by_name.contains_key(&name) {
            return Err(CircuitError::DuplicateName { name });
        }

        let node = constructor(name.clone(), &record.properties);
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        self.by_name.insert(name, id);
        self.records.insert(record.id, record);
        Ok(())
    }

    /// Resolve every node's inputs and validate the wiring.
    ///
    /// Runs at most once. Either every node is wired and valid, or the
    /// graph is left exactly as it was.
    pub fn build(&mut self) -> Result<()> {
        if self.finalized {
            return Err(CircuitError::AlreadyFinalized);
        }

        let mut wiring = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            let resolved = node
                .input_names
                .iter()
                .map(|input| {
                    self.by_name
                        .get(input)
                        .copied()
                        .ok_or_else(|| CircuitError::missing_input(&node.name, input))
                })
                .collect::<Result<Vec<_>>>()?;
            node.check(&resolved, &self.nodes)?;
            wiring.push(resolved);
        }

        check_acyclic(&self.nodes, &wiring)?;

        for (node, inputs) in self.nodes.iter_mut().zip(wiring) {
            node.inputs = inputs;
        }
        self.finalized = true;

        info!(
            nodes = self.nodes.len(),
            doors = self.sinks().len(),
            "circuit graph built"
        );
        Ok(())
    }

    /// All doors, in insertion order.
    pub fn sinks(&self) -> Vec<&Node> {
        self.nodes.iter().filter(|node| node.kind.is_sink()).collect()
    }

    /// Replace the named node with a forced input.
    ///
    /// Consumers refer to the node's slot, so they all see the forced input,
    /// whether this runs before or after `build`. Cached terms are discarded.
    pub fn mark_as_input(&mut self, name: &str) -> Result<()> {
        let id = self
            .id_of(name)
            .ok_or_else(|| CircuitError::UnknownNode {
                name: name.to_string(),
            })?;
        self.nodes[id.0] = Node::forced(name);
        self.terms.clear();
        debug!(node = name, "marked as forced input");
        Ok(())
    }

    /// Boolean term of a node, composed on first use.
    pub fn term<'a>(&mut self, target: impl Into<Target<'a>>) -> Result<Term> {
        self.ensure_finalized()?;
        let id = self.resolve(target.into())?;
        self.terms.term(&self.nodes, id)
    }

    /// Find an input assignment that opens every target.
    ///
    /// A door target asserts its input's term; any other target asserts its
    /// own term. Every forced input is asserted as well, reachable or not.
    pub fn solve<'a, I, T>(&mut self, targets: I) -> Result<Assignment>
    where
        I: IntoIterator<Item = T>,
        T: Into<Target<'a>>,
    {
        self.ensure_finalized()?;
        let targets = targets
            .into_iter()
            .map(|target| self.resolve(target.into()))
            .collect::<Result<Vec<_>>>()?;

        let mut asserted = Vec::with_capacity(targets.len());
        for id in &targets {
            let node = &self.nodes[id.0];
            let subject = match (&node.kind, node.inputs.as_slice()) {
                (NodeKind::Door, [input]) => *input,
                _ => *id,
            };
            asserted.push(self.terms.term(&self.nodes, subject)?);
        }

        let forced: Vec<NodeId> = self
            .ids()
            .filter(|id| self.nodes[id.0].kind == NodeKind::ForcedInput)
            .collect();
        for id in &forced {
            asserted.push(self.terms.term(&self.nodes, *id)?);
        }

        let assignment = self.terms.check(&asserted)?;
        info!(
            targets = targets.len(),
            forced = forced.len(),
            variables = assignment.len(),
            "satisfying assignment found"
        );
        Ok(assignment)
    }

    /// Flatten the logic feeding the targets into one netlist.
    pub fn extract<'a, I, T>(&self, targets: I) -> Result<Netlist>
    where
        I: IntoIterator<Item = T>,
        T: Into<Target<'a>>,
    {
        self.ensure_finalized()?;
        let mut extraction = Extraction::new(&self.nodes);
        for target in targets {
            let id = self.resolve(target.into())?;
            extraction.visit(id)?;
        }
        let netlist = extraction.finish();
        info!(
            inputs = netlist.inputs.len(),
            outputs = netlist.outputs.len(),
            assignments = netlist.assignments.len(),
            "netlist extracted"
        );
        Ok(netlist)
    }

    /// Find a node by name.
    pub fn node(&self, name: &str) -> Option<&Node> {
        self.id_of(name).map(|id| &self.nodes[id.0])
    }

    /// Get a node by id.
    pub fn node_by_id(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Find a node ID by name.
    pub fn id_of(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Ingestion record with the given id.
    pub fn record(&self, id: u32) -> Option<&Record> {
        self.records.get(&id)
    }

    /// Number of circuit records ingested, named or not.
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Number of named circuit records.
    pub fn named_count(&self) -> usize {
        self.records.values().filter(|record| record.name.is_some()).count()
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    fn resolve(&self, target: Target<'_>) -> Result<NodeId> {
        match target {
            Target::Name(name) => self
                .id_of(name)
                .ok_or_else(|| CircuitError::unknown_target(name)),
            Target::Id(id) if id.0 < self.nodes.len() => Ok(id),
            Target::Id(id) => Err(CircuitError::unknown_target(id.to_string())),
        }
    }

    fn ensure_finalized(&self) -> Result<()> {
        if self.finalized {
            Ok(())
        } else {
            Err(CircuitError::NotFinalized)
        }
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}
