//! Core types for graph representation.

use std::fmt;

/// Index of a node in the graph's node arena.
///
/// Wiring is stored as `NodeId`s rather than handles to the nodes themselves,
/// so replacing a node in its slot is visible to every consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A solve or extract target, addressed by name or by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
    /// Node name as it appears in the map
    Name(&'a str),
    /// Arena index
    Id(NodeId),
}

impl<'a> From<&'a str> for Target<'a> {
    fn from(name: &'a str) -> Self {
        Target::Name(name)
    }
}

impl<'a> From<&'a String> for Target<'a> {
    fn from(name: &'a String) -> Self {
        Target::Name(name.as_str())
    }
}

impl From<NodeId> for Target<'_> {
    fn from(id: NodeId) -> Self {
        Target::Id(id)
    }
}
