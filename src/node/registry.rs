//! Type tag to node constructor table.

use std::collections::HashMap;
use std::fmt;

use super::{InputKind, LeafKind, Node, NodeKind};
use crate::map::Properties;

/// Builds an unresolved node from a named record's properties.
pub type Constructor = fn(name: String, properties: &Properties) -> Node;

/// Maps map-object type tags to node constructors.
///
/// Tags without an entry are decoration and are skipped during ingestion.
#[derive(Clone)]
pub struct KindRegistry {
    table: HashMap<String, Constructor>,
}

impl fmt::Debug for KindRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<_> = self.table.keys().collect();
        tags.sort();
        f.debug_struct("KindRegistry").field("tags", &tags).finish()
    }
}

impl KindRegistry {
    /// Create a registry with no tags.
    pub fn empty() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    /// Create the registry of all built-in element tags.
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.register("KeyReceptacle", key_receptacle);
        registry.register("Control", control);
        registry.register("Toggle", toggle);
        registry.register("Extender", extender);
        registry.register("Wire", wire);
        registry.register("And", and_gate);
        registry.register("Inverter", not_gate);
        registry.register("Door", door);
        registry
    }

    /// Register `constructor` for `tag`, returning any constructor it replaces.
    pub fn register(&mut self, tag: impl Into<String>, constructor: Constructor) -> Option<Constructor> {
        self.table.insert(tag.into(), constructor)
    }

    /// Look up the constructor for `tag`.
    pub fn resolve(&self, tag: &str) -> Option<Constructor> {
        self.table.get(tag).copied()
    }

    /// Check whether `tag` names a circuit element.
    pub fn is_known(&self, tag: &str) -> bool {
        self.table.contains_key(tag)
    }
}

impl Default for KindRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

// Input sources ignore any `input` property the map carries.
fn key_receptacle(name: String, _properties: &Properties) -> Node {
    Node::new(name, NodeKind::InputSource(InputKind::KeyReceptacle), Vec::new())
}

fn control(name: String, _properties: &Properties) -> Node {
    Node::new(name, NodeKind::InputSource(InputKind::Control), Vec::new())
}

fn leaf(name: String, kind: LeafKind, properties: &Properties) -> Node {
    let kind = NodeKind::LeafCircuit {
        kind,
        frame_state: properties.frame_state.clone(),
    };
    Node::new(name, kind, properties.inputs())
}

fn toggle(name: String, properties: &Properties) -> Node {
    leaf(name, LeafKind::Toggle, properties)
}

fn extender(name: String, properties: &Properties) -> Node {
    leaf(name, LeafKind::Extender, properties)
}

fn wire(name: String, properties: &Properties) -> Node {
    Node::new(name, NodeKind::Wire, properties.inputs())
}

fn and_gate(name: String, properties: &Properties) -> Node {
    Node::new(name, NodeKind::And, properties.inputs())
}

fn not_gate(name: String, properties: &Properties) -> Node {
    Node::new(name, NodeKind::Not, properties.inputs())
}

fn door(name: String, properties: &Properties) -> Node {
    Node::new(name, NodeKind::Door, properties.inputs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_tags() {
        let registry = KindRegistry::standard();
        for tag in ["KeyReceptacle", "Control", "Toggle", "Extender", "Wire", "And", "Inverter", "Door"] {
            assert!(registry.is_known(tag), "missing {tag}");
        }
        assert!(registry.resolve("ForcedInput").is_none());
        assert!(registry.resolve("Decoration").is_none());
    }

    #[test]
    fn test_constructors() {
        let registry = KindRegistry::standard();
        let properties = Properties {
            input: Some("A\nB".to_string()),
            frame_state: Some(serde_json::json!({"frame": 3})),
        };

        let gate = registry.resolve("And").unwrap()("G".to_string(), &properties);
        assert_eq!(gate.kind, NodeKind::And);
        assert_eq!(gate.input_names, vec!["A", "B"]);

        let control = registry.resolve("Control").unwrap()("C".to_string(), &properties);
        assert!(control.input_names.is_empty());

        let toggle = registry.resolve("Toggle").unwrap()("T".to_string(), &properties);
        assert_eq!(
            toggle.kind,
            NodeKind::LeafCircuit {
                kind: LeafKind::Toggle,
                frame_state: Some(serde_json::json!({"frame": 3})),
            }
        );
    }

    #[test]
    fn test_register_custom_tag() {
        let mut registry = KindRegistry::empty();
        assert!(registry.register("Relay", wire).is_none());
        let node = registry.resolve("Relay").unwrap()("R".to_string(), &Properties::default());
        assert_eq!(node.kind, NodeKind::Wire);
        assert!(registry.register("Relay", door).is_some());
    }
}
