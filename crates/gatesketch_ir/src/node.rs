//! Instance nodes: concrete uses of gate types bound to nets.

use crate::ids::{GateTypeId, NetId, NodeId};
use gatesketch_common::{BitRange, SketchError, SketchResult, Wire};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How one pin of an instance is bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinConnection {
    /// The wire the pin is bound to in the parent's scope, after pass-through
    /// bindings are resolved. For the root instance this is the pin itself.
    pub wire: Wire,
    /// The flattened net carrying the pin's bits.
    pub net: NetId,
    /// The bits of `net` the pin occupies.
    pub range: BitRange,
}

impl PinConnection {
    /// Creates a pin connection.
    pub fn new(wire: Wire, net: NetId, range: BitRange) -> Self {
        Self { wire, net, range }
    }
}

/// One instance in the design tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// The instance name.
    pub name: String,
    /// Position among the parent's nested parts; `0` for the root.
    pub index: u32,
    /// The instantiated gate type.
    pub gate: GateTypeId,
    /// The enclosing instance, `None` for the root.
    pub parent: Option<NodeId>,
    /// Wiring of every declared pin, keyed by pin name.
    pub connections: BTreeMap<String, PinConnection>,
    /// Nested instances in part order; empty for primitives.
    #[serde(default)]
    pub children: Vec<NodeId>,
}

impl Node {
    /// Returns the wiring of `pin`.
    pub fn connection(&self, pin: &str) -> SketchResult<&PinConnection> {
        self.connections
            .get(pin)
            .ok_or_else(|| SketchError::UnconnectedPin {
                instance: self.name.clone(),
                pin: pin.to_string(),
            })
    }

    /// Returns the wire bound to `pin` in the parent's scope.
    pub fn actual_wire(&self, pin: &str) -> SketchResult<&Wire> {
        self.connection(pin).map(|c| &c.wire)
    }

    /// Returns `true` if this instance has nested parts to expand.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn not_node() -> Node {
        let mut connections = BTreeMap::new();
        connections.insert(
            "In".to_string(),
            PinConnection::new(Wire::new("c", 1), NetId::from_raw(2), BitRange::bit(0)),
        );
        Node {
            name: "Not".to_string(),
            index: 1,
            gate: GateTypeId::from_raw(1),
            parent: Some(NodeId::from_raw(0)),
            connections,
            children: vec![NodeId::from_raw(3)],
        }
    }

    #[test]
    fn actual_wire_resolves_parent_scope() {
        let node = not_node();
        assert_eq!(node.actual_wire("In").unwrap().name, "c");
        assert_eq!(node.connection("In").unwrap().net, NetId::from_raw(2));
        assert!(node.has_children());
    }

    #[test]
    fn missing_pin_is_an_error() {
        let node = not_node();
        let err = node.connection("out").unwrap_err();
        assert_eq!(
            err,
            SketchError::UnconnectedPin {
                instance: "Not".to_string(),
                pin: "out".to_string(),
            }
        );
    }
}
