//! Incremental construction of a [`Design`].
//!
//! The flattening stage (or a test fixture) declares gate types, allocates
//! nets, and then instantiates the tree depth-first so that allocation order
//! is flatten order.

use crate::arena::Arena;
use crate::design::Design;
use crate::gate::{Behavior, GateKind, GateType, Pin};
use crate::ids::{GateTypeId, NetId, NodeId};
use crate::net::{Net, NetSource, Netlist};
use crate::node::{Node, PinConnection};
use gatesketch_common::{BitRange, Wire};
use gatesketch_config::GateLayout;
use std::collections::BTreeMap;

/// Builder for a [`Design`].
#[derive(Debug, Default)]
pub struct DesignBuilder {
    gates: Arena<GateTypeId, GateType>,
    nodes: Arena<NodeId, Node>,
    nets: Arena<NetId, Net>,
}

impl DesignBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a primitive gate type with per-output evaluation text.
    pub fn primitive<'a>(
        &mut self,
        name: impl Into<String>,
        inputs: Vec<Pin>,
        outputs: Vec<Pin>,
        process: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> GateTypeId {
        let process = process
            .into_iter()
            .map(|(pin, text)| (pin.to_string(), Behavior::new(text)))
            .collect();
        self.gates.alloc(GateType {
            name: name.into(),
            inputs,
            outputs,
            kind: GateKind::Primitive { process },
            layout: None,
        })
    }

    /// Declares a compound gate type built from `parts`.
    pub fn compound(
        &mut self,
        name: impl Into<String>,
        inputs: Vec<Pin>,
        outputs: Vec<Pin>,
        parts: Vec<GateTypeId>,
    ) -> GateTypeId {
        self.gates.alloc(GateType {
            name: name.into(),
            inputs,
            outputs,
            kind: GateKind::Compound { parts },
            layout: None,
        })
    }

    /// Attaches visual overrides to a gate type.
    pub fn set_layout(&mut self, gate: GateTypeId, layout: GateLayout) {
        self.gates[gate].layout = Some(layout);
    }

    /// Allocates a net whose default value is zero.
    pub fn net(&mut self, name: impl Into<String>, width: u32) -> NetId {
        self.net_with_signal(name, width, 0)
    }

    /// Allocates a net with an explicit default value.
    pub fn net_with_signal(&mut self, name: impl Into<String>, width: u32, signal: u64) -> NetId {
        self.nets.alloc(Net {
            name: name.into(),
            width,
            signal,
            sources: Vec::new(),
        })
    }

    /// Records that `pin` of `node` drives `range` of `net`.
    pub fn drive(&mut self, net: NetId, node: NodeId, pin: impl Into<String>, range: BitRange) {
        self.nets[net].sources.push(NetSource {
            node,
            pin: pin.into(),
            range,
        });
    }

    /// Instantiates the circuit being rendered.
    ///
    /// Each binding is `(pin, net, range)`; the pin's own wire stands in for
    /// the actual wire since the root has no enclosing scope.
    pub fn root<'a>(
        &mut self,
        gate: GateTypeId,
        bindings: impl IntoIterator<Item = (&'a str, NetId, BitRange)>,
    ) -> NodeId {
        let connections = bindings
            .into_iter()
            .map(|(pin, net, range)| {
                let wire = self.gates[gate]
                    .pin(pin)
                    .map(Pin::wire)
                    .unwrap_or_else(|| Wire::new(pin, range.len()));
                (pin.to_string(), PinConnection::new(wire, net, range))
            })
            .collect();
        self.alloc_node(None, gate, connections)
    }

    /// Instantiates `gate` as the next nested part of `parent`.
    ///
    /// Each binding is `(pin, actual wire in the parent's scope, net, range)`.
    pub fn instance<'a>(
        &mut self,
        parent: NodeId,
        gate: GateTypeId,
        bindings: impl IntoIterator<Item = (&'a str, Wire, NetId, BitRange)>,
    ) -> NodeId {
        let connections = bindings
            .into_iter()
            .map(|(pin, wire, net, range)| (pin.to_string(), PinConnection::new(wire, net, range)))
            .collect();
        let id = self.alloc_node(Some(parent), gate, connections);
        self.nodes[parent].children.push(id);
        id
    }

    fn alloc_node(
        &mut self,
        parent: Option<NodeId>,
        gate: GateTypeId,
        connections: BTreeMap<String, PinConnection>,
    ) -> NodeId {
        let index = parent.map_or(0, |p| self.nodes[p].children.len() as u32);
        self.nodes.alloc(Node {
            name: self.gates[gate].name.clone(),
            index,
            gate,
            parent,
            connections,
            children: Vec::new(),
        })
    }

    /// Finishes the design rooted at `root`.
    ///
    /// Every non-root primitive instance becomes a flattened primitive, in
    /// allocation order.
    pub fn finish(self, root: NodeId) -> Design {
        let primitives = self
            .nodes
            .iter()
            .filter(|(id, node)| *id != root && self.gates[node.gate].is_primitive())
            .map(|(id, _)| id)
            .collect();
        Design {
            gates: self.gates,
            nodes: self.nodes,
            root,
            netlist: Netlist {
                primitives,
                nets: self.nets,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instance_indices_follow_part_order() {
        let mut b = DesignBuilder::new();
        let buf = b.primitive(
            "Buffer",
            vec![Pin::new("In", 1)],
            vec![Pin::new("out", 1)],
            [("out", "f")],
        );
        let pair = b.compound(
            "Pair",
            vec![Pin::new("In", 1)],
            vec![Pin::new("out", 1)],
            vec![buf, buf],
        );
        let i = b.net("In", 1);
        let m = b.net("m", 1);
        let o = b.net("out", 1);
        let root = b.root(pair, [("In", i, BitRange::bit(0)), ("out", o, BitRange::bit(0))]);
        let first = b.instance(
            root,
            buf,
            [
                ("In", Wire::new("In", 1), i, BitRange::bit(0)),
                ("out", Wire::new("m", 1), m, BitRange::bit(0)),
            ],
        );
        let second = b.instance(
            root,
            buf,
            [
                ("In", Wire::new("m", 1), m, BitRange::bit(0)),
                ("out", Wire::new("out", 1), o, BitRange::bit(0)),
            ],
        );
        let design = b.finish(root);
        assert_eq!(design.node(first).index, 0);
        assert_eq!(design.node(second).index, 1);
        assert_eq!(design.root_node().children, vec![first, second]);
        assert_eq!(design.primitives(), &[first, second]);
    }

    #[test]
    fn root_bindings_use_pin_wires() {
        let mut b = DesignBuilder::new();
        let g = b.compound("Bus", vec![Pin::new("a", 4)], vec![], vec![]);
        let a = b.net("a", 4);
        let root = b.root(g, [("a", a, BitRange::full(4))]);
        let design = b.finish(root);
        let wire = design.root_node().actual_wire("a").unwrap();
        assert_eq!(wire, &Wire::new("a", 4));
    }

    #[test]
    fn layout_is_attached() {
        let mut b = DesignBuilder::new();
        let g = b.primitive("Nand", vec![], vec![], []);
        b.set_layout(
            g,
            GateLayout {
                width: Some(40),
                ..Default::default()
            },
        );
        let root = b.root(g, []);
        let design = b.finish(root);
        assert_eq!(design.gate(g).layout.as_ref().and_then(|l| l.width), Some(40));
    }
}
