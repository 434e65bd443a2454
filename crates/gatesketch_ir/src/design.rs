//! Top-level design container.
//!
//! A [`Design`] holds the gate-type library, the instance tree, and the
//! flattened netlist. It is read-only input to every generation pass.

use crate::arena::Arena;
use crate::gate::GateType;
use crate::ids::{GateTypeId, NetId, NodeId};
use crate::net::{Net, Netlist};
use crate::node::Node;
use serde::{Deserialize, Serialize};

/// A circuit ready for rendering: library, instance tree, and netlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Design {
    /// Every gate type referenced by the design.
    pub gates: Arena<GateTypeId, GateType>,
    /// Every instance node, root included.
    pub nodes: Arena<NodeId, Node>,
    /// The instance of the circuit being rendered.
    pub root: NodeId,
    /// The flattened primitives and nets.
    pub netlist: Netlist,
}

impl Design {
    /// Returns the root instance.
    pub fn root_node(&self) -> &Node {
        &self.nodes[self.root]
    }

    /// Returns an instance by ID.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Returns a gate type by ID.
    pub fn gate(&self, id: GateTypeId) -> &GateType {
        &self.gates[id]
    }

    /// Returns the gate type instantiated by `node`.
    pub fn gate_of(&self, node: NodeId) -> &GateType {
        &self.gates[self.nodes[node].gate]
    }

    /// Returns a net by ID.
    pub fn net(&self, id: NetId) -> &Net {
        &self.netlist.nets[id]
    }

    /// The flattened primitive instances in flatten order.
    pub fn primitives(&self) -> &[NodeId] {
        &self.netlist.primitives
    }

    /// Number of nesting levels below the root; `0` when the root has no
    /// nested parts.
    pub fn max_depth(&self) -> usize {
        fn depth(design: &Design, id: NodeId) -> usize {
            design
                .node(id)
                .children
                .iter()
                .map(|&c| 1 + depth(design, c))
                .max()
                .unwrap_or(0)
        }
        depth(self, self.root)
    }
}
