//! Hierarchical box building.
//!
//! [`GraphBuilder::build_box`] renders one instance as a box. At depth zero,
//! or for a primitive, the box is collapsed: sized, labelled and opaque.
//! Otherwise every nested part is built one level shallower and interior
//! edges are derived from how the bound wires' bit ranges overlap.

use crate::factory;
use crate::model::{ConnectorKind, Direction, GraphEdge, GraphNode, NodeProperties, WireMeta};
use gatesketch_common::{BitRange, SketchError, SketchResult};
use gatesketch_config::{resolve_layout, ResolvedLayout, SketchConfig};
use gatesketch_ir::{Design, GateType, NetId, Node, NodeId, Pin};
use indexmap::IndexMap;
use std::collections::BTreeMap;
use tracing::debug;

/// Port ids of a built box, keyed by pin name.
pub type PortMap = BTreeMap<String, String>;

/// A built box together with the ids of its ports.
#[derive(Debug, Clone)]
pub struct BuiltBox {
    /// The box.
    pub node: GraphNode,
    /// Port ids keyed by pin name.
    pub ports: PortMap,
}

impl BuiltBox {
    /// Returns the id of the port for `pin`.
    pub fn port(&self, pin: &str) -> SketchResult<&str> {
        port_of(&self.ports, &self.node.id, pin)
    }
}

fn port_of<'a>(ports: &'a PortMap, instance: &str, pin: &str) -> SketchResult<&'a str> {
    ports
        .get(pin)
        .map(String::as_str)
        .ok_or_else(|| SketchError::UnconnectedPin {
            instance: instance.to_string(),
            pin: pin.to_string(),
        })
}

/// One end of a candidate edge: a port and the bits it touches.
#[derive(Debug)]
struct Endpoint {
    port: String,
    range: BitRange,
}

/// Every endpoint attached to one wire inside an expanded box.
#[derive(Debug)]
struct WireGroup {
    net: NetId,
    range: BitRange,
    sources: Vec<Endpoint>,
    targets: Vec<Endpoint>,
}

impl WireGroup {
    fn new(net: NetId, range: BitRange) -> Self {
        Self {
            net,
            range,
            sources: Vec::new(),
            targets: Vec::new(),
        }
    }
}

/// Builds boxes for the instances of one design.
pub struct GraphBuilder<'a> {
    design: &'a Design,
    config: &'a SketchConfig,
}

impl<'a> GraphBuilder<'a> {
    /// Creates a builder reading sizing from `config`.
    pub fn new(design: &'a Design, config: &'a SketchConfig) -> Self {
        Self { design, config }
    }

    /// Returns `true` if `node` renders expanded when built at `depth`.
    pub fn is_expanded(&self, node: NodeId, depth: usize) -> bool {
        depth > 0 && self.design.node(node).has_children()
    }

    /// Resolves the layout of `node` built at `depth`.
    ///
    /// Overrides declared on the gate type are merged under the entry for
    /// the same gate in the configuration file.
    pub fn layout(&self, node: NodeId, depth: usize) -> ResolvedLayout {
        let gate = self.design.gate_of(node);
        let declared = gate.layout.as_ref();
        let file = self.config.gate(&gate.name);
        let merged = match (declared, file) {
            (Some(d), Some(f)) => Some(d.merged(f)),
            (Some(d), None) => Some(d.clone()),
            (None, Some(f)) => Some(f.clone()),
            (None, None) => None,
        };
        resolve_layout(
            &self.config.layout,
            merged.as_ref(),
            &gate.name,
            gate.ports_per_side(),
            !self.is_expanded(node, depth),
        )
    }

    /// Builds the box for `node`, expanding nested parts down to `depth`.
    ///
    /// Every id inside the box is derived from `prefix`.
    pub fn build_box(&self, node: NodeId, depth: usize, prefix: &str) -> SketchResult<BuiltBox> {
        let instance = self.design.node(node);
        let gate = self.design.gate(instance.gate);
        let expanded = self.is_expanded(node, depth);
        let layout = self.layout(node, depth);

        let mut graph_node = GraphNode {
            id: prefix.to_string(),
            ..Default::default()
        };

        let mut nested = Vec::with_capacity(instance.children.len());
        if expanded {
            for &child in &instance.children {
                let child_node = self.design.node(child);
                let child_prefix = format!("{prefix}_{}", child_node.index);
                let mut built = self.build_box(child, depth - 1, &child_prefix)?;
                built.node.node_id = Some(child_node.index);
                graph_node.children.push(built.node);
                nested.push(built.ports);
            }
        } else {
            graph_node.width = Some(layout.width);
            graph_node.height = Some(layout.height);
            graph_node.svg = layout.svg.clone();
        }

        let mut ports = PortMap::new();
        for (index, (pin, direction)) in pins(gate).enumerate() {
            let conn = instance.connection(&pin.name)?;
            let mut port = factory::port(prefix, pin, index, direction.port_side(), &layout);
            port.wire = Some(WireMeta::new(conn.net, conn.range).named(&pin.name));
            ports.insert(pin.name.clone(), port.id.clone());
            graph_node.ports.push(port);
        }

        if expanded {
            let edges = self.interior_edges(
                instance,
                gate,
                prefix,
                &ports,
                &nested,
                &layout,
                &mut graph_node.children,
            )?;
            debug!(
                gate = %gate.name,
                id = prefix,
                depth,
                children = instance.children.len(),
                edges = edges.len(),
                "expanded box"
            );
            graph_node.edges = edges;
        } else {
            debug!(gate = %gate.name, id = prefix, depth, "collapsed box");
        }

        graph_node.labels = vec![factory::box_label(prefix, &layout)];
        graph_node.gate = Some(gate.name.clone());
        graph_node.properties = Some(NodeProperties::gate_box());

        Ok(BuiltBox {
            node: graph_node,
            ports,
        })
    }

    /// Derives the edges inside an expanded box.
    ///
    /// Endpoints are grouped by wire name in first-appearance order. The
    /// box's own inputs and the children's outputs are sources; the box's
    /// outputs and the children's inputs are targets. A constant-driven child
    /// input gets a constant connector of its own, pushed onto `children`.
    /// Within a group, every source is paired with every target whose bit
    /// range overlaps its own.
    #[allow(clippy::too_many_arguments)]
    fn interior_edges(
        &self,
        instance: &Node,
        gate: &GateType,
        prefix: &str,
        ports: &PortMap,
        nested: &[PortMap],
        layout: &ResolvedLayout,
        children: &mut Vec<GraphNode>,
    ) -> SketchResult<Vec<GraphEdge>> {
        let mut groups: IndexMap<String, WireGroup> = IndexMap::new();

        for pin in &gate.inputs {
            let conn = instance.connection(&pin.name)?;
            groups
                .entry(pin.name.clone())
                .or_insert_with(|| WireGroup::new(conn.net, conn.range))
                .sources
                .push(Endpoint {
                    port: port_of(ports, prefix, &pin.name)?.to_string(),
                    range: pin.range(),
                });
        }
        for pin in &gate.outputs {
            let conn = instance.connection(&pin.name)?;
            groups
                .entry(pin.name.clone())
                .or_insert_with(|| WireGroup::new(conn.net, conn.range))
                .targets
                .push(Endpoint {
                    port: port_of(ports, prefix, &pin.name)?.to_string(),
                    range: pin.range(),
                });
        }

        let mut constants = 0;
        for (&child, child_ports) in instance.children.iter().zip(nested) {
            let child_node = self.design.node(child);
            let child_gate = self.design.gate(child_node.gate);
            let child_prefix = format!("{prefix}_{}", child_node.index);

            for pin in &child_gate.inputs {
                let conn = child_node.connection(&pin.name)?;
                let target = Endpoint {
                    port: port_of(child_ports, &child_prefix, &pin.name)?.to_string(),
                    range: conn.wire.bit_range(),
                };
                if let Some(value) = conn.wire.constant_value() {
                    let key = format!("{child_prefix}:{}", pin.name);
                    let text = factory::hex_literal(value, conn.wire.width);
                    let mut connector = factory::connector(
                        &key,
                        &text,
                        Direction::In,
                        ConnectorKind::Constant,
                        layout,
                    );
                    connector.wire = Some(WireMeta::new(conn.net, conn.range));
                    let group = groups
                        .entry(key)
                        .or_insert_with(|| WireGroup::new(conn.net, conn.range));
                    group.sources.push(Endpoint {
                        port: connector.ports[0].id.clone(),
                        range: conn.wire.bit_range(),
                    });
                    group.targets.push(target);
                    children.push(connector);
                    constants += 1;
                } else {
                    groups
                        .entry(conn.wire.name.clone())
                        .or_insert_with(|| WireGroup::new(conn.net, conn.range))
                        .targets
                        .push(target);
                }
            }
            for pin in &child_gate.outputs {
                let conn = child_node.connection(&pin.name)?;
                groups
                    .entry(conn.wire.name.clone())
                    .or_insert_with(|| WireGroup::new(conn.net, conn.range))
                    .sources
                    .push(Endpoint {
                        port: port_of(child_ports, &child_prefix, &pin.name)?.to_string(),
                        range: conn.wire.bit_range(),
                    });
            }
        }

        let mut edges = Vec::new();
        for group in groups.values() {
            for source in &group.sources {
                for target in &group.targets {
                    if source.range.overlaps(target.range) {
                        edges.push(factory::edge(
                            format!("E{prefix}_{}", edges.len()),
                            source.port.clone(),
                            target.port.clone(),
                            WireMeta::new(group.net, group.range),
                        ));
                    }
                }
            }
        }

        if constants > 0 {
            debug!(id = prefix, constants, "added constant connectors");
        }
        Ok(edges)
    }
}

/// Pins in port order: inputs reversed, then outputs.
pub fn pins(gate: &GateType) -> impl Iterator<Item = (&Pin, Direction)> {
    gate.inputs
        .iter()
        .rev()
        .map(|p| (p, Direction::In))
        .chain(gate.outputs.iter().map(|p| (p, Direction::Out)))
}
