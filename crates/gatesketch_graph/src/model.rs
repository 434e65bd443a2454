//! Serializable graph primitives.
//!
//! Field names and nesting follow the JSON graph format read by the layout
//! and rendering runtime; they are a compatibility contract.

use gatesketch_common::BitRange;
use gatesketch_ir::NetId;
use serde::Serialize;

/// The side of a box a port is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PortSide {
    /// Left side; inputs.
    West,
    /// Right side; outputs.
    East,
}

/// Signal flow direction of a pin or connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Data flows into the box.
    In,
    /// Data flows out of the box.
    Out,
}

impl Direction {
    /// The side a box port with this direction sits on.
    pub fn port_side(self) -> PortSide {
        match self {
            Direction::In => PortSide::West,
            Direction::Out => PortSide::East,
        }
    }

    /// The side of a connector's own port: it faces what it connects to.
    pub fn connector_side(self) -> PortSide {
        match self {
            Direction::In => PortSide::East,
            Direction::Out => PortSide::West,
        }
    }
}

/// What a zero-footprint connector stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectorKind {
    /// A circuit boundary stub, or the port of any connector.
    Connector,
    /// A literal driver.
    Constant,
}

/// A text label attached to a box, port or connector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Label {
    /// Label id.
    pub id: String,
    /// Displayed text.
    pub text: String,
    /// Label width.
    pub width: u32,
    /// Label height.
    pub height: u32,
}

/// Net binding attached to ports, connectors and edges for styling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WireMeta {
    /// Index of the net in the descriptor's net list.
    pub net: u32,
    /// Bits of the net, inclusive `[high, low]`.
    pub slice: [u32; 2],
    /// The pin name, on pin-level metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl WireMeta {
    /// Metadata for `range` of `net`.
    pub fn new(net: NetId, range: BitRange) -> Self {
        Self {
            net: net.as_raw(),
            slice: range.inclusive(),
            name: None,
        }
    }

    /// Attaches a pin name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Layout constraints on a port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortProperties {
    /// The box side the port sits on.
    #[serde(rename = "port.side")]
    pub side: PortSide,
    /// Draw order among the box's ports.
    #[serde(rename = "port.index", skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
}

/// A port on a box or connector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Port {
    /// Port id, referenced by edges.
    pub id: String,
    /// Side and order constraints.
    pub properties: PortProperties,
    /// Marker width.
    pub width: u32,
    /// Marker height.
    pub height: u32,
    /// Port label, absent when the label text is empty.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<Label>,
    /// The bound net, for styling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wire: Option<WireMeta>,
    /// Set on connector ports.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ConnectorKind>,
}

/// Layout constraints on a box or connector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeProperties {
    /// Port ordering constraint.
    #[serde(rename = "portConstraints")]
    pub port_constraints: String,
    /// Placement of the node's own labels.
    #[serde(rename = "nodeLabels.placement")]
    pub node_labels_placement: String,
    /// Placement of port labels.
    #[serde(
        rename = "portLabels.placement",
        skip_serializing_if = "Option::is_none"
    )]
    pub port_labels_placement: Option<String>,
}

impl NodeProperties {
    /// Properties of gate boxes: fixed port order, labels outside.
    pub fn gate_box() -> Self {
        Self {
            port_constraints: "FIXED_ORDER".to_string(),
            node_labels_placement: "[H_LEFT, V_TOP, OUTSIDE]".to_string(),
            port_labels_placement: Some("OUTSIDE".to_string()),
        }
    }

    /// Properties of connectors: fixed port order, centered label.
    pub fn connector() -> Self {
        Self {
            port_constraints: "FIXED_ORDER".to_string(),
            node_labels_placement: "[H_CENTER, V_CENTER, INSIDE]".to_string(),
            port_labels_placement: None,
        }
    }
}

/// A directed connection between two port ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    /// Edge id.
    pub id: String,
    /// Source port ids (always exactly one).
    pub sources: Vec<String>,
    /// Target port ids (always exactly one).
    pub targets: Vec<String>,
    /// The carried net, for styling.
    pub wire: WireMeta,
}

/// A box or connector in the graph.
///
/// Gate boxes carry `gate` and, when nested, `node_id`; expanded boxes carry
/// `children` and `edges` but no size. Connectors carry `type` and
/// `direction`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    /// Node id, unique within the document.
    pub id: String,
    /// Width, when the node is sized here rather than by its children.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Height, when the node is sized here rather than by its children.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Connector kind.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ConnectorKind>,
    /// Connector direction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    /// Node labels.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<Label>,
    /// Custom shape markup.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub svg: Option<String>,
    /// Ports.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<Port>,
    /// Nested boxes and connectors of an expanded box.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<GraphNode>,
    /// Interior edges of an expanded box.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub edges: Vec<GraphEdge>,
    /// The originating gate-type name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gate: Option<String>,
    /// Child index within the enclosing gate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_id: Option<u32>,
    /// Layout constraints.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<NodeProperties>,
    /// The bound net of a connector.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wire: Option<WireMeta>,
}

impl GraphNode {
    /// Returns `true` for connector nodes.
    pub fn is_connector(&self) -> bool {
        self.kind.is_some()
    }

    /// Counts this node and every node nested inside it.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(GraphNode::node_count).sum::<usize>()
    }

    /// Counts the edges of this node and of every node nested inside it.
    pub fn edge_count(&self) -> usize {
        self.edges.len() + self.children.iter().map(GraphNode::edge_count).sum::<usize>()
    }
}

/// The complete layout graph: the circuit's box plus boundary connectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphDocument {
    /// Always `root`.
    pub id: String,
    /// The circuit's box first, then one connector per circuit pin.
    pub children: Vec<GraphNode>,
    /// Boundary edges between connectors and the circuit's ports.
    pub edges: Vec<GraphEdge>,
}

impl GraphDocument {
    /// The circuit's own box.
    pub fn circuit(&self) -> Option<&GraphNode> {
        self.children.first()
    }

    /// The boundary connectors.
    pub fn connectors(&self) -> &[GraphNode] {
        self.children.get(1..).unwrap_or(&[])
    }
}
