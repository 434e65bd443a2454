//! Constructors for graph primitives with consistent sizing and ids.
//!
//! Text width is estimated at a fixed advance per character; the layout
//! engine only needs a rough footprint.

use crate::model::{
    ConnectorKind, Direction, GraphEdge, GraphNode, Label, NodeProperties, Port, PortProperties,
    PortSide, WireMeta,
};
use gatesketch_config::ResolvedLayout;
use gatesketch_ir::Pin;

/// Estimated width of one label character.
pub const CHAR_WIDTH: u32 = 6;

/// Horizontal padding added around connector text.
pub const CONNECTOR_PADDING: u32 = 16;

/// Estimated rendered width of `text`.
pub fn text_width(text: &str) -> u32 {
    text.chars().count() as u32 * CHAR_WIDTH
}

/// Creates a label with an estimated width.
pub fn label(id: impl Into<String>, text: impl Into<String>, layout: &ResolvedLayout) -> Label {
    let text = text.into();
    Label {
        id: id.into(),
        width: text_width(&text),
        height: layout.label_height,
        text,
    }
}

/// The box label for the box with id `prefix`.
pub fn box_label(prefix: &str, layout: &ResolvedLayout) -> Label {
    label(format!("L{prefix}"), layout.label.clone(), layout)
}

/// The id of the port for `pin` on the box `prefix`.
pub fn port_id(prefix: &str, pin: &str) -> String {
    format!("P:{prefix}:{pin}")
}

/// The id of a connector's single port.
pub fn connector_port_id(connector_id: &str) -> String {
    format!("CP:{connector_id}")
}

/// Creates the port for `pin` on the box `prefix`.
///
/// The label is the configured override or the pin name, suffixed with the
/// bit span for multi-bit pins, and is left off when empty.
pub fn port(
    prefix: &str,
    pin: &Pin,
    index: usize,
    side: PortSide,
    layout: &ResolvedLayout,
) -> Port {
    let mut text = layout
        .port_label(&pin.name)
        .unwrap_or(&pin.name)
        .to_string();
    if pin.width > 1 {
        text.push_str(&format!("[0..{}]", pin.width - 1));
    }

    let labels = if text.is_empty() {
        Vec::new()
    } else {
        vec![label(format!("LP{prefix}:{}", pin.name), text, layout)]
    };

    Port {
        id: port_id(prefix, &pin.name),
        properties: PortProperties {
            side,
            index: Some(index),
        },
        width: layout.port_width,
        height: layout.port_height,
        labels,
        wire: None,
        kind: None,
    }
}

/// Creates a zero-footprint connector with a single port.
///
/// The connector is `C:<id>`, its port `CP:C:<id>`. An input connector's port
/// faces east toward what it drives; an output connector's port faces west.
/// Non-empty text becomes a label covering the whole connector.
pub fn connector(
    id: &str,
    text: &str,
    direction: Direction,
    kind: ConnectorKind,
    layout: &ResolvedLayout,
) -> GraphNode {
    let id = format!("C:{id}");
    let width = if text.is_empty() {
        layout.connector_width
    } else {
        text_width(text) + CONNECTOR_PADDING
    };

    let port = Port {
        id: connector_port_id(&id),
        properties: PortProperties {
            side: direction.connector_side(),
            index: None,
        },
        width: 0,
        height: 0,
        labels: Vec::new(),
        wire: None,
        kind: Some(ConnectorKind::Connector),
    };

    let labels = if text.is_empty() {
        Vec::new()
    } else {
        vec![Label {
            id: format!("CL:{id}"),
            text: text.to_string(),
            width,
            height: layout.connector_height,
        }]
    };

    GraphNode {
        width: Some(width),
        height: Some(layout.connector_height),
        kind: Some(kind),
        direction: Some(direction),
        labels,
        ports: vec![port],
        properties: Some(NodeProperties::connector()),
        id,
        ..Default::default()
    }
}

/// Creates a directed edge between two ports.
pub fn edge(
    id: impl Into<String>,
    source: impl Into<String>,
    target: impl Into<String>,
    wire: WireMeta,
) -> GraphEdge {
    GraphEdge {
        id: id.into(),
        sources: vec![source.into()],
        targets: vec![target.into()],
        wire,
    }
}

/// Hex text for a constant of `width` bits, one digit per started nibble.
pub fn hex_literal(value: u64, width: u32) -> String {
    let digits = width.div_ceil(4) as usize;
    format!("{value:0digits$X}")
}

/// Placeholder value text for a boundary connector of `width` bits.
pub fn boundary_placeholder(width: u32) -> String {
    if width > 1 {
        "0".repeat(width.div_ceil(4) as usize)
    } else {
        String::new()
    }
}
