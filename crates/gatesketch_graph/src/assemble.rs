//! Top-level document assembly.

use crate::builder::{pins, GraphBuilder};
use crate::factory;
use crate::model::{ConnectorKind, Direction, GraphDocument, WireMeta};
use gatesketch_common::SketchResult;
use gatesketch_config::SketchConfig;
use gatesketch_ir::Design;
use tracing::info;

/// Generates the layout graph of `design`, expanding nested parts down to
/// `depth` levels.
///
/// The document holds the circuit's box, whose id is the root instance name,
/// followed by one boundary connector per circuit pin. Input connectors drive
/// the box's input ports; output ports drive the output connectors. Boundary
/// connectors of multi-bit pins show a zero placeholder value.
///
/// Generation either completes or fails as a whole: a pin left unconnected
/// anywhere in the expanded tree returns an error and no partial graph.
pub fn generate_graph(
    design: &Design,
    config: &SketchConfig,
    depth: usize,
) -> SketchResult<GraphDocument> {
    let builder = GraphBuilder::new(design, config);
    let root = design.root_node();
    let gate = design.gate(root.gate);
    let prefix = root.name.as_str();
    let layout = builder.layout(design.root, depth);

    let built = builder.build_box(design.root, depth, prefix)?;

    let mut connectors = Vec::new();
    let mut edges = Vec::new();
    for (index, (pin, direction)) in pins(gate).enumerate() {
        let conn = root.connection(&pin.name)?;
        let wire = WireMeta::new(conn.net, conn.range).named(&pin.name);
        let text = factory::boundary_placeholder(pin.width);
        let mut connector = factory::connector(
            &format!("{prefix}:{}", pin.name),
            &text,
            direction,
            ConnectorKind::Connector,
            &layout,
        );
        connector.wire = Some(wire.clone());

        let connector_port = factory::connector_port_id(&connector.id);
        let box_port = built.port(&pin.name)?.to_string();
        let (source, target) = match direction {
            Direction::In => (connector_port, box_port),
            Direction::Out => (box_port, connector_port),
        };
        edges.push(factory::edge(format!("CE:{index}"), source, target, wire));
        connectors.push(connector);
    }

    let boxes = built.node.node_count();
    let interior = built.node.edge_count();
    let mut children = Vec::with_capacity(connectors.len() + 1);
    children.push(built.node);
    children.extend(connectors);

    info!(
        circuit = %gate.name,
        depth,
        nodes = boxes,
        edges = interior + edges.len(),
        "generated layout graph"
    );

    Ok(GraphDocument {
        id: "root".to_string(),
        children,
        edges,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatesketch_common::{BitRange, SketchError};
    use gatesketch_ir::{DesignBuilder, Pin};

    fn adder_bit() -> Design {
        let mut b = DesignBuilder::new();
        let xor = b.primitive(
            "Xor",
            vec![Pin::new("a", 1), Pin::new("b", 1)],
            vec![Pin::new("out", 1)],
            [("out", "a ^ b")],
        );
        let a = b.net("a", 1);
        let bb = b.net("b", 1);
        let out = b.net("out", 1);
        let bit = BitRange::bit(0);
        let root = b.root(xor, [("a", a, bit), ("b", bb, bit), ("out", out, bit)]);
        b.finish(root)
    }

    #[test]
    fn document_wraps_box_with_connectors() {
        let design = adder_bit();
        let doc = generate_graph(&design, &SketchConfig::default(), 0).unwrap();
        assert_eq!(doc.id, "root");
        assert_eq!(doc.circuit().map(|n| n.id.as_str()), Some("Xor"));

        let ids: Vec<_> = doc.connectors().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["C:Xor:b", "C:Xor:a", "C:Xor:out"]);
        assert!(doc
            .connectors()
            .iter()
            .all(|c| c.kind == Some(ConnectorKind::Connector)));
        assert_eq!(doc.connectors()[2].direction, Some(Direction::Out));
    }

    #[test]
    fn single_bit_boundary_connectors_have_no_label() {
        let design = adder_bit();
        let doc = generate_graph(&design, &SketchConfig::default(), 0).unwrap();
        for connector in doc.connectors() {
            assert!(connector.labels.is_empty());
            let json = serde_json::to_value(connector).unwrap();
            assert!(json.get("labels").is_none());
        }
    }

    #[test]
    fn boundary_edges_follow_signal_flow() {
        let design = adder_bit();
        let doc = generate_graph(&design, &SketchConfig::default(), 0).unwrap();
        let pairs: Vec<_> = doc
            .edges
            .iter()
            .map(|e| (e.id.as_str(), e.sources[0].as_str(), e.targets[0].as_str()))
            .collect();
        assert_eq!(
            pairs,
            [
                ("CE:0", "CP:C:Xor:b", "P:Xor:b"),
                ("CE:1", "CP:C:Xor:a", "P:Xor:a"),
                ("CE:2", "P:Xor:out", "CP:C:Xor:out"),
            ]
        );
        assert_eq!(doc.edges[1].wire.name.as_deref(), Some("a"));
    }

    #[test]
    fn multi_bit_boundary_shows_placeholder() {
        let mut b = DesignBuilder::new();
        let buf =
            b.primitive("Buf8", vec![Pin::new("in", 8)], vec![Pin::new("out", 8)], [("out", "in")]);
        let i = b.net("in", 8);
        let o = b.net("out", 8);
        let all = BitRange::full(8);
        let root = b.root(buf, [("in", i, all), ("out", o, all)]);
        let design = b.finish(root);

        let doc = generate_graph(&design, &SketchConfig::default(), 0).unwrap();
        assert_eq!(doc.connectors()[0].labels[0].text, "00");
        assert_eq!(doc.edges[0].wire.slice, [7, 0]);
    }

    #[test]
    fn unconnected_root_pin_fails() {
        let mut b = DesignBuilder::new();
        let not =
            b.primitive("Not", vec![Pin::new("in", 1)], vec![Pin::new("out", 1)], [("out", "~in")]);
        let i = b.net("in", 1);
        let root = b.root(not, [("in", i, BitRange::bit(0))]);
        let design = b.finish(root);
        let err = generate_graph(&design, &SketchConfig::default(), 0).unwrap_err();
        assert_eq!(
            err,
            SketchError::UnconnectedPin {
                instance: "Not".to_string(),
                pin: "out".to_string(),
            }
        );
    }
}
