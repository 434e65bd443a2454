//! The two-input AND built from a NAND and a NOT, end to end.

use gatesketch_config::SketchConfig;
use gatesketch_conformance::and_design;
use gatesketch_graph::generate_graph;
use gatesketch_runtime::emit_descriptor;

#[test]
fn and_flattens_to_two_primitives() {
    let design = and_design();
    assert_eq!(design.primitives().len(), 2);
    assert_eq!(emit_descriptor(&design).unwrap().parts.len(), 3);
}

#[test]
fn depth_two_shows_both_parts_and_the_not_internals() {
    let design = and_design();
    let doc = generate_graph(&design, &SketchConfig::default(), 2).unwrap();
    let circuit = doc.circuit().unwrap();

    let boxes: Vec<_> = circuit.children.iter().filter(|c| !c.is_connector()).collect();
    assert_eq!(boxes.len(), 2);
    assert_eq!(boxes[0].gate.as_deref(), Some("Nand"));
    assert!(boxes[0].children.is_empty());

    let not = boxes[1];
    assert_eq!(not.gate.as_deref(), Some("Not"));
    assert_eq!(not.children.len(), 1);
    assert_eq!(not.children[0].gate.as_deref(), Some("Nand"));
    assert_eq!(not.edges.len(), 3);

    assert_eq!(doc.connectors().len(), 3);
    assert_eq!(doc.edges.len(), 3);
}

#[test]
fn nand_output_reaches_not_input() {
    let design = and_design();
    let doc = generate_graph(&design, &SketchConfig::default(), 1).unwrap();
    let circuit = doc.circuit().unwrap();
    let link = circuit
        .edges
        .iter()
        .find(|e| e.sources[0] == "P:And_0:out")
        .unwrap();
    assert_eq!(link.targets[0], "P:And_1:In");
    assert_eq!(link.wire.slice, [0, 0]);
}
