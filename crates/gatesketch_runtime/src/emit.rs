//! Descriptor emission.

use crate::descriptor::{
    slice_of, CircuitDescriptor, NetBinding, NetDescriptor, PartConfig, PartDescriptor,
    SourceDescriptor,
};
use gatesketch_common::{SketchError, SketchResult};
use gatesketch_ir::{dependency_order, Design, GateKind, GateType, GateTypeId, NodeId};
use indexmap::map::Entry;
use indexmap::{IndexMap, IndexSet};
use std::collections::HashMap;
use tracing::info;

/// Which gate types get a part config.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PartConfigScope {
    /// The circuit's own type, then every primitive type a flattened part
    /// uses, in first-use order.
    #[default]
    Used,
    /// Every gate type reachable from the circuit's type, parts before the
    /// compound types using them.
    Reachable,
}

/// Builds the parts and nets of `design`.
///
/// Fails with [`SketchError::UnknownPart`] if a net is driven by an instance
/// that is neither the circuit nor a flattened primitive, and with
/// [`SketchError::UnconnectedPin`] if a part lacks wiring for a declared pin.
pub fn emit_descriptor(design: &Design) -> SketchResult<CircuitDescriptor> {
    let part_nodes: Vec<NodeId> = std::iter::once(design.root)
        .chain(design.primitives().iter().copied())
        .collect();
    let part_index: HashMap<NodeId, usize> = part_nodes
        .iter()
        .enumerate()
        .map(|(i, &node)| (node, i))
        .collect();

    let parts = part_nodes
        .iter()
        .map(|&node| part(design, node))
        .collect::<SketchResult<Vec<_>>>()?;

    let mut nets = Vec::with_capacity(design.netlist.nets.len());
    for net in design.netlist.nets.values() {
        let sources = net
            .sources
            .iter()
            .map(|source| -> SketchResult<SourceDescriptor> {
                let part = part_index.get(&source.node).copied().ok_or_else(|| {
                    SketchError::UnknownPart {
                        net: net.name.clone(),
                        instance: design.node(source.node).name.clone(),
                    }
                })?;
                Ok(SourceDescriptor {
                    part,
                    wire: source.pin.clone(),
                    slice: slice_of(source.range, net.width),
                })
            })
            .collect::<SketchResult<Vec<_>>>()?;
        nets.push(NetDescriptor {
            name: net.name.clone(),
            width: net.width,
            signal: net.signal,
            sources,
        });
    }

    info!(parts = parts.len(), nets = nets.len(), "emitted circuit descriptor");
    Ok(CircuitDescriptor { parts, nets })
}

fn part(design: &Design, node: NodeId) -> SketchResult<PartDescriptor> {
    let instance = design.node(node);
    let gate = design.gate(instance.gate);
    let mut wiring = IndexMap::new();
    for pin in gate.inputs.iter().chain(&gate.outputs) {
        let conn = instance.connection(&pin.name)?;
        let net = design.net(conn.net);
        wiring.insert(
            pin.name.clone(),
            NetBinding {
                net: conn.net.as_raw(),
                slice: slice_of(conn.range, net.width),
            },
        );
    }
    Ok(PartDescriptor {
        name: instance.name.clone(),
        config: gate.name.clone(),
        wiring,
    })
}

/// The part config of one gate type.
///
/// Behavior text is copied through untouched.
pub fn part_config(gate: &GateType) -> PartConfig {
    let process = match &gate.kind {
        GateKind::Primitive { process } => Some(process.clone()),
        GateKind::Compound { .. } => None,
    };
    PartConfig {
        inputs: gate.inputs.iter().map(|p| p.name.clone()).collect(),
        outputs: gate.outputs.iter().map(|p| p.name.clone()).collect(),
        process,
    }
}

/// Part configs keyed by gate-type name, one per distinct gate type in
/// `scope`.
///
/// Fails with [`SketchError::DuplicateGateName`] when two distinct gate types
/// in scope share a name.
pub fn part_configs(
    design: &Design,
    scope: PartConfigScope,
) -> SketchResult<IndexMap<String, PartConfig>> {
    let root_gate = design.root_node().gate;
    let gates: Vec<GateTypeId> = match scope {
        PartConfigScope::Used => {
            let mut seen = IndexSet::new();
            seen.insert(root_gate);
            for &node in design.primitives() {
                seen.insert(design.node(node).gate);
            }
            seen.into_iter().collect()
        }
        PartConfigScope::Reachable => dependency_order(design, root_gate)?,
    };

    let mut configs = IndexMap::with_capacity(gates.len());
    for id in gates {
        let gate = design.gate(id);
        match configs.entry(gate.name.clone()) {
            Entry::Occupied(_) => {
                return Err(SketchError::DuplicateGateName {
                    name: gate.name.clone(),
                })
            }
            Entry::Vacant(slot) => {
                slot.insert(part_config(gate));
            }
        }
    }
    Ok(configs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatesketch_common::{BitRange, Wire};
    use gatesketch_ir::{DesignBuilder, Pin};

    /// A 2-bit register file slice: the circuit drives `d`, a `Reg` drives `q`
    /// one bit at a time through two instances.
    fn split_design() -> Design {
        let mut b = DesignBuilder::new();
        let buf = b.primitive(
            "Buf",
            vec![Pin::new("in", 1)],
            vec![Pin::new("out", 1)],
            [("out", "function(w) { return w.in; }")],
        );
        let pair =
            b.compound("Pair", vec![Pin::new("d", 2)], vec![Pin::new("q", 2)], vec![buf, buf]);

        let d = b.net("d", 2);
        let q = b.net_with_signal("q", 2, 3);
        let root = b.root(pair, [("d", d, BitRange::full(2)), ("q", q, BitRange::full(2))]);
        b.drive(d, root, "d", BitRange::full(2));
        let lo = b.instance(
            root,
            buf,
            [
                ("in", Wire::new("d", 2).bit(0), d, BitRange::bit(0)),
                ("out", Wire::new("q", 2).bit(0), q, BitRange::bit(0)),
            ],
        );
        let hi = b.instance(
            root,
            buf,
            [
                ("in", Wire::new("d", 2).bit(1), d, BitRange::bit(1)),
                ("out", Wire::new("q", 2).bit(1), q, BitRange::bit(1)),
            ],
        );
        b.drive(q, lo, "out", BitRange::bit(0));
        b.drive(q, hi, "out", BitRange::bit(1));
        b.finish(root)
    }

    #[test]
    fn parts_start_with_circuit() {
        let design = split_design();
        let descriptor = emit_descriptor(&design).unwrap();
        assert_eq!(descriptor.parts.len(), 3);
        assert_eq!(descriptor.parts[0].config, "Pair");
        assert_eq!(descriptor.parts[1].config, "Buf");
        assert_eq!(
            descriptor.parts[2].wiring["in"],
            NetBinding {
                net: 0,
                slice: Some([1, 1]),
            }
        );
    }

    #[test]
    fn net_sources_index_parts() {
        let design = split_design();
        let descriptor = emit_descriptor(&design).unwrap();
        let q = &descriptor.nets[1];
        assert_eq!(q.signal, 3);
        assert_eq!(
            q.sources,
            [
                SourceDescriptor {
                    part: 1,
                    wire: "out".to_string(),
                    slice: Some([0, 0]),
                },
                SourceDescriptor {
                    part: 2,
                    wire: "out".to_string(),
                    slice: Some([1, 1]),
                },
            ]
        );
        assert_eq!(descriptor.nets[0].sources[0].part, 0);
    }

    #[test]
    fn non_part_source_is_rejected() {
        let mut b = DesignBuilder::new();
        let buf =
            b.primitive("Buf", vec![Pin::new("in", 1)], vec![Pin::new("out", 1)], [("out", "f")]);
        let wrap = b.compound("Wrap", vec![Pin::new("in", 1)], vec![Pin::new("out", 1)], vec![buf]);
        let top = b.compound("Top", vec![Pin::new("in", 1)], vec![Pin::new("out", 1)], vec![wrap]);
        let i = b.net("in", 1);
        let o = b.net("out", 1);
        let bit = BitRange::bit(0);
        let root = b.root(top, [("in", i, bit), ("out", o, bit)]);
        let w = b.instance(
            root,
            wrap,
            [("in", Wire::new("in", 1), i, bit), ("out", Wire::new("out", 1), o, bit)],
        );
        b.instance(
            w,
            buf,
            [("in", Wire::new("in", 1), i, bit), ("out", Wire::new("out", 1), o, bit)],
        );
        b.drive(o, w, "out", bit);
        let design = b.finish(root);

        let err = emit_descriptor(&design).unwrap_err();
        assert_eq!(
            err,
            SketchError::UnknownPart {
                net: "out".to_string(),
                instance: "Wrap".to_string(),
            }
        );
    }

    #[test]
    fn used_scope_lists_circuit_then_primitives_once() {
        let design = split_design();
        let configs = part_configs(&design, PartConfigScope::Used).unwrap();
        let names: Vec<_> = configs.keys().map(String::as_str).collect();
        assert_eq!(names, ["Pair", "Buf"]);
        assert!(configs["Pair"].process.is_none());
        let process = configs["Buf"].process.as_ref().unwrap();
        assert_eq!(process["out"].as_str(), "function(w) { return w.in; }");
    }

    #[test]
    fn same_named_gate_types_are_rejected() {
        let mut b = DesignBuilder::new();
        let first =
            b.primitive("Buf", vec![Pin::new("in", 1)], vec![Pin::new("out", 1)], [("out", "f")]);
        let second =
            b.primitive("Buf", vec![Pin::new("in", 1)], vec![Pin::new("out", 1)], [("out", "g")]);
        let pair =
            b.compound("Pair", vec![Pin::new("d", 1)], vec![Pin::new("q", 1)], vec![first, second]);

        let d = b.net("d", 1);
        let m = b.net("m", 1);
        let q = b.net("q", 1);
        let bit = BitRange::bit(0);
        let root = b.root(pair, [("d", d, bit), ("q", q, bit)]);
        b.drive(d, root, "d", bit);
        let lo = b.instance(
            root,
            first,
            [("in", Wire::new("d", 1), d, bit), ("out", Wire::new("m", 1), m, bit)],
        );
        let hi = b.instance(
            root,
            second,
            [("in", Wire::new("m", 1), m, bit), ("out", Wire::new("q", 1), q, bit)],
        );
        b.drive(m, lo, "out", bit);
        b.drive(q, hi, "out", bit);
        let design = b.finish(root);

        for scope in [PartConfigScope::Used, PartConfigScope::Reachable] {
            assert_eq!(
                part_configs(&design, scope).unwrap_err(),
                SketchError::DuplicateGateName {
                    name: "Buf".to_string(),
                }
            );
        }
    }

    #[test]
    fn reachable_scope_is_leaf_first() {
        let mut b = DesignBuilder::new();
        let nand = b.primitive(
            "Nand",
            vec![Pin::new("a", 1), Pin::new("b", 1)],
            vec![Pin::new("out", 1)],
            [("out", "f")],
        );
        let not = b.compound("Not", vec![Pin::new("In", 1)], vec![Pin::new("out", 1)], vec![nand]);
        let and = b.compound(
            "And",
            vec![Pin::new("a", 1), Pin::new("b", 1)],
            vec![Pin::new("out", 1)],
            vec![nand, not],
        );
        let root = b.root(and, []);
        let design = b.finish(root);

        let configs = part_configs(&design, PartConfigScope::Reachable).unwrap();
        let names: Vec<_> = configs.keys().map(String::as_str).collect();
        assert_eq!(names.len(), 3);
        assert_eq!(names[2], "And");
        let nand_at = names.iter().position(|&n| n == "Nand").unwrap();
        let not_at = names.iter().position(|&n| n == "Not").unwrap();
        assert!(nand_at < not_at);

        let used = part_configs(&design, PartConfigScope::Used).unwrap();
        assert_eq!(used.keys().collect::<Vec<_>>(), ["And"]);
    }
}
