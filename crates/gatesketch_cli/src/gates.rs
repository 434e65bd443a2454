//! `gatesketch gates`: list the gate types of a design, leaf-first.

use gatesketch_ir::{dependency_order, Design, GateKind};

use crate::pipeline::load_design;
use crate::{GatesArgs, GlobalArgs};

/// Runs the `gatesketch gates` command.
pub fn run(args: &GatesArgs, _global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let design = load_design(&args.design)?;
    for line in gate_lines(&design)? {
        println!("{line}");
    }
    Ok(0)
}

/// One line per gate type reachable from the circuit, parts first.
pub fn gate_lines(design: &Design) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let order = dependency_order(design, design.root_node().gate)?;
    let lines = order
        .into_iter()
        .map(|id| {
            let gate = design.gate(id);
            let kind = match &gate.kind {
                GateKind::Primitive { .. } => "primitive".to_string(),
                GateKind::Compound { parts } => format!("compound ({} parts)", parts.len()),
            };
            format!(
                "{:<12} {:<20} in={} out={}",
                gate.name,
                kind,
                gate.inputs.len(),
                gate.outputs.len()
            )
        })
        .collect();
    Ok(lines)
}
