//! Gate-type dependency resolution.
//!
//! Orders the gate types reachable from a root gate type so that every part
//! type precedes the compound types that use it.

use crate::design::Design;
use crate::ids::GateTypeId;
use gatesketch_common::{SketchError, SketchResult};
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

/// Returns `top` and every gate type it transitively uses, leaf-first.
///
/// Each gate type appears once. Fails with
/// [`SketchError::RecursiveGate`] if a gate type contains itself.
pub fn dependency_order(design: &Design, top: GateTypeId) -> SketchResult<Vec<GateTypeId>> {
    let mut graph: DiGraph<GateTypeId, ()> = DiGraph::new();
    let mut index: HashMap<GateTypeId, NodeIndex> = HashMap::new();
    let mut pending = vec![top];
    index.insert(top, graph.add_node(top));

    while let Some(gate) = pending.pop() {
        let user = index[&gate];
        for &part in design.gate(gate).parts() {
            let used = *index.entry(part).or_insert_with(|| {
                pending.push(part);
                graph.add_node(part)
            });
            // edges point from a part to the gate that uses it
            graph.update_edge(used, user, ());
        }
    }

    match toposort(&graph, None) {
        Ok(order) => Ok(order.into_iter().map(|ix| graph[ix]).collect()),
        Err(cycle) => Err(SketchError::RecursiveGate {
            gate: design.gate(graph[cycle.node_id()]).name.clone(),
        }),
    }
}
