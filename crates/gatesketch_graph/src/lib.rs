//! Layout-graph generation for circuit diagrams.
//!
//! Turns a [`Design`](gatesketch_ir::Design) into a [`GraphDocument`]: nested
//! boxes, ports, connectors and edges describing the layout *problem* for an
//! external automatic layout engine. No coordinates are computed here.
//!
//! The pipeline has two stages:
//! 1. **Hierarchical building** ([`GraphBuilder`]) expands the instance tree
//!    to a requested depth and derives interior edges from bit ranges
//! 2. **Assembly** ([`generate_graph`]) wraps the circuit's box with boundary
//!    connectors for its own pins

#![warn(missing_docs)]

pub mod assemble;
pub mod builder;
pub mod factory;
pub mod model;

pub use assemble::generate_graph;
pub use builder::{BuiltBox, GraphBuilder, PortMap};
pub use model::{
    ConnectorKind, Direction, GraphDocument, GraphEdge, GraphNode, Label, NodeProperties, Port,
    PortProperties, PortSide, WireMeta,
};
