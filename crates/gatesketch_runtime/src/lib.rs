//! Runtime-facing artifacts: the circuit descriptor and the render bundle.
//!
//! The descriptor indexes a flattened [`Design`](gatesketch_ir::Design) into
//! parts and nets the simulation runtime can evaluate. The bundle pairs it
//! with the layout graph, either as one JSON document or as the script text
//! the runtime loads directly.

#![warn(missing_docs)]

pub mod bundle;
pub mod descriptor;
pub mod emit;

pub use bundle::{generate_bundle, Bundle, BundleOptions, ComponentConfig};
pub use descriptor::{
    CircuitDescriptor, NetBinding, NetDescriptor, PartConfig, PartDescriptor, SourceDescriptor,
};
pub use emit::{emit_descriptor, part_config, part_configs, PartConfigScope};
