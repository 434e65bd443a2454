//! The circuit model consumed by graph and descriptor generation.
//!
//! A [`Design`] bundles the gate-type library, the instance tree rooted at
//! the circuit being rendered, and the flattened [`Netlist`] produced by the
//! flattening stage. Everything is stored in [`Arena`]s keyed by opaque ids,
//! so a compound gate type and its nested instances never own each other and
//! net/part indices stay stable for serialization.

#![warn(missing_docs)]

pub mod arena;
pub mod builder;
pub mod deps;
pub mod design;
pub mod gate;
pub mod ids;
pub mod net;
pub mod node;

pub use arena::{Arena, ArenaId};
pub use builder::DesignBuilder;
pub use deps::dependency_order;
pub use design::Design;
pub use gate::{Behavior, GateKind, GateType, Pin};
pub use ids::{GateTypeId, NetId, NodeId};
pub use net::{Net, NetSource, Netlist};
pub use node::{Node, PinConnection};
