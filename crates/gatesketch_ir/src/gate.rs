//! Gate types: reusable circuit definitions with declared pins.
//!
//! A [`GateType`] is either a primitive, whose behavior is an opaque
//! [`Behavior`] blob per output pin interpreted by an external runtime, or a
//! compound built from nested parts.

use crate::ids::GateTypeId;
use gatesketch_common::{BitRange, Wire};
use gatesketch_config::GateLayout;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A named input or output wire on a gate type.
///
/// Direction is positional: a pin is an input because it sits in
/// [`GateType::inputs`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pin {
    /// The pin name, unique within its gate type.
    pub name: String,
    /// The pin width in bits.
    pub width: u32,
}

impl Pin {
    /// Creates a pin.
    pub fn new(name: impl Into<String>, width: u32) -> Self {
        Self {
            name: name.into(),
            width,
        }
    }

    /// The pin viewed as a whole, unsliced wire.
    pub fn wire(&self) -> Wire {
        Wire::new(self.name.clone(), self.width)
    }

    /// The range covering every bit of the pin.
    pub fn range(&self) -> BitRange {
        BitRange::full(self.width)
    }
}

/// Opaque evaluation text for one output pin of a primitive.
///
/// The text is handed to the display runtime verbatim; nothing here parses
/// or evaluates it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Behavior(String);

impl Behavior {
    /// Wraps evaluation text.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Returns the evaluation text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Whether a gate type is a leaf or is built from nested parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateKind {
    /// A leaf gate evaluated by the runtime.
    Primitive {
        /// Evaluation text keyed by output pin, in declaration order.
        process: IndexMap<String, Behavior>,
    },
    /// A gate assembled from instances of other gate types.
    Compound {
        /// The gate types of the nested parts, in part order.
        parts: Vec<GateTypeId>,
    },
}

/// A reusable circuit definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateType {
    /// The gate-type name (e.g. `Nand`).
    pub name: String,
    /// Input pins in declaration order.
    pub inputs: Vec<Pin>,
    /// Output pins in declaration order.
    pub outputs: Vec<Pin>,
    /// Primitive behavior or nested parts.
    pub kind: GateKind,
    /// Visual overrides declared by the gate type itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<GateLayout>,
}

impl GateType {
    /// Returns `true` for primitive gate types.
    pub fn is_primitive(&self) -> bool {
        matches!(self.kind, GateKind::Primitive { .. })
    }

    /// The nested part gate types; empty for primitives.
    pub fn parts(&self) -> &[GateTypeId] {
        match &self.kind {
            GateKind::Compound { parts } => parts,
            GateKind::Primitive { .. } => &[],
        }
    }

    /// The larger of the input and output pin counts.
    pub fn ports_per_side(&self) -> usize {
        self.inputs.len().max(self.outputs.len())
    }

    /// Looks up a declared pin by name, inputs first.
    pub fn pin(&self, name: &str) -> Option<&Pin> {
        self.inputs
            .iter()
            .chain(self.outputs.iter())
            .find(|p| p.name == name)
    }
}
