//! Wire references: a named bus, an optional bit selection, and an optional
//! literal value.

use crate::bits::BitRange;
use serde::{Deserialize, Serialize};

/// A reference to a named wire, possibly narrowed to a sub-range.
///
/// Wires appear both as gate-type pins (never sliced) and as the actual
/// wires bound to a sub-instance's pins inside its parent's scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Wire {
    /// The wire name within its scope.
    pub name: String,
    /// The total width of the wire in bits (at least 1).
    pub width: u32,
    /// The selected bits; `None` selects the whole wire.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<BitRange>,
    /// The literal driven onto this wire, if it is a constant.
    ///
    /// Literals are limited to 64 bits; a constant wider than that cannot
    /// carry a full value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constant: Option<u64>,
}

impl Wire {
    /// Creates a whole-wire reference.
    pub fn new(name: impl Into<String>, width: u32) -> Self {
        Self {
            name: name.into(),
            width,
            range: None,
            constant: None,
        }
    }

    /// Creates a constant wire of `width` bits carrying `value`.
    pub fn constant(width: u32, value: u64) -> Self {
        Self {
            name: format!("const_{value}"),
            width,
            range: None,
            constant: Some(value),
        }
    }

    /// Selects the single bit `index` of this wire.
    pub fn bit(self, index: u32) -> Self {
        self.slice(index, index + 1)
    }

    /// Selects the half-open bit range `[start, stop)` of this wire.
    pub fn slice(mut self, start: u32, stop: u32) -> Self {
        debug_assert!(stop <= self.width, "slice beyond wire width");
        self.range = Some(BitRange::new(start, stop));
        self
    }

    /// The canonical bit range selected by this reference.
    pub fn bit_range(&self) -> BitRange {
        self.range.unwrap_or_else(|| BitRange::full(self.width))
    }

    /// Returns `true` if this wire carries a literal value.
    pub fn is_constant(&self) -> bool {
        self.constant.is_some()
    }

    /// The literal value of a constant wire.
    pub fn constant_value(&self) -> Option<u64> {
        self.constant
    }

    /// The display name: the bare name for single-bit wires, `name[i]` for a
    /// one-bit selection, and `name[start..stop-1]` otherwise.
    pub fn display_name(&self) -> String {
        if self.width == 1 {
            self.name.clone()
        } else {
            format!("{}{}", self.name, self.bit_range())
        }
    }
}
