//! Serializable circuit descriptor.
//!
//! Part 0 is always the circuit itself; parts `1..` are the flattened
//! primitives in flatten order. Nets keep their flatten order, so a net's
//! position is the index every binding refers to.

use gatesketch_common::BitRange;
use gatesketch_ir::Behavior;
use indexmap::IndexMap;
use serde::Serialize;

/// A pin's binding to (part of) a net.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetBinding {
    /// Net index.
    pub net: u32,
    /// Inclusive `[high, low]` bits; absent for a whole single-bit net.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slice: Option<[u32; 2]>,
}

/// The inclusive slice of `range` on a net of `net_width` bits, or `None`
/// when the range is the entire single-bit net.
pub fn slice_of(range: BitRange, net_width: u32) -> Option<[u32; 2]> {
    if net_width == 1 && range == BitRange::full(1) {
        None
    } else {
        Some(range.inclusive())
    }
}

/// One runtime part: the circuit or a flattened primitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartDescriptor {
    /// Instance name.
    pub name: String,
    /// Gate-type name, keying into the part configs.
    pub config: String,
    /// Bindings of every input then output pin, in declaration order.
    pub wiring: IndexMap<String, NetBinding>,
}

/// One driver of a net.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceDescriptor {
    /// Index of the driving part.
    pub part: usize,
    /// Name of the driving pin.
    pub wire: String,
    /// Inclusive `[high, low]` bits driven; absent for a whole single-bit net.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slice: Option<[u32; 2]>,
}

/// One flattened net.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetDescriptor {
    /// Net name.
    pub name: String,
    /// Width in bits.
    pub width: u32,
    /// Initial value.
    pub signal: u64,
    /// Drivers in flatten order.
    pub sources: Vec<SourceDescriptor>,
}

/// Parts and nets of a flattened circuit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CircuitDescriptor {
    /// The circuit first, then every flattened primitive.
    pub parts: Vec<PartDescriptor>,
    /// Nets in flatten order.
    pub nets: Vec<NetDescriptor>,
}

/// Pin lists and, for primitives, behavior of one gate type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartConfig {
    /// Input pin names.
    #[serde(rename = "IN")]
    pub inputs: Vec<String>,
    /// Output pin names.
    #[serde(rename = "OUT")]
    pub outputs: Vec<String>,
    /// Evaluation text per output pin; primitives only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub process: Option<IndexMap<String, Behavior>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_bit_net_omits_slice() {
        assert_eq!(slice_of(BitRange::bit(0), 1), None);
        assert_eq!(slice_of(BitRange::bit(0), 4), Some([0, 0]));
        assert_eq!(slice_of(BitRange::new(2, 6), 8), Some([5, 2]));
    }

    #[test]
    fn binding_serialization() {
        let whole = NetBinding { net: 2, slice: None };
        let part = NetBinding {
            net: 3,
            slice: Some([7, 4]),
        };
        assert_eq!(serde_json::to_string(&whole).unwrap(), r#"{"net":2}"#);
        assert_eq!(
            serde_json::to_string(&part).unwrap(),
            r#"{"net":3,"slice":[7,4]}"#
        );
    }

    #[test]
    fn part_config_uses_runtime_field_names() {
        let mut process = IndexMap::new();
        process.insert("out".to_string(), Behavior::new("f"));
        let config = PartConfig {
            inputs: vec!["a".to_string()],
            outputs: vec!["out".to_string()],
            process: Some(process),
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"IN": ["a"], "OUT": ["out"], "process": {"out": "f"}})
        );
    }
}
