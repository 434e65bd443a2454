//! Flattened nets and the netlist produced by the flattening stage.

use crate::arena::Arena;
use crate::ids::{NetId, NodeId};
use gatesketch_common::BitRange;
use serde::{Deserialize, Serialize};

/// One driver of a net: a pin of an instance occupying some of the net's bits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetSource {
    /// The driving instance (the circuit itself or a flattened primitive).
    pub node: NodeId,
    /// The driving pin name.
    pub pin: String,
    /// The bits of the net driven by the pin.
    pub range: BitRange,
}

/// A flattened, driven multi-bit bus.
///
/// Sources are trusted to be consistent and non-overlapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Net {
    /// The net name.
    pub name: String,
    /// Width in bits.
    pub width: u32,
    /// The value the net carries before anything drives it.
    ///
    /// Only the low 64 bits can be given; nets wider than 64 bits start with
    /// their upper bits clear.
    #[serde(default)]
    pub signal: u64,
    /// Drivers in flatten order.
    #[serde(default)]
    pub sources: Vec<NetSource>,
}

/// The flattening stage's output: leaf instances and nets, both in flatten
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Netlist {
    /// Primitive instances in flatten order.
    pub primitives: Vec<NodeId>,
    /// All nets; a net's arena index is its stable serialized index.
    pub nets: Arena<NetId, Net>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn net_defaults_on_deserialize() {
        let net: Net = serde_json::from_str(r#"{"name":"a","width":1}"#).unwrap();
        assert_eq!(net.signal, 0);
        assert!(net.sources.is_empty());
    }

    #[test]
    fn netlist_indices_follow_allocation() {
        let mut netlist = Netlist::default();
        let a = netlist.nets.alloc(Net {
            name: "a".to_string(),
            width: 1,
            signal: 0,
            sources: Vec::new(),
        });
        let b = netlist.nets.alloc(Net {
            name: "b".to_string(),
            width: 4,
            signal: 0,
            sources: vec![NetSource {
                node: NodeId::from_raw(0),
                pin: "b".to_string(),
                range: BitRange::full(4),
            }],
        });
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(netlist.nets[b].sources[0].pin, "b");
    }
}
