//! Half-open bit ranges over multi-bit wires and nets.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A half-open bit range `[start, stop)` within a wire or net.
///
/// Callers uphold `start < stop`; a range never describes zero bits.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct BitRange {
    /// The first bit covered (inclusive).
    pub start: u32,
    /// One past the last bit covered (exclusive).
    pub stop: u32,
}

impl BitRange {
    /// Creates the range `[start, stop)`.
    pub fn new(start: u32, stop: u32) -> Self {
        debug_assert!(start < stop, "empty bit range [{start}, {stop})");
        Self { start, stop }
    }

    /// The range covering every bit of a `width`-bit wire.
    pub fn full(width: u32) -> Self {
        Self::new(0, width)
    }

    /// The range covering the single bit `index`.
    pub fn bit(index: u32) -> Self {
        Self::new(index, index + 1)
    }

    /// Number of bits covered.
    pub fn len(self) -> u32 {
        self.stop - self.start
    }

    /// Always `false`; ranges cover at least one bit.
    pub fn is_empty(self) -> bool {
        self.stop <= self.start
    }

    /// The highest bit covered (inclusive).
    pub fn high(self) -> u32 {
        self.stop - 1
    }

    /// The lowest bit covered (inclusive).
    pub fn low(self) -> u32 {
        self.start
    }

    /// Returns `true` if the two half-open ranges share at least one bit.
    pub fn overlaps(self, other: BitRange) -> bool {
        self.start < other.stop && other.start < self.stop
    }

    /// Returns `true` if this range spans all of a `width`-bit wire.
    pub fn covers(self, width: u32) -> bool {
        self.start == 0 && self.stop == width
    }

    /// The inclusive `[high, low]` pair used by serialized wire metadata.
    pub fn inclusive(self) -> [u32; 2] {
        [self.high(), self.low()]
    }
}

impl fmt::Display for BitRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.len() == 1 {
            write!(f, "[{}]", self.start)
        } else {
            write!(f, "[{}..{}]", self.start, self.high())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_range() {
        let r = BitRange::full(8);
        assert_eq!((r.start, r.stop), (0, 8));
        assert_eq!(r.len(), 8);
        assert!(r.covers(8));
        assert!(!r.covers(9));
    }

    #[test]
    fn single_bit() {
        let r = BitRange::bit(2);
        assert_eq!((r.start, r.stop), (2, 3));
        assert_eq!(r.high(), 2);
        assert_eq!(r.low(), 2);
    }

    #[test]
    fn overlap_is_half_open() {
        let src = BitRange::new(0, 4);
        assert!(src.overlaps(BitRange::new(0, 2)));
        assert!(src.overlaps(BitRange::new(2, 4)));
        assert!(src.overlaps(BitRange::new(3, 8)));
        assert!(!src.overlaps(BitRange::new(4, 8)));
        assert!(!BitRange::new(4, 8).overlaps(src));
    }

    #[test]
    fn inclusive_is_high_then_low() {
        assert_eq!(BitRange::new(1, 5).inclusive(), [4, 1]);
        assert_eq!(BitRange::bit(0).inclusive(), [0, 0]);
    }

    #[test]
    fn display_collapses_single_bit() {
        assert_eq!(BitRange::bit(3).to_string(), "[3]");
        assert_eq!(BitRange::new(1, 5).to_string(), "[1..4]");
    }

    #[test]
    fn serde_roundtrip() {
        let r = BitRange::new(2, 6);
        let json = serde_json::to_string(&r).unwrap();
        let back: BitRange = serde_json::from_str(&json).unwrap();
        assert_eq!(r, back);
    }
}
