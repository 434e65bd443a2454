//! Shared foundational types used across the gatesketch workspace.
//!
//! This crate provides half-open bit ranges, wire references with their
//! display-name rules, and the common error type returned by every
//! generation pass.

#![warn(missing_docs)]

pub mod bits;
pub mod result;
pub mod wire;

pub use bits::BitRange;
pub use result::{SketchError, SketchResult};
pub use wire::Wire;
