//! Parsing of `gatesketch.toml` and resolution of per-box layout settings.
//!
//! This crate reads the optional configuration file into a strongly-typed
//! [`SketchConfig`] and merges default sizing with per-gate overrides into a
//! [`ResolvedLayout`] for each box the graph builder emits.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod resolve;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_file, load_config_from_str};
pub use resolve::{resolve_layout, ResolvedLayout};
pub use types::*;
