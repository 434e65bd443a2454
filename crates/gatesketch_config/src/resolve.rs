//! Layout resolution: merging default sizing with a gate type's overrides.

use crate::types::{GateLayout, LayoutDefaults, PortLayout};
use std::collections::BTreeMap;

/// Fully resolved visual settings for one box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLayout {
    /// Box width.
    pub width: u32,
    /// Box height.
    pub height: u32,
    /// Vertical distance between adjacent ports.
    pub port_spacing: u32,
    /// Width reserved for the box label.
    pub label_width: u32,
    /// Height of labels.
    pub label_height: u32,
    /// Width of port markers.
    pub port_width: u32,
    /// Height of port markers.
    pub port_height: u32,
    /// Width of text-less connectors.
    pub connector_width: u32,
    /// Height of connectors.
    pub connector_height: u32,
    /// Box label text.
    pub label: String,
    /// Per-pin label overrides.
    pub ports: BTreeMap<String, PortLayout>,
    /// Custom SVG markup for the box body.
    pub svg: Option<String>,
}

impl ResolvedLayout {
    /// Returns the configured label for `pin`, if one was overridden.
    pub fn port_label(&self, pin: &str) -> Option<&str> {
        self.ports.get(pin).and_then(|p| p.label.as_deref())
    }
}

/// Resolves the layout of a box for the gate type `gate_name`.
///
/// Overrides apply only to collapsed boxes (rendered opaque, without their
/// nested parts). An unset height becomes `ports_per_side * port_spacing`,
/// where `ports_per_side` is the larger of the input and output counts. The
/// label defaults to the gate name when collapsed and is always the gate name
/// when expanded.
pub fn resolve_layout(
    defaults: &LayoutDefaults,
    overrides: Option<&GateLayout>,
    gate_name: &str,
    ports_per_side: usize,
    collapsed: bool,
) -> ResolvedLayout {
    let empty = GateLayout::default();
    let o = match overrides {
        Some(o) if collapsed => o,
        _ => &empty,
    };

    let port_spacing = o.port_spacing.unwrap_or(defaults.port_spacing);
    let height = o
        .height
        .unwrap_or(ports_per_side as u32 * port_spacing);
    let label = if collapsed {
        o.label.clone().unwrap_or_else(|| gate_name.to_string())
    } else {
        gate_name.to_string()
    };

    ResolvedLayout {
        width: o.width.unwrap_or(defaults.width),
        height,
        port_spacing,
        label_width: o.label_width.unwrap_or(defaults.label_width),
        label_height: o.label_height.unwrap_or(defaults.label_height),
        port_width: o.port_width.unwrap_or(defaults.port_width),
        port_height: o.port_height.unwrap_or(defaults.port_height),
        connector_width: o.connector_width.unwrap_or(defaults.connector_width),
        connector_height: o.connector_height.unwrap_or(defaults.connector_height),
        label,
        ports: o.ports.clone(),
        svg: o.svg.clone(),
    }
}
