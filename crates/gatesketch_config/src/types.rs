//! Configuration types deserialized from `gatesketch.toml`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The top-level configuration parsed from `gatesketch.toml`.
///
/// Every section is optional; an empty file yields the built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SketchConfig {
    /// Default box, port, label and connector sizing.
    #[serde(default)]
    pub layout: LayoutDefaults,
    /// Layout overrides keyed by gate-type name.
    #[serde(default)]
    pub gates: BTreeMap<String, GateLayout>,
}

impl SketchConfig {
    /// Returns the file-level override for the named gate type, if any.
    pub fn gate(&self, name: &str) -> Option<&GateLayout> {
        self.gates.get(name)
    }
}

/// Fixed sizing defaults applied to every box before overrides.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LayoutDefaults {
    /// Width of a collapsed box.
    pub width: u32,
    /// Vertical distance between adjacent ports.
    pub port_spacing: u32,
    /// Width reserved for a box label.
    pub label_width: u32,
    /// Height of every label.
    pub label_height: u32,
    /// Width of a port marker.
    pub port_width: u32,
    /// Height of a port marker.
    pub port_height: u32,
    /// Width of a connector carrying no text.
    pub connector_width: u32,
    /// Height of every connector.
    pub connector_height: u32,
}

impl Default for LayoutDefaults {
    fn default() -> Self {
        Self {
            width: 60,
            port_spacing: 20,
            label_width: 50,
            label_height: 10,
            port_width: 8,
            port_height: 8,
            connector_width: 20,
            connector_height: 16,
        }
    }
}

/// Visual overrides declared for one gate type.
///
/// Every field is optional; absent fields fall through to the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct GateLayout {
    /// Box width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Box height; derived from the port count when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Vertical distance between adjacent ports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port_spacing: Option<u32>,
    /// Width reserved for the box label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_width: Option<u32>,
    /// Height of labels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_height: Option<u32>,
    /// Width of port markers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port_width: Option<u32>,
    /// Height of port markers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port_height: Option<u32>,
    /// Width of text-less connectors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connector_width: Option<u32>,
    /// Height of connectors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connector_height: Option<u32>,
    /// Box label text; an empty string hides the label text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Per-pin label overrides keyed by pin name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub ports: BTreeMap<String, PortLayout>,
    /// Custom SVG markup drawn in place of the plain box body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub svg: Option<String>,
}

impl GateLayout {
    /// Overlays `other` on top of `self`, field by field.
    ///
    /// Port overrides are merged per pin; `other` wins on conflicts.
    pub fn merged(&self, other: &GateLayout) -> GateLayout {
        let mut ports = self.ports.clone();
        for (pin, layout) in &other.ports {
            let entry = ports.entry(pin.clone()).or_default();
            if layout.label.is_some() {
                entry.label = layout.label.clone();
            }
        }
        GateLayout {
            width: other.width.or(self.width),
            height: other.height.or(self.height),
            port_spacing: other.port_spacing.or(self.port_spacing),
            label_width: other.label_width.or(self.label_width),
            label_height: other.label_height.or(self.label_height),
            port_width: other.port_width.or(self.port_width),
            port_height: other.port_height.or(self.port_height),
            connector_width: other.connector_width.or(self.connector_width),
            connector_height: other.connector_height.or(self.connector_height),
            label: other.label.clone().or_else(|| self.label.clone()),
            ports,
            svg: other.svg.clone().or_else(|| self.svg.clone()),
        }
    }
}

/// Per-pin visual override.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PortLayout {
    /// Replacement label text for the pin's port.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_builtin_sizing() {
        let d = LayoutDefaults::default();
        assert_eq!(d.width, 60);
        assert_eq!(d.port_spacing, 20);
        assert_eq!(d.label_width, 50);
        assert_eq!(d.label_height, 10);
        assert_eq!(d.port_width, 8);
        assert_eq!(d.port_height, 8);
        assert_eq!(d.connector_width, 20);
        assert_eq!(d.connector_height, 16);
    }

    #[test]
    fn merged_prefers_overlay() {
        let base = GateLayout {
            width: Some(40),
            label: Some("NAND".to_string()),
            ..Default::default()
        };
        let overlay = GateLayout {
            width: Some(30),
            height: Some(25),
            ..Default::default()
        };
        let merged = base.merged(&overlay);
        assert_eq!(merged.width, Some(30));
        assert_eq!(merged.height, Some(25));
        assert_eq!(merged.label.as_deref(), Some("NAND"));
    }

    #[test]
    fn merged_port_labels_per_pin() {
        let mut base = GateLayout::default();
        base.ports.insert(
            "a".to_string(),
            PortLayout {
                label: Some("A".to_string()),
            },
        );
        base.ports.insert(
            "b".to_string(),
            PortLayout {
                label: Some("B".to_string()),
            },
        );
        let mut overlay = GateLayout::default();
        overlay.ports.insert(
            "b".to_string(),
            PortLayout {
                label: Some("in2".to_string()),
            },
        );
        let merged = base.merged(&overlay);
        assert_eq!(merged.ports["a"].label.as_deref(), Some("A"));
        assert_eq!(merged.ports["b"].label.as_deref(), Some("in2"));
    }

    #[test]
    fn gate_layout_serializes_sparse() {
        let layout = GateLayout {
            width: Some(40),
            ..Default::default()
        };
        let json = serde_json::to_string(&layout).unwrap();
        assert_eq!(json, r#"{"width":40}"#);
    }
}
