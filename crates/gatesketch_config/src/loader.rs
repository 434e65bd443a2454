//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::SketchConfig;
use std::path::Path;

/// The configuration file name looked up in a project directory.
pub const CONFIG_FILE_NAME: &str = "gatesketch.toml";

/// Loads and validates `gatesketch.toml` from a directory.
///
/// A missing file is not an error; the built-in defaults are returned.
pub fn load_config(dir: &Path) -> Result<SketchConfig, ConfigError> {
    let path = dir.join(CONFIG_FILE_NAME);
    if !path.exists() {
        return Ok(SketchConfig::default());
    }
    load_config_file(&path)
}

/// Loads and validates a configuration from an explicit file path.
pub fn load_config_file(path: &Path) -> Result<SketchConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Parses and validates a configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<SketchConfig, ConfigError> {
    let config: SketchConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Rejects sizes that would collapse ports or labels to nothing.
fn validate_config(config: &SketchConfig) -> Result<(), ConfigError> {
    let layout = &config.layout;
    let checks = [
        ("layout.port_spacing", layout.port_spacing),
        ("layout.port_width", layout.port_width),
        ("layout.port_height", layout.port_height),
        ("layout.label_height", layout.label_height),
    ];
    for (field, value) in checks {
        if value == 0 {
            return Err(ConfigError::ValidationError(format!(
                "{field} must be positive"
            )));
        }
    }
    for (name, gate) in &config.gates {
        if gate.port_spacing == Some(0) {
            return Err(ConfigError::ValidationError(format!(
                "gates.{name}.port_spacing must be positive"
            )));
        }
    }
    Ok(())
}
