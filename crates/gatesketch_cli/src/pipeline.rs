//! Shared loading steps for CLI commands.

use std::path::Path;

use gatesketch_config::SketchConfig;
use gatesketch_ir::Design;
use tracing::debug;

use crate::GlobalArgs;

/// Reads a flattened design from a JSON file.
pub fn load_design(path: &str) -> Result<Design, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read design '{path}': {e}"))?;
    let design: Design =
        serde_json::from_str(&text).map_err(|e| format!("invalid design '{path}': {e}"))?;
    debug!(
        path,
        gates = design.gates.len(),
        nodes = design.nodes.len(),
        nets = design.netlist.nets.len(),
        "loaded design"
    );
    Ok(design)
}

/// Loads the configuration for a design file.
///
/// An explicit `--config` path must exist. Otherwise `gatesketch.toml` is
/// looked up next to the design, falling back to defaults when absent.
pub fn load_sketch_config(
    global: &GlobalArgs,
    design_path: &str,
) -> Result<SketchConfig, Box<dyn std::error::Error>> {
    let config = match &global.config {
        Some(path) => gatesketch_config::load_config_file(Path::new(path))?,
        None => {
            let dir = Path::new(design_path)
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            gatesketch_config::load_config(dir)?
        }
    };
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn global(config: Option<String>) -> GlobalArgs {
        GlobalArgs {
            quiet: true,
            verbose: false,
            config,
        }
    }

    #[test]
    fn config_next_to_design_is_used() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("gatesketch.toml"), "[layout]\nwidth = 90\n").unwrap();
        let design = dir.path().join("and.json");
        let config = load_sketch_config(&global(None), design.to_str().unwrap()).unwrap();
        assert_eq!(config.layout.width, 90);
    }

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let design = dir.path().join("and.json");
        let config = load_sketch_config(&global(None), design.to_str().unwrap()).unwrap();
        assert_eq!(config, SketchConfig::default());
    }

    #[test]
    fn explicit_config_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let result = load_sketch_config(
            &global(Some(missing.to_str().unwrap().to_string())),
            "and.json",
        );
        assert!(result.is_err());
    }

    #[test]
    fn malformed_design_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{").unwrap();
        let err = load_design(path.to_str().unwrap()).unwrap_err();
        assert!(err.to_string().starts_with("invalid design"));
    }
}
