//! The render bundle: descriptor, part configs and layout graph together.
//!
//! The bundle has two encodings. [`Bundle::to_json`] is a single JSON
//! document for tooling. [`Bundle::to_script`] is the script text the browser
//! runtime executes: it declares `comp_config`, attaches the part configs
//! with behavior text inlined as code, instantiates the component and
//! declares the graph.

use crate::descriptor::{CircuitDescriptor, PartConfig};
use crate::emit::{emit_descriptor, part_configs, PartConfigScope};
use gatesketch_common::{SketchError, SketchResult};
use gatesketch_config::SketchConfig;
use gatesketch_graph::{generate_graph, GraphDocument};
use gatesketch_ir::Design;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

/// Options for [`generate_bundle`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BundleOptions {
    /// Number of nesting levels rendered expanded.
    pub depth: usize,
    /// Which gate types get a part config.
    pub scope: PartConfigScope,
}

/// The descriptor together with its part configs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentConfig {
    /// Parts and nets.
    #[serde(flatten)]
    pub descriptor: CircuitDescriptor,
    /// Part configs keyed by gate-type name.
    pub part_configs: IndexMap<String, PartConfig>,
}

/// Everything the runtime needs to simulate and draw one circuit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bundle {
    /// The circuit descriptor and part configs.
    pub component: ComponentConfig,
    /// The layout graph.
    pub graph: GraphDocument,
}

/// Generates the descriptor, part configs and layout graph of `design`.
pub fn generate_bundle(
    design: &Design,
    config: &SketchConfig,
    options: BundleOptions,
) -> SketchResult<Bundle> {
    let descriptor = emit_descriptor(design)?;
    let part_configs = part_configs(design, options.scope)?;
    let graph = generate_graph(design, config, options.depth)?;
    debug!(
        configs = part_configs.len(),
        depth = options.depth,
        "assembled bundle"
    );
    Ok(Bundle {
        component: ComponentConfig {
            descriptor,
            part_configs,
        },
        graph,
    })
}

fn encode<T: Serialize + ?Sized>(value: &T, artifact: &str, pretty: bool) -> SketchResult<String> {
    let encoded = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    encoded.map_err(|e| SketchError::Encode {
        artifact: artifact.to_string(),
        message: e.to_string(),
    })
}

impl Bundle {
    /// Encodes the bundle as one JSON document.
    pub fn to_json(&self, pretty: bool) -> SketchResult<String> {
        encode(self, "bundle", pretty)
    }

    /// Encodes the bundle as runtime script text.
    ///
    /// `pretty` indents the embedded JSON; the part-config block is always
    /// laid out one field per line.
    pub fn to_script(&self, pretty: bool) -> SketchResult<String> {
        let mut out = String::new();

        out.push_str("var comp_config = ");
        out.push_str(&encode(&self.component.descriptor, "circuit descriptor", pretty)?);
        out.push_str(";\n\n");

        out.push_str("comp_config.part_configs = {");
        for (i, (name, config)) in self.component.part_configs.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            out.push_str(&part_config_script(name, config)?);
        }
        out.push_str("\n};\n\n");

        out.push_str("var component = new Component(comp_config);\n\n");

        out.push_str("var graph = ");
        out.push_str(&encode(&self.graph, "layout graph", pretty)?);
        out.push_str(";\n\n");

        out.push_str("var config = {component: component, graph: graph};\n");
        Ok(out)
    }
}

/// One entry of the part-config object literal. Behavior text is emitted
/// as-is, so it is evaluated as code rather than read as a string.
fn part_config_script(name: &str, config: &PartConfig) -> SketchResult<String> {
    let mut entry = format!(
        "\n  {} : {{\n    IN: {},\n    OUT: {},\n",
        encode(name, "gate name", false)?,
        encode(&config.inputs, "input pins", false)?,
        encode(&config.outputs, "output pins", false)?,
    );
    if let Some(process) = &config.process {
        entry.push_str("    process: {\n");
        for (pin, behavior) in process {
            entry.push_str(&format!(
                "      {} : {},\n",
                encode(pin, "pin name", false)?,
                behavior.as_str()
            ));
        }
        entry.push_str("    }\n");
    }
    entry.push_str("  }");
    Ok(entry)
}
