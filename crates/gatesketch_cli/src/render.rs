//! `gatesketch render`: design file in, runtime bundle out.

use gatesketch_runtime::{generate_bundle, BundleOptions, PartConfigScope};
use tracing::info;

use crate::pipeline::{load_design, load_sketch_config};
use crate::{GlobalArgs, OutputFormat, RenderArgs};

/// Runs the `gatesketch render` command.
///
/// Writes the bundle to `--output` or stdout. Returns exit code 0 on success.
pub fn run(args: &RenderArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let text = render_text(args, global)?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, &text)
                .map_err(|e| format!("cannot write '{path}': {e}"))?;
            if !global.quiet {
                eprintln!("   Rendered {} -> {path}", args.design);
            }
        }
        None => println!("{text}"),
    }
    Ok(0)
}

/// Loads the design and configuration and encodes the bundle.
pub fn render_text(
    args: &RenderArgs,
    global: &GlobalArgs,
) -> Result<String, Box<dyn std::error::Error>> {
    let design = load_design(&args.design)?;
    let config = load_sketch_config(global, &args.design)?;
    let options = BundleOptions {
        depth: args.depth,
        scope: if args.all_gates {
            PartConfigScope::Reachable
        } else {
            PartConfigScope::Used
        },
    };

    let bundle = generate_bundle(&design, &config, options)?;
    info!(
        design = %args.design,
        parts = bundle.component.descriptor.parts.len(),
        "rendered bundle"
    );

    let text = match args.format {
        OutputFormat::Script => bundle.to_script(args.pretty)?,
        OutputFormat::Json => bundle.to_json(args.pretty)?,
    };
    Ok(text)
}
