//! gatesketch CLI: renders flattened circuit designs for the browser runtime.
//!
//! Provides `gatesketch render` to produce a descriptor + layout-graph bundle
//! and `gatesketch gates` to list the gate types a circuit is built from.

#![warn(missing_docs)]

mod gates;
mod pipeline;
mod render;

use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

/// gatesketch: layout graphs and runtime bundles for logic circuits.
#[derive(Parser, Debug)]
#[command(name = "gatesketch", version, about = "Circuit diagram bundler")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a custom `gatesketch.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render a design to a runtime bundle.
    Render(RenderArgs),
    /// List the gate types a design is built from, leaf-first.
    Gates(GatesArgs),
}

/// Arguments for the `gatesketch render` subcommand.
#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Flattened design file (JSON).
    pub design: String,

    /// Nesting levels to render expanded.
    #[arg(short, long, default_value_t = 0)]
    pub depth: usize,

    /// Output encoding.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Script)]
    pub format: OutputFormat,

    /// Indent embedded JSON.
    #[arg(long)]
    pub pretty: bool,

    /// Emit part configs for every reachable gate type, not only the used ones.
    #[arg(long)]
    pub all_gates: bool,

    /// Output path (default: stdout).
    #[arg(short, long)]
    pub output: Option<String>,
}

/// Arguments for the `gatesketch gates` subcommand.
#[derive(Parser, Debug)]
pub struct GatesArgs {
    /// Flattened design file (JSON).
    pub design: String,
}

/// Bundle output encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Runtime script text.
    Script,
    /// One JSON document.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

impl GlobalArgs {
    /// The log filter implied by the flags; `None` defers to `RUST_LOG`.
    fn log_directive(&self) -> Option<&'static str> {
        if self.quiet {
            Some("error")
        } else if self.verbose {
            Some("debug")
        } else {
            None
        }
    }
}

fn init_tracing(global: &GlobalArgs) {
    let filter = match global.log_directive() {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        config: cli.config,
    };
    init_tracing(&global);

    let result = match cli.command {
        Command::Render(ref args) => render::run(args, &global),
        Command::Gates(ref args) => gates::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_render_default() {
        let cli = Cli::parse_from(["gatesketch", "render", "and.json"]);
        match cli.command {
            Command::Render(ref args) => {
                assert_eq!(args.design, "and.json");
                assert_eq!(args.depth, 0);
                assert_eq!(args.format, OutputFormat::Script);
                assert!(!args.pretty);
                assert!(!args.all_gates);
                assert!(args.output.is_none());
            }
            _ => panic!("expected Render command"),
        }
    }

    #[test]
    fn parse_render_with_args() {
        let cli = Cli::parse_from([
            "gatesketch",
            "render",
            "and.json",
            "--depth",
            "2",
            "--format",
            "json",
            "--pretty",
            "--all-gates",
            "-o",
            "and.js",
        ]);
        match cli.command {
            Command::Render(ref args) => {
                assert_eq!(args.depth, 2);
                assert_eq!(args.format, OutputFormat::Json);
                assert!(args.pretty);
                assert!(args.all_gates);
                assert_eq!(args.output.as_deref(), Some("and.js"));
            }
            _ => panic!("expected Render command"),
        }
    }

    #[test]
    fn parse_gates() {
        let cli = Cli::parse_from(["gatesketch", "gates", "adder.json"]);
        match cli.command {
            Command::Gates(ref args) => assert_eq!(args.design, "adder.json"),
            _ => panic!("expected Gates command"),
        }
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::parse_from([
            "gatesketch",
            "--quiet",
            "--config",
            "/tmp/g.toml",
            "gates",
            "a.json",
        ]);
        assert!(cli.quiet);
        assert!(!cli.verbose);
        assert_eq!(cli.config.as_deref(), Some("/tmp/g.toml"));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["gatesketch", "-q", "-v", "gates", "a.json"]);
        assert!(result.is_err());
    }

    #[test]
    fn flags_pick_log_directive() {
        let mut global = GlobalArgs {
            quiet: false,
            verbose: false,
            config: None,
        };
        assert_eq!(global.log_directive(), None);
        global.verbose = true;
        assert_eq!(global.log_directive(), Some("debug"));
        global.quiet = true;
        assert_eq!(global.log_directive(), Some("error"));
    }
}
