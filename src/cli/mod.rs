//! CLI argument parsing for sspc.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// sspc: compile server-side page templates into response-building modules.
///
/// A template is markup with embedded tags:
/// - `<%@ ... %>` adds to the module's imports
/// - `<%! ... %>` adds member declarations to the generated type
/// - `<%= ... %>` appends an expression's value to the response
/// - `<% ... %>` inserts a statement into the request handler
#[derive(Parser, Debug)]
#[command(name = "sspc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for sspc.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile one template into a generated module.
    ///
    /// Reads `<product>.<template_extension>` and atomically writes
    /// `<product>.<generated_extension>`. The product name comes from
    /// `--product` or the `PRODUCT_NAME` environment variable.
    Compile(CompileArgs),

    /// Compile every matching template in a directory.
    ///
    /// Each template's file stem is its product name. Every template is
    /// compiled independently; the command fails if any of them failed.
    Batch(BatchArgs),

    /// Show how a template is translated without writing anything.
    Inspect(InspectArgs),
}

/// Options shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Directory holding the templates (default: current directory).
    #[arg(short, long, default_value = ".")]
    pub dir: PathBuf,

    /// Config file (default: `<dir>/sspc.yaml` if present).
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Options for commands that write generated modules.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Directory to write generated modules to (default: the template directory).
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Skeleton file overriding the configured or built-in one.
    #[arg(long)]
    pub skeleton: Option<PathBuf>,

    /// Append one NDJSON event per translation to this file.
    #[arg(long)]
    pub event_log: Option<PathBuf>,

    /// Suppress progress messages.
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the `compile` command.
#[derive(Parser, Debug)]
pub struct CompileArgs {
    /// Product name (default: `$PRODUCT_NAME`).
    #[arg(short, long)]
    pub product: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Print the generated module to stdout instead of writing it.
    #[arg(long)]
    pub stdout: bool,
}

/// Arguments for the `batch` command.
#[derive(Parser, Debug)]
pub struct BatchArgs {
    /// Glob selecting template file names (default: `*.<template_extension>`).
    #[arg(long)]
    pub pattern: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Arguments for the `inspect` command.
#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// Product name (default: `$PRODUCT_NAME`).
    #[arg(short, long)]
    pub product: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,

    /// Print the translation as JSON.
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_compile() {
        let cli = Cli::try_parse_from([
            "sspc", "compile", "--product", "Home", "--dir", "pages", "--out-dir", "gen", "-q",
        ])
        .unwrap();
        match cli.command {
            Command::Compile(args) => {
                assert_eq!(args.product.as_deref(), Some("Home"));
                assert_eq!(args.common.dir, PathBuf::from("pages"));
                assert_eq!(args.output.out_dir, Some(PathBuf::from("gen")));
                assert!(args.output.quiet);
                assert!(!args.stdout);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_compile_defaults() {
        let cli = Cli::try_parse_from(["sspc", "compile"]).unwrap();
        match cli.command {
            Command::Compile(args) => {
                assert!(args.product.is_none());
                assert_eq!(args.common.dir, PathBuf::from("."));
                assert!(args.common.config.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_batch_pattern() {
        let cli = Cli::try_parse_from(["sspc", "batch", "--pattern", "*.page"]).unwrap();
        match cli.command {
            Command::Batch(args) => assert_eq!(args.pattern.as_deref(), Some("*.page")),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_inspect_json() {
        let cli = Cli::try_parse_from(["sspc", "inspect", "-p", "Home", "--json"]).unwrap();
        match cli.command {
            Command::Inspect(args) => {
                assert_eq!(args.product.as_deref(), Some("Home"));
                assert!(args.json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
