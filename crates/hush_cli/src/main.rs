//! Hush CLI: drive the lint configuration engine from declaration fixtures.
//!
//! Provides `hush check` to answer "is category X active here" queries for a
//! fixture and report unnecessary suppressions, and `hush categories` to list
//! the category catalog.

#![warn(missing_docs)]

mod categories;
mod check;
mod fixture;

use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

/// Hush: lint configuration and suppression resolution.
#[derive(Parser, Debug)]
#[command(name = "hush", version, about = "Lint configuration and suppression resolution")]
pub struct Cli {
    /// Suppress all output except results and errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a custom `hush.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve queries and unnecessary suppressions for a fixture.
    Check(CheckArgs),
    /// List every lint category with its tier and suppression behavior.
    Categories,
}

/// Arguments for the `hush check` subcommand.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Declaration-tree fixture (TOML).
    pub fixture: PathBuf,

    /// Lint options: bare `--lint`, or `--lint:all`, `--lint:none`,
    /// `--lint:a,-b` (also accepted as `--lint=...`). Repeatable.
    #[arg(
        long = "lint",
        value_name = "CATEGORIES",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "",
        action = ArgAction::Append
    )]
    pub lint: Vec<String>,

    /// Output format for query results and diagnostics.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

impl CheckArgs {
    /// Returns the `--lint` options in the form `hush_config` parses.
    pub fn lint_flags(&self) -> Vec<String> {
        self.lint
            .iter()
            .map(|value| {
                if value.is_empty() {
                    "--lint".to_string()
                } else {
                    format!("--lint:{value}")
                }
            })
            .collect()
    }
}

/// Output format for `hush check`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-essential output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Optional path to a custom config file.
    pub config: Option<PathBuf>,
}

/// Rewrites compiler-style `--lint:...` arguments to `--lint=...`.
fn normalize_args(args: impl IntoIterator<Item = String>) -> Vec<String> {
    args.into_iter()
        .map(|arg| match arg.strip_prefix("--lint:") {
            Some(rest) => format!("--lint={rest}"),
            None => arg,
        })
        .collect()
}

fn init_tracing(global: &GlobalArgs) {
    let default = if global.verbose {
        "debug"
    } else if global.quiet {
        "error"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() {
    let cli = Cli::parse_from(normalize_args(std::env::args()));

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        config: cli.config,
    };
    init_tracing(&global);

    let result = match cli.command {
        Command::Check(ref args) => check::run(args, &global),
        Command::Categories => categories::run(&global),
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

    fn parse(args: &[&str]) -> Cli {
        Cli::parse_from(normalize_args(args.iter().map(|s| s.to_string())))
    }

    #[test]
    fn parse_check_default() {
        let cli = parse(&["hush", "check", "fixture.toml"]);
        match cli.command {
            Command::Check(ref args) => {
                assert_eq!(args.fixture, PathBuf::from("fixture.toml"));
                assert!(args.lint.is_empty());
                assert_eq!(args.format, ReportFormat::Text);
            }
            _ => panic!("expected Check command"),
        }
    }

    #[test]
    fn parse_check_with_lint_options() {
        let cli = parse(&[
            "hush",
            "check",
            "--lint",
            "fixture.toml",
            "--lint:none,cast",
            "--lint=-removal",
            "--format",
            "json",
        ]);
        match cli.command {
            Command::Check(ref args) => {
                assert_eq!(args.fixture, PathBuf::from("fixture.toml"));
                assert_eq!(
                    args.lint_flags(),
                    vec!["--lint", "--lint:none,cast", "--lint:-removal"]
                );
                assert_eq!(args.format, ReportFormat::Json);
            }
            _ => panic!("expected Check command"),
        }
    }

    #[test]
    fn parse_categories() {
        let cli = parse(&["hush", "categories"]);
        assert!(matches!(cli.command, Command::Categories));
    }

    #[test]
    fn parse_global_flags() {
        let cli = parse(&["hush", "--quiet", "--config", "ci/hush.toml", "categories"]);
        assert!(cli.quiet);
        assert!(!cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("ci/hush.toml")));
    }

    #[test]
    fn normalizes_compiler_style_lint_flags() {
        let args = normalize_args(["--lint:all".to_string(), "--lint".to_string(), "x".to_string()]);
        assert_eq!(args, vec!["--lint=all", "--lint", "x"]);
    }
}
