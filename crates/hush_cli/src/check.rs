//! `hush check`: run a fixture through the lint engine.
//!
//! 1. Resolve lint settings (`hush.toml`, then `--lint` flags on top)
//! 2. Load the fixture
//! 3. Parse phase: register every file's top-level declaration spans
//! 4. Attribution phase: populate every non-pending top-level declaration
//! 5. Answer each query with a validating read
//! 6. Report unnecessary suppressions and disabling options

use std::path::Path;

use hush_config::{LintSettings, CONFIG_FILE_NAME};
use hush_diagnostics::{Diagnostic, DiagnosticSink};
use hush_lint::{Category, Compilation};
use hush_source::Pos;
use serde::Serialize;

use crate::fixture::{Fixture, Query};
use crate::{CheckArgs, GlobalArgs, ReportFormat};

/// How a category stands at a queried position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Warnings of the category would be reported.
    Enabled,
    /// An enclosing declaration suppresses the category.
    Suppressed,
    /// The category is off by configuration.
    Disabled,
    /// The enclosing top-level declaration is not attributed.
    Pending,
    /// The token names no category.
    Unknown,
}

/// The answer for one category at a query.
#[derive(Debug, Serialize)]
pub struct CategoryReport {
    /// Category token as written in the query.
    pub category: String,
    /// Outcome of the query.
    pub status: Status,
    /// Name of the declaration whose annotation suppresses the category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suppressed_by: Option<String>,
}

/// The answer for one query.
#[derive(Debug, Serialize)]
pub struct QueryReport {
    /// Display path of the queried file.
    pub file: String,
    /// Queried offset.
    pub pos: Pos,
    /// Innermost declaration with its own lint state, if any.
    pub scope: Option<String>,
    /// Per-category answers.
    pub categories: Vec<CategoryReport>,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    queries: &'a [QueryReport],
    diagnostics: &'a [Diagnostic],
}

/// Runs the `hush check` command.
///
/// Returns exit code 0 unless an error diagnostic was produced.
pub fn run(args: &CheckArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let settings = resolve_settings(args, global)?;
    let fixture = Fixture::load(&args.fixture)?;
    tracing::debug!(
        files = fixture.files.len(),
        queries = fixture.queries.len(),
        "loaded fixture"
    );

    let compilation = analyze(&fixture, settings);
    let reports: Vec<QueryReport> = fixture
        .queries
        .iter()
        .map(|query| answer(&compilation, &fixture, query))
        .collect();

    let sink = DiagnosticSink::new();
    for diag in compilation.unnecessary_suppressions() {
        sink.emit(diag);
    }
    for diag in compilation.unnecessary_suppression_options() {
        sink.emit(diag);
    }
    let diagnostics = sink.diagnostics();

    match args.format {
        ReportFormat::Text => {
            for report in &reports {
                println!("{}", render_query(report));
            }
            for diag in &diagnostics {
                eprintln!("{}", render_diagnostic(diag, &fixture));
            }
            if !global.quiet {
                eprintln!(
                    "   Result: {} queries, {} warning(s)",
                    reports.len(),
                    sink.warning_count()
                );
            }
        }
        ReportFormat::Json => {
            let output = JsonOutput {
                queries: &reports,
                diagnostics: &diagnostics,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    if sink.has_errors() {
        Ok(1)
    } else {
        Ok(0)
    }
}

/// Merges the configuration file with the command-line `--lint` flags.
///
/// An explicit `--config` path must exist; otherwise `hush.toml` next to the
/// fixture is used when present.
fn resolve_settings(
    args: &CheckArgs,
    global: &GlobalArgs,
) -> Result<LintSettings, Box<dyn std::error::Error>> {
    let base = match &global.config {
        Some(path) => {
            let content = std::fs::read_to_string(path)?;
            hush_config::load_config_from_str(&content)?.lint
        }
        None => {
            let dir = args.fixture.parent().unwrap_or(Path::new("."));
            if dir.join(CONFIG_FILE_NAME).is_file() {
                hush_config::load_config(dir)?.lint
            } else {
                LintSettings::default()
            }
        }
    };
    Ok(hush_config::parse_lint_flags(base, args.lint_flags())?)
}

/// Runs the parse and attribution phases of `fixture`.
pub fn analyze(fixture: &Fixture, settings: LintSettings) -> Compilation {
    let mut compilation = Compilation::new(settings);
    for file in &fixture.files {
        let spans = file.top_level.iter().map(|t| t.span).collect();
        compilation.file_parsed(file.id, spans);
    }
    for file in &fixture.files {
        for top in file.top_level.iter().filter(|t| !t.pending) {
            compilation
                .declaration_attributed_with(&top.node, |parent, decl| fixture.derive(parent, decl));
        }
    }
    compilation
}

/// Answers `query` with validating reads, so that suppressions it relies on
/// count as used.
pub fn answer(compilation: &Compilation, fixture: &Fixture, query: &Query) -> QueryReport {
    let registry = compilation.registry();
    let state = compilation.lint_at(query.file, query.pos);

    let queried: Vec<(String, Option<Category>)> = if query.categories.is_empty() {
        state
            .as_ref()
            .map(|s| s.suppressed().categories())
            .into_iter()
            .flatten()
            .map(|c| (c.token().to_string(), Some(c)))
            .collect()
    } else {
        query
            .categories
            .iter()
            .map(|t| (t.clone(), registry.lookup(t)))
            .collect()
    };

    let categories = queried
        .into_iter()
        .map(|(token, category)| {
            let (status, suppressed_by) = match (&state, category) {
                (_, None) => (Status::Unknown, None),
                (None, Some(_)) => (Status::Pending, None),
                (Some(state), Some(c)) => {
                    if state.is_enabled(c, true) {
                        (Status::Enabled, None)
                    } else if state.is_suppressed(c, false) {
                        let origin = state.suppression_origin(c);
                        (Status::Suppressed, origin.map(|d| fixture.name(d).to_string()))
                    } else {
                        (Status::Disabled, None)
                    }
                }
            };
            CategoryReport {
                category: token,
                status,
                suppressed_by,
            }
        })
        .collect();

    QueryReport {
        file: fixture.path(query.file).to_string(),
        pos: query.pos,
        scope: state
            .as_ref()
            .and_then(|s| s.scope())
            .map(|d| fixture.name(d).to_string()),
        categories,
    }
}

fn render_query(report: &QueryReport) -> String {
    let mut out = format!("{}:{}", report.file, report.pos);
    if let Some(scope) = &report.scope {
        out.push_str(&format!(" in '{scope}'"));
    }
    for c in &report.categories {
        let status = match c.status {
            Status::Enabled => "enabled",
            Status::Suppressed => "suppressed",
            Status::Disabled => "disabled",
            Status::Pending => "pending",
            Status::Unknown => "unknown category",
        };
        out.push_str(&format!("\n  {}: {status}", c.category));
        if let Some(by) = &c.suppressed_by {
            out.push_str(&format!(" by '{by}'"));
        }
    }
    out
}

fn render_diagnostic(diag: &Diagnostic, fixture: &Fixture) -> String {
    match diag.span {
        Some(span) => format!("{}:{}: {diag}", fixture.path(span.file), span.start),
        None => diag.to_string(),
    }
}
