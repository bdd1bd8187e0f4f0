//! Declaration-tree fixtures.
//!
//! A fixture is a TOML description of what the parse and attribution passes
//! of a compiler would hand to the lint engine: source files, their nested
//! declarations with suppression annotations, and positions to query.
//!
//! ```toml
//! [[file]]
//! path = "Widget.java"
//!
//! [[file.decl]]
//! kind = "class"
//! name = "Widget"
//! start = 0
//! end = 120
//! suppress = ["unchecked"]
//!
//! [[file.decl.decl]]
//! kind = "method"
//! name = "render"
//! start = 40
//! end = 80
//! deprecated = true
//!
//! [[query]]
//! file = "Widget.java"
//! pos = 50
//! categories = ["unchecked", "deprecation"]
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use hush_lint::{CategorySet, Decl, DeclId, LintState, Node};
use hush_source::{FileId, Pos, Span};
use serde::Deserialize;

/// Errors that can occur while loading a fixture.
#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    /// The fixture file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The fixture is not valid TOML or does not match the schema.
    #[error("fixture parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// The fixture is well-formed but describes an impossible program.
    #[error("invalid fixture: {0}")]
    Invalid(String),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFixture {
    #[serde(default, rename = "file")]
    files: Vec<RawFile>,
    #[serde(default, rename = "query")]
    queries: Vec<RawQuery>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFile {
    path: String,
    #[serde(default, rename = "decl")]
    decls: Vec<RawDecl>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum RawKind {
    Module,
    Package,
    Class,
    Method,
    Variable,
    /// A statement or expression body: no state of its own, only children.
    Block,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDecl {
    kind: RawKind,
    #[serde(default)]
    name: String,
    start: Option<Pos>,
    end: Option<Pos>,
    #[serde(default)]
    suppress: Vec<String>,
    #[serde(default)]
    deprecated: bool,
    /// Categories an attribution pass force-enables inside this declaration.
    #[serde(default)]
    force_enable: Vec<String>,
    /// Categories an attribution pass force-suppresses inside this declaration.
    #[serde(default)]
    force_suppress: Vec<String>,
    /// Top-level only: parsed but never attributed.
    #[serde(default)]
    pending: bool,
    #[serde(default, rename = "decl")]
    children: Vec<RawDecl>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawQuery {
    file: String,
    pos: Pos,
    #[serde(default)]
    categories: Vec<String>,
}

/// A top-level declaration of a fixture file.
#[derive(Debug)]
pub struct TopLevel {
    /// The declaration tree.
    pub node: Node,
    /// Its span, as reported by the parse pass.
    pub span: Span,
    /// Whether attribution is skipped for it.
    pub pending: bool,
}

/// A source file of a fixture.
#[derive(Debug)]
pub struct FixtureFile {
    /// Identifier assigned in fixture order.
    pub id: FileId,
    /// Display path.
    pub path: String,
    /// Top-level declarations, in source order.
    pub top_level: Vec<TopLevel>,
}

/// A position query.
#[derive(Debug)]
pub struct Query {
    /// File being queried.
    pub file: FileId,
    /// Byte offset being queried.
    pub pos: Pos,
    /// Category tokens to check; empty means "whatever is suppressed there".
    pub categories: Vec<String>,
}

#[derive(Debug, Default)]
struct Overrides {
    enable: Vec<String>,
    suppress: Vec<String>,
}

/// A loaded and validated fixture.
#[derive(Debug)]
pub struct Fixture {
    /// Source files, indexed by their [`FileId`].
    pub files: Vec<FixtureFile>,
    /// Position queries, in fixture order.
    pub queries: Vec<Query>,
    names: HashMap<DeclId, String>,
    overrides: HashMap<DeclId, Overrides>,
}

impl Fixture {
    /// Reads and validates the fixture at `path`.
    pub fn load(path: &Path) -> Result<Self, FixtureError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parses and validates a fixture from TOML text.
    pub fn parse(content: &str) -> Result<Self, FixtureError> {
        let raw: RawFixture = toml::from_str(content)?;
        let mut builder = Builder::default();

        let mut files = Vec::with_capacity(raw.files.len());
        for (i, file) in raw.files.iter().enumerate() {
            if files.iter().any(|f: &FixtureFile| f.path == file.path) {
                return Err(invalid(format!("file '{}' listed twice", file.path)));
            }
            let id = FileId::from_raw(i as u32);
            let mut top_level = Vec::with_capacity(file.decls.len());
            check_siblings(&file.decls, &file.path)?;
            for decl in &file.decls {
                if !matches!(decl.kind, RawKind::Module | RawKind::Package | RawKind::Class) {
                    return Err(invalid(format!(
                        "'{}' in {}: only modules, packages and classes can be top-level",
                        decl.name, file.path
                    )));
                }
                let node = builder.node(decl, id, None)?;
                let span = span_of(decl, id)?;
                top_level.push(TopLevel {
                    node,
                    span,
                    pending: decl.pending,
                });
            }
            files.push(FixtureFile {
                id,
                path: file.path.clone(),
                top_level,
            });
        }

        let queries = raw
            .queries
            .into_iter()
            .map(|query| -> Result<Query, FixtureError> {
                let file = files
                    .iter()
                    .find(|f| f.path == query.file)
                    .ok_or_else(|| invalid(format!("query names unknown file '{}'", query.file)))?;
                Ok(Query {
                    file: file.id,
                    pos: query.pos,
                    categories: query.categories,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            files,
            queries,
            names: builder.names,
            overrides: builder.overrides,
        })
    }

    /// Returns the display path of `file`.
    pub fn path(&self, file: FileId) -> &str {
        self.files
            .get(file.as_raw() as usize)
            .map_or("<unknown>", |f| f.path.as_str())
    }

    /// Returns the name of declaration `id`.
    pub fn name(&self, id: DeclId) -> &str {
        self.names.get(&id).map_or("<unknown>", String::as_str)
    }

    /// Derives the state inside `decl`: its annotations, then any forced
    /// enables and suppressions the fixture attaches to it.
    pub fn derive(&self, parent: &Arc<LintState>, decl: &Decl) -> Arc<LintState> {
        let state = parent.augmented(decl);
        let Some(overrides) = self.overrides.get(&decl.id) else {
            return state;
        };
        let registry = state.registry();
        let lookup = |tokens: &[String]| -> CategorySet {
            tokens.iter().filter_map(|t| registry.lookup(t)).collect()
        };
        let enable = lookup(overrides.enable.as_slice());
        let suppress = lookup(overrides.suppress.as_slice());
        let state = if enable.is_empty() { state } else { state.enable(enable) };
        if suppress.is_empty() {
            state
        } else {
            state.suppress(suppress)
        }
    }
}

#[derive(Default)]
struct Builder {
    next: u32,
    names: HashMap<DeclId, String>,
    overrides: HashMap<DeclId, Overrides>,
}

impl Builder {
    fn node(
        &mut self,
        raw: &RawDecl,
        file: FileId,
        parent: Option<Span>,
    ) -> Result<Node, FixtureError> {
        if raw.pending && parent.is_some() {
            return Err(invalid(format!(
                "'{}': only top-level declarations can be pending",
                raw.name
            )));
        }
        check_siblings(&raw.children, &raw.name)?;

        let wrap: fn(Decl) -> Node = match raw.kind {
            RawKind::Module => Node::Module,
            RawKind::Package => Node::Package,
            RawKind::Class => Node::Class,
            RawKind::Method => Node::Method,
            RawKind::Variable => Node::Variable,
            RawKind::Block => return self.block(raw, file, parent),
        };

        let span = span_of(raw, file)?;
        if let Some(parent) = parent {
            if !parent.contains_span(&span) {
                return Err(invalid(format!(
                    "'{}' at {}..{} lies outside its enclosing declaration",
                    raw.name, span.start, span.end
                )));
            }
        }

        let id = DeclId::from_raw(self.next);
        self.next += 1;
        self.names.insert(id, raw.name.clone());
        if !raw.force_enable.is_empty() || !raw.force_suppress.is_empty() {
            self.overrides.insert(
                id,
                Overrides {
                    enable: raw.force_enable.clone(),
                    suppress: raw.force_suppress.clone(),
                },
            );
        }

        let mut decl =
            Decl::new(id, raw.name.as_str(), span).suppressing(raw.suppress.iter().cloned());
        if raw.deprecated {
            decl = decl.deprecated();
        }
        for child in &raw.children {
            decl = decl.with_child(self.node(child, file, Some(span))?);
        }

        Ok(wrap(decl))
    }

    fn block(
        &mut self,
        raw: &RawDecl,
        file: FileId,
        parent: Option<Span>,
    ) -> Result<Node, FixtureError> {
        let annotated = !raw.suppress.is_empty()
            || raw.deprecated
            || !raw.force_enable.is_empty()
            || !raw.force_suppress.is_empty();
        if annotated || raw.start.is_some() || raw.end.is_some() {
            return Err(invalid(
                "blocks carry neither spans nor annotations".to_string(),
            ));
        }
        let children = raw
            .children
            .iter()
            .map(|c| self.node(c, file, parent))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Node::Other(children))
    }
}

fn span_of(raw: &RawDecl, file: FileId) -> Result<Span, FixtureError> {
    let (Some(start), Some(end)) = (raw.start, raw.end) else {
        return Err(invalid(format!("'{}' needs both start and end", raw.name)));
    };
    if start > end {
        return Err(invalid(format!(
            "'{}' ends at {end} before it starts at {start}",
            raw.name
        )));
    }
    Ok(Span::new(file, start, end))
}

/// Rejects overlapping sibling declarations, looking through blocks.
fn check_siblings(decls: &[RawDecl], owner: &str) -> Result<(), FixtureError> {
    let mut spans = Vec::new();
    collect_spans(decls, &mut spans);
    spans.sort_by_key(|&(start, _, _)| start);
    for pair in spans.windows(2) {
        let (_, end, name) = pair[0];
        let (start, _, next) = pair[1];
        if start < end {
            return Err(invalid(format!(
                "'{name}' and '{next}' overlap inside '{owner}'"
            )));
        }
    }
    Ok(())
}

fn collect_spans<'a>(decls: &'a [RawDecl], out: &mut Vec<(Pos, Pos, &'a str)>) {
    for raw in decls {
        match (raw.kind, raw.start, raw.end) {
            (RawKind::Block, _, _) => collect_spans(&raw.children, out),
            (_, Some(start), Some(end)) => out.push((start, end, raw.name.as_str())),
            _ => {}
        }
    }
}

fn invalid(message: String) -> FixtureError {
    FixtureError::Invalid(message)
}
