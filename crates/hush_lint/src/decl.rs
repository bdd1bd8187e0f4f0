//! The declaration structure handed over by the attribution pass.
//!
//! Only what the lint engine needs survives here: spans, suppression
//! annotations, the deprecation marker, and nesting. Statements and
//! expressions collapse into [`Node::Other`], which may still contain local
//! declarations.

use hush_source::Span;
use std::fmt;

/// Identity of a declaration within one compilation.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct DeclId(u32);

impl DeclId {
    /// Creates a `DeclId` from a raw `u32` value.
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw `u32` value.
    pub fn as_raw(self) -> u32 {
        self.0
    }
}

/// The closed set of declaration kinds that can carry lint annotations.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum DeclKind {
    /// A module declaration.
    Module,
    /// A package declaration.
    Package,
    /// A class, interface, enum or record.
    Class,
    /// A method or constructor.
    Method,
    /// A field, parameter or local variable.
    Variable,
}

impl DeclKind {
    /// Returns `true` for the kinds that can appear at the top level of a file.
    pub fn is_top_level(self) -> bool {
        matches!(self, DeclKind::Module | DeclKind::Package | DeclKind::Class)
    }
}

impl fmt::Display for DeclKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DeclKind::Module => "module",
            DeclKind::Package => "package",
            DeclKind::Class => "class",
            DeclKind::Method => "method",
            DeclKind::Variable => "variable",
        })
    }
}

/// Lint-relevant annotation data attached to a declaration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeclAnnotations {
    /// Tokens of the declaration's suppression annotation, in source order.
    pub suppress_warnings: Vec<String>,
    /// Whether the declaration is itself marked deprecated.
    pub deprecated: bool,
}

/// A declaration: identity, name, extent, annotations and nested structure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decl {
    /// Identity of the declaration.
    pub id: DeclId,
    /// Simple name, used when reporting on the declaration.
    pub name: String,
    /// Lexical extent, starting at the declaration's first token.
    pub span: Span,
    /// Suppression annotations and deprecation marker.
    pub annotations: DeclAnnotations,
    /// Nested declarations and bodies, in source order.
    pub children: Vec<Node>,
}

impl Decl {
    /// Creates a declaration with no annotations and no children.
    pub fn new(id: DeclId, name: impl Into<String>, span: Span) -> Self {
        Self {
            id,
            name: name.into(),
            span,
            annotations: DeclAnnotations::default(),
            children: Vec::new(),
        }
    }

    /// Adds suppression tokens to the declaration's annotation.
    pub fn suppressing<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.annotations
            .suppress_warnings
            .extend(tokens.into_iter().map(Into::into));
        self
    }

    /// Marks the declaration deprecated.
    pub fn deprecated(mut self) -> Self {
        self.annotations.deprecated = true;
        self
    }

    /// Appends a nested node.
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }
}

/// A node of the attributed tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// A module declaration.
    Module(Decl),
    /// A package declaration.
    Package(Decl),
    /// A class declaration.
    Class(Decl),
    /// A method declaration.
    Method(Decl),
    /// A variable declaration.
    Variable(Decl),
    /// Any non-declaration structure (a body, statement or expression).
    Other(Vec<Node>),
}

impl Node {
    /// Returns the declaration kind and the declaration, or `None` for [`Node::Other`].
    pub fn as_decl(&self) -> Option<(DeclKind, &Decl)> {
        match self {
            Node::Module(d) => Some((DeclKind::Module, d)),
            Node::Package(d) => Some((DeclKind::Package, d)),
            Node::Class(d) => Some((DeclKind::Class, d)),
            Node::Method(d) => Some((DeclKind::Method, d)),
            Node::Variable(d) => Some((DeclKind::Variable, d)),
            Node::Other(_) => None,
        }
    }

    /// Returns the nested nodes.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Module(d)
            | Node::Package(d)
            | Node::Class(d)
            | Node::Method(d)
            | Node::Variable(d) => &d.children,
            Node::Other(children) => children,
        }
    }

    /// Visits every declaration in this subtree in source order, outermost first.
    pub fn for_each_decl<'a>(&'a self, f: &mut impl FnMut(DeclKind, &'a Decl)) {
        if let Some((kind, decl)) = self.as_decl() {
            f(kind, decl);
        }
        for child in self.children() {
            child.for_each_decl(f);
        }
    }
}
