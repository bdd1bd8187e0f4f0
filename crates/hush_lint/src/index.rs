//! Mapping from source positions to the lint state that applies there.
//!
//! Each file gets a sparse tree of [`LintRange`]s rooted at a
//! [`Span::MAXIMAL`] range holding the root state. A node exists only where
//! a declaration's state differs from its enclosing one, so the tree grows
//! with the number of annotated declarations, not the number of
//! declarations.
//!
//! Trees fill in one top-level declaration at a time. Between parsing and
//! attribution a top-level declaration is *pending*: positions inside it
//! have no known state yet and [`PositionIndex::lint_at`] returns `None`
//! for them.

use crate::decl::{Decl, Node};
use crate::state::LintState;
use hush_source::{FileId, Pos, Span};
use std::collections::HashMap;
use std::sync::Arc;

/// A lexical range together with the lint state that applies inside it.
#[derive(Clone, Debug)]
pub struct LintRange {
    span: Span,
    state: Arc<LintState>,
    children: Vec<LintRange>,
}

impl LintRange {
    fn new(span: Span, state: Arc<LintState>, children: Vec<LintRange>) -> Self {
        debug_assert!(
            children.iter().all(|c| span.contains_span(&c.span)),
            "lint range {span:?} does not contain all of its children"
        );
        Self {
            span,
            state,
            children,
        }
    }

    /// Returns the range's span.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Returns the state that applies inside the range.
    pub fn state(&self) -> &Arc<LintState> {
        &self.state
    }

    /// Returns the nested ranges, in source order.
    pub fn children(&self) -> &[LintRange] {
        &self.children
    }

    /// Returns the number of ranges in this subtree, including this one.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(LintRange::node_count).sum::<usize>()
    }

    /// Returns the most specific range in this subtree containing `pos`.
    ///
    /// Falls back to `self` when no child contains `pos`.
    pub fn best_match(&self, pos: Pos) -> &LintRange {
        self.children
            .iter()
            .filter(|c| c.span.contains(pos))
            .map(|c| c.best_match(pos))
            .min_by_key(|r| r.span.len())
            .unwrap_or(self)
    }

    /// Returns `true` if every child lies inside its parent and siblings are
    /// disjoint and sorted, throughout the subtree.
    pub fn is_properly_nested(&self) -> bool {
        let inside = self.children.iter().all(|c| self.span.contains_span(&c.span));
        let disjoint = self
            .children
            .windows(2)
            .all(|w| w[0].span.end <= w[1].span.start && !w[0].span.overlaps(&w[1].span));
        inside && disjoint && self.children.iter().all(LintRange::is_properly_nested)
    }
}

/// Per-file bookkeeping: the range tree and the still-pending top-level spans.
#[derive(Debug)]
pub struct FileInfo {
    root: LintRange,
    unmapped: Vec<Span>,
}

impl FileInfo {
    /// Returns the root range of the file.
    pub fn root(&self) -> &LintRange {
        &self.root
    }

    /// Returns the spans of top-level declarations not yet attributed.
    pub fn pending(&self) -> &[Span] {
        &self.unmapped
    }
}

/// Position-to-state index over every file of a compilation.
#[derive(Debug, Default)]
pub struct PositionIndex {
    files: HashMap<FileId, FileInfo>,
}

impl PositionIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a parsed file whose top-level declarations span `decl_spans`.
    ///
    /// # Panics
    ///
    /// Panics if `file` was already registered.
    pub fn on_file_parsed(&mut self, file: FileId, root: Arc<LintState>, decl_spans: Vec<Span>) {
        assert!(
            !self.files.contains_key(&file),
            "file {file:?} was parsed twice"
        );
        tracing::debug!(?file, pending = decl_spans.len(), "registered parsed file");
        self.files.insert(
            file,
            FileInfo {
                root: LintRange::new(Span::MAXIMAL, root, Vec::new()),
                unmapped: decl_spans,
            },
        );
    }

    /// Populates the tree for an attributed top-level declaration using
    /// [`LintState::augmented`] for every nested declaration.
    pub fn on_declaration_attributed(&mut self, node: &Node, parent: &Arc<LintState>) {
        self.on_declaration_attributed_with(node, parent, |state, decl| state.augmented(decl));
    }

    /// Populates the tree for an attributed top-level declaration.
    ///
    /// `derive` computes the state of each nested declaration from the state
    /// enclosing it. A declaration whose derived state equals its parent's
    /// contributes no range.
    ///
    /// # Panics
    ///
    /// Panics if `node` is not a module, package or class, if its file was
    /// never parsed, or if no pending span contains its start.
    pub fn on_declaration_attributed_with<F>(
        &mut self,
        node: &Node,
        parent: &Arc<LintState>,
        derive: F,
    ) where
        F: Fn(&Arc<LintState>, &Decl) -> Arc<LintState>,
    {
        let Some((kind, decl)) = node.as_decl().filter(|(kind, _)| kind.is_top_level()) else {
            panic!("only modules, packages and classes can be top-level declarations");
        };
        let file = decl.span.file;
        let info = self
            .files
            .get_mut(&file)
            .unwrap_or_else(|| {
                panic!("{kind} '{}' attributed before {file:?} was parsed", decl.name)
            });
        let Some(i) = info.unmapped.iter().position(|s| s.contains(decl.span.start)) else {
            panic!(
                "{kind} '{}' at {} is not a pending top-level declaration of {file:?}",
                decl.name, decl.span.start
            );
        };
        info.unmapped.remove(i);

        let ranges = ranges_for(node, parent, &derive);
        let added: usize = ranges.iter().map(LintRange::node_count).sum();
        let children = &mut info.root.children;
        for range in ranges {
            let at = children.partition_point(|c| c.span.start < range.span.start);
            children.insert(at, range);
        }
        tracing::debug!(?file, decl = %decl.name, ranges = added, "populated lint ranges");
    }

    /// Returns the state that applies at `pos` in `file`.
    ///
    /// Returns `None` when `pos` lies inside a top-level declaration that is
    /// not attributed yet, or when `file` was never parsed.
    pub fn lint_at(&self, file: FileId, pos: Pos) -> Option<Arc<LintState>> {
        let Some(info) = self.files.get(&file) else {
            tracing::trace!(?file, "lint lookup in unknown file");
            return None;
        };
        if info.unmapped.iter().any(|s| s.contains(pos)) {
            tracing::trace!(?file, pos, "lint lookup inside a pending declaration");
            return None;
        }
        Some(Arc::clone(&info.root.best_match(pos).state))
    }

    /// Returns the bookkeeping for `file`.
    pub fn file(&self, file: FileId) -> Option<&FileInfo> {
        self.files.get(&file)
    }

    /// Returns `true` if every top-level declaration of `file` has been attributed.
    pub fn is_complete(&self, file: FileId) -> bool {
        self.files.get(&file).is_some_and(|info| info.unmapped.is_empty())
    }
}

fn ranges_for<F>(node: &Node, parent: &Arc<LintState>, derive: &F) -> Vec<LintRange>
where
    F: Fn(&Arc<LintState>, &Decl) -> Arc<LintState>,
{
    match node {
        Node::Module(decl)
        | Node::Package(decl)
        | Node::Class(decl)
        | Node::Method(decl)
        | Node::Variable(decl) => {
            let state = derive(parent, decl);
            if Arc::ptr_eq(&state, parent) || *state == **parent {
                ranges_for_all(&decl.children, parent, derive)
            } else {
                let state = state.scoped_to(decl.id);
                let children = ranges_for_all(&decl.children, &state, derive);
                vec![LintRange::new(decl.span, state, children)]
            }
        }
        Node::Other(children) => ranges_for_all(children, parent, derive),
    }
}

fn ranges_for_all<F>(nodes: &[Node], parent: &Arc<LintState>, derive: &F) -> Vec<LintRange>
where
    F: Fn(&Arc<LintState>, &Decl) -> Arc<LintState>,
{
    nodes
        .iter()
        .flat_map(|n| ranges_for(n, parent, derive))
        .collect()
}
