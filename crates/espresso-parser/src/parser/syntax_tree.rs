use crate::arena::{Node, NodeArena, NodeId};
use crate::limit::LimitTracker;
use crate::line_index::LineIndex;
use crate::parser::Parser;
use crate::Error;

use std::fmt;
use triomphe::Arc;

/// The outcome of a parse: a complete tree, or at least one located
/// error. There is no third state and no partial tree.
#[derive(Debug, Clone)]
pub enum ParseResult {
    Success(SyntaxTree),
    Failure(ParseFailure),
}

impl ParseResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ParseResult::Success(_))
    }

    pub fn ok(self) -> Option<SyntaxTree> {
        match self {
            ParseResult::Success(tree) => Some(tree),
            ParseResult::Failure(_) => None,
        }
    }
}

/// An error with its 1-based source position resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedError {
    pub offset: usize,
    pub line: u32,
    pub column: u32,
    pub message: String,
}

/// A non-empty list of located errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    errors: Vec<LocatedError>,
}

impl ParseFailure {
    pub(crate) fn from_error(source: &str, error: Error) -> Self {
        let line_index = LineIndex::new(source);
        let position = line_index.position(error.index());
        Self {
            errors: vec![LocatedError {
                offset: error.index(),
                line: position.line,
                column: position.column,
                message: error.message().to_string(),
            }],
        }
    }

    /// The located errors, in source order. Never empty.
    pub fn errors(&self) -> &[LocatedError] {
        &self.errors
    }

    /// Render the failure for humans: one error per line, each formatted
    /// as `[<path>:]<line>:<column>: <message>`.
    pub fn format_message(&self, path: Option<&str>) -> String {
        let mut out = String::new();
        for error in &self.errors {
            if let Some(path) = path {
                out.push_str(path);
                out.push(':');
            }
            out.push_str(&format!("{}:{}: {}\n", error.line, error.column, error.message));
        }
        out
    }
}

#[derive(Debug)]
struct TreeData {
    source: String,
    arena: NodeArena,
    root: NodeId,
    recursion_limit: LimitTracker,
}

/// A successfully parsed compilation unit.
///
/// The tree owns the arena and the source text; node handles returned
/// from it are indices into that arena and stay valid as long as any
/// clone of the tree is alive. Cloning is cheap — the payload is
/// immutable and shared.
#[derive(Clone)]
pub struct SyntaxTree {
    data: Arc<TreeData>,
}

impl SyntaxTree {
    pub(crate) fn new(
        source: String,
        arena: NodeArena,
        root: NodeId,
        recursion_limit: LimitTracker,
    ) -> Self {
        Self {
            data: Arc::new(TreeData {
                source,
                arena,
                root,
                recursion_limit,
            }),
        }
    }

    /// Handle of the root node: the compilation unit, or the module
    /// declaration for a `module-info` source.
    pub fn root(&self) -> NodeId {
        self.data.root
    }

    /// Read a node's fixed fields.
    pub fn node(&self, id: NodeId) -> Node {
        self.data.arena.node(id)
    }

    /// A node's children in source order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.data.arena.children(id)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.data.arena.node(id).parent()
    }

    /// The source text a node spans.
    pub fn text(&self, id: NodeId) -> &str {
        let node = self.data.arena.node(id);
        &self.data.source[node.start()..node.end()]
    }

    pub fn source(&self) -> &str {
        &self.data.source
    }

    pub fn node_count(&self) -> usize {
        self.data.arena.len()
    }

    /// Build a position mapper for this tree's source. Construction is
    /// O(source); lookups are O(log lines).
    pub fn line_index(&self) -> LineIndex {
        LineIndex::new(&self.data.source)
    }

    /// Recursion usage observed while parsing: `high` is the high-water
    /// mark, `limit` the configured cap.
    pub fn recursion_limit(&self) -> LimitTracker {
        self.data.recursion_limit
    }

    /// Pre-order walk of the subtree rooted at `id`, including `id`.
    pub fn descendants(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut stack = vec![id];
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            let children = self.children(next);
            stack.extend(children.iter().rev().copied());
            Some(next)
        })
    }

    /// Apply an edit and re-parse. The arena is recycled through
    /// [`NodeArena::reset`], keeping its capacity; the parse itself is a
    /// full parse of the edited text.
    pub fn reparse(self, edit: &EditRange) -> ParseResult {
        let data = match Arc::try_unwrap(self.data) {
            Ok(data) => data,
            Err(shared) => TreeData {
                source: shared.source.clone(),
                arena: NodeArena::new(),
                root: shared.root,
                recursion_limit: shared.recursion_limit,
            },
        };

        let splice_start = edit.start_offset.min(data.source.len());
        let splice_end = (splice_start + edit.old_length).min(data.source.len());

        let mut source =
            String::with_capacity(data.source.len() - (splice_end - splice_start) + edit.new_text.len());
        source.push_str(&data.source[..splice_start]);
        source.push_str(&edit.new_text);
        source.push_str(&data.source[splice_end..]);

        Parser::new(&source)
            .recursion_limit(data.recursion_limit.limit)
            .with_arena(data.arena)
            .parse()
    }
}

impl fmt::Debug for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn render(
            tree: &SyntaxTree,
            f: &mut fmt::Formatter<'_>,
            id: NodeId,
            depth: usize,
        ) -> fmt::Result {
            let node = tree.node(id);
            writeln!(
                f,
                "{:indent$}{:?}@{}..{}",
                "",
                node.kind(),
                node.start(),
                node.end(),
                indent = depth * 2
            )?;
            for &child in tree.children(id) {
                render(tree, f, child, depth + 1)?;
            }
            Ok(())
        }

        render(self, f, self.root(), 0)
    }
}

/// A pending source edit: `old_length` bytes at `start_offset` are
/// replaced by `new_text`. Accepted by [`SyntaxTree::reparse`], which
/// currently re-parses the whole edited source; the shape exists so a
/// future incremental path does not change the interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRange {
    pub start_offset: usize,
    pub old_length: usize,
    pub new_length: usize,
    pub new_text: String,
}
