mod node_kind;
mod syntax_tree;

pub(crate) mod grammar;

use crate::arena::{ArenaMark, NodeArena, NodeId};
use crate::lexer::Lexer;
use crate::limit::LimitTracker;
use crate::Error;
use crate::ErrorKind;
use crate::Token;
use crate::TokenKind;
use crate::T;

use std::time::{Duration, Instant};

pub use node_kind::NodeKind;
pub use syntax_tree::{EditRange, LocatedError, ParseFailure, ParseResult, SyntaxTree};

/// Default security bounds. Each is overridable per parser through the
/// builder methods.
pub(crate) const DEFAULT_MAX_SOURCE_SIZE: usize = 50 * 1024 * 1024;
pub(crate) const DEFAULT_MAX_SOURCE_LENGTH: usize = 10_000_000;
pub(crate) const DEFAULT_TOKEN_LIMIT: usize = 5_000_000;
pub(crate) const DEFAULT_RECURSION_LIMIT: usize = 1_000;
pub(crate) const DEFAULT_PARSE_TIMEOUT: Duration = Duration::from_secs(30);

/// The wall-clock deadline is consulted every this many token
/// consumptions, and additionally on every expression-recursion entry.
const TIMEOUT_CHECK_INTERVAL: usize = 100;

/// Parse Java source text into an index-overlay syntax tree.
///
/// ## Example
///
/// ```rust
/// use espresso_parser::{NodeKind, ParseResult, Parser};
///
/// let source = "
/// package com.example;
///
/// record Point(int x, int y) { }
/// ";
/// let parser = Parser::new(source);
/// let tree = match parser.parse() {
///     ParseResult::Success(tree) => tree,
///     ParseResult::Failure(failure) => panic!("{}", failure.format_message(None)),
/// };
///
/// let root = tree.root();
/// assert_eq!(tree.node(root).kind(), NodeKind::CompilationUnit);
/// ```
///
/// Parsing aborts at the first error: the result is either a complete
/// tree or a single located error, never a partial tree.
#[derive(Debug)]
pub struct Parser<'a> {
    source: &'a str,
    /// The eagerly lexed token vector, terminated by `Eof`. Populated at
    /// the start of `parse()`.
    tokens: Vec<Token<'a>>,
    /// Index of the current token. Never points at a comment token.
    pos: usize,
    /// End offset of the most recently consumed token; node lengths are
    /// finalized against this.
    prev_end: usize,
    arena: NodeArena,
    /// Stack of open composite nodes; the top is the parent for new
    /// allocations.
    parents: Vec<NodeId>,
    /// Comment tokens seen but not yet attached to a node.
    pending_comments: Vec<(TokenKind, usize, usize)>,
    /// Synthesized `>` tokens left over from splitting `>>`/`>>>` in
    /// generic context.
    pending_gt: usize,
    /// Start offset of the next synthesized `>`.
    pending_gt_offset: usize,
    recursion_limit: LimitTracker,
    token_limit: usize,
    max_source_size: usize,
    max_source_length: usize,
    timeout: Duration,
    deadline: Instant,
    consumption_count: usize,
}

impl<'a> Parser<'a> {
    /// Create a new instance of a parser given an input string.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            tokens: Vec::new(),
            pos: 0,
            prev_end: 0,
            arena: NodeArena::new(),
            parents: Vec::new(),
            pending_comments: Vec::new(),
            pending_gt: 0,
            pending_gt_offset: 0,
            recursion_limit: LimitTracker::new(DEFAULT_RECURSION_LIMIT),
            token_limit: DEFAULT_TOKEN_LIMIT,
            max_source_size: DEFAULT_MAX_SOURCE_SIZE,
            max_source_length: DEFAULT_MAX_SOURCE_LENGTH,
            timeout: DEFAULT_PARSE_TIMEOUT,
            deadline: Instant::now() + DEFAULT_PARSE_TIMEOUT,
            consumption_count: 0,
        }
    }

    /// Configure the recursion limit to use while parsing.
    pub fn recursion_limit(mut self, limit: usize) -> Self {
        self.recursion_limit = LimitTracker::new(limit);
        self
    }

    /// Configure the limit on the number of tokens to lex. If an input
    /// document is too big, parsing is aborted.
    pub fn token_limit(mut self, limit: usize) -> Self {
        self.token_limit = limit;
        self
    }

    /// Configure the wall-clock budget for the whole parse. The deadline
    /// is checked every hundred token consumptions and on every
    /// expression-recursion entry.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Configure the maximum accepted input size in bytes.
    pub fn max_source_size(mut self, bytes: usize) -> Self {
        self.max_source_size = bytes;
        self
    }

    /// Configure the maximum accepted input length in characters.
    pub fn max_source_length(mut self, chars: usize) -> Self {
        self.max_source_length = chars;
        self
    }

    pub(crate) fn with_arena(mut self, mut arena: NodeArena) -> Self {
        arena.reset();
        self.arena = arena;
        self
    }

    /// Parse the input. Consumes the parser; the returned tree owns the
    /// arena, so node handles stay valid for the life of the tree.
    pub fn parse(mut self) -> ParseResult {
        let started = Instant::now();
        self.deadline = started + self.timeout;

        if let Err(error) = self.validate_source() {
            return self.fail(started, error);
        }

        let lex_started = Instant::now();
        let lexer = Lexer::new(self.source).with_limit(self.token_limit);
        match lexer.lex() {
            Ok(tokens) => {
                crate::metrics::record_tokenize(lex_started.elapsed(), tokens.len() as u64);
                self.tokens = tokens;
            }
            Err(error) => return self.fail(started, error),
        }

        self.collect_comments();

        match grammar::unit::parse_unit(&mut self) {
            Ok(root) => {
                debug_assert_eq!(
                    self.pending_gt_count(),
                    0,
                    "partially consumed `>` tokens left after parsing"
                );
                crate::metrics::record_parse(
                    started.elapsed(),
                    self.arena.len() as u64,
                    self.arena.byte_size() as u64,
                    false,
                );
                ParseResult::Success(SyntaxTree::new(
                    self.source.to_string(),
                    self.arena,
                    root,
                    self.recursion_limit,
                ))
            }
            Err(error) => self.fail(started, error),
        }
    }

    fn fail(self, started: Instant, error: Error) -> ParseResult {
        crate::metrics::record_parse(
            started.elapsed(),
            self.arena.len() as u64,
            self.arena.byte_size() as u64,
            true,
        );
        ParseResult::Failure(ParseFailure::from_error(self.source, error))
    }

    /// Enforce the source bounds before lexing: reject non-UTF-8 input
    /// upstream, oversized input here, and input with no content at all.
    fn validate_source(&self) -> Result<(), Error> {
        if self.source.len() > self.max_source_size {
            return Err(Error::validation(
                ErrorKind::SourceTooLarge,
                format!(
                    "source size {} exceeds the maximum of {} bytes",
                    self.source.len(),
                    self.max_source_size
                ),
            ));
        }
        if self.source.contains('\u{FFFD}') {
            return Err(Error::validation(
                ErrorKind::InvalidUtf8,
                "source contains U+FFFD replacement characters",
            ));
        }

        let chars = self.source.chars().count();
        if chars > self.max_source_length {
            return Err(Error::validation(
                ErrorKind::SourceTooLarge,
                format!(
                    "source length {} exceeds the maximum of {} characters",
                    chars, self.max_source_length
                ),
            ));
        }
        if self.source.chars().all(char::is_whitespace) {
            return Err(Error::validation(
                ErrorKind::SourceEmpty,
                "source is empty or entirely whitespace",
            ));
        }

        Ok(())
    }

    // ---- token access ------------------------------------------------

    pub(crate) fn current(&self) -> &Token<'a> {
        &self.tokens[self.pos]
    }

    /// Kind of the current token.
    pub(crate) fn peek(&self) -> TokenKind {
        self.current().kind()
    }

    /// Check if the current token is `kind`.
    pub(crate) fn at(&self, kind: TokenKind) -> bool {
        self.peek() == kind
    }

    /// Kind of the `n`-th token ahead, comments skipped; `peek_n(0)` is
    /// the current token.
    pub(crate) fn peek_n(&self, n: usize) -> TokenKind {
        let mut remaining = n;
        let mut i = self.pos;
        loop {
            let token = &self.tokens[i];
            if !token.kind().is_comment() {
                if remaining == 0 {
                    return token.kind();
                }
                remaining -= 1;
            }
            if token.kind() == TokenKind::Eof {
                return TokenKind::Eof;
            }
            i += 1;
        }
    }

    /// Whether the current token can serve as an identifier. Contextual
    /// keywords and `_` qualify; the grammar restricts them further
    /// where it must.
    pub(crate) fn at_identifier(&self) -> bool {
        Self::is_identifier_like(self.peek())
    }

    pub(crate) fn is_identifier_like(kind: TokenKind) -> bool {
        kind == TokenKind::Identifier
            || kind == TokenKind::UnderscoreKw
            || kind.is_contextual_keyword()
    }

    /// Consume the current token. Ticks the consumption counter and
    /// checks the parse deadline at the configured interval.
    pub(crate) fn bump(&mut self) -> Result<Token<'a>, Error> {
        let token = self.current().clone();
        debug_assert!(!token.kind().is_comment(), "bump on a comment token");

        if token.kind() != TokenKind::Eof {
            self.pos += 1;
            self.prev_end = token.end();
        }

        self.consumption_count += 1;
        if self.consumption_count % TIMEOUT_CHECK_INTERVAL == 0 {
            self.check_deadline()?;
        }

        self.collect_comments();
        Ok(token)
    }

    /// Consume the next token if it is `kind`, or error otherwise.
    pub(crate) fn expect(&mut self, kind: TokenKind) -> Result<Token<'a>, Error> {
        if self.at(kind) {
            return self.bump();
        }
        Err(self.unexpected(kind))
    }

    /// Consume the current token as an identifier.
    pub(crate) fn expect_identifier(&mut self) -> Result<Token<'a>, Error> {
        if self.at_identifier() {
            return self.bump();
        }
        Err(self.err("expected an identifier"))
    }

    pub(crate) fn unexpected(&self, expected: TokenKind) -> Error {
        let current = self.current();
        if current.kind() == TokenKind::Eof {
            Error::eof(
                format!("expected {}, got EOF", expected.describe()),
                current.index(),
            )
        } else {
            Error::with_loc(
                format!("expected {}, got `{}`", expected.describe(), current.data()),
                current.data().to_string(),
                current.index(),
            )
        }
    }

    /// Create a parser error at the current token.
    pub(crate) fn err(&self, message: &str) -> Error {
        let current = self.current();
        if current.kind() == TokenKind::Eof {
            Error::eof(message, current.index())
        } else {
            Error::with_loc(message, current.data().to_string(), current.index())
        }
    }

    // ---- security enforcement ---------------------------------------

    /// Record one level of recursion. Statements, types and expressions
    /// all come through here on their recursive entry points.
    pub(crate) fn enter(&mut self) -> Result<(), Error> {
        if self.recursion_limit.check_and_increment() {
            return Err(Error::limit(
                "parser recursion limit reached",
                self.current().index(),
            ));
        }
        Ok(())
    }

    /// Expression recursion is the deepest recursion site, so it
    /// re-checks the deadline on every entry.
    pub(crate) fn enter_expression(&mut self) -> Result<(), Error> {
        self.check_deadline()?;
        self.enter()
    }

    pub(crate) fn exit(&mut self) {
        self.recursion_limit.decrement();
    }

    fn check_deadline(&self) -> Result<(), Error> {
        if Instant::now() >= self.deadline {
            return Err(Error::limit(
                "parse deadline exceeded",
                self.current().index(),
            ));
        }
        Ok(())
    }

    // ---- arena interaction ------------------------------------------

    /// Open a composite node starting at the current token. Pending
    /// comments attach to the enclosing node first, so a comment before
    /// a construct belongs to the construct's parent.
    pub(crate) fn start_node(&mut self, kind: NodeKind) -> NodeId {
        self.flush_comments();
        let start = self.current().index();
        let id = self.arena.allocate(kind, start, 0, self.parents.last().copied());
        self.parents.push(id);
        id
    }

    /// Open the root node. Roots span the entire source, leading
    /// comments included.
    pub(crate) fn start_root(&mut self, kind: NodeKind) -> NodeId {
        debug_assert!(self.parents.is_empty());
        let id = self.arena.allocate(kind, 0, 0, None);
        self.parents.push(id);
        self.flush_comments();
        id
    }

    /// Close a composite node, finalizing its length.
    pub(crate) fn finish_node(&mut self, id: NodeId) {
        let top = self.parents.pop();
        debug_assert_eq!(top, Some(id), "unbalanced start_node/finish_node");
        let start = self.arena.node(id).start();
        self.arena.update_length(id, self.prev_end - start);
    }

    /// Close the root node: flush trailing comments and span the whole
    /// source.
    pub(crate) fn finish_root(&mut self, id: NodeId) {
        self.flush_comments();
        let top = self.parents.pop();
        debug_assert_eq!(top, Some(id), "unbalanced start_root/finish_root");
        debug_assert!(self.parents.is_empty());
        self.arena.update_length(id, self.source.len());
    }

    /// Wrap the most recently completed child of the current parent in a
    /// new node of `kind`. This is how infix and postfix constructs gain
    /// their first operand: `a + b` parses `a`, then re-parents it under
    /// a fresh `BinaryExpression`.
    pub(crate) fn wrap_node(&mut self, kind: NodeKind, child: NodeId) -> NodeId {
        let parent = *self
            .parents
            .last()
            .expect("wrap_node requires an open parent");
        let detached = self.arena.detach_last_child(parent);
        debug_assert_eq!(detached, child, "wrap_node child is not the last child");

        let start = self.arena.node(child).start();
        let id = self.arena.allocate(kind, start, 0, Some(parent));
        self.arena.adopt(id, child);
        self.parents.push(id);
        id
    }

    pub(crate) fn node_kind(&self, id: NodeId) -> NodeKind {
        self.arena.node(id).kind()
    }

    /// Iterate token kinds from the current position, comments skipped.
    /// Ends after yielding `Eof`. Used by the bounded look-ahead scans.
    pub(crate) fn lookahead(&self) -> impl Iterator<Item = TokenKind> + '_ {
        self.tokens[self.pos..]
            .iter()
            .map(|token| token.kind())
            .filter(|kind| !kind.is_comment())
    }

    /// Allocate a leaf node covering exactly the current token, and
    /// consume the token.
    pub(crate) fn leaf(&mut self, kind: NodeKind) -> Result<NodeId, Error> {
        self.flush_comments();
        let token = self.bump()?;
        Ok(self.arena.allocate(
            kind,
            token.index(),
            token.data().len(),
            self.parents.last().copied(),
        ))
    }

    fn collect_comments(&mut self) {
        while self.current().kind().is_comment() {
            let token = self.current();
            self.pending_comments
                .push((token.kind(), token.index(), token.data().len()));
            self.pos += 1;
        }
    }

    fn flush_comments(&mut self) {
        if self.pending_comments.is_empty() {
            return;
        }
        let Some(&parent) = self.parents.last() else {
            return;
        };
        for (kind, start, len) in std::mem::take(&mut self.pending_comments) {
            self.arena
                .allocate(NodeKind::for_comment_token(kind), start, len, Some(parent));
        }
    }

    // ---- speculative parsing ----------------------------------------

    /// Save the parser state for a trial parse. The pending-comment
    /// buffer is snapshotted wholesale: a trial may flush comments into
    /// nodes that the rewind discards, and those comments must come
    /// back.
    pub(crate) fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            pos: self.pos,
            prev_end: self.prev_end,
            pending_gt: self.pending_gt,
            pending_gt_offset: self.pending_gt_offset,
            pending_comments: self.pending_comments.clone(),
            parents: self.parents.len(),
            mark: self.arena.mark(self.parents.last().copied()),
        }
    }

    /// Abandon a trial parse: discard all nodes allocated since the
    /// checkpoint and rewind the token position.
    pub(crate) fn rewind(&mut self, checkpoint: Checkpoint) {
        self.pos = checkpoint.pos;
        self.prev_end = checkpoint.prev_end;
        self.pending_gt = checkpoint.pending_gt;
        self.pending_gt_offset = checkpoint.pending_gt_offset;
        self.pending_comments = checkpoint.pending_comments;
        self.parents.truncate(checkpoint.parents);
        self.arena.restore(checkpoint.mark);
    }

    // ---- the `>` family in generic context --------------------------

    /// Whether a single `>` can be consumed in generic context.
    pub(crate) fn at_generic_gt(&self) -> bool {
        self.pending_gt > 0
            || matches!(self.peek(), T![>] | T![>>] | T![>>>])
    }

    /// Consume one `>` in generic context. `>>` and `>>>` are lexed as
    /// single tokens; the first `>` consumes the token and leaves the
    /// remainder as synthesized pending `>`s with exact offsets.
    pub(crate) fn expect_generic_gt(&mut self) -> Result<(), Error> {
        if self.pending_gt > 0 {
            self.pending_gt -= 1;
            self.prev_end = self.pending_gt_offset + 1;
            self.pending_gt_offset += 1;
            return Ok(());
        }

        match self.peek() {
            T![>] => {
                self.bump()?;
            }
            T![>>] => {
                let token = self.bump()?;
                self.pending_gt = 1;
                self.pending_gt_offset = token.index() + 1;
                self.prev_end = token.index() + 1;
            }
            T![>>>] => {
                let token = self.bump()?;
                self.pending_gt = 2;
                self.pending_gt_offset = token.index() + 1;
                self.prev_end = token.index() + 1;
            }
            _ => return Err(self.unexpected(T![>])),
        }
        Ok(())
    }

    /// No partially consumed `>` tokens may be left once a generic
    /// context closes.
    pub(crate) fn pending_gt_count(&self) -> usize {
        self.pending_gt
    }
}

/// Saved parser state for backtracking. See [`Parser::checkpoint`].
#[derive(Debug, Clone)]
pub(crate) struct Checkpoint {
    pos: usize,
    prev_end: usize,
    pending_gt: usize,
    pending_gt_offset: usize,
    pending_comments: Vec<(TokenKind, usize, usize)>,
    parents: usize,
    mark: ArenaMark,
}

/// Parse a byte slice. The bytes must be valid UTF-8; a decoding error
/// is reported as a validation failure.
pub fn parse_bytes(bytes: &[u8]) -> ParseResult {
    match std::str::from_utf8(bytes) {
        Ok(source) => Parser::new(source).parse(),
        Err(error) => ParseResult::Failure(ParseFailure::from_error(
            "",
            Error::validation(
                ErrorKind::InvalidUtf8,
                format!("source is not valid UTF-8: {error}"),
            ),
        )),
    }
}

/// Read and parse a file. UTF-8 is enforced the same way as for
/// [`parse_bytes`].
pub fn parse_path(path: &std::path::Path) -> ParseResult {
    match std::fs::read(path) {
        Ok(bytes) => parse_bytes(&bytes),
        Err(error) => ParseResult::Failure(ParseFailure::from_error(
            "",
            Error::validation(
                ErrorKind::SourceEmpty,
                format!("failed to read {}: {error}", path.display()),
            ),
        )),
    }
}
