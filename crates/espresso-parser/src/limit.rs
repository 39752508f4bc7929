use std::fmt;

/// A LimitTracker enforces a particular limit within the parser. It keeps
/// track of utilization so that we can report how close to a limit we
/// approached over the lifetime of the tracker.
///
/// ```rust
/// use espresso_parser::{ParseResult, Parser};
///
/// let source = "class Deep { void m() { int x = ((((1)))); } }";
/// let parser = Parser::new(source).recursion_limit(64);
/// let result = parser.parse();
/// let tree = match result {
///     ParseResult::Success(tree) => tree,
///     ParseResult::Failure(failure) => panic!("{:?}", failure),
/// };
/// // `limit` reports the limit we set, `high` is the high-water mark of
/// // recursion usage during this parse.
/// let usage = tree.recursion_limit();
/// assert_eq!(usage.limit, 64);
/// assert!(usage.high < usage.limit);
/// ```
#[derive(PartialEq, Eq, Clone, Copy)]
pub struct LimitTracker {
    current: usize,
    /// High Water mark for this limit
    pub high: usize,
    /// Limit.
    pub limit: usize,
}

impl LimitTracker {
    pub fn new(limit: usize) -> Self {
        Self {
            current: 0,
            high: 0,
            limit,
        }
    }

    /// Record an increment of the tracked quantity. Returns `true` if
    /// the limit was reached.
    pub fn check_and_increment(&mut self) -> bool {
        self.current += 1;
        if self.current > self.high {
            self.high = self.current;
        }
        self.current > self.limit
    }

    pub fn decrement(&mut self) {
        self.current -= 1;
    }

    pub fn reset(&mut self) {
        self.current = 0;
    }
}

impl fmt::Debug for LimitTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "limit: {}, high: {}", self.limit, self.high)
    }
}
