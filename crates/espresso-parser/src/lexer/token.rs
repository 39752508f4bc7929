use crate::lexer::TokenKind;

/// A single lexed token.
///
/// `data` borrows the exact source slice the token covers, so
/// `source[token.index()..token.end()] == token.data()` always holds.
/// When the token contained Unicode escapes, `decoded` carries the
/// escape-translated text used for keyword matching and semantic
/// identity; otherwise the raw text is the decoded text.
#[derive(Clone, PartialEq)]
pub struct Token<'a> {
    pub(crate) kind: TokenKind,
    pub(crate) data: &'a str,
    pub(crate) index: usize,
    pub(crate) decoded: Option<String>,
}

impl<'a> Token<'a> {
    pub(crate) fn new(kind: TokenKind, data: &'a str, index: usize) -> Self {
        Self {
            kind,
            data,
            index,
            decoded: None,
        }
    }

    pub(crate) fn decoded(kind: TokenKind, data: &'a str, index: usize, decoded: String) -> Self {
        Self {
            kind,
            data,
            index,
            decoded: Some(decoded),
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Get a reference to the token's raw source text.
    pub fn data(&self) -> &'a str {
        self.data
    }

    /// Get the token's start byte offset in the input.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Byte offset just past the token.
    pub fn end(&self) -> usize {
        self.index + self.data.len()
    }

    /// The token's text after Unicode-escape translation. Identical to
    /// [`Token::data`] unless the token contained `\uXXXX` escapes.
    pub fn decoded_text(&self) -> &str {
        self.decoded.as_deref().unwrap_or(self.data)
    }
}

impl std::fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:?}@{}:{} {:?}",
            self.kind,
            self.index,
            self.end(),
            self.data
        )
    }
}
