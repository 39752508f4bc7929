mod cursor;
mod lookup;
mod token;
mod token_kind;

use crate::limit::LimitTracker;
use crate::Error;
use crate::T;

use cursor::Cursor;
use lookup::{
    is_digit_char, is_hex_digit_char, is_identifier_part, is_identifier_start, is_whitespace,
    single_punctuation_kind,
};

pub use token::Token;
pub use token_kind::TokenKind;

/// By default the lexer accepts any number of tokens.
pub(crate) const DEFAULT_TOKEN_LIMIT: usize = usize::MAX;

/// A `\uXXXX` escape may legally repeat its `u` (JLS §3.3); cap the
/// repetition so adversarial input cannot make a single escape
/// arbitrarily expensive.
const MAX_UNICODE_ESCAPE_US: usize = 1_024;

/// Parses a Java source string into [`Token`]s.
///
/// The lexer is an iterator over `Result<Token, Error>`; the parser
/// drains it eagerly through [`Lexer::lex`]. Whitespace is skipped
/// silently, comments are produced as tokens, and the final token is
/// always a zero-length [`TokenKind::Eof`].
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    eof_emitted: bool,
    pub(crate) limit_tracker: LimitTracker,
}

impl<'a> Lexer<'a> {
    /// Create a new instance of `Lexer` over `input`.
    pub fn new(input: &'a str) -> Self {
        Self {
            cursor: Cursor::new(input),
            eof_emitted: false,
            limit_tracker: LimitTracker::new(DEFAULT_TOKEN_LIMIT),
        }
    }

    /// Limit the number of tokens to lex, the end-of-file token
    /// included. Lexing aborts with a limit error once the budget is
    /// exhausted.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit_tracker = LimitTracker::new(limit);
        self
    }

    /// Lex the entire input eagerly. Returns the token vector,
    /// terminated by the end-of-file token, or the first lexical error.
    pub fn lex(self) -> Result<Vec<Token<'a>>, Error> {
        let mut tokens = Vec::new();
        for result in self {
            tokens.push(result?);
        }
        Ok(tokens)
    }

    fn advance(&mut self) -> Result<Token<'a>, Error> {
        let start = self.cursor.start_token();
        let c = match self.cursor.bump() {
            Some(c) => c,
            None => return Ok(Token::new(TokenKind::Eof, "", start)),
        };

        if let Some(kind) = single_punctuation_kind(c) {
            return Ok(self.token(kind));
        }

        match c {
            '/' => self.slash_or_comment(start),
            '"' => self.string_or_text_block(start),
            '\'' => self.char_literal(start),
            '.' => self.dot(start),
            c if is_digit_char(c) => self.number(start, c),
            c if is_identifier_start(c) => self.identifier(start, None),
            '\\' => {
                let decoded = self.unicode_escape(start)?;
                if is_identifier_start(decoded) {
                    self.identifier(start, Some(String::from(decoded)))
                } else {
                    Err(self.err_at(start, "Unicode escape does not start an identifier"))
                }
            }
            '+' | '-' | '*' | '%' | '=' | '!' | '<' | '>' | '&' | '|' | '^' | ':' => {
                Ok(self.operator(c))
            }
            c => Err(self.err_at(start, format!("unexpected character `{c}`"))),
        }
    }

    /// Greedy longest-match over the operator table. The `>` family is
    /// deliberately lexed as composite tokens (`>>`, `>>>`, ...); the
    /// parser re-splits them in generic context.
    fn operator(&mut self, first: char) -> Token<'a> {
        let kind = match first {
            '+' => {
                if self.cursor.eatc('+') {
                    T![++]
                } else if self.cursor.eatc('=') {
                    T![+=]
                } else {
                    T![+]
                }
            }
            '-' => {
                if self.cursor.eatc('-') {
                    T![--]
                } else if self.cursor.eatc('=') {
                    T![-=]
                } else if self.cursor.eatc('>') {
                    T![->]
                } else {
                    T![-]
                }
            }
            '*' => {
                if self.cursor.eatc('=') {
                    T![*=]
                } else {
                    T![*]
                }
            }
            '%' => {
                if self.cursor.eatc('=') {
                    T![%=]
                } else {
                    T![%]
                }
            }
            '=' => {
                if self.cursor.eatc('=') {
                    T![==]
                } else {
                    T![=]
                }
            }
            '!' => {
                if self.cursor.eatc('=') {
                    T![!=]
                } else {
                    T![!]
                }
            }
            '<' => {
                if self.cursor.eatc('=') {
                    T![<=]
                } else if self.cursor.eatc('<') {
                    if self.cursor.eatc('=') {
                        T![<<=]
                    } else {
                        T![<<]
                    }
                } else {
                    T![<]
                }
            }
            '>' => {
                if self.cursor.eatc('=') {
                    T![>=]
                } else if self.cursor.eatc('>') {
                    if self.cursor.eatc('=') {
                        T![>>=]
                    } else if self.cursor.eatc('>') {
                        if self.cursor.eatc('=') {
                            T![>>>=]
                        } else {
                            T![>>>]
                        }
                    } else {
                        T![>>]
                    }
                } else {
                    T![>]
                }
            }
            '&' => {
                if self.cursor.eatc('&') {
                    T![&&]
                } else if self.cursor.eatc('=') {
                    T![&=]
                } else {
                    T![&]
                }
            }
            '|' => {
                if self.cursor.eatc('|') {
                    T![||]
                } else if self.cursor.eatc('=') {
                    T![|=]
                } else {
                    T![|]
                }
            }
            '^' => {
                if self.cursor.eatc('=') {
                    T![^=]
                } else {
                    T![^]
                }
            }
            ':' => {
                if self.cursor.eatc(':') {
                    T![::]
                } else {
                    T![:]
                }
            }
            _ => unreachable!("operator() called on non-operator `{first}`"),
        };

        self.token(kind)
    }

    fn dot(&mut self, start: usize) -> Result<Token<'a>, Error> {
        if self.cursor.first().is_some_and(is_digit_char) {
            return self.decimal_fraction(start, false);
        }

        if self.cursor.first() == Some('.') && self.cursor.second() == Some('.') {
            self.cursor.bump();
            self.cursor.bump();
            return Ok(self.token(T![...]));
        }

        Ok(self.token(T![.]))
    }

    /// `//`, `///`, `/* */`, `/** */`, `/=` or `/`. The comment kind is
    /// discriminated here because only the prefix is decidable at the
    /// lexer level.
    fn slash_or_comment(&mut self, start: usize) -> Result<Token<'a>, Error> {
        if self.cursor.eatc('/') {
            let kind = if self.cursor.eatc('/') {
                TokenKind::MarkdownComment
            } else {
                TokenKind::LineComment
            };
            self.cursor.eat_while(|c| c != '\n' && c != '\r');
            return Ok(self.token(kind));
        }

        if self.cursor.eatc('*') {
            // `/**` opens a Javadoc comment unless it is the degenerate
            // empty comment `/**/`.
            let kind = if self.cursor.first() == Some('*') && self.cursor.second() != Some('/') {
                TokenKind::DocComment
            } else {
                TokenKind::BlockComment
            };

            loop {
                match self.cursor.bump() {
                    Some('*') if self.cursor.eatc('/') => return Ok(self.token(kind)),
                    Some(_) => {}
                    None => return Err(self.err_at(start, "unterminated block comment")),
                }
            }
        }

        if self.cursor.eatc('=') {
            return Ok(self.token(T![/=]));
        }

        Ok(self.token(T![/]))
    }

    fn string_or_text_block(&mut self, start: usize) -> Result<Token<'a>, Error> {
        if self.cursor.first() == Some('"') {
            if self.cursor.second() == Some('"') {
                self.cursor.bump();
                self.cursor.bump();
                return self.text_block(start);
            }
            // An empty string literal `""`.
            self.cursor.bump();
            return Ok(self.token(TokenKind::StringLiteral));
        }

        loop {
            match self.cursor.bump() {
                Some('"') => return Ok(self.token(TokenKind::StringLiteral)),
                Some('\\') => self.eat_escape(start)?,
                Some('\n') | Some('\r') => {
                    return Err(self.err_at(start, "unterminated string literal"))
                }
                Some(_) => {}
                None => return Err(self.err_at(start, "unterminated string literal")),
            }
        }
    }

    /// JLS §3.10.6: the opening `"""` must be followed on the same line
    /// by nothing but whitespace, then a line terminator.
    fn text_block(&mut self, start: usize) -> Result<Token<'a>, Error> {
        loop {
            match self.cursor.bump() {
                Some('\n') => break,
                Some('\r') => {
                    self.cursor.eatc('\n');
                    break;
                }
                Some(c) if is_whitespace(c) => {}
                Some(_) => {
                    return Err(
                        self.err_at(start, "text block delimiter must end its line")
                    )
                }
                None => return Err(self.err_at(start, "unclosed text block")),
            }
        }

        loop {
            match self.cursor.bump() {
                Some('"') => {
                    if self.cursor.first() == Some('"') && self.cursor.second() == Some('"') {
                        self.cursor.bump();
                        self.cursor.bump();
                        return Ok(self.token(TokenKind::TextBlock));
                    }
                }
                Some('\\') => {
                    // An escaped quote never contributes to the closing
                    // delimiter.
                    self.cursor.bump();
                }
                Some(_) => {}
                None => return Err(self.err_at(start, "unclosed text block")),
            }
        }
    }

    fn char_literal(&mut self, start: usize) -> Result<Token<'a>, Error> {
        match self.cursor.bump() {
            Some('\'') => return Err(self.err_at(start, "empty character literal")),
            Some('\\') => self.eat_escape(start)?,
            Some('\n') | Some('\r') | None => {
                return Err(self.err_at(start, "unterminated character literal"))
            }
            Some(_) => {}
        }

        if !self.cursor.eatc('\'') {
            return Err(self.err_at(start, "unterminated character literal"));
        }

        Ok(self.token(TokenKind::CharLiteral))
    }

    /// Consume one escape sequence, the leading `\` already eaten.
    /// Standard single-character escapes, octal escapes of one to three
    /// digits (the three-digit form caps the first digit at 3, JLS
    /// §3.10.7), and Unicode escapes. The escape is validated but not
    /// decoded; the token keeps its raw form.
    fn eat_escape(&mut self, start: usize) -> Result<(), Error> {
        match self.cursor.bump() {
            Some('b' | 's' | 't' | 'n' | 'f' | 'r' | '"' | '\'' | '\\') => Ok(()),
            Some('u') => {
                while self.cursor.eatc('u') {}
                for _ in 0..4 {
                    if !self.cursor.first().is_some_and(is_hex_digit_char) {
                        return Err(self.err_at(start, "invalid Unicode escape"));
                    }
                    self.cursor.bump();
                }
                Ok(())
            }
            Some(c @ '0'..='7') => {
                if self.cursor.first().is_some_and(|d| ('0'..='7').contains(&d)) {
                    self.cursor.bump();
                    // A third digit is only allowed when the first is 0-3.
                    if c <= '3'
                        && self.cursor.first().is_some_and(|d| ('0'..='7').contains(&d))
                    {
                        self.cursor.bump();
                    }
                }
                Ok(())
            }
            _ => Err(self.err_at(start, "illegal escape sequence")),
        }
    }

    /// Decode a `\uXXXX` escape, the `\` at `escape_start` already
    /// consumed. Handles repeated `u`s and surrogate pairs.
    fn unicode_escape(&mut self, escape_start: usize) -> Result<char, Error> {
        if !self.cursor.eatc('u') {
            return Err(self.err_at(escape_start, "unexpected character `\\`"));
        }

        let mut us = 1;
        while self.cursor.eatc('u') {
            us += 1;
            if us > MAX_UNICODE_ESCAPE_US {
                return Err(self.err_at(escape_start, "Unicode escape nested too deeply"));
            }
        }

        let high = self.hex4(escape_start)?;
        if (0xD800..=0xDBFF).contains(&high) {
            // High surrogate: a second escape must follow with the low half.
            if !(self.cursor.eatc('\\') && self.cursor.eatc('u')) {
                return Err(self.err_at(escape_start, "unpaired surrogate in Unicode escape"));
            }
            while self.cursor.eatc('u') {}
            let low = self.hex4(escape_start)?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return Err(self.err_at(escape_start, "unpaired surrogate in Unicode escape"));
            }
            let value = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
            return char::from_u32(value)
                .ok_or_else(|| self.err_at(escape_start, "invalid Unicode escape"));
        }

        char::from_u32(high).ok_or_else(|| self.err_at(escape_start, "invalid Unicode escape"))
    }

    fn hex4(&mut self, escape_start: usize) -> Result<u32, Error> {
        let mut value = 0u32;
        for _ in 0..4 {
            let digit = self
                .cursor
                .first()
                .and_then(|c| c.to_digit(16))
                .ok_or_else(|| self.err_at(escape_start, "invalid Unicode escape"))?;
            self.cursor.bump();
            value = value * 16 + digit;
        }
        Ok(value)
    }

    fn identifier(
        &mut self,
        start: usize,
        mut decoded: Option<String>,
    ) -> Result<Token<'a>, Error> {
        loop {
            match self.cursor.first() {
                Some(c) if is_identifier_part(c) => {
                    self.cursor.bump();
                    if let Some(buf) = decoded.as_mut() {
                        buf.push(c);
                    }
                }
                Some('\\') => {
                    if decoded.is_none() {
                        // Everything so far was escape-free, so the raw
                        // prefix is also the decoded prefix.
                        decoded = Some(self.cursor.token_data().to_string());
                    }
                    let escape_start = self.cursor.offset();
                    self.cursor.bump();
                    let c = self.unicode_escape(escape_start)?;
                    if !is_identifier_part(c) {
                        return Err(
                            self.err_at(escape_start, "Unicode escape does not continue identifier")
                        );
                    }
                    decoded.as_mut().unwrap().push(c);
                }
                _ => break,
            }
        }

        let data = self.cursor.token_data();
        let text = decoded.as_deref().unwrap_or(data);

        // `non-sealed` is the only hyphenated keyword. Commit to it only
        // when exactly `-sealed` follows, not a longer word.
        if text == "non" && self.cursor.first() == Some('-') {
            let mut probe = self.cursor.clone();
            probe.bump();
            let word_start = probe.offset();
            probe.eat_while(is_identifier_part);
            if &probe.token_data()[word_start - probe.token_start()..] == "sealed" {
                self.cursor = probe;
                return Ok(self.token(TokenKind::NonSealedKw));
            }
        }

        let kind = TokenKind::from_keyword(text).unwrap_or(TokenKind::Identifier);
        match decoded {
            Some(decoded) => Ok(Token::decoded(kind, self.cursor.token_data(), start, decoded)),
            None => Ok(self.token(kind)),
        }
    }

    fn number(&mut self, start: usize, first: char) -> Result<Token<'a>, Error> {
        if first == '0' && (self.cursor.eatc('x') || self.cursor.eatc('X')) {
            return self.hex_number(start);
        }
        if first == '0' && (self.cursor.eatc('b') || self.cursor.eatc('B')) {
            let has_digits = self.eat_separated_digits(start, |c| c == '0' || c == '1')?;
            if !has_digits {
                return Err(self.err_at(start, "missing digits in binary literal"));
            }
            let kind = if self.cursor.eatc('l') || self.cursor.eatc('L') {
                TokenKind::LongLiteral
            } else {
                TokenKind::IntLiteral
            };
            return self.finish_number(start, kind);
        }

        self.eat_separated_digits(start, is_digit_char)?;

        if self.cursor.first() == Some('.') {
            self.cursor.bump();
            return self.decimal_fraction(start, true);
        }

        if matches!(self.cursor.first(), Some('e' | 'E')) {
            return self.decimal_exponent(start);
        }

        let kind = if self.cursor.eatc('l') || self.cursor.eatc('L') {
            TokenKind::LongLiteral
        } else if self.cursor.eatc('f') || self.cursor.eatc('F') {
            TokenKind::FloatLiteral
        } else if self.cursor.eatc('d') || self.cursor.eatc('D') {
            TokenKind::DoubleLiteral
        } else {
            TokenKind::IntLiteral
        };
        self.finish_number(start, kind)
    }

    /// The part after the decimal point. `had_integer_part`
    /// distinguishes `1.` (digits optional) from `.5` (digits required).
    fn decimal_fraction(&mut self, start: usize, had_integer_part: bool) -> Result<Token<'a>, Error> {
        let has_digits = self.eat_separated_digits(start, is_digit_char)?;
        if !had_integer_part && !has_digits {
            return Err(self.err_at(start, "missing digits in floating-point literal"));
        }

        if matches!(self.cursor.first(), Some('e' | 'E')) {
            return self.decimal_exponent(start);
        }

        let kind = if self.cursor.eatc('f') || self.cursor.eatc('F') {
            TokenKind::FloatLiteral
        } else if self.cursor.eatc('d') || self.cursor.eatc('D') {
            TokenKind::DoubleLiteral
        } else {
            TokenKind::DoubleLiteral
        };
        self.finish_number(start, kind)
    }

    fn decimal_exponent(&mut self, start: usize) -> Result<Token<'a>, Error> {
        self.cursor.bump();
        if !self.cursor.eatc('+') {
            self.cursor.eatc('-');
        }
        let has_digits = self.eat_separated_digits(start, is_digit_char)?;
        if !has_digits {
            return Err(self.err_at(start, "missing digits in exponent"));
        }

        let kind = if self.cursor.eatc('f') || self.cursor.eatc('F') {
            TokenKind::FloatLiteral
        } else {
            if !self.cursor.eatc('d') {
                self.cursor.eatc('D');
            }
            TokenKind::DoubleLiteral
        };
        self.finish_number(start, kind)
    }

    fn hex_number(&mut self, start: usize) -> Result<Token<'a>, Error> {
        let has_digits = self.eat_separated_digits(start, is_hex_digit_char)?;

        let has_fraction = if self.cursor.first() == Some('.') {
            self.cursor.bump();
            let fraction_digits = self.eat_separated_digits(start, is_hex_digit_char)?;
            if !has_digits && !fraction_digits {
                return Err(self.err_at(start, "missing digits in hexadecimal literal"));
            }
            true
        } else {
            if !has_digits {
                return Err(self.err_at(start, "missing digits in hexadecimal literal"));
            }
            false
        };

        if matches!(self.cursor.first(), Some('p' | 'P')) {
            // Hexadecimal floating-point: binary exponent with optional sign.
            self.cursor.bump();
            if !self.cursor.eatc('+') {
                self.cursor.eatc('-');
            }
            let exponent_digits = self.eat_separated_digits(start, is_digit_char)?;
            if !exponent_digits {
                return Err(self.err_at(start, "missing digits in binary exponent"));
            }
            let kind = if self.cursor.eatc('f') || self.cursor.eatc('F') {
                TokenKind::FloatLiteral
            } else {
                if !self.cursor.eatc('d') {
                    self.cursor.eatc('D');
                }
                TokenKind::DoubleLiteral
            };
            return self.finish_number(start, kind);
        }

        if has_fraction {
            return Err(
                self.err_at(start, "hexadecimal floating-point literal requires an exponent")
            );
        }

        let kind = if self.cursor.eatc('l') || self.cursor.eatc('L') {
            TokenKind::LongLiteral
        } else {
            TokenKind::IntLiteral
        };
        self.finish_number(start, kind)
    }

    /// Consume digits with `_` separators. Underscores may only appear
    /// between digits (JLS §3.10.1). Returns whether any digit was seen.
    fn eat_separated_digits(
        &mut self,
        start: usize,
        is_digit: impl Fn(char) -> bool,
    ) -> Result<bool, Error> {
        let mut has_digit = false;
        let mut trailing_underscore = false;

        while let Some(c) = self.cursor.first() {
            if is_digit(c) {
                has_digit = true;
                trailing_underscore = false;
                self.cursor.bump();
            } else if c == '_' {
                if !has_digit {
                    return Err(self.err_at(start, "illegal underscore in numeric literal"));
                }
                trailing_underscore = true;
                self.cursor.bump();
            } else {
                break;
            }
        }

        if trailing_underscore {
            return Err(self.err_at(start, "illegal underscore in numeric literal"));
        }
        Ok(has_digit)
    }

    fn finish_number(&mut self, start: usize, kind: TokenKind) -> Result<Token<'a>, Error> {
        if self.cursor.first().is_some_and(is_identifier_part) {
            return Err(self.err_at(start, "invalid numeric literal"));
        }
        Ok(self.token(kind))
    }

    fn token(&self, kind: TokenKind) -> Token<'a> {
        Token::new(kind, self.cursor.token_data(), self.cursor.token_start())
    }

    fn err_at<S: Into<String>>(&self, index: usize, message: S) -> Error {
        Error::lexer(message, self.cursor.token_data().to_string(), index)
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token<'a>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.eof_emitted {
            return None;
        }

        self.cursor.eat_while(is_whitespace);

        if self.limit_tracker.check_and_increment() {
            self.eof_emitted = true;
            return Some(Err(Error::limit(
                "token limit reached, aborting lexing",
                self.cursor.offset(),
            )));
        }

        if self.cursor.is_eof() {
            self.eof_emitted = true;
            let start = self.cursor.start_token();
            return Some(Ok(Token::new(TokenKind::Eof, "", start)));
        }

        Some(self.advance())
    }
}
