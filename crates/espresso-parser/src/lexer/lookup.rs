use crate::TokenKind;

static SINGLE_PUNCTUATION: [Option<TokenKind>; 256] = punctuation_lut();

/// Kind for single-character tokens that never combine with a following
/// character. Multi-character operators and the `.`/`/`-prefixed
/// families are scanned by hand.
#[inline]
pub(crate) fn single_punctuation_kind(c: char) -> Option<TokenKind> {
    if c.is_ascii() {
        SINGLE_PUNCTUATION[c as usize]
    } else {
        None
    }
}

const fn punctuation_lut() -> [Option<TokenKind>; 256] {
    let mut lut = [None; 256];
    lut[b'(' as usize] = Some(TokenKind::LParen);
    lut[b')' as usize] = Some(TokenKind::RParen);
    lut[b'{' as usize] = Some(TokenKind::LBrace);
    lut[b'}' as usize] = Some(TokenKind::RBrace);
    lut[b'[' as usize] = Some(TokenKind::LBracket);
    lut[b']' as usize] = Some(TokenKind::RBracket);
    lut[b';' as usize] = Some(TokenKind::Semicolon);
    lut[b',' as usize] = Some(TokenKind::Comma);
    lut[b'@' as usize] = Some(TokenKind::At);
    lut[b'~' as usize] = Some(TokenKind::Tilde);
    lut[b'?' as usize] = Some(TokenKind::Question);

    lut
}

/// JLS §3.8: identifier-start is any Java letter — Unicode letters plus
/// `$` and `_` and currency symbols.
#[inline]
pub(crate) fn is_identifier_start(c: char) -> bool {
    c == '$' || c == '_' || unicode_ident::is_xid_start(c)
}

#[inline]
pub(crate) fn is_identifier_part(c: char) -> bool {
    c == '$' || unicode_ident::is_xid_continue(c)
}

#[inline]
pub(crate) fn is_digit_char(c: char) -> bool {
    c.is_ascii_digit()
}

#[inline]
pub(crate) fn is_hex_digit_char(c: char) -> bool {
    c.is_ascii_hexdigit()
}

/// JLS §3.6 whitespace: space, tab, form feed and line terminators.
#[inline]
pub(crate) fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\u{000C}' | '\n' | '\r')
}
