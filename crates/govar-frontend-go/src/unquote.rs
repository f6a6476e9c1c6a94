//! Go literal unquoting.
//!
//! Rune literals decode to one `char`. String literals decode to bytes, since
//! `\x` and octal escapes in Go strings produce raw bytes that need not form
//! valid UTF-8.

use thiserror::Error;

/// Why a literal could not be unquoted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnquoteError {
    #[error("literal is not quoted")]
    NotQuoted,

    #[error("invalid escape sequence `\\{0}`")]
    InvalidEscape(char),

    #[error("truncated escape sequence")]
    TruncatedEscape,

    #[error("escape value {0:#x} is not a valid Unicode code point")]
    InvalidCodePoint(u32),

    #[error("octal escape value {0} is greater than 255")]
    OctalOverflow(u32),

    #[error("empty character literal")]
    EmptyChar,

    #[error("more than one character in character literal")]
    MultipleChars,

    #[error("newline in interpreted string literal")]
    Newline,

    #[error("unescaped {0:?} inside literal")]
    UnescapedQuote(char),
}

/// One decoded unit of a quoted literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    Char(char),
    Byte(u8),
}

/// Unquote a Go rune literal such as `'x'`, `'\n'` or `'\u00e9'`.
pub fn unquote_char(raw: &str) -> Result<char, UnquoteError> {
    let body = raw
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .ok_or(UnquoteError::NotQuoted)?;
    if body.is_empty() {
        return Err(UnquoteError::EmptyChar);
    }

    let (unit, rest) = unescape_one(body, '\'')?;
    if !rest.is_empty() {
        return Err(UnquoteError::MultipleChars);
    }

    Ok(match unit {
        Unit::Char(c) => c,
        // A byte escape in a rune literal names the code point U+0000..U+00FF.
        Unit::Byte(b) => char::from(b),
    })
}

/// Unquote a Go string literal, interpreted (`"..."`) or raw (`` `...` ``).
pub fn unquote_string(raw: &str) -> Result<Vec<u8>, UnquoteError> {
    if let Some(body) = raw.strip_prefix('`').and_then(|s| s.strip_suffix('`')) {
        if body.contains('`') {
            return Err(UnquoteError::UnescapedQuote('`'));
        }
        // Carriage returns are discarded from raw strings.
        return Ok(body.bytes().filter(|&b| b != b'\r').collect());
    }

    let mut rest = raw
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .ok_or(UnquoteError::NotQuoted)?;

    let mut out = Vec::with_capacity(rest.len());
    while !rest.is_empty() {
        let (unit, tail) = unescape_one(rest, '"')?;
        match unit {
            Unit::Char(c) => {
                let mut buf = [0u8; 4];
                out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            }
            Unit::Byte(b) => out.push(b),
        }
        rest = tail;
    }
    Ok(out)
}

/// Decode the first character or escape sequence of `s`, returning it along
/// with the remaining text. `quote` is the delimiter of the enclosing literal.
fn unescape_one(s: &str, quote: char) -> Result<(Unit, &str), UnquoteError> {
    let mut chars = s.chars();
    let c = chars.next().ok_or(UnquoteError::TruncatedEscape)?;
    if c == quote {
        return Err(UnquoteError::UnescapedQuote(c));
    }
    if c == '\n' {
        return Err(UnquoteError::Newline);
    }
    if c != '\\' {
        return Ok((Unit::Char(c), chars.as_str()));
    }

    let esc = chars.next().ok_or(UnquoteError::TruncatedEscape)?;
    let rest = chars.as_str();
    let simple = |c: char| Ok((Unit::Char(c), rest));
    match esc {
        'a' => simple('\u{07}'),
        'b' => simple('\u{08}'),
        'f' => simple('\u{0C}'),
        'n' => simple('\n'),
        'r' => simple('\r'),
        't' => simple('\t'),
        'v' => simple('\u{0B}'),
        '\\' => simple('\\'),
        '\'' | '"' if esc == quote => simple(esc),
        'x' => {
            let (value, rest) = take_digits(rest, 2, 16, esc)?;
            Ok((Unit::Byte(value as u8), rest))
        }
        'u' | 'U' => {
            let len = if esc == 'u' { 4 } else { 8 };
            let (value, rest) = take_digits(rest, len, 16, esc)?;
            let c = char::from_u32(value).ok_or(UnquoteError::InvalidCodePoint(value))?;
            Ok((Unit::Char(c), rest))
        }
        '0'..='7' => {
            let (low, rest) = take_digits(rest, 2, 8, esc)?;
            let value = (esc as u32 - '0' as u32) * 64 + low;
            if value > 255 {
                return Err(UnquoteError::OctalOverflow(value));
            }
            Ok((Unit::Byte(value as u8), rest))
        }
        _ => Err(UnquoteError::InvalidEscape(esc)),
    }
}

/// Read exactly `len` ASCII digits in `radix` from the front of `s`.
fn take_digits(s: &str, len: usize, radix: u32, esc: char) -> Result<(u32, &str), UnquoteError> {
    let digits = s.as_bytes().get(..len).ok_or(UnquoteError::TruncatedEscape)?;
    let mut value = 0u32;
    for &b in digits {
        let digit = char::from(b)
            .to_digit(radix)
            .ok_or(UnquoteError::InvalidEscape(esc))?;
        value = value * radix + digit;
    }
    // All `len` leading bytes are ASCII, so `len` is a char boundary.
    Ok((value, &s[len..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_plain() {
        assert_eq!(unquote_char("'x'"), Ok('x'));
        assert_eq!(unquote_char("'é'"), Ok('é'));
        assert_eq!(unquote_char("'世'"), Ok('世'));
    }

    #[test]
    fn test_char_escapes() {
        assert_eq!(unquote_char(r"'\n'"), Ok('\n'));
        assert_eq!(unquote_char(r"'\t'"), Ok('\t'));
        assert_eq!(unquote_char(r"'\\'"), Ok('\\'));
        assert_eq!(unquote_char(r"'\''"), Ok('\''));
        assert_eq!(unquote_char(r"'\a'"), Ok('\u{07}'));
        assert_eq!(unquote_char(r"'\v'"), Ok('\u{0B}'));
    }

    #[test]
    fn test_char_numeric_escapes() {
        assert_eq!(unquote_char(r"'\x41'"), Ok('A'));
        assert_eq!(unquote_char(r"'\101'"), Ok('A'));
        assert_eq!(unquote_char(r"'\xff'"), Ok('\u{FF}'));
        assert_eq!(unquote_char(r"'\u00e9'"), Ok('é'));
        assert_eq!(unquote_char(r"'\U0001F600'"), Ok('😀'));
    }

    #[test]
    fn test_char_rejects_double_quote_escape() {
        assert_eq!(unquote_char(r#"'\"'"#), Err(UnquoteError::InvalidEscape('"')));
    }

    #[test]
    fn test_char_malformed() {
        assert_eq!(unquote_char("''"), Err(UnquoteError::EmptyChar));
        assert_eq!(unquote_char("'ab'"), Err(UnquoteError::MultipleChars));
        assert_eq!(unquote_char("x"), Err(UnquoteError::NotQuoted));
        assert_eq!(unquote_char("'"), Err(UnquoteError::NotQuoted));
        assert_eq!(unquote_char(r"'\q'"), Err(UnquoteError::InvalidEscape('q')));
        assert_eq!(unquote_char(r"'\x4'"), Err(UnquoteError::TruncatedEscape));
        assert_eq!(unquote_char(r"'\xzz'"), Err(UnquoteError::InvalidEscape('x')));
        assert_eq!(unquote_char(r"'\400'"), Err(UnquoteError::OctalOverflow(256)));
        assert_eq!(
            unquote_char(r"'\ud800'"),
            Err(UnquoteError::InvalidCodePoint(0xd800))
        );
        assert_eq!(
            unquote_char(r"'\U00110000'"),
            Err(UnquoteError::InvalidCodePoint(0x110000))
        );
    }

    #[test]
    fn test_string_interpreted() {
        assert_eq!(unquote_string(r#""hello\nworld""#).unwrap(), b"hello\nworld");
        assert_eq!(unquote_string(r#""""#).unwrap(), b"");
        assert_eq!(unquote_string(r#""say \"hi\"""#).unwrap(), b"say \"hi\"");
        assert_eq!(unquote_string(r#""tab\there""#).unwrap(), b"tab\there");
        assert_eq!(unquote_string(r#""caf\u00e9""#).unwrap(), "café".as_bytes());
        assert_eq!(unquote_string(r#""日本""#).unwrap(), "日本".as_bytes());
    }

    #[test]
    fn test_string_byte_escapes_are_raw_bytes() {
        assert_eq!(unquote_string(r#""\xff\000""#).unwrap(), vec![0xffu8, 0x00]);
        assert_eq!(unquote_string(r#""\xe2\x82\xac""#).unwrap(), "€".as_bytes());
    }

    #[test]
    fn test_string_rejects_single_quote_escape() {
        assert_eq!(
            unquote_string(r#""it\'s""#),
            Err(UnquoteError::InvalidEscape('\''))
        );
    }

    #[test]
    fn test_string_malformed() {
        assert_eq!(unquote_string("\"a\nb\""), Err(UnquoteError::Newline));
        assert_eq!(unquote_string(r#""a"b""#), Err(UnquoteError::UnescapedQuote('"')));
        assert_eq!(unquote_string(r#""trailing\""#), Err(UnquoteError::TruncatedEscape));
        assert_eq!(unquote_string("'x'"), Err(UnquoteError::NotQuoted));
        assert_eq!(unquote_string("\""), Err(UnquoteError::NotQuoted));
    }

    #[test]
    fn test_string_raw() {
        assert_eq!(unquote_string(r"`C:\path\n`").unwrap(), br"C:\path\n");
        assert_eq!(unquote_string("`line1\r\nline2`").unwrap(), b"line1\nline2");
        assert_eq!(unquote_string("``").unwrap(), b"");
    }
}
