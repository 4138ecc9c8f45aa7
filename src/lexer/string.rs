use std::str::Chars;

use crate::ast::Scalar;
use crate::diagnostics::DiagnosticSink;
use crate::error::{Error, ErrorKind, Pos, Span};
use crate::lexer::cursor::Cursor;
use crate::lexer::token::{Token, TokenKind};

const REPLACEMENT: char = '\u{FFFD}';

/// Scan a quoted string starting at the opening `"`
///
/// Scanning only finds the closing quote; `\` and the character after it are
/// skipped as a pair and interpreted afterwards by [`unescape`]. Control
/// characters are reported and kept. A missing closing quote is reported at
/// end of input.
pub(crate) fn read_string(cursor: &mut Cursor<'_>, sink: &mut dyn DiagnosticSink) -> Token {
    let start = cursor.position();
    cursor.advance();

    let body_start = cursor.pos();
    let mut body_end = None;
    let mut escapes = Vec::new();

    while let Some(c) = cursor.current() {
        match c {
            '"' => {
                body_end = Some(cursor.pos());
                cursor.advance();
                break;
            }
            '\\' => {
                escapes.push(cursor.position());
                cursor.advance();
                cursor.advance();
            }
            c if c < '\u{20}' => {
                sink.report(Error::at(ErrorKind::ControlCharacter, cursor.position()));
                cursor.advance();
            }
            _ => {
                cursor.advance();
            }
        }
    }

    let body_end = body_end.unwrap_or_else(|| {
        sink.report(Error::at(ErrorKind::UnterminatedString, cursor.position()));
        cursor.pos()
    });

    let raw = cursor.source().get(body_start..body_end).unwrap_or_default();
    let value = unescape(raw, &escapes, sink);

    Token::with_payload(
        TokenKind::String,
        Span::new(start, cursor.position()),
        Scalar::String(value),
    )
}

/// Interpret escape pairs in a raw string body
///
/// `escapes` holds the source position of each backslash that starts a pair,
/// in order, so problems are reported where they occur.
pub(crate) fn unescape(raw: &str, escapes: &[Pos], sink: &mut dyn DiagnosticSink) -> String {
    if escapes.is_empty() {
        return raw.to_owned();
    }

    let mut result = String::with_capacity(raw.len());
    let mut escape_positions = escapes.iter().copied();
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        let at = escape_positions.next().unwrap_or_default();
        let Some(escape_char) = chars.next() else {
            // Backslash at end of an unterminated body, already reported
            break;
        };
        match escape_char {
            '"' => result.push('"'),
            '\\' => result.push('\\'),
            '/' => result.push('/'),
            'b' => result.push('\x08'),
            'f' => result.push('\x0C'),
            'n' => result.push('\n'),
            'r' => result.push('\r'),
            't' => result.push('\t'),
            'u' => {
                let decoded = unicode_escape(&mut chars, &mut escape_positions);
                result.push(decoded.unwrap_or_else(|| {
                    sink.report(Error::at(ErrorKind::InvalidUnicodeEscape, at));
                    REPLACEMENT
                }));
            }
            other => {
                sink.report(Error::at(ErrorKind::InvalidEscapeSequence, at));
                result.push(other);
            }
        }
    }

    result
}

/// Read exactly four hex digits, consuming only the ones that are hex
fn hex4(chars: &mut Chars<'_>) -> Option<u32> {
    let mut code: u32 = 0;
    for _ in 0..4 {
        let digit = chars.clone().next().and_then(|c| c.to_digit(16))?;
        chars.next();
        code = code * 16 + digit;
    }
    Some(code)
}

/// Decode the rest of a `\u` escape, joining a following low surrogate
fn unicode_escape(
    chars: &mut Chars<'_>,
    escape_positions: &mut impl Iterator<Item = Pos>,
) -> Option<char> {
    let code = hex4(chars)?;
    match code {
        0xD800..=0xDBFF => {
            let mut lookahead = chars.clone();
            if lookahead.next() != Some('\\') || lookahead.next() != Some('u') {
                return None;
            }
            let low = hex4(&mut lookahead)?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return None;
            }
            *chars = lookahead;
            escape_positions.next();
            char::from_u32(0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00))
        }
        _ => char::from_u32(code),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Diagnostics;
    use crate::error::ErrorKind;

    fn scan(input: &str) -> (Option<String>, Diagnostics, usize) {
        let mut sink = Diagnostics::new();
        let mut cursor = Cursor::new(input);
        let token = read_string(&mut cursor, &mut sink);
        (token.text().map(str::to_owned), sink, token.span.len())
    }

    fn kinds(sink: &Diagnostics) -> Vec<ErrorKind> {
        sink.iter().map(|e| e.kind().clone()).collect()
    }

    #[test]
    fn test_plain_string() {
        let (value, sink, len) = scan(r#""hello world" rest"#);
        assert_eq!(value.as_deref(), Some("hello world"));
        assert!(sink.is_empty());
        assert_eq!(len, 13);
    }

    #[test]
    fn test_string_escapes() {
        let (value, sink, _) = scan(r#""hello\nworld\t!\"\\\/\b\f""#);
        assert_eq!(value.as_deref(), Some("hello\nworld\t!\"\\/\x08\x0C"));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_unicode_escape_and_surrogate_pair() {
        let (value, sink, _) = scan(r#""\u0041\u00e9 \ud83d\ude00""#);
        assert_eq!(value.as_deref(), Some("Aé 😀"));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_lone_surrogate_is_replaced() {
        let (value, sink, _) = scan(r#""\ud83dx""#);
        assert_eq!(value.as_deref(), Some("\u{FFFD}x"));
        assert_eq!(kinds(&sink), vec![ErrorKind::InvalidUnicodeEscape]);
    }

    #[test]
    fn test_invalid_unicode_keeps_following_text() {
        let (value, sink, _) = scan(r#""\u00GH""#);
        assert_eq!(value.as_deref(), Some("\u{FFFD}GH"));
        assert_eq!(kinds(&sink), vec![ErrorKind::InvalidUnicodeEscape]);
    }

    #[test]
    fn test_invalid_escape_reported_at_backslash() {
        let (value, sink, _) = scan(r#""ab\x""#);
        assert_eq!(value.as_deref(), Some("abx"));
        assert_eq!(sink.first().map(|e| e.position().offset), Some(3));
    }

    #[test]
    fn test_control_character_is_reported_and_kept() {
        let (value, sink, _) = scan("\"a\tb\nc\"");
        assert_eq!(value.as_deref(), Some("a\tb\nc"));
        assert_eq!(
            kinds(&sink),
            vec![ErrorKind::ControlCharacter, ErrorKind::ControlCharacter]
        );
    }

    #[test]
    fn test_unterminated_reported_once() {
        let (value, sink, len) = scan(r#""abc"#);
        assert_eq!(value.as_deref(), Some("abc"));
        assert_eq!(kinds(&sink), vec![ErrorKind::UnterminatedString]);
        assert_eq!(sink.first().map(|e| e.position().offset), Some(4));
        assert_eq!(len, 4);
    }

    #[test]
    fn test_escaped_quote_does_not_terminate() {
        let (value, sink, _) = scan(r#""a\"b"#);
        assert_eq!(value.as_deref(), Some("a\"b"));
        assert_eq!(kinds(&sink), vec![ErrorKind::UnterminatedString]);
    }
}
