use crate::ast::Scalar;
use crate::diagnostics::DiagnosticSink;
use crate::error::{Error, ErrorKind, Span};
use crate::lexer::cursor::Cursor;
use crate::lexer::token::{Token, TokenKind};

fn is_digit(c: Option<char>) -> bool {
    matches!(c, Some('0'..='9'))
}

fn skip_digits(cursor: &mut Cursor<'_>) {
    while is_digit(cursor.current()) {
        cursor.advance();
    }
}

/// Scan `-? (0 | [1-9][0-9]*) (. [0-9]+)? ([eE] [+-]? [0-9]+)?`
///
/// Called with the cursor on a digit, or on `-` followed by a digit. A `.` or
/// exponent marker without the digits it needs is left for the next token.
pub(crate) fn read_number(cursor: &mut Cursor<'_>, sink: &mut dyn DiagnosticSink) -> Token {
    let start = cursor.position();

    cursor.consume('-');

    // Integer part; a leading zero stands alone
    if !cursor.consume('0') {
        skip_digits(cursor);
    }

    // Optional fraction part
    if cursor.current() == Some('.') && is_digit(cursor.peek(1)) {
        cursor.advance();
        skip_digits(cursor);
    }

    // Optional exponent part
    if matches!(cursor.current(), Some('e' | 'E')) {
        let digits_at = if matches!(cursor.peek(1), Some('+' | '-')) {
            2
        } else {
            1
        };
        if is_digit(cursor.peek(digits_at)) {
            cursor.advance_by(digits_at);
            skip_digits(cursor);
        }
    }

    let span = Span::new(start, cursor.position());
    let value = cursor
        .slice_from(start.offset)
        .parse::<f64>()
        .unwrap_or_else(|_| {
            sink.report(Error::new(ErrorKind::InvalidNumber, span));
            0.0
        });

    Token::with_payload(TokenKind::Number, span, Scalar::Number(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Diagnostics;

    fn scan(input: &str) -> (Option<f64>, usize, Diagnostics) {
        let mut sink = Diagnostics::new();
        let mut cursor = Cursor::new(input);
        let token = read_number(&mut cursor, &mut sink);
        (token.number(), token.span.len(), sink)
    }

    #[test]
    fn test_integer_and_negative() {
        assert_eq!(scan("123").0, Some(123.0));
        assert_eq!(scan("-456").0, Some(-456.0));
        assert_eq!(scan("0").0, Some(0.0));
    }

    #[test]
    fn test_fraction_and_exponent() {
        assert_eq!(scan("3.25").0, Some(3.25));
        assert_eq!(scan("1e10").0, Some(1e10));
        assert_eq!(scan("1E+5").0, Some(1e5));
        assert_eq!(scan("-2.5e-3").0, Some(-2.5e-3));
    }

    #[test]
    fn test_leading_zero_stands_alone() {
        let (value, len, sink) = scan("012");
        assert_eq!(value, Some(0.0));
        assert_eq!(len, 1);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_incomplete_parts_left_unconsumed() {
        assert_eq!(scan("1.").1, 1);
        assert_eq!(scan("1.x").1, 1);
        assert_eq!(scan("2e").1, 1);
        assert_eq!(scan("2e+x").1, 1);
        assert_eq!(scan("2ex").1, 1);
    }
}
