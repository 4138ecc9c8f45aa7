//! Precedence-climbing calculator parser
//!
//! Grammar, loosest first:
//!
//! ```text
//! Start  -> Expr(0) end-of-input
//! Expr   -> Prefix (BinOp Expr(level + 1))*     binary operators at or above the threshold
//! Prefix -> ['-'] Term
//! Term   -> Atom Atom*                           juxtaposition is multiplication
//! Atom   -> Primary ('^' Primary)*               exponent folds to the left
//! Primary-> Identifier | Number | '(' Expr(0) ')'
//! ```

use tracing::trace;

use crate::ast::{Node, Scalar, Symbol};
use crate::diagnostics::DiagnosticSink;
use crate::error::{Error, ErrorKind, Pos, Span};
use crate::lexer::operator::lookup;
use crate::lexer::{LexerConfig, Token, TokenKind, Tokenizer, EXPRESSION_OPERATORS};

const ATOM_EXPECTED: &str = "identifier, number, or parenthesized expression";

/// Configuration for the expression parser
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExpressionConfig {
    /// Skip `//` and `/* */` comments
    pub allow_comments: bool,
    /// Maximum parenthesis nesting (0 means unlimited)
    pub max_depth: u16,
    /// Maximum input size in bytes (0 means unlimited)
    pub max_size: usize,
}

impl Default for ExpressionConfig {
    fn default() -> Self {
        Self {
            allow_comments: false,
            max_depth: 128,
            max_size: 10 * 1024 * 1024,
        }
    }
}

impl ExpressionConfig {
    pub const fn with_comments(mut self, allow_comments: bool) -> Self {
        self.allow_comments = allow_comments;
        self
    }

    pub const fn with_max_depth(mut self, max_depth: u16) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Expression parser over a fully tokenized input
pub struct Parser<'s> {
    tokens: Vec<Token>,
    index: usize,
    eof: Token,
    sink: &'s mut dyn DiagnosticSink,
    config: ExpressionConfig,
    depth: u16,
    oversized: bool,
    last_error: Option<usize>,
}

impl<'s> Parser<'s> {
    pub fn new(input: &str, config: ExpressionConfig, sink: &'s mut dyn DiagnosticSink) -> Self {
        let oversized = config.max_size > 0 && input.len() > config.max_size;
        let tokens: Vec<Token> = if oversized {
            Vec::new()
        } else {
            let lexer_config = LexerConfig::expression().with_comments(config.allow_comments);
            Tokenizer::new(input, lexer_config, &mut *sink)
                .tokenize()
                .into_iter()
                .filter(|token| !token.kind.is_trivia())
                .collect()
        };
        let eof = tokens
            .last()
            .filter(|token| token.is_eof())
            .cloned()
            .unwrap_or_else(|| Token::eof(Span::at(Pos::start())));

        Self {
            tokens,
            index: 0,
            eof,
            sink,
            config,
            depth: 0,
            oversized,
            last_error: None,
        }
    }

    /// Start -> Expr(0) end-of-input
    pub fn parse(&mut self) -> Node {
        if self.oversized {
            let max = self.config.max_size;
            self.sink.report(Error::at(ErrorKind::MaxSizeExceeded { max }, Pos::start()));
            return Node::placeholder(Span::at(Pos::start()));
        }

        let node = self.parse_expr(0);

        let next = self.peek();
        if !next.is_eof() {
            let span = next.span;
            self.sink.report(Error::new(ErrorKind::TrailingInput, span));
        }
        node
    }

    /// Expr -> Prefix (BinOp Expr(level + 1))*
    fn parse_expr(&mut self, min_level: u8) -> Node {
        let mut lhs = self.parse_prefix();

        while let Some((symbol, level)) = binary_operator(self.peek().kind) {
            if level < min_level {
                break;
            }
            self.advance();
            let rhs = self.parse_expr(level.saturating_add(1));
            trace!(operator = symbol.as_str(), level, "fold binary");
            lhs = Node::binary(symbol, lhs, rhs);
        }

        lhs
    }

    /// Prefix -> ['-'] Term
    fn parse_prefix(&mut self) -> Node {
        if self.peek().kind == TokenKind::Minus {
            let minus = self.advance();
            let operand = self.parse_term();
            return Node::call_spanning(Symbol::Neg, vec![operand], minus.span);
        }
        self.parse_term()
    }

    /// Term -> Atom Atom*
    fn parse_term(&mut self) -> Node {
        let mut node = self.parse_atom();
        while starts_atom(self.peek().kind) {
            let rhs = self.parse_atom();
            node = Node::binary(Symbol::Mul, node, rhs);
        }
        node
    }

    /// Atom -> Primary ('^' Primary)*
    fn parse_atom(&mut self) -> Node {
        let mut base = self.parse_primary();
        while self.peek().kind == TokenKind::Caret {
            self.advance();
            let exponent = self.parse_primary();
            base = Node::binary(Symbol::Pow, base, exponent);
        }
        base
    }

    fn parse_primary(&mut self) -> Node {
        match self.peek().kind {
            TokenKind::Identifier => {
                let token = self.advance();
                let name = token.text().unwrap_or_default().to_owned();
                Node::identifier(name, token.span)
            }
            TokenKind::Number => {
                let token = self.advance();
                let value = token.number().unwrap_or_default();
                Node::literal(Scalar::Number(value), token.span)
            }
            TokenKind::LeftParen => self.parse_group(),
            _ => {
                let at = self.peek().span.start;
                self.expected(ATOM_EXPECTED);
                Node::placeholder(Span::at(at))
            }
        }
    }

    /// `(` Expr(0) `)`, spanning both parentheses
    fn parse_group(&mut self) -> Node {
        let open = self.advance();
        let max = self.config.max_depth;
        if max > 0 && self.depth >= max {
            self.sink.report(Error::new(ErrorKind::MaxDepthExceeded { max }, open.span));
            let end = self.skip_group();
            return Node::placeholder(open.span.merge(end));
        }

        self.depth = self.depth.saturating_add(1);
        let inner = self.parse_expr(0);
        self.depth = self.depth.saturating_sub(1);

        if self.peek().kind == TokenKind::RightParen {
            let close = self.advance();
            inner.with_span(open.span.merge(close.span))
        } else {
            self.expected("')'");
            inner.with_span(open.span)
        }
    }

    /// Skip to the `)` matching an already consumed `(`, returning its span
    fn skip_group(&mut self) -> Span {
        let mut nesting = 1usize;
        let mut end = self.peek().span;
        while nesting > 0 && !self.peek().is_eof() {
            match self.peek().kind {
                TokenKind::LeftParen => nesting += 1,
                TokenKind::RightParen => nesting -= 1,
                _ => {}
            }
            end = self.advance().span;
        }
        end
    }

    fn peek(&self) -> &Token {
        self.tokens.get(self.index).unwrap_or(&self.eof)
    }

    /// Consume the current token and return it, staying put at end of input
    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !token.is_eof() {
            self.index += 1;
        }
        token
    }

    fn expected(&mut self, expected: &str) {
        let span = self.peek().span;
        if self.last_error == Some(span.start.offset) {
            return;
        }
        self.last_error = Some(span.start.offset);
        let kind = ErrorKind::expected(expected, self.peek().kind.name());
        self.sink.report(Error::new(kind, span));
    }
}

/// Symbol and level of a token in binary position
fn binary_operator(kind: TokenKind) -> Option<(Symbol, u8)> {
    let op = lookup(EXPRESSION_OPERATORS, kind)?;
    op.symbol.zip(op.precedence.map(|p| p.level()))
}

const fn starts_atom(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Identifier | TokenKind::Number | TokenKind::LeftParen
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Diagnostics;

    fn parse_with(input: &str, config: ExpressionConfig) -> (Node, Vec<Error>) {
        let mut sink = Diagnostics::new();
        let node = Parser::new(input, config, &mut sink).parse();
        (node, sink.into_vec())
    }

    fn sexpr(input: &str) -> String {
        let (node, errors) = parse_with(input, ExpressionConfig::default());
        assert!(errors.is_empty(), "{input}: {errors:?}");
        node.to_string()
    }

    #[test]
    fn test_precedence_classes() {
        assert_eq!(sexpr("a = b + c * d"), "(= a (+ b (* c d)))");
        assert_eq!(sexpr("x & y + 1"), "(& x (+ y 1))");
        assert_eq!(sexpr("a < b == c"), "(== (< a b) c)");
        assert_eq!(sexpr("1 << 2 + 3"), "(+ (<< 1 2) 3)");
    }

    #[test]
    fn test_left_associativity() {
        assert_eq!(sexpr("1 - 2 - 3"), "(- (- 1 2) 3)");
        assert_eq!(sexpr("8 / 4 / 2"), "(/ (/ 8 4) 2)");
        assert_eq!(sexpr("a = b = c"), "(= (= a b) c)");
    }

    #[test]
    fn test_implicit_multiplication() {
        assert_eq!(sexpr("3(x-1)(x+1)"), "(* (* 3 (- x 1)) (+ x 1))");
        assert_eq!(sexpr("2x^2"), "(* 2 (^ x 2))");
        assert_eq!(sexpr("2x + 1"), "(+ (* 2 x) 1)");
    }

    #[test]
    fn test_exponent_folds_left() {
        assert_eq!(sexpr("2^3^2"), "(^ (^ 2 3) 2)");
        assert_eq!(sexpr("(2)^(1+1)"), "(^ 2 (+ 1 1))");
    }

    #[test]
    fn test_unary_minus() {
        assert_eq!(sexpr("-x^2"), "(neg (^ x 2))");
        assert_eq!(sexpr("-2x"), "(neg (* 2 x))");
        assert_eq!(sexpr("a * -b"), "(* a (neg b))");
    }

    #[test]
    fn test_spans() {
        let (node, _) = parse_with("(a + b) * c", ExpressionConfig::default());
        assert_eq!(node.span().start.offset, 0);
        assert_eq!(node.span().end.offset, 11);
        let group = node.children().first().map(Node::span);
        assert_eq!(group.map(|s| (s.start.offset, s.end.offset)), Some((0, 7)));

        let (neg, _) = parse_with(" -x", ExpressionConfig::default());
        assert_eq!(neg.span().start.offset, 1);
        assert_eq!(neg.span().end.offset, 3);
    }

    #[test]
    fn test_missing_operand() {
        let (node, errors) = parse_with("3 +", ExpressionConfig::default());
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.first().map(Error::message),
            Some("expected identifier, number, or parenthesized expression, found end of input")
        );
        assert_eq!(node.to_string(), "(+ 3 null)");
    }

    #[test]
    fn test_unclosed_group() {
        let (node, errors) = parse_with("(1 + 2", ExpressionConfig::default());
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.first().map(Error::message),
            Some("expected ')', found end of input")
        );
        assert_eq!(node.to_string(), "(+ 1 2)");
    }

    #[test]
    fn test_trailing_input() {
        let (node, errors) = parse_with("1 )", ExpressionConfig::default());
        assert_eq!(node.to_string(), "1");
        assert_eq!(
            errors.iter().map(Error::kind).collect::<Vec<_>>(),
            vec![&ErrorKind::TrailingInput]
        );
    }

    #[test]
    fn test_unrecognized_character_is_skipped() {
        let (node, errors) = parse_with("1 + $2", ExpressionConfig::default());
        assert_eq!(node.to_string(), "(+ 1 2)");
        assert_eq!(
            errors.iter().map(Error::kind).collect::<Vec<_>>(),
            vec![&ErrorKind::UnrecognizedCharacter('$')]
        );
    }

    #[test]
    fn test_comments() {
        let config = ExpressionConfig::default().with_comments(true);
        let (node, errors) = parse_with("a /* sum */ + b // done", config);
        assert!(errors.is_empty());
        assert_eq!(node.to_string(), "(+ a b)");
    }

    #[test]
    fn test_max_depth() {
        let config = ExpressionConfig::default().with_max_depth(2);
        let (node, errors) = parse_with("((( 1 ))) + 2", config);
        assert_eq!(
            errors.iter().map(Error::kind).collect::<Vec<_>>(),
            vec![&ErrorKind::MaxDepthExceeded { max: 2 }]
        );
        assert_eq!(node.to_string(), "(+ null 2)");
    }
}
