//! Uniform syntax tree
//!
//! Every expression is one of three shapes: a literal, an identifier, or a
//! call of an operator symbol on an ordered list of children. Nodes are
//! immutable once built and own their children.

use std::fmt;

use crate::error::Span;

/// Scalar payload carried by tokens and literal nodes
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s:?}"),
        }
    }
}

/// Operator symbols shared by the operator tables and the tree
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Symbol {
    Assign,
    BitAnd,
    BitOr,
    Eq,
    NotEq,
    Less,
    LessEq,
    Greater,
    GreaterEq,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Shl,
    Shr,
    Pow,
    /// Unary minus
    Neg,
}

impl Symbol {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Assign => "=",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Less => "<",
            Self::LessEq => "<=",
            Self::Greater => ">",
            Self::GreaterEq => ">=",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "%",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::Pow => "^",
            Self::Neg => "neg",
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Syntax tree node
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Literal {
        value: Scalar,
        span: Span,
    },
    Identifier {
        name: String,
        span: Span,
    },
    Call {
        symbol: Symbol,
        args: Vec<Node>,
        span: Span,
    },
}

impl Node {
    pub fn literal(value: Scalar, span: Span) -> Self {
        Self::Literal { value, span }
    }

    pub fn identifier(name: impl Into<String>, span: Span) -> Self {
        Self::Identifier {
            name: name.into(),
            span,
        }
    }

    /// Call whose span covers all of `args`
    pub fn call(symbol: Symbol, args: Vec<Self>) -> Self {
        let span = args
            .iter()
            .map(Self::span)
            .reduce(Span::merge)
            .unwrap_or_default();
        Self::Call { symbol, args, span }
    }

    /// Call with a dedicated span, widened to cover `args` if needed
    pub fn call_spanning(symbol: Symbol, args: Vec<Self>, span: Span) -> Self {
        let span = args.iter().map(Self::span).fold(span, Span::merge);
        Self::Call { symbol, args, span }
    }

    pub fn binary(symbol: Symbol, lhs: Self, rhs: Self) -> Self {
        Self::call(symbol, vec![lhs, rhs])
    }

    /// Stand-in for an operand that could not be parsed
    pub fn placeholder(span: Span) -> Self {
        Self::literal(Scalar::Null, span)
    }

    pub const fn span(&self) -> Span {
        match self {
            Self::Literal { span, .. }
            | Self::Identifier { span, .. }
            | Self::Call { span, .. } => *span,
        }
    }

    /// Same node covering `span`, which must enclose the current span
    pub fn with_span(self, span: Span) -> Self {
        let span = self.span().merge(span);
        match self {
            Self::Literal { value, .. } => Self::Literal { value, span },
            Self::Identifier { name, .. } => Self::Identifier { name, span },
            Self::Call { symbol, args, .. } => Self::Call { symbol, args, span },
        }
    }

    pub fn children(&self) -> &[Self] {
        match self {
            Self::Call { args, .. } => args,
            Self::Literal { .. } | Self::Identifier { .. } => &[],
        }
    }

    pub const fn symbol(&self) -> Option<Symbol> {
        match self {
            Self::Call { symbol, .. } => Some(*symbol),
            Self::Literal { .. } | Self::Identifier { .. } => None,
        }
    }

    /// Height of the tree; leaves have depth 1
    pub fn depth(&self) -> usize {
        1 + self.children().iter().map(Self::depth).max().unwrap_or(0)
    }
}

/// Renders the tree as an S-expression, e.g. `(* 3 (- x 1))`
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal { value, .. } => write!(f, "{value}"),
            Self::Identifier { name, .. } => f.write_str(name),
            Self::Call { symbol, args, .. } => {
                write!(f, "({symbol}")?;
                for arg in args {
                    write!(f, " {arg}")?;
                }
                write!(f, ")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Pos;

    fn span(start: usize, end: usize) -> Span {
        Span::new(
            Pos::new(start, 1, u32::try_from(start + 1).unwrap_or(0)),
            Pos::new(end, 1, u32::try_from(end + 1).unwrap_or(0)),
        )
    }

    #[test]
    fn test_call_span_covers_children() {
        let lhs = Node::identifier("x", span(0, 1));
        let rhs = Node::literal(Scalar::Number(1.0), span(4, 5));
        let node = Node::binary(Symbol::Sub, lhs, rhs);
        assert_eq!(node.span(), span(0, 5));
        assert_eq!(node.children().len(), 2);
        assert_eq!(node.symbol(), Some(Symbol::Sub));
    }

    #[test]
    fn test_prefix_span() {
        let operand = Node::identifier("x", span(1, 2));
        let node = Node::call_spanning(Symbol::Neg, vec![operand], span(0, 1));
        assert_eq!(node.span(), span(0, 2));
        assert_eq!(node.to_string(), "(neg x)");
    }

    #[test]
    fn test_display_sexpr() {
        let inner = Node::binary(
            Symbol::Add,
            Node::identifier("x", span(2, 3)),
            Node::literal(Scalar::Number(1.0), span(4, 5)),
        );
        let node = Node::binary(Symbol::Mul, Node::literal(Scalar::Number(3.0), span(0, 1)), inner);
        assert_eq!(node.to_string(), "(* 3 (+ x 1))");
        assert_eq!(node.depth(), 3);
    }

    #[test]
    fn test_with_span_widens_only() {
        let node = Node::identifier("x", span(1, 2)).with_span(span(0, 3));
        assert_eq!(node.span(), span(0, 3));
        let node = node.with_span(span(1, 2));
        assert_eq!(node.span(), span(0, 3));
    }

    #[test]
    fn test_empty_call() {
        let node = Node::call(Symbol::Add, Vec::new());
        assert!(node.children().is_empty());
        assert_eq!(node.to_string(), "(+)");
    }
}
