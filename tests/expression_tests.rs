#![allow(clippy::panic_in_result_fn)]
#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::indexing_slicing)]

use descent::{
    expression_from_str, parse_expression, parse_expression_with, Diagnostics, ErrorKind,
    ExpressionConfig, Node, Scalar, Symbol,
};

fn render(input: &str) -> String {
    let (node, errors) = parse_expression(input);
    assert!(errors.is_empty(), "{input}: {errors:?}");
    node.to_string()
}

#[test]
fn test_single_atoms() {
    let node = expression_from_str("42").unwrap();
    assert!(matches!(
        node,
        Node::Literal {
            value: Scalar::Number(n),
            ..
        } if n == 42.0
    ));

    let node = expression_from_str("  total_2 ").unwrap();
    assert!(matches!(&node, Node::Identifier { name, .. } if name == "total_2"));
    assert_eq!(node.span().slice("  total_2 "), Some("total_2"));
}

#[test]
fn test_polynomial() {
    assert_eq!(
        render("y = 3x^2 - 2x + 1"),
        "(= y (+ (- (* 3 (^ x 2)) (* 2 x)) 1))"
    );
}

#[test]
fn test_factored_form() {
    let node = expression_from_str("3(x-1)(x+1)").unwrap();
    assert_eq!(node.to_string(), "(* (* 3 (- x 1)) (+ x 1))");
    assert_eq!(node.symbol(), Some(Symbol::Mul));
    assert_eq!(node.depth(), 4);
    let span = node.span();
    assert_eq!((span.start.offset, span.end.offset), (0, 11));
}

#[test]
fn test_subtraction_is_not_a_signed_literal() {
    assert_eq!(render("x-1"), "(- x 1)");
    assert_eq!(render("x - -1"), "(- x (neg 1))");
}

#[test]
fn test_comparison_and_bitwise() {
    assert_eq!(render("a | b & c"), "(& (| a b) c)");
    assert_eq!(render("a + 1 >= b << 2"), "(>= (+ a 1) (<< b 2))");
    assert_eq!(render("x != y"), "(!= x y)");
}

#[test]
fn test_multiline_expression() {
    let node = expression_from_str("a\n  + b\n  * c").unwrap();
    assert_eq!(node.to_string(), "(+ a (* b c))");
    let span = node.span();
    assert_eq!((span.end.line, span.end.col), (3, 6));
}

#[test]
fn test_recovery_reports_each_problem() {
    let (node, errors) = parse_expression("(1 + ) * (2 + )");
    assert_eq!(errors.len(), 2);
    assert!(errors.iter().all(|e| matches!(e.kind(), ErrorKind::Expected { .. })));
    assert_eq!(node.to_string(), "(* (+ 1 null) (+ 2 null))");
}

#[test]
fn test_placeholder_span_is_zero_width() {
    let (node, _) = parse_expression("1 *");
    let placeholder = node.children().get(1).unwrap();
    assert!(placeholder.span().is_empty());
    assert_eq!(placeholder.span().start.offset, 3);
}

#[test]
fn test_string_is_not_an_operand() {
    let err = expression_from_str(r#"1 + "two""#).unwrap_err();
    assert_eq!(
        err.message(),
        "expected identifier, number, or parenthesized expression, found string"
    );
}

#[test]
fn test_sink_receives_lexical_and_syntax_errors() {
    let mut diagnostics = Diagnostics::new();
    let node = parse_expression_with("a ? b", ExpressionConfig::default(), &mut diagnostics);
    assert_eq!(node.to_string(), "(* a b)");
    assert_eq!(
        diagnostics.first().map(|e| e.kind().clone()),
        Some(ErrorKind::UnrecognizedCharacter('?'))
    );
    assert_eq!(diagnostics.len(), 1);
}

#[test]
fn test_deep_parentheses_are_bounded() {
    let input = format!("{}x{}", "(".repeat(5_000), ")".repeat(5_000));
    let (node, errors) = parse_expression(&input);
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors.first().map(|e| e.kind().clone()),
        Some(ErrorKind::MaxDepthExceeded { max: 128 })
    );
    assert_eq!(node.to_string(), "null");
}
