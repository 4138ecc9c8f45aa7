#![allow(clippy::panic_in_result_fn)]
#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::indexing_slicing)]

use std::thread;

use descent::{
    parse_expression_with, parse_value_with, Category, DiagnosticSink, Error, ExpressionConfig,
    LexerConfig, ParseOptions, SharedDiagnostics, TokenKind, Tokenizer,
};

#[test]
fn test_shared_sink_across_threads() {
    let shared = SharedDiagnostics::new();
    let inputs = ["[1, 2,]", "{\"a\" 1}", "[true]", "[nul]"];

    let handles: Vec<_> = inputs
        .into_iter()
        .map(|input| {
            let mut sink = shared.clone();
            thread::spawn(move || {
                parse_value_with(input, ParseOptions::default(), &mut sink);
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(shared.len(), 3);
    let errors = shared.take();
    assert!(errors.iter().all(|e| e.category() != Category::Limit));
    assert!(shared.is_empty());
}

#[test]
fn test_mixed_languages_into_one_sink() {
    let mut shared = SharedDiagnostics::new();
    parse_value_with("[1 2]", ParseOptions::default(), &mut shared);
    parse_expression_with("1 +", ExpressionConfig::default(), &mut shared);

    let messages: Vec<_> = shared
        .snapshot()
        .iter()
        .map(|e| e.message().to_owned())
        .collect();
    assert_eq!(
        messages,
        vec![
            "expected ',' or ']', found number",
            "expected identifier, number, or parenthesized expression, found end of input",
        ]
    );
}

#[test]
fn test_closure_sink_sees_every_report() {
    let mut lines = Vec::new();
    {
        let mut sink =
            |error: Error| lines.push(format!("{}: {}", error.position(), error.message()));
        parse_value_with("{\n  \"a\": ,\n  \"b\": x\n}", ParseOptions::default(), &mut sink);
    }
    assert_eq!(
        lines,
        vec![
            "2:8: expected a value, found ','",
            "3:8: identifiers are not permitted here",
        ]
    );
}

#[test]
fn test_tokenizer_reports_through_sink() {
    struct Counter(usize);

    impl DiagnosticSink for Counter {
        fn report(&mut self, _error: Error) {
            self.0 += 1;
        }
    }

    let mut counter = Counter(0);
    let kinds: Vec<_> = Tokenizer::new("{ # : ~ }", LexerConfig::json(), &mut counter)
        .map(|token| token.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![TokenKind::LeftBrace, TokenKind::Colon, TokenKind::RightBrace]
    );
    assert_eq!(counter.0, 2);
}
