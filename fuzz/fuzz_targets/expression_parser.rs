#![no_main]
use descent::{parse_expression, Node};
use libfuzzer_sys::fuzz_target;

fn check_spans(node: &Node) {
    for child in node.children() {
        assert!(node.span().contains(&child.span()));
        check_spans(child);
    }
}

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let (node, _) = parse_expression(s);
        check_spans(&node);
    }
});
