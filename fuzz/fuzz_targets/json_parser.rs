#![no_main]
use descent::{parse_value, ParseOptions};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = parse_value(s, ParseOptions::default());
        let _ = parse_value(s, ParseOptions::default().with_comments(true));
    }
});
