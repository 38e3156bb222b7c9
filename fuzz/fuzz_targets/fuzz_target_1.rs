#![no_main]
use libfuzzer_sys::fuzz_target;

use json_ast::{parse_json, parse_json_with_options, ParseOptions};

fuzz_target!(|data: &[u8]| {
    // The fuzzer gives us raw bytes.
    // We only care about inputs that are valid UTF-8.
    if let Ok(s) = std::str::from_utf8(data) {
        // We are looking for panics; errors are fine.
        let _ = parse_json(s);
        let _ = parse_json_with_options(s, &ParseOptions::strict().with_max_depth(16));
    }
});
