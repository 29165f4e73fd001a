//! Fuzz target for the CSV tokenizer.
//!
//! This fuzzer tests that the parser:
//! 1. Never panics on malformed input
//! 2. Always yields at least one field per line
//! 3. Never reports data rows for a malformed document

#![no_main]

use gamecfg::input::{parse_document, parse_line};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    for line in text.split('\n') {
        assert!(!parse_line(line).is_empty());
    }

    for header_rows in [0, 1, 3] {
        let doc = parse_document(text, header_rows);
        if doc.malformed {
            assert!(doc.data_rows.is_empty());
        }
    }
});
