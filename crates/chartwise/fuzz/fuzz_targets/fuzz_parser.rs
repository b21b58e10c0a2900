//! Fuzz target for delimiter detection and parsing.
//!
//! Raw bytes go through decoding, delimiter detection and the csv reader.
//! None of these may panic.

#![no_main]

use chartwise::input::decode_bytes;
use chartwise::{detect_delimiter, Parser};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 100_000 {
        return;
    }

    let decoded = decode_bytes(data);
    let _ = detect_delimiter(&decoded.text);
    let _ = Parser::new().parse_str(&decoded.text);
});
