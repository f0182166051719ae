#![no_main]

use libfuzzer_sys::fuzz_target;
use skylight_markup::parser::parse;
use skylight_markup::writer::{serialize, serialize_pretty};

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Must not panic or loop infinitely on any input.
        let doc = parse(input);
        let _compact = serialize(&doc);
        let _pretty = serialize_pretty(&doc);
    }
});
