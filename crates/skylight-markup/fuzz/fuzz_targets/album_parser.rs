#![no_main]

use libfuzzer_sys::fuzz_target;
use skylight_model::parser::AlbumParser;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let mut parser = AlbumParser::new();
        // Parse errors are expected; panics are not.
        let _ = parser.load_str("fuzz.album", input);
        let _gallery = parser.into_gallery();
    }
});
