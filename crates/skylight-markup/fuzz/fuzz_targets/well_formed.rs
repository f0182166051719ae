#![no_main]

use libfuzzer_sys::fuzz_target;
use skylight_markup::parser::check_well_formed;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Errors are expected on most inputs; panics are not.
        let _result = check_well_formed(input);
    }
});
