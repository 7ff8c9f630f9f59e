#![no_main]

use libfuzzer_sys::fuzz_target;

use castnotes::notes::extract;

fuzz_target!(|data: &[u8]| {
    // Convert raw bytes to string, handling invalid UTF-8 gracefully
    let input = String::from_utf8_lossy(data).to_string();

    // The extraction pipeline should never panic regardless of input;
    // structured errors are fine.
    let _ = extract(&input);
});
