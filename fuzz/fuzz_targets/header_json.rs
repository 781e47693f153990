#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if let Ok(headers) = apiping::fuzzing::parse_header_json_input(input) {
            let mut names: Vec<&String> = headers.iter().map(|(name, _)| name).collect();
            names.dedup();
            debug_assert_eq!(names.len(), headers.len());
        }
    }
});
