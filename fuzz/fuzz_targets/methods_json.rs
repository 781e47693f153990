#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if let Ok(methods) = apiping::fuzzing::parse_methods_json_input(input) {
            debug_assert!(!methods.is_empty());
            for (index, method) in methods.iter().enumerate() {
                debug_assert!(!methods[..index].contains(method));
            }
        }
    }
});
