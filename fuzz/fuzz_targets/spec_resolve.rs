#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 8 {
        return;
    }
    let (seed_bytes, rest) = data.split_at(8);
    let mut seed = [0u8; 8];
    seed.copy_from_slice(seed_bytes);
    let Ok(input) = std::str::from_utf8(rest) else {
        return;
    };
    if let Ok(spec) = apiping::fuzzing::parse_spec_input(input) {
        for (predicted, resolution) in apiping::fuzzing::resolve_all(&spec, u64::from_le_bytes(seed)) {
            debug_assert_eq!(predicted, resolution.ok);
            debug_assert!(resolution.url.starts_with("http://fuzz.local"));
        }
    }
});
