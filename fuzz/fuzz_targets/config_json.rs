#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if let Ok(args) = apiping::fuzzing::apply_config_from_json(input) {
            debug_assert!(args.workers.get() >= 1);
            debug_assert!(args.rounds.get() >= 1);
            for method in &args.methods.0 {
                debug_assert_eq!(method, &method.to_ascii_uppercase());
            }
        }
    }
});
