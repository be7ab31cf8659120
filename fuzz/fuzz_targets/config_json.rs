#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(args) = wildfire_replay::fuzzing::apply_config_from_json(data) {
        debug_assert!(!args.request_timeout.is_zero());
    }
});
