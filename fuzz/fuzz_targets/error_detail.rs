#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Some((head, body)) = data.split_first_chunk::<2>() {
        let status = u16::from_be_bytes(*head);
        let detail = wildfire_replay::fuzzing::error_detail_input(status, body);
        debug_assert!(!detail.is_empty());
    }
});
