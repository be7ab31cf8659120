#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let lines = wildfire_replay::fuzzing::frame_markup_input(input);
        for line in &lines {
            debug_assert!(line.iter().all(|run| !run.text.is_empty()));
            debug_assert!(line.iter().all(|run| !run.text.contains('\n')));
        }
    }
});
