#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = typesift::identify::containers::zip_entry_names(data, 1024);
});
