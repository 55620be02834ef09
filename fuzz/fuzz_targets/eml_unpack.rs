#![no_main]
use libfuzzer_sys::fuzz_target;
use typesift::unpack::{DuplicateSet, EmlUnpacker, Unpacker};

fuzz_target!(|data: &[u8]| {
    let mut seen = DuplicateSet::new();
    let _ = EmlUnpacker::default().unpack(data, &mut seen);
});
