#![no_main]
use libfuzzer_sys::fuzz_target;
use typesift::identify::probe::{probe_view, InferProbe};

fuzz_target!(|data: &[u8]| {
    let view = probe_view(bytes::Bytes::copy_from_slice(data), &InferProbe);
    let _ = typesift::identify(&view);
});
