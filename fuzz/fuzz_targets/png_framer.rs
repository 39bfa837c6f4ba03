#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: kc_wire::png::split with arbitrary bytes.
//
// Catches bugs in:
// - PNG signature validation
// - Chunk length overflow / truncation
// - Missing IEND chunk
// - Face-image detection (second signature immediately after IEND)
fuzz_target!(|data: &[u8]| {
    let _ = kc_wire::png::split(data);
});
