#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: kc_msgpack::decode with arbitrary bytes.
//
// Catches bugs in:
// - Tag byte dispatch across every family (fixint, str/bin/array/map,
//   ext, float)
// - Truncated length-prefixed containers
// - Unassigned tag bytes
// - Deeply nested arrays/maps (recursion depth)
fuzz_target!(|data: &[u8]| {
    let _ = kc_msgpack::decode(data);
});
