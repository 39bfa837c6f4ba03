#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: BlockCatalog::decode fed by the object codec, given
// arbitrary bytes as the catalog's encoded form.
//
// Catches bugs in:
// - Map vs. array catalog shape dispatch
// - Malformed per-entry tuples (wrong arity, wrong field types)
// - pos/size values that don't fit the platform's usize
fuzz_target!(|data: &[u8]| {
    if let Ok((value, _consumed)) = kc_msgpack::decode(data) {
        let _ = kc_card::BlockCatalog::decode(&value);
    }
});
