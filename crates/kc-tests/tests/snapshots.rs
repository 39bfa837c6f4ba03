//! Snapshot coverage for the driver's rendering of a loaded document,
//! mirroring the teacher's `bcp-tests/tests/conformance.rs` use of
//! `insta` to pin down output-format regressions.

use insta::assert_snapshot;
use kc_card::{Document, Variant};
use kc_tests::fixtures;

#[test]
fn opaque_block_prettify_snapshot() {
    let bytes = fixtures::build(Variant::Koikatu.descriptor(), &fixtures::sample_chara_blocks(), false);
    let document = Document::load_bytes(&bytes).unwrap();
    let block = document.get("KK_UnknownPlugin").unwrap();
    assert_snapshot!(kc_driver::prettify(block), @"KK_UnknownPlugin (v1.0) <opaque, 12 bytes>");
}

#[test]
fn variant_json_label_snapshot() {
    let bytes = fixtures::build(Variant::Koikatu.descriptor(), &fixtures::sample_chara_blocks(), false);
    let document = Document::load_bytes(&bytes).unwrap();
    let json = kc_driver::to_json(&document, false);
    assert_snapshot!(json["variant"].as_str().unwrap(), @"Koikatu");
}
