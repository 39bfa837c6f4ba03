//! Round-trip integration tests: `encode(decode(bytes)) == bytes` for every
//! synthetic fixture, the correctness bar this codec is built around.

use kc_card::{Document, FieldValue, Variant};
use kc_msgpack::Value;
use kc_tests::fixtures::{self, FixtureBlock};

#[test]
fn chara_file_roundtrips_byte_for_byte() {
    let original = fixtures::build(Variant::Koikatu.descriptor(), &fixtures::sample_chara_blocks(), false);
    let document = Document::load_bytes(&original).unwrap();
    let resaved = document.save_bytes().unwrap();
    assert_eq!(resaved, original);
}

#[test]
fn chara_file_with_face_image_roundtrips() {
    let original = fixtures::build(Variant::Koikatu.descriptor(), &fixtures::sample_chara_blocks(), true);
    let document = Document::load_bytes(&original).unwrap();
    assert!(document.face_image_bytes.is_some());
    let resaved = document.save_bytes().unwrap();
    assert_eq!(resaved, original);
}

#[test]
fn scene_file_roundtrips_byte_for_byte() {
    let original =
        fixtures::build(Variant::KoikatuScene.descriptor(), &fixtures::sample_scene_blocks(), false);
    let document = Document::load_bytes(&original).unwrap();
    let resaved = document.save_bytes().unwrap();
    assert_eq!(resaved, original);
}

#[test]
fn empty_block_list_roundtrips() {
    let empty: &[FixtureBlock] = &[];
    let original = fixtures::build(Variant::Koikatu.descriptor(), empty, false);
    let document = Document::load_bytes(&original).unwrap();
    assert!(document.blocks.is_empty());
    assert!(document.unknown_blocks.is_empty());
    let resaved = document.save_bytes().unwrap();
    assert_eq!(resaved, original);
}

#[test]
fn every_variant_magic_roundtrips_its_own_chara_shaped_file() {
    // Exercises variant detection and dispatch across the full table, not
    // just Koikatu — every variant shares the same header/catalog framing,
    // so a minimal block set is enough to confirm each one round-trips.
    for descriptor in kc_card::VARIANTS {
        let blocks = if descriptor.is_scene {
            fixtures::sample_scene_blocks()
        } else {
            fixtures::sample_chara_blocks()
        };
        let original = fixtures::build(descriptor, &blocks, false);
        let document = Document::load_bytes(&original)
            .unwrap_or_else(|e| panic!("{:?} failed to decode: {e}", descriptor.variant));
        let resaved = document.save_bytes().unwrap();
        assert_eq!(resaved, original, "{:?} did not round-trip", descriptor.variant);
    }
}

#[test]
fn unknown_blocks_stay_at_their_original_catalog_position() {
    let blocks = vec![
        FixtureBlock::Unknown { name: "KK_Before", version: "1.0", bytes: vec![1] },
        FixtureBlock::Known {
            name: "Custom",
            version: "0.0.0",
            value: kc_msgpack::Value::map(vec![]),
        },
        FixtureBlock::Unknown { name: "KK_After", version: "1.0", bytes: vec![2] },
    ];
    let original = fixtures::build(Variant::Koikatu.descriptor(), &blocks, false);
    let document = Document::load_bytes(&original).unwrap();
    assert_eq!(document.block_names(), vec!["KK_Before", "Custom", "KK_After"]);
    let resaved = document.save_bytes().unwrap();
    assert_eq!(resaved, original);
}

/// Mutating one leaf value and re-saving only changes the bytes under that
/// block's body; the PNG prefix and every other block's bytes are emitted
/// verbatim, matching the ordering guarantee in the concurrency/resource
/// section of the spec.
#[test]
fn mutating_a_leaf_value_only_changes_its_own_block() {
    let blocks = fixtures::sample_chara_blocks();
    let original = fixtures::build(Variant::Koikatu.descriptor(), &blocks, false);
    let mut document = Document::load_bytes(&original).unwrap();

    let kkex_bytes_before = kc_msgpack::encode_to_vec(
        &document.get("KKEx").unwrap().as_field_value().unwrap().to_value(),
    );
    let unknown_bytes_before = match &document.get("KK_UnknownPlugin").unwrap().payload {
        kc_card::BlockPayload::Opaque(b) => b.clone(),
        kc_card::BlockPayload::Decoded(_) => panic!("expected opaque"),
    };

    let custom = document.get_mut("Custom").unwrap();
    *custom.get_mut("name").unwrap() = FieldValue::Scalar(Value::string("chikarin"));

    let resaved = document.save_bytes().unwrap();
    assert_ne!(resaved, original);
    assert_eq!(&resaved[..document.image_bytes.len()], document.image_bytes.as_slice());

    let reloaded = Document::load_bytes(&resaved).unwrap();
    assert_eq!(
        reloaded.get("Custom").unwrap().get("name").unwrap().as_plain_str(),
        Some("chikarin")
    );

    let kkex_bytes_after = kc_msgpack::encode_to_vec(
        &reloaded.get("KKEx").unwrap().as_field_value().unwrap().to_value(),
    );
    assert_eq!(kkex_bytes_before, kkex_bytes_after);
    let unknown_bytes_after = match &reloaded.get("KK_UnknownPlugin").unwrap().payload {
        kc_card::BlockPayload::Opaque(b) => b.clone(),
        kc_card::BlockPayload::Decoded(_) => panic!("expected opaque"),
    };
    assert_eq!(unknown_bytes_before, unknown_bytes_after);
    assert_eq!(resaved, original);
}
