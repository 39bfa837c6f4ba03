//! One test per quantified invariant in the testable-properties list.

use kc_card::{Document, Variant};
use kc_msgpack::{Value, decode, encode_to_vec};
use kc_tests::fixtures::{self, FixtureBlock};

/// `save(load(B)) == B` for every accepted input.
#[test]
fn save_of_load_is_byte_identical() {
    let original = fixtures::build(Variant::Koikatu.descriptor(), &fixtures::sample_chara_blocks(), false);
    let document = Document::load_bytes(&original).unwrap();
    assert_eq!(document.save_bytes().unwrap(), original);
}

/// `load(B).blocks` contains an entry named `n` iff `n` appears in the
/// catalog and is in the variant's known-block set.
#[test]
fn known_block_presence_matches_catalog() {
    let bytes = fixtures::build(Variant::Koikatu.descriptor(), &fixtures::sample_chara_blocks(), false);
    let document = Document::load_bytes(&bytes).unwrap();

    assert!(document.get("Custom").is_some());
    assert!(document.get("KKEx").is_some());
    assert!(document.get("KK_UnknownPlugin").is_some());
    assert!(document.get("NotInCatalog").is_none());
}

/// The image bytes plus face image bytes equal the prefix of the input up
/// to the payload header.
#[test]
fn image_bytes_equal_input_prefix() {
    let bytes = fixtures::build(Variant::Koikatu.descriptor(), &fixtures::sample_chara_blocks(), true);
    let document = Document::load_bytes(&bytes).unwrap();

    let mut prefix = document.image_bytes.clone();
    prefix.extend_from_slice(document.face_image_bytes.as_ref().unwrap());
    assert_eq!(&bytes[..prefix.len()], prefix.as_slice());
}

/// `msgpack_decode(msgpack_encode(v)) == v`, value- and tag-equal.
#[test]
fn object_codec_roundtrips_value_and_tag() {
    let values = vec![
        Value::int(42),
        Value::uint(9_999_999_999),
        Value::Float64(f64::NAN),
        Value::string("hello"),
        Value::bytes(vec![1, 2, 3]),
        Value::array(vec![Value::int(1), Value::string("x")]),
        Value::map(vec![(Value::string("k"), Value::int(1))]),
    ];
    for value in values {
        let bytes = encode_to_vec(&value);
        let (decoded, consumed) = decode(&bytes).unwrap();
        assert_eq!(consumed, bytes.len());
        assert_eq!(decoded, value);
    }
}

/// Iterating a document's blocks yields names in catalog order.
#[test]
fn block_iteration_follows_catalog_order() {
    let blocks = vec![
        FixtureBlock::Known { name: "Custom", version: "0.0.0", value: Value::map(vec![]) },
        FixtureBlock::Unknown { name: "KK_Plugin", version: "1.0", bytes: vec![0] },
        FixtureBlock::Known { name: "KKEx", version: "1.0", value: Value::map(vec![]) },
    ];
    let bytes = fixtures::build(Variant::Koikatu.descriptor(), &blocks, false);
    let document = Document::load_bytes(&bytes).unwrap();
    assert_eq!(document.block_names(), vec!["Custom", "KK_Plugin", "KKEx"]);
}

/// `doc.blockdata`/`doc.unknown_blockdata` split catalog order into known
/// and unknown names, each in their own catalog-relative order.
#[test]
fn blockdata_and_unknown_blockdata_split_by_known_status() {
    let blocks = vec![
        FixtureBlock::Known { name: "Custom", version: "0.0.0", value: Value::map(vec![]) },
        FixtureBlock::Unknown { name: "KK_Plugin", version: "1.0", bytes: vec![0] },
        FixtureBlock::Known { name: "KKEx", version: "1.0", value: Value::map(vec![]) },
    ];
    let bytes = fixtures::build(Variant::Koikatu.descriptor(), &blocks, false);
    let document = Document::load_bytes(&bytes).unwrap();
    assert_eq!(document.blockdata(), vec!["Custom", "KKEx"]);
    assert_eq!(document.unknown_blockdata(), vec!["KK_Plugin"]);
}

/// Variant detection resolves overlapping magic prefixes by fixed
/// priority order, not by inference at decode time.
#[test]
fn variant_priority_order_is_fixed() {
    let bytes = fixtures::build(Variant::KoikatuSave.descriptor(), &[], false);
    let document = Document::load_bytes(&bytes).unwrap();
    assert_eq!(document.variant, Variant::KoikatuSave);
}
