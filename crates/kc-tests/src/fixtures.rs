//! Synthetic card/scene file builder.
//!
//! No real Koikatu-family game assets are available to this workspace, so
//! every fixture used by the test suite and by `generate_golden` is
//! assembled byte-for-byte from [`kc_wire`]/[`kc_msgpack`] primitives here,
//! the same framing [`kc_card::Document::save_bytes`] itself produces.
//! This makes the round-trip tests meaningful (the bytes genuinely went
//! through PNG framing and the object codec) without pretending to ship a
//! captured game file.

use kc_card::{BlockCatalog, CatalogEntry, CatalogShape, HeaderFields, VariantDescriptor};
use kc_msgpack::{MapClass, Value};
use kc_wire::{ByteWriter, png};

/// Minimal valid 1x1 PNG, used as the stand-in embedded portrait image.
pub const TINY_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, // PNG signature
    0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52, // IHDR length + type
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, // 1x1 dimensions
    0x08, 0x02, 0x00, 0x00, 0x00, 0x90, 0x77, 0x53, // bit depth, color, crc
    0xDE, 0x00, 0x00, 0x00, 0x0C, 0x49, 0x44, 0x41, // IDAT length + type
    0x54, 0x08, 0xD7, 0x63, 0xF8, 0xCF, 0xC0, 0x00, // compressed pixel data
    0x00, 0x00, 0x02, 0x00, 0x01, 0xE2, 0x21, 0xBC, // IDAT crc
    0x33, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, // IEND length + type
    0x44, 0xAE, 0x42, 0x60, 0x82, // IEND data + crc
];

/// One block's contribution to a synthetic file: its name, schema version
/// string, and either a decoded value (a known block) or raw opaque bytes
/// (an unknown block), interleaved at the catalog position it's listed at.
pub enum FixtureBlock {
    Known { name: &'static str, version: &'static str, value: Value },
    Unknown { name: &'static str, version: &'static str, bytes: Vec<u8> },
}

/// Builds a complete card/scene PNG for `descriptor`, with `blocks` written
/// to the catalog in the given order and a stand-in embedded image (plus a
/// second stand-in image when `face_image` is set).
///
/// Mirrors [`kc_card::Document::save_bytes`]'s own framing exactly, so a
/// round trip through [`kc_card::Document::load_bytes`] and back is
/// expected to reproduce these bytes unchanged.
#[must_use]
pub fn build(descriptor: &VariantDescriptor, blocks: &[FixtureBlock], face_image: bool) -> Vec<u8> {
    let mut body_writer = ByteWriter::new();
    let mut entries = Vec::with_capacity(blocks.len());

    for block in blocks {
        let (name, version, bytes) = match block {
            FixtureBlock::Known { name, version, value } => {
                (*name, *version, kc_msgpack::encode_to_vec(value))
            }
            FixtureBlock::Unknown { name, version, bytes } => (*name, *version, bytes.clone()),
        };
        let pos = body_writer.len() as u64;
        let size = bytes.len() as u64;
        body_writer.write_bytes(&bytes);
        entries.push(CatalogEntry { name: name.to_string(), version: version.to_string(), pos, size });
    }

    let catalog = BlockCatalog { shape: CatalogShape::Map(MapClass::Fix), entries };
    let catalog_bytes = kc_msgpack::encode_to_vec(&catalog.encode());
    let block_bodies = body_writer.into_inner();

    let header_fields = HeaderFields {
        product_no: 100,
        header_string: descriptor.magic.to_string(),
        version: "0.0.0".to_string(),
        face_image_len: face_image.then_some(i32::try_from(TINY_PNG.len()).unwrap()),
        image_len: i32::try_from(TINY_PNG.len()).unwrap(),
    };

    let mut tail = ByteWriter::new();
    header_fields.write_to(&mut tail);
    tail.write_bytes(&catalog_bytes);
    tail.write_i64_le(block_bodies.len() as i64);
    tail.write_bytes(&block_bodies);

    png::join(TINY_PNG, face_image.then_some(TINY_PNG), &tail.into_inner())
}

/// A representative `Custom` block value: a handful of scalar fields plus
/// a `KKEx` map carrying one nested (independently object-coded) plugin
/// payload under the `Timeline` key.
#[must_use]
pub fn sample_chara_blocks() -> Vec<FixtureBlock> {
    let kkex_inner = Value::map(vec![(Value::string("speed"), Value::int(3))]);
    let kkex_inner_bytes = kc_msgpack::encode_to_vec(&kkex_inner);

    vec![
        FixtureBlock::Known {
            name: "Custom",
            version: "0.0.0",
            value: Value::map(vec![
                (Value::string("sex"), Value::int(0)),
                (Value::string("name"), Value::string("Sample")),
                (Value::string("face"), Value::bytes(vec![1, 2, 3, 4])),
            ]),
        },
        FixtureBlock::Known {
            name: "KKEx",
            version: "1.0",
            value: Value::map(vec![(
                Value::string("Timeline"),
                Value::bytes(kkex_inner_bytes),
            )]),
        },
        FixtureBlock::Unknown { name: "KK_UnknownPlugin", version: "1.0", bytes: vec![0xAA; 12] },
    ]
}

/// A representative scene `dicObject` tree: one root character with one
/// nested item child, plus a root camera — enough to exercise
/// [`kc_card::scene::walk`]'s depth-first traversal.
#[must_use]
pub fn sample_scene_blocks() -> Vec<FixtureBlock> {
    let item = Value::map(vec![(Value::string("type"), Value::int(1))]);
    let character = Value::map(vec![
        (Value::string("type"), Value::int(0)),
        (Value::string("child"), Value::map(vec![(Value::string("0"), item)])),
    ]);
    let camera = Value::map(vec![(Value::string("type"), Value::int(5))]);
    let dic_object = Value::map(vec![
        (Value::string("0"), character),
        (Value::string("1"), camera),
    ]);

    vec![FixtureBlock::Known { name: "SceneInfo", version: "0.0.0", value: dic_object_wrapper(dic_object) }]
}

fn dic_object_wrapper(dic_object: Value) -> Value {
    Value::map(vec![(Value::string("dicObject"), dic_object)])
}
