use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use kc_card::{Block, BlockPayload, Document, FieldValue};
use kc_msgpack::Value;
use serde_json::{Map, Number, json};

/// Maps a [`Document`] to a JSON-compatible structure: one key per block in
/// catalog order, plus the embedded image(s) when `include_image` is set.
///
/// Integers and floats widen to the JSON number type. Byte strings become
/// base64 when `include_image` is true, and are omitted entirely otherwise
/// (dropped from object keys; replaced with `null` inside arrays, since an
/// array can't drop an element without shifting the ones after it).
/// Unknown blocks, never decoded, are always rendered as their opaque bytes
/// — base64 under `include_image`, `null` without it.
#[must_use]
pub fn to_json(document: &Document, include_image: bool) -> serde_json::Value {
    let mut blocks = Map::new();
    for name in document.block_names() {
        if let Some(block) = document.get(name) {
            blocks.insert(name.to_string(), block_to_json(block, include_image));
        }
    }

    let mut root = Map::new();
    root.insert("variant".to_string(), json!(format!("{:?}", document.variant)));
    root.insert("blocks".to_string(), serde_json::Value::Object(blocks));
    if include_image {
        root.insert("image".to_string(), json!(BASE64.encode(&document.image_bytes)));
        if let Some(face) = &document.face_image_bytes {
            root.insert("face_image".to_string(), json!(BASE64.encode(face)));
        }
    }
    serde_json::Value::Object(root)
}

fn block_to_json(block: &Block, include_image: bool) -> serde_json::Value {
    match &block.payload {
        BlockPayload::Decoded(tree) => field_value_to_json(tree, include_image),
        BlockPayload::Opaque(bytes) => bytes_to_json(bytes, include_image),
    }
}

fn field_value_to_json(value: &FieldValue, include_image: bool) -> serde_json::Value {
    match value {
        FieldValue::Scalar(v) => scalar_to_json(v, include_image),
        FieldValue::Array(_, items) => {
            serde_json::Value::Array(items.iter().map(|v| field_value_to_json(v, include_image)).collect())
        }
        FieldValue::Map(_, pairs) => {
            let mut map = Map::new();
            for (k, v) in pairs {
                let key = map_key_to_string(k);
                map.insert(key, field_value_to_json(v, include_image));
            }
            serde_json::Value::Object(map)
        }
        FieldValue::Nested { value, .. } => field_value_to_json(value, include_image),
    }
}

fn scalar_to_json(value: &Value, include_image: bool) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => json!(*b),
        Value::Int(_, n) => json!(*n),
        Value::UInt(_, n) => json!(*n),
        Value::Float32(f) => float_to_json(f64::from(*f)),
        Value::Float64(f) => float_to_json(*f),
        Value::String(_, s) => json!(s),
        Value::Bytes(_, bytes) => bytes_to_json(bytes, include_image),
        Value::Array(_, items) => {
            serde_json::Value::Array(items.iter().map(|v| scalar_to_json(v, include_image)).collect())
        }
        Value::Map(_, pairs) => {
            let mut map = Map::new();
            for (k, v) in pairs {
                map.insert(map_key_to_string(&FieldValue::Scalar(k.clone())), scalar_to_json(v, include_image));
            }
            serde_json::Value::Object(map)
        }
        Value::Extension(_, tag, bytes) => {
            let mut map = Map::new();
            map.insert("ext_type".to_string(), json!(*tag));
            map.insert("data".to_string(), bytes_to_json(bytes, include_image));
            serde_json::Value::Object(map)
        }
    }
}

fn bytes_to_json(bytes: &[u8], include_image: bool) -> serde_json::Value {
    if include_image { json!(BASE64.encode(bytes)) } else { serde_json::Value::Null }
}

fn float_to_json(f: f64) -> serde_json::Value {
    Number::from_f64(f).map_or_else(|| json!(if f.is_nan() { "NaN" } else if f > 0.0 { "Infinity" } else { "-Infinity" }), serde_json::Value::Number)
}

fn map_key_to_string(key: &FieldValue) -> String {
    match key {
        FieldValue::Scalar(Value::String(_, s)) => s.clone(),
        FieldValue::Scalar(Value::Int(_, n)) => n.to_string(),
        FieldValue::Scalar(Value::UInt(_, n)) => n.to_string(),
        other => format!("{other:?}"),
    }
}
