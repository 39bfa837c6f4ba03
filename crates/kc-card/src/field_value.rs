use kc_msgpack::{ArrClass, BinClass, MapClass, Value};

use crate::error::{NestedDecodeWarning, NestedFailureReason};
use crate::variant::VariantDescriptor;

/// A block's decoded payload tree.
///
/// Isomorphic to [`Value`] except that a map entry recognized as a
/// nested plugin payload is held as [`FieldValue::Nested`] rather than
/// left as opaque bytes — the decoded sub-tree plus the
/// `BinClass` the outer bytes were tagged with, so `to_value` can
/// re-encode to the exact same bytes tag on save.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    /// Any non-container value: null, bool, int/uint, float, string,
    /// bytes that weren't recognized as nested, or an extension blob.
    Scalar(Value),
    Array(ArrClass, Vec<FieldValue>),
    Map(MapClass, Vec<(FieldValue, FieldValue)>),
    Nested { memo: BinClass, value: Box<FieldValue> },
}

impl FieldValue {
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Array(class, items) => {
                FieldValue::Array(*class, items.iter().map(FieldValue::from_value).collect())
            }
            Value::Map(class, pairs) => FieldValue::Map(
                *class,
                pairs
                    .iter()
                    .map(|(k, v)| (FieldValue::from_value(k), FieldValue::from_value(v)))
                    .collect(),
            ),
            other => FieldValue::Scalar(other.clone()),
        }
    }

    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            FieldValue::Scalar(v) => v.clone(),
            FieldValue::Array(class, items) => {
                Value::Array(*class, items.iter().map(FieldValue::to_value).collect())
            }
            FieldValue::Map(class, pairs) => Value::Map(
                *class,
                pairs.iter().map(|(k, v)| (k.to_value(), v.to_value())).collect(),
            ),
            FieldValue::Nested { memo, value } => {
                let bytes = kc_msgpack::encode_to_vec(&value.to_value());
                Value::Bytes(*memo, bytes)
            }
        }
    }

    #[must_use]
    pub fn as_map(&self) -> Option<&[(FieldValue, FieldValue)]> {
        match self {
            FieldValue::Map(_, pairs) => Some(pairs),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_map_mut(&mut self) -> Option<&mut Vec<(FieldValue, FieldValue)>> {
        match self {
            FieldValue::Map(_, pairs) => Some(pairs),
            _ => None,
        }
    }

    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&FieldValue> {
        self.as_map()?.iter().find(|(k, _)| k.as_plain_str() == Some(key)).map(|(_, v)| v)
    }

    /// Mutable lookup of a top-level string-keyed map entry — the write
    /// side of [`FieldValue::get_str`]. Assigning through the returned
    /// reference (`*tree.get_str_mut("nickname").unwrap() = ...`) is how
    /// callers edit a leaf value; structural edits (new keys, array
    /// appends) go through [`FieldValue::as_map_mut`] directly.
    #[must_use]
    pub fn get_str_mut(&mut self, key: &str) -> Option<&mut FieldValue> {
        self.as_map_mut()?.iter_mut().find(|(k, _)| k.as_plain_str() == Some(key)).map(|(_, v)| v)
    }

    #[must_use]
    pub fn as_plain_str(&self) -> Option<&str> {
        match self {
            FieldValue::Scalar(Value::String(_, s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// The scalar `Value` at this node, or `None` for a container or a
    /// nested plugin payload (index into those with `as_map`/`as_map_mut`
    /// or `Nested`'s inner tree instead).
    #[must_use]
    pub fn as_scalar(&self) -> Option<&Value> {
        match self {
            FieldValue::Scalar(v) => Some(v),
            _ => None,
        }
    }
}

/// Walk a just-decoded block tree and replace any map entry whose key is
/// in the variant's nested-key table for `block_name` with a decoded
/// [`FieldValue::Nested`], recursing into the freshly decoded sub-tree to
/// support multi-level plugin payloads.
///
/// A nested decode is committed only if it fully consumes the inner byte
/// string — a decode error or leftover trailing bytes both fall back to
/// leaving the field untouched, plus a recorded warning, rather than
/// risking a partially-applied decode.
pub fn decode_nested(
    block_name: &str,
    tree: &mut FieldValue,
    descriptor: &VariantDescriptor,
    warnings: &mut Vec<NestedDecodeWarning>,
) {
    let nested_keys = descriptor.nested_keys_for(block_name);
    if nested_keys.is_empty() {
        return;
    }
    let FieldValue::Map(_, pairs) = tree else { return };
    for (key, value) in pairs.iter_mut() {
        let Some(key_name) = key.as_plain_str() else { continue };
        if !nested_keys.contains(&key_name) {
            continue;
        }
        let FieldValue::Scalar(Value::Bytes(memo, bytes)) = value else { continue };
        match kc_msgpack::decode(bytes) {
            Ok((inner_value, consumed)) if consumed == bytes.len() => {
                let mut inner = FieldValue::from_value(&inner_value);
                decode_nested(block_name, &mut inner, descriptor, warnings);
                *value = FieldValue::Nested { memo: *memo, value: Box::new(inner) };
            }
            Ok((_, consumed)) => {
                warnings.push(NestedDecodeWarning {
                    block_name: block_name.to_string(),
                    key: key_name.to_string(),
                    reason: NestedFailureReason::TrailingBytes { consumed, total: bytes.len() },
                });
            }
            Err(_) => {
                warnings.push(NestedDecodeWarning {
                    block_name: block_name.to_string(),
                    key: key_name.to_string(),
                    reason: NestedFailureReason::DecodeFailed,
                });
            }
        }
    }
}
