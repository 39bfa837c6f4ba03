use kc_wire::ByteReader;

use crate::error::MsgpackError;
use crate::value::{ArrClass, BinClass, ExtClass, IntWidth, MapClass, StrClass, UIntWidth, Value};

// Leading tag bytes for the fixed-width formats. Fixint, fixmap, fixarray,
// and fixstr don't have a single tag byte — they're ranges — and are
// matched directly in `decode_value`.
const NIL: u8 = 0xc0;
const FALSE: u8 = 0xc2;
const TRUE: u8 = 0xc3;
const BIN8: u8 = 0xc4;
const BIN16: u8 = 0xc5;
const BIN32: u8 = 0xc6;
const EXT8: u8 = 0xc7;
const EXT16: u8 = 0xc8;
const EXT32: u8 = 0xc9;
const FLOAT32: u8 = 0xca;
const FLOAT64: u8 = 0xcb;
const UINT8: u8 = 0xcc;
const UINT16: u8 = 0xcd;
const UINT32: u8 = 0xce;
const UINT64: u8 = 0xcf;
const INT8: u8 = 0xd0;
const INT16: u8 = 0xd1;
const INT32: u8 = 0xd2;
const INT64: u8 = 0xd3;
const FIXEXT1: u8 = 0xd4;
const FIXEXT2: u8 = 0xd5;
const FIXEXT4: u8 = 0xd6;
const FIXEXT8: u8 = 0xd7;
const FIXEXT16: u8 = 0xd8;
const STR8: u8 = 0xd9;
const STR16: u8 = 0xda;
const STR32: u8 = 0xdb;
const ARRAY16: u8 = 0xdc;
const ARRAY32: u8 = 0xdd;
const MAP16: u8 = 0xde;
const MAP32: u8 = 0xdf;

/// Decode a single value from the front of `buf`.
///
/// Returns the decoded value and the number of bytes consumed. Trailing
/// bytes (e.g. a second value, or a block-catalog entry that follows)
/// are left untouched.
///
/// # Errors
///
/// [`MsgpackError::Truncated`] if the input ends mid-value,
/// [`MsgpackError::UnsupportedTag`] if the leading byte matches no known
/// format.
pub fn decode(buf: &[u8]) -> Result<(Value, usize), MsgpackError> {
    let mut r = ByteReader::new(buf);
    let value = decode_value(&mut r)?;
    Ok((value, r.position()))
}

// `ByteReader`'s multi-byte primitives are little-endian (the card header
// and block catalog framing); the object codec's lengths and integers
// are big-endian, so these small helpers read the raw bytes directly
// rather than reusing `read_u16_le` and friends.
fn read_u16_be(r: &mut ByteReader<'_>) -> Result<u16, MsgpackError> {
    let b = r.read_bytes(2)?;
    Ok(u16::from_be_bytes([b[0], b[1]]))
}

fn read_u32_be(r: &mut ByteReader<'_>) -> Result<u32, MsgpackError> {
    let b = r.read_bytes(4)?;
    Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
}

fn read_u64_be(r: &mut ByteReader<'_>) -> Result<u64, MsgpackError> {
    let b = r.read_bytes(8)?;
    Ok(u64::from_be_bytes([
        b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
    ]))
}

fn decode_value(r: &mut ByteReader<'_>) -> Result<Value, MsgpackError> {
    let offset = r.position();
    let tag = r.read_u8().map_err(|_| MsgpackError::Truncated { offset })?;

    match tag {
        0x00..=0x7f => Ok(Value::UInt(UIntWidth::Fix, u64::from(tag))),
        0xe0..=0xff => Ok(Value::Int(IntWidth::Fix, i64::from(tag as i8))),
        0x80..=0x8f => decode_map_body(r, usize::from(tag & 0x0f), MapClass::Fix),
        0x90..=0x9f => decode_array_body(r, usize::from(tag & 0x0f), ArrClass::Fix),
        0xa0..=0xbf => decode_str_body(r, usize::from(tag & 0x1f), StrClass::Fix),
        NIL => Ok(Value::Null),
        FALSE => Ok(Value::Bool(false)),
        TRUE => Ok(Value::Bool(true)),
        BIN8 => {
            let len = usize::from(r.read_u8()?);
            decode_bin_body(r, len, BinClass::W8)
        }
        BIN16 => {
            let len = read_u16_be(r)? as usize;
            decode_bin_body(r, len, BinClass::W16)
        }
        BIN32 => {
            let len = read_u32_be(r)? as usize;
            decode_bin_body(r, len, BinClass::W32)
        }
        EXT8 => {
            let len = usize::from(r.read_u8()?);
            let type_code = r.read_i8()?;
            decode_ext_body(r, len, type_code, ExtClass::W8)
        }
        EXT16 => {
            let len = read_u16_be(r)? as usize;
            let type_code = r.read_i8()?;
            decode_ext_body(r, len, type_code, ExtClass::W16)
        }
        EXT32 => {
            let len = read_u32_be(r)? as usize;
            let type_code = r.read_i8()?;
            decode_ext_body(r, len, type_code, ExtClass::W32)
        }
        FLOAT32 => Ok(Value::Float32(r.read_f32_be()?)),
        FLOAT64 => Ok(Value::Float64(r.read_f64_be()?)),
        UINT8 => Ok(Value::UInt(UIntWidth::W8, u64::from(r.read_u8()?))),
        UINT16 => Ok(Value::UInt(UIntWidth::W16, u64::from(read_u16_be(r)?))),
        UINT32 => Ok(Value::UInt(UIntWidth::W32, u64::from(read_u32_be(r)?))),
        UINT64 => Ok(Value::UInt(UIntWidth::W64, read_u64_be(r)?)),
        INT8 => Ok(Value::Int(IntWidth::W8, i64::from(r.read_i8()?))),
        INT16 => Ok(Value::Int(IntWidth::W16, i64::from(read_u16_be(r)? as i16))),
        INT32 => Ok(Value::Int(IntWidth::W32, i64::from(read_u32_be(r)? as i32))),
        INT64 => Ok(Value::Int(IntWidth::W64, read_u64_be(r)? as i64)),
        FIXEXT1 => {
            let type_code = r.read_i8()?;
            decode_ext_body(r, 1, type_code, ExtClass::Fix1)
        }
        FIXEXT2 => {
            let type_code = r.read_i8()?;
            decode_ext_body(r, 2, type_code, ExtClass::Fix2)
        }
        FIXEXT4 => {
            let type_code = r.read_i8()?;
            decode_ext_body(r, 4, type_code, ExtClass::Fix4)
        }
        FIXEXT8 => {
            let type_code = r.read_i8()?;
            decode_ext_body(r, 8, type_code, ExtClass::Fix8)
        }
        FIXEXT16 => {
            let type_code = r.read_i8()?;
            decode_ext_body(r, 16, type_code, ExtClass::Fix16)
        }
        STR8 => {
            let len = usize::from(r.read_u8()?);
            decode_str_body(r, len, StrClass::W8)
        }
        STR16 => {
            let len = read_u16_be(r)? as usize;
            decode_str_body(r, len, StrClass::W16)
        }
        STR32 => {
            let len = read_u32_be(r)? as usize;
            decode_str_body(r, len, StrClass::W32)
        }
        ARRAY16 => {
            let len = read_u16_be(r)? as usize;
            decode_array_body(r, len, ArrClass::W16)
        }
        ARRAY32 => {
            let len = read_u32_be(r)? as usize;
            decode_array_body(r, len, ArrClass::W32)
        }
        MAP16 => {
            let len = read_u16_be(r)? as usize;
            decode_map_body(r, len, MapClass::W16)
        }
        MAP32 => {
            let len = read_u32_be(r)? as usize;
            decode_map_body(r, len, MapClass::W32)
        }
        other => Err(MsgpackError::UnsupportedTag { tag: other, offset }),
    }
}

fn decode_str_body(
    r: &mut ByteReader<'_>,
    len: usize,
    class: StrClass,
) -> Result<Value, MsgpackError> {
    let bytes = r.read_bytes(len)?;
    match std::str::from_utf8(bytes) {
        Ok(s) => Ok(Value::String(class, s.to_string())),
        // A decode error on UTF-8 downgrades the field to Bytes rather
        // than failing the whole decode — game data is always valid
        // UTF-8 here, so this only fires on corrupted input.
        Err(_) => Ok(Value::Bytes(bin_class_for_len(len), bytes.to_vec())),
    }
}

fn decode_bin_body(
    r: &mut ByteReader<'_>,
    len: usize,
    class: BinClass,
) -> Result<Value, MsgpackError> {
    let bytes = r.read_bytes(len)?;
    Ok(Value::Bytes(class, bytes.to_vec()))
}

fn decode_ext_body(
    r: &mut ByteReader<'_>,
    len: usize,
    type_code: i8,
    class: ExtClass,
) -> Result<Value, MsgpackError> {
    let bytes = r.read_bytes(len)?;
    Ok(Value::Extension(class, type_code, bytes.to_vec()))
}

fn decode_array_body(
    r: &mut ByteReader<'_>,
    len: usize,
    class: ArrClass,
) -> Result<Value, MsgpackError> {
    let mut items = Vec::with_capacity(len.min(4096));
    for _ in 0..len {
        items.push(decode_value(r)?);
    }
    Ok(Value::Array(class, items))
}

fn decode_map_body(
    r: &mut ByteReader<'_>,
    len: usize,
    class: MapClass,
) -> Result<Value, MsgpackError> {
    let mut pairs = Vec::with_capacity(len.min(4096));
    for _ in 0..len {
        let k = decode_value(r)?;
        let v = decode_value(r)?;
        pairs.push((k, v));
    }
    Ok(Value::Map(class, pairs))
}

fn bin_class_for_len(len: usize) -> BinClass {
    if len <= 0xff {
        BinClass::W8
    } else if len <= 0xffff {
        BinClass::W16
    } else {
        BinClass::W32
    }
}

/// Encode a value, appending its bytes to `out`.
///
/// This is the inverse of [`decode`]: each container/scalar variant
/// carries the tag class it was decoded with (or constructed with), and
/// `encode` always selects that same class rather than the narrowest one
/// that would fit the value — see the "shape memo" note on [`Value`].
pub fn encode(value: &Value, out: &mut Vec<u8>) {
    match value {
        Value::Null => out.push(NIL),
        Value::Bool(false) => out.push(FALSE),
        Value::Bool(true) => out.push(TRUE),
        Value::Int(width, v) => encode_int(*width, *v, out),
        Value::UInt(width, v) => encode_uint(*width, *v, out),
        Value::Float32(v) => {
            out.push(FLOAT32);
            out.extend_from_slice(&v.to_be_bytes());
        }
        Value::Float64(v) => {
            out.push(FLOAT64);
            out.extend_from_slice(&v.to_be_bytes());
        }
        Value::String(class, s) => encode_str(*class, s.as_bytes(), out),
        Value::Bytes(class, b) => encode_bin(*class, b, out),
        Value::Array(class, items) => encode_array(*class, items, out),
        Value::Map(class, pairs) => encode_map(*class, pairs, out),
        Value::Extension(class, type_code, data) => encode_ext(*class, *type_code, data, out),
    }
}

/// Encode a value into a freshly allocated buffer. Convenience wrapper
/// around [`encode`] for call sites that don't already have an output
/// buffer to append to (e.g. re-encoding a nested payload field).
#[must_use]
pub fn encode_to_vec(value: &Value) -> Vec<u8> {
    let mut out = Vec::new();
    encode(value, &mut out);
    out
}

fn encode_int(width: IntWidth, v: i64, out: &mut Vec<u8>) {
    match width {
        IntWidth::Fix => out.push(v as i8 as u8),
        IntWidth::W8 => {
            out.push(INT8);
            out.push(v as i8 as u8);
        }
        IntWidth::W16 => {
            out.push(INT16);
            out.extend_from_slice(&(v as i16).to_be_bytes());
        }
        IntWidth::W32 => {
            out.push(INT32);
            out.extend_from_slice(&(v as i32).to_be_bytes());
        }
        IntWidth::W64 => {
            out.push(INT64);
            out.extend_from_slice(&v.to_be_bytes());
        }
    }
}

fn encode_uint(width: UIntWidth, v: u64, out: &mut Vec<u8>) {
    match width {
        UIntWidth::Fix => out.push(v as u8),
        UIntWidth::W8 => {
            out.push(UINT8);
            out.push(v as u8);
        }
        UIntWidth::W16 => {
            out.push(UINT16);
            out.extend_from_slice(&(v as u16).to_be_bytes());
        }
        UIntWidth::W32 => {
            out.push(UINT32);
            out.extend_from_slice(&(v as u32).to_be_bytes());
        }
        UIntWidth::W64 => {
            out.push(UINT64);
            out.extend_from_slice(&v.to_be_bytes());
        }
    }
}

fn encode_str(class: StrClass, bytes: &[u8], out: &mut Vec<u8>) {
    match class {
        StrClass::Fix => out.push(0xa0 | (bytes.len() as u8 & 0x1f)),
        StrClass::W8 => {
            out.push(STR8);
            out.push(bytes.len() as u8);
        }
        StrClass::W16 => {
            out.push(STR16);
            out.extend_from_slice(&(bytes.len() as u16).to_be_bytes());
        }
        StrClass::W32 => {
            out.push(STR32);
            out.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
        }
    }
    out.extend_from_slice(bytes);
}

fn encode_bin(class: BinClass, bytes: &[u8], out: &mut Vec<u8>) {
    match class {
        BinClass::W8 => {
            out.push(BIN8);
            out.push(bytes.len() as u8);
        }
        BinClass::W16 => {
            out.push(BIN16);
            out.extend_from_slice(&(bytes.len() as u16).to_be_bytes());
        }
        BinClass::W32 => {
            out.push(BIN32);
            out.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
        }
    }
    out.extend_from_slice(bytes);
}

fn encode_array(class: ArrClass, items: &[Value], out: &mut Vec<u8>) {
    match class {
        ArrClass::Fix => out.push(0x90 | (items.len() as u8 & 0x0f)),
        ArrClass::W16 => {
            out.push(ARRAY16);
            out.extend_from_slice(&(items.len() as u16).to_be_bytes());
        }
        ArrClass::W32 => {
            out.push(ARRAY32);
            out.extend_from_slice(&(items.len() as u32).to_be_bytes());
        }
    }
    for item in items {
        encode(item, out);
    }
}

fn encode_map(class: MapClass, pairs: &[(Value, Value)], out: &mut Vec<u8>) {
    match class {
        MapClass::Fix => out.push(0x80 | (pairs.len() as u8 & 0x0f)),
        MapClass::W16 => {
            out.push(MAP16);
            out.extend_from_slice(&(pairs.len() as u16).to_be_bytes());
        }
        MapClass::W32 => {
            out.push(MAP32);
            out.extend_from_slice(&(pairs.len() as u32).to_be_bytes());
        }
    }
    for (k, v) in pairs {
        encode(k, out);
        encode(v, out);
    }
}

fn encode_ext(class: ExtClass, type_code: i8, data: &[u8], out: &mut Vec<u8>) {
    match class {
        ExtClass::Fix1 => out.push(FIXEXT1),
        ExtClass::Fix2 => out.push(FIXEXT2),
        ExtClass::Fix4 => out.push(FIXEXT4),
        ExtClass::Fix8 => out.push(FIXEXT8),
        ExtClass::Fix16 => out.push(FIXEXT16),
        ExtClass::W8 => {
            out.push(EXT8);
            out.push(data.len() as u8);
        }
        ExtClass::W16 => {
            out.push(EXT16);
            out.extend_from_slice(&(data.len() as u16).to_be_bytes());
        }
        ExtClass::W32 => {
            out.push(EXT32);
            out.extend_from_slice(&(data.len() as u32).to_be_bytes());
        }
    }
    out.push(type_code as u8);
    out.extend_from_slice(data);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{ArrClass, BinClass, ExtClass};

    fn roundtrip(v: &Value) -> Value {
        let bytes = encode_to_vec(v);
        let (decoded, consumed) = decode(&bytes).unwrap();
        assert_eq!(consumed, bytes.len());
        decoded
    }

    #[test]
    fn roundtrip_nil_and_bools() {
        assert_eq!(roundtrip(&Value::Null), Value::Null);
        assert_eq!(roundtrip(&Value::Bool(true)), Value::Bool(true));
        assert_eq!(roundtrip(&Value::Bool(false)), Value::Bool(false));
    }

    #[test]
    fn roundtrip_int_width_boundaries() {
        let cases = [
            Value::Int(IntWidth::Fix, 5),
            Value::Int(IntWidth::Fix, -1),
            Value::Int(IntWidth::W8, -100),
            Value::Int(IntWidth::W16, -30_000),
            Value::Int(IntWidth::W32, i32::MIN as i64),
            Value::Int(IntWidth::W32, i32::MAX as i64),
            Value::Int(IntWidth::W64, i64::MIN),
            Value::Int(IntWidth::W64, i64::MAX),
        ];
        for v in cases {
            assert_eq!(roundtrip(&v), v);
        }
    }

    #[test]
    fn roundtrip_uint_width_boundaries() {
        let cases = [
            Value::UInt(UIntWidth::Fix, 0),
            Value::UInt(UIntWidth::Fix, 127),
            Value::UInt(UIntWidth::W8, 200),
            Value::UInt(UIntWidth::W16, 60_000),
            Value::UInt(UIntWidth::W32, u32::MAX as u64),
            Value::UInt(UIntWidth::W64, u64::MAX),
        ];
        for v in cases {
            assert_eq!(roundtrip(&v), v);
        }
    }

    #[test]
    fn roundtrip_floats_including_nan_inf_negzero() {
        for v in [
            Value::Float32(1.5),
            Value::Float32(f32::NAN),
            Value::Float32(f32::INFINITY),
            Value::Float32(f32::NEG_INFINITY),
            Value::Float32(-0.0),
            Value::Float64(f64::NAN),
            Value::Float64(f64::INFINITY),
            Value::Float64(-0.0),
        ] {
            let decoded = roundtrip(&v);
            assert_eq!(decoded, v);
        }
    }

    #[test]
    fn roundtrip_strings_with_astral_chars() {
        let cases = [
            Value::String(StrClass::Fix, "short".to_string()),
            Value::String(StrClass::W8, "x".repeat(40)),
            Value::String(StrClass::W16, "y".repeat(300)),
            Value::String(StrClass::Fix, "𝄞𝔘𝕏".to_string()),
        ];
        for v in cases {
            assert_eq!(roundtrip(&v), v);
        }
    }

    #[test]
    fn invalid_utf8_in_str_tag_downgrades_to_bytes() {
        // Hand-built fixstr tag (length 2) with invalid UTF-8 bytes.
        let bytes = vec![0xa2, 0xff, 0xfe];
        let (decoded, consumed) = decode(&bytes).unwrap();
        assert_eq!(consumed, bytes.len());
        assert!(matches!(decoded, Value::Bytes(BinClass::W8, ref b) if b == &[0xff, 0xfe]));
    }

    #[test]
    fn roundtrip_bytes_all_classes() {
        let cases = [
            Value::Bytes(BinClass::W8, vec![1, 2, 3]),
            Value::Bytes(BinClass::W16, vec![7u8; 300]),
            Value::Bytes(BinClass::W32, vec![9u8; 70_000]),
            Value::Bytes(BinClass::W8, vec![]),
        ];
        for v in cases {
            assert_eq!(roundtrip(&v), v);
        }
    }

    #[test]
    fn roundtrip_arrays_and_fix_class_preserved() {
        let inner = Value::array(vec![Value::int(1), Value::int(2)]);
        assert_eq!(roundtrip(&inner), inner);

        let wide = Value::Array(ArrClass::W16, vec![Value::Null; 20]);
        let decoded = roundtrip(&wide);
        assert!(matches!(decoded, Value::Array(ArrClass::W16, _)));
    }

    #[test]
    fn roundtrip_maps_preserve_insertion_order_and_nonstring_keys() {
        let pairs = vec![
            (Value::int(2), Value::string("two")),
            (Value::string("one"), Value::int(1)),
            (Value::Bool(true), Value::Null),
        ];
        let m = Value::map(pairs.clone());
        let decoded = roundtrip(&m);
        match decoded {
            Value::Map(_, got) => assert_eq!(got, pairs),
            _ => panic!("expected map"),
        }
    }

    #[test]
    fn roundtrip_extension() {
        let v = Value::Extension(ExtClass::Fix4, 5, vec![1, 2, 3, 4]);
        assert_eq!(roundtrip(&v), v);

        let v2 = Value::Extension(ExtClass::W16, -1, vec![0u8; 1000]);
        assert_eq!(roundtrip(&v2), v2);
    }

    #[test]
    fn value_int_and_uint_pick_the_narrowest_correct_width() {
        // A freshly-constructed Value::uint for a value outside the
        // fixint range must not truncate to a single byte — this is
        // exactly the shape BlockCatalog::encode relies on for real
        // block offsets/sizes, which routinely exceed 127.
        for v in [0u64, 127, 128, 255, 256, 60_000, 70_000, u64::from(u32::MAX) + 1] {
            let decoded = roundtrip(&Value::uint(v));
            assert_eq!(decoded, Value::uint(v));
            assert!(matches!(decoded, Value::UInt(_, n) if n == v));
        }
        for v in [0i64, -32, -33, 127, 128, -129, 40_000, -40_000, i64::from(i32::MAX) + 1] {
            let decoded = roundtrip(&Value::int(v));
            assert_eq!(decoded, Value::int(v));
            assert!(matches!(decoded, Value::Int(_, n) if n == v));
        }
    }

    #[test]
    fn value_string_and_bytes_pick_the_narrowest_correct_class() {
        // A fixstr tag only has 5 bits for the length; a string built with
        // Value::string past 31 bytes must step up to str8/16/32 instead
        // of truncating the tag and writing a mismatched payload.
        for len in [0usize, 31, 32, 255, 256, 70_000] {
            let s = "a".repeat(len);
            let decoded = roundtrip(&Value::string(s.clone()));
            assert_eq!(decoded, Value::string(s.clone()));
            assert!(matches!(decoded, Value::String(_, ref got) if got.len() == len));
        }
        for len in [0usize, 255, 256, 70_000] {
            let b = vec![7u8; len];
            let decoded = roundtrip(&Value::bytes(b.clone()));
            assert_eq!(decoded, Value::bytes(b.clone()));
            assert!(matches!(decoded, Value::Bytes(_, ref got) if got.len() == len));
        }
    }

    #[test]
    fn value_array_and_map_pick_the_narrowest_correct_class() {
        // Fixarray/fixmap only have 4 bits for the count; constructing
        // one with more than 15 elements must step up to the 16/32 class
        // instead of masking the count and still writing every element.
        for len in [0usize, 15, 16, 300] {
            let items: Vec<Value> = (0..len as i64).map(Value::int).collect();
            let decoded = roundtrip(&Value::array(items.clone()));
            match decoded {
                Value::Array(_, got) => assert_eq!(got, items),
                _ => panic!("expected array"),
            }
        }
        for len in [0usize, 15, 16, 300] {
            let pairs: Vec<(Value, Value)> =
                (0..len as i64).map(|i| (Value::int(i), Value::int(i))).collect();
            let decoded = roundtrip(&Value::map(pairs.clone()));
            match decoded {
                Value::Map(_, got) => assert_eq!(got, pairs),
                _ => panic!("expected map"),
            }
        }
    }

    #[test]
    fn unknown_tag_is_rejected() {
        // 0xc1 is reserved/never assigned in the object format.
        let bytes = vec![0xc1];
        let err = decode(&bytes).unwrap_err();
        assert!(matches!(err, MsgpackError::UnsupportedTag { tag: 0xc1, .. }));
    }

    #[test]
    fn truncated_container_is_rejected() {
        // fixarray claiming 2 elements but only one present.
        let mut bytes = vec![0x92];
        encode(&Value::int(1), &mut bytes);
        let err = decode(&bytes).unwrap_err();
        assert!(matches!(err, MsgpackError::Truncated { .. }));
    }

    #[test]
    fn empty_map_and_array_roundtrip() {
        assert_eq!(roundtrip(&Value::map(vec![])), Value::map(vec![]));
        assert_eq!(roundtrip(&Value::array(vec![])), Value::array(vec![]));
    }

    #[test]
    fn decode_leaves_trailing_bytes_untouched() {
        let mut bytes = encode_to_vec(&Value::int(1));
        bytes.extend_from_slice(&[0xAA, 0xBB]);
        let (v, consumed) = decode(&bytes).unwrap();
        assert_eq!(v, Value::int(1));
        assert_eq!(consumed, bytes.len() - 2);
    }
}
