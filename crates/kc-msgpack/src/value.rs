/// Which exact integer tag a signed value was decoded from.
///
/// `Fix` covers both positive fixint (`0x00`-`0x7f`) and negative fixint
/// (`0xe0`-`0xff`) — both are single-byte encodings, so there is nothing
/// to disambiguate between them beyond the value's sign. Re-encoding
/// always reproduces the same byte count the decoder observed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IntWidth {
    Fix,
    W8,
    W16,
    W32,
    W64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UIntWidth {
    Fix,
    W8,
    W16,
    W32,
    W64,
}

/// Tag class for string values: fixstr (0-31 bytes, length in the tag
/// byte itself) or str8/16/32 with an explicit length prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StrClass {
    Fix,
    W8,
    W16,
    W32,
}

/// Tag class for binary values: bin8/16/32. There is no fixed-width bin
/// tag in the object format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinClass {
    W8,
    W16,
    W32,
}

/// Tag class for arrays: fixarray (0-15 elements) or array16/32.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArrClass {
    Fix,
    W16,
    W32,
}

/// Tag class for maps: fixmap (0-15 pairs) or map16/32.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MapClass {
    Fix,
    W16,
    W32,
}

/// Tag class for extension values: the five fixed-size `fixext` forms
/// (1/2/4/8/16 bytes of data) or ext8/16/32 with an explicit length.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExtClass {
    Fix1,
    Fix2,
    Fix4,
    Fix8,
    Fix16,
    W8,
    W16,
    W32,
}

/// A decoded self-describing object value.
///
/// Every container and scalar variant carries the tag class it was
/// decoded with (or, for freshly-constructed values, the default class
/// the encoder should pick). Re-encoding selects the same tag family the
/// decoder observed, so `encode(decode(bytes)) == bytes` for any
/// accepted input, rather than silently picking the shortest
/// representation and changing the byte length.
#[derive(Clone, Debug)]
pub enum Value {
    Null,
    Bool(bool),
    Int(IntWidth, i64),
    UInt(UIntWidth, u64),
    Float32(f32),
    Float64(f64),
    String(StrClass, String),
    Bytes(BinClass, Vec<u8>),
    Array(ArrClass, Vec<Value>),
    /// Insertion-ordered key/value pairs — never a hashed map. Key order
    /// on disk is part of the round-trip contract.
    Map(MapClass, Vec<(Value, Value)>),
    Extension(ExtClass, i8, Vec<u8>),
}

/// The narrowest signed tag that can hold `v`: fixint covers -32..=127
/// (both the positive and negative fixint ranges), everything wider
/// steps up through int8/16/32/64 the same way a MessagePack-family
/// encoder packing fresh data would.
fn narrowest_int_width(v: i64) -> IntWidth {
    if (-32..=127).contains(&v) {
        IntWidth::Fix
    } else if (i64::from(i8::MIN)..=i64::from(i8::MAX)).contains(&v) {
        IntWidth::W8
    } else if (i64::from(i16::MIN)..=i64::from(i16::MAX)).contains(&v) {
        IntWidth::W16
    } else if (i64::from(i32::MIN)..=i64::from(i32::MAX)).contains(&v) {
        IntWidth::W32
    } else {
        IntWidth::W64
    }
}

/// The narrowest unsigned tag that can hold `v`: positive fixint only
/// covers 0..=127 (the top bit of the tag byte must be clear), so
/// anything larger steps up through uint8/16/32/64.
fn narrowest_uint_width(v: u64) -> UIntWidth {
    if v <= 127 {
        UIntWidth::Fix
    } else if v <= u64::from(u8::MAX) {
        UIntWidth::W8
    } else if v <= u64::from(u16::MAX) {
        UIntWidth::W16
    } else if v <= u64::from(u32::MAX) {
        UIntWidth::W32
    } else {
        UIntWidth::W64
    }
}

/// The narrowest string tag that can hold `len` bytes: fixstr covers
/// 0..=31 (the length is packed into the low 5 bits of the tag byte
/// itself), str8/16/32 carry an explicit length prefix for anything
/// wider.
fn narrowest_str_class(len: usize) -> StrClass {
    if len <= 0x1f {
        StrClass::Fix
    } else if len <= usize::from(u8::MAX) {
        StrClass::W8
    } else if len <= usize::from(u16::MAX) {
        StrClass::W16
    } else {
        StrClass::W32
    }
}

/// The narrowest binary tag that can hold `len` bytes. There is no fixed
/// (tag-packed-length) form for binary data, so bin8 is the narrowest
/// available class.
fn narrowest_bin_class(len: usize) -> BinClass {
    if len <= usize::from(u8::MAX) {
        BinClass::W8
    } else if len <= usize::from(u16::MAX) {
        BinClass::W16
    } else {
        BinClass::W32
    }
}

/// The narrowest array tag that can hold `len` elements: fixarray covers
/// 0..=15 (the count is packed into the low 4 bits of the tag byte
/// itself), array16/32 carry an explicit count for anything wider.
fn narrowest_arr_class(len: usize) -> ArrClass {
    if len <= 0x0f {
        ArrClass::Fix
    } else if len <= usize::from(u16::MAX) {
        ArrClass::W16
    } else {
        ArrClass::W32
    }
}

/// The narrowest map tag that can hold `len` pairs, by the same
/// tag-packed-count rule as [`narrowest_arr_class`].
fn narrowest_map_class(len: usize) -> MapClass {
    if len <= 0x0f {
        MapClass::Fix
    } else if len <= usize::from(u16::MAX) {
        MapClass::W16
    } else {
        MapClass::W32
    }
}

impl Value {
    /// Construct a map value, tagging it with the narrowest class that
    /// fits its pair count — callers building a tree programmatically
    /// never need to pick a tag class by hand.
    pub fn map(pairs: Vec<(Value, Value)>) -> Self {
        let class = narrowest_map_class(pairs.len());
        Value::Map(class, pairs)
    }

    pub fn array(items: Vec<Value>) -> Self {
        let class = narrowest_arr_class(items.len());
        Value::Array(class, items)
    }

    pub fn string(s: impl Into<String>) -> Self {
        let s = s.into();
        let class = narrowest_str_class(s.len());
        Value::String(class, s)
    }

    pub fn bytes(b: impl Into<Vec<u8>>) -> Self {
        let b = b.into();
        let class = narrowest_bin_class(b.len());
        Value::Bytes(class, b)
    }

    pub fn int(v: i64) -> Self {
        Value::Int(narrowest_int_width(v), v)
    }

    pub fn uint(v: u64) -> Self {
        Value::UInt(narrowest_uint_width(v), v)
    }

    /// Look up a value by key in a `Map`, comparing keys structurally.
    /// Returns `None` for non-map values or a missing key.
    pub fn get(&self, key: &Value) -> Option<&Value> {
        match self {
            Value::Map(_, pairs) => pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Convenience lookup for the common case of a string-keyed map.
    pub fn get_str(&self, key: &str) -> Option<&Value> {
        self.get(&Value::string(key))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(_, s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&[(Value, Value)]> {
        match self {
            Value::Map(_, pairs) => Some(pairs),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut Vec<(Value, Value)>> {
        match self {
            Value::Map(_, pairs) => Some(pairs),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(_, b) => Some(b),
            _ => None,
        }
    }
}

/// Manual `PartialEq`: floats compare by bit pattern, not IEEE-754
/// equality, so that NaN round-trips equal itself and `-0.0` stays
/// distinct from `0.0`.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(wa, a), Value::Int(wb, b)) => wa == wb && a == b,
            (Value::UInt(wa, a), Value::UInt(wb, b)) => wa == wb && a == b,
            (Value::Float32(a), Value::Float32(b)) => a.to_bits() == b.to_bits(),
            (Value::Float64(a), Value::Float64(b)) => a.to_bits() == b.to_bits(),
            (Value::String(ca, a), Value::String(cb, b)) => ca == cb && a == b,
            (Value::Bytes(ca, a), Value::Bytes(cb, b)) => ca == cb && a == b,
            (Value::Array(ca, a), Value::Array(cb, b)) => ca == cb && a == b,
            (Value::Map(ca, a), Value::Map(cb, b)) => ca == cb && a == b,
            (Value::Extension(ca, ta, a), Value::Extension(cb, tb, b)) => {
                ca == cb && ta == tb && a == b
            }
            _ => false,
        }
    }
}
