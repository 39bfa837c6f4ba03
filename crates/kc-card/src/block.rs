use crate::field_value::FieldValue;

/// A block's payload: either a decoded tree (known blocks) or the raw
/// bytes kept verbatim (unknown blocks are never decoded and never
/// modified, only carried through to the output at their original
/// catalog position).
#[derive(Clone, Debug, PartialEq)]
pub enum BlockPayload {
    Decoded(FieldValue),
    Opaque(Vec<u8>),
}

/// One named block from the catalog, holding either its decoded value
/// tree or its opaque bytes.
#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    pub name: String,
    pub version: String,
    pub payload: BlockPayload,
    /// Byte length recorded in the catalog at load time, kept only for
    /// cross-checking — `save` recomputes the real size from the
    /// re-encoded bytes rather than trusting this field.
    pub original_size: u64,
}

impl Block {
    #[must_use]
    pub fn as_field_value(&self) -> Option<&FieldValue> {
        match &self.payload {
            BlockPayload::Decoded(v) => Some(v),
            BlockPayload::Opaque(_) => None,
        }
    }

    /// Look up a top-level key in a decoded block's value tree. Returns
    /// `None` for opaque blocks or a missing key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.as_field_value()?.get_str(key)
    }

    /// Mutable lookup of a top-level key — the write side of
    /// [`Block::get`]. `*block.get_mut("nickname").unwrap() = ...` is how
    /// a leaf value is edited; unknown (opaque) blocks have no value
    /// tree to mutate and always return `None`.
    #[must_use]
    pub fn get_mut(&mut self, key: &str) -> Option<&mut FieldValue> {
        match &mut self.payload {
            BlockPayload::Decoded(v) => v.get_str_mut(key),
            BlockPayload::Opaque(_) => None,
        }
    }
}
