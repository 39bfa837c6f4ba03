use kc_wire::WireError;

/// Errors from decoding or encoding a single self-describing object value.
///
/// `MsgpackError` sits one layer above [`WireError`] — it deals with tag
/// bytes and container shapes rather than raw buffer bounds, and wraps
/// `WireError` for the short-read/short-write cases that bottom out in
/// the cursor primitives.
#[derive(Debug, thiserror::Error)]
pub enum MsgpackError {
    /// The input ended before a complete value could be decoded.
    #[error("truncated object value at offset {offset}")]
    Truncated { offset: usize },

    /// The leading tag byte did not match any known format.
    #[error("unsupported object tag {tag:#04X} at offset {offset}")]
    UnsupportedTag { tag: u8, offset: usize },

    #[error(transparent)]
    Wire(#[from] WireError),
}
