use kc_msgpack::MsgpackError;
use kc_wire::WireError;

/// Errors from loading or saving a card/scene document.
///
/// Error hierarchy:
///
/// ```text
///   CardError
///   ├── UnknownVariant             ← no descriptor matched the header magic
///   ├── SchemaMismatch             ← a header field had the wrong shape/type
///   ├── Msgpack(MsgpackError)      ← from kc-msgpack object decoding
///   └── Wire(WireError)            ← from kc-wire PNG/cursor framing
/// ```
///
/// Unknown blocks and nested-decode failures are not represented here —
/// both are non-fatal per the load contract and are recorded on the
/// loaded [`crate::Document`] as warnings instead of failing `load`.
#[derive(Debug, thiserror::Error)]
pub enum CardError {
    /// No registered variant descriptor matched the file's leading magic.
    #[error("unrecognized card/scene variant, header magic {observed:?}")]
    UnknownVariant { observed: String },

    /// A header or catalog field did not have the shape the variant's
    /// descriptor expects (e.g. the catalog value was neither `Map` nor
    /// `Array`).
    #[error("schema mismatch in {context}: {reason}")]
    SchemaMismatch {
        context: &'static str,
        reason: &'static str,
    },

    #[error(transparent)]
    Msgpack(#[from] MsgpackError),

    #[error(transparent)]
    Wire(#[from] WireError),
}

/// A non-fatal failure to decode a nested plugin payload.
///
/// Recorded on the owning [`crate::Document`] rather than failing the
/// load — the field is left as opaque bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NestedDecodeWarning {
    pub block_name: String,
    pub key: String,
    pub reason: NestedFailureReason,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NestedFailureReason {
    /// `kc-msgpack` rejected the inner bytes outright.
    DecodeFailed,
    /// The inner bytes decoded but left a non-empty remainder — committing
    /// a partial decode would silently drop data on save, so the field is
    /// kept opaque instead.
    TrailingBytes { consumed: usize, total: usize },
}
