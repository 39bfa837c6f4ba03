#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// A read ran off the end of the buffer.
    #[error("unexpected end of input at offset {offset}, needed {needed} more byte(s)")]
    Truncated { offset: usize, needed: usize },

    /// A write ran off the end of a fixed-size buffer.
    #[error("write would overflow buffer: offset {offset}, needed {needed} byte(s)")]
    WriteOverflow { offset: usize, needed: usize },

    /// PNG framing failed: no signature, or no `IEND` chunk was found.
    #[error("malformed PNG container: {reason}")]
    MalformedContainer { reason: &'static str },

    /// A length-prefixed string was not valid UTF-8.
    #[error("invalid UTF-8 in length-prefixed string at offset {offset}")]
    InvalidUtf8 { offset: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// `Truncated`/`WriteOverflow` carry the cursor offset so a caller debugging
// a hand-edited card file can find the failing byte without re-deriving it
// from a stack trace. `MalformedContainer` carries a static reason string
// rather than a formatted one — the PNG framer only ever fails for one of
// a handful of fixed reasons (bad signature, missing IEND, truncated chunk),
// so there's nothing dynamic worth formatting.
