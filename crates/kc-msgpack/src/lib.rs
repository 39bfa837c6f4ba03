#![warn(clippy::pedantic)]

//! A decoder/encoder for the self-describing object format embedded in
//! card and scene files: nil, bool, ints/uints of four widths, IEEE-754
//! floats, UTF-8 strings, raw byte strings, arrays, maps, and typed
//! extension blobs.
//!
//! [`Value`] is the in-memory tree. [`decode`] and [`encode`] are its
//! codec; they're kept free functions rather than methods on a stateless
//! "codec" struct since there's no configuration or session state to
//! carry between calls — matching how `kc-wire`'s framing functions are
//! also free functions.

pub mod codec;
pub mod error;
pub mod value;

pub use codec::{decode, encode, encode_to_vec};
pub use error::MsgpackError;
pub use value::{ArrClass, BinClass, ExtClass, IntWidth, MapClass, StrClass, UIntWidth, Value};
