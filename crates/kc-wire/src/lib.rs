#![warn(clippy::pedantic)]

//! Low-level byte primitives for the card/scene codec: a positioned
//! reader/writer (`cursor`) and PNG chunk framing (`png`). Neither module
//! knows anything about the object format or block schemas layered on
//! top in `kc-msgpack` and `kc-card`.

pub mod cursor;
pub mod error;
pub mod png;

pub use cursor::{ByteReader, ByteWriter};
pub use error::WireError;
