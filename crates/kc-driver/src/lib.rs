#![warn(clippy::pedantic)]

//! Presentation layer on top of `kc-card`: pretty-printing a block's
//! decoded value tree for inspection, and exporting a whole document to
//! JSON. Adds no codec logic of its own — every byte decision was already
//! made by `kc-card`.

pub mod error;
pub mod json;
pub mod prettify;
pub mod save;

pub use error::DriverError;
pub use json::to_json;
pub use prettify::prettify;
pub use save::save_json;
