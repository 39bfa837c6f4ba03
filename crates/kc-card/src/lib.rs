#![warn(clippy::pedantic)]

//! The card/scene document model: variant dispatch, the block catalog,
//! the decoded block-value tree (with nested plugin-payload handling),
//! and the scene object-tree walk.
//!
//! Layered on `kc-wire` (PNG framing, byte cursors) and `kc-msgpack`
//! (the self-describing object codec); this crate adds the game-specific
//! schema on top: variant detection, the block catalog, nested plugin
//! payloads, and the scene object tree.

pub mod block;
pub mod catalog;
pub mod document;
pub mod error;
pub mod field_value;
pub mod header;
pub mod scene;
pub mod variant;

pub use block::{Block, BlockPayload};
pub use catalog::{BlockCatalog, CatalogEntry, CatalogShape};
pub use document::Document;
pub use error::{CardError, NestedDecodeWarning, NestedFailureReason};
pub use field_value::FieldValue;
pub use header::HeaderFields;
pub use scene::{walk, ObjectType, SceneNode, SceneWalker};
pub use variant::{detect, Variant, VariantDescriptor, VARIANTS};
