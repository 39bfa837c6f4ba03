use std::path::PathBuf;

use kc_wire::png;
use kc_wire::{ByteReader, ByteWriter};

use crate::block::{Block, BlockPayload};
use crate::catalog::{BlockCatalog, CatalogEntry};
use crate::error::{CardError, NestedDecodeWarning};
use crate::field_value::{decode_nested, FieldValue};
use crate::header::HeaderFields;
use crate::variant::{self, Variant, VariantDescriptor};

/// Where a block lives in the original catalog order: in `blocks` (known,
/// decoded) or `unknown_blocks` (opaque). Reconstructing this interleave
/// on save is what lets unknown blocks stay at their original catalog
/// position, rather than being appended after all known blocks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BlockRef {
    Known(usize),
    Unknown(usize),
}

/// The in-memory tree for one loaded card or scene file.
///
/// Constructed only by [`Document::load`] / [`Document::load_bytes`] (or
/// programmatically, for synthesis — not a goal of this crate). Mutation
/// happens pointwise on `Value` leaves reached through [`Block::get`];
/// structural edits (new map keys, appended array elements) are allowed
/// and re-encode with default tag widths on save.
#[derive(Clone, Debug)]
pub struct Document {
    pub variant: Variant,
    pub image_bytes: Vec<u8>,
    pub face_image_bytes: Option<Vec<u8>>,
    pub header_fields: HeaderFields,
    pub blocks: Vec<Block>,
    pub unknown_blocks: Vec<Block>,
    pub warnings: Vec<NestedDecodeWarning>,
    pub source_path: Option<PathBuf>,

    catalog_shape: crate::catalog::CatalogShape,
    block_order: Vec<BlockRef>,
}

impl Document {
    /// # Errors
    ///
    /// [`CardError`] if the PNG framing, header, catalog, or any known
    /// block's body fails to decode. Unknown blocks and nested-decode
    /// failures never cause this to fail — see [`Document::warnings`].
    pub fn load_bytes(bytes: &[u8]) -> Result<Self, CardError> {
        let framed = png::split(bytes)?;

        let mut r = ByteReader::new(framed.tail);
        let has_face_image = framed.face_image_bytes.is_some();
        // The header layout itself doesn't vary across variants, so it
        // can be parsed once and then used to dispatch.
        let header_fields = HeaderFields::read_from(&mut r, has_face_image)?;
        let descriptor = variant::detect(&header_fields.header_string)?;

        let (catalog_value, consumed) = kc_msgpack::decode(r.rest())?;
        r.seek(r.position() + consumed)?;
        let catalog = BlockCatalog::decode(&catalog_value)?;

        let _blockdata_size = r.read_i64_le()?;
        let block_bodies = r.rest();

        let mut blocks = Vec::new();
        let mut unknown_blocks = Vec::new();
        let mut block_order = Vec::with_capacity(catalog.entries.len());
        let mut warnings = Vec::new();

        for entry in &catalog.entries {
            let slice = slice_block(block_bodies, entry)?;
            if descriptor.is_known_block(&entry.name) {
                let (value, consumed) = kc_msgpack::decode(slice)?;
                if consumed != slice.len() {
                    return Err(CardError::SchemaMismatch {
                        context: "known block body",
                        reason: "body did not fully decode as a single value",
                    });
                }
                let mut tree = FieldValue::from_value(&value);
                decode_nested(&entry.name, &mut tree, descriptor, &mut warnings);
                block_order.push(BlockRef::Known(blocks.len()));
                blocks.push(Block {
                    name: entry.name.clone(),
                    version: entry.version.clone(),
                    payload: BlockPayload::Decoded(tree),
                    original_size: entry.size,
                });
            } else {
                block_order.push(BlockRef::Unknown(unknown_blocks.len()));
                unknown_blocks.push(Block {
                    name: entry.name.clone(),
                    version: entry.version.clone(),
                    payload: BlockPayload::Opaque(slice.to_vec()),
                    original_size: entry.size,
                });
            }
        }

        Ok(Self {
            variant: descriptor.variant,
            image_bytes: framed.image_bytes.to_vec(),
            face_image_bytes: framed.face_image_bytes.map(<[u8]>::to_vec),
            header_fields,
            blocks,
            unknown_blocks,
            warnings,
            source_path: None,
            catalog_shape: catalog.shape,
            block_order,
        })
    }

    /// # Errors
    ///
    /// [`CardError::Wire`] on an I/O failure reading `path`; other
    /// variants as in [`Document::load_bytes`].
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, CardError> {
        let path = path.into();
        let bytes = std::fs::read(&path).map_err(kc_wire::WireError::Io)?;
        let mut doc = Self::load_bytes(&bytes)?;
        doc.source_path = Some(path);
        Ok(doc)
    }

    /// # Errors
    ///
    /// [`CardError`] if a mutated block fails to re-encode (e.g. a
    /// user-supplied string is not valid UTF-8, surfaced as
    /// [`kc_wire::WireError::InvalidUtf8`] wrapped through `Msgpack`/`Wire`).
    pub fn save_bytes(&self) -> Result<Vec<u8>, CardError> {
        let mut body_writer = ByteWriter::new();
        let mut entries = Vec::with_capacity(self.block_order.len());

        for block_ref in &self.block_order {
            let block = match block_ref {
                BlockRef::Known(i) => &self.blocks[*i],
                BlockRef::Unknown(i) => &self.unknown_blocks[*i],
            };
            let bytes = match &block.payload {
                BlockPayload::Decoded(tree) => kc_msgpack::encode_to_vec(&tree.to_value()),
                BlockPayload::Opaque(bytes) => bytes.clone(),
            };
            let pos = body_writer.len() as u64;
            let size = bytes.len() as u64;
            body_writer.write_bytes(&bytes);
            entries.push(CatalogEntry { name: block.name.clone(), version: block.version.clone(), pos, size });
        }

        let catalog = BlockCatalog { shape: self.catalog_shape, entries };
        let catalog_bytes = kc_msgpack::encode_to_vec(&catalog.encode());
        let block_bodies = body_writer.into_inner();

        let mut tail = ByteWriter::new();
        self.header_fields.write_to(&mut tail);
        tail.write_bytes(&catalog_bytes);
        tail.write_i64_le(block_bodies.len() as i64);
        tail.write_bytes(&block_bodies);

        Ok(png::join(&self.image_bytes, self.face_image_bytes.as_deref(), &tail.into_inner()))
    }

    /// # Errors
    ///
    /// [`CardError::Wire`] wrapping the underlying I/O failure.
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> Result<(), CardError> {
        let bytes = self.save_bytes()?;
        std::fs::write(path, bytes).map_err(kc_wire::WireError::Io)?;
        Ok(())
    }

    #[must_use]
    pub fn descriptor(&self) -> &'static VariantDescriptor {
        self.variant.descriptor()
    }

    /// Indexed accessor by block name, searching known blocks first, then
    /// unknown ones.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Block> {
        self.blocks
            .iter()
            .find(|b| b.name == name)
            .or_else(|| self.unknown_blocks.iter().find(|b| b.name == name))
    }

    /// Mutable indexed accessor by block name — the write side of
    /// [`Document::get`]. Structural identity (name, catalog position) is
    /// unaffected by mutating the returned `Block`'s value tree; only the
    /// re-encoded bytes for that block's body change on `save`.
    #[must_use]
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Block> {
        if let Some(i) = self.blocks.iter().position(|b| b.name == name) {
            return Some(&mut self.blocks[i]);
        }
        self.unknown_blocks.iter_mut().find(|b| b.name == name)
    }

    /// Block names in on-disk catalog order (known and unknown
    /// interleaved as they appeared in the source file).
    #[must_use]
    pub fn block_names(&self) -> Vec<&str> {
        self.block_order
            .iter()
            .map(|r| match r {
                BlockRef::Known(i) => self.blocks[*i].name.as_str(),
                BlockRef::Unknown(i) => self.unknown_blocks[*i].name.as_str(),
            })
            .collect()
    }

    /// Known block names, in catalog order — the programmatic surface's
    /// `Document.blockdata`.
    #[must_use]
    pub fn blockdata(&self) -> Vec<&str> {
        self.blocks.iter().map(|b| b.name.as_str()).collect()
    }

    /// Unknown block names, in catalog order — the programmatic surface's
    /// `Document.unknown_blockdata`.
    #[must_use]
    pub fn unknown_blockdata(&self) -> Vec<&str> {
        self.unknown_blocks.iter().map(|b| b.name.as_str()).collect()
    }
}

fn slice_block<'a>(block_bodies: &'a [u8], entry: &CatalogEntry) -> Result<&'a [u8], CardError> {
    let start = usize::try_from(entry.pos).map_err(|_| CardError::SchemaMismatch {
        context: "catalog entry",
        reason: "pos does not fit in usize on this platform",
    })?;
    let len = usize::try_from(entry.size).map_err(|_| CardError::SchemaMismatch {
        context: "catalog entry",
        reason: "size does not fit in usize on this platform",
    })?;
    let end = start.checked_add(len).ok_or(CardError::SchemaMismatch {
        context: "catalog entry",
        reason: "pos + size overflows",
    })?;
    block_bodies.get(start..end).ok_or(CardError::SchemaMismatch {
        context: "catalog entry",
        reason: "block slice runs past the end of the block-data section",
    })
}
