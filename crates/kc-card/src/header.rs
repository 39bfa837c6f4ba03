use kc_wire::{ByteReader, ByteWriter, WireError};

/// The fixed-shape framing header that follows the embedded PNG(s) and
/// precedes the block catalog.
///
/// Field order and widths are shared across every variant; only whether
/// `face_image_len` is present varies, and that is
/// driven by whether a second PNG was actually found by the framer
/// rather than by a per-variant flag, since the field only ever appears
/// alongside a face image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderFields {
    pub product_no: i32,
    pub header_string: String,
    pub version: String,
    pub face_image_len: Option<i32>,
    pub image_len: i32,
}

impl HeaderFields {
    /// # Errors
    ///
    /// Propagates [`WireError::Truncated`] on a short read or
    /// [`WireError::InvalidUtf8`] on a malformed magic/version string.
    pub fn read_from(r: &mut ByteReader<'_>, has_face_image: bool) -> Result<Self, WireError> {
        let product_no = r.read_i32_le()?;
        let header_string = r.read_prefixed_string()?;
        let version = r.read_prefixed_string()?;
        let face_image_len = if has_face_image { Some(r.read_i32_le()?) } else { None };
        let image_len = r.read_i32_le()?;
        Ok(Self { product_no, header_string, version, face_image_len, image_len })
    }

    pub fn write_to(&self, w: &mut ByteWriter) {
        w.write_i32_le(self.product_no);
        w.write_prefixed_string(&self.header_string);
        w.write_prefixed_string(&self.version);
        if let Some(len) = self.face_image_len {
            w.write_i32_le(len);
        }
        w.write_i32_le(self.image_len);
    }
}
