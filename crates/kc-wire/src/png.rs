use crate::error::WireError;

/// The 8-byte PNG signature every chunk stream must begin with.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// The chunk type that marks the end of a PNG image stream.
const IEND: [u8; 4] = *b"IEND";

/// The result of splitting a card/scene file's bytes at the end of its
/// embedded PNG image(s).
///
/// `image_bytes` and `face_image_bytes` are opaque spans copied verbatim
/// from the input; the framer never interprets pixel data, only chunk
/// boundaries (length, type, CRC) needed to find where the image ends.
pub struct Framed<'a> {
    pub image_bytes: &'a [u8],
    pub face_image_bytes: Option<&'a [u8]>,
    pub tail: &'a [u8],
}

/// Split a byte stream at the end of its embedded PNG image(s).
///
/// Walks chunks (`length:u32be | type:4 | data:length | crc:u32be`) from
/// the PNG signature until an `IEND` chunk (whose `data` is always
/// zero-length) is consumed. If the bytes immediately following that
/// first image also begin with the PNG signature, a second PNG — the
/// face thumbnail some variants embed — is parsed the same way. Whatever
/// remains is the block-data payload.
///
/// # Errors
///
/// [`WireError::MalformedContainer`] if the signature doesn't match, a
/// chunk's declared length runs past the end of the buffer, or no
/// `IEND` chunk is ever found.
pub fn split(input: &[u8]) -> Result<Framed<'_>, WireError> {
    let first_end = parse_one(input, 0)?;
    let mut cursor = first_end;
    let mut face_image_bytes = None;

    if input[cursor..].len() >= PNG_SIGNATURE.len() && input[cursor..cursor + 8] == PNG_SIGNATURE {
        let second_end = parse_one(input, cursor)?;
        face_image_bytes = Some(&input[cursor..second_end]);
        cursor = second_end;
    }

    Ok(Framed {
        image_bytes: &input[..first_end],
        face_image_bytes,
        tail: &input[cursor..],
    })
}

/// Parse one PNG chunk stream starting at `start`, returning the offset
/// one past the end of its `IEND` chunk's CRC.
fn parse_one(input: &[u8], start: usize) -> Result<usize, WireError> {
    let sig_end = start.checked_add(8).ok_or(WireError::MalformedContainer {
        reason: "buffer too short for PNG signature",
    })?;
    let sig = input
        .get(start..sig_end)
        .ok_or(WireError::MalformedContainer {
            reason: "buffer too short for PNG signature",
        })?;
    if sig != PNG_SIGNATURE {
        return Err(WireError::MalformedContainer {
            reason: "missing PNG signature",
        });
    }

    let mut cursor = sig_end;
    loop {
        let header_end = cursor
            .checked_add(8)
            .ok_or(WireError::MalformedContainer { reason: "truncated chunk header" })?;
        let header = input
            .get(cursor..header_end)
            .ok_or(WireError::MalformedContainer { reason: "truncated chunk header" })?;

        let length = u32::from_be_bytes([header[0], header[1], header[2], header[3]]) as usize;
        let chunk_type = [header[4], header[5], header[6], header[7]];

        let data_end = header_end
            .checked_add(length)
            .ok_or(WireError::MalformedContainer { reason: "chunk length overflow" })?;
        let crc_end = data_end
            .checked_add(4)
            .ok_or(WireError::MalformedContainer { reason: "chunk length overflow" })?;
        if input.len() < crc_end {
            return Err(WireError::MalformedContainer {
                reason: "chunk runs past end of buffer",
            });
        }

        cursor = crc_end;
        if chunk_type == IEND {
            return Ok(cursor);
        }
    }
}

/// Recompose a split payload back into a single byte stream: image bytes,
/// optional face image bytes, then the encoded tail payload, concatenated
/// verbatim.
pub fn join(image_bytes: &[u8], face_image_bytes: Option<&[u8]>, payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(
        image_bytes.len()
            + face_image_bytes.map_or(0, <[u8]>::len)
            + payload.len(),
    );
    out.extend_from_slice(image_bytes);
    if let Some(face) = face_image_bytes {
        out.extend_from_slice(face);
    }
    out.extend_from_slice(payload);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a minimal valid single-chunk PNG: signature + IHDR (garbage
    /// data, we never interpret it) + IEND.
    fn minimal_png() -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(&PNG_SIGNATURE);

        // IHDR with a 4-byte arbitrary payload.
        buf.extend_from_slice(&4u32.to_be_bytes());
        buf.extend_from_slice(b"IHDR");
        buf.extend_from_slice(&[0, 0, 0, 0]);
        buf.extend_from_slice(&0u32.to_be_bytes()); // crc, unchecked by the framer

        // IEND, zero-length data.
        buf.extend_from_slice(&0u32.to_be_bytes());
        buf.extend_from_slice(b"IEND");
        buf.extend_from_slice(&0u32.to_be_bytes());

        buf
    }

    #[test]
    fn splits_single_png_and_tail() {
        let mut input = minimal_png();
        let png_len = input.len();
        input.extend_from_slice(b"payload-bytes");

        let framed = split(&input).unwrap();
        assert_eq!(framed.image_bytes.len(), png_len);
        assert!(framed.face_image_bytes.is_none());
        assert_eq!(framed.tail, b"payload-bytes");
    }

    #[test]
    fn splits_two_back_to_back_pngs() {
        let card = minimal_png();
        let face = minimal_png();
        let mut input = Vec::new();
        input.extend_from_slice(&card);
        input.extend_from_slice(&face);
        input.extend_from_slice(b"tail");

        let framed = split(&input).unwrap();
        assert_eq!(framed.image_bytes, &card[..]);
        assert_eq!(framed.face_image_bytes.unwrap(), &face[..]);
        assert_eq!(framed.tail, b"tail");
    }

    #[test]
    fn join_is_the_inverse_of_split() {
        let card = minimal_png();
        let face = minimal_png();
        let payload = b"the-block-data".to_vec();

        let rejoined = join(&card, Some(&face), &payload);

        let mut expected = Vec::new();
        expected.extend_from_slice(&card);
        expected.extend_from_slice(&face);
        expected.extend_from_slice(&payload);
        assert_eq!(rejoined, expected);

        let framed = split(&rejoined).unwrap();
        assert_eq!(framed.image_bytes, &card[..]);
        assert_eq!(framed.face_image_bytes.unwrap(), &face[..]);
        assert_eq!(framed.tail, &payload[..]);
    }

    #[test]
    fn rejects_bad_signature() {
        let input = b"not a png at all, just text".to_vec();
        let err = split(&input).unwrap_err();
        assert!(matches!(err, WireError::MalformedContainer { .. }));
    }

    #[test]
    fn rejects_missing_iend() {
        let mut input = PNG_SIGNATURE.to_vec();
        // A chunk that's declared but never closed with IEND.
        input.extend_from_slice(&0u32.to_be_bytes());
        input.extend_from_slice(b"IHDR");
        input.extend_from_slice(&0u32.to_be_bytes());

        let err = split(&input).unwrap_err();
        assert!(matches!(err, WireError::MalformedContainer { .. }));
    }

    #[test]
    fn rejects_chunk_claiming_more_than_available() {
        let mut input = PNG_SIGNATURE.to_vec();
        input.extend_from_slice(&1_000_000u32.to_be_bytes());
        input.extend_from_slice(b"IDAT");
        // No actual data or CRC follows.

        let err = split(&input).unwrap_err();
        assert!(matches!(err, WireError::MalformedContainer { .. }));
    }

    #[test]
    fn single_png_with_no_second_signature_has_no_face_image() {
        let mut input = minimal_png();
        input.extend_from_slice(b"\x01\x02\x03not-a-png-tail");

        let framed = split(&input).unwrap();
        assert!(framed.face_image_bytes.is_none());
        assert_eq!(framed.tail, b"\x01\x02\x03not-a-png-tail");
    }
}
