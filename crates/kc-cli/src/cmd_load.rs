/// Implementation of `kc decode --inspect`.
///
/// Loads a card or scene file and prints its variant, header fields, and
/// block list (known blocks pretty-printed, unknown blocks shown as opaque
/// byte counts) in catalog order.
///
/// # Output format
///
/// ```text
/// Variant: Koikatu
/// Header: product_no=100, version="0.0.0", image=18233 bytes
/// Blocks:
///   Custom (v0.0.0)
///     ...
///   Unknown1 <opaque, 48 bytes>
/// Warnings:
///   KKEx.Timeline: nested decode left 3 trailing bytes
/// ```
use anyhow::{Context, Result};
use kc_card::{Document, NestedFailureReason};

use crate::DecodeArgs;

/// Run the inspect portion of `kc decode`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or fails to decode.
pub fn run(args: &DecodeArgs) -> Result<()> {
    let document = Document::load(&args.file)
        .with_context(|| format!("failed to decode {}", args.file.display()))?;

    println!("Variant: {:?}", document.variant);
    println!(
        "Header: product_no={}, version={:?}, image={} bytes",
        document.header_fields.product_no,
        document.header_fields.version,
        document.image_bytes.len(),
    );
    if let Some(face) = &document.face_image_bytes {
        println!("Face image: {} bytes", face.len());
    }

    println!("Blocks:");
    for name in document.block_names() {
        let Some(block) = document.get(name) else { continue };
        for line in kc_driver::prettify(block).lines() {
            println!("  {line}");
        }
    }

    if !document.warnings.is_empty() {
        println!("Warnings:");
        for warning in &document.warnings {
            let reason = match warning.reason {
                NestedFailureReason::DecodeFailed => "nested decode failed".to_string(),
                NestedFailureReason::TrailingBytes { consumed, total } => {
                    format!("nested decode left {} trailing bytes", total - consumed)
                }
            };
            println!("  {}.{}: {reason}", warning.block_name, warning.key);
        }
    }

    Ok(())
}
