/// Implementation of `kc roundtrip`.
///
/// Loads a file, re-saves it to an in-memory buffer, and reports whether
/// the result is byte-for-byte identical to the input — the correctness
/// bar this whole codec is built around. Exits non-zero on mismatch (via
/// the `Err` returned to `main`, same as every other failure path).
use std::fs;

use anyhow::{Context, Result, anyhow};
use kc_card::Document;

use crate::RoundtripArgs;

/// Run `kc roundtrip`.
///
/// # Errors
///
/// Returns an error if the file cannot be read, fails to decode, fails to
/// re-encode, or the re-encoded bytes don't match the original.
pub fn run(args: &RoundtripArgs) -> Result<()> {
    let original =
        fs::read(&args.file).with_context(|| format!("cannot read {}", args.file.display()))?;

    let document = Document::load_bytes(&original)
        .with_context(|| format!("failed to decode {}", args.file.display()))?;

    let resaved = document.save_bytes().context("failed to re-encode document")?;

    if resaved == original {
        println!("✓ round-trip: {} bytes, byte-for-byte identical", original.len());
        Ok(())
    } else {
        println!(
            "✗ round-trip mismatch: original {} bytes, re-encoded {} bytes",
            original.len(),
            resaved.len()
        );
        Err(anyhow!("round-trip produced different bytes"))
    }
}
