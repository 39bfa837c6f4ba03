/// Implementation of `kc decode --json`.
///
/// Loads a card or scene file and writes its `to_json` export either to
/// stdout or to the path given by `-o`/`--output`.
use anyhow::{Context, Result};
use kc_card::Document;

use crate::DecodeArgs;

/// Run the JSON-export portion of `kc decode`.
///
/// # Errors
///
/// Returns an error if the file cannot be read, fails to decode, or (with
/// `-o`) cannot be written.
pub fn run(args: &DecodeArgs) -> Result<()> {
    let document = Document::load(&args.file)
        .with_context(|| format!("failed to decode {}", args.file.display()))?;

    if let Some(output) = &args.output {
        kc_driver::save_json(&document, output, args.include_image)
            .with_context(|| format!("failed to write {}", output.display()))?;
    } else {
        let value = kc_driver::to_json(&document, args.include_image);
        println!("{}", serde_json::to_string_pretty(&value)?);
    }

    Ok(())
}
