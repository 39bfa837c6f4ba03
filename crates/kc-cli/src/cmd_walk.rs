/// Implementation of `kc walk`.
///
/// Loads a scene file and walks its `dicObject` tree depth-first, printing
/// one line per matching node. Errors on any non-scene document rather
/// than printing an empty tree silently.
///
/// # Output format
///
/// ```text
/// 0 [Character]
/// 0.0 [Item]
/// 1 [Camera]
/// ```
use anyhow::{Context, Result};
use kc_card::{Document, scene};

use crate::WalkArgs;

/// Run `kc walk`.
///
/// # Errors
///
/// Returns an error if the file cannot be read, fails to decode, or is not
/// a scene-variant document.
pub fn run(args: &WalkArgs) -> Result<()> {
    let document = Document::load(&args.file)
        .with_context(|| format!("failed to decode {}", args.file.display()))?;

    let walker = scene::walk(&document, args.object_type, args.depth)
        .context("failed to walk scene object tree")?;

    for node in walker {
        if let Some(depth) = node.depth {
            println!("{} [{:?}] depth={depth}", node.composite_key, node.object_type);
        } else {
            println!("{} [{:?}]", node.composite_key, node.object_type);
        }
    }

    Ok(())
}
