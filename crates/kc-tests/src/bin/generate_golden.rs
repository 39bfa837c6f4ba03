//! Golden fixture generator for the card/scene conformance test suite.
//!
//! This binary writes synthetic fixtures under `tests/golden/` — no real
//! Koikatu-family game assets are available to this workspace, so every
//! fixture is assembled in-memory by [`kc_tests::fixtures::build`] rather
//! than captured from a real save file. Run it once after changing the
//! wire format or the fixture builder to regenerate the committed files.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin generate_golden -p kc-tests
//! ```
//!
//! # Generated fixtures
//!
//! | File                          | Contents                              |
//! |-------------------------------|----------------------------------------|
//! | `koikatu_chara.png`           | Koikatu character card, no face image |
//! | `koikatu_chara_with_face.png` | Same, with a second embedded PNG       |
//! | `koikatu_scene.png`           | Koikatu scene with a small object tree |

use std::path::{Path, PathBuf};

use kc_card::Variant;
use kc_tests::fixtures::{self, FixtureBlock};

fn main() {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let golden_dir = manifest_dir.join("tests/golden");

    let chara = fixtures::build(Variant::Koikatu.descriptor(), &fixtures::sample_chara_blocks(), false);
    write_file(&golden_dir.join("koikatu_chara.png"), &chara);

    let chara_with_face =
        fixtures::build(Variant::Koikatu.descriptor(), &fixtures::sample_chara_blocks(), true);
    write_file(&golden_dir.join("koikatu_chara_with_face.png"), &chara_with_face);

    let scene =
        fixtures::build(Variant::KoikatuScene.descriptor(), &fixtures::sample_scene_blocks(), false);
    write_file(&golden_dir.join("koikatu_scene.png"), &scene);

    let empty: &[FixtureBlock] = &[];
    let empty_blocks = fixtures::build(Variant::Koikatu.descriptor(), empty, false);
    write_file(&golden_dir.join("koikatu_empty_blocks.png"), &empty_blocks);

    println!("All golden fixtures written to {}", golden_dir.display());
}

fn write_file(path: &Path, data: &[u8]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create_dir_all");
    }
    std::fs::write(path, data).expect("write_file");
    println!("  wrote {}", path.display());
}
