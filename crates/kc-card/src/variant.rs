use crate::error::CardError;

/// The closed set of game/title schemas this codec understands.
///
/// A plain `enum`, not an open registry, so adding a new title means
/// adding a match arm and a [`VariantDescriptor`] entry, not registering
/// a plugin at runtime — a compiled constant table rather than a
/// dynamic class hierarchy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variant {
    Koikatu,
    EmotionCreators,
    Honeycome,
    SummerVacationChara,
    SummerVacationSave,
    KoikatuSave,
    EmocreMap,
    EmocreScene,
    KoikatuScene,
    HoneycomeScene,
    Aicomi,
}

impl Variant {
    #[must_use]
    pub fn descriptor(self) -> &'static VariantDescriptor {
        VARIANTS.iter().find(|d| d.variant == self).expect("every Variant has a descriptor")
    }
}

/// Fixed header layout, known-block set, and nested-key table for one
/// [`Variant`].
///
/// A per-variant table driving decode/encode rather than a per-block
/// class hierarchy.
pub struct VariantDescriptor {
    pub variant: Variant,
    /// Leading bytes of the header's magic string. Matched by prefix
    /// against the decoded header string, in [`VARIANTS`]'s fixed
    /// priority order — first match wins, resolving the overlap between
    /// closely related titles whose magic strings share a prefix.
    pub magic: &'static str,
    /// Scene documents additionally carry a `dicObject` tree and support
    /// [`crate::scene::walk`].
    pub is_scene: bool,
    /// Block names considered understood; anything else goes to
    /// `Document::unknown_blocks`.
    pub known_blocks: &'static [&'static str],
    /// For each known block name, the map keys inside it whose values are
    /// themselves independently-encoded nested payloads.
    pub nested_keys: &'static [(&'static str, &'static [&'static str])],
}

impl VariantDescriptor {
    #[must_use]
    pub fn is_known_block(&self, name: &str) -> bool {
        self.known_blocks.contains(&name)
    }

    #[must_use]
    pub fn nested_keys_for(&self, block_name: &str) -> &'static [&'static str] {
        self.nested_keys
            .iter()
            .find(|(name, _)| *name == block_name)
            .map_or(&[], |(_, keys)| *keys)
    }
}

const CHARA_BLOCKS: &[&str] = &["Custom", "Coordinate", "Parameter", "Status", "About", "KKEx"];
const SAVE_BLOCKS: &[&str] = &["SaveData", "Parameter", "KKEx"];
const SCENE_BLOCKS: &[&str] = &["SceneInfo", "Camera", "KKEx"];

// Representative plugin-extension keys recorded under the shared "KKEx"
// block. A real deployment extends this per installed plugin; the set
// here is enough to exercise the nested-decode path end to end.
const KKEX_NESTED_KEYS: &[&str] = &["KK_AccessoryCustomizer", "KK_Pregnancy", "Timeline"];

/// Descriptors in dispatch priority order. [`detect`] walks this list
/// and takes the first prefix match, so more specific
/// magics must precede the titles whose magic they could be mistaken for.
pub static VARIANTS: &[VariantDescriptor] = &[
    VariantDescriptor {
        variant: Variant::Koikatu,
        magic: "【KoiKatuChara】",
        is_scene: false,
        known_blocks: CHARA_BLOCKS,
        nested_keys: &[("KKEx", KKEX_NESTED_KEYS)],
    },
    VariantDescriptor {
        variant: Variant::KoikatuSave,
        magic: "【KoiKatuSaveData】",
        is_scene: false,
        known_blocks: SAVE_BLOCKS,
        nested_keys: &[("KKEx", KKEX_NESTED_KEYS)],
    },
    VariantDescriptor {
        variant: Variant::KoikatuScene,
        magic: "【KoiKatuStudioSceneData】",
        is_scene: true,
        known_blocks: SCENE_BLOCKS,
        nested_keys: &[("KKEx", KKEX_NESTED_KEYS)],
    },
    VariantDescriptor {
        variant: Variant::EmotionCreators,
        magic: "【EroMakeChara】",
        is_scene: false,
        known_blocks: CHARA_BLOCKS,
        nested_keys: &[("KKEx", KKEX_NESTED_KEYS)],
    },
    VariantDescriptor {
        variant: Variant::EmocreMap,
        magic: "【EroMakeSaveData】",
        is_scene: false,
        known_blocks: SAVE_BLOCKS,
        nested_keys: &[("KKEx", KKEX_NESTED_KEYS)],
    },
    VariantDescriptor {
        variant: Variant::EmocreScene,
        magic: "【EroMakeStudioSceneData】",
        is_scene: true,
        known_blocks: SCENE_BLOCKS,
        nested_keys: &[("KKEx", KKEX_NESTED_KEYS)],
    },
    VariantDescriptor {
        variant: Variant::HoneycomeScene,
        magic: "【HoneyComeStudioSceneData】",
        is_scene: true,
        known_blocks: SCENE_BLOCKS,
        nested_keys: &[("KKEx", KKEX_NESTED_KEYS)],
    },
    VariantDescriptor {
        variant: Variant::Honeycome,
        magic: "【HoneyComeChara】",
        is_scene: false,
        known_blocks: CHARA_BLOCKS,
        nested_keys: &[("KKEx", KKEX_NESTED_KEYS)],
    },
    VariantDescriptor {
        variant: Variant::SummerVacationChara,
        magic: "【SummerVacationScrambleChara】",
        is_scene: false,
        known_blocks: CHARA_BLOCKS,
        nested_keys: &[("KKEx", KKEX_NESTED_KEYS)],
    },
    VariantDescriptor {
        variant: Variant::SummerVacationSave,
        magic: "【SummerVacationScrambleSaveData】",
        is_scene: false,
        known_blocks: SAVE_BLOCKS,
        nested_keys: &[("KKEx", KKEX_NESTED_KEYS)],
    },
    VariantDescriptor {
        variant: Variant::Aicomi,
        magic: "【AicomiChara】",
        is_scene: false,
        known_blocks: CHARA_BLOCKS,
        nested_keys: &[("KKEx", KKEX_NESTED_KEYS)],
    },
];

/// Detect a variant from the decoded header magic string, trying
/// descriptors in [`VARIANTS`]'s fixed priority order.
///
/// # Errors
///
/// [`CardError::UnknownVariant`] if no descriptor's magic prefixes
/// `header_string`.
pub fn detect(header_string: &str) -> Result<&'static VariantDescriptor, CardError> {
    VARIANTS
        .iter()
        .find(|d| header_string.starts_with(d.magic))
        .ok_or_else(|| CardError::UnknownVariant { observed: header_string.to_string() })
}

impl PartialEq for VariantDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.variant == other.variant
    }
}
