//! Brain-class enum shared across gesture recognition and gear resolution.
//!
//! All variants are always compiled in (no per-variant feature flags): this
//! is a small, fixed classification domain, not an extensible plugin point.

/// The discrete label emitted by the EEG classifier for one window.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum BrainClass {
    LeftFist,
    RightFist,
    BothFists,
    TongueTap,
    /// No active clench — the rest/neutral class.
    Relax,
}

impl BrainClass {
    /// Normalize the two documented typo-forms ("Left First", "Both Firsts")
    /// to their canonical spelling. Applied once, at the recognizer's
    /// ingress, so every downstream match sees only canonical variants.
    pub fn normalize(label: &str) -> Option<BrainClass> {
        match label {
            "Left Fist" | "Left First" => Some(BrainClass::LeftFist),
            "Right Fist" => Some(BrainClass::RightFist),
            "Both Fists" | "Both Firsts" => Some(BrainClass::BothFists),
            "Tongue Tapping" | "Tongue Tap" => Some(BrainClass::TongueTap),
            "Relax" => Some(BrainClass::Relax),
            _ => None,
        }
    }

    /// `true` for any class other than `Relax` — the "clenching" classes
    /// that can start or continue a gesture hold.
    #[inline]
    pub fn is_active(self) -> bool {
        !matches!(self, BrainClass::Relax)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BrainClass::LeftFist => "Left Fist",
            BrainClass::RightFist => "Right Fist",
            BrainClass::BothFists => "Both Fists",
            BrainClass::TongueTap => "Tongue Tapping",
            BrainClass::Relax => "Relax",
        }
    }
}

impl std::fmt::Display for BrainClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
