//! Strongly typed identifier for a robot slot in SoA storage.

use std::fmt;

/// Index of a robot in SoA storage. Max ~65,535 robots on the factory floor.
///
/// `Copy + Ord + Hash` so it can be used as a map key and sorted collection
/// element without ceremony. The inner integer is `pub` to allow direct
/// indexing into SoA `Vec`s via `id.0 as usize`, but callers should prefer
/// `.index()` for clarity.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RobotId(pub u16);

impl RobotId {
    /// Sentinel meaning "no valid robot" — equivalent to `u16::MAX`.
    pub const INVALID: RobotId = RobotId(u16::MAX);

    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl Default for RobotId {
    /// Returns the `INVALID` sentinel so an uninitialized ID is visibly invalid.
    #[inline(always)]
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for RobotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RobotId({})", self.0)
    }
}

impl From<RobotId> for usize {
    #[inline(always)]
    fn from(id: RobotId) -> usize {
        id.0 as usize
    }
}

impl TryFrom<usize> for RobotId {
    type Error = std::num::TryFromIntError;
    fn try_from(n: usize) -> Result<RobotId, Self::Error> {
        u16::try_from(n).map(RobotId)
    }
}
