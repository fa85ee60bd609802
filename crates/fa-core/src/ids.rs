//! Strongly typed aircraft identifier.
//!
//! Ids are handed out sequentially in arrival order, so ascending id order is
//! also ascending arrival-tick order.  The inner integer is `pub` to allow
//! direct indexing into the fleet `Vec` via `.index()`.

use std::fmt;

/// Index of an aircraft in the run's fleet.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AircraftId(pub u32);

impl AircraftId {
    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for AircraftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AC{:04}", self.0)
    }
}

impl From<AircraftId> for usize {
    #[inline(always)]
    fn from(id: AircraftId) -> usize {
        id.0 as usize
    }
}

impl TryFrom<usize> for AircraftId {
    type Error = std::num::TryFromIntError;
    fn try_from(n: usize) -> Result<AircraftId, Self::Error> {
        u32::try_from(n).map(AircraftId)
    }
}
