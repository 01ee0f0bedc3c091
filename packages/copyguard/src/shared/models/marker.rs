//! Declaration markers
//!
//! Markers are analysis-time tags the host attaches to declarations.
//! They carry no runtime behavior: the core only asks whether a
//! declaration carries a given tag.

use serde::{Deserialize, Serialize};

/// Structural marker tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Marker {
    /// Procedure-level: the body must deep-copy its single parameter
    CopyProcedure,

    /// Member-level: skip the member in closedness and completeness checks
    Exempt,
}

impl Marker {
    const fn bit(self) -> u8 {
        match self {
            Marker::CopyProcedure => 0b01,
            Marker::Exempt => 0b10,
        }
    }
}

/// Set of markers carried by one declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct MarkerSet(u8);

impl MarkerSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn of(marker: Marker) -> Self {
        Self(marker.bit())
    }

    pub fn with(mut self, marker: Marker) -> Self {
        self.insert(marker);
        self
    }

    pub fn insert(&mut self, marker: Marker) {
        self.0 |= marker.bit();
    }

    pub fn contains(&self, marker: Marker) -> bool {
        self.0 & marker.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<Marker> for MarkerSet {
    fn from_iter<I: IntoIterator<Item = Marker>>(iter: I) -> Self {
        let mut set = MarkerSet::empty();
        for marker in iter {
            set.insert(marker);
        }
        set
    }
}
