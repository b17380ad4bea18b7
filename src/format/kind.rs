//! Channel source kinds
//!
//! One kind per store file in the container.

use std::fmt;
use std::str::FromStr;

/// The tuning technology a store file belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SourceKind {
    CableDigital,
    AirDigital,
    Satellite,
    CableAnalog,
    AirAnalog,
}

impl SourceKind {
    /// All kinds in listing order
    pub const ALL: [SourceKind; 5] = [
        SourceKind::CableDigital,
        SourceKind::AirDigital,
        SourceKind::Satellite,
        SourceKind::CableAnalog,
        SourceKind::AirAnalog,
    ];

    /// Kinds touched by renumbering, in search priority
    pub const RENUMBERED: [SourceKind; 3] = [
        SourceKind::Satellite,
        SourceKind::CableDigital,
        SourceKind::AirDigital,
    ];

    /// File name of the store inside the container
    pub fn store_name(self) -> &'static str {
        match self {
            SourceKind::CableDigital => "map-CableD",
            SourceKind::AirDigital => "map-AirD",
            SourceKind::Satellite => "map-SateD",
            SourceKind::CableAnalog => "map-CableA",
            SourceKind::AirAnalog => "map-AirA",
        }
    }

    /// Human-readable name for listings
    pub fn display_name(self) -> &'static str {
        match self {
            SourceKind::CableDigital => "Digital Cable",
            SourceKind::AirDigital => "Digital Antenna",
            SourceKind::Satellite => "Satellite",
            SourceKind::CableAnalog => "Analog Cable",
            SourceKind::AirAnalog => "Analog Antenna",
        }
    }

    /// Look up a kind by its store file name
    pub fn from_store_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.store_name() == name)
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.store_name())
    }
}

/// Returned when a string names none of the five store files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSourceKindError(pub String);

impl fmt::Display for ParseSourceKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown store name: {:?}", self.0)
    }
}

impl std::error::Error for ParseSourceKindError {}

impl FromStr for SourceKind {
    type Err = ParseSourceKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_store_name(s).ok_or_else(|| ParseSourceKindError(s.to_string()))
    }
}
