//! Coordinate type definitions

use std::fmt;

use thiserror::Error;

/// Arc-seconds in one degree.
pub const SECONDS_PER_DEGREE: i64 = 3600;

/// Arc-seconds in one minute of arc.
pub const SECONDS_PER_MINUTE: i64 = 60;

/// Value used for a coordinate that is absent (`Unknown`, empty, unparsable).
///
/// 181° lies outside every valid longitude and latitude, so points carrying it
/// never fall inside a world rectangle.
pub const ABSENT_COORDINATE: i64 = 181 * SECONDS_PER_DEGREE;

/// Literal used by the feature files for a missing coordinate.
pub const UNKNOWN_COORDINATE: &str = "Unknown";

/// Hemisphere letter trailing a DMS string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    /// Parse a hemisphere letter (`N`, `S`, `E`, `W`).
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'N' => Some(Hemisphere::North),
            'S' => Some(Hemisphere::South),
            'E' => Some(Hemisphere::East),
            'W' => Some(Hemisphere::West),
            _ => None,
        }
    }

    /// Multiplier applied to the unsigned arc-second magnitude.
    ///
    /// Only north and west are integrated; south and east resolve to zero.
    /// The feature data this engine indexes lies entirely in the northern
    /// and western hemispheres.
    pub fn sign(self) -> i64 {
        match self {
            Hemisphere::North => 1,
            Hemisphere::West => -1,
            Hemisphere::South | Hemisphere::East => 0,
        }
    }
}

impl fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Hemisphere::North => "North",
            Hemisphere::South => "South",
            Hemisphere::East => "East",
            Hemisphere::West => "West",
        };
        f.write_str(name)
    }
}

/// A DMS coordinate split into its components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dms {
    pub degrees: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub hemisphere: Hemisphere,
}

impl Dms {
    /// Signed arc-second value of this coordinate.
    pub fn to_arc_seconds(&self) -> i64 {
        let magnitude = i64::from(self.degrees) * SECONDS_PER_DEGREE
            + i64::from(self.minutes) * SECONDS_PER_MINUTE
            + i64::from(self.seconds);
        magnitude * self.hemisphere.sign()
    }
}

impl fmt::Display for Dms {
    /// Human-readable form, e.g. `38d 27m 12s North`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}d {}m {}s {}",
            self.degrees, self.minutes, self.seconds, self.hemisphere
        )
    }
}

/// Errors that can occur while parsing DMS text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordError {
    /// The text is empty or the `Unknown` marker.
    #[error("coordinate is not given")]
    Missing,

    /// The trailing character is not a hemisphere letter.
    #[error("invalid hemisphere in '{0}' (expected N, S, E or W)")]
    InvalidHemisphere(String),

    /// The numeric part is not `D+MMSS`.
    #[error("invalid DMS digits in '{0}'")]
    InvalidDigits(String),

    /// Minutes or seconds are 60 or more.
    #[error("minutes and seconds must be below 60 in '{0}'")]
    OutOfRange(String),
}
