//! Coordinate conversion module
//!
//! Converts degrees-minutes-seconds text (`382712N`, `0792140W`) into the
//! signed integer arc-second values used as spatial index coordinates.
//! Longitude maps to `x`, latitude to `y`.

mod types;

pub use types::{
    CoordError, Dms, Hemisphere, ABSENT_COORDINATE, SECONDS_PER_DEGREE, SECONDS_PER_MINUTE,
    UNKNOWN_COORDINATE,
};

/// Parses DMS text into its components.
///
/// The last two digits before the hemisphere letter are seconds, the two
/// before that are minutes, and everything in front is degrees. Latitudes use
/// two degree digits and longitudes three, but both layouts parse the same way.
///
/// # Errors
///
/// Returns [`CoordError::Missing`] for empty or `Unknown` text, and the other
/// variants when the text is not well formed.
pub fn parse_dms(text: &str) -> Result<Dms, CoordError> {
    let text = text.trim();
    if text.is_empty() || text == UNKNOWN_COORDINATE {
        return Err(CoordError::Missing);
    }

    let mut chars = text.chars();
    let letter = chars.next_back().ok_or(CoordError::Missing)?;
    let hemisphere = Hemisphere::from_letter(letter)
        .ok_or_else(|| CoordError::InvalidHemisphere(text.to_string()))?;

    let digits = chars.as_str();
    if digits.len() < 5 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoordError::InvalidDigits(text.to_string()));
    }

    let split = digits.len() - 4;
    let parse = |s: &str| {
        s.parse::<u32>()
            .map_err(|_| CoordError::InvalidDigits(text.to_string()))
    };
    let degrees = parse(&digits[..split])?;
    let minutes = parse(&digits[split..split + 2])?;
    let seconds = parse(&digits[split + 2..])?;

    if minutes >= 60 || seconds >= 60 {
        return Err(CoordError::OutOfRange(text.to_string()));
    }

    Ok(Dms {
        degrees,
        minutes,
        seconds,
        hemisphere,
    })
}

/// Converts DMS text to signed arc-seconds.
///
/// Text that cannot be parsed maps to [`ABSENT_COORDINATE`], which lies
/// outside any world rectangle.
#[inline]
pub fn to_arc_seconds(text: &str) -> i64 {
    match parse_dms(text) {
        Ok(dms) => dms.to_arc_seconds(),
        Err(CoordError::Missing) => ABSENT_COORDINATE,
        Err(e) => {
            tracing::debug!(coordinate = text, error = %e, "Unparsable coordinate");
            ABSENT_COORDINATE
        }
    }
}
