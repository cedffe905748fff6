//! Time value parsing and formatting.
//!
//! Users type times either as bare seconds (`"90"`, `"12.5"`) or as
//! colon-separated fields read right to left as seconds, minutes and hours
//! (`"1:30"`, `"00:01:30.000"`). ffmpeg receives them back as
//! `HH:MM:SS.mmm`.
//!
//! Values are stored with millisecond resolution so that a formatted time
//! parses back to exactly the same value.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from parsing a time string.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimeParseError {
    #[error("Time is empty")]
    Empty,

    #[error("Invalid time '{input}': '{field}' is not a number")]
    InvalidField { input: String, field: String },

    #[error("Time {0} is out of range")]
    OutOfRange(f64),
}

/// Result type for time parsing.
pub type TimeResult<T> = Result<T, TimeParseError>;

/// A non-negative point in a video, in whole milliseconds.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timecode {
    millis: u64,
}

impl Timecode {
    /// The start of the video.
    pub const ZERO: Timecode = Timecode { millis: 0 };

    /// Create from whole milliseconds.
    pub fn from_millis(millis: u64) -> Self {
        Self { millis }
    }

    /// Create from seconds, rounding to the nearest millisecond.
    ///
    /// Negative, NaN and infinite values are rejected.
    pub fn from_secs_f64(seconds: f64) -> TimeResult<Self> {
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(TimeParseError::OutOfRange(seconds));
        }
        let millis = (seconds * 1000.0).round();
        if millis >= u64::MAX as f64 {
            return Err(TimeParseError::OutOfRange(seconds));
        }
        Ok(Self {
            millis: millis as u64,
        })
    }

    /// Whole milliseconds.
    pub fn as_millis(&self) -> u64 {
        self.millis
    }

    /// Seconds as a float.
    pub fn as_secs_f64(&self) -> f64 {
        self.millis as f64 / 1000.0
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ms = self.millis % 1000;
        let total_secs = self.millis / 1000;
        let secs = total_secs % 60;
        let minutes = (total_secs / 60) % 60;
        let hours = total_secs / 3600;
        write!(f, "{:02}:{:02}:{:02}.{:03}", hours, minutes, secs, ms)
    }
}

impl FromStr for Timecode {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_time(s)
    }
}

/// Parse seconds or `[[HH:]MM:]SS[.fff]` text into a [`Timecode`].
///
/// Fields beyond hours keep multiplying by 60, so `"1:0:0:0"` is 60 hours.
pub fn parse_time(text: &str) -> TimeResult<Timecode> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(TimeParseError::Empty);
    }

    if let Ok(seconds) = trimmed.parse::<f64>() {
        return Timecode::from_secs_f64(seconds);
    }

    let mut seconds = 0.0;
    let mut multiplier = 1.0;
    for field in trimmed.split(':').rev() {
        let value: f64 = field
            .trim()
            .parse()
            .map_err(|_| TimeParseError::InvalidField {
                input: trimmed.to_string(),
                field: field.to_string(),
            })?;
        seconds += value * multiplier;
        multiplier *= 60.0;
    }

    Timecode::from_secs_f64(seconds)
}

/// Format seconds as `HH:MM:SS.mmm`.
///
/// Hours are not wrapped. Values that are not a valid [`Timecode`] format
/// as zero.
pub fn format_time(seconds: f64) -> String {
    Timecode::from_secs_f64(seconds)
        .unwrap_or(Timecode::ZERO)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formatted_time_round_trips() {
        for text in ["00:00:00.000", "01:02:03.250", "00:00:01.001", "12:59:59.999"] {
            let parsed = parse_time(text).unwrap();
            assert_eq!(parsed.to_string(), text);
        }
    }

    #[test]
    fn bare_seconds_equal_colon_form() {
        assert_eq!(parse_time("90").unwrap(), parse_time("0:01:30").unwrap());
        assert_eq!(parse_time("90").unwrap(), parse_time("1:30").unwrap());
        assert_eq!(parse_time("90").unwrap().as_millis(), 90_000);
    }

    #[test]
    fn fractional_seconds() {
        assert_eq!(parse_time("12.5").unwrap().as_millis(), 12_500);
        assert_eq!(parse_time("0:0:1.5").unwrap().as_millis(), 1_500);
        assert_eq!(parse_time(" 3.25 ").unwrap().as_secs_f64(), 3.25);
    }

    #[test]
    fn extra_fields_keep_multiplying() {
        let parsed = parse_time("1:0:0:0").unwrap();
        assert_eq!(parsed.as_millis(), 60 * 3600 * 1000);
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(parse_time(""), Err(TimeParseError::Empty));
        assert_eq!(parse_time("   "), Err(TimeParseError::Empty));
        assert!(matches!(
            parse_time("abc"),
            Err(TimeParseError::InvalidField { .. })
        ));
        assert!(matches!(
            parse_time("1:xx"),
            Err(TimeParseError::InvalidField { .. })
        ));
        assert!(matches!(
            parse_time("1::30"),
            Err(TimeParseError::InvalidField { .. })
        ));
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(matches!(parse_time("-5"), Err(TimeParseError::OutOfRange(_))));
        assert!(matches!(parse_time("NaN"), Err(TimeParseError::OutOfRange(_))));
        assert!(matches!(parse_time("inf"), Err(TimeParseError::OutOfRange(_))));
        assert!(matches!(
            parse_time("-1:30"),
            Err(TimeParseError::OutOfRange(_))
        ));
    }

    #[test]
    fn format_does_not_wrap_hours() {
        assert_eq!(format_time(360_000.0), "100:00:00.000");
        assert_eq!(format_time(3723.5), "01:02:03.500");
    }

    #[test]
    fn format_rounds_to_nearest_millisecond() {
        assert_eq!(format_time(1.0004), "00:00:01.000");
        assert_eq!(format_time(1.0006), "00:00:01.001");
        assert_eq!(format_time(-3.0), "00:00:00.000");
    }

    #[test]
    fn timecode_from_str() {
        let tc: Timecode = "00:01:00".parse().unwrap();
        assert_eq!(tc.as_millis(), 60_000);
        assert!(tc > Timecode::ZERO);
    }
}
