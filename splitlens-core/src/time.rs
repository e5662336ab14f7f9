//! Time Codec
//!
//! Converts between LiveSplit's `H+:MM:SS[.fraction]` text and seconds.
//! Durations are held as whole microseconds in [`SplitTime`]; anything finer
//! (LiveSplit writes 100 ns ticks) is truncated on parse.
//!
//! The empty string is the "not recorded" sentinel. The typed API maps it to
//! `None`; [`parse_seconds`] keeps the legacy contract and maps it to `0.0`.

use crate::error::TimeFormatError;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;
use std::sync::OnceLock;

/// Fraction digits used when no precision is configured
pub const DEFAULT_PRECISION: u8 = 2;

/// Finest precision the codec can render (microseconds)
pub const MAX_PRECISION: u8 = 6;

const MICROS_PER_SECOND: u64 = 1_000_000;

fn duration_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([0-9]+):([0-9]{2}):([0-9]{2})(?:\.([0-9]+))?$")
            .expect("duration pattern is valid")
    })
}

/// A recorded, non-negative duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SplitTime {
    micros: u64,
}

impl SplitTime {
    /// Zero elapsed time (a recorded value, not the "unrecorded" sentinel)
    pub const ZERO: SplitTime = SplitTime { micros: 0 };

    /// From whole microseconds
    pub const fn from_micros(micros: u64) -> Self {
        Self { micros }
    }

    /// Whole microseconds
    pub const fn as_micros(self) -> u64 {
        self.micros
    }

    /// From seconds, rounded to the nearest microsecond. Negative and
    /// non-finite input clamps to zero.
    pub fn from_secs_f64(seconds: f64) -> Self {
        if !seconds.is_finite() || seconds <= 0.0 {
            return Self::ZERO;
        }
        Self {
            micros: (seconds * MICROS_PER_SECOND as f64).round() as u64,
        }
    }

    /// Seconds as a float
    pub fn as_secs_f64(self) -> f64 {
        self.micros as f64 / MICROS_PER_SECOND as f64
    }

    /// Parse a non-empty duration
    pub fn parse(text: &str) -> Result<Self, TimeFormatError> {
        let text = text.trim();
        let caps = duration_pattern()
            .captures(text)
            .ok_or_else(|| TimeFormatError::Malformed(text.to_string()))?;

        let hours: u64 = caps[1]
            .parse()
            .map_err(|_| TimeFormatError::Overflow(text.to_string()))?;
        let minutes: u64 = caps[2]
            .parse()
            .map_err(|_| TimeFormatError::Malformed(text.to_string()))?;
        let seconds: u64 = caps[3]
            .parse()
            .map_err(|_| TimeFormatError::Malformed(text.to_string()))?;

        if minutes >= 60 {
            return Err(TimeFormatError::OutOfRange {
                text: text.to_string(),
                field: "minutes",
            });
        }
        if seconds >= 60 {
            return Err(TimeFormatError::OutOfRange {
                text: text.to_string(),
                field: "seconds",
            });
        }

        // Keep the first six fraction digits, right-padded: ".5" -> 500000
        let fraction_micros = caps.get(4).map_or(0, |m| {
            m.as_str()
                .bytes()
                .chain(std::iter::repeat(b'0'))
                .take(MAX_PRECISION as usize)
                .fold(0u64, |acc, digit| acc * 10 + u64::from(digit - b'0'))
        });

        let whole_seconds = hours
            .checked_mul(3600)
            .and_then(|h| h.checked_add(minutes * 60 + seconds))
            .and_then(|s| s.checked_mul(MICROS_PER_SECOND))
            .and_then(|us| us.checked_add(fraction_micros))
            .ok_or_else(|| TimeFormatError::Overflow(text.to_string()))?;

        Ok(Self {
            micros: whole_seconds,
        })
    }

    /// Parse text where blank means "not recorded"
    pub fn parse_optional(text: &str) -> Result<Option<Self>, TimeFormatError> {
        if text.trim().is_empty() {
            Ok(None)
        } else {
            Self::parse(text).map(Some)
        }
    }

    /// `self - other`, floored at zero
    pub fn saturating_sub(self, other: SplitTime) -> SplitTime {
        SplitTime {
            micros: self.micros.saturating_sub(other.micros),
        }
    }
}

impl Add for SplitTime {
    type Output = SplitTime;

    fn add(self, rhs: SplitTime) -> SplitTime {
        SplitTime {
            micros: self.micros.saturating_add(rhs.micros),
        }
    }
}

impl Sum for SplitTime {
    fn sum<I: Iterator<Item = SplitTime>>(iter: I) -> Self {
        iter.fold(SplitTime::ZERO, Add::add)
    }
}

impl FromStr for SplitTime {
    type Err = TimeFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SplitTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&TimeCodec::default().format(*self))
    }
}

// Serialized losslessly at microsecond precision so JSON stays readable.
impl Serialize for SplitTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&TimeCodec::new(MAX_PRECISION).format(*self))
    }
}

impl<'de> Deserialize<'de> for SplitTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        SplitTime::parse(&text).map_err(serde::de::Error::custom)
    }
}

/// Renders seconds as `HH:MM:SS.ff…` with a fixed number of fraction digits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeCodec {
    precision: u8,
}

impl Default for TimeCodec {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
        }
    }
}

impl TimeCodec {
    /// Codec with `precision` fraction digits, capped at [`MAX_PRECISION`]
    pub fn new(precision: u8) -> Self {
        Self {
            precision: precision.min(MAX_PRECISION),
        }
    }

    /// Configured fraction digits
    pub fn precision(&self) -> u8 {
        self.precision
    }

    /// Text for an elapsed time of exactly zero
    pub fn zero_sentinel(&self) -> String {
        if self.precision == 0 {
            "00:00:00".to_string()
        } else {
            format!("00:00:00.{}", "0".repeat(self.precision as usize))
        }
    }

    /// Format seconds. Hours are never wrapped at 24. Non-finite input
    /// renders as the empty "no data" string.
    pub fn format_seconds(&self, seconds: f64) -> String {
        if !seconds.is_finite() {
            return String::new();
        }
        if seconds == 0.0 {
            return self.zero_sentinel();
        }

        let units_per_second = 10u64.pow(u32::from(self.precision));
        // Round the total so a carry lands in the minutes, never "60" seconds
        let total_units = (seconds.abs() * units_per_second as f64).round() as u64;
        let fraction = total_units % units_per_second;
        let whole = total_units / units_per_second;

        let sign = if seconds < 0.0 && total_units > 0 { "-" } else { "" };
        let (hours, minutes, secs) = (whole / 3600, (whole % 3600) / 60, whole % 60);

        if self.precision == 0 {
            format!("{sign}{hours:02}:{minutes:02}:{secs:02}")
        } else {
            format!(
                "{sign}{hours:02}:{minutes:02}:{secs:02}.{fraction:0width$}",
                width = self.precision as usize
            )
        }
    }

    /// Format a recorded duration
    pub fn format(&self, time: SplitTime) -> String {
        self.format_seconds(time.as_secs_f64())
    }

    /// Format an optional duration; `None` renders as the empty string
    pub fn format_optional(&self, time: Option<SplitTime>) -> String {
        time.map(|t| self.format(t)).unwrap_or_default()
    }
}

/// Parse duration text to seconds; the empty string yields `0.0`
pub fn parse_seconds(text: &str) -> Result<f64, TimeFormatError> {
    Ok(SplitTime::parse_optional(text)?.map_or(0.0, SplitTime::as_secs_f64))
}

/// Format seconds with the default precision
pub fn format_seconds(seconds: f64) -> String {
    TimeCodec::default().format_seconds(seconds)
}
