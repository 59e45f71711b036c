//! Wall-clock time and workday window models.
//!
//! # Time Model
//! A hearing day is a calendar date (`chrono::NaiveDate`) plus wall-clock
//! times expressed as minutes since midnight. Keeping times relative to
//! the day avoids any dependence on platform epoch or timezone semantics.
//!
//! Intervals are half-open: `[start, end)`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A wall-clock time of day, stored as minutes since midnight.
///
/// Serialized as `"HH:MM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ClockTime(u32);

/// Error parsing an `"HH:MM"` clock time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid clock time '{0}', expected HH:MM")]
pub struct ParseClockTimeError(pub String);

impl ClockTime {
    /// Creates a clock time from hours and minutes.
    pub const fn hm(hour: u32, minute: u32) -> Self {
        Self(hour * 60 + minute)
    }

    /// Creates a clock time from minutes since midnight.
    pub const fn from_minutes(minutes: u32) -> Self {
        Self(minutes)
    }

    /// Minutes since midnight.
    #[inline]
    pub const fn minutes(self) -> u32 {
        self.0
    }

    /// Hour component.
    #[inline]
    pub const fn hour(self) -> u32 {
        self.0 / 60
    }

    /// Minute component.
    #[inline]
    pub const fn minute(self) -> u32 {
        self.0 % 60
    }

    /// Returns this time advanced by `minutes`, saturating at `u32::MAX`.
    #[inline]
    pub const fn plus_minutes(self, minutes: u32) -> Self {
        Self(self.0.saturating_add(minutes))
    }

    /// Signed minutes from `earlier` to `self`.
    #[inline]
    pub fn minutes_since(self, earlier: ClockTime) -> i64 {
        i64::from(self.0) - i64::from(earlier.0)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for ClockTime {
    type Err = ParseClockTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseClockTimeError(s.to_string());
        let (h, m) = s.trim().split_once(':').ok_or_else(err)?;
        let hour: u32 = h.parse().map_err(|_| err())?;
        let minute: u32 = m.parse().map_err(|_| err())?;
        if minute >= 60 || hour >= 24 {
            return Err(err());
        }
        Ok(Self::hm(hour, minute))
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A wall-clock interval `[start, end)` within one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Interval start (inclusive).
    pub start: ClockTime,
    /// Interval end (exclusive).
    pub end: ClockTime,
}

impl TimeWindow {
    /// Creates a new time window.
    pub fn new(start: ClockTime, end: ClockTime) -> Self {
        Self { start, end }
    }

    /// Length of this window in minutes (0 if inverted).
    #[inline]
    pub fn duration_minutes(&self) -> u32 {
        self.end.minutes().saturating_sub(self.start.minutes())
    }

    /// Whether a time falls within this window.
    #[inline]
    pub fn contains(&self, time: ClockTime) -> bool {
        time >= self.start && time < self.end
    }

    /// Whether `[start, start + minutes)` lies entirely inside this window.
    pub fn admits(&self, start: ClockTime, minutes: u32) -> bool {
        start >= self.start && start.plus_minutes(minutes) <= self.end
    }

    /// Whether two windows overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}
