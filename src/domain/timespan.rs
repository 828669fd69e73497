// SPDX-License-Identifier: MIT OR Apache-2.0

//! Signed nanosecond-resolution timespan type.
//!
//! This module provides the `Timespan` type, a signed 64-bit nanosecond
//! count with the unit-suffix textual form used by the configuration
//! grammar (`10ms`, `42s`, `-3min`).

use crate::domain::errors::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Nanoseconds per time unit, largest first. Display picks the largest
/// unit that divides the count evenly.
const UNITS: [(i64, &str); 6] = [
    (3_600_000_000_000, "h"),
    (60_000_000_000, "min"),
    (1_000_000_000, "s"),
    (1_000_000, "ms"),
    (1_000, "us"),
    (1, "ns"),
];

/// A signed duration with nanosecond resolution.
///
/// `Timespan` is the `timespan` variant payload of
/// [`Value`](crate::domain::Value). Its textual form is a number followed
/// by one of the suffixes `ns`, `us`, `ms`, `s`, `min`, `h`.
///
/// # Examples
///
/// ```
/// use dyncfg::domain::timespan::Timespan;
///
/// let t: Timespan = "10ms".parse().unwrap();
/// assert_eq!(t, Timespan::from_millis(10));
/// assert_eq!(t.to_string(), "10ms");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timespan(i64);

impl Timespan {
    /// Creates a timespan from a raw nanosecond count.
    pub const fn from_nanos(nanos: i64) -> Self {
        Timespan(nanos)
    }

    /// Creates a timespan from microseconds.
    pub const fn from_micros(micros: i64) -> Self {
        Timespan(micros * 1_000)
    }

    /// Creates a timespan from milliseconds.
    pub const fn from_millis(millis: i64) -> Self {
        Timespan(millis * 1_000_000)
    }

    /// Creates a timespan from seconds.
    pub const fn from_secs(secs: i64) -> Self {
        Timespan(secs * 1_000_000_000)
    }

    /// Creates a timespan from minutes.
    pub const fn from_minutes(minutes: i64) -> Self {
        Timespan(minutes * 60_000_000_000)
    }

    /// Creates a timespan from hours.
    pub const fn from_hours(hours: i64) -> Self {
        Timespan(hours * 3_600_000_000_000)
    }

    /// Returns the raw nanosecond count.
    pub const fn as_nanos(self) -> i64 {
        self.0
    }

    /// Returns `true` for timespans below zero.
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Multiplies an integer magnitude by a unit, checking for overflow.
    pub(crate) fn checked_from_int(value: i64, unit_nanos: i64) -> Option<Self> {
        value.checked_mul(unit_nanos).map(Timespan)
    }

    /// Converts a real magnitude in the given unit, rounding to the nearest
    /// nanosecond. Returns `None` when the result leaves the 64-bit range.
    pub(crate) fn checked_from_real(value: f64, unit_nanos: i64) -> Option<Self> {
        let nanos = (value * unit_nanos as f64).round();
        // 2^63 as an exact f64 bound; the upper comparison must be strict.
        if !nanos.is_finite() || nanos < -9.223_372_036_854_775_808e18 || nanos >= 9.223_372_036_854_775_808e18 {
            return None;
        }
        Some(Timespan(nanos as i64))
    }

    /// Maps a unit suffix to its nanosecond multiplier.
    pub(crate) fn unit_nanos(suffix: &str) -> Option<i64> {
        UNITS
            .iter()
            .find(|(_, name)| *name == suffix)
            .map(|(nanos, _)| *nanos)
    }
}

impl fmt::Display for Timespan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return write!(f, "0s");
        }
        for (nanos, suffix) in UNITS {
            if self.0 % nanos == 0 {
                return write!(f, "{}{}", self.0 / nanos, suffix);
            }
        }
        unreachable!("the table ends with a 1ns unit")
    }
}

impl FromStr for Timespan {
    type Err = crate::domain::errors::ConfigError;

    /// Parses the duration grammar: an integer or real immediately followed
    /// by a unit suffix. The whole input must be consumed.
    fn from_str(s: &str) -> Result<Self> {
        crate::adapters::lexer::parse_timespan(s)
    }
}

impl TryFrom<Duration> for Timespan {
    type Error = crate::domain::errors::ConfigError;

    fn try_from(d: Duration) -> Result<Self> {
        i64::try_from(d.as_nanos())
            .map(Timespan)
            .map_err(|_| crate::domain::errors::ConfigError::IntegerOverflow {
                literal: format!("{:?}", d),
            })
    }
}

impl TryFrom<Timespan> for Duration {
    type Error = crate::domain::errors::ConfigError;

    fn try_from(t: Timespan) -> Result<Self> {
        u64::try_from(t.0)
            .map(Duration::from_nanos)
            .map_err(|_| {
                crate::domain::errors::ConfigError::conversion(
                    "cannot convert a negative timespan to a std duration",
                )
            })
    }
}
