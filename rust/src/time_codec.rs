//! Clock time codec: "HH:MM" strings to minutes since local midnight and back.

use chrono::{NaiveTime, Timelike};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Minutes in a day. Also the encoding of "24:00".
pub const MINUTES_PER_DAY: u16 = 1440;

/// Errors produced while decoding a clock time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClockTimeError {
    #[error("malformed clock time {0:?}, expected HH:MM")]
    Malformed(String),
    #[error("minute offset {0} is outside 0..=1440")]
    OutOfRange(i64),
}

/// A same-day local clock time at minute granularity.
///
/// Stored as minutes since midnight in `0..=1440`; 1440 is only meaningful
/// as an exclusive end ("24:00").
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(u16);

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime(0);
    pub const END_OF_DAY: ClockTime = ClockTime(MINUTES_PER_DAY);

    /// Build from an integer minute offset.
    pub fn from_minutes(minutes: i64) -> Result<Self, ClockTimeError> {
        if (0..=MINUTES_PER_DAY as i64).contains(&minutes) {
            Ok(Self(minutes as u16))
        } else {
            Err(ClockTimeError::OutOfRange(minutes))
        }
    }

    #[inline]
    pub fn minutes(self) -> u16 {
        self.0
    }

    /// Decode an "HH:MM" 24-hour string.
    pub fn parse(s: &str) -> Result<Self, ClockTimeError> {
        let trimmed = s.trim();
        if trimmed == "24:00" {
            return Ok(Self::END_OF_DAY);
        }
        // Hours may be one digit ("9:05"); minutes must be two
        match trimmed.split_once(':') {
            Some((_, minutes)) if minutes.len() == 2 => {}
            _ => return Err(ClockTimeError::Malformed(s.to_string())),
        }
        let time = NaiveTime::parse_from_str(trimmed, "%H:%M")
            .map_err(|_| ClockTimeError::Malformed(s.to_string()))?;
        Ok(Self((time.hour() * 60 + time.minute()) as u16))
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl FromStr for ClockTime {
    type Err = ClockTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<ClockTime> for u16 {
    fn from(time: ClockTime) -> Self {
        time.0
    }
}

impl TryFrom<i64> for ClockTime {
    type Error = ClockTimeError;

    fn try_from(minutes: i64) -> Result<Self, Self::Error> {
        Self::from_minutes(minutes)
    }
}
