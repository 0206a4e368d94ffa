use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

pub const SECONDS_PER_DAY: u32 = 24 * 60 * 60;
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// A wall-clock time within a single day, at one-second resolution.
///
/// Stored as seconds since midnight, always in `[0, 86400)`. Serialized as
/// `"HH:MM"` when the seconds field is zero and `"HH:MM:SS"` otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    seconds: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeParseError {
    #[error("expected HH:MM or HH:MM:SS, got {0:?}")]
    Malformed(String),
    #[error("time field out of range in {0:?}")]
    OutOfRange(String),
}

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay { seconds: 0 };

    /// Build a time from its fields. Returns `None` if any field is out of
    /// range (hour ≥ 24, minute ≥ 60, second ≥ 60).
    pub fn from_hms(hour: u32, minute: u32, second: u32) -> Option<Self> {
        if hour >= 24 || minute >= 60 || second >= 60 {
            return None;
        }
        Some(Self {
            seconds: hour * 3600 + minute * 60 + second,
        })
    }

    /// Build a time from seconds since midnight, wrapping past the end of the day.
    pub fn from_seconds(seconds: u32) -> Self {
        Self {
            seconds: seconds % SECONDS_PER_DAY,
        }
    }

    pub fn hour(&self) -> u32 {
        self.seconds / 3600
    }

    pub fn minute(&self) -> u32 {
        (self.seconds / 60) % 60
    }

    pub fn second(&self) -> u32 {
        self.seconds % 60
    }

    /// Whole minutes since midnight.
    pub fn minute_of_day(&self) -> u32 {
        self.seconds / 60
    }

    pub fn seconds_of_day(&self) -> u32 {
        self.seconds
    }

    /// `HH:MM`, dropping seconds.
    pub fn to_hhmm(&self) -> String {
        format!("{:02}:{:02}", self.hour(), self.minute())
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.second() == 0 {
            write!(f, "{:02}:{:02}", self.hour(), self.minute())
        } else {
            write!(
                f,
                "{:02}:{:02}:{:02}",
                self.hour(),
                self.minute(),
                self.second()
            )
        }
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || TimeParseError::Malformed(s.to_string());

        let mut fields = [0u32; 3];
        let mut count = 0;
        for part in s.trim().split(':') {
            let digits = !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
            if count == fields.len() || !digits || part.len() > 2 {
                return Err(malformed());
            }
            fields[count] = part.parse().map_err(|_| malformed())?;
            count += 1;
        }
        if count < 2 {
            return Err(malformed());
        }

        Self::from_hms(fields[0], fields[1], fields[2])
            .ok_or_else(|| TimeParseError::OutOfRange(s.to_string()))
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hours_and_minutes() {
        let t: TimeOfDay = "14:45".parse().unwrap();
        assert_eq!(t.hour(), 14);
        assert_eq!(t.minute(), 45);
        assert_eq!(t.second(), 0);
        assert_eq!(t.minute_of_day(), 885);
    }

    #[test]
    fn parses_seconds() {
        let t: TimeOfDay = "01:34:37".parse().unwrap();
        assert_eq!(t.seconds_of_day(), 3600 + 34 * 60 + 37);
        assert_eq!(t.to_string(), "01:34:37");
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            "noon".parse::<TimeOfDay>(),
            Err(TimeParseError::Malformed(_))
        ));
        assert!(matches!(
            "12".parse::<TimeOfDay>(),
            Err(TimeParseError::Malformed(_))
        ));
        assert!(matches!(
            "1:2:3:4".parse::<TimeOfDay>(),
            Err(TimeParseError::Malformed(_))
        ));
        for signed in ["+1:00", "1:+5", "-1:00", " 1: 5"] {
            assert!(
                matches!(
                    signed.parse::<TimeOfDay>(),
                    Err(TimeParseError::Malformed(_))
                ),
                "accepted {signed:?}"
            );
        }
        assert!(matches!(
            "24:00".parse::<TimeOfDay>(),
            Err(TimeParseError::OutOfRange(_))
        ));
        assert!(matches!(
            "10:75".parse::<TimeOfDay>(),
            Err(TimeParseError::OutOfRange(_))
        ));
    }

    #[test]
    fn from_seconds_wraps() {
        let t = TimeOfDay::from_seconds(SECONDS_PER_DAY + 61);
        assert_eq!(t.hour(), 0);
        assert_eq!(t.minute(), 1);
        assert_eq!(t.second(), 1);
    }

    #[test]
    fn display_drops_zero_seconds() {
        let t = TimeOfDay::from_hms(9, 5, 0).unwrap();
        assert_eq!(t.to_string(), "09:05");
        assert_eq!(t.to_hhmm(), "09:05");
    }

    #[test]
    fn serializes_as_string() {
        let t = TimeOfDay::from_hms(14, 45, 0).unwrap();
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, "\"14:45\"");
        let back: TimeOfDay = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
        assert!(serde_json::from_str::<TimeOfDay>("\"25:00\"").is_err());
    }
}
