use std::fmt;
use std::str::FromStr;

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One of the 24 hourly slots of a day, stored as its hour (0..=23) and
/// shown as a 12-hour label such as `"10:00 AM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSlot(u8);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown time slot: {0:?}")]
pub struct InvalidTimeSlot(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Period {
    Am,
    Pm,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Am => "AM",
            Period::Pm => "PM",
        }
    }
}

impl TimeSlot {
    pub const COUNT: u8 = 24;

    pub fn from_hour(hour: u8) -> Option<Self> {
        (hour < Self::COUNT).then_some(Self(hour))
    }

    pub fn hour(self) -> u8 {
        self.0
    }

    pub fn period(self) -> Period {
        if self.0 < 12 {
            Period::Am
        } else {
            Period::Pm
        }
    }

    pub fn label(self) -> String {
        let hour = match self.0 % 12 {
            0 => 12,
            h => h,
        };
        format!("{hour:02}:00 {}", self.period().as_str())
    }

    /// All slots of a day in chronological order.
    pub fn all() -> impl Iterator<Item = TimeSlot> {
        (0..Self::COUNT).map(TimeSlot)
    }
}

impl FromStr for TimeSlot {
    type Err = InvalidTimeSlot;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidTimeSlot(s.to_string());

        let (clock, suffix) = s.trim().split_once(' ').ok_or_else(invalid)?;
        let period = match suffix.trim().to_ascii_uppercase().as_str() {
            "AM" => Period::Am,
            "PM" => Period::Pm,
            _ => return Err(invalid()),
        };

        let (hour, minutes) = clock.split_once(':').ok_or_else(invalid)?;
        if minutes != "00"
            || hour.is_empty()
            || hour.len() > 2
            || !hour.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }
        let hour: u8 = hour.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&hour) {
            return Err(invalid());
        }

        let hour = match period {
            Period::Am => hour % 12,
            Period::Pm => hour % 12 + 12,
        };
        Ok(TimeSlot(hour))
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl Serialize for TimeSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label())
    }
}

impl<'de> Deserialize<'de> for TimeSlot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}

impl ToSql for TimeSlot {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(i64::from(self.0)))
    }
}

impl FromSql for TimeSlot {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let hour = i64::column_result(value)?;
        u8::try_from(hour)
            .ok()
            .and_then(TimeSlot::from_hour)
            .ok_or(FromSqlError::OutOfRange(hour))
    }
}
