#![forbid(unsafe_code)]

use time::{Date, Month};

/// Calendar date in canonical `YYYY-MM-DD` form.
///
/// The canonical string orders lexically exactly as the calendar orders, so
/// stored dates can be compared as plain text all the way down to SQL.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoDate(String);

impl IsoDate {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn try_new(value: &str) -> Result<Self, DateError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DateError::Empty);
        }
        let mut parts = trimmed.splitn(3, '-');
        let (Some(y), Some(m), Some(d)) = (parts.next(), parts.next(), parts.next()) else {
            return Err(DateError::Malformed {
                value: trimmed.to_string(),
            });
        };
        let year: i32 = y.parse().map_err(|_| DateError::Malformed {
            value: trimmed.to_string(),
        })?;
        let month: u8 = m.parse().map_err(|_| DateError::Malformed {
            value: trimmed.to_string(),
        })?;
        let day: u8 = d.parse().map_err(|_| DateError::Malformed {
            value: trimmed.to_string(),
        })?;
        let month = Month::try_from(month).map_err(|_| DateError::OutOfRange {
            value: trimmed.to_string(),
        })?;
        Date::from_calendar_date(year, month, day).map_err(|_| DateError::OutOfRange {
            value: trimmed.to_string(),
        })?;
        Ok(Self(format!("{year:04}-{:02}-{day:02}", month as u8)))
    }
}

impl std::fmt::Display for IsoDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl serde::Serialize for IsoDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for IsoDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = <String as serde::Deserialize>::deserialize(deserializer)?;
        IsoDate::try_new(&raw).map_err(serde::de::Error::custom)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DateError {
    Empty,
    Malformed { value: String },
    OutOfRange { value: String },
}

impl std::fmt::Display for DateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "date must not be empty"),
            Self::Malformed { value } => write!(f, "date is not YYYY-MM-DD: {value}"),
            Self::OutOfRange { value } => write!(f, "date is not a calendar date: {value}"),
        }
    }
}

impl std::error::Error for DateError {}
