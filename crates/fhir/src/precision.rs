//! Date and time primitives that keep their original precision.
//!
//! FHIR allows partial dates (`2024`, `2024-03`) and date-times with or
//! without a time part, and a round trip must not invent the missing
//! components. These types therefore store the lexical form and only check it
//! with chrono when the value is decoded or constructed.

use crate::element::PrimitiveValue;
use crate::mem_size::MemSize;
use chrono::{DateTime, NaiveDate, NaiveTime};
use plait_fhirpath_support::{ConversionResult, EvaluationResult};
use plait_serde_support::PrimitiveKind;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Rejected lexical form of a date/time primitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidTemporal {
    type_name: &'static str,
    text: String,
}

impl fmt::Display for InvalidTemporal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {} `{}`", self.type_name, self.text)
    }
}

impl std::error::Error for InvalidTemporal {}

fn is_digits(text: &str, len: usize) -> bool {
    text.len() == len && text.bytes().all(|b| b.is_ascii_digit())
}

/// `YYYY`, `YYYY-MM` or `YYYY-MM-DD`, each checked against the calendar.
fn valid_partial_date(text: &str) -> bool {
    match text.len() {
        4 => is_digits(text, 4),
        7 => NaiveDate::parse_from_str(&format!("{text}-01"), "%Y-%m-%d").is_ok(),
        10 => NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok(),
        _ => false,
    }
}

fn valid_date_time(text: &str) -> bool {
    if text.contains('T') {
        DateTime::parse_from_rfc3339(text).is_ok()
    } else {
        valid_partial_date(text)
    }
}

fn valid_instant(text: &str) -> bool {
    text.contains('T') && DateTime::parse_from_rfc3339(text).is_ok()
}

fn valid_time(text: &str) -> bool {
    NaiveTime::parse_from_str(text, "%H:%M:%S").is_ok()
        || NaiveTime::parse_from_str(text, "%H:%M:%S%.f").is_ok()
}

macro_rules! precision_type {
    ($(#[$meta:meta])* $name:ident, $type_name:literal, $validate:path) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            pub fn parse(text: &str) -> Result<Self, InvalidTemporal> {
                if $validate(text) {
                    Ok(Self(text.to_string()))
                } else {
                    Err(InvalidTemporal {
                        type_name: $type_name,
                        text: text.to_string(),
                    })
                }
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl FromStr for $name {
            type Err = InvalidTemporal;

            fn from_str(text: &str) -> Result<Self, Self::Err> {
                Self::parse(text)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.0)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let text = String::deserialize(deserializer)?;
                Self::parse(&text).map_err(serde::de::Error::custom)
            }
        }

        impl MemSize for $name {
            fn mem_size(&self) -> usize {
                self.0.len()
            }
        }
    };
}

precision_type!(
    /// A FHIR `date`: year, year-month or full date.
    PrecisionDate,
    "date",
    valid_partial_date
);
precision_type!(
    /// A FHIR `dateTime`: a partial date, or a full RFC 3339 date-time with offset.
    PrecisionDateTime,
    "dateTime",
    valid_date_time
);
precision_type!(
    /// A FHIR `instant`: a full RFC 3339 timestamp.
    PrecisionInstant,
    "instant",
    valid_instant
);
precision_type!(
    /// A FHIR `time`: `hh:mm:ss` with optional fractional seconds.
    PrecisionTime,
    "time",
    valid_time
);

impl PrimitiveValue for PrecisionDate {
    const KIND: PrimitiveKind = PrimitiveKind::String;
    const TYPE_NAME: &'static str = "date";

    fn evaluation_result(&self) -> EvaluationResult {
        EvaluationResult::Date(self.0.clone(), None)
    }

    fn to_string_value(&self) -> ConversionResult<String> {
        Ok(Some(self.0.clone()))
    }

    fn to_date(&self) -> ConversionResult<String> {
        Ok(Some(self.0.clone()))
    }

    fn to_date_time(&self) -> ConversionResult<String> {
        Ok(Some(self.0.clone()))
    }
}

impl PrimitiveValue for PrecisionDateTime {
    const KIND: PrimitiveKind = PrimitiveKind::String;
    const TYPE_NAME: &'static str = "dateTime";

    fn evaluation_result(&self) -> EvaluationResult {
        EvaluationResult::DateTime(self.0.clone(), None)
    }

    fn to_string_value(&self) -> ConversionResult<String> {
        Ok(Some(self.0.clone()))
    }

    /// The date part, at whatever precision the value has.
    fn to_date(&self) -> ConversionResult<String> {
        let date = self.0.split('T').next().unwrap_or(&self.0);
        Ok(Some(date.to_string()))
    }

    fn to_date_time(&self) -> ConversionResult<String> {
        Ok(Some(self.0.clone()))
    }
}

impl PrimitiveValue for PrecisionInstant {
    const KIND: PrimitiveKind = PrimitiveKind::String;
    const TYPE_NAME: &'static str = "instant";

    fn evaluation_result(&self) -> EvaluationResult {
        EvaluationResult::DateTime(self.0.clone(), None)
    }

    fn to_string_value(&self) -> ConversionResult<String> {
        Ok(Some(self.0.clone()))
    }

    fn to_date(&self) -> ConversionResult<String> {
        let date = self.0.split('T').next().unwrap_or(&self.0);
        Ok(Some(date.to_string()))
    }

    fn to_date_time(&self) -> ConversionResult<String> {
        Ok(Some(self.0.clone()))
    }
}

impl PrimitiveValue for PrecisionTime {
    const KIND: PrimitiveKind = PrimitiveKind::String;
    const TYPE_NAME: &'static str = "time";

    fn evaluation_result(&self) -> EvaluationResult {
        EvaluationResult::Time(self.0.clone(), None)
    }

    fn to_string_value(&self) -> ConversionResult<String> {
        Ok(Some(self.0.clone()))
    }

    fn to_time(&self) -> ConversionResult<String> {
        Ok(Some(self.0.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_dates() {
        assert!(PrecisionDate::parse("2024").is_ok());
        assert!(PrecisionDate::parse("2024-02").is_ok());
        assert!(PrecisionDate::parse("2024-02-29").is_ok());
        assert!(PrecisionDate::parse("2023-02-29").is_err());
        assert!(PrecisionDate::parse("2024-13").is_err());
        assert!(PrecisionDate::parse("24").is_err());
    }

    #[test]
    fn test_date_times() {
        assert!(PrecisionDateTime::parse("2024-03").is_ok());
        assert!(PrecisionDateTime::parse("2024-03-01T10:30:00Z").is_ok());
        assert!(PrecisionDateTime::parse("2024-03-01T10:30:00.250+02:00").is_ok());
        assert!(PrecisionDateTime::parse("2024-03-01T10:30").is_err());
        assert!(PrecisionInstant::parse("2024-03-01").is_err());
        assert!(PrecisionInstant::parse("2024-03-01T10:30:00Z").is_ok());
    }

    #[test]
    fn test_times() {
        assert!(PrecisionTime::parse("10:30:00").is_ok());
        assert!(PrecisionTime::parse("10:30:00.125").is_ok());
        assert!(PrecisionTime::parse("25:00:00").is_err());
        assert!(PrecisionTime::parse("10:30").is_err());
    }

    #[test]
    fn test_precision_is_preserved() {
        let value: PrecisionDateTime = serde_json::from_str(r#""2024-03""#).unwrap();
        assert_eq!(value.as_str(), "2024-03");
        assert_eq!(serde_json::to_string(&value).unwrap(), r#""2024-03""#);
        assert_eq!(
            PrimitiveValue::to_date(&PrecisionDateTime::parse("2024-03-01T10:30:00Z").unwrap()),
            Ok(Some("2024-03-01".to_string()))
        );
    }

    #[test]
    fn test_invalid_value_is_a_decode_error() {
        let err = serde_json::from_str::<PrecisionDate>(r#""March 2024""#).unwrap_err();
        assert!(err.to_string().contains("invalid date `March 2024`"), "{err}");
    }
}
