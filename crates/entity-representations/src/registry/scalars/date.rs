use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

use super::ScalarParser;
use crate::ScalarParseError;

/// A date-time scalar carried as an RFC 3339 string on the wire.
///
/// The usual `Date` custom scalar: resolvers work with [`DateTime<Utc>`]
/// while the transport sees ISO strings.
pub struct DateScalar;

impl DateScalar {
    /// Parses a wire value into the native datetime.
    pub fn parse_value(value: Value) -> Result<DateTime<Utc>, ScalarParseError> {
        match value {
            Value::String(string) => DateTime::parse_from_rfc3339(&string)
                .map(|datetime| datetime.with_timezone(&Utc))
                .map_err(|err| {
                    ScalarParseError::new(format!("could not parse date from {string:?}: {err}"))
                }),
            other => Err(ScalarParseError::new(format!(
                "dates should be provided as strings, got {other}"
            ))),
        }
    }

    /// Canonical wire form: millisecond precision with a `Z` suffix.
    pub fn format(datetime: &DateTime<Utc>) -> String {
        datetime.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

impl ScalarParser for DateScalar {
    fn parse(&self, value: Value) -> Result<Value, ScalarParseError> {
        DateScalar::parse_value(value).map(|datetime| Value::String(DateScalar::format(&datetime)))
    }

    fn serialize(&self, value: Value) -> Result<Value, ScalarParseError> {
        match value {
            Value::String(string) => DateTime::parse_from_rfc3339(&string)
                .map(|datetime| Value::String(DateScalar::format(&datetime.with_timezone(&Utc))))
                .map_err(|err| {
                    ScalarParseError::new(format!(
                        "could not serialize {string:?} as a date: {err}"
                    ))
                }),
            other => Err(ScalarParseError::new(format!(
                "cannot serialize {other} as a date"
            ))),
        }
    }
}
