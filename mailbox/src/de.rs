//! Lenient deserializers for index records.
//!
//! The archive was produced by several tools over time, so the same
//! field may come as `null`, as a string or as a number. These
//! helpers accept all of them instead of failing the whole part.

use chrono::DateTime;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

/// Deserializes `null` as the default value of `T`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserializes a loose date.
///
/// Strings are kept as is. Numbers are Unix timestamps in
/// milliseconds and are converted to RFC 3339. Anything else is an
/// unknown date.
pub(crate) fn lenient_date<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let date = match Value::deserialize(deserializer)? {
        Value::String(date) => Some(date),
        Value::Number(millis) => millis
            .as_i64()
            .or_else(|| millis.as_f64().map(|millis| millis as i64))
            .and_then(DateTime::from_timestamp_millis)
            .map(|date| date.to_rfc3339()),
        Value::Null => None,
        value => {
            debug!("unexpected date {value}, considering it unknown");
            None
        }
    };

    Ok(date)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize)]
    struct Record {
        #[serde(default, deserialize_with = "super::lenient_date")]
        date: Option<String>,
        #[serde(default, deserialize_with = "super::null_as_default")]
        tags: Vec<String>,
    }

    fn record(json: &str) -> Record {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn dates_from_strings_and_numbers() {
        assert_eq!(record(r#"{"date":"2001-05-14"}"#).date.as_deref(), Some("2001-05-14"));
        assert_eq!(
            record(r#"{"date":989876543000}"#).date.as_deref(),
            Some("2001-05-14T21:42:23+00:00")
        );
        assert_eq!(
            record(r#"{"date":989876543000.0}"#).date.as_deref(),
            Some("2001-05-14T21:42:23+00:00")
        );
    }

    #[test]
    fn unexpected_dates_are_unknown() {
        assert_eq!(record(r#"{"date":null}"#).date, None);
        assert_eq!(record(r#"{"date":{"$date":1}}"#).date, None);
        assert_eq!(record(r#"{"date":true}"#).date, None);
        assert_eq!(record("{}").date, None);
    }

    #[test]
    fn null_is_default() {
        assert!(record(r#"{"tags":null}"#).tags.is_empty());
        assert_eq!(record(r#"{"tags":["a"]}"#).tags, vec!["a"]);
    }
}
