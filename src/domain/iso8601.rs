//! ISO-8601 encoding for the timestamps stored in documents and returned by
//! the API.
//!
//! Timestamps are written in UTC with fixed microsecond precision and a `Z`
//! suffix, so that the lexicographic order of the stored strings is their
//! chronological order. Any RFC 3339 offset is accepted on read, as is a naive
//! datetime without offset, which is taken to be UTC.

use chrono::{
    DateTime,
    NaiveDateTime,
    SecondsFormat,
    SubsecRound,
    Utc,
};
use serde::{
    Deserialize,
    Deserializer,
    Serializer,
};

/// Current time truncated to the stored precision.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

pub fn format(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn parse(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(value)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .or_else(|e| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
                .map(|naive| naive.and_utc())
                .map_err(|_| e)
        })
}

pub fn serialize<S>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(timestamp))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    parse(&value).map_err(serde::de::Error::custom)
}
