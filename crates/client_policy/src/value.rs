//! Structure-preserving values for cache hydration
//!
//! Plain JSON flattens timestamps to strings and loses container identity;
//! the externally-tagged encoding here round-trips both, so a value
//! dehydrated on the server rehydrates on the client with its types intact.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A value that crosses the client/server boundary without losing type
/// information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RichValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    /// UTC timestamp, kept distinct from [`RichValue::Text`] across the
    /// serialization boundary
    Timestamp(DateTime<Utc>),
    List(Vec<RichValue>),
    /// Key-ordered map; iteration order is stable across a round trip
    Map(BTreeMap<String, RichValue>),
}

impl RichValue {
    /// Builds a map from an iterator of key/value pairs
    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, RichValue)>,
    {
        RichValue::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v))
                .collect(),
        )
    }
}

impl From<bool> for RichValue {
    fn from(value: bool) -> Self {
        RichValue::Bool(value)
    }
}

impl From<i64> for RichValue {
    fn from(value: i64) -> Self {
        RichValue::Int(value)
    }
}

impl From<f64> for RichValue {
    fn from(value: f64) -> Self {
        RichValue::Float(value)
    }
}

impl From<&str> for RichValue {
    fn from(value: &str) -> Self {
        RichValue::Text(value.to_string())
    }
}

impl From<String> for RichValue {
    fn from(value: String) -> Self {
        RichValue::Text(value)
    }
}

impl From<DateTime<Utc>> for RichValue {
    fn from(value: DateTime<Utc>) -> Self {
        RichValue::Timestamp(value)
    }
}

impl<T: Into<RichValue>> From<Vec<T>> for RichValue {
    fn from(values: Vec<T>) -> Self {
        RichValue::List(values.into_iter().map(Into::into).collect())
    }
}
