//! Dynamic values produced by extractors.
//!
//! [`ExtractedValue`] is what accessors and sanitizers pass between each other.
//! Typed records ([`crate::ProfileRecord`], [`crate::PostRecord`]) are built from
//! these values at the edge of each field extractor.

use indexmap::IndexMap;
use serde::Serialize;

/// Ordered string-keyed record. Key order is insertion order.
pub type Record = IndexMap<String, ExtractedValue>;

/// The result of applying an extractor to an element or a collection of elements.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(untagged)]
pub enum ExtractedValue {
    /// Absent or unusable value.
    #[default]
    Null,
    Integer(i64),
    Float(f64),
    Text(String),
    List(Vec<ExtractedValue>),
    Record(Record),
}

impl ExtractedValue {
    pub fn is_null(&self) -> bool {
        matches!(self, ExtractedValue::Null)
    }

    /// Borrows the text of a `Text` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ExtractedValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Integer view; floats are not converted.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ExtractedValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            ExtractedValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn into_integer(self) -> Option<i64> {
        self.as_i64()
    }

    pub fn into_record(self) -> Option<Record> {
        match self {
            ExtractedValue::Record(r) => Some(r),
            _ => None,
        }
    }

    /// A record holding exactly one entry.
    pub fn singleton(key: impl Into<String>, value: ExtractedValue) -> Self {
        let mut record = Record::new();
        record.insert(key.into(), value);
        ExtractedValue::Record(record)
    }
}

impl From<&str> for ExtractedValue {
    fn from(s: &str) -> Self {
        ExtractedValue::Text(s.to_string())
    }
}

impl From<String> for ExtractedValue {
    fn from(s: String) -> Self {
        ExtractedValue::Text(s)
    }
}

impl From<i64> for ExtractedValue {
    fn from(n: i64) -> Self {
        ExtractedValue::Integer(n)
    }
}

impl From<f64> for ExtractedValue {
    fn from(n: f64) -> Self {
        ExtractedValue::Float(n)
    }
}

impl<T: Into<ExtractedValue>> From<Option<T>> for ExtractedValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ExtractedValue::Null, Into::into)
    }
}

impl<T: Into<ExtractedValue>> From<Vec<T>> for ExtractedValue {
    fn from(items: Vec<T>) -> Self {
        ExtractedValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<Record> for ExtractedValue {
    fn from(record: Record) -> Self {
        ExtractedValue::Record(record)
    }
}

/// A single `{ key: value }` result whose key may be unknown.
///
/// Social links learn their platform name from the icon's class list; when no
/// class names a platform the fragment is `Unresolved` and is dropped before
/// merging.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyedFragment {
    Resolved { key: String, value: ExtractedValue },
    Unresolved,
}

impl KeyedFragment {
    pub fn new(key: Option<String>, value: ExtractedValue) -> Self {
        match key {
            Some(key) => KeyedFragment::Resolved { key, value },
            None => KeyedFragment::Unresolved,
        }
    }

    pub fn key(&self) -> Option<&str> {
        match self {
            KeyedFragment::Resolved { key, .. } => Some(key),
            KeyedFragment::Unresolved => None,
        }
    }
}

impl From<KeyedFragment> for ExtractedValue {
    /// Resolved fragments become singleton records, unresolved ones `Null`.
    fn from(fragment: KeyedFragment) -> Self {
        match fragment {
            KeyedFragment::Resolved { key, value } => ExtractedValue::singleton(key, value),
            KeyedFragment::Unresolved => ExtractedValue::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untagged_serialization() {
        let mut record = Record::new();
        record.insert("views".to_string(), ExtractedValue::Integer(12));
        record.insert("label".to_string(), ExtractedValue::Null);
        record.insert("tags".to_string(), vec!["a", "b"].into());

        let json = serde_json::to_string(&ExtractedValue::Record(record)).unwrap();
        assert_eq!(json, r#"{"views":12,"label":null,"tags":["a","b"]}"#);
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(ExtractedValue::from(None::<String>), ExtractedValue::Null);
        assert_eq!(ExtractedValue::from(Some("x")), ExtractedValue::Text("x".to_string()));
    }

    #[test]
    fn test_fragment_into_value() {
        let resolved = KeyedFragment::new(Some("twitter".to_string()), "https://t.co".into());
        assert_eq!(resolved.key(), Some("twitter"));
        assert_eq!(
            ExtractedValue::from(resolved),
            ExtractedValue::singleton("twitter", "https://t.co".into())
        );
        assert_eq!(ExtractedValue::from(KeyedFragment::Unresolved), ExtractedValue::Null);
    }
}
