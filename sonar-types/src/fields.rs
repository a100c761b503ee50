use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::FieldKey;

/// A stored survey document: a flat map of field name to string value.
///
/// This is the shape the document store persists. Nested structure (slots,
/// answers) is encoded in the key names, see [`FieldKey`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurveyFields {
    values: BTreeMap<String, String>,
}

impl SurveyFields {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Insert a value for the given key, replacing any previous one.
    pub fn insert(&mut self, key: impl Into<FieldKey>, value: impl Into<String>) {
        self.values.insert(key.into().as_str().to_owned(), value.into());
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<FieldKey>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Get the value stored for a key.
    pub fn get(&self, key: impl AsRef<str>) -> Option<&str> {
        self.values.get(key.as_ref()).map(String::as_str)
    }

    /// Get the value stored for a key, or `""` if the key is absent.
    pub fn get_or_empty(&self, key: impl AsRef<str>) -> &str {
        self.get(key).unwrap_or("")
    }

    /// Check if a key is present (its value may still be empty).
    pub fn contains(&self, key: impl AsRef<str>) -> bool {
        self.values.contains_key(key.as_ref())
    }

    /// Iterate over all key-value pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Get the number of stored fields.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if there are no stored fields.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Overwrite fields with the ones from `other` (a partial update).
    pub fn extend(&mut self, other: SurveyFields) {
        self.values.extend(other.values);
    }
}

impl<K: Into<FieldKey>, V: Into<String>> FromIterator<(K, V)> for SurveyFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = SurveyFields::new();
        for (key, value) in iter {
            fields.insert(key, value);
        }
        fields
    }
}
