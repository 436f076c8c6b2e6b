//! Section ordering — the single global order of resume sections.
//!
//! A `SectionOrder` always holds every `SectionKey` exactly once. The only way
//! to build one is through `normalize` / `from_keys` / `canonical`, so the
//! completeness and no-duplicate invariants hold after every mutation.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::sections::key::SectionKey;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SectionOrder(Vec<SectionKey>);

impl SectionOrder {
    /// All keys in their declaration order.
    pub fn canonical() -> Self {
        SectionOrder(SectionKey::ALL.to_vec())
    }

    /// Builds a valid order from an arbitrary key sequence: repeated keys keep
    /// their first position, missing keys are appended in canonical order.
    pub fn from_keys<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = SectionKey>,
    {
        let mut seen: Vec<SectionKey> = Vec::with_capacity(SectionKey::ALL.len());
        for key in keys {
            if !seen.contains(&key) {
                seen.push(key);
            }
        }
        for key in SectionKey::ALL {
            if !seen.contains(&key) {
                seen.push(key);
            }
        }
        SectionOrder(seen)
    }

    pub fn as_slice(&self) -> &[SectionKey] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = SectionKey> + '_ {
        self.0.iter().copied()
    }

    pub fn position(&self, key: SectionKey) -> Option<usize> {
        self.0.iter().position(|k| *k == key)
    }
}

impl Default for SectionOrder {
    fn default() -> Self {
        SectionOrder::canonical()
    }
}

/// Normalizes untrusted input (typically deserialized JSON) into a valid order.
///
/// Strings naming a known key are kept in first-seen order; everything else
/// (foreign strings, repeats, non-strings, non-arrays) is dropped. Never fails.
pub fn normalize(input: &Value) -> SectionOrder {
    let keys: Vec<SectionKey> = match input {
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .filter_map(|s| s.parse::<SectionKey>().ok())
            .collect(),
        _ => Vec::new(),
    };
    SectionOrder::from_keys(keys)
}

impl Serialize for SectionOrder {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SectionOrder {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Ok(normalize(&raw))
    }
}
