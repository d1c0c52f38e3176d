//! Ordered mapping from pair identifier to analysis result.
//!
//! The server returns results as a JSON object. Rendering follows the order
//! keys appear on the wire, so this type keeps entries in a `Vec` instead of
//! relying on `serde_json::Map` ordering. A side index keeps lookups and
//! duplicate detection constant time.

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::response::AnalysisResult;

/// Results keyed by pair identifier, in wire order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    entries: Vec<(String, AnalysisResult)>,
    index: HashMap<String, usize>,
}

impl ResultSet {
    /// Creates an empty result set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry. A repeated pair replaces the earlier value in place.
    pub fn insert(&mut self, pair: impl Into<String>, result: AnalysisResult) {
        let pair = pair.into();
        match self.index.get(&pair) {
            Some(&position) => self.entries[position].1 = result,
            None => {
                self.index.insert(pair.clone(), self.entries.len());
                self.entries.push((pair, result));
            }
        }
    }

    /// Builder-style variant of [`ResultSet::insert`].
    pub fn with(mut self, pair: impl Into<String>, result: AnalysisResult) -> Self {
        self.insert(pair, result);
        self
    }

    /// Looks up a result by pair identifier.
    pub fn get(&self, pair: &str) -> Option<&AnalysisResult> {
        self.index.get(pair).map(|&position| &self.entries[position].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pair identifiers in iteration order.
    pub fn pairs(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(p, _)| p.as_str())
    }

    /// Iterates `(pair, result)` in wire order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnalysisResult)> {
        self.entries.iter().map(|(p, r)| (p.as_str(), r))
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = (&'a str, &'a AnalysisResult);
    type IntoIter = Box<dyn Iterator<Item = Self::Item> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

impl FromIterator<(String, AnalysisResult)> for ResultSet {
    fn from_iter<I: IntoIterator<Item = (String, AnalysisResult)>>(iter: I) -> Self {
        let mut set = ResultSet::new();
        for (pair, result) in iter {
            set.insert(pair, result);
        }
        set
    }
}

impl Serialize for ResultSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (pair, result) in &self.entries {
            map.serialize_entry(pair, result)?;
        }
        map.end()
    }
}

struct ResultSetVisitor;

impl<'de> Visitor<'de> for ResultSetVisitor {
    type Value = ResultSet;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object mapping pair identifiers to analysis results")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut set = ResultSet::new();
        while let Some((pair, result)) = access.next_entry::<String, AnalysisResult>()? {
            set.insert(pair, result);
        }
        Ok(set)
    }
}

impl<'de> Deserialize<'de> for ResultSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ResultSetVisitor)
    }
}

/// Accepts any JSON value for `results`. Objects decode as a [`ResultSet`];
/// everything else (`null`, `false`, `0`, `""`, arrays) yields `None`.
struct LenientResultSetVisitor;

impl<'de> Visitor<'de> for LenientResultSetVisitor {
    type Value = Option<ResultSet>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a results object or any other JSON value")
    }

    fn visit_map<A: MapAccess<'de>>(self, access: A) -> Result<Self::Value, A::Error> {
        ResultSetVisitor.visit_map(access).map(Some)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        while access.next_element::<IgnoredAny>()?.is_some() {}
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_str<E: de::Error>(self, _: &str) -> Result<Self::Value, E> {
        Ok(None)
    }
}

/// `deserialize_with` helper for a `results` field that tolerates non-object
/// values the way the host page's `data.results || {}` did.
pub(super) fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<ResultSet>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LenientResultSetVisitor)
}
