use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;

/// Placeholder shown wherever a change has no previous version
pub const NO_VERSION: &str = "none";

/// Snapshot of tracked package versions, keyed by package name.
///
/// Versions are opaque strings compared by exact equality. Iteration is
/// ordered by name (byte order), which is also the order written to disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct VersionMap {
    entries: BTreeMap<String, String>,
}

impl VersionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the recorded version for a package
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Record a version, returning the value it replaced
    pub fn insert(&mut self, name: impl Into<String>, version: impl Into<String>) -> Option<String> {
        self.entries.insert(name.into(), version.into())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(name, version)` pairs in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for VersionMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl IntoIterator for VersionMap {
    type Item = (String, String);
    type IntoIter = btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

// `null` or empty versions and empty names carry nothing, so they are dropped on load
impl<'de> Deserialize<'de> for VersionMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, Option<String>>::deserialize(deserializer)?;
        Ok(raw
            .into_iter()
            .filter(|(name, _)| !name.is_empty())
            .filter_map(|(name, version)| version.map(|v| (name, v)))
            .filter(|(_, version)| !version.is_empty())
            .collect())
    }
}

/// A single detected version change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEntry {
    /// Package name
    pub name: String,
    /// Previously recorded version (`None` for a newly tracked package)
    pub from: Option<String>,
    /// Newly observed version, never empty
    pub to: String,
}

impl ChangeEntry {
    pub fn new(name: impl Into<String>, from: Option<String>, to: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            from,
            to: to.into(),
        }
    }

    /// Previous version for display, `none` when newly tracked
    pub fn from_display(&self) -> &str {
        self.from.as_deref().unwrap_or(NO_VERSION)
    }
}

impl fmt::Display for ChangeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} -> {}", self.name, self.from_display(), self.to)
    }
}

/// Ordered list of version changes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Changeset {
    entries: Vec<ChangeEntry>,
}

impl Changeset {
    pub fn new(entries: Vec<ChangeEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[ChangeEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChangeEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names of all changed packages, in changeset order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }
}

impl<'a> IntoIterator for &'a Changeset {
    type Item = &'a ChangeEntry;
    type IntoIter = std::slice::Iter<'a, ChangeEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<ChangeEntry> for Changeset {
    fn from_iter<I: IntoIterator<Item = ChangeEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
