use crate::types::{ChangeEntry, Changeset, VersionMap};

/// Compute the changes needed to go from `previous` to `current`.
///
/// Only additions and version changes are reported; packages missing from
/// `current` are ignored, as are entries whose current version is empty.
/// An empty previous version counts as not tracked.
/// Entries come back sorted by package name.
pub fn diff(previous: &VersionMap, current: &VersionMap) -> Changeset {
    current
        .iter()
        .filter(|(_, to)| !to.is_empty())
        .filter_map(|(name, to)| {
            let from = previous.get(name).filter(|v| !v.is_empty());
            (from != Some(to)).then(|| ChangeEntry::new(name, from.map(String::from), to))
        })
        .collect()
}
