//! core::merge
//!
//! Compute the outgoing metadata set for a write.
//!
//! # Rules
//!
//! - The new entry is always first in the output.
//! - Read-only entries are dropped; the service rejects them on resubmission
//!   and keeps them regardless.
//! - A writable entry with the same key and namespace as the new entry is
//!   replaced by it, so the owner's slot holds exactly one value.
//! - Every other writable entry is carried over unchanged, in read order.
//!   Entries owned by other namespaces are never filtered by key.
//!
//! # Example
//!
//! ```
//! use nexmeta::core::merge::merge;
//! use nexmeta::core::types::{MetadataEntry, MetadataSet};
//!
//! let current = MetadataSet::from_entries(vec![MetadataEntry {
//!     key: "owner".into(),
//!     value: "teamA".into(),
//!     namespace: "other#".into(),
//!     read_only: true,
//! }]);
//! let new_entry = MetadataEntry::owned("urn:maven/artifact", "build", "42");
//!
//! let merged = merge(&current, new_entry.clone());
//! assert_eq!(merged.entries(), &[new_entry]);
//! ```

use super::types::{MetadataEntry, MetadataSet};

/// Merge `new_entry` into `current`, producing the set to submit.
///
/// Pure and deterministic.
pub fn merge(current: &MetadataSet, new_entry: MetadataEntry) -> MetadataSet {
    let mut outgoing = MetadataSet::new();

    let carried: Vec<MetadataEntry> = current
        .iter()
        .filter(|entry| !entry.read_only)
        .filter(|entry| !entry.same_slot(&new_entry))
        .cloned()
        .collect();

    outgoing.push(new_entry);
    for entry in carried {
        outgoing.push(entry);
    }

    outgoing
}

/// Entries of `current` that [`merge`] leaves out of the outgoing set.
///
/// Used for trace output so the log shows what was not resubmitted.
pub fn dropped_entries<'a>(
    current: &'a MetadataSet,
    new_entry: &MetadataEntry,
) -> Vec<&'a MetadataEntry> {
    current
        .iter()
        .filter(|entry| entry.read_only || entry.same_slot(new_entry))
        .collect()
}
