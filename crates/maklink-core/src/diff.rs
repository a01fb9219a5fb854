// ── Grill list diffing ──
//
// Pure comparison of two poll snapshots, keyed by exact RemoteId
// equality. The result drives registry reconciliation and is discarded
// after one pass. Ordering of the result sets is unspecified.

use std::collections::HashMap;

use maklink_api::{GrillId, GrillListEntry};

/// A rename observed between two polls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedEntry {
    pub before: GrillListEntry,
    pub after: GrillListEntry,
}

/// The classified difference between two grill-list snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListDiff {
    pub added: Vec<GrillListEntry>,
    pub removed: Vec<GrillListEntry>,
    pub changed: Vec<ChangedEntry>,
}

impl ListDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }
}

/// Classify every entry of `current` against `previous`.
///
/// An entry present only in `current` is added; only in `previous`,
/// removed; in both with a different display name, changed. On the very
/// first poll (`previous = None`) everything is added.
pub fn diff(previous: Option<&[GrillListEntry]>, current: &[GrillListEntry]) -> ListDiff {
    let Some(previous) = previous else {
        return ListDiff {
            added: current.to_vec(),
            ..ListDiff::default()
        };
    };

    let previous_by_id: HashMap<&GrillId, &GrillListEntry> =
        previous.iter().map(|e| (&e.grill_id, e)).collect();
    let current_by_id: HashMap<&GrillId, &GrillListEntry> =
        current.iter().map(|e| (&e.grill_id, e)).collect();

    let mut result = ListDiff::default();

    for entry in current {
        match previous_by_id.get(&entry.grill_id) {
            None => result.added.push(entry.clone()),
            Some(before) if before.name != entry.name => result.changed.push(ChangedEntry {
                before: (*before).clone(),
                after: entry.clone(),
            }),
            Some(_) => {}
        }
    }

    for entry in previous {
        if !current_by_id.contains_key(&entry.grill_id) {
            result.removed.push(entry.clone());
        }
    }

    result
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(id: &str, name: &str) -> GrillListEntry {
        GrillListEntry {
            grill_id: GrillId::from(id),
            name: name.to_owned(),
        }
    }

    #[test]
    fn first_poll_adds_everything() {
        let current = vec![entry("g1", "Kitchen")];
        let d = diff(None, &current);

        assert_eq!(d.added, vec![entry("g1", "Kitchen")]);
        assert!(d.removed.is_empty());
        assert!(d.changed.is_empty());
    }

    #[test]
    fn identical_snapshots_yield_empty_diff() {
        let list = vec![entry("g1", "Kitchen"), entry("g2", "Patio")];
        assert!(diff(Some(&list), &list).is_empty());
    }

    #[test]
    fn rename_is_changed_with_before_and_after() {
        let previous = vec![entry("g1", "Kitchen")];
        let current = vec![entry("g1", "Patio")];
        let d = diff(Some(&previous), &current);

        assert!(d.added.is_empty());
        assert!(d.removed.is_empty());
        assert_eq!(
            d.changed,
            vec![ChangedEntry {
                before: entry("g1", "Kitchen"),
                after: entry("g1", "Patio"),
            }]
        );
    }

    #[test]
    fn disappearance_is_removed() {
        let previous = vec![entry("g1", "Kitchen"), entry("g2", "Patio")];
        let current = vec![entry("g1", "Kitchen")];
        let d = diff(Some(&previous), &current);

        assert_eq!(d.removed, vec![entry("g2", "Patio")]);
        assert!(d.added.is_empty());
        assert!(d.changed.is_empty());
    }

    #[test]
    fn mixed_diff_classifies_each_side() {
        let previous = vec![entry("g1", "Kitchen"), entry("g2", "Patio")];
        let current = vec![entry("g2", "Deck"), entry("g3", "Cabin")];
        let d = diff(Some(&previous), &current);

        assert_eq!(d.added, vec![entry("g3", "Cabin")]);
        assert_eq!(d.removed, vec![entry("g1", "Kitchen")]);
        assert_eq!(
            d.changed,
            vec![ChangedEntry {
                before: entry("g2", "Patio"),
                after: entry("g2", "Deck"),
            }]
        );
    }

    /// Every current entry lands in exactly one of: added, changed.after,
    /// or unchanged; every previous entry missing from current lands in
    /// removed.
    #[test]
    fn every_current_entry_is_classified_exactly_once() {
        let previous = vec![
            entry("g1", "Kitchen"),
            entry("g2", "Patio"),
            entry("g3", "Cabin"),
        ];
        let current = vec![
            entry("g2", "Patio"),   // unchanged
            entry("g3", "Garage"),  // changed
            entry("g4", "Balcony"), // added
        ];
        let d = diff(Some(&previous), &current);

        let mut classified: Vec<GrillId> = d
            .added
            .iter()
            .map(|e| e.grill_id.clone())
            .chain(d.changed.iter().map(|c| c.after.grill_id.clone()))
            .collect();
        let unchanged: Vec<GrillId> = current
            .iter()
            .filter(|e| !classified.contains(&e.grill_id))
            .map(|e| e.grill_id.clone())
            .collect();
        classified.extend(unchanged);
        classified.sort_by(|a, b| a.as_str().cmp(b.as_str()));

        let mut all_current: Vec<GrillId> = current.iter().map(|e| e.grill_id.clone()).collect();
        all_current.sort_by(|a, b| a.as_str().cmp(b.as_str()));

        assert_eq!(classified, all_current);
        assert_eq!(d.removed, vec![entry("g1", "Kitchen")]);
    }
}
