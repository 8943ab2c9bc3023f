use std::collections::{BTreeSet, HashSet};

use crate::entities::{PendingWhitelistEntry, WhitelistEntry};
use crate::value_objects::{EventId, RefId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciled {
    pub confirmed: Vec<RefId>,
    pub pending: Vec<RefId>,
}

/// Rows to write when a ref-id gains a local User.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Promotion {
    pub insert: Vec<WhitelistEntry>,
    pub remove: Vec<PendingWhitelistEntry>,
    pub events: Vec<EventId>,
}

/// Splits whitelist ref-ids into confirmed and pending rows.
pub struct WhitelistReconciler;

impl WhitelistReconciler {
    /// First occurrence wins; order is otherwise preserved.
    pub fn dedup(ref_ids: &[RefId]) -> Vec<RefId> {
        let mut seen = HashSet::with_capacity(ref_ids.len());
        ref_ids
            .iter()
            .copied()
            .filter(|ref_id| seen.insert(*ref_id))
            .collect()
    }

    pub fn reconcile(ref_ids: &[RefId], known: &HashSet<RefId>) -> Reconciled {
        let (confirmed, pending) = Self::dedup(ref_ids)
            .into_iter()
            .partition(|ref_id| known.contains(ref_id));
        Reconciled {
            confirmed,
            pending,
        }
    }

    /// Converts every pending row for `ref_id`. A confirmed row that already
    /// exists for the same event is kept and the pending one is just dropped.
    pub fn promote(
        ref_id: RefId,
        pending: &BTreeSet<PendingWhitelistEntry>,
        confirmed: &BTreeSet<WhitelistEntry>,
    ) -> Promotion {
        let mut promotion = Promotion::default();
        for entry in pending.iter().filter(|entry| entry.ref_id == ref_id) {
            let converted = WhitelistEntry::from(*entry);
            if !confirmed.contains(&converted) {
                promotion.insert.push(converted);
            }
            promotion.remove.push(*entry);
            promotion.events.push(entry.event_id);
        }
        promotion
    }
}
