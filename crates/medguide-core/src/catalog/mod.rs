//! In-memory medication catalog.
//!
//! Built once from the data file and read-only afterwards. Records keep the
//! order of their first appearance in the document.

mod loader;

pub use loader::*;

use std::collections::{BTreeSet, HashSet};

use tracing::{debug, info};

use crate::models::{MedicationRecord, RawMedication};
use crate::search::{score_keys, ScoreBreakdown, SearchKeys};

/// Family filter value that selects every record.
pub const FAMILY_ALL: &str = "Todos";

/// Deduplicated, order-preserving catalog with stable ids.
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    records: Vec<MedicationRecord>,
    /// Folded search fields, parallel to `records`
    keys: Vec<SearchKeys>,
}

impl CatalogIndex {
    /// Build the catalog from raw entries.
    ///
    /// Each record's id is the position of its first occurrence. Later
    /// entries with the same `name|presentation` are dropped whole.
    pub fn build(raw_records: Vec<RawMedication>) -> Self {
        let raw_count = raw_records.len();
        let mut seen = HashSet::with_capacity(raw_count);
        let mut records = Vec::with_capacity(raw_count);

        for (position, raw) in raw_records.into_iter().enumerate() {
            let identity = raw.identity();
            if seen.contains(&identity) {
                debug!(position, identity = %raw.identity_key(), "Dropping duplicate medication");
                continue;
            }
            seen.insert(identity);
            records.push(raw.into_record(position));
        }

        let keys = records.iter().map(SearchKeys::from_record).collect();

        info!(
            raw = raw_count,
            unique = records.len(),
            duplicates = raw_count - records.len(),
            "Built medication catalog"
        );

        Self { records, keys }
    }

    /// All records in catalog order.
    pub fn records(&self) -> &[MedicationRecord] {
        &self.records
    }

    /// Number of unique records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records of one family in catalog order, or everything for [`FAMILY_ALL`].
    pub fn list_by_family(&self, family: &str) -> Vec<&MedicationRecord> {
        if family == FAMILY_ALL {
            return self.records.iter().collect();
        }
        self.records
            .iter()
            .filter(|r| r.simple_family == family)
            .collect()
    }

    /// Records matching an already-normalized query, best first.
    ///
    /// Equal scores keep catalog order. An empty query means no search is
    /// active and yields the whole catalog.
    pub fn search(&self, normalized_query: &str) -> Vec<&MedicationRecord> {
        if normalized_query.is_empty() {
            return self.list_by_family(FAMILY_ALL);
        }
        self.search_scored(normalized_query)
            .into_iter()
            .map(|(record, _)| record)
            .collect()
    }

    /// Like [`search`](Self::search) but keeps each record's score breakdown.
    pub fn search_scored(&self, normalized_query: &str) -> Vec<(&MedicationRecord, ScoreBreakdown)> {
        let mut scored: Vec<(&MedicationRecord, ScoreBreakdown)> = self
            .records
            .iter()
            .zip(&self.keys)
            .map(|(record, keys)| (record, score_keys(keys, normalized_query)))
            .filter(|(_, breakdown)| breakdown.total() > 0)
            .collect();

        // sort_by is stable, ties stay in catalog order
        scored.sort_by(|(_, a), (_, b)| b.total().cmp(&a.total()));

        debug!(query = normalized_query, hits = scored.len(), "Searched catalog");
        scored
    }

    /// Sorted distinct non-empty families, with [`FAMILY_ALL`] first.
    pub fn distinct_families(&self) -> Vec<String> {
        let families: BTreeSet<&str> = self
            .records
            .iter()
            .map(|r| r.simple_family.as_str())
            .filter(|f| !f.is_empty())
            .collect();

        std::iter::once(FAMILY_ALL.to_string())
            .chain(families.into_iter().map(str::to_string))
            .collect()
    }

    /// Look up a record by its stable id.
    pub fn find_by_id(&self, id: usize) -> Option<&MedicationRecord> {
        // ids ascend with catalog order
        self.records
            .binary_search_by_key(&id, |r| r.id)
            .ok()
            .map(|i| &self.records[i])
    }
}
