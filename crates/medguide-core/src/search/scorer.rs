//! Relevance scoring of catalog records against a search query.
//!
//! Scoring is cumulative:
//! - Name: exact 20, prefix 10, substring 5 (highest tier only)
//! - Family contains query: 3
//! - Uses contains query: 2
//! - Indications contains query: 1

use serde::{Deserialize, Serialize};

use crate::models::MedicationRecord;

use super::normalize;

const NAME_EXACT: u32 = 20;
const NAME_PREFIX: u32 = 10;
const NAME_SUBSTRING: u32 = 5;
const FAMILY_MATCH: u32 = 3;
const USES_MATCH: u32 = 2;
const INDICATIONS_MATCH: u32 = 1;

/// Pre-folded text of the fields that take part in scoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchKeys {
    pub name: String,
    pub family: String,
    pub uses: String,
    pub indications: String,
}

impl SearchKeys {
    /// Fold the searchable fields of a record.
    ///
    /// The family key is the canonical `simple_family` label.
    pub fn from_record(record: &MedicationRecord) -> Self {
        Self {
            name: normalize(&record.name),
            family: normalize(&record.simple_family),
            uses: normalize(&record.uses),
            indications: normalize(&record.indications),
        }
    }
}

/// How a record's score was assembled.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub name_score: u32,
    pub family_score: u32,
    pub uses_score: u32,
    pub indications_score: u32,
}

impl ScoreBreakdown {
    /// Sum of all components.
    pub fn total(&self) -> u32 {
        self.name_score + self.family_score + self.uses_score + self.indications_score
    }
}

/// Score a record against an already-normalized, non-empty query.
pub fn score(record: &MedicationRecord, normalized_query: &str) -> u32 {
    score_keys(&SearchKeys::from_record(record), normalized_query).total()
}

/// Score pre-folded keys against an already-normalized query.
pub fn score_keys(keys: &SearchKeys, normalized_query: &str) -> ScoreBreakdown {
    ScoreBreakdown {
        name_score: score_name(&keys.name, normalized_query),
        family_score: bonus(&keys.family, normalized_query, FAMILY_MATCH),
        uses_score: bonus(&keys.uses, normalized_query, USES_MATCH),
        indications_score: bonus(&keys.indications, normalized_query, INDICATIONS_MATCH),
    }
}

fn score_name(name: &str, query: &str) -> u32 {
    if name == query {
        NAME_EXACT
    } else if name.starts_with(query) {
        NAME_PREFIX
    } else if name.contains(query) {
        NAME_SUBSTRING
    } else {
        0
    }
}

fn bonus(field: &str, query: &str, weight: u32) -> u32 {
    if field.contains(query) {
        weight
    } else {
        0
    }
}
