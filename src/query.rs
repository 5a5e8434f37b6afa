//! Filter and sort pipeline.
//!
//! A `QuerySnapshot` captures the state of the catalogue controls at one
//! pipeline invocation. `filter_and_sort` applies the predicates
//! conjunctively and orders the survivors, borrowing the records for a
//! single synchronous pass. No predicate or comparator can fail: missing
//! fields degrade to documented defaults.

use ahash::AHashSet;

use crate::record::PlantRecord;

/// Boolean classification flags a query can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKey {
    Flowering,
    Edible,
    Medicinal,
    ToxicToPets,
}

impl AttributeKey {
    /// Parse the wire key used by the attribute toggle controls.
    /// Unknown keys are ignored rather than erroring.
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "is_flowering" => Some(AttributeKey::Flowering),
            "is_edible" => Some(AttributeKey::Edible),
            "is_medicinal" => Some(AttributeKey::Medicinal),
            "is_toxic_to_pets" => Some(AttributeKey::ToxicToPets),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeKey::Flowering => "is_flowering",
            AttributeKey::Edible => "is_edible",
            AttributeKey::Medicinal => "is_medicinal",
            AttributeKey::ToxicToPets => "is_toxic_to_pets",
        }
    }

    /// The record's flag value for this key. Absent counts as unset, and
    /// the filter rejects anything that is not exactly `true`.
    fn value_in(&self, record: &PlantRecord) -> Option<bool> {
        match self {
            AttributeKey::Flowering => record.is_flowering,
            AttributeKey::Edible => record.is_edible,
            AttributeKey::Medicinal => record.is_medicinal,
            AttributeKey::ToxicToPets => record.is_toxic_to_pets,
        }
    }
}

/// Selectable orderings of the filtered catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    NameAsc,
    NameDesc,
    ConfDesc,
    ConfAsc,
    DateDesc,
    DateAsc,
}

impl SortMode {
    /// Parse the sort selector's wire value. Unknown modes map to `None`,
    /// which the sorter treats as identity order.
    pub fn parse(mode: &str) -> Option<Self> {
        match mode {
            "name_asc" => Some(SortMode::NameAsc),
            "name_desc" => Some(SortMode::NameDesc),
            "conf_desc" => Some(SortMode::ConfDesc),
            "conf_asc" => Some(SortMode::ConfAsc),
            "date_desc" => Some(SortMode::DateDesc),
            "date_asc" => Some(SortMode::DateAsc),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::NameAsc => "name_asc",
            SortMode::NameDesc => "name_desc",
            SortMode::ConfDesc => "conf_desc",
            SortMode::ConfAsc => "conf_asc",
            SortMode::DateDesc => "date_desc",
            SortMode::DateAsc => "date_asc",
        }
    }
}

/// Captured state of all filter/sort controls at one pipeline invocation.
#[derive(Debug, Clone, Default)]
pub struct QuerySnapshot {
    /// Raw search text; trimmed and lowercased before matching.
    pub search: String,
    /// Flags a record must have set to `true` (AND logic).
    pub required_attributes: AHashSet<AttributeKey>,
    /// Minimum confidence; inactive at or below zero.
    pub min_confidence: f64,
    /// `None` leaves the filtered order untouched.
    pub sort: Option<SortMode>,
}

impl QuerySnapshot {
    /// True when no predicate is active and no ordering is requested, i.e.
    /// the pipeline is an identity pass.
    pub fn is_identity(&self) -> bool {
        self.normalized_search().is_empty()
            && self.required_attributes.is_empty()
            && self.min_confidence <= 0.0
            && self.sort.is_none()
    }

    fn normalized_search(&self) -> String {
        self.search.trim().to_lowercase()
    }
}

/// Apply the snapshot's predicates conjunctively, preserving input order.
///
/// Each pass may only shrink the set; with no active predicate the result
/// is the identity borrow of the input.
pub fn filter<'a>(records: &'a [PlantRecord], snapshot: &QuerySnapshot) -> Vec<&'a PlantRecord> {
    let mut result: Vec<&PlantRecord> = records.iter().collect();

    // 1. Search (name or local name)
    let query = snapshot.normalized_search();
    if !query.is_empty() {
        result.retain(|p| {
            p.identified_name.to_lowercase().contains(&query) || p.local_name_matches(&query)
        });
    }

    // 2. Attributes (AND logic: must match all required)
    for key in &snapshot.required_attributes {
        result.retain(|p| key.value_in(p) == Some(true));
    }

    // 3. Confidence
    if snapshot.min_confidence > 0.0 {
        result.retain(|p| p.confidence_or_zero() >= snapshot.min_confidence);
    }

    result
}

/// Order the filtered records in place. The sort is stable, so records
/// with equal keys keep their filtered-result order, and an unspecified
/// mode reorders nothing.
pub fn sort(records: &mut [&PlantRecord], mode: Option<SortMode>) {
    let Some(mode) = mode else {
        return;
    };
    match mode {
        SortMode::NameAsc => records.sort_by(|a, b| name_key(a).cmp(&name_key(b))),
        SortMode::NameDesc => records.sort_by(|a, b| name_key(b).cmp(&name_key(a))),
        SortMode::ConfDesc => {
            records.sort_by(|a, b| b.confidence_or_zero().total_cmp(&a.confidence_or_zero()))
        }
        SortMode::ConfAsc => {
            records.sort_by(|a, b| a.confidence_or_zero().total_cmp(&b.confidence_or_zero()))
        }
        SortMode::DateDesc => {
            records.sort_by(|a, b| b.date_added_or_epoch().cmp(&a.date_added_or_epoch()))
        }
        SortMode::DateAsc => {
            records.sort_by(|a, b| a.date_added_or_epoch().cmp(&b.date_added_or_epoch()))
        }
    }
}

/// One pipeline run: filter, then sort.
pub fn filter_and_sort<'a>(
    records: &'a [PlantRecord],
    snapshot: &QuerySnapshot,
) -> Vec<&'a PlantRecord> {
    let mut result = filter(records, snapshot);
    sort(&mut result, snapshot.sort);
    tracing::debug!(
        total = records.len(),
        matched = result.len(),
        sort = snapshot.sort.map(|m| m.as_str()).unwrap_or("none"),
        "pipeline run"
    );
    result
}

/// Case-insensitive collation key for name ordering.
fn name_key(record: &PlantRecord) -> String {
    record.identified_name.to_lowercase()
}
