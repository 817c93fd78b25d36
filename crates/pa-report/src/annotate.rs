//! Per-record anomaly flags and tooltips.
//!
//! Anomaly predicates are declared per section name; sections without a
//! declared predicate are never flagged. Tooltip text is injected
//! configuration data keyed by check label, so the catalog can be tested
//! and extended without touching the engine.

use crate::schema::section_names;
use pa_common::payload::CheckRecord;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Marker the PII scan emits for a clean check.
pub const PII_CLEAR_MARKER: &str = "No PII found";

/// Attribution share above which a metric is considered anomalous.
pub const SHARE_WARN_PCT: f64 = 10.0;

/// Outcome of annotating one record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Whether the record's result is anomalous for its section.
    pub flagged: bool,
    /// Explanation of the check, when the catalog has one.
    pub tooltip: Option<String>,
}

/// Flags anomalous results and attaches explanatory tooltips.
#[derive(Debug, Clone)]
pub struct AnnotationEngine {
    tooltips: HashMap<String, String>,
}

impl AnnotationEngine {
    /// Create an engine with the given label-to-explanation catalog.
    pub fn new(tooltips: HashMap<String, String>) -> Self {
        Self { tooltips }
    }

    /// Annotate one record of the named section. Pure; the record is never
    /// mutated.
    pub fn annotate(&self, section: &str, record: &Map<String, Value>) -> Annotation {
        let rec = CheckRecord::new(record);
        let flagged = match section {
            section_names::PII_SCAN => pii_anomalous(record),
            section_names::TRANSACTION_MAPPING => conflicting_identifiers(record),
            section_names::TRAFFIC_ATTRIBUTION => {
                share_value(record).is_some_and(|p| p > SHARE_WARN_PCT)
            }
            _ => false,
        };
        Annotation {
            flagged,
            tooltip: rec.check().and_then(|label| self.tooltips.get(label).cloned()),
        }
    }

    /// Annotate one bare identifier of a name-list section.
    pub fn annotate_name(&self, section: &str, name: &str) -> Annotation {
        Annotation {
            flagged: section == section_names::DUPLICATE_TRANSACTIONS,
            tooltip: self.tooltips.get(name).cloned(),
        }
    }
}

/// A PII-scan record is anomalous unless its result carries the clear
/// marker.
pub fn pii_anomalous(record: &Map<String, Value>) -> bool {
    CheckRecord::new(record)
        .result_str()
        .is_none_or(|s| !s.contains(PII_CLEAR_MARKER))
}

/// A reconciliation check is anomalous when its result is a non-empty list
/// of conflicting identifiers.
pub fn conflicting_identifiers(record: &Map<String, Value>) -> bool {
    matches!(
        CheckRecord::new(record).result(),
        Some(Value::Array(ids)) if !ids.is_empty()
    )
}

/// Extract the percentage leaf of a traffic-attribution record.
///
/// Accepts both a numeric leaf and a string like `"12.4%"`.
pub fn share_value(record: &Map<String, Value>) -> Option<f64> {
    match CheckRecord::new(record).field("Result.percentage")? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse().ok(),
        _ => None,
    }
}
