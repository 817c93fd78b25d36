//! Summary rule engine.
//!
//! A fixed, ordered list of independent rules evaluated over the entire
//! untruncated payload. Evaluation order is the emission order; advisories
//! are never re-sorted by severity. Absent sections are treated as no
//! evidence, never as a failure.

use crate::annotate::{pii_anomalous, share_value, SHARE_WARN_PCT};
use crate::schema::section_names;
use pa_common::payload::{CheckRecord, ITEM_SOURCE, REVENUE_SOURCE, SOURCE_FIELD, TRANSACTION_ID_FIELD};
use pa_common::{AuditPayload, SectionData};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use tracing::debug;

/// Sentinel the backend reports for an unconfigured property setting.
pub const CURRENCY_UNSET: &str = "(not set)";

/// Check label of the tracked currency setting.
pub const CURRENCY_CHECK: &str = "Currency";

/// Custom-dimension quota of a standard GA4 property.
pub const DIMENSION_CEILING: usize = 50;

/// Headroom below the quota at which usage is worth a warning.
pub const DIMENSION_MARGIN: usize = 5;

/// Severity of one advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Revenue or privacy is actively broken.
    Critical,
    /// Configuration or data quality needs attention.
    Warning,
    /// Nothing found.
    Healthy,
}

impl Severity {
    /// Glyph used in human-facing output.
    pub fn glyph(&self) -> &'static str {
        match self {
            Severity::Critical => "✗",
            Severity::Warning => "!",
            Severity::Healthy => "✓",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Critical => write!(f, "critical"),
            Severity::Warning => write!(f, "warning"),
            Severity::Healthy => write!(f, "healthy"),
        }
    }
}

/// One severity-tagged advisory message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advisory {
    /// How urgent the finding is.
    pub severity: Severity,
    /// Human-readable finding.
    pub message: String,
}

impl Advisory {
    fn critical(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Critical,
            message: message.into(),
        }
    }

    fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    /// The single advisory emitted when no rule fires.
    pub fn healthy() -> Self {
        Self {
            severity: Severity::Healthy,
            message: "All audit checks passed — no issues detected in this reporting window."
                .into(),
        }
    }
}

/// Evaluates the fixed rule list against a payload.
pub struct SummaryRuleEngine;

impl SummaryRuleEngine {
    /// Derive the ordered advisory summary for one payload.
    ///
    /// Deterministic and pure: the same payload always yields the same
    /// sequence, in fixed rule order.
    pub fn summarize(payload: &AuditPayload) -> Vec<Advisory> {
        let mut advisories = Vec::new();
        advisories.extend(duplicate_transactions(payload));
        advisories.extend(broken_linkage(payload));
        advisories.extend(pii_findings(payload));
        advisories.extend(currency_unset(payload));
        advisories.extend(dimension_headroom(payload));
        advisories.extend(attribution_shares(payload));
        if advisories.is_empty() {
            advisories.push(Advisory::healthy());
        }
        debug!(count = advisories.len(), "summary rules evaluated");
        advisories
    }
}

/// Rule 1: any duplicate transaction identifiers at all are critical.
fn duplicate_transactions(payload: &AuditPayload) -> Option<Advisory> {
    let data = payload.get(section_names::DUPLICATE_TRANSACTIONS)?;
    let count = data.len();
    if data.is_empty() {
        return None;
    }
    Some(Advisory::critical(format!(
        "{count} duplicate transaction ID(s) detected — purchase events are inflating revenue."
    )))
}

/// Rule 2: revenue rows without item rows (or vice versa) break the
/// reconciliation linkage.
fn broken_linkage(payload: &AuditPayload) -> Option<Advisory> {
    let records = payload
        .get(section_names::TRANSACTION_MAPPING)
        .and_then(SectionData::records)?;

    let ids_for = |source: &str| -> BTreeSet<&str> {
        records
            .iter()
            .filter(|r| r.get(SOURCE_FIELD).and_then(Value::as_str) == Some(source))
            .filter_map(|r| r.get(TRANSACTION_ID_FIELD).and_then(Value::as_str))
            .collect()
    };
    let revenue_ids = ids_for(REVENUE_SOURCE);
    let item_ids = ids_for(ITEM_SOURCE);

    let revenue_only = revenue_ids.difference(&item_ids).count();
    let item_only = item_ids.difference(&revenue_ids).count();
    if revenue_only == 0 && item_only == 0 {
        return None;
    }
    Some(Advisory::critical(format!(
        "Transaction reconciliation mismatch: {revenue_only} transaction(s) have revenue but no \
         item data, {item_only} have items but no revenue."
    )))
}

/// Rule 3: any PII-scan anomaly is critical.
fn pii_findings(payload: &AuditPayload) -> Option<Advisory> {
    let records = payload
        .get(section_names::PII_SCAN)
        .and_then(SectionData::records)?;
    let findings = records.iter().filter(|r| pii_anomalous(r)).count();
    if findings == 0 {
        return None;
    }
    Some(Advisory::critical(format!(
        "PII scan reported {findings} finding(s) — collected URLs may contain personal data."
    )))
}

/// Rule 4: currency left at the unset sentinel.
fn currency_unset(payload: &AuditPayload) -> Option<Advisory> {
    let records = payload
        .get(section_names::PROPERTY_SETTINGS)
        .and_then(SectionData::records)?;
    let unset = records.iter().map(|r| CheckRecord::new(r)).any(|rec| {
        rec.check() == Some(CURRENCY_CHECK) && rec.result_str() == Some(CURRENCY_UNSET)
    });
    if !unset {
        return None;
    }
    Some(Advisory::warning(format!(
        "Property currency is '{CURRENCY_UNSET}' — revenue is reported without currency \
         conversion."
    )))
}

/// Rule 5: custom-dimension usage close to the quota.
fn dimension_headroom(payload: &AuditPayload) -> Option<Advisory> {
    let used = payload.get(section_names::CUSTOM_DIMENSIONS)?.len();
    if used + DIMENSION_MARGIN < DIMENSION_CEILING {
        return None;
    }
    let remaining = DIMENSION_CEILING.saturating_sub(used);
    Some(Advisory::warning(format!(
        "Custom dimension usage at {used}/{DIMENSION_CEILING} — only {remaining} slot(s) remain."
    )))
}

/// Rule 6: one warning per attribution metric above the share threshold,
/// interpolating the literal observed value.
fn attribution_shares(payload: &AuditPayload) -> Vec<Advisory> {
    let Some(records) = payload
        .get(section_names::TRAFFIC_ATTRIBUTION)
        .and_then(SectionData::records)
    else {
        return Vec::new();
    };
    records
        .iter()
        .filter_map(|record| {
            let share = share_value(record)?;
            if share <= SHARE_WARN_PCT {
                return None;
            }
            let label = CheckRecord::new(record).check().unwrap_or("Attribution metric");
            Some(Advisory::warning(format!(
                "{label} at {share}% exceeds the {SHARE_WARN_PCT}% threshold."
            )))
        })
        .collect()
}
