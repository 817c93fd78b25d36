//! Audit request parameters and the backend response envelope.

use crate::error::{Error, Result};
use crate::payload::AuditPayload;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Default start of the audit window.
pub const DEFAULT_START_DATE: &str = "30daysAgo";

/// Default end of the audit window.
pub const DEFAULT_END_DATE: &str = "today";

/// Parameters of one audit run, posted to the audit backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRequest {
    /// Numeric GA4 property identifier.
    pub property_id: String,
    /// Start of the reporting window: relative token or `YYYY-MM-DD`.
    #[serde(default = "default_start_date")]
    pub start_date: String,
    /// End of the reporting window: relative token or `YYYY-MM-DD`.
    #[serde(default = "default_end_date")]
    pub end_date: String,
}

fn default_start_date() -> String {
    DEFAULT_START_DATE.to_string()
}

fn default_end_date() -> String {
    DEFAULT_END_DATE.to_string()
}

impl AuditRequest {
    /// Create a request with the default reporting window.
    pub fn new(property_id: impl Into<String>) -> Self {
        Self {
            property_id: property_id.into(),
            start_date: default_start_date(),
            end_date: default_end_date(),
        }
    }

    /// Override the reporting window.
    pub fn with_dates(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_date = start.into();
        self.end_date = end.into();
        self
    }

    /// Validate parameters before hitting the backend.
    pub fn validate(&self) -> Result<()> {
        if self.property_id.is_empty() {
            return Err(Error::InvalidRequest("property ID is required".into()));
        }
        if !self.property_id.chars().all(|c| c.is_ascii_digit()) {
            return Err(Error::InvalidRequest(format!(
                "property ID '{}' must be numeric",
                self.property_id
            )));
        }
        for (label, value) in [("start_date", &self.start_date), ("end_date", &self.end_date)] {
            if !is_valid_date(value) {
                return Err(Error::InvalidRequest(format!(
                    "{label} '{value}' is neither a relative token nor YYYY-MM-DD"
                )));
            }
        }
        Ok(())
    }
}

/// Accepts the reporting-API relative tokens (`today`, `yesterday`,
/// `NdaysAgo`) and literal ISO dates.
fn is_valid_date(value: &str) -> bool {
    if matches!(value, "today" | "yesterday") {
        return true;
    }
    if let Some(days) = value.strip_suffix("daysAgo") {
        return !days.is_empty() && days.chars().all(|c| c.is_ascii_digit());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

/// Transport envelope returned by the audit backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditResponse {
    /// Whether the backend completed the audit.
    pub success: bool,
    /// Audit payload, present on success.
    #[serde(default)]
    pub data: Option<AuditPayload>,
    /// Backend failure message, present on error.
    #[serde(default)]
    pub error: Option<String>,
}

impl AuditResponse {
    /// Unwrap the envelope into its payload.
    ///
    /// `success: false` maps to [`Error::Backend`]; a successful envelope
    /// with no data yields `None` (the assembler renders a placeholder).
    pub fn into_payload(self) -> Result<Option<AuditPayload>> {
        if self.success {
            Ok(self.data)
        } else {
            Err(Error::Backend(
                self.error
                    .unwrap_or_else(|| "audit backend reported failure".into()),
            ))
        }
    }
}
