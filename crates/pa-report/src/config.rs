//! Report configuration types.

use crate::project::DISPLAY_CAP;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default tooltip catalog, keyed by check label.
///
/// Injected into the annotation engine via [`ReportConfig::tooltips`] so
/// deployments can extend or replace it without code changes.
static DEFAULT_TOOLTIPS: Lazy<HashMap<String, String>> = Lazy::new(|| {
    [
        (
            "Currency",
            "Display currency of the property. '(not set)' means revenue is reported without conversion.",
        ),
        (
            "Time Zone",
            "Reporting time zone. Mismatches with the business time zone skew day boundaries.",
        ),
        (
            "Industry Category",
            "Used for benchmarking. An unset category disables industry comparisons.",
        ),
        (
            "Data Retention",
            "How long user-level data is kept. Short windows limit exploration reports.",
        ),
        (
            "Unattributed Traffic",
            "Sessions whose source could not be determined, usually missing UTM tagging.",
        ),
        (
            "Missing Landing Pages",
            "Sessions with a '(not set)' landing page, often caused by redirects dropping parameters.",
        ),
        (
            "Revenue without Items",
            "Purchase events that reported revenue but carried no item payload.",
        ),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
});

fn default_display_cap() -> usize {
    DISPLAY_CAP
}

fn default_tooltips() -> HashMap<String, String> {
    DEFAULT_TOOLTIPS.clone()
}

/// Complete report configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Custom report title.
    pub title: Option<String>,
    /// Maximum rows rendered per table group.
    #[serde(default = "default_display_cap")]
    pub display_cap: usize,
    /// Check label to explanation catalog for row tooltips.
    #[serde(default = "default_tooltips")]
    pub tooltips: HashMap<String, String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: None,
            display_cap: default_display_cap(),
            tooltips: default_tooltips(),
        }
    }
}

impl ReportConfig {
    /// Create a new report configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the report title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the per-group display cap.
    pub fn with_display_cap(mut self, cap: usize) -> Self {
        self.display_cap = cap;
        self
    }

    /// Add or replace one tooltip entry.
    pub fn with_tooltip(mut self, label: impl Into<String>, text: impl Into<String>) -> Self {
        self.tooltips.insert(label.into(), text.into());
        self
    }

    /// Load configuration from JSON.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ReportConfig::default();
        assert_eq!(config.display_cap, DISPLAY_CAP);
        assert!(config.title.is_none());
        assert!(config.tooltips.contains_key("Currency"));
    }

    #[test]
    fn test_config_builder() {
        let config = ReportConfig::new()
            .with_title("Q3 Audit")
            .with_display_cap(5)
            .with_tooltip("Custom Check", "Explains the custom check");
        assert_eq!(config.title.as_deref(), Some("Q3 Audit"));
        assert_eq!(config.display_cap, 5);
        assert_eq!(
            config.tooltips.get("Custom Check").map(String::as_str),
            Some("Explains the custom check")
        );
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = ReportConfig::new().with_title("Round Trip");
        let parsed = ReportConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(parsed.title.as_deref(), Some("Round Trip"));
        assert_eq!(parsed.display_cap, config.display_cap);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let parsed = ReportConfig::from_json("{}").unwrap();
        assert_eq!(parsed.display_cap, DISPLAY_CAP);
        assert!(!parsed.tooltips.is_empty());
    }
}
