//! Report assembly.
//!
//! The assembler is a pure function of the payload it is given: resolve each
//! section's schema, project and annotate its rows, then append the rule
//! engine's advisory block. It never raises for any payload shape; an
//! absent payload yields a placeholder report.

use crate::annotate::AnnotationEngine;
use crate::config::ReportConfig;
use crate::project::{RenderedSection, TableProjector};
use crate::rules::{Advisory, Severity, SummaryRuleEngine};
use crate::schema;
use chrono::{DateTime, Utc};
use pa_common::AuditPayload;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Advisory text used when no payload was available at all.
pub const MISSING_PAYLOAD_NOTE: &str =
    "No audit data was returned for this request — nothing to report.";

/// The assembled, immutable audit report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Custom title, when configured.
    pub title: Option<String>,
    /// Assembly timestamp.
    pub generated_at: DateTime<Utc>,
    /// Generator version.
    pub generator_version: String,
    /// Projected sections in deterministic payload order.
    pub sections: Vec<RenderedSection>,
    /// Ordered advisory summary.
    pub advisories: Vec<Advisory>,
}

impl Report {
    /// Display title for this report.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("GA4 Property Audit")
    }

    /// Whether any advisory is critical.
    pub fn has_critical(&self) -> bool {
        self.advisories
            .iter()
            .any(|a| a.severity == Severity::Critical)
    }
}

/// Orchestrates schema lookup, projection, annotation, and summary rules.
pub struct ReportAssembler {
    config: ReportConfig,
    projector: TableProjector,
    annotator: AnnotationEngine,
}

impl ReportAssembler {
    /// Create an assembler with the given configuration.
    pub fn new(config: ReportConfig) -> Self {
        let projector = TableProjector::new(config.display_cap);
        let annotator = AnnotationEngine::new(config.tooltips.clone());
        Self {
            config,
            projector,
            annotator,
        }
    }

    /// Create an assembler with default configuration.
    pub fn default_config() -> Self {
        Self::new(ReportConfig::default())
    }

    /// Get the current configuration.
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Assemble a report from one payload.
    ///
    /// `None` yields a report with empty sections and a single explanatory
    /// advisory rather than an error.
    pub fn assemble(&self, payload: Option<&AuditPayload>) -> Report {
        let (sections, advisories) = match payload {
            Some(payload) => {
                let sections = payload
                    .sections()
                    .map(|(name, data)| {
                        let schema = schema::lookup(name, data);
                        self.projector.project(name, data, schema, &self.annotator)
                    })
                    .collect();
                (sections, SummaryRuleEngine::summarize(payload))
            }
            None => (
                Vec::new(),
                vec![Advisory {
                    severity: Severity::Warning,
                    message: MISSING_PAYLOAD_NOTE.into(),
                }],
            ),
        };

        let report = Report {
            title: self.config.title.clone(),
            generated_at: Utc::now(),
            generator_version: env!("CARGO_PKG_VERSION").to_string(),
            sections,
            advisories,
        };
        info!(
            sections = report.sections.len(),
            advisories = report.advisories.len(),
            "report assembled"
        );
        report
    }
}
