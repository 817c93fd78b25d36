//! Report core for GA4 property audits.
//!
//! Turns one precomputed audit payload into an immutable [`Report`]: every
//! section is projected into a tabular view despite sections having
//! heterogeneous record shapes, and a fixed set of inspection rules derives
//! a prioritized advisory summary from the same payload.
//!
//! # Components
//!
//! - [`schema`]: static registry mapping section names to column schemas,
//!   with generic and opaque fallbacks for unknown names
//! - [`project`]: schema-driven projection of section data into capped,
//!   truncation-aware display tables
//! - [`annotate`]: per-record anomaly flags and explanatory tooltips
//! - [`rules`]: ordered advisory rules evaluated over the untruncated payload
//! - [`assemble`]: orchestration of the above into one `Report` value
//!
//! # Example
//!
//! ```
//! use pa_common::AuditPayload;
//! use pa_report::{ReportAssembler, ReportConfig};
//!
//! let payload = AuditPayload::from_json(r#"{"Duplicate Transactions": []}"#).unwrap();
//! let assembler = ReportAssembler::new(ReportConfig::default());
//! let report = assembler.assemble(Some(&payload));
//! assert_eq!(report.sections.len(), 1);
//! ```

pub mod annotate;
pub mod assemble;
pub mod config;
pub mod error;
pub mod project;
pub mod rules;
pub mod schema;

pub use annotate::{Annotation, AnnotationEngine};
pub use assemble::{Report, ReportAssembler};
pub use config::ReportConfig;
pub use error::{ReportError, Result};
pub use project::{RenderedRow, RenderedSection, RenderedTable, TableProjector};
pub use rules::{Advisory, Severity, SummaryRuleEngine};
pub use schema::{section_names, Column, SectionSchema};
