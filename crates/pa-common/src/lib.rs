//! Shared types for the GA4 property audit tools.
//!
//! This crate provides the foundation used by `pa-report` and `pa-cli`:
//! - The audit payload data model (sections with heterogeneous record shapes)
//! - Request parameters and the transport envelope of the audit backend
//! - Common error types
//! - Output format specifications

pub mod error;
pub mod output;
pub mod payload;
pub mod request;

pub use error::{Error, ErrorCategory, Result};
pub use output::OutputFormat;
pub use payload::{AuditPayload, CheckRecord, SectionData};
pub use request::{AuditRequest, AuditResponse};
