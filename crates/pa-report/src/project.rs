//! Schema-driven projection of section data into display tables.
//!
//! Projection applies a per-group display cap and records whether truncation
//! occurred so the consumer can show a "more results exist" indicator.
//! The cap affects presentation only; the summary rules read the raw
//! payload.

use crate::annotate::AnnotationEngine;
use crate::schema::{Column, SectionSchema};
use pa_common::payload::lookup_path;
use pa_common::SectionData;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// Default maximum rows rendered per table group.
pub const DISPLAY_CAP: usize = 15;

/// Placeholder row text for sections with no entries.
pub const EMPTY_SECTION_NOTE: &str = "No data — all checks passed";

/// Header of the single-column table used for messages and placeholders.
const STATUS_HEADER: &str = "Status";

/// One display row: cells in column order plus its annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedRow {
    /// Cell text in column order.
    pub cells: Vec<String>,
    /// Whether the row's result is anomalous.
    pub flagged: bool,
    /// Explanation of the row's check, when one is catalogued.
    pub tooltip: Option<String>,
}

impl RenderedRow {
    fn info(text: impl Into<String>) -> Self {
        Self {
            cells: vec![text.into()],
            flagged: false,
            tooltip: None,
        }
    }
}

/// One projected table (a whole section, or one split group of it).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedTable {
    /// Sub-table label for split sections.
    pub label: Option<String>,
    /// Column headers in display order.
    pub columns: Vec<String>,
    /// Per-column explanations, parallel to `columns`.
    #[serde(default)]
    pub column_tooltips: Vec<Option<String>>,
    /// Display rows, capped.
    pub rows: Vec<RenderedRow>,
    /// Total entries before the cap.
    pub total_count: usize,
    /// Whether rows were dropped for display.
    pub truncated: bool,
}

impl RenderedTable {
    /// Create a table; `truncated` is derived from the row/total counts.
    pub fn new(label: Option<String>, columns: Vec<String>, rows: Vec<RenderedRow>, total_count: usize) -> Self {
        let truncated = rows.len() < total_count;
        let column_tooltips = vec![None; columns.len()];
        Self {
            label,
            columns,
            column_tooltips,
            rows,
            total_count,
            truncated,
        }
    }

    fn with_column_tooltips(mut self, tooltips: Vec<Option<String>>) -> Self {
        self.column_tooltips = tooltips;
        self
    }
}

/// One fully projected section of the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedSection {
    /// Section name as it appeared in the payload.
    pub name: String,
    /// Short explanation from the registered schema.
    pub blurb: Option<String>,
    /// One table, or several for split sections.
    pub tables: Vec<RenderedTable>,
}

/// Projects one section's raw data against its schema.
#[derive(Debug, Clone, Copy)]
pub struct TableProjector {
    cap: usize,
}

impl TableProjector {
    /// Create a projector with the given per-group display cap.
    pub fn new(cap: usize) -> Self {
        Self { cap }
    }

    /// Project one section into its display tables, annotating each row.
    pub fn project(
        &self,
        name: &str,
        data: &SectionData,
        schema: &SectionSchema,
        annotator: &AnnotationEngine,
    ) -> RenderedSection {
        let tables = match data {
            SectionData::Records(records) if !records.is_empty() => {
                self.project_records(name, records, schema, annotator)
            }
            SectionData::Names(names) if !names.is_empty() => {
                vec![self.project_names(name, names, schema, annotator)]
            }
            SectionData::Message(msg) if !msg.is_empty() => {
                vec![RenderedTable::new(
                    None,
                    vec![STATUS_HEADER.to_string()],
                    vec![RenderedRow::info(msg.clone())],
                    1,
                )]
            }
            SectionData::Other(value) if !data.is_empty() => {
                vec![self.project_opaque(name, value)]
            }
            // Empty in any shape.
            _ => vec![RenderedTable::new(
                None,
                vec![STATUS_HEADER.to_string()],
                vec![RenderedRow::info(EMPTY_SECTION_NOTE)],
                1,
            )],
        };
        RenderedSection {
            name: name.to_string(),
            blurb: schema.blurb.map(str::to_string),
            tables,
        }
    }

    fn project_records(
        &self,
        name: &str,
        records: &[Map<String, Value>],
        schema: &SectionSchema,
        annotator: &AnnotationEngine,
    ) -> Vec<RenderedTable> {
        match schema.split {
            Some(split) => split
                .groups
                .iter()
                .map(|group| {
                    let members: Vec<&Map<String, Value>> = records
                        .iter()
                        .filter(|r| {
                            r.get(split.field).and_then(Value::as_str) == Some(group.matches)
                        })
                        .collect();
                    self.project_group(name, &members, group.columns, Some(group.label), annotator)
                })
                .collect(),
            None => {
                let members: Vec<&Map<String, Value>> = records.iter().collect();
                vec![self.project_group(name, &members, schema.columns, None, annotator)]
            }
        }
    }

    fn project_group(
        &self,
        name: &str,
        records: &[&Map<String, Value>],
        columns: &[Column],
        label: Option<&str>,
        annotator: &AnnotationEngine,
    ) -> RenderedTable {
        let total = records.len();
        let rows: Vec<RenderedRow> = records
            .iter()
            .take(self.cap)
            .map(|record| {
                let cells = columns
                    .iter()
                    .map(|col| cell_text(record, col.accessor))
                    .collect();
                let ann = annotator.annotate(name, record);
                RenderedRow {
                    cells,
                    flagged: ann.flagged,
                    tooltip: ann.tooltip,
                }
            })
            .collect();
        if total > self.cap {
            debug!(section = name, total, cap = self.cap, "rows truncated for display");
        }
        RenderedTable::new(
            label.map(str::to_string),
            columns.iter().map(|c| c.header.to_string()).collect(),
            rows,
            total,
        )
        .with_column_tooltips(
            columns
                .iter()
                .map(|c| c.tooltip.map(str::to_string))
                .collect(),
        )
    }

    fn project_names(
        &self,
        name: &str,
        names: &[String],
        schema: &SectionSchema,
        annotator: &AnnotationEngine,
    ) -> RenderedTable {
        let header = schema
            .columns
            .first()
            .map_or("Name", |c| c.header)
            .to_string();
        let total = names.len();
        let rows = names
            .iter()
            .take(self.cap)
            .map(|n| {
                let ann = annotator.annotate_name(name, n);
                RenderedRow {
                    cells: vec![n.clone()],
                    flagged: ann.flagged,
                    tooltip: ann.tooltip,
                }
            })
            .collect();
        RenderedTable::new(None, vec![header], rows, total)
    }

    fn project_opaque(&self, name: &str, value: &Value) -> RenderedTable {
        debug!(section = name, "unrecognized section shape, rendering opaquely");
        let (rows, total) = match value {
            Value::Array(items) => (
                items
                    .iter()
                    .take(self.cap)
                    .map(|v| RenderedRow::info(display_value(v)))
                    .collect::<Vec<_>>(),
                items.len(),
            ),
            other => (vec![RenderedRow::info(display_value(other))], 1),
        };
        RenderedTable::new(None, vec!["Value".to_string()], rows, total)
    }
}

impl Default for TableProjector {
    fn default() -> Self {
        Self::new(DISPLAY_CAP)
    }
}

/// Extract one cell's text; a missing accessor target is an empty cell.
/// An empty accessor (the opaque fallback schema) dumps the whole record.
fn cell_text(record: &Map<String, Value>, accessor: &str) -> String {
    if accessor.is_empty() {
        return display_value(&Value::Object(record.clone()));
    }
    lookup_path(record, accessor).map_or_else(String::new, display_value)
}

/// Display text for one JSON value.
fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_value_scalars() {
        assert_eq!(display_value(&json!("USD")), "USD");
        assert_eq!(display_value(&json!(12.4)), "12.4");
        assert_eq!(display_value(&json!(true)), "true");
        assert_eq!(display_value(&Value::Null), "");
    }

    #[test]
    fn test_display_value_array_joined() {
        assert_eq!(display_value(&json!(["T1", "T2"])), "T1, T2");
    }

    #[test]
    fn test_cell_text_missing_field_is_empty() {
        let record = json!({"Check": "x"});
        let map = record.as_object().unwrap();
        assert_eq!(cell_text(map, "Result.percentage"), "");
        assert_eq!(cell_text(map, "Check"), "x");
    }

    #[test]
    fn test_cell_text_empty_accessor_dumps_record() {
        let record = json!({"foo": 1, "bar": 2});
        let map = record.as_object().unwrap();
        let cell = cell_text(map, "");
        assert!(cell.contains("\"foo\""));
        assert!(cell.contains("\"bar\""));
    }

    #[test]
    fn test_truncation_derivation() {
        let table = RenderedTable::new(None, vec!["A".into()], vec![RenderedRow::info("x")], 5);
        assert!(table.truncated);
        let full = RenderedTable::new(None, vec!["A".into()], vec![RenderedRow::info("x")], 1);
        assert!(!full.truncated);
    }
}
