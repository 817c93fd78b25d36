//! Audit payload data model.
//!
//! The audit backend returns one JSON object mapping section names to
//! section data. Section shapes are heterogeneous and determined entirely by
//! the section name: most sections carry check/result records, the
//! transaction reconciliation section carries a merged revenue/item stream,
//! and a few sections are bare identifier lists or a single string message.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Field name of the check label in a generic record.
pub const CHECK_FIELD: &str = "Check";

/// Field name of the check outcome in a generic record.
pub const RESULT_FIELD: &str = "Result";

/// `source` tag for revenue-stream rows in the merged transaction section.
pub const REVENUE_SOURCE: &str = "Revenue Table";

/// `source` tag for item-stream rows in the merged transaction section.
pub const ITEM_SOURCE: &str = "Item Table";

/// Discriminator field of the merged transaction/item stream.
pub const SOURCE_FIELD: &str = "source";

/// Transaction identifier field shared by both reconciled streams.
pub const TRANSACTION_ID_FIELD: &str = "transactionId";

/// Data carried by one named section of the payload.
///
/// Variant order matters: serde tries untagged variants top to bottom, so
/// record arrays are matched before bare string arrays, and anything that
/// fits no known shape lands in [`SectionData::Other`] rather than failing
/// the whole payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SectionData {
    /// Ordered homogeneous records sharing one field set.
    Records(Vec<Map<String, Value>>),
    /// Ordered bare identifier strings (e.g. duplicate transaction IDs).
    Names(Vec<String>),
    /// A single string message.
    Message(String),
    /// Absent data (JSON `null`).
    Empty,
    /// Unrecognized shape, rendered opaquely.
    Other(Value),
}

impl SectionData {
    /// Records of this section, if it is record-shaped.
    pub fn records(&self) -> Option<&[Map<String, Value>]> {
        match self {
            SectionData::Records(recs) => Some(recs),
            _ => None,
        }
    }

    /// Bare identifier strings of this section, if it is name-shaped.
    pub fn names(&self) -> Option<&[String]> {
        match self {
            SectionData::Names(names) => Some(names),
            _ => None,
        }
    }

    /// Number of entries (records or names); messages count as one.
    pub fn len(&self) -> usize {
        match self {
            SectionData::Records(recs) => recs.len(),
            SectionData::Names(names) => names.len(),
            SectionData::Message(_) => 1,
            SectionData::Empty => 0,
            SectionData::Other(Value::Array(items)) => items.len(),
            SectionData::Other(_) => 1,
        }
    }

    /// Whether the section carries no entries at all.
    pub fn is_empty(&self) -> bool {
        match self {
            SectionData::Records(recs) => recs.is_empty(),
            SectionData::Names(names) => names.is_empty(),
            SectionData::Message(msg) => msg.is_empty(),
            SectionData::Empty => true,
            SectionData::Other(Value::Array(items)) => items.is_empty(),
            SectionData::Other(Value::Null) => true,
            SectionData::Other(_) => false,
        }
    }
}

/// One audit run's worth of section data, keyed by section name.
///
/// Backed by a sorted map so iteration order is stable and deterministic for
/// a given input regardless of how the producer ordered its keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuditPayload(BTreeMap<String, SectionData>);

impl AuditPayload {
    /// Create an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a payload from its JSON representation.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Insert or replace one section.
    pub fn insert(&mut self, name: impl Into<String>, data: SectionData) {
        self.0.insert(name.into(), data);
    }

    /// Look up one section by exact name.
    pub fn get(&self, name: &str) -> Option<&SectionData> {
        self.0.get(name)
    }

    /// Iterate sections in deterministic (key-sorted) order.
    pub fn sections(&self) -> impl Iterator<Item = (&str, &SectionData)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of sections present.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the payload has no sections.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Walk a dotted accessor path into a record, e.g. `"Result.percentage"`.
///
/// Returns `None` for a missing segment at any depth; never panics.
pub fn lookup_path<'a>(record: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let first = segments.next().filter(|s| !s.is_empty())?;
    let mut current = record.get(first)?;
    for segment in segments {
        current = current.get(segment)?;
    }
    Some(current)
}

/// Borrowed view over one generic check/outcome record.
#[derive(Debug, Clone, Copy)]
pub struct CheckRecord<'a>(&'a Map<String, Value>);

impl<'a> CheckRecord<'a> {
    /// Wrap a raw record map.
    pub fn new(record: &'a Map<String, Value>) -> Self {
        Self(record)
    }

    /// The check label, if present and a string.
    pub fn check(&self) -> Option<&'a str> {
        self.0.get(CHECK_FIELD).and_then(Value::as_str)
    }

    /// The raw result value, if present.
    pub fn result(&self) -> Option<&'a Value> {
        self.0.get(RESULT_FIELD)
    }

    /// The result as a string, if it is one.
    pub fn result_str(&self) -> Option<&'a str> {
        self.result().and_then(Value::as_str)
    }

    /// A nested field of the record by dotted path.
    pub fn field(&self, path: &str) -> Option<&'a Value> {
        lookup_path(self.0, path)
    }
}
