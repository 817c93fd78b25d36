//! Section schema registry.
//!
//! Maps each known section name to the shape of its records: ordered columns
//! with accessor paths, optional explanatory text, and (for the merged
//! transaction/item stream) a split rule that partitions one section into
//! independent sub-tables. Unknown names never fail: they fall back to the
//! generic check/result schema when their records expose those fields, and
//! to an opaque value dump otherwise.

use pa_common::payload::{
    CHECK_FIELD, ITEM_SOURCE, RESULT_FIELD, REVENUE_SOURCE, SOURCE_FIELD, TRANSACTION_ID_FIELD,
};
use pa_common::SectionData;

/// Known section names, exactly as emitted by the audit backend.
pub mod section_names {
    pub const PROPERTY_SETTINGS: &str = "Property Settings";
    pub const DATA_STREAMS: &str = "Data Streams";
    pub const CUSTOM_DIMENSIONS: &str = "Custom Dimensions";
    pub const KEY_EVENTS: &str = "Key Events";
    pub const PII_SCAN: &str = "PII Scan";
    pub const TRANSACTION_MAPPING: &str = "Transaction Mapping";
    pub const DUPLICATE_TRANSACTIONS: &str = "Duplicate Transactions";
    pub const TRAFFIC_ATTRIBUTION: &str = "Traffic Attribution";
}

use section_names::*;

/// One display column: header text plus a dotted accessor path into the
/// record (`"Result.percentage"` reaches inside a structured result).
#[derive(Debug, Clone, Copy)]
pub struct Column {
    /// Column header shown to the user.
    pub header: &'static str,
    /// Dotted path into the record; empty for name-list columns.
    pub accessor: &'static str,
    /// Optional explanation of what the column means.
    pub tooltip: Option<&'static str>,
}

impl Column {
    const fn new(header: &'static str, accessor: &'static str) -> Self {
        Self {
            header,
            accessor,
            tooltip: None,
        }
    }

    const fn with_tooltip(header: &'static str, accessor: &'static str, tip: &'static str) -> Self {
        Self {
            header,
            accessor,
            tooltip: Some(tip),
        }
    }
}

/// One partition of a split section.
#[derive(Debug, Clone, Copy)]
pub struct SplitGroup {
    /// Sub-table label.
    pub label: &'static str,
    /// Value of the discriminator field that selects this group.
    pub matches: &'static str,
    /// Columns for this group's records.
    pub columns: &'static [Column],
}

/// Partitions one merged record stream into named groups by a
/// discriminator field before projection.
#[derive(Debug, Clone, Copy)]
pub struct SplitRule {
    /// Discriminator field name.
    pub field: &'static str,
    /// Ordered groups; a record matching no group is not displayed.
    pub groups: &'static [SplitGroup],
}

/// Display schema for one section.
#[derive(Debug, Clone, Copy)]
pub struct SectionSchema {
    /// Section name this schema is registered for; empty for fallbacks.
    pub name: &'static str,
    /// Short explanation rendered under the section heading.
    pub blurb: Option<&'static str>,
    /// Ordered display columns.
    pub columns: &'static [Column],
    /// Split rule for merged streams.
    pub split: Option<&'static SplitRule>,
}

const CHECK_RESULT_COLUMNS: &[Column] = &[
    Column::new("Check", CHECK_FIELD),
    Column::new("Result", RESULT_FIELD),
];

static TRANSACTION_SPLIT: SplitRule = SplitRule {
    field: SOURCE_FIELD,
    groups: &[
        SplitGroup {
            label: REVENUE_SOURCE,
            matches: REVENUE_SOURCE,
            columns: &[
                Column::new("Transaction ID", TRANSACTION_ID_FIELD),
                Column::new("Revenue", "revenue"),
            ],
        },
        SplitGroup {
            label: ITEM_SOURCE,
            matches: ITEM_SOURCE,
            columns: &[
                Column::new("Transaction ID", TRANSACTION_ID_FIELD),
                Column::new("Item ID", "itemId"),
                Column::new("Item Name", "itemName"),
            ],
        },
    ],
};

/// Registered schemas for every section the audit backend emits.
static SCHEMAS: &[SectionSchema] = &[
    SectionSchema {
        name: PROPERTY_SETTINGS,
        blurb: Some("Property-level configuration checks."),
        columns: CHECK_RESULT_COLUMNS,
        split: None,
    },
    SectionSchema {
        name: DATA_STREAMS,
        blurb: Some("Configured data streams and their status."),
        columns: CHECK_RESULT_COLUMNS,
        split: None,
    },
    SectionSchema {
        name: CUSTOM_DIMENSIONS,
        blurb: Some("Registered custom dimensions."),
        columns: &[Column::new("Dimension Name", "")],
        split: None,
    },
    SectionSchema {
        name: KEY_EVENTS,
        blurb: Some("Events marked as key events for conversion reporting."),
        columns: &[Column::new("Event Name", "")],
        split: None,
    },
    SectionSchema {
        name: PII_SCAN,
        blurb: Some("Scan of collected URLs and parameters for personally identifiable information."),
        columns: CHECK_RESULT_COLUMNS,
        split: None,
    },
    SectionSchema {
        name: TRANSACTION_MAPPING,
        blurb: Some("Reconciliation of the revenue table against the item table."),
        columns: &[
            Column::new("Transaction ID", TRANSACTION_ID_FIELD),
            Column::new("Revenue", "revenue"),
            Column::new("Item ID", "itemId"),
            Column::new("Item Name", "itemName"),
            Column::new("Source", SOURCE_FIELD),
        ],
        split: Some(&TRANSACTION_SPLIT),
    },
    SectionSchema {
        name: DUPLICATE_TRANSACTIONS,
        blurb: Some("Transaction IDs collected more than once in the reporting window."),
        columns: &[Column::new("Transaction ID", "")],
        split: None,
    },
    SectionSchema {
        name: TRAFFIC_ATTRIBUTION,
        blurb: Some("Share of traffic that could not be attributed to a source."),
        columns: &[
            Column::new("Check", CHECK_FIELD),
            Column::with_tooltip(
                "Share (%)",
                "Result.percentage",
                "Percentage of sessions in the reporting window",
            ),
            Column::new("Sessions", "Result.sessions"),
        ],
        split: None,
    },
];

/// Generic fallback for unknown sections whose records expose check/result.
static GENERIC_SCHEMA: SectionSchema = SectionSchema {
    name: "",
    blurb: None,
    columns: CHECK_RESULT_COLUMNS,
    split: None,
};

/// Last-resort fallback: render the section as an opaque value dump.
static OPAQUE_SCHEMA: SectionSchema = SectionSchema {
    name: "",
    blurb: None,
    columns: &[Column::new("Value", "")],
    split: None,
};

/// Fallback for unknown sections that are bare identifier lists.
static NAME_LIST_SCHEMA: SectionSchema = SectionSchema {
    name: "",
    blurb: None,
    columns: &[Column::new("Name", "")],
    split: None,
};

/// Resolve the display schema for a section.
///
/// Never errors: unknown names degrade to [`GENERIC_SCHEMA`] when their
/// records carry `Check`/`Result`, otherwise to [`OPAQUE_SCHEMA`].
pub fn lookup(name: &str, data: &SectionData) -> &'static SectionSchema {
    if let Some(schema) = SCHEMAS.iter().find(|s| s.name == name) {
        return schema;
    }
    match data {
        SectionData::Records(records) => {
            let generic = records
                .first()
                .is_some_and(|r| r.contains_key(CHECK_FIELD) && r.contains_key(RESULT_FIELD));
            if generic || records.is_empty() {
                &GENERIC_SCHEMA
            } else {
                &OPAQUE_SCHEMA
            }
        }
        SectionData::Names(_) => &NAME_LIST_SCHEMA,
        SectionData::Message(_) | SectionData::Empty => &GENERIC_SCHEMA,
        SectionData::Other(_) => &OPAQUE_SCHEMA,
    }
}
