//! Destination dataset types

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::impl_domain_enum_conversions;

/// Column type understood by the dataset API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DestinationType {
    String,
    Number,
    Date,
    Datetime,
    Percentage,
    Unknown,
}

impl_domain_enum_conversions!(DestinationType {
    String => "string",
    Number => "number",
    Date => "date",
    Datetime => "datetime",
    Percentage => "percentage",
    Unknown => "unknown",
});

/// How rows are written to a dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Replace all existing rows.
    #[default]
    Replace,
    /// Append rows, deduplicated on `unique_by` by the dataset API.
    Append,
}

impl_domain_enum_conversions!(WriteMode {
    Replace => "replace",
    Append => "append",
});

/// One column in a dataset schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaField {
    #[serde(rename = "type")]
    pub field_type: DestinationType,
    /// Display label (the source field name).
    pub name: String,
    pub optional: bool,
}

/// Dataset schema derived from a report definition.
///
/// `fields` is keyed by the derived field key; serializing the schema yields
/// the body of the find-or-create request minus the name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSchema {
    #[serde(skip)]
    pub name: String,
    pub fields: BTreeMap<String, SchemaField>,
    #[serde(default)]
    pub unique_by: Vec<String>,
}

/// One dataset row keyed by derived field key.
pub type DatasetRow = Map<String, Value>;
