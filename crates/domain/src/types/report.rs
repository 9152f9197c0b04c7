//! Reporting API resources
//!
//! Shapes follow the reporting v2 wire format (camelCase keys). Collections
//! share the [`Page`] envelope.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Page size used for category and report listings.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Upper bound on rows requested per report-data call.
pub const MAX_REPORT_DATA_ROWS: u32 = 5000;

/// Source data type of a report field or parameter.
///
/// Unknown provider types are kept verbatim so they can be reported back to
/// the user instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    String,
    Number,
    Boolean,
    Date,
    Datetime,
    Percentage,
    Other(String),
}

impl FieldType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::String => "String",
            Self::Number => "Number",
            Self::Boolean => "Boolean",
            Self::Date => "Date",
            Self::Datetime => "Datetime",
            Self::Percentage => "Percentage",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for FieldType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "String" => Self::String,
            "Number" => Self::Number,
            "Boolean" => Self::Boolean,
            "Date" => Self::Date,
            "Datetime" => Self::Datetime,
            "Percentage" => Self::Percentage,
            _ => Self::Other(raw),
        }
    }
}

impl From<&str> for FieldType {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

impl From<FieldType> for String {
    fn from(field_type: FieldType) -> Self {
        field_type.as_str().to_string()
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Report category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// Column of a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportField {
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "dataType")]
    pub data_type: FieldType,
}

/// Groups of accepted values for a parameter, each group being either
/// `[value]` or `[value, label]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptedValues {
    #[serde(default)]
    pub values: Vec<Vec<String>>,
}

/// Input parameter declared by a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportParameter {
    pub name: String,
    #[serde(default)]
    pub label: String,
    pub data_type: String,
    #[serde(default)]
    pub is_array: bool,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepted_values: Option<AcceptedValues>,
}

impl ReportParameter {
    pub fn is_date(&self) -> bool {
        self.data_type == "Date"
    }
}

/// Report definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub fields: Vec<ReportField>,
    #[serde(default)]
    pub parameters: Vec<ReportParameter>,
}

impl Report {
    /// Find a declared parameter by exact name.
    pub fn parameter(&self, name: &str) -> Option<&ReportParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

/// Paginated listing envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(rename = "data")]
    pub items: Vec<T>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub page_size: u32,
    #[serde(default)]
    pub total_count: u64,
}

/// One page of report rows.
///
/// Rows are kept as raw JSON: each one is expected to be an array aligned
/// with the report field list, which the dataset mapper checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportData {
    #[serde(default)]
    pub data: Vec<Value>,
    #[serde(default)]
    pub fields: Vec<ReportField>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub page_size: u32,
    #[serde(default)]
    pub total_count: u64,
}

/// Pagination query (`page`, `pageSize`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl PageRequest {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self { page, page_size }
    }

    /// The single bounded page fetched per entry by the sync pipeline.
    pub fn report_data() -> Self {
        Self { page: 1, page_size: MAX_REPORT_DATA_ROWS }
    }

    pub fn next(self) -> Self {
        Self { page: self.page + 1, ..self }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: 1, page_size: DEFAULT_PAGE_SIZE }
    }
}

/// Parameter value sent with a report-data request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterValue {
    pub name: String,
    pub value: Value,
}

/// Report-data request; only `parameters` goes on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportDataRequest {
    #[serde(skip)]
    pub category_id: String,
    #[serde(skip)]
    pub report_id: String,
    pub parameters: Vec<ParameterValue>,
}
