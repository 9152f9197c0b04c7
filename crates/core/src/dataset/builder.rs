//! Report-to-dataset mapping

use std::collections::BTreeMap;

use reportsync_domain::{
    DatasetDirectives, DatasetRow, DatasetSchema, DestinationType, FieldType, Report, ReportData,
    ReportField, Result, SchemaField, SyncError,
};
use serde_json::Value;
use tracing::warn;

use super::naming::{dataset_name, field_key};

/// Builds a dataset schema and rows for one entry.
pub struct DatasetBuilder<'a> {
    report: &'a Report,
    directives: &'a DatasetDirectives,
}

impl<'a> DatasetBuilder<'a> {
    pub fn new(report: &'a Report, directives: &'a DatasetDirectives) -> Self {
        Self { report, directives }
    }

    /// Derive the destination schema from the report definition.
    pub fn build_schema(&self) -> DatasetSchema {
        let mut fields: BTreeMap<String, SchemaField> = BTreeMap::new();
        let mut owners: BTreeMap<String, &str> = BTreeMap::new();
        let mut unique_by = Vec::new();

        for field in &self.report.fields {
            let key = field_key(&field.name);
            let optional = !self.is_required(field);

            if let Some(previous) = owners.insert(key.clone(), &field.name) {
                warn!(
                    key = %key,
                    first = %previous,
                    second = %field.name,
                    report_id = self.report.id,
                    "Report fields derive the same dataset key; later field wins"
                );
                unique_by.retain(|existing| existing != &key);
            }

            if !optional {
                unique_by.push(key.clone());
            }

            fields.insert(
                key,
                SchemaField {
                    field_type: self.destination_type(field),
                    name: if field.label.is_empty() { field.name.clone() } else { field.label.clone() },
                    optional,
                },
            );
        }

        DatasetSchema {
            name: dataset_name(&self.directives.name, &self.report.name),
            fields,
            unique_by,
        }
    }

    /// Coerce report rows into dataset rows keyed like `schema`.
    ///
    /// Rows are aligned positionally with the response's field list, falling
    /// back to the report definition when the response omits it.
    pub fn build_rows(&self, schema: &DatasetSchema, data: &ReportData) -> Result<Vec<DatasetRow>> {
        let columns: &[ReportField] =
            if data.fields.is_empty() { &self.report.fields } else { &data.fields };
        let keys: Vec<String> = columns.iter().map(|field| field_key(&field.name)).collect();

        data.data
            .iter()
            .enumerate()
            .map(|(idx, row)| {
                let values = row.as_array().ok_or_else(|| {
                    SyncError::Internal(format!("report row {idx} is not an array"))
                })?;

                if values.len() != keys.len() {
                    return Err(SyncError::Internal(format!(
                        "report row {idx} has {} values but the report has {} fields",
                        values.len(),
                        keys.len()
                    )));
                }

                let mut out = DatasetRow::new();
                for (key, value) in keys.iter().zip(values) {
                    let target = schema.fields.get(key).map(|f| f.field_type);
                    if let Some(coerced) = coerce(value, target) {
                        out.insert(key.clone(), coerced);
                    }
                }
                Ok(out)
            })
            .collect()
    }

    fn is_required(&self, field: &ReportField) -> bool {
        self.directives.required_fields.iter().any(|name| name == &field.name)
    }

    fn destination_type(&self, field: &ReportField) -> DestinationType {
        let source = self
            .directives
            .field_overrides
            .iter()
            .find(|o| o.name == field.name)
            .map_or(&field.data_type, |o| &o.field_type);

        match source {
            FieldType::String | FieldType::Boolean => DestinationType::String,
            FieldType::Number => DestinationType::Number,
            FieldType::Date => DestinationType::Date,
            FieldType::Datetime => DestinationType::Datetime,
            FieldType::Percentage => DestinationType::Percentage,
            FieldType::Other(_) => DestinationType::Unknown,
        }
    }
}

fn coerce(value: &Value, target: Option<DestinationType>) -> Option<Value> {
    match value {
        Value::Bool(b) => Some(Value::String(if *b { "TRUE" } else { "FALSE" }.to_string())),
        Value::Number(n) if target == Some(DestinationType::String) => {
            Some(Value::String(n.to_string()))
        }
        Value::Number(_) | Value::String(_) => Some(value.clone()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
