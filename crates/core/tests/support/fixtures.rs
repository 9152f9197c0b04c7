//! Report and entry fixtures

use reportsync_domain::{
    DatasetDirectives, Entry, ParameterBinding, Report, ReportData, ReportField, ReportParameter,
    ReportSelector,
};
use serde_json::Value;

pub fn field(name: &str, data_type: &str) -> ReportField {
    ReportField { name: name.into(), label: name.into(), data_type: data_type.into() }
}

pub fn date_param(name: &str) -> ReportParameter {
    ReportParameter {
        name: name.into(),
        label: name.into(),
        data_type: "Date".into(),
        is_array: false,
        is_required: true,
        accepted_values: None,
    }
}

/// "Jobs" report: Name, Jobs, Active, Completed on; declares a `From` date.
pub fn jobs_report(id: i64) -> Report {
    Report {
        id,
        name: "Jobs".into(),
        fields: vec![
            field("Name", "String"),
            field("Jobs", "Number"),
            field("Active", "Boolean"),
            field("Completed on", "Date"),
        ],
        parameters: vec![date_param("From")],
    }
}

pub fn report_data(rows: Vec<Value>) -> ReportData {
    ReportData {
        total_count: rows.len() as u64,
        data: rows,
        fields: vec![],
        has_more: false,
        page: 1,
        page_size: 5000,
    }
}

pub fn entry(report_id: &str, parameters: Vec<ParameterBinding>) -> Entry {
    Entry {
        report: ReportSelector {
            id: report_id.into(),
            category_id: "operations".into(),
            parameters,
        },
        dataset: DatasetDirectives {
            required_fields: vec!["Name".into()],
            ..Default::default()
        },
    }
}

pub fn bind(name: &str, value: Value) -> ParameterBinding {
    ParameterBinding { name: name.into(), value }
}
