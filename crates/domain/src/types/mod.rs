//! Domain types and models

pub mod dataset;
pub mod report;
pub mod session;

pub use dataset::{DatasetRow, DatasetSchema, DestinationType, SchemaField, WriteMode};
pub use report::{
    AcceptedValues, Category, FieldType, Page, PageRequest, ParameterValue, Report, ReportData,
    ReportDataRequest, ReportField, ReportParameter,
};
pub use session::Session;
