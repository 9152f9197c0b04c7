//! `reports list` and `reports parameters`

use std::path::PathBuf;

use reportsync_core::{catalog, ReportingClient};
use reportsync_domain::{Category, Report, ReportParameter};
use reportsync_infra::config;
use tracing::{info, warn};

use super::render_table;
use crate::context;

/// Print every report across all categories, optionally filtered by name.
pub async fn list(config_path: Option<PathBuf>, filter: Option<&str>) -> anyhow::Result<()> {
    let config = config::load_from_file(config_path)?;
    let client = context::reporting_client(&config)?;

    info!("Fetching categories");
    let categories = catalog::all_categories(client.as_ref()).await?;

    let mut listing = Vec::with_capacity(categories.len());
    for category in categories {
        info!(category = %category.name, "Fetching reports for category");
        let reports = catalog::all_reports(client.as_ref(), &category.id).await?;
        listing.push((category, reports));
    }

    print!(
        "{}",
        render_table(
            &["Report ID", "Category ID", "Category Name", "Report Name"],
            &report_rows(&listing, filter),
        )
    );
    Ok(())
}

/// Print a report's fields and the parameters it accepts.
pub async fn parameters(
    config_path: Option<PathBuf>,
    category_id: &str,
    report_id: &str,
) -> anyhow::Result<()> {
    let config = config::load_from_file(config_path)?;
    let client = context::reporting_client(&config)?;
    let report = client.get_report(category_id, report_id).await?;

    println!();
    println!("Report id: {}", report.id);
    println!("Report name: {}", report.name);

    println!();
    println!("Report fields:");
    print!("{}", render_table(&["Field Name", "Label", "Type"], &field_rows(&report)));

    println!();
    println!("Report parameters:");
    print!(
        "{}",
        render_table(
            &["Parameter name", "Label", "Data type", "Array?", "Required?", "Accepted Values"],
            &parameter_rows(&report),
        )
    );
    Ok(())
}

fn report_rows(listing: &[(Category, Vec<Report>)], filter: Option<&str>) -> Vec<Vec<String>> {
    listing
        .iter()
        .flat_map(|(category, reports)| reports.iter().map(move |report| (category, report)))
        .filter(|(_, report)| filter.map_or(true, |term| report.name.contains(term)))
        .map(|(category, report)| {
            vec![
                report.id.to_string(),
                category.id.clone(),
                category.name.clone(),
                report.name.clone(),
            ]
        })
        .collect()
}

fn field_rows(report: &Report) -> Vec<Vec<String>> {
    report
        .fields
        .iter()
        .map(|field| vec![field.name.clone(), field.label.clone(), field.data_type.to_string()])
        .collect()
}

fn parameter_rows(report: &Report) -> Vec<Vec<String>> {
    report
        .parameters
        .iter()
        .map(|param| {
            vec![
                param.name.clone(),
                param.label.clone(),
                param.data_type.clone(),
                yes_no(param.is_array),
                yes_no(param.is_required),
                accepted_values(param).join("\n"),
            ]
        })
        .collect()
}

fn yes_no(flag: bool) -> String {
    flag.to_string().to_uppercase()
}

/// Format accepted value groups: `[value]` as is, `[value, label]` as
/// `label - value`.
fn accepted_values(param: &ReportParameter) -> Vec<String> {
    let Some(accepted) = &param.accepted_values else {
        return Vec::new();
    };

    accepted
        .values
        .iter()
        .filter_map(|group| match group.as_slice() {
            [] => None,
            [value] => Some(value.clone()),
            [value, label] => Some(format!("{label} - {value}")),
            _ => {
                warn!(parameter = %param.name, items = group.len(), "Unexpected accepted value group");
                Some("Warning: Unexpected data format.".to_string())
            }
        })
        .collect()
}
