//! Identifier derivation for dataset names and field keys

use once_cell::sync::Lazy;
use regex::Regex;

static FIELD_KEY_STRIP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^a-z0-9 ]+|\W+$|^\W+").expect("FIELD_KEY_STRIP should compile - this is a bug")
});

static DATASET_NAME_STRIP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^0-9a-z._\- ]+").expect("DATASET_NAME_STRIP should compile - this is a bug")
});

/// Derive the dataset key for a report field name.
///
/// Used for both schema keys and row keys, so the two always line up.
pub fn field_key(name: &str) -> String {
    FIELD_KEY_STRIP.replace_all(&name.to_lowercase(), "").replace(' ', "_")
}

/// Derive a dataset name from the override or the report's display name.
pub fn dataset_name(name_override: &str, report_name: &str) -> String {
    let source = if name_override.is_empty() { report_name } else { name_override };
    DATASET_NAME_STRIP.replace_all(&source.to_lowercase(), "").replace(' ', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_keys() {
        assert_eq!(field_key("Number of jobs"), "number_of_jobs");
        assert_eq!(field_key("Completed on"), "completed_on");
        assert_eq!(field_key("Completion rate (%)"), "completion_rate");
        assert_eq!(field_key("  Name  "), "name");
        assert_eq!(field_key("CompletedOn"), "completedon");
        assert_eq!(field_key("Revenue $"), "revenue");
    }

    #[test]
    fn dataset_names() {
        assert_eq!(dataset_name("", "My report i$ the best 1235"), "my_report_i_the_best_1235");
        assert_eq!(dataset_name("Jobs.Daily-v2", "Ignored"), "jobs.daily-v2");
        assert_eq!(dataset_name("", "Report A"), "report_a");
    }
}
