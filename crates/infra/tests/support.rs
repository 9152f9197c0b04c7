//! Shared helpers for infra integration tests

use std::io::Write;
use std::path::PathBuf;

use reportsync_domain::{DatasetApiConfig, ReportingCredentials};
use serde_json::{json, Value};
use tempfile::NamedTempFile;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TENANT: &str = "42";

/// Write `contents` to a temp file carrying the given extension.
pub fn config_file(contents: &str, extension: &str) -> PathBuf {
    let mut temp_file = NamedTempFile::new().expect("temp file should be created");
    temp_file.write_all(contents.as_bytes()).expect("temp file should be writable");
    let path = temp_file.path().with_extension(extension);
    std::fs::copy(temp_file.path(), &path).expect("temp file should be copied");
    path
}

/// Credentials whose endpoints all point at the mock server.
pub fn credentials(server: &MockServer) -> ReportingCredentials {
    ReportingCredentials {
        app_id: "app-key".into(),
        tenant_id: TENANT.into(),
        client_id: "client".into(),
        client_secret: "secret".into(),
        auth_url: Some(server.uri()),
        base_url: Some(format!("{}/reporting/v2/tenant/{TENANT}", server.uri())),
    }
}

pub fn dataset_api(server: &MockServer) -> DatasetApiConfig {
    DatasetApiConfig { api_key: "gb-key".into(), base_url: Some(server.uri()) }
}

pub fn reports_path(rest: &str) -> String {
    format!("/reporting/v2/tenant/{TENANT}/report-category/{rest}")
}

pub async fn mount_token(server: &MockServer, expect: u64) {
    Mock::given(method("POST"))
        .and(path("/connect/token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access_token": "tok-1", "expires_in": 900})),
        )
        .expect(expect)
        .mount(server)
        .await;
}

/// Report definition: Name (String), Jobs (Number), Active (Boolean),
/// Completed on (Date), with a `From` date parameter.
pub fn jobs_report(id: i64) -> Value {
    json!({
        "id": id,
        "name": "Jobs",
        "fields": [
            {"name": "Name", "label": "Name", "dataType": "String"},
            {"name": "Jobs", "label": "Jobs", "dataType": "Number"},
            {"name": "Active", "label": "Active", "dataType": "Boolean"},
            {"name": "Completed on", "label": "Completed on", "dataType": "Date"}
        ],
        "parameters": [
            {"name": "From", "label": "From", "dataType": "Date", "isArray": false, "isRequired": true}
        ]
    })
}

pub fn report_rows(rows: Value) -> Value {
    json!({
        "fields": [],
        "data": rows,
        "hasMore": false,
        "page": 1,
        "pageSize": 5000,
        "totalCount": 2
    })
}
