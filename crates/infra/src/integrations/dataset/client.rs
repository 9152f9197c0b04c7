//! Geckoboard dataset client implementing the core publisher port

use async_trait::async_trait;
use reportsync_core::ports::DatasetPublisher;
use reportsync_domain::constants::{DATASET_PROVIDER, DEFAULT_DATASET_BASE_URL, MAX_APPEND_BATCH};
use reportsync_domain::{
    ApiFailure, ConfigError, DatasetApiConfig, DatasetRow, DatasetSchema, Result, SyncError,
};
use reqwest::{Method, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use url::Url;

use crate::http::HttpClient;

#[derive(Serialize)]
struct RowsPayload<'a> {
    data: &'a [DatasetRow],
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Dataset API client authenticated with an API key
pub struct GeckoboardClient {
    http: HttpClient,
    api_key: String,
    base_url: Url,
}

impl GeckoboardClient {
    /// Create a client for the given base URL.
    pub fn new(api_key: impl Into<String>, base_url: &str, http: HttpClient) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|err| {
            ConfigError::single("geckoboard", format!("invalid URL {base_url:?}: {err}"))
        })?;
        Ok(Self { http, api_key: api_key.into(), base_url })
    }

    /// Build a client from config, using the public endpoint unless overridden.
    pub fn from_config(config: &DatasetApiConfig) -> Result<Self> {
        let base_url = config.base_url.as_deref().unwrap_or(DEFAULT_DATASET_BASE_URL);
        Self::new(config.api_key.clone(), base_url, HttpClient::new()?)
    }

    fn endpoint(&self, dataset: &str, data: bool) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|()| {
                SyncError::Internal(format!("cannot extend base URL {}", self.base_url))
            })?;
            segments.pop_if_empty().extend(["datasets", dataset]);
            if data {
                segments.push("data");
            }
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http.request(method, url).basic_auth(&self.api_key, Some(""))
    }

    async fn execute(&self, builder: RequestBuilder) -> Result<()> {
        let response = self.http.send(builder).await?;
        check_status(response).await
    }

    async fn write_rows(&self, method: Method, name: &str, rows: &[DatasetRow]) -> Result<()> {
        let url = self.endpoint(name, true)?;
        self.execute(self.request(method, url).json(&RowsPayload { data: rows })).await
    }
}

/// Map a non-2xx response to an API failure, preferring the error message
/// from the JSON body.
async fn check_status(response: Response) -> Result<()> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }

    let request_path = response.url().path().to_string();
    let raw = response.text().await.unwrap_or_default();
    let body = serde_json::from_str::<ErrorEnvelope>(&raw)
        .map(|envelope| envelope.error.message)
        .unwrap_or(raw);

    Err(SyncError::Api(ApiFailure {
        provider: DATASET_PROVIDER.to_string(),
        status_code: status.as_u16(),
        request_path,
        body,
    }))
}

#[async_trait]
impl DatasetPublisher for GeckoboardClient {
    #[instrument(skip(self, schema), fields(dataset = %schema.name))]
    async fn find_or_create(&self, schema: &DatasetSchema) -> Result<()> {
        let url = self.endpoint(&schema.name, false)?;
        debug!(fields = schema.fields.len(), unique_by = ?schema.unique_by, "Ensuring dataset");
        self.execute(self.request(Method::PUT, url).json(schema)).await
    }

    #[instrument(skip(self, schema, rows), fields(dataset = %schema.name, rows = rows.len()))]
    async fn replace_rows(&self, schema: &DatasetSchema, rows: &[DatasetRow]) -> Result<()> {
        self.write_rows(Method::PUT, &schema.name, rows).await?;
        info!("Replaced dataset rows");
        Ok(())
    }

    #[instrument(skip(self, schema, rows), fields(dataset = %schema.name, rows = rows.len()))]
    async fn append_rows(&self, schema: &DatasetSchema, rows: &[DatasetRow]) -> Result<()> {
        for (batch, chunk) in rows.chunks(MAX_APPEND_BATCH).enumerate() {
            debug!(batch, size = chunk.len(), "Appending batch");
            self.write_rows(Method::POST, &schema.name, chunk).await?;
        }
        info!("Appended dataset rows");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use reportsync_domain::{DestinationType, SchemaField};
    use serde_json::{json, Value};
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn schema() -> DatasetSchema {
        let mut fields = BTreeMap::new();
        fields.insert(
            "name".to_string(),
            SchemaField { field_type: DestinationType::String, name: "Name".into(), optional: false },
        );
        fields.insert(
            "jobs".to_string(),
            SchemaField { field_type: DestinationType::Number, name: "Jobs".into(), optional: true },
        );
        DatasetSchema { name: "jobs report".into(), fields, unique_by: vec!["name".into()] }
    }

    fn rows(count: usize) -> Vec<DatasetRow> {
        (0..count)
            .map(|i| {
                let mut row = DatasetRow::new();
                row.insert("name".into(), json!(format!("tech-{i}")));
                row
            })
            .collect()
    }

    fn client(server: &MockServer) -> GeckoboardClient {
        GeckoboardClient::new("key-123", &server.uri(), HttpClient::new().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn find_or_create_puts_schema_with_basic_auth() {
        let server = MockServer::start().await;
        // "key-123:" base64 encoded
        Mock::given(method("PUT"))
            .and(path("/datasets/jobs%20report"))
            .and(header("authorization", "Basic a2V5LTEyMzo="))
            .and(body_json(json!({
                "fields": {
                    "jobs": {"type": "number", "name": "Jobs", "optional": true},
                    "name": {"type": "string", "name": "Name", "optional": false}
                },
                "unique_by": ["name"]
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "jobs report"})))
            .expect(1)
            .mount(&server)
            .await;

        client(&server).find_or_create(&schema()).await.unwrap();
    }

    #[tokio::test]
    async fn replace_puts_all_rows_once() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/datasets/jobs%20report/data"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        client(&server).replace_rows(&schema(), &rows(1200)).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body["data"].as_array().unwrap().len(), 1200);
    }

    #[tokio::test]
    async fn append_posts_in_batches() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/datasets/jobs%20report/data"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(3)
            .mount(&server)
            .await;

        client(&server).append_rows(&schema(), &rows(1001)).await.unwrap();

        let sizes: Vec<usize> = server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .map(|request| {
                let body: Value = serde_json::from_slice(&request.body).unwrap();
                body["data"].as_array().unwrap().len()
            })
            .collect();
        assert_eq!(sizes, vec![500, 500, 1]);
    }

    #[tokio::test]
    async fn append_of_nothing_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST")).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

        client(&server).append_rows(&schema(), &[]).await.unwrap();
    }

    #[tokio::test]
    async fn error_message_is_taken_from_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": {"message": "Field jobs is not a number"}
            })))
            .mount(&server)
            .await;

        let err = client(&server).find_or_create(&schema()).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Geckoboard error: Field jobs is not a number got response code 400 for request path /datasets/jobs%20report"
        );
    }

    #[tokio::test]
    async fn raw_body_is_used_when_not_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let err = client(&server).append_rows(&schema(), &rows(2)).await.unwrap_err();
        match err {
            SyncError::Api(failure) => {
                assert_eq!(failure.provider, "Geckoboard");
                assert_eq!(failure.status_code, 502);
                assert_eq!(failure.body, "Bad Gateway");
            }
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn failed_batch_stops_remaining_batches() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
            .expect(1)
            .mount(&server)
            .await;

        let err = client(&server).append_rows(&schema(), &rows(700)).await.unwrap_err();
        assert_eq!(err.status_code(), Some(429));
    }

    #[test]
    fn default_base_url_is_public_endpoint() {
        let client = GeckoboardClient::from_config(&DatasetApiConfig {
            api_key: "k".into(),
            base_url: None,
        })
        .unwrap();
        assert_eq!(client.base_url.as_str(), "https://api.geckoboard.com/");
    }
}
