//! reqwest-based resource manager client

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderValue};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};
use yarnstats_util::secs_to_millis;

use crate::{ResourceManager, SourceError, SourceResult, extract_apps_list};

/// Application states requested from the cluster-apps endpoint
pub const FINISHED_STATES: &str = "failed,killed,finished";

/// Heavy field left out of cluster-apps replies
pub const DESELECTED_FIELDS: &str = "resourceRequests";

const API_PREFIX: &str = "/ws/v1/";

/// Client for one resource manager. Each call is a single bounded request;
/// failures are not retried.
#[derive(Debug, Clone)]
pub struct RmClient {
    http: Client,
    base_url: String,
}

impl RmClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> SourceResult<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of a resource below `/ws/v1/`
    pub fn resource_url(&self, resource_path: &str) -> String {
        format!(
            "{}{}{}",
            self.base_url,
            API_PREFIX,
            resource_path.trim_start_matches('/')
        )
    }

    async fn get_json(&self, url: &str, query: &[(&str, String)]) -> SourceResult<Value> {
        debug!(url, ?query, "Querying resource manager");

        let response = self
            .http
            .get(url)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(url, status = status.as_u16(), "Resource manager request failed");
            return Err(SourceError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        debug!(url, body_len = body.len(), "Resource manager replied");
        if body.is_empty() {
            return Err(SourceError::EmptyBody(url.to_string()));
        }

        serde_json::from_str(&body).map_err(|e| SourceError::MalformedJson(e.to_string()))
    }
}

#[async_trait]
impl ResourceManager for RmClient {
    async fn finished_apps(&self, since_secs: i64) -> SourceResult<Vec<Value>> {
        let url = self.resource_url("cluster/apps");
        let query = [
            ("states", FINISHED_STATES.to_string()),
            ("deSelects", DESELECTED_FIELDS.to_string()),
            ("finishedTimeBegin", secs_to_millis(since_secs).to_string()),
        ];

        let reply = self.get_json(&url, &query).await?;
        extract_apps_list(reply)
    }

    async fn resource(&self, resource_path: &str) -> SourceResult<Value> {
        let url = self.resource_url(resource_path);
        self.get_json(&url, &[]).await
    }
}
