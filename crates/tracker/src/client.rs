//! REST client for the issue tracker.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::FetchError;
use crate::models::{parse_release_date, Task, VersionRef};

/// Page size for the search endpoint.
const PAGE_SIZE: u32 = 50;

/// Search query selecting the current user's open assignments.
const ASSIGNED_JQL: &str = "assignee = currentUser() ORDER BY updated DESC";

/// Source of assigned tasks.
///
/// The watcher and the CLI depend on this seam instead of the concrete
/// client so tests can script fetch results.
#[async_trait]
pub trait TaskSource: Send + Sync {
    /// Fetch the tasks currently assigned to the user, in tracker order.
    async fn fetch_assigned(&self) -> Result<Vec<Task>, FetchError>;
}

/// Basic-auth credentials for the tracker API.
#[derive(Debug, Clone)]
struct Credentials {
    email: String,
    api_token: String,
}

/// REST client for the issue tracker's search API.
#[derive(Clone)]
pub struct TrackerClient {
    client: reqwest::Client,
    base_url: String,
    credentials: Option<Credentials>,
}

impl TrackerClient {
    /// Create a new client.
    ///
    /// Credentials may be absent; in that case every fetch fails with
    /// [`FetchError::MissingCredentials`] so callers treat the missing
    /// configuration like any other fetch failure.
    pub fn new(
        base_url: &str,
        email: Option<&str>,
        api_token: Option<&str>,
    ) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()?;

        let credentials = match (email, api_token) {
            (Some(email), Some(token)) if !email.is_empty() && !token.is_empty() => {
                Some(Credentials {
                    email: email.to_string(),
                    api_token: token.to_string(),
                })
            }
            _ => None,
        };

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    /// Fetch all tasks assigned to the current user, paging through the
    /// search endpoint and preserving response order.
    pub async fn fetch_assigned(&self) -> Result<Vec<Task>, FetchError> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(FetchError::MissingCredentials)?;

        let url = format!("{}/rest/api/2/search", self.base_url);
        let mut tasks = Vec::new();
        let mut start_at: u32 = 0;

        loop {
            let response = self
                .client
                .get(&url)
                .basic_auth(&credentials.email, Some(&credentials.api_token))
                .query(&[
                    ("jql", ASSIGNED_JQL),
                    ("fields", "summary,status,fixVersions"),
                ])
                .query(&[("startAt", start_at), ("maxResults", PAGE_SIZE)])
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Status {
                    code: status.as_u16(),
                });
            }

            let body = response.bytes().await?;
            let page: SearchResponse = serde_json::from_slice(&body)?;

            let fetched = page.issues.len() as u32;
            tasks.extend(page.issues.into_iter().map(WireIssue::into_task));

            start_at += fetched;
            if fetched == 0 || u64::from(start_at) >= page.total {
                break;
            }
        }

        debug!(count = tasks.len(), "Fetched assigned tasks");
        Ok(tasks)
    }
}

#[async_trait]
impl TaskSource for TrackerClient {
    async fn fetch_assigned(&self) -> Result<Vec<Task>, FetchError> {
        Self::fetch_assigned(self).await
    }
}

// Wire shapes. Everything optional beyond id/key; malformed entries are
// defaulted or dropped here, never surfaced as errors.

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    issues: Vec<WireIssue>,
    #[serde(default)]
    total: u64,
}

#[derive(Deserialize)]
struct WireIssue {
    id: String,
    key: String,
    #[serde(default)]
    fields: WireFields,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct WireFields {
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    status: Option<WireStatus>,
    #[serde(default)]
    fix_versions: Vec<WireVersion>,
}

#[derive(Deserialize)]
struct WireStatus {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireVersion {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    released: bool,
    #[serde(default)]
    release_date: Option<String>,
}

impl WireIssue {
    fn into_task(self) -> Task {
        let versions = self
            .fields
            .fix_versions
            .into_iter()
            .filter_map(|v| {
                let Some(name) = v.name.filter(|n| !n.is_empty()) else {
                    warn!("Dropping version entry without a name");
                    return None;
                };
                Some(VersionRef {
                    name,
                    released: v.released,
                    release_date: parse_release_date(v.release_date.as_deref()),
                })
            })
            .collect();

        Task {
            id: self.id,
            key: self.key,
            summary: self.fields.summary.unwrap_or_default(),
            status: self
                .fields
                .status
                .and_then(|s| s.name)
                .unwrap_or_default(),
            versions,
        }
    }
}
