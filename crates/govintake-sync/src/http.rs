//! HTTP client for the governance GraphQL endpoint.

use govintake_core::{RawRequests, Viewer};
use tracing::info;

use crate::{SyncError, build_query, decode_response};

/// Path of the GraphQL endpoint, relative to the base URL.
pub const GRAPHQL_PATH: &str = "/api/graph/query";

pub struct SyncClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl SyncClient {
    /// Create a client for the given base URL, like `https://intake.example.gov`.
    ///
    /// `token` is sent as a bearer token when present.
    pub fn new(base_url: String, token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, GRAPHQL_PATH)
    }

    /// Fetch the viewer's governance intakes and TRB requests in one query.
    pub async fn fetch_requests(&self, viewer: Viewer) -> Result<RawRequests, SyncError> {
        let url = self.endpoint();
        info!(url = %url, ?viewer, "fetching request lists");

        let mut req = self.client.post(&url).json(&build_query(viewer));
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SyncError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.text().await?;
        let raw = decode_response(&body, viewer)?;
        info!(
            governance = raw.governance.len(),
            trb = raw.trb.len(),
            "fetched request lists"
        );
        Ok(raw)
    }
}
