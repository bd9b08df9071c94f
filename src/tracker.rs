//! The upstream boundary: what the fetcher needs from an issue tracker.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::client::LinearClient;
use crate::config::ApiKey;
use crate::error::Result;
use crate::responses::{IssueNode, Viewer};
use crate::types::{Team, WorkflowState};

/// Read-only calls against an authenticated issue tracker session.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Resolve the authenticated identity.
    async fn viewer(&self) -> Result<Viewer>;

    /// First `first` issues assigned to `viewer_id`, in upstream order.
    async fn assigned_issues(&self, viewer_id: &str, first: usize) -> Result<Vec<IssueNode>>;

    async fn issue_state(&self, issue_id: &str) -> Result<Option<WorkflowState>>;

    async fn issue_team(&self, issue_id: &str) -> Result<Option<Team>>;
}

/// Builds an authenticated tracker session from an API key.
pub trait Connector: Send + Sync {
    fn connect(&self, api_key: &ApiKey) -> Result<Arc<dyn IssueTracker>>;
}

/// Connects to the Linear GraphQL API.
pub struct LinearConnector {
    endpoint: Url,
    request_timeout: Duration,
}

impl LinearConnector {
    pub fn new(endpoint: Url, request_timeout: Duration) -> Self {
        Self {
            endpoint,
            request_timeout,
        }
    }
}

impl Connector for LinearConnector {
    fn connect(&self, api_key: &ApiKey) -> Result<Arc<dyn IssueTracker>> {
        let client = LinearClient::new(
            api_key.expose().to_string(),
            self.endpoint.clone(),
            self.request_timeout,
        )?;
        Ok(Arc::new(client))
    }
}
