//! Fetches the issues assigned to the API key's owner and flattens them.

use std::sync::Arc;
use std::time::Duration;

use futures::future::try_join_all;
use tracing::{debug, error};

use crate::config::ApiKey;
use crate::error::{LinearError, Result};
use crate::responses::IssueNode;
use crate::tracker::{Connector, IssueTracker};
use crate::types::Issue;

/// Upper bound on issues fetched per page view. No pagination beyond it.
pub const PAGE_SIZE: usize = 50;

pub struct IssueFetcher {
    credential: Option<ApiKey>,
    connector: Arc<dyn Connector>,
    fetch_timeout: Duration,
}

impl IssueFetcher {
    pub fn new(
        credential: Option<ApiKey>,
        connector: Arc<dyn Connector>,
        fetch_timeout: Duration,
    ) -> Self {
        Self {
            credential,
            connector,
            fetch_timeout,
        }
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    /// Fetch the viewer's assigned issues, degrading to an empty list.
    ///
    /// Without a credential this returns immediately and never connects.
    /// Any failure along the way discards the whole batch; the error is
    /// logged here and nowhere else.
    pub async fn fetch_assigned_issues(&self) -> Vec<Issue> {
        if !self.has_credential() {
            return Vec::new();
        }

        match self.try_fetch().await {
            Ok(issues) => {
                debug!(count = issues.len(), "Fetched assigned issues");
                issues
            }
            Err(e) => {
                error!(error = %e, "Failed to fetch assigned issues, showing empty list");
                Vec::new()
            }
        }
    }

    /// Same as [`fetch_assigned_issues`](Self::fetch_assigned_issues) but
    /// surfaces the error instead of swallowing it.
    pub async fn try_fetch(&self) -> Result<Vec<Issue>> {
        let api_key = self.credential.as_ref().ok_or(LinearError::MissingApiKey)?;

        tokio::time::timeout(self.fetch_timeout, self.fetch_all(api_key))
            .await
            .map_err(|_| LinearError::Timeout(self.fetch_timeout))?
    }

    async fn fetch_all(&self, api_key: &ApiKey) -> Result<Vec<Issue>> {
        let tracker = self.connector.connect(api_key)?;
        let viewer = tracker.viewer().await?;
        let nodes = tracker.assigned_issues(&viewer.id, PAGE_SIZE).await?;

        // All detail lookups are in flight at once; the first error wins.
        let tracker = tracker.as_ref();
        try_join_all(nodes.into_iter().map(|node| resolve_issue(tracker, node))).await
    }
}

async fn resolve_issue(tracker: &dyn IssueTracker, node: IssueNode) -> Result<Issue> {
    let (state, team) =
        futures::try_join!(tracker.issue_state(&node.id), tracker.issue_team(&node.id))?;

    Ok(Issue {
        id: node.id,
        identifier: node.identifier,
        title: node.title,
        priority: node.priority,
        url: node.url,
        created_at: node.created_at,
        state,
        team,
    })
}
