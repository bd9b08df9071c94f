//! GraphQL response shapes for the assigned-issues queries.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::types::{Team, WorkflowState};

/// Viewer (current user) response.
#[derive(Deserialize)]
pub struct ViewerResponse {
    pub viewer: Viewer,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Viewer {
    pub id: String,
}

#[derive(Deserialize)]
pub struct AssignedIssuesResponse {
    pub user: AssignedIssuesUser,
}

#[derive(Deserialize)]
pub struct AssignedIssuesUser {
    #[serde(rename = "assignedIssues")]
    pub assigned_issues: IssuesConnection,
}

#[derive(Deserialize)]
pub struct IssuesConnection {
    pub nodes: Vec<IssueNode>,
}

/// Scalar fields of an issue as returned by the list call. State and team
/// are resolved by separate per-issue queries.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IssueNode {
    pub id: String,
    pub identifier: String,
    pub title: String,
    pub priority: i32,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct IssueStateResponse {
    pub issue: Option<IssueStateNode>,
}

#[derive(Deserialize)]
pub struct IssueStateNode {
    pub state: Option<WorkflowState>,
}

#[derive(Deserialize)]
pub struct IssueTeamResponse {
    pub issue: Option<IssueTeamNode>,
}

#[derive(Deserialize)]
pub struct IssueTeamNode {
    pub team: Option<Team>,
}
