use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::json;
use url::Url;

use crate::error::{LinearError, Result};
use crate::responses::{
    AssignedIssuesResponse, IssueNode, IssueStateResponse, IssueTeamResponse, Viewer,
    ViewerResponse,
};
use crate::tracker::IssueTracker;
use crate::types::{Team, WorkflowState};

const GET_VIEWER_QUERY: &str = r#"
query Viewer {
    viewer {
        id
    }
}
"#;

const ASSIGNED_ISSUES_QUERY: &str = r#"
query AssignedIssues($id: String!, $first: Int) {
    user(id: $id) {
        assignedIssues(first: $first) {
            nodes {
                id
                identifier
                title
                priority
                url
                createdAt
            }
        }
    }
}
"#;

const ISSUE_STATE_QUERY: &str = r#"
query IssueState($id: String!) {
    issue(id: $id) {
        state {
            name
            color
        }
    }
}
"#;

const ISSUE_TEAM_QUERY: &str = r#"
query IssueTeam($id: String!) {
    issue(id: $id) {
        team {
            key
            name
        }
    }
}
"#;

pub struct LinearClient {
    http: Client,
    api_key: String,
    endpoint: Url,
}

#[derive(Serialize)]
struct GraphQLRequest<'a> {
    query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    variables: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct GraphQLResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQLError>>,
}

#[derive(Deserialize, Debug)]
struct GraphQLError {
    message: String,
}

impl LinearClient {
    pub fn new(api_key: String, endpoint: Url, timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            api_key,
            endpoint,
        })
    }

    pub async fn query<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Option<serde_json::Value>,
    ) -> Result<T> {
        let request = GraphQLRequest { query, variables };

        let response = self
            .http
            .post(self.endpoint.clone())
            .header("Authorization", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(LinearError::ApiError {
                status: response.status().as_u16(),
                message: response
                    .text()
                    .await
                    .unwrap_or_else(|_| "<failed to read response body>".to_string()),
            });
        }

        let gql_response: GraphQLResponse<T> = response.json().await?;

        if let Some(errors) = gql_response.errors {
            return Err(LinearError::GraphQL {
                messages: errors.into_iter().map(|e| e.message).collect(),
            });
        }

        gql_response.data.ok_or(LinearError::EmptyResponse)
    }
}

#[async_trait]
impl IssueTracker for LinearClient {
    async fn viewer(&self) -> Result<Viewer> {
        let response: ViewerResponse = self.query(GET_VIEWER_QUERY, None).await?;
        Ok(response.viewer)
    }

    async fn assigned_issues(&self, viewer_id: &str, first: usize) -> Result<Vec<IssueNode>> {
        let variables = json!({ "id": viewer_id, "first": first });
        let response: AssignedIssuesResponse =
            self.query(ASSIGNED_ISSUES_QUERY, Some(variables)).await?;
        Ok(response.user.assigned_issues.nodes)
    }

    async fn issue_state(&self, issue_id: &str) -> Result<Option<WorkflowState>> {
        let response: IssueStateResponse = self
            .query(ISSUE_STATE_QUERY, Some(json!({ "id": issue_id })))
            .await?;
        let issue = response
            .issue
            .ok_or_else(|| LinearError::IssueNotFound(issue_id.to_string()))?;
        Ok(issue.state)
    }

    async fn issue_team(&self, issue_id: &str) -> Result<Option<Team>> {
        let response: IssueTeamResponse = self
            .query(ISSUE_TEAM_QUERY, Some(json!({ "id": issue_id })))
            .await?;
        let issue = response
            .issue
            .ok_or_else(|| LinearError::IssueNotFound(issue_id.to_string()))?;
        Ok(issue.team)
    }
}
