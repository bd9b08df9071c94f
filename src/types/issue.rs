use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Team;

/// One assigned issue, flattened from the list call and its two detail calls.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: String,
    pub identifier: String,
    pub title: String,
    pub priority: i32,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub state: Option<WorkflowState>,
    pub team: Option<Team>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct WorkflowState {
    pub name: String,
    pub color: String,
}
