use tabled::Tabled;

use crate::error::Result;
use crate::fetcher::IssueFetcher;
use crate::output::{self, format_date_only, status_colored, truncate};
use crate::types::{Issue, Priority};

#[derive(Tabled)]
struct IssueRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Team")]
    team: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Created")]
    created: String,
}

impl From<&Issue> for IssueRow {
    fn from(issue: &Issue) -> Self {
        Self {
            id: issue.identifier.clone(),
            team: issue
                .team
                .as_ref()
                .map(|t| t.key.clone())
                .unwrap_or_default(),
            title: truncate(&issue.title, 50),
            status: issue
                .state
                .as_ref()
                .map(|s| status_colored(&s.name, Some(s.color.as_str())))
                .unwrap_or_default(),
            priority: Priority::from_i32(issue.priority).colored(),
            created: format_date_only(&issue.created_at),
        }
    }
}

/// Fetch once and print to the terminal. Unlike the web page, errors are
/// reported rather than shown as an empty list.
pub async fn list(fetcher: &IssueFetcher, json: bool) -> Result<()> {
    let issues = fetcher.try_fetch().await?;

    if issues.is_empty() && !json {
        println!("No tasks assigned to you.");
        return Ok(());
    }

    output::print_table(&issues, json, |issue| IssueRow::from(issue))?;
    if !json {
        println!("Showing {} of at most {}", issues.len(), crate::fetcher::PAGE_SIZE);
    }

    Ok(())
}
