//! Server-side rendering of the "My Tasks" page.

use std::fmt::Write;

use url::Url;

use crate::config::API_KEY_ENV;
use crate::types::{label_for, Issue};

const FALLBACK_STATE_COLOR: &str = "#95a2b3";

const STYLESHEET: &str = r#"
body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", sans-serif; background: #f7f8fa; color: #1f2328; margin: 0; }
main { max-width: 760px; margin: 48px auto; padding: 0 16px; }
h1 { font-size: 1.6rem; margin-bottom: 24px; }
.notice { background: #fff; border: 1px solid #e2e4e8; border-radius: 8px; padding: 20px; }
.notice code { background: #f0f1f3; padding: 1px 4px; border-radius: 4px; }
ul.issues { list-style: none; padding: 0; margin: 0; }
li.issue { margin-bottom: 8px; }
li.issue a { display: flex; align-items: center; gap: 8px; padding: 12px 16px; background: #fff; border: 1px solid #e2e4e8; border-radius: 8px; text-decoration: none; color: inherit; }
li.issue a:hover { border-color: #5e6ad2; }
.identifier { font-family: ui-monospace, monospace; color: #6b6f76; font-size: 0.85rem; }
.title { flex: 1; }
.badge { font-size: 0.75rem; padding: 2px 8px; border-radius: 999px; white-space: nowrap; }
.team { background: #f0f1f3; color: #3c4149; }
.state { border: 1px solid currentColor; }
.created { color: #6b6f76; font-size: 0.75rem; }
.priority-none { background: #f0f1f3; color: #6b6f76; }
.priority-urgent { background: #fde8e8; color: #c81e1e; }
.priority-high { background: #feecdc; color: #c2410c; }
.priority-medium { background: #fdf6b2; color: #8e4b10; }
.priority-low { background: #e1effe; color: #1a56db; }
.summary { margin-top: 16px; color: #6b6f76; font-size: 0.85rem; }
"#;

/// The three mutually exclusive page bodies.
#[derive(Debug, PartialEq)]
pub enum RenderState<'a> {
    /// No API key configured.
    Setup,
    /// Key configured but nothing to show. Also covers a failed fetch.
    Empty,
    Issues(&'a [Issue]),
}

impl<'a> RenderState<'a> {
    pub fn select(issues: &'a [Issue], has_credential: bool) -> Self {
        if !has_credential {
            RenderState::Setup
        } else if issues.is_empty() {
            RenderState::Empty
        } else {
            RenderState::Issues(issues)
        }
    }
}

pub fn render_page(issues: &[Issue], has_credential: bool) -> String {
    let mut body = String::new();
    match RenderState::select(issues, has_credential) {
        RenderState::Setup => render_setup(&mut body),
        RenderState::Empty => render_empty(&mut body),
        RenderState::Issues(issues) => render_issues(&mut body, issues),
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>My Tasks</title>\n<style>{STYLESHEET}</style>\n</head>\n<body>\n<main>\n\
         <h1>My Tasks</h1>\n{body}</main>\n</body>\n</html>\n"
    )
}

fn render_setup(out: &mut String) {
    let _ = write!(
        out,
        "<section class=\"notice setup\">\n\
         <h2>Connect to Linear</h2>\n\
         <p>No Linear API key is configured.</p>\n\
         <ol>\n\
         <li>Create a personal API key at \
         <a href=\"https://linear.app/settings/api\" target=\"_blank\" rel=\"noopener noreferrer\">linear.app/settings/api</a>.</li>\n\
         <li>Set <code>{API_KEY_ENV}</code> in the server's environment, or add \
         <code>api_key</code> to <code>~/.config/linear-tasks/config.toml</code>.</li>\n\
         <li>Restart the server.</li>\n\
         </ol>\n\
         </section>\n"
    );
}

fn render_empty(out: &mut String) {
    out.push_str(
        "<section class=\"notice empty\">\n\
         <p>No tasks assigned to you.</p>\n\
         <p>If you expected to see tasks here, fetching them from Linear may have failed. \
         Check the server logs.</p>\n\
         </section>\n",
    );
}

fn render_issues(out: &mut String, issues: &[Issue]) {
    out.push_str("<ul class=\"issues\">\n");
    for issue in issues {
        render_row(out, issue);
    }
    out.push_str("</ul>\n");

    let noun = if issues.len() == 1 { "task" } else { "tasks" };
    let _ = writeln!(
        out,
        "<p class=\"summary\">Showing {} {noun}</p>",
        issues.len()
    );
}

fn render_row(out: &mut String, issue: &Issue) {
    out.push_str("<li class=\"issue\">");
    match safe_href(&issue.url) {
        Some(href) => {
            let _ = write!(
                out,
                "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">",
                escape(href)
            );
        }
        None => out.push_str("<a>"),
    }
    let _ = write!(
        out,
        "<span class=\"identifier\">{}</span>",
        escape(&issue.identifier)
    );

    if let Some(team) = &issue.team {
        let _ = write!(
            out,
            "<span class=\"badge team\" title=\"{}\">{}</span>",
            escape(&team.name),
            escape(&team.key)
        );
    }

    let _ = write!(out, "<span class=\"title\">{}</span>", escape(&issue.title));

    if let Some(state) = &issue.state {
        let _ = write!(
            out,
            "<span class=\"badge state\" style=\"color: {}\">{}</span>",
            state_color(&state.color),
            escape(&state.name)
        );
    }

    let (label, style) = label_for(issue.priority);
    let _ = write!(
        out,
        "<span class=\"badge priority {style}\">{label}</span>\
         <time class=\"created\" datetime=\"{}\">{}</time></a></li>\n",
        issue.created_at.to_rfc3339(),
        issue.created_at.format("%b %-d, %Y")
    );
}

/// Links are emitted only for absolute http(s) URLs.
fn safe_href(raw: &str) -> Option<&str> {
    let url = Url::parse(raw).ok()?;
    matches!(url.scheme(), "http" | "https").then_some(raw)
}

/// Only `#rgb` and `#rrggbb` pass through into the style attribute.
fn state_color(color: &str) -> &str {
    let hex = color.strip_prefix('#').unwrap_or("");
    let valid = matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit());
    if valid {
        color
    } else {
        FALLBACK_STATE_COLOR
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{TimeZone, Utc};

    use crate::types::{Team, WorkflowState};

    fn issue(n: u32, priority: i32) -> Issue {
        Issue {
            id: format!("iss-{n}"),
            identifier: format!("ENG-{n}"),
            title: format!("Task {n}"),
            priority,
            url: format!("https://linear.app/acme/issue/ENG-{n}"),
            created_at: Utc.with_ymd_and_hms(2024, 3, 7, 10, 0, 0).unwrap(),
            state: Some(WorkflowState {
                name: "In Progress".to_string(),
                color: "#f2c94c".to_string(),
            }),
            team: Some(Team {
                key: "ENG".to_string(),
                name: "Engineering".to_string(),
            }),
        }
    }

    fn row_count(html: &str) -> usize {
        html.matches("<li class=\"issue\">").count()
    }

    #[test]
    fn test_select_order() {
        let issues = vec![issue(1, 1)];
        assert_eq!(RenderState::select(&issues, false), RenderState::Setup);
        assert_eq!(RenderState::select(&[], false), RenderState::Setup);
        assert_eq!(RenderState::select(&[], true), RenderState::Empty);
        assert_eq!(
            RenderState::select(&issues, true),
            RenderState::Issues(&issues[..])
        );
    }

    #[test]
    fn test_setup_branch_ignores_issue_list() {
        for issues in [vec![], vec![issue(1, 2), issue(2, 3)]] {
            let html = render_page(&issues, false);
            assert!(html.contains("Connect to Linear"));
            assert!(html.contains(API_KEY_ENV));
            assert_eq!(row_count(&html), 0);
            assert!(!html.contains("No tasks assigned"));
        }
    }

    #[test]
    fn test_empty_branch() {
        let html = render_page(&[], true);
        assert!(html.contains("No tasks assigned to you."));
        assert!(html.contains("may have failed"));
        assert!(!html.contains("Connect to Linear"));
        assert_eq!(row_count(&html), 0);
    }

    #[test]
    fn test_issue_rows_and_summary() {
        let issues = vec![issue(1, 1), issue(2, 0), issue(3, 4)];
        let html = render_page(&issues, true);

        assert_eq!(row_count(&html), 3);
        assert!(html.contains("Showing 3 tasks"));
        assert!(html.contains(
            "<a href=\"https://linear.app/acme/issue/ENG-2\" target=\"_blank\" rel=\"noopener noreferrer\">"
        ));
        assert!(html.contains("<span class=\"badge priority priority-urgent\">Urgent</span>"));
        assert!(html.contains("<span class=\"badge priority priority-none\">None</span>"));
        assert!(html.contains("<span class=\"badge priority priority-low\">Low</span>"));
        assert!(html.contains("<span class=\"badge team\" title=\"Engineering\">ENG</span>"));
        assert!(html.contains("style=\"color: #f2c94c\">In Progress</span>"));
        assert!(html.contains("Mar 7, 2024"));
    }

    #[test]
    fn test_single_issue_summary_is_singular() {
        let html = render_page(&[issue(1, 2)], true);
        assert_eq!(row_count(&html), 1);
        assert!(html.contains("Showing 1 task</p>"));
    }

    #[test]
    fn test_optional_badges_are_omitted() {
        let mut bare = issue(1, 3);
        bare.state = None;
        bare.team = None;

        let html = render_page(&[bare], true);
        assert!(!html.contains("badge team"));
        assert!(!html.contains("badge state"));
        assert!(html.contains("priority-medium"));
    }

    #[test]
    fn test_text_is_escaped() {
        let mut nasty = issue(1, 2);
        nasty.title = "<script>alert(\"x\")</script> & co".to_string();
        nasty.url = "https://linear.app/x?a=1&b=\"2\"".to_string();

        let html = render_page(&[nasty], true);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt; &amp; co"));
        assert!(html.contains("href=\"https://linear.app/x?a=1&amp;b=&quot;2&quot;\""));
    }

    #[test]
    fn test_state_color_validation() {
        assert_eq!(state_color("#5e6ad2"), "#5e6ad2");
        assert_eq!(state_color("#FFF"), "#FFF");
        assert_eq!(state_color("red; background: url(x)"), FALLBACK_STATE_COLOR);
        assert_eq!(state_color("#12345"), FALLBACK_STATE_COLOR);
        assert_eq!(state_color(""), FALLBACK_STATE_COLOR);
    }

    #[test]
    fn test_non_http_urls_are_not_linked() {
        for url in ["javascript:alert(1)", "data:text/html,<b>x</b>", "/relative/ENG-1", ""] {
            let mut unsafe_link = issue(1, 2);
            unsafe_link.url = url.to_string();

            let html = render_page(&[unsafe_link], true);
            assert!(!html.contains("href=\"javascript"), "url {url}");
            assert!(html.contains("<li class=\"issue\"><a><span class=\"identifier\">ENG-1</span>"));
            assert_eq!(row_count(&html), 1);
        }
    }

    #[test]
    fn test_safe_href() {
        assert_eq!(
            safe_href("https://linear.app/acme/issue/ENG-1"),
            Some("https://linear.app/acme/issue/ENG-1")
        );
        assert_eq!(safe_href("http://localhost:3000/x"), Some("http://localhost:3000/x"));
        assert_eq!(safe_href("JavaScript:alert(1)"), None);
        assert_eq!(safe_href("mailto:someone@example.com"), None);
    }
}
