//! Listing filters: narrow discovered sessions by date, working directory,
//! repository or free-text query, and order them for display.

use chrono::{DateTime, Utc};

use crate::models::SessionInfo;

/// Criteria applied to discovered sessions. All fields are conjunctive;
/// string fields match as case-insensitive substrings.
#[derive(Debug, Clone, Default)]
pub struct SessionFilter {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub cwd: Option<String>,
    pub repo: Option<String>,
    pub query: Option<String>,
}

impl SessionFilter {
    pub fn matches(&self, info: &SessionInfo) -> bool {
        if let Some(year) = self.year
            && info.year != Some(year)
        {
            return false;
        }
        if let Some(month) = self.month
            && info.month != Some(month)
        {
            return false;
        }
        if let Some(cwd) = &self.cwd
            && !match_text(info.cwd.as_deref(), cwd)
        {
            return false;
        }
        if let Some(repo) = &self.repo
            && !(match_text(info.repo_url.as_deref(), repo) || match_text(info.cwd.as_deref(), repo))
        {
            return false;
        }
        if let Some(query) = &self.query {
            let haystack = [
                info.preview.as_deref().unwrap_or_default(),
                info.cwd.as_deref().unwrap_or_default(),
                info.repo_url.as_deref().unwrap_or_default(),
            ]
            .join(" ");
            if !haystack.to_lowercase().contains(&query.to_lowercase()) {
                return false;
            }
        }
        true
    }
}

fn match_text(value: Option<&str>, needle: &str) -> bool {
    match value {
        Some(value) => value.to_lowercase().contains(&needle.to_lowercase()),
        None => false,
    }
}

/// Apply a filter, preserving the input order.
pub fn filter_sessions(sessions: &[SessionInfo], filter: &SessionFilter) -> Vec<SessionInfo> {
    sessions.iter().filter(|s| filter.matches(s)).cloned().collect()
}

/// Sort newest first; sessions without a start time sink to the end.
pub fn sort_sessions(mut sessions: Vec<SessionInfo>) -> Vec<SessionInfo> {
    sessions.sort_by_key(|s| match s.started_at {
        Some(ts) => (0u8, std::cmp::Reverse(ts)),
        None => (1u8, std::cmp::Reverse(DateTime::<Utc>::MIN_UTC)),
    });
    sessions
}
