use serde::Deserialize;
use serde_json::Value;

use super::{first_present, parse_payload, timestamp_or_now};
use crate::error::HubResult;
use crate::external::types::{ExternalEvent, Source};

#[derive(Debug, Default, Deserialize)]
struct GithubPayload {
    commits: Option<Vec<Commit>>,
    milestones: Option<Vec<Milestone>>,
}

#[derive(Debug, Default, Deserialize)]
struct Commit {
    message: Option<String>,
    timestamp: Option<String>,
    url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Milestone {
    title: Option<String>,
    description: Option<String>,
    closed_at: Option<String>,
}

/// Commits become `commit` events, closed milestones become `milestone` events.
///
/// All commit events come first, followed by all milestone events, each in payload order.
pub fn normalize(payload: &Value) -> HubResult<Vec<ExternalEvent>> {
    let payload: GithubPayload = parse_payload(Source::Github, payload)?;

    let commits = payload.commits.unwrap_or_default().into_iter().map(|commit| {
        let tags = if first_present([commit.url]).is_some() {
            vec!["commit".to_string()]
        } else {
            Vec::new()
        };
        ExternalEvent {
            text: commit.message,
            tags,
            ..ExternalEvent::new(Source::Github, timestamp_or_now(commit.timestamp), "commit")
        }
    });

    let milestones = payload.milestones.unwrap_or_default().into_iter().map(|ms| {
        ExternalEvent {
            text: first_present([ms.description, ms.title]),
            tags: vec!["milestone".to_string()],
            ..ExternalEvent::new(Source::Github, timestamp_or_now(ms.closed_at), "milestone")
        }
    });

    Ok(commits.chain(milestones).collect())
}
