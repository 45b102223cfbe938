mod helpers;

use serde_json::json;
use signal_hub::external::{HubService, Source};

async fn accumulates_across_ingests(hub: HubService) {
    let first = hub
        .ingest(
            Source::Github,
            &json!({"commits": [
                {"message": "fix", "timestamp": "2024-01-01T00:00:00Z"},
                {"message": "feat", "timestamp": "2024-01-02T00:00:00Z"}
            ]}),
        )
        .await
        .unwrap();
    let second = hub
        .ingest(
            Source::Calendar,
            &json!({"events": [{"start": "2024-01-03T09:00:00Z", "title": "Retro", "attendees": ["sam"]}]}),
        )
        .await
        .unwrap();

    let status = hub.status().await.unwrap();
    assert_eq!(status.timeline.len(), first.len() + second.len());
    assert_eq!(status.timeline.len(), 3);
    assert_eq!(status.timeline[..2], first[..]);
    assert_eq!(status.timeline[2..], second[..]);
}

#[tokio::test]
async fn memory_hub_accumulates_across_ingests() {
    accumulates_across_ingests(helpers::memory_hub()).await;
}

#[tokio::test]
async fn sqlite_hub_accumulates_across_ingests() {
    accumulates_across_ingests(helpers::sqlite_hub()).await;
}

#[tokio::test]
async fn status_reports_unconnected_sources() {
    let hub = helpers::memory_hub();
    hub.ingest(Source::X, &json!({"posts": [{"created_at": "2024-05-01T00:00:00Z", "text": "hi"}]}))
        .await
        .unwrap();

    let status = hub.status().await.unwrap();
    let sources: Vec<Source> = status.sources.iter().map(|s| s.source).collect();
    assert_eq!(sources, Source::ALL);

    for source in &status.sources {
        if source.source == Source::X {
            assert!(source.connected);
            assert_eq!(source.last_sync.as_deref(), Some("2024-05-01T00:00:00Z"));
        } else {
            assert!(!source.connected);
            assert!(source.last_sync.is_none());
        }
    }
}

#[tokio::test]
async fn end_to_end_github_commit_notifies_once() {
    let hub = helpers::memory_hub();
    let mut rx = hub.subscribe();

    let entries = hub
        .ingest_named(
            "github",
            &json!({"commits": [{"message": "fix", "timestamp": "2024-01-01T00:00:00Z"}]}),
        )
        .await
        .unwrap();

    assert_eq!(entries.len(), 1);
    let json = serde_json::to_value(&entries[0]).unwrap();
    assert_eq!(json["source"], "github");
    assert_eq!(json["type"], "commit");
    assert_eq!(json["text"], "fix");
    assert_eq!(json["summary"], "GITHUB commit - fix");

    let delta = rx.recv().await.unwrap();
    assert_eq!(delta.entries.len(), 1);
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn milestones_are_marked_and_kept_with_ordinary_events() {
    let hub = helpers::memory_hub();
    let entries = hub
        .ingest(
            Source::Github,
            &json!({
                "commits": [{"message": "fix typo", "timestamp": "t1"}],
                "milestones": [{"title": "Release candidate", "closed_at": "t2"}]
            }),
        )
        .await
        .unwrap();

    assert_eq!(entries.len(), 2);
    assert!(entries[0].event.milestone.is_none());
    assert_eq!(entries[1].event.milestone.as_deref(), Some("milestone"));
    assert_eq!(entries[1].summary, "GITHUB milestone - Release candidate");
}

#[tokio::test]
async fn subscribers_see_every_call_in_order() {
    let hub = helpers::memory_hub();
    let mut rx = hub.subscribe();

    for text in ["one", "two"] {
        hub.ingest(Source::X, &json!({"posts": [{"created_at": "t", "text": text}]}))
            .await
            .unwrap();
    }

    assert_eq!(rx.recv().await.unwrap().entries[0].event.text.as_deref(), Some("one"));
    assert_eq!(rx.recv().await.unwrap().entries[0].event.text.as_deref(), Some("two"));
}
