//! End-to-end exercise of the feed state machine over canned API pages.

use parlor::api::MessagePage;
use parlor::auth::Principal;
use parlor::feed::{Delivery, FeedState};

fn principal(name: &str) -> Principal {
    Principal {
        username: name.to_string(),
        email: None,
    }
}

fn page(json: &str) -> MessagePage {
    serde_json::from_str(json).expect("test page should parse")
}

#[test]
fn test_full_session_flow() {
    let alice = principal("alice");
    let mut feed = FeedState::default();

    // initial fetch: newest page, newest-first, with more history behind it
    assert!(feed.begin_fetch());
    let first = page(
        r#"{
            "items": [
                {"messageId": "4", "text": "latest", "username": "bob",
                 "timestamp_utc_iso8601": "2024-01-01T00:04:00Z"},
                {"messageId": "3", "text": "earlier", "username": "alice",
                 "timestamp_utc_iso8601": "2024-01-01T00:03:00Z"}
            ],
            "nextKey": "cursor-1"
        }"#,
    );
    feed.finish_fetch();
    feed.apply_initial(first, &alice);

    assert_eq!(feed.messages().len(), 2);
    assert!(feed.has_more());
    assert_eq!(feed.cursor(), Some("cursor-1"));
    assert!(feed.messages()[1].is_own);

    // the sentinel fires: backward page merges in front
    assert!(feed.begin_fetch());
    let older = page(
        r#"{
            "items": [
                {"messageId": "2", "text": "old", "username": "bob",
                 "timestamp_utc_iso8601": "2024-01-01T00:02:00Z"},
                {"messageId": "1", "text": "oldest", "username": "bob",
                 "timestamp_utc_iso8601": "2024-01-01T00:01:00Z"}
            ],
            "nextKey": null
        }"#,
    );
    feed.finish_fetch();
    feed.apply_more(older, &alice);

    let ids: Vec<&str> = feed.messages().iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, ["1", "2", "3", "4"]);
    // history exhausted: no cursor, so no sentinel and no further loads
    assert!(!feed.has_more());

    // optimistic send lands at the end and survives a failed persist
    let sent = feed.push_local("hello room", &alice).expect("non-empty text");
    assert_eq!(feed.messages().last().unwrap().id, sent.id);
    assert!(feed.messages().last().unwrap().is_own);

    feed.mark_delivery(&sent.id, Delivery::Failed);
    assert_eq!(feed.messages().len(), 5);

    let (retry_id, request) = feed.begin_retry(&sent.id).expect("failed row is retryable");
    assert_eq!(retry_id, sent.id);
    assert_eq!(request.username, "alice");
    assert_eq!(request.text, "hello room");

    feed.mark_delivery(&sent.id, Delivery::Sent);
    assert_eq!(feed.messages().last().unwrap().delivery, Delivery::Sent);
}

#[test]
fn test_trigger_storm_issues_single_request() {
    let mut feed = FeedState::default();
    feed.apply_initial(
        page(r#"{"items": [], "nextKey": "cursor-1"}"#),
        &principal("alice"),
    );

    // the observer may fire any number of times while a request is in flight
    assert!(feed.begin_fetch());
    for _ in 0..10 {
        assert!(!feed.begin_fetch());
    }

    feed.finish_fetch();
    assert!(feed.begin_fetch());
}

#[test]
fn test_empty_feed_for_new_room() {
    let mut feed = FeedState::default();
    feed.apply_initial(
        page(r#"{"items": [], "nextKey": null}"#),
        &principal("alice"),
    );

    assert!(feed.messages().is_empty());
    assert!(!feed.has_more());
    assert!(feed.is_initialized());
}
