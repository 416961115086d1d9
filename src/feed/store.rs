//! Feed state and the signal-backed store.
//!
//! [`FeedState`] is a plain struct holding every transition the feed can
//! make; nothing in it touches the network or the DOM, so the whole state
//! machine is testable on any target. [`FeedStore`] wraps it in a signal,
//! issues the HTTP calls, and is what components talk to.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{MessageApi, MessagePage, PostMessageRequest};
use crate::auth::Principal;
use crate::error::Result;
use crate::feed::message::{Delivery, Message, MAX_TEXT_LEN};

/// Page size requested from the API.
pub const PAGE_LIMIT: u32 = 50;

/// The feed's in-memory state.
///
/// `messages` is one chronological sequence, oldest-loaded first and newest
/// at the end. Backward pages merge at the front; optimistic sends append at
/// the back. A single `loading` flag serializes every feed-mutating fetch,
/// initial and paginated alike.
#[derive(Debug, Clone, Default)]
pub struct FeedState {
    messages: Vec<Message>,
    cursor: Option<String>,
    loading: bool,
    initialized: bool,
    error: Option<String>,
    scroll_epoch: u64,
}

impl FeedState {
    /// Messages in chronological order.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Current pagination cursor.
    #[must_use]
    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    /// Whether older history remains.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.cursor.is_some()
    }

    /// Whether a fetch is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether the initial page has been applied.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Last fetch failure, for the retry banner.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Bumped whenever the view should scroll to the newest message.
    #[must_use]
    pub fn scroll_epoch(&self) -> u64 {
        self.scroll_epoch
    }

    /// Claim the fetch guard. Returns false while another fetch is in
    /// flight, in which case the caller must not issue a request.
    pub fn begin_fetch(&mut self) -> bool {
        if self.loading {
            false
        } else {
            self.loading = true;
            true
        }
    }

    /// Release the fetch guard. Called unconditionally when a request
    /// settles, success or failure.
    pub fn finish_fetch(&mut self) {
        self.loading = false;
    }

    /// Replace the feed with the first page and adopt its cursor.
    pub fn apply_initial(&mut self, page: MessagePage, principal: &Principal) {
        self.messages = page
            .items
            .into_iter()
            .rev()
            .map(|record| Message::from_record(record, principal))
            .collect();
        self.cursor = page.next_key;
        self.initialized = true;
        self.error = None;
        self.scroll_epoch += 1;
    }

    /// Merge an older page at the front and adopt its cursor.
    ///
    /// Pages arrive newest-first, so one reversal keeps the sequence
    /// chronological; no client-side re-sort is performed beyond that.
    pub fn apply_more(&mut self, page: MessagePage, principal: &Principal) {
        let mut merged: Vec<Message> = page
            .items
            .into_iter()
            .rev()
            .map(|record| Message::from_record(record, principal))
            .collect();
        merged.append(&mut self.messages);
        self.messages = merged;
        self.cursor = page.next_key;
        self.error = None;
    }

    /// Append an optimistic message for the given text.
    ///
    /// Returns `None` without mutating anything when the trimmed text is
    /// empty; longer texts are capped at [`MAX_TEXT_LEN`] characters.
    pub fn push_local(&mut self, text: &str, principal: &Principal) -> Option<Message> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        let capped: String = trimmed.chars().take(MAX_TEXT_LEN).collect();

        let message = Message::local(capped, principal);
        self.messages.push(message.clone());
        self.scroll_epoch += 1;
        Some(message)
    }

    /// Flip the delivery state of one optimistic row. Returns false when no
    /// row carries the id.
    pub fn mark_delivery(&mut self, id: &str, delivery: Delivery) -> bool {
        match self.messages.iter_mut().find(|m| m.id == id) {
            Some(message) => {
                message.delivery = delivery;
                true
            }
            None => false,
        }
    }

    /// Prepare a failed row for another persist attempt.
    ///
    /// Returns the request to re-issue, or `None` when the id is unknown or
    /// the row is not in the failed state.
    pub fn begin_retry(&mut self, id: &str) -> Option<(String, PostMessageRequest)> {
        let message = self
            .messages
            .iter_mut()
            .find(|m| m.id == id && m.delivery == Delivery::Failed)?;
        message.delivery = Delivery::Pending;
        Some((
            message.id.clone(),
            PostMessageRequest {
                username: message.username.clone(),
                text: message.text.clone(),
            },
        ))
    }

    /// Recompute `is_own` for every message against the given principal.
    pub fn reconcile_ownership(&mut self, principal: &Principal) {
        for message in &mut self.messages {
            message.is_own = message.username == principal.username;
        }
    }

    /// Record a fetch failure for the retry banner.
    pub fn set_error(&mut self, err: &crate::Error) {
        self.error = Some(err.to_string());
    }
}

/// Signal-backed feed store.
///
/// Owns the message sequence and cursor exclusively; components mutate feed
/// state only through these operations. Async completions go through
/// `try_update`, so a response landing after teardown is discarded instead
/// of touching disposed state.
#[derive(Debug, Clone, Copy)]
pub struct FeedStore {
    state: RwSignal<FeedState>,
    api_url: StoredValue<String>,
}

impl FeedStore {
    /// Create an empty store for the given API base URL.
    #[must_use]
    pub fn new(api_url: String) -> Self {
        Self {
            state: RwSignal::new(FeedState::default()),
            api_url: StoredValue::new(api_url),
        }
    }

    /// Messages in chronological order (reactive).
    pub fn messages(&self) -> Vec<Message> {
        self.state.with(|s| s.messages().to_vec())
    }

    /// Number of loaded messages (reactive).
    pub fn message_count(&self) -> usize {
        self.state.with(|s| s.messages().len())
    }

    /// Whether older history remains (reactive).
    pub fn has_more(&self) -> bool {
        self.state.with(FeedState::has_more)
    }

    /// Whether a fetch is in flight (reactive).
    pub fn is_loading(&self) -> bool {
        self.state.with(FeedState::is_loading)
    }

    /// Whether the initial page has been applied (reactive).
    pub fn is_initialized(&self) -> bool {
        self.state.with(FeedState::is_initialized)
    }

    /// Last fetch failure (reactive).
    pub fn error(&self) -> Option<String> {
        self.state.with(|s| s.error().map(str::to_string))
    }

    /// Scroll request counter (reactive).
    pub fn scroll_epoch(&self) -> u64 {
        self.state.with(FeedState::scroll_epoch)
    }

    /// Fetch the newest page and replace the feed with it.
    pub fn load_initial(&self, principal: &Principal) {
        if !self.state.try_update(FeedState::begin_fetch).unwrap_or(false) {
            return;
        }

        let state = self.state;
        let api_url = self.api_url.get_value();
        let principal = principal.clone();
        spawn_local(async move {
            let result = fetch_page(&api_url, None).await;
            let _ = state.try_update(|s| {
                s.finish_fetch();
                match result {
                    Ok(page) => s.apply_initial(page, &principal),
                    Err(err) => {
                        tracing::warn!(%err, "initial feed fetch failed");
                        s.set_error(&err);
                    }
                }
            });
        });
    }

    /// Fetch the next-older page and merge it in. No-op when history is
    /// exhausted or another fetch is in flight.
    pub fn load_more(&self, principal: &Principal) {
        let claimed = self.state.try_update(|s| {
            if s.has_more() && s.begin_fetch() {
                s.cursor().map(str::to_string)
            } else {
                None
            }
        });
        let Some(cursor) = claimed.flatten() else {
            return;
        };

        let state = self.state;
        let api_url = self.api_url.get_value();
        let principal = principal.clone();
        spawn_local(async move {
            let result = fetch_page(&api_url, Some(cursor)).await;
            let _ = state.try_update(|s| {
                s.finish_fetch();
                match result {
                    Ok(page) => s.apply_more(page, &principal),
                    Err(err) => {
                        tracing::warn!(%err, "backward page fetch failed");
                        s.set_error(&err);
                    }
                }
            });
        });
    }

    /// Re-issue whichever fetch last failed.
    pub fn refresh(&self, principal: &Principal) {
        if self.state.with_untracked(FeedState::is_initialized) {
            self.load_more(principal);
        } else {
            self.load_initial(principal);
        }
    }

    /// Optimistically append a message and persist it.
    ///
    /// The optimistic row stays visible whatever the persist call does; a
    /// failure only flips it to [`Delivery::Failed`].
    pub fn send(&self, text: &str, principal: &Principal) {
        let pushed = self.state.try_update(|s| s.push_local(text, principal));
        let Some(message) = pushed.flatten() else {
            return;
        };

        let request = PostMessageRequest {
            username: message.username,
            text: message.text,
        };
        self.dispatch(message.id, request);
    }

    /// Recompute ownership after the active principal changes.
    pub fn reconcile_ownership(&self, principal: &Principal) {
        let _ = self.state.try_update(|s| s.reconcile_ownership(principal));
    }

    /// Retry the persist call for a failed optimistic row.
    pub fn retry(&self, id: &str) {
        let claimed = self.state.try_update(|s| s.begin_retry(id));
        let Some((id, request)) = claimed.flatten() else {
            return;
        };
        self.dispatch(id, request);
    }

    fn dispatch(&self, id: String, request: PostMessageRequest) {
        let state = self.state;
        let api_url = self.api_url.get_value();
        spawn_local(async move {
            let result = post_message(&api_url, &request).await;
            let delivery = match result {
                Ok(()) => Delivery::Sent,
                Err(err) => {
                    tracing::error!(%err, "failed to persist message");
                    Delivery::Failed
                }
            };
            let _ = state.try_update(|s| s.mark_delivery(&id, delivery));
        });
    }
}

async fn fetch_page(api_url: &str, cursor: Option<String>) -> Result<MessagePage> {
    let api = MessageApi::new(api_url)?;
    api.fetch_page(cursor.as_deref(), PAGE_LIMIT).await
}

async fn post_message(api_url: &str, request: &PostMessageRequest) -> Result<()> {
    let api = MessageApi::new(api_url)?;
    api.post_message(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MessageRecord;

    fn principal(name: &str) -> Principal {
        Principal {
            username: name.to_string(),
            email: None,
        }
    }

    fn record(id: &str, username: &str, timestamp: &str) -> MessageRecord {
        MessageRecord {
            message_id: id.to_string(),
            text: format!("message {id}"),
            username: username.to_string(),
            timestamp: timestamp.parse().unwrap(),
        }
    }

    fn page(items: Vec<MessageRecord>, next_key: Option<&str>) -> MessagePage {
        MessagePage {
            items,
            next_key: next_key.map(str::to_string),
        }
    }

    #[test]
    fn test_initial_page_maps_records() {
        let mut state = FeedState::default();
        state.apply_initial(
            page(vec![record("5", "bob", "2024-01-01T00:00:00Z")], Some("cursor2")),
            &principal("bob"),
        );

        assert_eq!(state.messages().len(), 1);
        let message = &state.messages()[0];
        assert_eq!(message.id, "5");
        assert!(message.is_own);
        assert_eq!(state.cursor(), Some("cursor2"));
        assert!(state.is_initialized());
    }

    #[test]
    fn test_load_more_grows_messages() {
        let mut state = FeedState::default();
        let alice = principal("alice");
        state.apply_initial(
            page(vec![record("3", "bob", "2024-01-01T00:03:00Z")], Some("c1")),
            &alice,
        );

        let before = state.messages().len();
        state.apply_more(
            page(vec![record("2", "bob", "2024-01-01T00:02:00Z")], Some("c2")),
            &alice,
        );
        assert!(state.messages().len() > before);

        // an empty page keeps the sequence intact
        let before = state.messages().len();
        state.apply_more(page(vec![], None), &alice);
        assert_eq!(state.messages().len(), before);
    }

    #[test]
    fn test_pages_merge_chronologically() {
        let mut state = FeedState::default();
        let alice = principal("alice");

        // pages arrive newest-first, cursor walks backward
        state.apply_initial(
            page(
                vec![
                    record("4", "bob", "2024-01-01T00:04:00Z"),
                    record("3", "bob", "2024-01-01T00:03:00Z"),
                ],
                Some("c1"),
            ),
            &alice,
        );
        state.apply_more(
            page(
                vec![
                    record("2", "bob", "2024-01-01T00:02:00Z"),
                    record("1", "bob", "2024-01-01T00:01:00Z"),
                ],
                None,
            ),
            &alice,
        );

        let ids: Vec<&str> = state.messages().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3", "4"]);
        assert!(!state.has_more());
    }

    #[test]
    fn test_fetch_guard_blocks_concurrent_requests() {
        let mut state = FeedState::default();

        assert!(state.begin_fetch());
        // however many trigger events fire, the guard holds
        assert!(!state.begin_fetch());
        assert!(!state.begin_fetch());

        state.finish_fetch();
        assert!(state.begin_fetch());
    }

    #[test]
    fn test_blank_send_is_rejected() {
        let mut state = FeedState::default();
        let alice = principal("alice");

        assert!(state.push_local("", &alice).is_none());
        assert!(state.push_local("   ", &alice).is_none());
        assert!(state.messages().is_empty());
    }

    #[test]
    fn test_send_appends_own_pending_message() {
        let mut state = FeedState::default();
        let alice = principal("alice");
        state.apply_initial(
            page(vec![record("1", "bob", "2024-01-01T00:00:00Z")], None),
            &alice,
        );

        let pushed = state.push_local("  hello  ", &alice).unwrap();
        let last = state.messages().last().unwrap();
        assert_eq!(last.id, pushed.id);
        assert_eq!(last.text, "hello");
        assert!(last.is_own);
        assert_eq!(last.delivery, Delivery::Pending);
    }

    #[test]
    fn test_text_capped_at_limit() {
        let mut state = FeedState::default();
        let pushed = state
            .push_local(&"x".repeat(MAX_TEXT_LEN + 20), &principal("alice"))
            .unwrap();

        assert_eq!(pushed.text.chars().count(), MAX_TEXT_LEN);
    }

    #[test]
    fn test_exhausted_history_hides_sentinel() {
        let mut state = FeedState::default();
        state.apply_initial(
            page(vec![record("1", "bob", "2024-01-01T00:00:00Z")], None),
            &principal("alice"),
        );

        assert!(!state.has_more());
        assert!(state.cursor().is_none());
    }

    #[test]
    fn test_mark_delivery_targets_single_row() {
        let mut state = FeedState::default();
        let alice = principal("alice");
        state.push_local("one", &alice).unwrap();
        state.push_local("two", &alice).unwrap();
        // ids can collide within one millisecond; pin them for the test
        state.messages[0].id = "a".to_string();
        state.messages[1].id = "b".to_string();

        assert!(state.mark_delivery("b", Delivery::Failed));
        let deliveries: Vec<Delivery> =
            state.messages().iter().map(|m| m.delivery).collect();
        assert_eq!(deliveries, [Delivery::Pending, Delivery::Failed]);

        assert!(!state.mark_delivery("unknown", Delivery::Sent));
    }

    #[test]
    fn test_retry_requires_failed_row() {
        let mut state = FeedState::default();
        let alice = principal("alice");
        let message = state.push_local("hello", &alice).unwrap();

        // pending rows are not retryable
        assert!(state.begin_retry(&message.id).is_none());

        state.mark_delivery(&message.id, Delivery::Failed);
        let (id, request) = state.begin_retry(&message.id).unwrap();
        assert_eq!(id, message.id);
        assert_eq!(request.text, "hello");
        assert_eq!(request.username, "alice");
        assert_eq!(state.messages()[0].delivery, Delivery::Pending);
    }

    #[test]
    fn test_reconcile_ownership_tracks_principal() {
        let mut state = FeedState::default();
        state.apply_initial(
            page(
                vec![
                    record("2", "bob", "2024-01-01T00:02:00Z"),
                    record("1", "alice", "2024-01-01T00:01:00Z"),
                ],
                None,
            ),
            &principal("alice"),
        );
        assert_eq!(
            state.messages().iter().map(|m| m.is_own).collect::<Vec<_>>(),
            [true, false]
        );

        state.reconcile_ownership(&principal("bob"));
        assert_eq!(
            state.messages().iter().map(|m| m.is_own).collect::<Vec<_>>(),
            [false, true]
        );
    }

    #[test]
    fn test_fetch_error_is_recorded_and_cleared() {
        let mut state = FeedState::default();
        let alice = principal("alice");

        state.set_error(&crate::Error::Api {
            status: 500,
            message: "boom".into(),
        });
        assert!(state.error().is_some());

        // the next successful fetch clears the banner
        state.apply_initial(page(vec![], None), &alice);
        assert!(state.error().is_none());
    }

    #[test]
    fn test_scroll_requested_on_initial_and_send() {
        let mut state = FeedState::default();
        let alice = principal("alice");
        assert_eq!(state.scroll_epoch(), 0);

        state.apply_initial(page(vec![], None), &alice);
        assert_eq!(state.scroll_epoch(), 1);

        state.push_local("hi", &alice);
        assert_eq!(state.scroll_epoch(), 2);

        // backward pagination must not yank the view to the bottom
        state.apply_more(page(vec![], None), &alice);
        assert_eq!(state.scroll_epoch(), 2);
    }
}
