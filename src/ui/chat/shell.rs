//! Chat shell layout component.

use leptos::prelude::*;

use crate::auth::use_identity;
use crate::config::AppConfig;
use crate::feed::FeedStore;

use super::{ChatHeader, Composer, MessageList};

/// Main chat shell component.
///
/// Creates the feed store, provides it as context, and lays out the header,
/// scrollable message area, and composer. Mounted only once the session is
/// authenticated, so a principal is available for the initial fetch.
#[component]
pub fn ChatShell() -> impl IntoView {
    let session = use_identity();
    let config = expect_context::<AppConfig>();
    let store = FeedStore::new(config.api_url);
    provide_context(store);

    if let Some(principal) = untrack(|| session.principal()) {
        store.load_initial(&principal);
    }

    // ownership follows the active principal
    Effect::new(move |_| {
        if let Some(principal) = session.principal() {
            store.reconcile_ownership(&principal);
        }
    });

    view! {
        <div class="max-w-6xl mx-auto h-[calc(100vh-8rem)] flex flex-col">
            <ChatHeader />

            <MessageList />

            <Composer />
        </div>
    }
}
