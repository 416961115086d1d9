//! Scrollable message list with pagination sentinel.

use leptos::html::Div;
use leptos::prelude::*;
use web_sys::{ScrollBehavior, ScrollIntoViewOptions};

use crate::auth::use_identity;
use crate::feed::pagination::use_pagination_trigger;
use crate::feed::{Delivery, FeedStore, Message};
use crate::ui::components::{AlertCircleIcon, Avatar, LoaderIcon};

/// Scrollable list of messages.
///
/// The pagination sentinel sits above the oldest loaded message while a
/// cursor is present; its disappearance is the terminal signal that history
/// is exhausted.
#[component]
pub fn MessageList() -> impl IntoView {
    let session = use_identity();
    let store = expect_context::<FeedStore>();
    let sentinel = use_pagination_trigger(store, session);
    let bottom = NodeRef::<Div>::new();

    // jump to the newest message on initial load and own sends
    Effect::new(move |prev: Option<u64>| {
        let epoch = store.scroll_epoch();
        if epoch > 0 && prev != Some(epoch) {
            if let Some(anchor) = bottom.get_untracked() {
                let options = ScrollIntoViewOptions::new();
                options.set_behavior(ScrollBehavior::Smooth);
                anchor.scroll_into_view_with_scroll_into_view_options(&options);
            }
        }
        epoch
    });

    view! {
        <div class="flex-1 overflow-y-auto p-4 space-y-4">
            <Show when=move || store.has_more()>
                <div node_ref=sentinel class="h-px" aria-hidden="true"></div>
            </Show>

            <Show when=move || store.is_loading() && store.is_initialized()>
                <div class="flex justify-center py-2">
                    <LoaderIcon class="text-muted-foreground" />
                </div>
            </Show>

            <Show when=move || store.error().is_some()>
                <FetchErrorBanner />
            </Show>

            <For
                each=move || store.messages()
                key=|message| (message.id.clone(), message.delivery, message.is_own)
                children=move |message| view! { <MessageBubble message /> }
            />

            <div node_ref=bottom></div>
        </div>
    }
}

/// One message row with avatar, author, timestamp, and bubble.
#[component]
fn MessageBubble(message: Message) -> impl IntoView {
    let store = expect_context::<FeedStore>();

    let row_classes = if message.is_own {
        "flex gap-3 flex-row-reverse"
    } else {
        "flex gap-3 flex-row"
    };
    let stack_classes = if message.is_own {
        "flex flex-col gap-1 max-w-xs sm:max-w-md items-end"
    } else {
        "flex flex-col gap-1 max-w-xs sm:max-w-md items-start"
    };
    let bubble_classes = if message.is_own {
        "px-4 py-2 rounded-2xl bg-primary text-primary-foreground rounded-br-md"
    } else {
        "px-4 py-2 rounded-2xl bg-card text-card-foreground rounded-bl-md border"
    };

    let initial = message.initial();
    let time = message.local_time();
    let author = (!message.is_own).then(|| {
        view! { <span class="font-medium">{message.username.clone()}</span> }
    });
    let failed = (message.delivery == Delivery::Failed).then(|| {
        let id = message.id.clone();
        view! {
            <button
                class="flex items-center gap-1 text-xs text-destructive hover:underline"
                on:click=move |_| store.retry(&id)
            >
                <AlertCircleIcon class="h-3 w-3" />
                "Not delivered - tap to retry"
            </button>
        }
    });

    view! {
        <div class=row_classes>
            <Avatar fallback=initial size="w-8 h-8" class="flex-shrink-0" />

            <div class=stack_classes>
                <div class="flex items-center gap-2 text-xs text-muted-foreground">
                    {author}
                    <span>{time}</span>
                </div>

                <div class=bubble_classes>
                    <p class="text-sm leading-relaxed">{message.text.clone()}</p>
                </div>

                {failed}
            </div>
        </div>
    }
}

/// Inline banner shown when a feed fetch fails.
#[component]
fn FetchErrorBanner() -> impl IntoView {
    let session = use_identity();
    let store = expect_context::<FeedStore>();

    view! {
        <div class="flex items-center justify-center gap-2 rounded-lg border border-destructive/40 \
                    bg-destructive/10 px-3 py-2 text-sm text-destructive">
            <AlertCircleIcon />
            <span>"Couldn't load messages."</span>
            <button
                class="font-medium hover:underline"
                on:click=move |_| {
                    if let Some(principal) = untrack(|| session.principal()) {
                        store.refresh(&principal);
                    }
                }
            >
                "Retry"
            </button>
        </div>
    }
}
