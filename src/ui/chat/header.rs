//! Chat header component.

use leptos::prelude::*;

use crate::auth::use_identity;
use crate::feed::FeedStore;
use crate::ui::components::{Badge, BadgeVariant, UsersIcon};

/// Chat header with room title, welcome line, and live indicator.
#[component]
pub fn ChatHeader() -> impl IntoView {
    let session = use_identity();
    let store = expect_context::<FeedStore>();

    let username = move || {
        session
            .principal()
            .map(|p| p.username)
            .unwrap_or_default()
    };

    view! {
        <div class="border-b bg-card/50 p-4">
            <div class="flex items-center justify-between">
                <div class="flex items-center gap-3">
                    <UsersIcon class="h-5 w-5 text-primary" />
                    <div>
                        <h2 class="text-lg font-semibold">"Global Discussion"</h2>
                        <p class="text-sm text-muted-foreground">
                            "Welcome, " {username} "! Join the conversation with "
                            {move || store.message_count()} " messages"
                        </p>
                    </div>
                </div>

                <Badge variant=BadgeVariant::Outline>
                    <span class="mr-1.5 h-2 w-2 rounded-full bg-green-500 animate-pulse"></span>
                    "Live"
                </Badge>
            </div>
        </div>
    }
}
