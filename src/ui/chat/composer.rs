//! Message composer.

use leptos::html;
use leptos::prelude::*;
use web_sys::KeyboardEvent;

use crate::auth::use_identity;
use crate::feed::{FeedStore, MAX_TEXT_LEN};
use crate::ui::components::{Button, ButtonSize, Input, SendIcon};

/// Input area for new messages.
///
/// Dispatches on the send button or plain Enter (Shift+Enter is left alone).
/// The field clears and refocuses as soon as the optimistic append happens,
/// independent of network confirmation.
#[component]
pub fn Composer() -> impl IntoView {
    let session = use_identity();
    let store = expect_context::<FeedStore>();
    let draft = RwSignal::new(String::new());
    let input_ref = NodeRef::<html::Input>::new();

    // focus the field on mount
    Effect::new(move |_| {
        if let Some(input) = input_ref.get() {
            let _ = input.focus();
        }
    });

    let submit = move || {
        let Some(principal) = untrack(|| session.principal()) else {
            return;
        };
        let text = draft.get_untracked();
        if text.trim().is_empty() {
            return;
        }
        store.send(&text, &principal);
        draft.set(String::new());
        if let Some(input) = input_ref.get_untracked() {
            let _ = input.focus();
        }
    };

    view! {
        <div class="border-t bg-card/50 p-4">
            <div class="flex gap-3 items-end">
                <div class="flex-1">
                    <Input
                        value=draft
                        on_input=Callback::new(move |text| draft.set(text))
                        on_keydown=Callback::new(move |ev: KeyboardEvent| {
                            if ev.key() == "Enter" && !ev.shift_key() {
                                ev.prevent_default();
                                submit();
                            }
                        })
                        node_ref=input_ref
                        placeholder="Type your message..."
                        maxlength=MAX_TEXT_LEN as u32
                        class="min-h-[44px] rounded-2xl"
                    />
                </div>

                <Button
                    size=ButtonSize::Icon
                    disabled=Signal::derive(move || draft.with(|text| text.trim().is_empty()))
                    class="w-11 h-11 rounded-full flex-shrink-0"
                    on_click=Callback::new(move |()| submit())
                >
                    <SendIcon />
                </Button>
            </div>

            <p class="text-xs text-muted-foreground mt-2 text-center">
                "Press Enter to send"
            </p>
        </div>
    }
}
