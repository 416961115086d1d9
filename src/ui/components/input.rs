//! Controlled text input component.

use leptos::html;
use leptos::prelude::*;
use web_sys::KeyboardEvent;

/// Controlled text input.
///
/// The rendered value follows the `value` signal, so clearing the signal
/// clears the field; every input event reports the raw field contents
/// through `on_input`.
///
/// # Example
///
/// ```rust,ignore
/// let draft = RwSignal::new(String::new());
/// view! {
///     <Input
///         value=draft
///         on_input=Callback::new(move |text| draft.set(text))
///         placeholder="Type your message..."
///     />
/// }
/// ```
#[component]
pub fn Input(
    /// Reactive field value.
    #[prop(into)]
    value: Signal<String>,
    /// Called with the raw field contents on every input event.
    on_input: Callback<String>,
    /// Called for key presses, before any default handling.
    #[prop(optional)]
    on_keydown: Option<Callback<KeyboardEvent>>,
    /// Placeholder text.
    #[prop(default = "")]
    placeholder: &'static str,
    /// Maximum length accepted by the field.
    #[prop(into, optional)]
    maxlength: Option<u32>,
    /// Node ref for imperative focus.
    #[prop(optional)]
    node_ref: NodeRef<html::Input>,
    /// Additional CSS classes.
    #[prop(default = "")]
    class: &'static str,
) -> impl IntoView {
    let base_classes = "flex h-10 w-full rounded-lg border border-border bg-background \
                        px-3 py-2 text-sm text-foreground placeholder:text-muted-foreground \
                        focus-visible:outline-none focus-visible:ring-2 focus-visible:ring-primary \
                        focus-visible:ring-offset-2 disabled:cursor-not-allowed disabled:opacity-50";

    let classes = format!("{} {}", base_classes, class);

    view! {
        <input
            type="text"
            node_ref=node_ref
            class=classes
            placeholder=placeholder
            maxlength=maxlength.map(|n| n.to_string())
            autocomplete="off"
            prop:value=value
            on:input=move |ev| on_input.run(event_target_value(&ev))
            on:keydown=move |ev| {
                if let Some(on_keydown) = on_keydown {
                    on_keydown.run(ev);
                }
            }
        />
    }
}
