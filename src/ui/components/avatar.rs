//! Avatar component with initials fallback.

use leptos::prelude::*;

/// Avatar rendering the user's initials.
///
/// Chat authors carry no image URLs, so this is fallback-only.
///
/// # Example
///
/// ```rust,ignore
/// view! {
///     <Avatar fallback="B" />
/// }
/// ```
#[component]
pub fn Avatar(
    /// Initials to render.
    #[prop(into)]
    fallback: String,
    /// Size class.
    #[prop(default = "h-10 w-10")]
    size: &'static str,
    /// Additional CSS classes.
    #[prop(default = "")]
    class: &'static str,
) -> impl IntoView {
    let container_classes =
        format!("relative flex shrink-0 overflow-hidden rounded-full {size} {class}");

    view! {
        <span class=container_classes>
            <span class="flex h-full w-full items-center justify-center rounded-full \
                         bg-primary/10 text-primary border text-xs font-medium">
                {fallback}
            </span>
        </span>
    }
}
