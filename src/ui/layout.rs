//! Application layout: navbar, footer, and the page frame.

use leptos::prelude::*;

use crate::auth::use_identity;
use crate::ui::components::{
    Button, ButtonSize, ButtonVariant, LogOutIcon, MessageCircleIcon, Separator,
    SeparatorOrientation,
};

/// Page frame wrapping every route.
#[component]
pub fn AppLayout(children: Children) -> impl IntoView {
    view! {
        <div class="flex flex-col min-h-screen">
            <Navbar />
            <main class="flex-1 px-4 sm:px-6 lg:px-8 py-4">{children()}</main>
            <Footer />
        </div>
    }
}

/// Sticky top navigation bar.
#[component]
fn Navbar() -> impl IntoView {
    let session = use_identity();

    view! {
        <header class="sticky top-0 z-50 w-full border-b border-border bg-background">
            <div class="mx-auto flex h-16 max-w-7xl items-center justify-between px-4 sm:px-6 lg:px-8">
                <a href="/" class="flex items-center gap-2 text-xl font-bold hover:opacity-80 transition-colors">
                    <MessageCircleIcon class="h-6 w-6 text-primary" />
                    "Parlor"
                </a>

                <Show when=move || session.is_authenticated()>
                    <nav class="flex items-center space-x-4">
                        <span class="text-sm text-muted-foreground">
                            {move || session.principal().map(|p| p.username).unwrap_or_default()}
                        </span>
                        <Separator orientation=SeparatorOrientation::Vertical class="h-6" />
                        <Button
                            variant=ButtonVariant::Ghost
                            size=ButtonSize::Sm
                            on_click=Callback::new(move |()| session.sign_out())
                        >
                            <LogOutIcon class="mr-2" />
                            "Sign out"
                        </Button>
                    </nav>
                </Show>
            </div>
        </header>
    }
}

/// Footer component.
#[component]
fn Footer() -> impl IntoView {
    view! {
        <footer class="border-t bg-card/50">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-6">
                <p class="text-xs text-muted-foreground text-center">
                    "Parlor - one room, everyone welcome"
                </p>
            </div>
        </footer>
    }
}
