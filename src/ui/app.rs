//! Main application component and routing.

use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use crate::auth::{provide_identity, use_identity, IdentitySession};
use crate::config::AppConfig;
use crate::ui::chat::ChatShell;
use crate::ui::components::{
    AlertCircleIcon, Button, Card, CardContent, CardHeader, LoaderIcon, MessageCircleIcon,
};
use crate::ui::layout::AppLayout;

/// Main application component.
///
/// Provides configuration and the identity session as context, kicks off the
/// one-time session resolution, and renders the single route.
#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::from_env();
    let session = IdentitySession::new(config.auth.clone());
    session.resolve();

    provide_context(config);
    provide_identity(session);

    view! {
        <Router>
            <AppLayout>
                <Routes fallback=NotFoundPage>
                    <Route path=path!("") view=HomePage />
                </Routes>
            </AppLayout>
        </Router>
    }
}

/// The single chat route, gated on the identity session.
#[component]
fn HomePage() -> impl IntoView {
    let session = use_identity();

    view! {
        {move || {
            if session.is_loading() {
                view! { <PendingScreen /> }.into_any()
            } else if let Some(message) = session.error() {
                view! { <AuthErrorScreen message /> }.into_any()
            } else if session.is_authenticated() {
                view! { <ChatShell /> }.into_any()
            } else {
                view! { <SignInScreen /> }.into_any()
            }
        }}
    }
}

/// Full-screen spinner while the session resolves.
#[component]
fn PendingScreen() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center py-24 gap-3">
            <LoaderIcon class="h-6 w-6 text-primary" />
            <p class="text-sm text-muted-foreground">"Loading..."</p>
        </div>
    }
}

/// Blocking screen for terminal identity errors.
#[component]
fn AuthErrorScreen(
    /// Provider error detail.
    message: String,
) -> impl IntoView {
    view! {
        <div class="flex justify-center py-24">
            <Card class="max-w-md w-full">
                <CardHeader>
                    <div class="flex items-center gap-2 text-destructive">
                        <AlertCircleIcon class="h-5 w-5" />
                        <h1 class="text-lg font-semibold">"Sign-in failed"</h1>
                    </div>
                </CardHeader>
                <CardContent>
                    <p class="text-sm text-muted-foreground">{message}</p>
                </CardContent>
            </Card>
        </div>
    }
}

/// Sign-in card shown to unauthenticated visitors.
#[component]
fn SignInScreen() -> impl IntoView {
    let session = use_identity();

    view! {
        <div class="flex justify-center py-24">
            <Card class="max-w-md w-full text-center">
                <CardHeader>
                    <div class="flex flex-col items-center gap-2">
                        <MessageCircleIcon class="h-10 w-10 text-primary" />
                        <h1 class="text-2xl font-bold">"Welcome to Parlor"</h1>
                    </div>
                </CardHeader>
                <CardContent class="space-y-4">
                    <p class="text-sm text-muted-foreground">
                        "One global room. Sign in to join the conversation."
                    </p>
                    <Button on_click=Callback::new(move |()| session.sign_in())>
                        "Sign in"
                    </Button>
                </CardContent>
            </Card>
        </div>
    }
}

/// 404 Not Found page.
#[component]
fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center py-20">
            <h1 class="text-4xl font-bold mb-4">"404"</h1>
            <p class="text-muted-foreground mb-6">"Page not found"</p>
            <a href="/">
                <Button>"Go Home"</Button>
            </a>
        </div>
    }
}
