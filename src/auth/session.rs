//! Redirect-based identity session.
//!
//! Sign-in and sign-out are whole-window redirects to the provider's hosted
//! endpoints. The return leg (`?code=...` on the configured redirect URI) is
//! consumed exactly once at startup and the URL is normalized afterwards, so
//! a reload never replays the exchange.

use leptos::prelude::*;
use leptos::task::spawn_local;
use url::Url;
use uuid::Uuid;
use wasm_bindgen::JsValue;
use web_sys::{Storage, UrlSearchParams, Window};

use crate::auth::Principal;
use crate::config::AuthConfig;
use crate::error::{Error, Result};

/// Session storage key holding the signed-in session.
const SESSION_KEY: &str = "parlor.session";

/// Session storage key holding the in-flight sign-in state nonce.
const STATE_KEY: &str = "parlor.oidc_state";

/// The identity session capability.
///
/// Provided as context at the application root; components read the signals
/// and invoke the redirect operations, nothing else touches the provider.
#[derive(Debug, Clone, Copy)]
pub struct IdentitySession {
    is_loading: RwSignal<bool>,
    error: RwSignal<Option<String>>,
    principal: RwSignal<Option<Principal>>,
    config: StoredValue<AuthConfig>,
}

/// Locally stored trace of a signed-in session.
#[derive(serde::Serialize, serde::Deserialize)]
struct StoredSession {
    principal: Principal,
    id_token: String,
}

/// Token endpoint response; only the ID token is consumed.
#[derive(serde::Deserialize)]
struct TokenResponse {
    id_token: String,
}

impl IdentitySession {
    /// Create an unresolved session.
    #[must_use]
    pub fn new(config: AuthConfig) -> Self {
        Self {
            is_loading: RwSignal::new(true),
            error: RwSignal::new(None),
            principal: RwSignal::new(None),
            config: StoredValue::new(config),
        }
    }

    /// Whether the startup resolution is still in flight.
    pub fn is_loading(&self) -> bool {
        self.is_loading.get()
    }

    /// Terminal identity error, if the flow failed.
    pub fn error(&self) -> Option<String> {
        self.error.get()
    }

    /// The signed-in principal, once resolved.
    pub fn principal(&self) -> Option<Principal> {
        self.principal.get()
    }

    /// Whether a principal is present.
    pub fn is_authenticated(&self) -> bool {
        self.principal.with(Option::is_some)
    }

    /// Resolve the session once at startup.
    ///
    /// Restores a stored session when present; otherwise consumes a pending
    /// authorization code from the URL. Any failure becomes a terminal
    /// [`error`](Self::error) state.
    pub fn resolve(&self) {
        let this = *self;
        spawn_local(async move {
            match this.resolve_inner().await {
                Ok(principal) => this.principal.set(principal),
                Err(err) => {
                    tracing::error!(%err, "identity resolution failed");
                    this.error.set(Some(err.to_string()));
                }
            }
            this.is_loading.set(false);
        });
    }

    async fn resolve_inner(&self) -> Result<Option<Principal>> {
        if let Some(stored) = read_session() {
            return Ok(Some(stored.principal));
        }

        let Some(window) = web_sys::window() else {
            return Ok(None);
        };
        let search = window.location().search().unwrap_or_default();
        let params = UrlSearchParams::new_with_str(&search)
            .map_err(|err| js_err("parse callback parameters", &err))?;

        if let Some(provider_error) = params.get("error") {
            let detail = params.get("error_description").unwrap_or(provider_error);
            normalize_url(&window);
            return Err(Error::Auth(detail));
        }

        let Some(code) = params.get("code") else {
            return Ok(None);
        };
        let returned_state = params.get("state");
        let expected_state = take_state();
        // The code is single-use; strip it before the exchange can fail.
        normalize_url(&window);

        if expected_state.is_some() && expected_state != returned_state {
            return Err(Error::Auth("sign-in state mismatch".into()));
        }

        let config = self.config.get_value();
        let redirect_uri = resolve_redirect_uri(config.redirect_uri.as_deref(), &window)?;
        let token = exchange_code(&config, &code, &redirect_uri).await?;
        let principal = Principal::from_id_token(&token.id_token)?;

        write_session(&StoredSession {
            principal: principal.clone(),
            id_token: token.id_token,
        });
        tracing::info!(username = %principal.username, "signed in");
        Ok(Some(principal))
    }

    /// Redirect to the provider's sign-in page.
    pub fn sign_in(&self) {
        let config = self.config.get_value();
        let result = (|| -> Result<()> {
            let window = web_sys::window().ok_or_else(|| Error::Auth("no window".into()))?;
            let state = Uuid::new_v4().to_string();
            store_state(&state);

            let redirect_uri = resolve_redirect_uri(config.redirect_uri.as_deref(), &window)?;
            let mut url = Url::parse(&config.authorize_endpoint())?;
            url.query_pairs_mut()
                .append_pair("client_id", &config.client_id)
                .append_pair("response_type", "code")
                .append_pair("scope", &config.scopes)
                .append_pair("redirect_uri", &redirect_uri)
                .append_pair("state", &state);

            window
                .location()
                .set_href(url.as_str())
                .map_err(|err| js_err("redirect to sign-in", &err))
        })();

        if let Err(err) = result {
            tracing::error!(%err, "sign-in redirect failed");
            self.error.set(Some(err.to_string()));
        }
    }

    /// Clear the local session trace and redirect to the provider's logout
    /// endpoint.
    pub fn sign_out(&self) {
        clear_session();
        self.principal.set(None);

        let config = self.config.get_value();
        let result = (|| -> Result<()> {
            let window = web_sys::window().ok_or_else(|| Error::Auth("no window".into()))?;
            let logout_uri =
                resolve_redirect_uri(config.post_logout_redirect_uri.as_deref(), &window)?;
            let mut url = Url::parse(&config.logout_endpoint())?;
            url.query_pairs_mut()
                .append_pair("client_id", &config.client_id)
                .append_pair("logout_uri", &logout_uri);

            window
                .location()
                .set_href(url.as_str())
                .map_err(|err| js_err("redirect to sign-out", &err))
        })();

        if let Err(err) = result {
            tracing::error!(%err, "sign-out redirect failed");
        }
    }
}

/// Provide the identity session as context at the application root.
pub fn provide_identity(session: IdentitySession) {
    provide_context(session);
}

/// Access the identity session provided by the application root.
#[must_use]
pub fn use_identity() -> IdentitySession {
    expect_context::<IdentitySession>()
}

async fn exchange_code(config: &AuthConfig, code: &str, redirect_uri: &str) -> Result<TokenResponse> {
    let body = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("grant_type", "authorization_code")
        .append_pair("client_id", &config.client_id)
        .append_pair("code", code)
        .append_pair("redirect_uri", redirect_uri)
        .finish();

    let response = reqwest::Client::new()
        .post(config.token_endpoint())
        .header("content-type", "application/x-www-form-urlencoded")
        .body(body)
        .send()
        .await?;

    let status = response.status();
    if status.is_success() {
        Ok(response.json().await?)
    } else {
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".into());
        Err(Error::Api {
            status: status.as_u16(),
            message,
        })
    }
}

fn resolve_redirect_uri(configured: Option<&str>, window: &Window) -> Result<String> {
    if let Some(uri) = configured {
        return Ok(uri.to_string());
    }
    window
        .location()
        .origin()
        .map_err(|err| js_err("read window origin", &err))
}

/// Strip the query string left behind by the provider redirect.
fn normalize_url(window: &Window) {
    let path = window.location().pathname().unwrap_or_else(|_| "/".into());
    if let Ok(history) = window.history() {
        let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(&path));
    }
}

fn session_storage() -> Option<Storage> {
    web_sys::window()?.session_storage().ok().flatten()
}

fn read_session() -> Option<StoredSession> {
    let raw = session_storage()?.get_item(SESSION_KEY).ok().flatten()?;
    serde_json::from_str(&raw).ok()
}

fn write_session(session: &StoredSession) {
    let Some(storage) = session_storage() else {
        return;
    };
    if let Ok(raw) = serde_json::to_string(session) {
        let _ = storage.set_item(SESSION_KEY, &raw);
    }
}

fn clear_session() {
    if let Some(storage) = session_storage() {
        let _ = storage.remove_item(SESSION_KEY);
    }
}

fn store_state(state: &str) {
    if let Some(storage) = session_storage() {
        let _ = storage.set_item(STATE_KEY, state);
    }
}

fn take_state() -> Option<String> {
    let storage = session_storage()?;
    let state = storage.get_item(STATE_KEY).ok().flatten();
    let _ = storage.remove_item(STATE_KEY);
    state
}

fn js_err(context: &str, err: &JsValue) -> Error {
    Error::Auth(format!("failed to {context}: {err:?}"))
}
