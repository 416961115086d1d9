//! Sentinel-driven backward pagination.
//!
//! A sentinel element sits at the oldest-loaded edge of the list while a
//! cursor is present. When it scrolls into view the next-older page is
//! requested; the store's fetch guard absorbs the observer firing any number
//! of times while a request is in flight.

use leptos::html::Div;
use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{IntersectionObserver, IntersectionObserverEntry};

use crate::auth::IdentitySession;
use crate::feed::store::FeedStore;

/// Observer plus the callback keeping it callable from JS.
struct SentinelObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array)>,
}

impl SentinelObserver {
    fn disconnect(self) {
        self.observer.disconnect();
    }
}

/// Observe a sentinel element and load older pages while it is visible.
///
/// Returns the node ref to attach to the sentinel. The element mounts and
/// unmounts with cursor presence, so the observer is rewired whenever the
/// ref changes and torn down with the owning component.
pub fn use_pagination_trigger(store: FeedStore, session: IdentitySession) -> NodeRef<Div> {
    let sentinel = NodeRef::<Div>::new();
    let holder = StoredValue::new_local(None::<SentinelObserver>);

    Effect::new(move |_| {
        holder.update_value(|slot| {
            if let Some(existing) = slot.take() {
                existing.disconnect();
            }
        });

        let Some(element) = sentinel.get() else {
            return;
        };

        let callback = Closure::<dyn FnMut(js_sys::Array)>::new(move |entries: js_sys::Array| {
            let visible = entries.iter().any(|entry| {
                entry
                    .dyn_into::<IntersectionObserverEntry>()
                    .map(|e| e.is_intersecting())
                    .unwrap_or(false)
            });
            if !visible {
                return;
            }
            if let Some(principal) = untrack(|| session.principal()) {
                store.load_more(&principal);
            }
        });

        match IntersectionObserver::new(callback.as_ref().unchecked_ref()) {
            Ok(observer) => {
                observer.observe(&element);
                holder.set_value(Some(SentinelObserver {
                    observer,
                    _callback: callback,
                }));
            }
            Err(err) => tracing::warn!(?err, "failed to attach pagination observer"),
        }
    });

    on_cleanup(move || {
        holder.update_value(|slot| {
            if let Some(existing) = slot.take() {
                existing.disconnect();
            }
        });
    });

    sentinel
}
