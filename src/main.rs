//! Browser entry point.
//!
//! Trunk builds this binary to wasm and mounts the application into the
//! document body.

use parlor::ui::app::App;

fn main() {
    console_error_panic_hook::set_once();

    // Initialize tracing (M-LOG-STRUCTURED); events land on the browser console.
    tracing_wasm::set_as_global_default();

    tracing::info!("mounting application");
    leptos::mount::mount_to_body(App);
}
