//! Identity session capability.
//!
//! Wraps the provider's redirect-based authorization-code flow and exposes
//! the authenticated principal to the rest of the application. No token
//! validation or refresh happens here; both stay with the provider.

mod principal;
mod session;

pub use principal::Principal;
pub use session::{provide_identity, use_identity, IdentitySession};
