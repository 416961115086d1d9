//! UI components and layouts.
//!
//! Leptos CSR components for the application shell.
//!
//! # Structure
//!
//! - [`app`]: Main application component and routing
//! - [`layout`]: Navbar, footer, and page frame
//! - [`chat`]: Chat-specific layout components
//! - [`components`]: Reusable ShadCN-style UI components

pub mod app;
pub mod chat;
pub mod components;
pub mod layout;
