//! ShadCN-style reusable UI components.
//!
//! A small set of composable components in the shadcn/ui idiom, rendered
//! client-side by Leptos.
//!
//! # Components
//!
//! - [`Button`]: Clickable button with variants
//! - [`Input`]: Controlled text input
//! - [`Avatar`]: User avatar with initials fallback
//! - [`Badge`]: Status badge/tag
//! - [`Card`], [`CardHeader`], [`CardContent`]: Card container
//! - [`Separator`]: Visual separator line
//! - [`icons`]: SVG icon components

mod avatar;
mod badge;
mod button;
mod card;
mod icons;
mod input;
mod separator;

pub use avatar::Avatar;
pub use badge::{Badge, BadgeVariant};
pub use button::{Button, ButtonSize, ButtonVariant};
pub use card::{Card, CardContent, CardHeader};
pub use icons::*;
pub use input::Input;
pub use separator::{Separator, SeparatorOrientation};
