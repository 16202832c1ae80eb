//! # Render host
//!
//! Binds [`widgetdeck_core::WidgetStack`] entries to live platform widget
//! views: one visible at a time, the rest detached but retained. The
//! platform itself (registry, id allocation, view inflation) sits behind
//! the [`platform::HostPlatform`] trait so the whole host runs against an
//! in-memory fake in tests and the headless demo.
//!
//! Failure philosophy: nothing here is fatal. Hosted content can embed view
//! classes the host runtime cannot inflate; when that happens the allocated
//! widget id is released, the entry never enters the stack, and the caller
//! gets a [`HostError`] whose `user_message()` is fit for a toast.

pub mod error;
pub mod platform;
pub mod render;

pub use error::*;
pub use platform::*;
pub use render::*;
