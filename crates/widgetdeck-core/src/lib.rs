//! # Stack, Sizing, and Scale
//!
//! Widgetdeck hosts home-screen style widgets from other apps inside its own
//! window. This crate is the platform-independent core of that: an ordered
//! stack of hosted widget entries with a single selection cursor, a sizing
//! engine that quantizes provider constraints to the launcher grid, and a
//! discrete zoom ladder with a fit-to-container mode.
//!
//! There are three main pieces:
//!
//! - [`WidgetStack`] — ordered entries, one cursor, cyclic navigation.
//! - [`SizingState`] — grid-quantized candidate sizes with a step ladder.
//! - [`ScaleController`] — zoom multipliers plus full-size auto scale.
//!
//! ## The stack
//!
//! ```rust
//! use widgetdeck_core::*;
//!
//! let mut stack = WidgetStack::new();
//! stack.add(StackEntry::pending(
//!     WidgetId::UNBOUND,
//!     "Clock",
//!     ProviderIdentity::new("com.example.clock", "ClockWidget"),
//! ));
//! assert_eq!(stack.cursor(), 0);
//! assert!(!stack.navigate_next()); // single entry, nowhere to go
//! ```
//!
//! Every operation is total: bad indices report through `bool`/`Option`
//! instead of panicking, so callers driven by UI events never have to guard.
//!
//! ## Sizing
//!
//! Host platforms allocate widget space in fixed grid cells (56dp on the
//! Android launcher grid). Offering arbitrary pixel sizes would present
//! layouts the hosted content never validated against, so the engine
//! enumerates whole-cell sizes between the provider's minimum and the
//! platform (or policy) maximum. See [`compute_candidates`].
//!
//! All mutation is expected to happen on one sequential UI context; nothing
//! here is `Send`-aware or internally locked.

pub mod provider;
pub mod scale;
pub mod sizing;
pub mod stack;
pub mod units;

pub use provider::*;
pub use scale::*;
pub use sizing::*;
pub use stack::*;
pub use units::*;
