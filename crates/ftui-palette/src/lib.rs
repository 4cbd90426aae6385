#![forbid(unsafe_code)]

//! Command palette engine for FrankenTUI.
//!
//! Given a list of items (optionally grouped) and a free-text query, this
//! crate decides which items are visible, which one is highlighted, and how
//! highlight moves under keyboard input. Rendering is left to the caller.
//!
//! - [`matcher`]: five-tier query matching (exact, prefix, substring,
//!   keyword, ordered subsequence)
//! - [`flatten`]: the filtered, group-aware visible list
//! - [`navigation`]: open/closed state and highlight movement that skips
//!   disabled entries and optionally wraps
//! - [`palette`]: a facade tying items, query, keymap and navigation together
//!
//! Everything is synchronous and single-owner: callers serialize access
//! through `&mut self`.

pub mod config;
pub mod error;
pub mod flatten;
pub mod item;
pub mod keymap;
pub mod logging;
pub mod matcher;
pub mod navigation;
pub mod palette;

pub use config::PaletteConfig;
pub use error::ListError;
pub use flatten::{Entry, FlattenedList, Section};
pub use item::{Candidate, Group, Item, ItemList, OnSelect};
pub use keymap::{KeyAction, KeyCode, KeyEvent, Keymap, Modifiers};
pub use matcher::{Filter, MatchTier, TieredMatcher, matches};
pub use navigation::{Command, NavigationController, NavigationState, Outcome};
pub use palette::{CommandPalette, PaletteAction};

// Re-export tracing macros at crate root so call sites can use `crate::debug!`
// with or without the feature.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace, warn};
