#![forbid(unsafe_code)]

//! Highlight and open/closed state for a palette.
//!
//! The controller never owns the item list. Every command takes the current
//! [`FlattenedList`] so the host can rebuild it on each query change and
//! hand it back in.
//!
//! # State machine
//!
//! ```text
//!            Open(list)                 MoveNext / MovePrevious / MoveFirst
//!   Closed ─────────────▶ Open ◀────┐   MoveLast / Highlight / Refilter
//!     ▲                    │  └─────┘
//!     │   Close, Select    │
//!     └────────────────────┘
//! ```
//!
//! # Invariants
//!
//! 1. While open, `highlighted` is either `None` or the id of an enabled
//!    entry of the list most recently passed to `open`/`refilter`.
//! 2. `highlighted` is `None` whenever the palette is closed.
//! 3. `highlighted` is `None` while open only if the list has no enabled
//!    entry.
//! 4. Commands other than `Open` and `Close` are no-ops while closed.

use crate::config::PaletteConfig;
use crate::flatten::{Entry, FlattenedList};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Read model for the host: is the palette open, and what is highlighted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationState {
    /// Whether the palette is open.
    pub open: bool,
    /// Id of the highlighted entry.
    pub highlighted: Option<String>,
}

// ---------------------------------------------------------------------------
// Commands and Outcomes
// ---------------------------------------------------------------------------

/// The navigation vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open (or re-open) against a list.
    Open,
    /// The list changed while open.
    Refilter,
    /// Highlight the next enabled entry.
    MoveNext,
    /// Highlight the previous enabled entry.
    MovePrevious,
    /// Highlight the first enabled entry.
    MoveFirst,
    /// Highlight the last enabled entry.
    MoveLast,
    /// Highlight a specific entry (pointer hover).
    Highlight(String),
    /// Select the highlighted entry and close.
    Select,
    /// Select a specific entry and close (pointer click).
    SelectId(String),
    /// Close and clear highlight.
    Close,
}

/// What a command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing observable changed.
    Unchanged,
    /// The palette went from closed to open.
    Opened,
    /// Highlight moved (or was set or cleared) while open.
    HighlightChanged,
    /// An entry was selected; its effect ran and the palette closed.
    Selected(String),
    /// The palette went from open to closed without a selection.
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Owns [`NavigationState`] and applies [`Command`]s to it.
#[derive(Debug, Clone)]
pub struct NavigationController {
    state: NavigationState,
    loop_navigation: bool,
}

impl Default for NavigationController {
    fn default() -> Self {
        Self::from_config(&PaletteConfig::default())
    }
}

impl NavigationController {
    /// Closed controller with the given wrap-around policy.
    pub fn new(loop_navigation: bool) -> Self {
        Self {
            state: NavigationState::default(),
            loop_navigation,
        }
    }

    /// Closed controller configured from a [`PaletteConfig`].
    pub fn from_config(config: &PaletteConfig) -> Self {
        Self::new(config.loop_navigation)
    }

    /// Current state.
    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    /// Whether the palette is open.
    pub fn is_open(&self) -> bool {
        self.state.open
    }

    /// Id of the highlighted entry.
    pub fn highlighted(&self) -> Option<&str> {
        self.state.highlighted.as_deref()
    }

    /// Whether moves wrap around the ends.
    pub fn loops(&self) -> bool {
        self.loop_navigation
    }

    /// Change the wrap-around policy.
    pub fn set_loop(&mut self, loop_navigation: bool) {
        self.loop_navigation = loop_navigation;
    }

    /// Apply one command against `list`.
    pub fn apply(&mut self, command: Command, list: &FlattenedList) -> Outcome {
        match command {
            Command::Open => self.open(list),
            Command::Refilter => self.refilter(list),
            Command::MoveNext => self.move_next(list),
            Command::MovePrevious => self.move_previous(list),
            Command::MoveFirst => self.move_first(list),
            Command::MoveLast => self.move_last(list),
            Command::Highlight(id) => self.highlight(&id, list),
            Command::Select => self.select(list),
            Command::SelectId(id) => self.select_id(&id, list),
            Command::Close => self.close(),
        }
    }

    /// Enter the open state, keeping highlight if it is still valid in `list`
    /// and otherwise resetting it to the first enabled entry.
    pub fn open(&mut self, list: &FlattenedList) -> Outcome {
        let was_open = self.state.open;
        self.state.open = true;
        let changed = self.reconcile(list);
        crate::debug!(
            was_open,
            highlighted = ?self.state.highlighted,
            visible = list.len(),
            "palette open"
        );
        if !was_open {
            Outcome::Opened
        } else if changed {
            Outcome::HighlightChanged
        } else {
            Outcome::Unchanged
        }
    }

    /// Re-establish the highlight invariant after the list changed.
    ///
    /// The highlighted entry is kept if it is still present and enabled;
    /// otherwise highlight jumps to the first enabled entry, not to the
    /// nearest position.
    pub fn refilter(&mut self, list: &FlattenedList) -> Outcome {
        if !self.state.open {
            return Outcome::Unchanged;
        }
        if self.reconcile(list) {
            crate::debug!(
                highlighted = ?self.state.highlighted,
                visible = list.len(),
                "highlight reset after refilter"
            );
            Outcome::HighlightChanged
        } else {
            Outcome::Unchanged
        }
    }

    /// Highlight the next enabled entry.
    pub fn move_next(&mut self, list: &FlattenedList) -> Outcome {
        self.step(list, Direction::Forward)
    }

    /// Highlight the previous enabled entry.
    pub fn move_previous(&mut self, list: &FlattenedList) -> Outcome {
        self.step(list, Direction::Backward)
    }

    /// Highlight the first enabled entry.
    pub fn move_first(&mut self, list: &FlattenedList) -> Outcome {
        if !self.state.open {
            return Outcome::Unchanged;
        }
        self.set_highlight(list.first_enabled().map(Entry::id))
    }

    /// Highlight the last enabled entry.
    pub fn move_last(&mut self, list: &FlattenedList) -> Outcome {
        if !self.state.open {
            return Outcome::Unchanged;
        }
        self.set_highlight(list.last_enabled().map(Entry::id))
    }

    /// Highlight `id` if it is present in `list` and enabled.
    pub fn highlight(&mut self, id: &str, list: &FlattenedList) -> Outcome {
        if !self.state.open || !list.is_highlightable(id) {
            return Outcome::Unchanged;
        }
        self.set_highlight(Some(id))
    }

    /// Run the highlighted entry's effect and close.
    ///
    /// A no-op while closed or when nothing is highlighted.
    pub fn select(&mut self, list: &FlattenedList) -> Outcome {
        match self.state.highlighted.clone() {
            Some(id) => self.select_id(&id, list),
            None => Outcome::Unchanged,
        }
    }

    /// Run the effect of entry `id` and close, if it is present and enabled.
    pub fn select_id(&mut self, id: &str, list: &FlattenedList) -> Outcome {
        if !self.state.open {
            return Outcome::Unchanged;
        }
        let Some(entry) = list.entries().iter().find(|e| e.id() == id) else {
            crate::warn!(id, "select ignored: id not in visible list");
            return Outcome::Unchanged;
        };
        if !entry.is_enabled() {
            return Outcome::Unchanged;
        }

        crate::debug!(id, "palette select");
        entry.item.invoke();
        self.state = NavigationState::default();
        Outcome::Selected(id.to_string())
    }

    /// Close and clear highlight. Idempotent.
    pub fn close(&mut self) -> Outcome {
        let was_open = self.state.open;
        self.state = NavigationState::default();
        if was_open {
            crate::debug!("palette close");
            Outcome::Closed
        } else {
            Outcome::Unchanged
        }
    }

    // --- internals ---

    /// Keep highlight if valid in `list`, else reset to the first enabled
    /// entry. Returns whether highlight changed.
    fn reconcile(&mut self, list: &FlattenedList) -> bool {
        let keep = self
            .state
            .highlighted
            .as_deref()
            .is_some_and(|id| list.is_highlightable(id));
        if keep {
            return false;
        }
        let first = list.first_enabled().map(|e| e.id().to_string());
        let changed = first != self.state.highlighted;
        self.state.highlighted = first;
        changed
    }

    fn step(&mut self, list: &FlattenedList, direction: Direction) -> Outcome {
        if !self.state.open {
            return Outcome::Unchanged;
        }
        let current = self
            .state
            .highlighted
            .as_deref()
            .and_then(|id| list.position(id));

        let target = match current {
            Some(index) => self.next_enabled(list, index, direction),
            // Highlight is stale or unset: enter from the matching end.
            None => match direction {
                Direction::Forward => list.first_enabled(),
                Direction::Backward => list.last_enabled(),
            },
        };

        match target {
            Some(entry) => {
                crate::trace!(to = entry.id(), ?direction, "highlight move");
                self.set_highlight(Some(entry.id()))
            }
            None => Outcome::Unchanged,
        }
    }

    /// The nearest enabled entry after (or before) `from`, honoring the
    /// wrap-around policy. `from` itself is never returned.
    fn next_enabled<'a>(
        &self,
        list: &'a FlattenedList,
        from: usize,
        direction: Direction,
    ) -> Option<&'a Entry> {
        let entries = list.entries();
        let len = entries.len();
        if self.loop_navigation {
            (1..len)
                .map(|offset| match direction {
                    Direction::Forward => (from + offset) % len,
                    Direction::Backward => (from + len - offset) % len,
                })
                .map(|index| &entries[index])
                .find(|e| e.is_enabled())
        } else {
            match direction {
                Direction::Forward => entries.get(from + 1..)?.iter().find(|e| e.is_enabled()),
                Direction::Backward => entries[..from].iter().rev().find(|e| e.is_enabled()),
            }
        }
    }

    fn set_highlight(&mut self, id: Option<&str>) -> Outcome {
        if self.state.highlighted.as_deref() == id {
            return Outcome::Unchanged;
        }
        self.state.highlighted = id.map(str::to_string);
        Outcome::HighlightChanged
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
