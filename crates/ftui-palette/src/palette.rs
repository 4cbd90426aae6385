#![forbid(unsafe_code)]

//! Host-facing command palette: items, query, and navigation in one place.
//!
//! # Usage
//!
//! ```
//! use ftui_palette::{CommandPalette, Item, KeyCode, KeyEvent, PaletteAction};
//!
//! let mut palette = CommandPalette::new(vec![
//!     Item::new("copy", "Copy").with_keywords(&["duplicate"]),
//!     Item::new("paste", "Paste"),
//! ]);
//! palette.open();
//! palette.set_query("dup");
//! assert_eq!(palette.highlighted(), Some("copy"));
//!
//! let action = palette.handle_key(&KeyEvent::new(KeyCode::Enter));
//! assert_eq!(action, Some(PaletteAction::Selected("copy".into())));
//! assert!(!palette.is_open());
//! ```

use std::fmt;

use crate::config::PaletteConfig;
use crate::error::ListError;
use crate::flatten::{Entry, FlattenedList};
use crate::item::ItemList;
use crate::keymap::{KeyAction, KeyEvent, Keymap};
use crate::matcher::{Filter, TieredMatcher};
use crate::navigation::{NavigationController, NavigationState, Outcome};

/// Result of key handling that the host must react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteAction {
    /// An entry was selected (its effect already ran) and the palette closed.
    Selected(String),
    /// The palette was dismissed without a selection.
    Dismissed,
}

/// Command palette engine.
///
/// Owns the source items and the query, rebuilds the [`FlattenedList`] on
/// every change, and keeps the [`NavigationController`] in sync with it.
///
/// # Invariants
///
/// 1. `visible_list()` always reflects the current items, query and filter.
/// 2. The navigation state has been refiltered against `visible_list()`.
/// 3. `open()` and `close()` reset the query. A query set while closed
///    only shapes `visible_list()`; it does not survive the next `open()`.
pub struct CommandPalette {
    items: ItemList,
    query: String,
    list: FlattenedList,
    filter: Box<dyn Filter>,
    keymap: Keymap,
    config: PaletteConfig,
    nav: NavigationController,
}

impl fmt::Debug for CommandPalette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandPalette")
            .field("items", &self.items.len())
            .field("query", &self.query)
            .field("visible", &self.list.len())
            .field("config", &self.config)
            .field("state", self.nav.state())
            .finish_non_exhaustive()
    }
}

impl Default for CommandPalette {
    fn default() -> Self {
        Self::new(ItemList::default())
    }
}

impl CommandPalette {
    /// Create a closed palette over `items` with the default configuration.
    pub fn new(items: impl Into<ItemList>) -> Self {
        let items = items.into();
        let list = FlattenedList::build(&items, "");
        let config = PaletteConfig::default();
        Self {
            items,
            query: String::new(),
            list,
            filter: Box::new(TieredMatcher),
            keymap: Keymap::default(),
            nav: NavigationController::from_config(&config),
            config,
        }
    }

    /// Apply a configuration (builder). Opens the palette if
    /// `default_open` is set.
    #[must_use]
    pub fn with_config(mut self, config: PaletteConfig) -> Self {
        self.config = config;
        self.nav.set_loop(config.loop_navigation);
        if config.default_open && !self.nav.is_open() {
            self.open();
        }
        self
    }

    /// Replace the visibility filter (builder).
    #[must_use]
    pub fn with_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filter = Box::new(filter);
        self.rebuild();
        self
    }

    /// Replace the keymap (builder).
    #[must_use]
    pub fn with_keymap(mut self, keymap: Keymap) -> Self {
        self.keymap = keymap;
        self
    }

    // --- Items ---

    /// Replace the source items and refilter.
    pub fn set_items(&mut self, items: impl Into<ItemList>) -> Outcome {
        self.items = items.into();
        self.rebuild()
    }

    /// Validate, then replace the source items.
    pub fn try_set_items(&mut self, items: impl Into<ItemList>) -> Result<Outcome, ListError> {
        let items = items.into();
        items.validate()?;
        Ok(self.set_items(items))
    }

    /// Source items.
    pub fn items(&self) -> &ItemList {
        &self.items
    }

    // --- Query ---

    /// Current query text.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replace the query and refilter.
    pub fn set_query(&mut self, query: impl Into<String>) -> Outcome {
        let query = query.into();
        if query == self.query {
            return Outcome::Unchanged;
        }
        self.query = query;
        self.rebuild()
    }

    /// Append a character to the query.
    pub fn push_char(&mut self, c: char) -> Outcome {
        self.query.push(c);
        self.rebuild()
    }

    /// Remove the last query character.
    pub fn pop_char(&mut self) -> Outcome {
        if self.query.pop().is_none() {
            return Outcome::Unchanged;
        }
        self.rebuild()
    }

    /// Clear the query.
    pub fn clear_query(&mut self) -> Outcome {
        self.set_query(String::new())
    }

    // --- Open / Close ---

    /// Open with an empty query; highlight lands on the first enabled entry.
    pub fn open(&mut self) -> Outcome {
        self.query.clear();
        self.list = FlattenedList::build_with(&self.items, &self.query, self.filter.as_ref());
        self.nav.open(&self.list)
    }

    /// Close and clear the query. Idempotent.
    pub fn close(&mut self) -> Outcome {
        self.reset_query();
        self.nav.close()
    }

    /// Open if closed, close if open.
    pub fn toggle(&mut self) -> Outcome {
        if self.nav.is_open() {
            self.close()
        } else {
            self.open()
        }
    }

    // --- Navigation ---

    /// Highlight the next enabled entry.
    pub fn move_next(&mut self) -> Outcome {
        self.nav.move_next(&self.list)
    }

    /// Highlight the previous enabled entry.
    pub fn move_previous(&mut self) -> Outcome {
        self.nav.move_previous(&self.list)
    }

    /// Highlight the first enabled entry.
    pub fn move_first(&mut self) -> Outcome {
        self.nav.move_first(&self.list)
    }

    /// Highlight the last enabled entry.
    pub fn move_last(&mut self) -> Outcome {
        self.nav.move_last(&self.list)
    }

    /// Highlight `id` (pointer hover). Ignored for disabled or hidden ids.
    pub fn hover(&mut self, id: &str) -> Outcome {
        self.nav.highlight(id, &self.list)
    }

    /// Select the highlighted entry.
    pub fn select(&mut self) -> Outcome {
        let outcome = self.nav.select(&self.list);
        self.after_select(outcome)
    }

    /// Select entry `id` (pointer click). Ignored for disabled or hidden ids.
    pub fn select_id(&mut self, id: &str) -> Outcome {
        let outcome = self.nav.select_id(id, &self.list);
        self.after_select(outcome)
    }

    /// Translate a key press into palette commands.
    ///
    /// Keys are ignored while closed; opening is the host's decision.
    pub fn handle_key(&mut self, key: &KeyEvent) -> Option<PaletteAction> {
        if !self.nav.is_open() {
            return None;
        }
        match self.keymap.resolve(key)? {
            KeyAction::MoveNext => {
                self.move_next();
            }
            KeyAction::MovePrevious => {
                self.move_previous();
            }
            KeyAction::MoveFirst => {
                self.move_first();
            }
            KeyAction::MoveLast => {
                self.move_last();
            }
            KeyAction::Select => {
                if let Outcome::Selected(id) = self.select() {
                    return Some(PaletteAction::Selected(id));
                }
            }
            KeyAction::Close => {
                self.close();
                return Some(PaletteAction::Dismissed);
            }
            KeyAction::DeleteBackward => {
                self.pop_char();
            }
            KeyAction::ClearQuery => {
                self.clear_query();
            }
            KeyAction::Insert(c) => {
                self.push_char(c);
            }
        }
        None
    }

    // --- Read models ---

    /// The visible, filtered entries.
    pub fn visible_list(&self) -> &FlattenedList {
        &self.list
    }

    /// Open flag and highlighted id.
    pub fn state(&self) -> &NavigationState {
        self.nav.state()
    }

    /// Whether the palette is open.
    pub fn is_open(&self) -> bool {
        self.nav.is_open()
    }

    /// Id of the highlighted entry.
    pub fn highlighted(&self) -> Option<&str> {
        self.nav.highlighted()
    }

    /// The highlighted entry.
    pub fn highlighted_entry(&self) -> Option<&Entry> {
        let id = self.nav.highlighted()?;
        self.list.entries().iter().find(|e| e.id() == id)
    }

    /// Whether no entry matches the query ("No results.").
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Active configuration.
    pub fn config(&self) -> &PaletteConfig {
        &self.config
    }

    // --- internals ---

    fn rebuild(&mut self) -> Outcome {
        self.list = FlattenedList::build_with(&self.items, &self.query, self.filter.as_ref());
        crate::debug!(
            query = %self.query,
            visible = self.list.len(),
            "palette refilter"
        );
        self.nav.refilter(&self.list)
    }

    fn reset_query(&mut self) {
        if !self.query.is_empty() {
            self.query.clear();
            self.list = FlattenedList::build_with(&self.items, "", self.filter.as_ref());
        }
    }

    fn after_select(&mut self, outcome: Outcome) -> Outcome {
        if matches!(outcome, Outcome::Selected(_)) {
            self.reset_query();
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{Group, Item};
    use crate::keymap::KeyCode;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code)
    }

    fn basic() -> CommandPalette {
        CommandPalette::new(vec![
            Item::new("1", "Copy").with_keywords(&["duplicate"]),
            Item::new("2", "Paste"),
            Item::new("3", "Cut").with_keywords(&["remove", "delete"]),
        ])
    }

    #[test]
    fn new_palette_is_closed() {
        let palette = basic();
        assert!(!palette.is_open());
        assert_eq!(palette.visible_list().len(), 3);
        assert!(palette.highlighted().is_none());
        assert!(palette.config().loop_navigation);
    }

    #[test]
    fn default_open_config_opens() {
        let palette = basic().with_config(PaletteConfig::new().with_default_open(true));
        assert!(palette.is_open());
        assert_eq!(palette.highlighted(), Some("1"));
    }

    #[test]
    fn typing_filters_and_keeps_highlight() {
        let mut palette = basic();
        palette.open();
        palette.move_next();
        assert_eq!(palette.highlighted(), Some("2"));
        for c in "pa".chars() {
            palette.handle_key(&key(KeyCode::Char(c)));
        }
        assert_eq!(palette.query(), "pa");
        assert_eq!(palette.highlighted(), Some("2"));
        assert_eq!(palette.visible_list().len(), 1);
    }

    #[test]
    fn narrowing_away_highlight_resets_to_first() {
        let mut palette = basic();
        palette.open();
        palette.move_next();
        palette.set_query("c");
        // Copy and Cut remain; Paste was highlighted and is gone.
        assert_eq!(palette.highlighted(), Some("1"));
    }

    #[test]
    fn no_results_state() {
        let mut palette = basic();
        palette.open();
        palette.set_query("xyz123");
        assert!(palette.is_empty());
        assert!(palette.highlighted().is_none());
        assert_eq!(palette.handle_key(&key(KeyCode::Enter)), None);
        assert!(palette.is_open());
        palette.handle_key(&key(KeyCode::Backspace));
        assert_eq!(palette.query(), "xyz12");
        palette.handle_key(&KeyEvent::ctrl('u'));
        assert_eq!(palette.query(), "");
        assert_eq!(palette.highlighted(), Some("1"));
    }

    #[test]
    fn escape_dismisses_and_clears_query() {
        let mut palette = basic();
        palette.open();
        palette.set_query("pa");
        assert_eq!(
            palette.handle_key(&key(KeyCode::Escape)),
            Some(PaletteAction::Dismissed)
        );
        assert!(!palette.is_open());
        assert_eq!(palette.query(), "");
        assert_eq!(palette.visible_list().len(), 3);
    }

    #[test]
    fn keys_ignored_while_closed() {
        let mut palette = basic();
        assert_eq!(palette.handle_key(&key(KeyCode::Char('a'))), None);
        assert_eq!(palette.query(), "");
        assert_eq!(palette.handle_key(&key(KeyCode::Escape)), None);
    }

    #[test]
    fn up_from_first_loops_by_default() {
        let mut palette = basic();
        palette.open();
        palette.handle_key(&key(KeyCode::Up));
        assert_eq!(palette.highlighted(), Some("3"));
    }

    #[test]
    fn toggle_round_trip() {
        let mut palette = basic();
        assert_eq!(palette.toggle(), Outcome::Opened);
        assert_eq!(palette.toggle(), Outcome::Closed);
        assert_eq!(palette.state(), &NavigationState::default());
    }

    #[test]
    fn reopen_clears_query() {
        let mut palette = basic();
        palette.open();
        palette.set_query("cut");
        palette.open();
        assert_eq!(palette.query(), "");
        assert_eq!(palette.visible_list().len(), 3);
        assert_eq!(palette.highlighted(), Some("3"));
    }

    #[test]
    fn hover_then_click() {
        let mut palette = CommandPalette::new(vec![
            Item::new("a", "Alpha"),
            Item::new("b", "Beta").disabled(true),
            Item::new("c", "Gamma"),
        ]);
        palette.open();
        assert_eq!(palette.hover("b"), Outcome::Unchanged);
        assert_eq!(palette.hover("c"), Outcome::HighlightChanged);
        assert_eq!(palette.highlighted_entry().map(|e| e.item.label.as_str()), Some("Gamma"));
        assert_eq!(palette.select_id("b"), Outcome::Unchanged);
        assert_eq!(palette.select_id("a"), Outcome::Selected("a".into()));
    }

    #[test]
    fn set_items_refilters_open_palette() {
        let mut palette = basic();
        palette.open();
        palette.move_last();
        assert_eq!(palette.highlighted(), Some("3"));
        palette.set_items(vec![Item::new("3", "Cut"), Item::new("4", "Undo")]);
        assert_eq!(palette.highlighted(), Some("3"));
        palette.set_items(vec![Item::new("4", "Undo")]);
        assert_eq!(palette.highlighted(), Some("4"));
    }

    #[test]
    fn try_set_items_rejects_duplicates() {
        let mut palette = basic();
        let err = palette
            .try_set_items(vec![Item::new("x", "One"), Item::new("x", "Two")])
            .unwrap_err();
        assert_eq!(err, ListError::DuplicateId { id: "x".into() });
        // Rejected lists leave the palette untouched.
        assert_eq!(palette.items().len(), 3);
        assert!(palette.try_set_items(vec![Item::new("y", "Three")]).is_ok());
    }

    #[test]
    fn grouped_items() {
        let mut palette = CommandPalette::new(vec![
            Group::new("Suggestions", vec![Item::new("cal", "Calendar")]),
            Group::new("Settings", vec![Item::new("profile", "Profile")]),
        ]);
        palette.open();
        palette.set_query("prof");
        let sections: Vec<_> = palette.visible_list().sections().map(|s| s.group).collect();
        assert_eq!(sections, vec![Some("Settings")]);
        assert_eq!(palette.highlighted(), Some("profile"));
    }

    #[test]
    fn custom_filter_replaces_matcher() {
        let mut palette = basic().with_filter(|query: &str, item: &Item| item.id == query || query.is_empty());
        palette.open();
        palette.set_query("2");
        assert_eq!(palette.visible_list().len(), 1);
        assert_eq!(palette.highlighted(), Some("2"));
    }

    #[test]
    fn custom_keymap() {
        let keymap = Keymap::default().bind(key(KeyCode::Tab), KeyAction::MoveNext);
        let mut palette = basic().with_keymap(keymap);
        palette.open();
        palette.handle_key(&key(KeyCode::Tab));
        assert_eq!(palette.highlighted(), Some("2"));
    }

    #[test]
    fn pop_on_empty_query_is_noop() {
        let mut palette = basic();
        palette.open();
        assert_eq!(palette.pop_char(), Outcome::Unchanged);
        assert_eq!(palette.set_query(""), Outcome::Unchanged);
    }

    #[test]
    fn query_set_while_closed_is_reset_by_open() {
        let mut palette = basic();
        palette.set_query("pa");
        assert!(!palette.is_open());
        assert_eq!(palette.query(), "pa");
        assert_eq!(palette.visible_list().len(), 1);
        assert!(palette.highlighted().is_none());

        assert_eq!(palette.open(), Outcome::Opened);
        assert_eq!(palette.query(), "");
        assert_eq!(palette.visible_list().len(), 3);
        assert_eq!(palette.highlighted(), Some("1"));
    }

    #[test]
    fn debug_output_is_compact() {
        let rendered = format!("{:?}", basic());
        assert!(rendered.starts_with("CommandPalette"));
        assert!(rendered.contains("visible: 3"));
    }
}
