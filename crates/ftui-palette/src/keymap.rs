#![forbid(unsafe_code)]

//! Key events and the table that turns them into palette actions.
//!
//! Only the keys a palette cares about are modelled. With the `crossterm`
//! feature, [`KeyEvent::from_crossterm`] converts terminal key events.

use std::collections::HashMap;

use bitflags::bitflags;
#[cfg(feature = "crossterm")]
use crossterm::event as cte;

// ---------------------------------------------------------------------------
// Key Events
// ---------------------------------------------------------------------------

/// Keys the palette distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A character key.
    Char(char),
    /// Enter/Return.
    Enter,
    /// Escape.
    Escape,
    /// Backspace.
    Backspace,
    /// Tab.
    Tab,
    /// Home.
    Home,
    /// End.
    End,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
}

bitflags! {
    /// Modifier keys held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// A key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    /// The key.
    pub code: KeyCode,
    /// Modifiers held.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// A key press without modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
        }
    }

    /// Replace the modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Shorthand for Ctrl+`c`.
    #[must_use]
    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c)).with_modifiers(Modifiers::CTRL)
    }

    /// Convert a crossterm key event.
    ///
    /// Releases and keys the palette does not model yield `None`.
    #[cfg(feature = "crossterm")]
    #[must_use]
    pub fn from_crossterm(event: cte::KeyEvent) -> Option<Self> {
        if event.kind == cte::KeyEventKind::Release {
            return None;
        }
        let code = match event.code {
            cte::KeyCode::Char(c) => KeyCode::Char(c),
            cte::KeyCode::Enter => KeyCode::Enter,
            cte::KeyCode::Esc => KeyCode::Escape,
            cte::KeyCode::Backspace => KeyCode::Backspace,
            cte::KeyCode::Tab => KeyCode::Tab,
            cte::KeyCode::Home => KeyCode::Home,
            cte::KeyCode::End => KeyCode::End,
            cte::KeyCode::Up => KeyCode::Up,
            cte::KeyCode::Down => KeyCode::Down,
            _ => return None,
        };
        Some(Self::new(code).with_modifiers(map_modifiers(event.modifiers)))
    }
}

#[cfg(feature = "crossterm")]
fn map_modifiers(modifiers: cte::KeyModifiers) -> Modifiers {
    let mut out = Modifiers::NONE;
    if modifiers.contains(cte::KeyModifiers::SHIFT) {
        out |= Modifiers::SHIFT;
    }
    if modifiers.contains(cte::KeyModifiers::ALT) {
        out |= Modifiers::ALT;
    }
    if modifiers.contains(cte::KeyModifiers::CONTROL) {
        out |= Modifiers::CTRL;
    }
    if modifiers.intersects(cte::KeyModifiers::SUPER | cte::KeyModifiers::META) {
        out |= Modifiers::SUPER;
    }
    out
}

// ---------------------------------------------------------------------------
// Keymap
// ---------------------------------------------------------------------------

/// What a key does to the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Highlight the next enabled entry.
    MoveNext,
    /// Highlight the previous enabled entry.
    MovePrevious,
    /// Highlight the first enabled entry.
    MoveFirst,
    /// Highlight the last enabled entry.
    MoveLast,
    /// Select the highlighted entry.
    Select,
    /// Close without selecting.
    Close,
    /// Delete the last query character.
    DeleteBackward,
    /// Clear the query.
    ClearQuery,
    /// Append a character to the query.
    Insert(char),
}

/// Key-to-action table.
///
/// Explicit bindings win. Any other character typed without Ctrl, Alt or
/// Super falls through to [`KeyAction::Insert`].
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl Default for Keymap {
    fn default() -> Self {
        let bindings = [
            (KeyEvent::new(KeyCode::Down), KeyAction::MoveNext),
            (KeyEvent::ctrl('n'), KeyAction::MoveNext),
            (KeyEvent::new(KeyCode::Up), KeyAction::MovePrevious),
            (KeyEvent::ctrl('p'), KeyAction::MovePrevious),
            (KeyEvent::new(KeyCode::Home), KeyAction::MoveFirst),
            (KeyEvent::new(KeyCode::End), KeyAction::MoveLast),
            (KeyEvent::new(KeyCode::Enter), KeyAction::Select),
            (KeyEvent::new(KeyCode::Escape), KeyAction::Close),
            (KeyEvent::new(KeyCode::Backspace), KeyAction::DeleteBackward),
            (KeyEvent::ctrl('u'), KeyAction::ClearQuery),
        ];
        Self {
            bindings: bindings.into_iter().collect(),
        }
    }
}

impl Keymap {
    /// The default bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// A keymap with no explicit bindings; only character insertion.
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Bind `key` to `action`, replacing any previous binding (builder).
    #[must_use]
    pub fn bind(mut self, key: KeyEvent, action: KeyAction) -> Self {
        self.bindings.insert(key, action);
        self
    }

    /// Remove the binding for `key` (builder).
    #[must_use]
    pub fn unbind(mut self, key: KeyEvent) -> Self {
        self.bindings.remove(&key);
        self
    }

    /// The action for `key`, if any.
    pub fn resolve(&self, key: &KeyEvent) -> Option<KeyAction> {
        if let Some(action) = self.bindings.get(key) {
            return Some(*action);
        }
        match key.code {
            KeyCode::Char(c)
                if !c.is_control()
                    && !key
                        .modifiers
                        .intersects(Modifiers::CTRL | Modifiers::ALT | Modifiers::SUPER) =>
            {
                Some(KeyAction::Insert(c))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_navigation_bindings() {
        let keymap = Keymap::default();
        let cases = [
            (KeyEvent::new(KeyCode::Down), KeyAction::MoveNext),
            (KeyEvent::new(KeyCode::Up), KeyAction::MovePrevious),
            (KeyEvent::ctrl('n'), KeyAction::MoveNext),
            (KeyEvent::ctrl('p'), KeyAction::MovePrevious),
            (KeyEvent::new(KeyCode::Home), KeyAction::MoveFirst),
            (KeyEvent::new(KeyCode::End), KeyAction::MoveLast),
            (KeyEvent::new(KeyCode::Enter), KeyAction::Select),
            (KeyEvent::new(KeyCode::Escape), KeyAction::Close),
            (KeyEvent::new(KeyCode::Backspace), KeyAction::DeleteBackward),
            (KeyEvent::ctrl('u'), KeyAction::ClearQuery),
        ];
        for (key, expected) in cases {
            assert_eq!(keymap.resolve(&key), Some(expected), "{key:?}");
        }
    }

    #[test]
    fn plain_and_shifted_chars_insert() {
        let keymap = Keymap::default();
        assert_eq!(
            keymap.resolve(&KeyEvent::new(KeyCode::Char('c'))),
            Some(KeyAction::Insert('c'))
        );
        let shifted = KeyEvent::new(KeyCode::Char('C')).with_modifiers(Modifiers::SHIFT);
        assert_eq!(keymap.resolve(&shifted), Some(KeyAction::Insert('C')));
    }

    #[test]
    fn chords_do_not_insert() {
        let keymap = Keymap::default();
        assert_eq!(keymap.resolve(&KeyEvent::ctrl('x')), None);
        let alt = KeyEvent::new(KeyCode::Char('x')).with_modifiers(Modifiers::ALT);
        assert_eq!(keymap.resolve(&alt), None);
        assert_eq!(keymap.resolve(&KeyEvent::new(KeyCode::Tab)), None);
    }

    #[test]
    fn rebinding() {
        let keymap = Keymap::default()
            .bind(KeyEvent::new(KeyCode::Tab), KeyAction::MoveNext)
            .unbind(KeyEvent::ctrl('n'));
        assert_eq!(
            keymap.resolve(&KeyEvent::new(KeyCode::Tab)),
            Some(KeyAction::MoveNext)
        );
        assert_eq!(keymap.resolve(&KeyEvent::ctrl('n')), None);
    }

    #[test]
    fn empty_keymap_only_inserts() {
        let keymap = Keymap::empty();
        assert_eq!(keymap.resolve(&KeyEvent::new(KeyCode::Down)), None);
        assert_eq!(
            keymap.resolve(&KeyEvent::new(KeyCode::Char('j'))),
            Some(KeyAction::Insert('j'))
        );
    }

    #[cfg(feature = "crossterm")]
    #[test]
    fn crossterm_conversion() {
        let press = cte::KeyEvent::new(cte::KeyCode::Esc, cte::KeyModifiers::NONE);
        assert_eq!(
            KeyEvent::from_crossterm(press),
            Some(KeyEvent::new(KeyCode::Escape))
        );

        let ctrl_p = cte::KeyEvent::new(cte::KeyCode::Char('p'), cte::KeyModifiers::CONTROL);
        assert_eq!(KeyEvent::from_crossterm(ctrl_p), Some(KeyEvent::ctrl('p')));

        let release = cte::KeyEvent::new_with_kind(
            cte::KeyCode::Down,
            cte::KeyModifiers::NONE,
            cte::KeyEventKind::Release,
        );
        assert_eq!(KeyEvent::from_crossterm(release), None);

        let f1 = cte::KeyEvent::new(cte::KeyCode::F(1), cte::KeyModifiers::NONE);
        assert_eq!(KeyEvent::from_crossterm(f1), None);
    }
}
