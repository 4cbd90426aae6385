#![forbid(unsafe_code)]

//! Palette items, groups, and the lists hosts hand to the engine.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::error::ListError;

// ---------------------------------------------------------------------------
// Selection Effect
// ---------------------------------------------------------------------------

/// Opaque effect run when an item is selected.
///
/// The engine never looks inside; it only invokes the effect. Clones share
/// the same underlying closure.
#[derive(Clone)]
pub struct OnSelect(Arc<dyn Fn() + Send + Sync>);

impl OnSelect {
    /// Wrap a closure.
    pub fn new(f: impl Fn() + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Run the effect.
    pub fn invoke(&self) {
        (self.0)();
    }
}

impl fmt::Debug for OnSelect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OnSelect(..)")
    }
}

// ---------------------------------------------------------------------------
// Item
// ---------------------------------------------------------------------------

/// A single selectable palette entry.
#[derive(Debug, Clone)]
pub struct Item {
    /// Unique identifier within the whole list.
    pub id: String,
    /// Display label, matched against the query.
    pub label: String,
    /// Extra search terms matched by substring.
    pub keywords: Vec<String>,
    /// Keyboard shortcut hint. Display only; never matched.
    pub shortcut: Option<String>,
    /// Disabled items stay visible but can never be highlighted.
    pub disabled: bool,
    /// Effect invoked on selection.
    pub on_select: Option<OnSelect>,
}

impl Item {
    /// Create an enabled item with no keywords and no effect.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            keywords: Vec::new(),
            shortcut: None,
            disabled: false,
            on_select: None,
        }
    }

    /// Set keywords (builder).
    #[must_use]
    pub fn with_keywords(mut self, keywords: &[&str]) -> Self {
        self.keywords = keywords.iter().map(|s| (*s).to_string()).collect();
        self
    }

    /// Set the shortcut hint (builder).
    #[must_use]
    pub fn with_shortcut(mut self, shortcut: impl Into<String>) -> Self {
        self.shortcut = Some(shortcut.into());
        self
    }

    /// Set the disabled flag (builder).
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Attach a selection effect (builder).
    #[must_use]
    pub fn on_select(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_select = Some(OnSelect::new(f));
        self
    }

    /// Whether this item may receive highlight.
    pub fn is_enabled(&self) -> bool {
        !self.disabled
    }

    /// Run the selection effect, if any.
    pub fn invoke(&self) {
        if let Some(effect) = &self.on_select {
            effect.invoke();
        }
    }
}

// ---------------------------------------------------------------------------
// Group
// ---------------------------------------------------------------------------

/// A labelled, ordered run of items. Groups do not nest.
#[derive(Debug, Clone)]
pub struct Group {
    /// Heading shown above the group's items. Not matched.
    pub label: String,
    /// Items in display order.
    pub items: Vec<Item>,
}

impl Group {
    /// Create a group.
    pub fn new(label: impl Into<String>, items: Vec<Item>) -> Self {
        Self {
            label: label.into(),
            items,
        }
    }
}

// ---------------------------------------------------------------------------
// Item List
// ---------------------------------------------------------------------------

/// The full list a host supplies: either all items or all groups.
#[derive(Debug, Clone)]
pub enum ItemList {
    /// Ungrouped items.
    Flat(Vec<Item>),
    /// Grouped items.
    Grouped(Vec<Group>),
}

impl Default for ItemList {
    fn default() -> Self {
        Self::Flat(Vec::new())
    }
}

impl From<Vec<Item>> for ItemList {
    fn from(items: Vec<Item>) -> Self {
        Self::Flat(items)
    }
}

impl From<Vec<Group>> for ItemList {
    fn from(groups: Vec<Group>) -> Self {
        Self::Grouped(groups)
    }
}

impl ItemList {
    /// Whether the list is made of groups.
    pub fn is_grouped(&self) -> bool {
        matches!(self, Self::Grouped(_))
    }

    /// Total number of items, across groups.
    pub fn len(&self) -> usize {
        match self {
            Self::Flat(items) => items.len(),
            Self::Grouped(groups) => groups.iter().map(|g| g.items.len()).sum(),
        }
    }

    /// Whether there are no items at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every item in input order, paired with its group label.
    pub fn items(&self) -> impl Iterator<Item = (Option<&str>, &Item)> + '_ {
        let (flat, grouped) = match self {
            Self::Flat(items) => (Some(items.iter().map(|item| (None, item))), None),
            Self::Grouped(groups) => (
                None,
                Some(groups.iter().flat_map(|group| {
                    group
                        .items
                        .iter()
                        .map(move |item| (Some(group.label.as_str()), item))
                })),
            ),
        };
        flat.into_iter()
            .flatten()
            .chain(grouped.into_iter().flatten())
    }

    /// Look up an item by id.
    pub fn find(&self, id: &str) -> Option<&Item> {
        self.items().map(|(_, item)| item).find(|item| item.id == id)
    }

    /// Check the host-side preconditions: non-empty ids and labels, unique ids.
    pub fn validate(&self) -> Result<(), ListError> {
        let mut seen = HashSet::with_capacity(self.len());
        for (_, item) in self.items() {
            if item.id.is_empty() {
                return Err(ListError::EmptyId {
                    label: item.label.clone(),
                });
            }
            if item.label.is_empty() {
                return Err(ListError::EmptyLabel {
                    id: item.id.clone(),
                });
            }
            if !seen.insert(item.id.as_str()) {
                return Err(ListError::DuplicateId {
                    id: item.id.clone(),
                });
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Candidate
// ---------------------------------------------------------------------------

/// Something the matcher can test: a single item or a whole group.
#[derive(Debug, Clone, Copy)]
pub enum Candidate<'a> {
    /// A single item.
    Item(&'a Item),
    /// A group; matches when any child matches.
    Group(&'a Group),
}

impl<'a> From<&'a Item> for Candidate<'a> {
    fn from(item: &'a Item) -> Self {
        Self::Item(item)
    }
}

impl<'a> From<&'a Group> for Candidate<'a> {
    fn from(group: &'a Group) -> Self {
        Self::Group(group)
    }
}
