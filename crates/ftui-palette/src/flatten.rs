#![forbid(unsafe_code)]

//! Filtering an item list into the flat sequence navigation works on.
//!
//! # Invariants
//!
//! 1. Entries keep input order: groups in order, items in order within a group.
//! 2. A group with no visible item contributes no entry (and no heading).
//! 3. Disabled items are kept; they are visible, just not highlightable.

use crate::item::{Item, ItemList};
use crate::matcher::{Filter, TieredMatcher};

/// One visible row.
#[derive(Debug, Clone)]
pub struct Entry {
    /// Label of the owning group, for grouped lists.
    pub group: Option<String>,
    /// Position of the owning group in the input. Labels need not be unique,
    /// so headings are split on this rather than on `group`.
    pub group_index: Option<usize>,
    /// The item itself.
    pub item: Item,
}

impl Entry {
    /// Shorthand for `self.item.id`.
    pub fn id(&self) -> &str {
        &self.item.id
    }

    /// Whether the entry can take highlight.
    pub fn is_enabled(&self) -> bool {
        self.item.is_enabled()
    }
}

/// A run of consecutive entries under one group heading.
#[derive(Debug, Clone, Copy)]
pub struct Section<'a> {
    /// Heading, or `None` for ungrouped lists.
    pub group: Option<&'a str>,
    /// Entries under the heading.
    pub entries: &'a [Entry],
}

/// The filtered, group-aware list of visible items.
///
/// Rebuilt from scratch for every query; it is the only structure the
/// [`NavigationController`](crate::NavigationController) reads.
#[derive(Debug, Clone, Default)]
pub struct FlattenedList {
    entries: Vec<Entry>,
}

impl FlattenedList {
    /// Filter `list` with the default [`TieredMatcher`].
    pub fn build(list: &ItemList, query: &str) -> Self {
        Self::build_with(list, query, &TieredMatcher)
    }

    /// Filter `list` with a custom filter.
    pub fn build_with(list: &ItemList, query: &str, filter: &dyn Filter) -> Self {
        let _span = crate::debug_span!(
            "palette_filter",
            query_len = query.len(),
            grouped = list.is_grouped(),
            total = list.len()
        )
        .entered();

        let predicate = filter.predicate(query);
        let visible = predicate.as_ref();
        let entries: Vec<Entry> = match list {
            ItemList::Flat(items) => items
                .iter()
                .filter(|item| visible(*item))
                .map(|item| Entry {
                    group: None,
                    group_index: None,
                    item: item.clone(),
                })
                .collect(),
            ItemList::Grouped(groups) => groups
                .iter()
                .enumerate()
                .flat_map(move |(index, group)| {
                    group
                        .items
                        .iter()
                        .filter(move |item| visible(*item))
                        .map(move |item| Entry {
                            group: Some(group.label.clone()),
                            group_index: Some(index),
                            item: item.clone(),
                        })
                })
                .collect(),
        };

        crate::trace!(visible = entries.len(), "flattened item list");
        Self { entries }
    }

    /// Build directly from entries, for hosts that filter on their own.
    pub fn from_entries(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    /// Number of visible entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing matched.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in display order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Entry at `index`.
    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    /// Index of the entry with `id`.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.id() == id)
    }

    /// Whether `id` is present and enabled.
    pub fn is_highlightable(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.id() == id && e.is_enabled())
    }

    /// First enabled entry.
    pub fn first_enabled(&self) -> Option<&Entry> {
        self.entries.iter().find(|e| e.is_enabled())
    }

    /// Last enabled entry.
    pub fn last_enabled(&self) -> Option<&Entry> {
        self.entries.iter().rev().find(|e| e.is_enabled())
    }

    /// Number of enabled entries.
    pub fn enabled_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_enabled()).count()
    }

    /// Consecutive runs of entries from the same input group, one per
    /// group heading.
    pub fn sections(&self) -> impl Iterator<Item = Section<'_>> + '_ {
        self.entries
            .chunk_by(|a, b| a.group_index == b.group_index)
            .map(|run| Section {
                group: run[0].group.as_deref(),
                entries: run,
            })
    }
}
