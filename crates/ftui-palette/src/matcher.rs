#![forbid(unsafe_code)]

//! Tiered query matching.
//!
//! An item matches a query when any of these tiers accepts it, tried in
//! order and short-circuiting on the first success:
//!
//! 1. **Exact**: label equals query.
//! 2. **Prefix**: label starts with query.
//! 3. **Substring**: label contains query.
//! 4. **Keyword**: some keyword contains query.
//! 5. **Subsequence**: every query character appears in the label, in order,
//!    not necessarily contiguous.
//!
//! Comparison is case-insensitive (Unicode lowercase on both sides). The
//! matcher only gates visibility; there is no score and no reordering.
//!
//! # Invariants
//!
//! 1. The empty query matches every item and every group.
//! 2. A group matches iff at least one of its items matches. The group label
//!    is never compared against the query.
//! 3. Same input, same answer. No state, no side effects.

use crate::item::{Candidate, Item};

// ---------------------------------------------------------------------------
// Match Tier
// ---------------------------------------------------------------------------

/// The tier that accepted an item, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchTier {
    /// Query equals the label.
    Exact,
    /// Label starts with the query.
    Prefix,
    /// Label contains the query.
    Substring,
    /// A keyword contains the query.
    Keyword,
    /// Query characters appear in the label in order.
    Subsequence,
}

impl MatchTier {
    /// All tiers in evaluation order.
    pub const ALL: [Self; 5] = [
        Self::Exact,
        Self::Prefix,
        Self::Substring,
        Self::Keyword,
        Self::Subsequence,
    ];

    /// Short human-readable name.
    pub fn description(self) -> &'static str {
        match self {
            Self::Exact => "exact match",
            Self::Prefix => "prefix match",
            Self::Substring => "substring match",
            Self::Keyword => "keyword match",
            Self::Subsequence => "ordered subsequence",
        }
    }
}

// ---------------------------------------------------------------------------
// Filter
// ---------------------------------------------------------------------------

/// Visibility predicate used when flattening a list.
///
/// [`TieredMatcher`] is the default. Any `Fn(&str, &Item) -> bool` closure is
/// also a filter, which lets hosts swap in their own rule. Group visibility
/// is always derived from the children.
pub trait Filter {
    /// Whether `item` is visible for `query`.
    fn matches_item(&self, query: &str, item: &Item) -> bool;

    /// Whether a candidate is visible. Groups delegate to their items.
    fn matches(&self, query: &str, candidate: Candidate<'_>) -> bool {
        match candidate {
            Candidate::Item(item) => self.matches_item(query, item),
            Candidate::Group(group) => group
                .items
                .iter()
                .any(|item| self.matches_item(query, item)),
        }
    }

    /// Item predicate for one query, built once per list rebuild.
    ///
    /// Override to hoist per-query work out of the per-item loop.
    fn predicate<'q>(&'q self, query: &'q str) -> Box<dyn Fn(&Item) -> bool + 'q> {
        Box::new(move |item: &Item| self.matches_item(query, item))
    }
}

impl<F> Filter for F
where
    F: Fn(&str, &Item) -> bool,
{
    fn matches_item(&self, query: &str, item: &Item) -> bool {
        self(query, item)
    }
}

// ---------------------------------------------------------------------------
// Tiered Matcher
// ---------------------------------------------------------------------------

/// The default five-tier matcher.
#[derive(Debug, Clone, Copy, Default)]
pub struct TieredMatcher;

impl TieredMatcher {
    /// Create the matcher.
    pub const fn new() -> Self {
        Self
    }

    /// The first tier that accepts `item`, or `None` if nothing matches.
    ///
    /// The empty query is a prefix of every label, so it reports
    /// [`MatchTier::Prefix`] for well-formed items.
    pub fn tier(&self, query: &str, item: &Item) -> Option<MatchTier> {
        tier_lowered(&query.to_lowercase(), item)
    }
}

impl Filter for TieredMatcher {
    fn matches_item(&self, query: &str, item: &Item) -> bool {
        query.is_empty() || self.tier(query, item).is_some()
    }

    fn matches(&self, query: &str, candidate: Candidate<'_>) -> bool {
        if query.is_empty() {
            return true;
        }
        let query = query.to_lowercase();
        match candidate {
            Candidate::Item(item) => tier_lowered(&query, item).is_some(),
            Candidate::Group(group) => group
                .items
                .iter()
                .any(|item| tier_lowered(&query, item).is_some()),
        }
    }

    fn predicate<'q>(&'q self, query: &'q str) -> Box<dyn Fn(&Item) -> bool + 'q> {
        if query.is_empty() {
            return Box::new(|_: &Item| true);
        }
        let query = query.to_lowercase();
        Box::new(move |item: &Item| tier_lowered(&query, item).is_some())
    }
}

/// Test an item or group against `query` with the default matcher.
pub fn matches<'a>(query: &str, candidate: impl Into<Candidate<'a>>) -> bool {
    TieredMatcher.matches(query, candidate.into())
}

/// Tier evaluation with the query already lowercased.
fn tier_lowered(query: &str, item: &Item) -> Option<MatchTier> {
    let label = item.label.to_lowercase();

    if label == query {
        return Some(MatchTier::Exact);
    }
    if label.starts_with(query) {
        return Some(MatchTier::Prefix);
    }
    if label.contains(query) {
        return Some(MatchTier::Substring);
    }
    if item
        .keywords
        .iter()
        .any(|keyword| keyword.to_lowercase().contains(query))
    {
        return Some(MatchTier::Keyword);
    }
    if is_subsequence(query, &label) {
        return Some(MatchTier::Subsequence);
    }
    None
}

/// Greedy left-to-right subsequence test.
///
/// `rest` is the label cursor; `any` consumes up to and including the found
/// character, so each query character is searched strictly after the last.
fn is_subsequence(query: &str, label: &str) -> bool {
    let mut rest = label.chars();
    query.chars().all(|wanted| rest.any(|c| c == wanted))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Group;

    fn tier(query: &str, item: &Item) -> Option<MatchTier> {
        TieredMatcher::new().tier(query, item)
    }

    #[test]
    fn exact_is_case_insensitive() {
        let item = Item::new("1", "Copy");
        assert_eq!(tier("copy", &item), Some(MatchTier::Exact));
        assert_eq!(tier("COPY", &item), Some(MatchTier::Exact));
    }

    #[test]
    fn prefix_beats_substring() {
        let item = Item::new("1", "Open File");
        assert_eq!(tier("open", &item), Some(MatchTier::Prefix));
        assert_eq!(tier("file", &item), Some(MatchTier::Substring));
    }

    #[test]
    fn keyword_only_match() {
        let item = Item::new("1", "Copy").with_keywords(&["duplicate"]);
        assert_eq!(tier("dupl", &item), Some(MatchTier::Keyword));
        assert_eq!(tier("DUPLICATE", &item), Some(MatchTier::Keyword));
    }

    #[test]
    fn keyword_is_compared_lowercased() {
        let item = Item::new("1", "Cut").with_keywords(&["Remove"]);
        assert_eq!(tier("remove", &item), Some(MatchTier::Keyword));
    }

    #[test]
    fn label_tiers_win_over_keywords() {
        let item = Item::new("1", "Delete Line").with_keywords(&["delete"]);
        assert_eq!(tier("delete", &item), Some(MatchTier::Prefix));
    }

    #[test]
    fn subsequence_fallback() {
        let item = Item::new("1", "Toggle Terminal");
        assert_eq!(tier("tgtrm", &item), Some(MatchTier::Subsequence));
        assert_eq!(tier("ogtl", &item), Some(MatchTier::Subsequence));
        assert_eq!(tier("mt", &item), None);
    }

    #[test]
    fn subsequence_respects_order() {
        let item = Item::new("1", "Paste");
        assert_eq!(tier("etp", &item), None);
        assert_eq!(tier("pse", &item), Some(MatchTier::Subsequence));
    }

    #[test]
    fn subsequence_consumes_each_character_once() {
        let item = Item::new("1", "Cap");
        // Only one 'a' in the label; the second must not reuse it.
        assert_eq!(tier("caa", &item), None);
    }

    #[test]
    fn subsequence_ignores_keywords() {
        let item = Item::new("1", "Cut").with_keywords(&["remove"]);
        assert_eq!(tier("rmv", &item), None);
    }

    #[test]
    fn no_match() {
        assert_eq!(tier("xyz123", &Item::new("1", "Copy")), None);
        assert!(!matches("xyz123", &Item::new("1", "Copy")));
    }

    #[test]
    fn empty_query_matches_everything() {
        let disabled = Item::new("1", "Copy").disabled(true);
        assert!(matches("", &disabled));
        let empty_group = Group::new("Nothing", Vec::new());
        assert!(matches("", &empty_group));
        assert_eq!(tier("", &disabled), Some(MatchTier::Prefix));
    }

    #[test]
    fn disabled_items_still_match() {
        let item = Item::new("1", "Copy").disabled(true);
        assert!(matches("cop", &item));
    }

    #[test]
    fn unicode_case_folding() {
        let item = Item::new("1", "Éditer");
        assert_eq!(tier("édi", &item), Some(MatchTier::Prefix));
        assert_eq!(tier("ÉDITER", &item), Some(MatchTier::Exact));
    }

    #[test]
    fn group_matches_when_any_child_matches() {
        let group = Group::new(
            "Edit",
            vec![
                Item::new("a", "Foo").disabled(true),
                Item::new("b", "Bar"),
            ],
        );
        assert!(!matches("baz", &group));
        assert!(matches("bar", &group));
    }

    #[test]
    fn group_label_is_not_matched() {
        let group = Group::new("Settings", vec![Item::new("a", "Profile")]);
        assert!(!matches("settings", &group));
    }

    #[test]
    fn closure_filter() {
        let only_exact = |query: &str, item: &Item| item.label == query;
        let group = Group::new("G", vec![Item::new("a", "Alpha"), Item::new("b", "Beta")]);
        assert!(only_exact.matches("Beta", Candidate::Group(&group)));
        assert!(!only_exact.matches("beta", Candidate::Group(&group)));
        assert!(only_exact.matches_item("Alpha", &group.items[0]));
    }

    #[test]
    fn predicate_agrees_with_per_item_matching() {
        let items = [
            Item::new("1", "Copy").with_keywords(&["duplicate"]),
            Item::new("2", "Paste"),
            Item::new("3", "Éditer"),
        ];
        let matcher = TieredMatcher::new();
        for query in ["", "COPY", "pa", "DUP", "édi", "cpy", "zzz"] {
            let visible = matcher.predicate(query);
            for item in &items {
                assert_eq!(
                    visible(item),
                    matcher.matches_item(query, item),
                    "query {query:?} on {}",
                    item.label
                );
            }
        }
    }

    #[test]
    fn closure_predicate_delegates() {
        let starts_with = |query: &str, item: &Item| item.label.starts_with(query);
        let visible = starts_with.predicate("Co");
        assert!(visible(&Item::new("1", "Copy")));
        assert!(!visible(&Item::new("2", "Paste")));
    }

    #[test]
    fn tiers_listed_in_evaluation_order() {
        let mut sorted = MatchTier::ALL;
        sorted.sort();
        assert_eq!(sorted, MatchTier::ALL);
        assert_eq!(MatchTier::Keyword.description(), "keyword match");
    }
}
