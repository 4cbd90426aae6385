#![forbid(unsafe_code)]

//! Item list validation errors.
//!
//! The engine itself never fails: every command is total. These errors are
//! for hosts that want to check an [`ItemList`](crate::ItemList) before
//! handing it over.

use std::fmt;

/// Reasons an item list is rejected by [`ItemList::validate`](crate::ItemList::validate).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListError {
    /// An item has an empty id.
    EmptyId {
        /// Label of the offending item.
        label: String,
    },
    /// An item has an empty label.
    EmptyLabel {
        /// Id of the offending item.
        id: String,
    },
    /// Two items share an id.
    DuplicateId {
        /// The repeated id.
        id: String,
    },
}

impl fmt::Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId { label } => write!(f, "item {label:?} has an empty id"),
            Self::EmptyLabel { id } => write!(f, "item {id:?} has an empty label"),
            Self::DuplicateId { id } => write!(f, "duplicate item id {id:?}"),
        }
    }
}

impl std::error::Error for ListError {}
