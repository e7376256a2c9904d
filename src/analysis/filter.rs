use serde::Serialize;

use crate::analysis::distinct;
use crate::models::Record;

/// Number of matching records handed to the renderer.
pub const DISPLAY_LIMIT: usize = 200;

/// Equality-or-any predicate on one categorical column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    All,
    Only(String)
}

impl Selection {
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(expected) => expected == value
        }
    }
}

impl From<Option<String>> for Selection {
    fn from(value: Option<String>) -> Self {
        value.map_or(Selection::All, Selection::Only)
    }
}

/// The user-selected predicates applied to the loaded records.
///
/// Defaults to fraud-only with every category and card type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionFilter {
    pub fraud_only: bool,
    pub category: Selection,
    pub card_type: Selection
}

impl Default for TransactionFilter {
    fn default() -> Self {
        Self {
            fraud_only: true,
            category: Selection::All,
            card_type: Selection::All
        }
    }
}

impl TransactionFilter {
    pub fn matches(&self, record: &Record) -> bool {
        if self.fraud_only && !record.is_fraudulent() {
            return false;
        }

        self.category.matches(record.purchase_category()) && self.card_type.matches(record.card_type())
    }

    pub fn apply<'a>(&self, records: &'a [Record]) -> FilteredView<'a> {
        FilteredView {
            matches: records.iter().filter(|record| self.matches(record)).collect()
        }
    }
}

/// Records that passed a filter, in their original order.
#[derive(Debug)]
pub struct FilteredView<'a> {
    matches: Vec<&'a Record>
}

impl<'a> FilteredView<'a> {
    pub fn total_matches(&self) -> usize {
        self.matches.len()
    }

    /// The first [`DISPLAY_LIMIT`] matches.
    pub fn displayed(&self) -> &[&'a Record] {
        &self.matches[..self.matches.len().min(DISPLAY_LIMIT)]
    }

    pub fn is_truncated(&self) -> bool {
        self.matches.len() > DISPLAY_LIMIT
    }
}

/// Values offered in the category and card type pickers, taken from every loaded record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub categories: Vec<String>,
    pub card_types: Vec<String>
}

impl FilterOptions {
    pub fn collect(records: &[Record]) -> Self {
        Self {
            categories: distinct(records.iter().map(Record::purchase_category)),
            card_types: distinct(records.iter().map(Record::card_type))
        }
    }
}
