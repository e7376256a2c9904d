mod filter;
mod statistics;

pub use filter::{FilterOptions, FilteredView, Selection, TransactionFilter, DISPLAY_LIMIT};
pub use statistics::FraudStatistics;

use std::collections::HashSet;

/// Collects the distinct values in first-seen order.
fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();

    values.filter(|value| seen.insert(*value))
        .map(str::to_string)
        .collect()
}
