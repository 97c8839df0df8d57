//! Collapse records by company number, first occurrence wins.

use std::collections::HashSet;

/// Tracks company numbers already admitted to the candidate set.
#[derive(Debug, Default)]
pub struct Deduplicator {
    seen: HashSet<String>,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// True the first time a non-blank number is offered, false afterwards.
    pub fn admit(&mut self, company_number: &str) -> bool {
        let key = company_number.trim();
        if key.is_empty() {
            return false;
        }
        self.seen.insert(key.to_string())
    }
}

/// Keeps the first item for each key, preserving input order.
pub fn dedupe<T, F>(items: impl IntoIterator<Item = T>, key: F) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    let mut seen = Deduplicator::new();
    items
        .into_iter()
        .filter(|item| seen.admit(key(item)))
        .collect()
}
