// src/counters.rs
use std::collections::HashMap;

use crate::record::GameRecord;

/// Label → occurrence count, remembering the order labels first showed up.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    entries: Vec<(String, u64)>,
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self { Self::default() }

    pub fn increment(&mut self, label: &str) {
        match self.index.get(label) {
            Some(&i) => self.entries[i].1 += 1,
            None => {
                self.index.insert(s!(label), self.entries.len());
                self.entries.push((s!(label), 1));
            }
        }
    }

    pub fn count(&self, label: &str) -> u64 {
        self.index.get(label).map_or(0, |&i| self.entries[i].1)
    }

    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Labels in first-seen order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(l, _)| l.as_str())
    }

    /// `(label, count)` in first-seen order.
    pub fn snapshot(&self) -> &[(String, u64)] {
        &self.entries
    }

    /// The `n` most frequent labels, skipping `exclude`.
    /// Equal counts keep first-seen order, so repeated calls agree.
    pub fn top(&self, n: usize, exclude: &[&str]) -> Vec<String> {
        let mut ranked: Vec<&(String, u64)> = self
            .entries
            .iter()
            .filter(|(l, _)| !exclude.contains(&l.as_str()))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1)); // stable
        ranked.into_iter().take(n).map(|(l, _)| l.clone()).collect()
    }
}

/// The three tables one pull keeps.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Counters {
    pub types: FrequencyTable,
    pub categories: FrequencyTable,
    pub mechanics: FrequencyTable,
}

impl Counters {
    pub fn new() -> Self { Self::default() }

    /// Count one accepted record. Repeated type, category and mechanic
    /// labels on the same record count every time they appear.
    pub fn absorb(&mut self, rec: &GameRecord) {
        for label in &rec.rank_labels {
            self.types.increment(label);
        }
        for c in &rec.categories {
            self.categories.increment(c);
        }
        for m in &rec.mechanics {
            self.mechanics.increment(m);
        }
    }
}
