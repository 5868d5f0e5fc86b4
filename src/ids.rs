// src/ids.rs
// The ordered id list that seeds a pull: `(id, short description)` pairs,
// usually a header-less two-column CSV produced by the ranking crawler.

use std::collections::HashMap;
use std::{fs, path::Path};

use crate::core::sanitize::short_text_or_placeholder;
use crate::csv::parse_rows;
use crate::error::PullError;
use crate::pull::BatchWindow;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdEntry {
    pub id: String,
    pub short_text: String,
}

#[derive(Clone, Debug, Default)]
pub struct IdList {
    entries: Vec<IdEntry>,
    lookup: HashMap<String, usize>,
}

impl IdList {
    /// Blank short texts become the placeholder. If an id repeats, lookups
    /// see its first short text; the position is still pulled again.
    pub fn new<I, A, B>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<String>,
        B: AsRef<str>,
    {
        let mut list = IdList::default();
        for (id, text) in pairs {
            let id: String = id.into();
            list.lookup.entry(id.clone()).or_insert(list.entries.len());
            list.entries.push(IdEntry { id, short_text: short_text_or_placeholder(text.as_ref()) });
        }
        list
    }

    pub fn from_csv_str(text: &str) -> Result<Self, PullError> {
        let mut pairs = Vec::new();
        for (i, row) in parse_rows(text, ',').into_iter().enumerate() {
            let id = row.first().map(|s| s.trim()).unwrap_or("");
            if id.is_empty() {
                return Err(PullError::Ids(format!("row {} has no id", i + 1)));
            }
            let text = row.get(1).cloned().unwrap_or_default();
            pairs.push((s!(id), text));
        }
        Ok(Self::new(pairs))
    }

    pub fn load(path: &Path) -> Result<Self, PullError> {
        let text = fs::read_to_string(path)?;
        Self::from_csv_str(&text)
    }

    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
    pub fn entries(&self) -> &[IdEntry] { &self.entries }

    pub fn short_text(&self, id: &str) -> Option<&str> {
        self.lookup.get(id).map(|&i| self.entries[i].short_text.as_str())
    }

    /// Ids covered by `window`, in list order. Empty if the window reaches
    /// past the end of the list.
    pub fn ids_in(&self, window: &BatchWindow) -> Vec<&str> {
        window
            .slice(&self.entries)
            .unwrap_or_default()
            .iter()
            .map(|e| e.id.as_str())
            .collect()
    }
}
