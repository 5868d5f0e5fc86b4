// src/core/sanitize.rs
use std::sync::LazyLock;

use regex::Regex;

use crate::config::consts::NO_DESCRIPTION;

// Unicode-aware: letters, marks, digits and connector punctuation survive.
static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\W").unwrap());

/// Comparison key for game names: trimmed, uppercased, non-word characters dropped.
/// "Ticket to Ride: Europe" → "TICKETTORIDEEUROPE"
pub fn canonical_name(name: &str) -> String {
    NON_WORD.replace_all(&name.trim().to_uppercase(), "").into_owned()
}

/// Short descriptions come from a scraped listing and are often blank.
pub fn short_text_or_placeholder(s: &str) -> String {
    let t = s.trim();
    if t.is_empty() { s!(NO_DESCRIPTION) } else { s!(t) }
}

/// Image URLs arrive padded with the newlines/tabs of the surrounding markup.
pub fn trim_markup_padding(s: &str) -> String {
    s.trim_matches(|c| c == '\n' || c == '\t' || c == '\r' || c == ' ').to_string()
}
