//! Word-frequency extraction for the meeting chart.

use crate::defaults;
use std::collections::HashMap;

/// Count the most frequent substantive words in `text`.
///
/// Words are lowercased and split on non-alphanumeric boundaries; words of
/// [`defaults::MIN_WORD_LEN`] characters or fewer are ignored. Returns up
/// to `top` entries sorted by descending count, ties broken alphabetically
/// so output is deterministic.
pub fn word_frequencies(text: &str, top: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for word in text
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.len() > defaults::MIN_WORD_LEN)
    {
        *counts.entry(word.to_string()).or_insert(0) += 1;
    }

    let mut entries: Vec<(String, usize)> = counts.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries.truncate(top);
    entries
}
