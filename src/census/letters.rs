// src/census/letters.rs
// =============================================================================
// The letter-frequency table and the pure counting function that feeds it.
//
// A character counts when `char::is_alphabetic` says so, which covers every
// script (Latin, Greek, Cyrillic, CJK, ...). Each letter is case-folded with
// `to_lowercase` before it is counted. Digits, punctuation, whitespace and
// symbols are ignored. There is no Unicode normalization beyond that.
// =============================================================================

use serde::Serialize;
use std::collections::HashMap;

/// Case-folded letter -> number of occurrences
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LetterTable {
    counts: HashMap<char, u64>,
}

/// One row of the final report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LetterCount {
    pub letter: char,
    pub count: u64,
}

impl LetterTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// How often `letter` was seen (0 if never)
    pub fn get(&self, letter: char) -> u64 {
        self.counts.get(&letter).copied().unwrap_or(0)
    }

    /// Number of distinct letters
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Entries ordered by descending count, ties broken by ascending letter
    pub fn sorted(&self) -> Vec<LetterCount> {
        let mut rows: Vec<LetterCount> = self
            .counts
            .iter()
            .map(|(&letter, &count)| LetterCount { letter, count })
            .collect();

        rows.sort_by(|a, b| b.count.cmp(&a.count).then(a.letter.cmp(&b.letter)));
        rows
    }

    fn bump(&mut self, letter: char) {
        *self.counts.entry(letter).or_insert(0) += 1;
    }
}

/// Adds every letter of `text` to `table`
///
/// Some letters lowercase to more than one char ('İ' becomes "i\u{307}");
/// only the first char of the mapping is counted, so every alphabetic
/// character adds exactly one to the table.
pub fn count_letters(text: &str, table: &mut LetterTable) {
    for ch in text.chars().filter(|c| c.is_alphabetic()) {
        let lower = ch.to_lowercase().next().unwrap_or(ch);
        table.bump(lower);
    }
}
