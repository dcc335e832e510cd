// File: src/learning.rs
use crate::config::DEFAULT_CORRECTION_BOOST;
use crate::core::dictionary::{normalize, Dictionary};
use crate::core::ranking::SuggestionCache;
use std::collections::BTreeMap;
use tracing::debug;

/// Normalized raw input -> words the user confirmed for it, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorrectionLog {
    entries: BTreeMap<String, Vec<String>>,
}

impl CorrectionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, input: String, word: String) {
        self.entries.entry(input).or_default().push(word);
    }

    pub fn corrections_for(&self, input: &str) -> &[String] {
        self.entries.get(input).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct inputs with at least one correction.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn as_map(&self) -> &BTreeMap<String, Vec<String>> {
        &self.entries
    }
}

impl From<BTreeMap<String, Vec<String>>> for CorrectionLog {
    fn from(entries: BTreeMap<String, Vec<String>>) -> Self {
        Self { entries }
    }
}

pub struct LearningEngine {
    frequency_increment: u64,
}

impl Default for LearningEngine {
    fn default() -> Self {
        Self::new(DEFAULT_CORRECTION_BOOST)
    }
}

pub struct WordConfirmation {
    pub original_input: String,
    pub corrected_word: String,
}

impl LearningEngine {
    pub fn new(frequency_increment: u64) -> Self {
        Self { frequency_increment }
    }

    /// Records the correction, boosts the word and drops the stale cache
    /// entry. Returns `false` when either side is blank.
    pub fn learn(
        &self,
        dictionary: &mut Dictionary,
        log: &mut CorrectionLog,
        cache: &mut SuggestionCache,
        confirmation: &WordConfirmation,
    ) -> bool {
        let input = normalize(&confirmation.original_input);
        let word = normalize(&confirmation.corrected_word);
        if input.is_empty() || word.is_empty() {
            return false;
        }

        log.record(input.clone(), word.clone());

        let boosted = dictionary.boost_frequency(&word, self.frequency_increment);
        if !dictionary.contains(&word) {
            dictionary.insert_with_frequency(&word, boosted);
        }

        let invalidated = cache.invalidate(&input);
        debug!(%input, %word, frequency = boosted, invalidated, "learned correction");
        true
    }
}
