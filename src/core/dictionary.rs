use crate::core::converter::BrailleCodec;
use crate::core::trie::PatternTrie;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Words seeded into a fresh engine. Repeats count twice.
pub const DEFAULT_WORDS: &[&str] = &[
    "THE", "AND", "FOR", "ARE", "BUT", "NOT", "YOU", "ALL", "CAN", "HER", "WAS", "ONE",
    "OUR", "OUT", "DAY", "HAD", "HAS", "HIS", "HOW", "ITS", "NEW", "NOW", "OLD", "SEE",
    "TWO", "WHO", "BOY", "DID", "GET", "HIM", "OWN", "SAY", "SHE", "TOO", "USE", "WAY",
    "WORK", "MAKE", "TAKE", "COME", "GIVE", "GOOD", "LONG", "MANY", "OVER", "SUCH", "TIME",
    "VERY", "WELL", "YEAR", "BACK", "CALL", "CAME", "EACH", "FIND", "HAND", "HIGH", "KEEP",
    "KIND", "LAST", "LEFT", "LIFE", "LIVE", "LOOK", "MADE", "MOVE", "MUCH", "NAME", "NEED",
    "NEXT", "OPEN", "PART", "PLAY", "RIGHT", "SAID", "SAME", "SEEM", "SHOW", "SIDE", "TELL",
    "TURN", "WANT", "WAYS", "WEEK", "WENT", "WERE", "WHAT", "WHEN", "WITH", "WORD", "WORLD",
    "WRITE", "WOULD", "YEARS", "YOUNG", "ABOUT", "AFTER", "AGAIN", "ALONG", "BEING", "COULD",
    "EVERY", "FIRST", "FOUND", "GREAT", "GROUP", "HOUSE", "LARGE", "LIGHT", "MIGHT", "NEVER",
    "OTHER", "PLACE", "POINT", "SMALL", "SOUND", "STILL", "THINK", "THOSE", "THREE", "WATER",
    "WHERE", "WHILE", "WORDS", "WRITE", "HELLO", "WORLD", "BRAILLE", "COMPUTER", "KEYBOARD",
];

/// Input for [`Dictionary::bulk_load`].
///
/// The JSON form is either an array of words or an object of
/// word -> frequency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DictionarySource {
    SeedList(Vec<String>),
    SeedFrequencies(BTreeMap<String, u64>),
}

impl DictionarySource {
    pub fn default_seed() -> Self {
        DictionarySource::SeedList(DEFAULT_WORDS.iter().map(|w| w.to_string()).collect())
    }
}

/// Normalized form shared by dictionary words, cache keys and log keys.
pub fn normalize(input: &str) -> String {
    input.trim().to_uppercase()
}

/// The word set, its frequency table and the pattern trie, kept in step.
///
/// Frequency rule: [`add_word`](Self::add_word) counts one more occurrence,
/// [`insert_with_frequency`](Self::insert_with_frequency) sets the count
/// outright. Stored frequencies are never below 1.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    codec: BrailleCodec,
    words: HashSet<String>,
    frequencies: HashMap<String, u64>,
    trie: PatternTrie,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_words() -> Self {
        let mut dictionary = Self::new();
        dictionary.bulk_load(DictionarySource::default_seed());
        dictionary
    }

    /// Inserts `word` counting one more occurrence. Returns the stored
    /// frequency, or `None` for a blank word.
    pub fn add_word(&mut self, word: &str) -> Option<u64> {
        let word = normalize(word);
        if word.is_empty() {
            return None;
        }
        let frequency = self.frequencies.get(&word).copied().unwrap_or(0).saturating_add(1);
        Some(self.store(word, frequency))
    }

    /// Inserts `word` with an explicit frequency, replacing any earlier one.
    pub fn insert_with_frequency(&mut self, word: &str, frequency: u64) -> Option<u64> {
        let word = normalize(word);
        if word.is_empty() {
            return None;
        }
        Some(self.store(word, frequency.max(1)))
    }

    fn store(&mut self, word: String, frequency: u64) -> u64 {
        let patterns = self.codec.word_to_patterns(&word);
        self.trie.insert(&patterns, &word, frequency);
        self.frequencies.insert(word.clone(), frequency);
        self.words.insert(word);
        frequency
    }

    /// Returns the number of words inserted.
    pub fn bulk_load(&mut self, source: DictionarySource) -> usize {
        match source {
            DictionarySource::SeedList(words) => {
                words.iter().filter_map(|word| self.add_word(word)).count()
            }
            DictionarySource::SeedFrequencies(entries) => entries
                .iter()
                .filter_map(|(word, &frequency)| self.insert_with_frequency(word, frequency))
                .count(),
        }
    }

    /// Adds `amount` to a word's count, starting from 0 for unknown words.
    /// Counts saturate at `u64::MAX`.
    /// The word is not added to the dictionary; known words have their trie
    /// payload refreshed.
    pub fn boost_frequency(&mut self, word: &str, amount: u64) -> u64 {
        let word = normalize(word);
        let entry = self.frequencies.entry(word.clone()).or_insert(0);
        *entry = entry.saturating_add(amount);
        let frequency = *entry;
        if self.words.contains(&word) {
            let patterns = self.codec.word_to_patterns(&word);
            self.trie.set_frequency(&patterns, frequency);
        }
        frequency
    }

    /// Overwrites counts from a restored table. Words not yet in the
    /// dictionary are inserted.
    pub fn merge_frequencies(&mut self, table: &BTreeMap<String, u64>) {
        for (word, &frequency) in table {
            self.insert_with_frequency(word, frequency);
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn frequency(&self, word: &str) -> Option<u64> {
        self.frequencies.get(word).copied()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Saturating sum of every count.
    pub fn total_frequency(&self) -> u64 {
        self.frequencies.values().fold(0u64, |total, &f| total.saturating_add(f))
    }

    pub fn trie(&self) -> &PatternTrie {
        &self.trie
    }

    pub fn codec(&self) -> &BrailleCodec {
        &self.codec
    }

    #[cfg(test)]
    pub fn patterns_for(&self, word: &str) -> Vec<crate::core::types::DotSet> {
        self.codec.word_to_patterns(word)
    }

    /// The frequency table, sorted by word.
    pub fn serialize(&self) -> BTreeMap<String, u64> {
        self.frequencies.iter().map(|(w, &f)| (w.clone(), f)).collect()
    }

    pub fn clear(&mut self) {
        self.words.clear();
        self.frequencies.clear();
        self.trie.clear();
    }
}
