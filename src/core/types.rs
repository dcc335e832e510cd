// src/core/types.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest dot number on a six-dot braille cell.
pub const MAX_DOT: u8 = 6;

/// The set of raised dots for one braille cell.
///
/// Stored as a bitmask where dot `n` is bit `n - 1`. This is the same bit
/// layout as the Unicode braille block, so the mask doubles as the canonical
/// sorted form used for trie edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DotSet(u8);

impl DotSet {
    /// The empty cell, which denotes a space.
    pub const EMPTY: DotSet = DotSet(0);

    /// Builds a dot-set from dot numbers, ignoring anything outside 1..=6.
    pub fn from_dots(dots: &[u8]) -> Self {
        let mut set = Self::EMPTY;
        for &dot in dots {
            set.insert(dot);
        }
        set
    }

    /// Raises `dot`. Returns `false` if the dot number is out of range.
    pub fn insert(&mut self, dot: u8) -> bool {
        if dot == 0 || dot > MAX_DOT {
            return false;
        }
        self.0 |= 1 << (dot - 1);
        true
    }

    pub fn contains(&self, dot: u8) -> bool {
        (1..=MAX_DOT).contains(&dot) && self.0 & (1 << (dot - 1)) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn intersection(&self, other: &DotSet) -> DotSet {
        DotSet(self.0 & other.0)
    }

    pub fn union(&self, other: &DotSet) -> DotSet {
        DotSet(self.0 | other.0)
    }

    /// Raised dots in ascending order.
    pub fn dots(&self) -> impl Iterator<Item = u8> + '_ {
        (1..=MAX_DOT).filter(move |&dot| self.contains(dot))
    }

    /// The Unicode braille cell for this dot-set.
    pub fn to_braille_char(&self) -> char {
        char::from_u32(0x2800 + self.0 as u32).unwrap_or('\u{2800}')
    }

    /// Every possible six-dot cell, empty first.
    #[cfg(test)]
    pub fn all() -> impl Iterator<Item = DotSet> {
        (0u8..64).map(DotSet)
    }
}

impl fmt::Display for DotSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_braille_char())
    }
}

/// A ranked correction candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub word: String,
    pub score: f64,
}

impl Suggestion {
    pub fn new(word: impl Into<String>, score: f64) -> Self {
        Self { word: word.into(), score }
    }
}

/// Snapshot of engine bookkeeping, printed by the REPL on exit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EngineStats {
    pub dictionary_size: usize,
    pub cache_size: usize,
    pub learned_corrections: usize,
    pub total_word_frequency: u64,
    pub fuzzy_searches: u64,
}
