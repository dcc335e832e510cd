// File: src/core/ranking.rs
use crate::config::{EngineConfig, DEFAULT_FREQUENCY_CAP, DEFAULT_FREQUENCY_WEIGHT};
use crate::core::dictionary::Dictionary;
use crate::core::types::Suggestion;
use crate::fuzzy::search::SearchHit;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Blends edit confidence with word frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ranker {
    frequency_weight: f64,
    frequency_cap: u64,
}

impl Default for Ranker {
    fn default() -> Self {
        Self { frequency_weight: DEFAULT_FREQUENCY_WEIGHT, frequency_cap: DEFAULT_FREQUENCY_CAP }
    }
}

impl Ranker {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self { frequency_weight: config.frequency_weight, frequency_cap: config.frequency_cap }
    }

    /// `confidence * (1 + weight * min(frequency, cap))`
    pub fn score(&self, confidence: f64, frequency: u64) -> f64 {
        confidence * (1.0 + self.frequency_weight * frequency.min(self.frequency_cap) as f64)
    }

    /// Scores hits against the dictionary's counts (1 for unknown words)
    /// and orders them best first, ties broken alphabetically.
    pub fn rank(&self, hits: &[SearchHit], dictionary: &Dictionary) -> Vec<Suggestion> {
        let mut ranked: Vec<Suggestion> = hits
            .iter()
            .map(|hit| {
                let frequency = dictionary.frequency(&hit.word).unwrap_or(1);
                Suggestion::new(hit.word.clone(), self.score(hit.confidence, frequency))
            })
            .collect();
        ranked.sort_by(compare_suggestions);
        ranked
    }
}

fn compare_suggestions(a: &Suggestion, b: &Suggestion) -> Ordering {
    b.score
        .partial_cmp(&a.score)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.word.cmp(&b.word))
}

/// Ranked results memoized by normalized input.
#[derive(Debug, Clone, Default)]
pub struct SuggestionCache {
    entries: HashMap<String, Vec<Suggestion>>,
}

impl SuggestionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Vec<Suggestion>> {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: String, suggestions: Vec<Suggestion>) {
        self.entries.insert(key, suggestions);
    }

    /// Returns `true` if an entry was dropped.
    pub fn invalidate(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
