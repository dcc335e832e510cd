// File: src/fuzzy/search.rs
use crate::config::{DEFAULT_ACCEPTANCE_THRESHOLD, DEFAULT_NEAR_MATCH_THRESHOLD};
use crate::core::trie::{NodeId, PatternTrie};
use crate::core::types::DotSet;
use std::collections::HashMap;
use tracing::debug;

/// Edit budget used when no explicit parameters are given.
pub const DEFAULT_SEARCH_DISTANCE: usize = 2;

/// A dictionary word reached within the edit budget.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub word: String,
    pub distance: usize,
    pub confidence: f64,
}

impl SearchHit {
    pub fn new(word: impl Into<String>, distance: usize) -> Self {
        Self { word: word.into(), distance, confidence: confidence_for(distance) }
    }
}

/// `1 / (1 + cost)`: 1.0 for an exact match, falling with edit distance.
pub fn confidence_for(distance: usize) -> f64 {
    1.0 / (1.0 + distance as f64)
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    pub max_distance: usize,
    pub acceptance_threshold: f64,
    pub near_match_threshold: f64,
    pub max_steps: Option<usize>,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            max_distance: DEFAULT_SEARCH_DISTANCE,
            acceptance_threshold: DEFAULT_ACCEPTANCE_THRESHOLD,
            near_match_threshold: DEFAULT_NEAR_MATCH_THRESHOLD,
            max_steps: None,
        }
    }
}

/// Jaccard similarity of two cells; two empty cells are identical.
pub fn pattern_similarity(a: DotSet, b: DotSet) -> f64 {
    if a == b {
        return 1.0;
    }
    let union = a.union(&b).len();
    if union == 0 {
        return 1.0;
    }
    a.intersection(&b).len() as f64 / union as f64
}

/// Exhaustive bounded DFS over the trie, tolerating substituted, missing
/// and extra cells. Returns at most one hit per word (its cheapest path),
/// sorted by distance then word.
pub fn fuzzy_search(trie: &PatternTrie, input: &[DotSet], params: &SearchParams) -> Vec<SearchHit> {
    let mut search = FuzzySearch {
        trie,
        input,
        params,
        best: HashMap::new(),
        steps: 0,
        exhausted: false,
    };
    search.visit(PatternTrie::ROOT, 0, 0);

    debug!(
        input_len = input.len(),
        steps = search.steps,
        hits = search.best.len(),
        exhausted = search.exhausted,
        "fuzzy search finished"
    );

    let mut hits: Vec<SearchHit> = search
        .best
        .into_iter()
        .map(|(word, distance)| SearchHit::new(word, distance))
        .collect();
    hits.sort_by(|a, b| a.distance.cmp(&b.distance).then_with(|| a.word.cmp(&b.word)));
    hits
}

struct FuzzySearch<'a> {
    trie: &'a PatternTrie,
    input: &'a [DotSet],
    params: &'a SearchParams,
    /// word -> lowest distance seen
    best: HashMap<String, usize>,
    steps: usize,
    exhausted: bool,
}

impl FuzzySearch<'_> {
    fn visit(&mut self, node: NodeId, idx: usize, distance: usize) {
        if self.exhausted {
            return;
        }
        if let Some(limit) = self.params.max_steps {
            if self.steps >= limit {
                self.exhausted = true;
                return;
            }
        }
        self.steps += 1;

        let trie = self.trie;
        if idx >= self.input.len() {
            if let Some(terminal) = trie.terminal(node) {
                self.record(&terminal.word, distance);
            }
            return;
        }

        let max = self.params.max_distance;
        if distance > max {
            return;
        }

        let current = self.input[idx];
        let children: Vec<(DotSet, NodeId)> = trie.children(node).collect();

        for &(pattern, child) in &children {
            if pattern == current {
                self.visit(child, idx + 1, distance);
            } else if distance < max {
                let similarity = pattern_similarity(pattern, current);
                if similarity > self.params.acceptance_threshold {
                    let cost = if similarity < self.params.near_match_threshold { 1 } else { 0 };
                    self.visit(child, idx + 1, distance + cost);
                }
            }
        }

        if distance < max {
            // Deletion: the typed cell has no counterpart in the word.
            self.visit(node, idx + 1, distance + 1);

            // Insertion: the word has a cell the user never typed.
            for &(_, child) in &children {
                self.visit(child, idx, distance + 1);
            }
        }
    }

    fn record(&mut self, word: &str, distance: usize) {
        match self.best.get_mut(word) {
            Some(best) => *best = (*best).min(distance),
            None => {
                self.best.insert(word.to_string(), distance);
            }
        }
    }
}
