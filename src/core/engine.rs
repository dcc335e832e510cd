use crate::config::EngineConfig;
use crate::core::dictionary::{normalize, Dictionary, DictionarySource};
use crate::core::ranking::{Ranker, SuggestionCache};
use crate::core::types::{DotSet, EngineStats, Suggestion};
use crate::error::{AutocorrectError, Result};
use crate::fuzzy::search::{fuzzy_search, SearchHit, SearchParams};
use crate::learning::{CorrectionLog, LearningEngine, WordConfirmation};
use crate::persistence::{self, LearningData};
use std::path::Path;
use tracing::{debug, info, warn};

/// Outcome of loading a dictionary file.
#[derive(Debug)]
pub enum LoadStatus {
    Loaded { words: usize },
    /// The file could not be used; the default words were loaded instead.
    SeedFallback { reason: AutocorrectError },
}

/// Owns every table the suggestion and learning paths touch.
pub struct AutocorrectEngine {
    pub dictionary: Dictionary,
    corrections: CorrectionLog,
    cache: SuggestionCache,
    ranker: Ranker,
    learning_engine: LearningEngine,
    config: EngineConfig,
    fuzzy_searches: u64,
}

impl Default for AutocorrectEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AutocorrectEngine {
    /// An engine seeded with the default word list.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let mut engine = Self::empty(config);
        engine.dictionary = Dictionary::with_default_words();
        engine
    }

    /// An engine with no words at all.
    pub fn empty(config: EngineConfig) -> Self {
        Self {
            dictionary: Dictionary::new(),
            corrections: CorrectionLog::new(),
            cache: SuggestionCache::new(),
            ranker: Ranker::from_config(&config),
            learning_engine: LearningEngine::new(config.correction_boost),
            config,
            fuzzy_searches: 0,
        }
    }

    /// Loads `path` when it exists, otherwise seeds the default words.
    pub fn from_dictionary_file(path: &Path, config: EngineConfig) -> (Self, LoadStatus) {
        let mut engine = Self::empty(config);
        let status = if path.exists() {
            engine.load_dictionary_file(path)
        } else {
            let words = engine.dictionary.bulk_load(DictionarySource::default_seed());
            LoadStatus::Loaded { words }
        };
        (engine, status)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn corrections(&self) -> &CorrectionLog {
        &self.corrections
    }

    pub fn add_word(&mut self, word: &str) -> Option<u64> {
        self.dictionary.add_word(word)
    }

    pub fn insert_with_frequency(&mut self, word: &str, frequency: u64) -> Option<u64> {
        self.dictionary.insert_with_frequency(word, frequency)
    }

    pub fn bulk_load(&mut self, source: DictionarySource) -> usize {
        self.dictionary.bulk_load(source)
    }

    /// Bulk-loads a JSON dictionary. On any failure the default words are
    /// loaded instead; nothing from the bad file is inserted.
    pub fn load_dictionary_file(&mut self, path: &Path) -> LoadStatus {
        match persistence::load_dictionary_source(path) {
            Ok(source) => {
                let words = self.dictionary.bulk_load(source);
                info!(path = %path.display(), words, "loaded dictionary");
                LoadStatus::Loaded { words }
            }
            Err(reason) => {
                warn!(path = %path.display(), error = %reason, "dictionary unusable, loading default words");
                self.dictionary.bulk_load(DictionarySource::default_seed());
                LoadStatus::SeedFallback { reason }
            }
        }
    }

    pub fn save_dictionary_file(&self, path: &Path) -> Result<()> {
        persistence::save_dictionary(&self.dictionary.serialize(), path)?;
        info!(path = %path.display(), words = self.dictionary.len(), "saved dictionary");
        Ok(())
    }

    /// Ranked corrections for a line of chord tokens such as `"DW DKO"`.
    ///
    /// The cache keeps the full ranked list for an input and each call
    /// truncates its own copy to `max_results`, so a narrow query never
    /// shortens a later wider one. Entries are not truncated before caching.
    pub fn get_suggestions(&mut self, raw_input: &str, max_results: usize) -> Vec<Suggestion> {
        let cache_key = normalize(raw_input);
        if let Some(cached) = self.cache.get(&cache_key) {
            debug!(input = %cache_key, "suggestion cache hit");
            return cached.iter().take(max_results).cloned().collect();
        }

        let codec = *self.dictionary.codec();
        let patterns: Vec<DotSet> = raw_input.split_whitespace().map(|t| codec.encode_chord(t)).collect();
        if patterns.is_empty() {
            return Vec::new();
        }

        let word_attempt = codec.patterns_to_word(&patterns);
        let ranked = if self.dictionary.contains(&word_attempt) {
            debug!(input = %cache_key, word = %word_attempt, "exact match");
            vec![Suggestion::new(word_attempt, 1.0)]
        } else {
            let hits = self.collect_hits(&cache_key, &patterns);
            self.ranker.rank(&hits, &self.dictionary)
        };

        let result = ranked.iter().take(max_results).cloned().collect();
        self.cache.insert(cache_key, ranked);
        result
    }

    fn collect_hits(&mut self, cache_key: &str, patterns: &[DotSet]) -> Vec<SearchHit> {
        let params = SearchParams {
            max_distance: self.config.max_edit_distance,
            acceptance_threshold: self.config.acceptance_threshold,
            near_match_threshold: self.config.near_match_threshold,
            max_steps: self.config.max_search_steps,
        };
        self.fuzzy_searches += 1;
        let mut hits = fuzzy_search(self.dictionary.trie(), patterns, &params);

        if self.config.recall_corrections {
            for word in self.corrections.corrections_for(cache_key) {
                if self.dictionary.contains(word) && !hits.iter().any(|h| &h.word == word) {
                    hits.push(SearchHit::new(word.clone(), params.max_distance));
                }
            }
        }
        hits
    }

    /// Returns `false` if either side is blank and nothing was learned.
    pub fn learn_correction(&mut self, original_input: &str, corrected_word: &str) -> bool {
        let confirmation = WordConfirmation {
            original_input: original_input.to_string(),
            corrected_word: corrected_word.to_string(),
        };
        self.learning_engine.learn(
            &mut self.dictionary,
            &mut self.corrections,
            &mut self.cache,
            &confirmation,
        )
    }

    pub fn learning_data(&self) -> LearningData {
        LearningData {
            user_corrections: self.corrections.as_map().clone(),
            word_frequencies: self.dictionary.serialize(),
        }
    }

    pub fn save_learning_data(&self, path: &Path) -> Result<()> {
        persistence::save_learning_data(&self.learning_data(), path)?;
        info!(path = %path.display(), corrections = self.corrections.len(), "saved learning data");
        Ok(())
    }

    /// Restores saved learning data. On failure the current state is kept.
    pub fn load_learning_data(&mut self, path: &Path) -> Result<()> {
        let data = match persistence::load_learning_data(path) {
            Ok(data) => data,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not load learning data");
                return Err(e);
            }
        };
        self.apply_learning_data(data);
        info!(path = %path.display(), corrections = self.corrections.len(), "loaded learning data");
        Ok(())
    }

    pub fn apply_learning_data(&mut self, data: LearningData) {
        self.dictionary.merge_frequencies(&data.word_frequencies);
        self.corrections = CorrectionLog::from(data.user_corrections);
        self.cache.clear();
    }

    /// Drops every word, correction and cached result.
    pub fn reset(&mut self) {
        self.dictionary.clear();
        self.corrections = CorrectionLog::new();
        self.cache.clear();
    }

    pub fn statistics(&self) -> EngineStats {
        EngineStats {
            dictionary_size: self.dictionary.len(),
            cache_size: self.cache.len(),
            learned_corrections: self.corrections.len(),
            total_word_frequency: self.dictionary.total_frequency(),
            fuzzy_searches: self.fuzzy_searches,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_with(words: &[&str]) -> AutocorrectEngine {
        let mut engine = AutocorrectEngine::empty(EngineConfig::default());
        for word in words {
            engine.add_word(word);
        }
        engine
    }

    fn chords(engine: &AutocorrectEngine, word: &str) -> String {
        engine.dictionary.codec().word_to_chords(word)
    }

    #[test]
    fn exact_match_skips_fuzzy_search() {
        let mut engine = engine_with(&["THE", "THEN"]);
        let input = chords(&engine, "THE");
        assert_eq!(engine.get_suggestions(&input, 5), vec![Suggestion::new("THE", 1.0)]);
        assert_eq!(engine.statistics().fuzzy_searches, 0);
    }

    #[test]
    fn single_chords_decode_to_letters() {
        let mut engine = engine_with(&["A", "B", "C"]);
        assert_eq!(engine.get_suggestions("D", 3)[0].word, "A");
        assert_eq!(engine.get_suggestions("DW", 3)[0].word, "B");
        assert_eq!(engine.get_suggestions("DK", 3)[0].word, "C");
    }

    #[test]
    fn empty_input_is_empty() {
        let mut engine = AutocorrectEngine::new();
        assert!(engine.get_suggestions("", 5).is_empty());
        assert!(engine.get_suggestions("   ", 5).is_empty());
        assert_eq!(engine.statistics().cache_size, 0);
    }

    #[test]
    fn repeated_queries_hit_the_cache() {
        let mut engine = AutocorrectEngine::new();
        let first = engine.get_suggestions("WQKO DWO DQ", 5);
        let second = engine.get_suggestions(" wqko dwo dq ", 5);
        assert_eq!(first, second);
        assert_eq!(engine.statistics().fuzzy_searches, 1);
        assert_eq!(engine.statistics().cache_size, 1);
    }

    #[test]
    fn max_results_does_not_poison_the_cache() {
        let mut engine = AutocorrectEngine::new();
        let narrow = engine.get_suggestions("WQKO DWO DQ", 1);
        let wide = engine.get_suggestions("WQKO DWO DQ", 5);
        assert_eq!(narrow.len(), 1);
        assert!(wide.len() > 1);
        assert_eq!(narrow[0], wide[0]);
    }

    #[test]
    fn typo_ranks_the_intended_word_first() {
        let mut engine = AutocorrectEngine::new();
        // T H with O in place of E.
        let suggestions = engine.get_suggestions("WQKO DWO DQO", 5);
        assert_eq!(suggestions[0].word, "THE");
        assert!(suggestions.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn hopeless_input_returns_nothing() {
        let mut engine = engine_with(&["THE"]);
        assert!(engine.get_suggestions("D D D D D D D", 5).is_empty());
    }

    #[test]
    fn learning_raises_the_score() {
        let mut engine = engine_with(&["HELLO", "HELP"]);
        let input = "DWO DO DWQ DWQ DQ";
        let before = engine.get_suggestions(input, 5);
        let before_score = before.iter().find(|s| s.word == "HELLO").unwrap().score;

        assert!(engine.learn_correction(input, "hello"));
        let after = engine.get_suggestions(input, 5);
        let after_score = after.iter().find(|s| s.word == "HELLO").unwrap().score;
        assert!(after_score > before_score);
        assert_eq!(engine.dictionary.frequency("HELLO"), Some(6));
    }

    #[test]
    fn learned_word_is_recalled_for_unreachable_input() {
        let mut engine = engine_with(&["THE"]);
        assert!(engine.get_suggestions("XYZ", 5).is_empty());
        engine.learn_correction("XYZ", "HELLO");
        assert!(engine.dictionary.contains("HELLO"));
        let suggestions = engine.get_suggestions("XYZ", 5);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].word, "HELLO");
    }

    #[test]
    fn recall_can_be_disabled() {
        let config = EngineConfig { recall_corrections: false, ..EngineConfig::default() };
        let mut engine = AutocorrectEngine::empty(config);
        engine.learn_correction("XYZ", "HELLO");
        assert!(engine.get_suggestions("XYZ", 5).is_empty());
    }

    #[test]
    fn malformed_dictionary_falls_back_to_seed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dict.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();
        let (engine, status) = AutocorrectEngine::from_dictionary_file(&path, EngineConfig::default());
        assert!(matches!(status, LoadStatus::SeedFallback { .. }));
        assert!(engine.dictionary.contains("BRAILLE"));
    }

    #[test]
    fn missing_dictionary_file_uses_seed() {
        let dir = tempfile::tempdir().unwrap();
        let (engine, status) =
            AutocorrectEngine::from_dictionary_file(&dir.path().join("none.json"), EngineConfig::default());
        assert!(matches!(status, LoadStatus::Loaded { .. }));
        assert!(engine.dictionary.contains("THE"));
    }

    #[test]
    fn dictionary_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dict.json");
        let mut engine = engine_with(&["ALPHA", "BETA", "BETA"]);
        engine.save_dictionary_file(&path).unwrap();

        let (restored, status) = AutocorrectEngine::from_dictionary_file(&path, EngineConfig::default());
        assert!(matches!(status, LoadStatus::Loaded { words: 2 }));
        assert_eq!(restored.dictionary.frequency("BETA"), Some(2));
        assert!(!restored.dictionary.contains("THE"));
        engine.reset();
        assert!(engine.dictionary.is_empty());
    }

    #[test]
    fn learning_data_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("learning.bin");
        let mut engine = engine_with(&["THE"]);
        engine.learn_correction("XYZ", "HELLO");
        engine.save_learning_data(&path).unwrap();

        let mut fresh = engine_with(&["THE", "AND"]);
        fresh.get_suggestions("D", 5);
        fresh.load_learning_data(&path).unwrap();
        assert_eq!(fresh.corrections().corrections_for("XYZ"), ["HELLO".to_string()]);
        assert_eq!(fresh.dictionary.frequency("HELLO"), Some(5));
        assert!(fresh.dictionary.contains("HELLO"));
        assert!(fresh.dictionary.contains("AND"));
        assert_eq!(fresh.statistics().cache_size, 0);
    }

    #[test]
    fn bad_learning_data_keeps_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("learning.bin");
        std::fs::write(&path, b"garbage").unwrap();

        let mut engine = engine_with(&["THE"]);
        engine.learn_correction("D", "THE");
        let before = engine.learning_data();
        assert!(engine.load_learning_data(&path).is_err());
        assert!(engine.load_learning_data(&dir.path().join("missing.bin")).is_err());
        assert_eq!(engine.learning_data(), before);
    }

    #[test]
    fn failed_saves_leave_state_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let mut engine = engine_with(&["THE"]);
        engine.learn_correction("D", "THE");
        engine.get_suggestions("D", 5);
        let data_before = engine.learning_data();
        let stats_before = engine.statistics();

        assert!(engine.save_learning_data(&blocker.join("learning.bin")).is_err());
        assert!(engine.save_dictionary_file(&blocker.join("dict.json")).is_err());
        assert_eq!(engine.learning_data(), data_before);
        assert_eq!(engine.statistics(), stats_before);
        assert_eq!(std::fs::read(&blocker).unwrap(), b"not a directory");
    }

    #[test]
    fn huge_frequencies_do_not_overflow() {
        let mut engine = engine_with(&[]);
        engine.insert_with_frequency("THE", u64::MAX);
        engine.insert_with_frequency("AND", u64::MAX);
        assert!(engine.learn_correction("D", "THE"));
        assert_eq!(engine.dictionary.frequency("THE"), Some(u64::MAX));
        assert_eq!(engine.statistics().total_word_frequency, u64::MAX);
    }

    #[test]
    fn statistics_track_tables() {
        let mut engine = engine_with(&["THE", "AND"]);
        engine.learn_correction("D", "A");
        let stats = engine.statistics();
        assert_eq!(stats.dictionary_size, 3);
        assert_eq!(stats.learned_corrections, 1);
        assert_eq!(stats.total_word_frequency, 1 + 1 + 5);
    }
}
