use braille_core::{AutocorrectEngine, BrailleCodec, DictionarySource, EngineConfig, LoadStatus};
use std::collections::BTreeMap;

#[test]
fn seed_engine_corrects_a_dropped_dot() {
    let mut engine = AutocorrectEngine::new();
    let codec = BrailleCodec::new();
    // "WORLD" with the D typed without dot 5 (as C).
    let input = format!("{} DK", codec.word_to_chords("WORL"));
    let suggestions = engine.get_suggestions(&input, 3);
    assert_eq!(suggestions[0].word, "WORLD");
    assert!(suggestions[0].score < 2.0);
}

#[test]
fn session_learns_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let learning = dir.path().join("learning.bin");
    let exported = dir.path().join("dictionary.json");

    let mut engine = AutocorrectEngine::new();
    assert!(engine.learn_correction("DW DKO", "BRAILLE"));
    engine.save_learning_data(&learning).unwrap();
    engine.save_dictionary_file(&exported).unwrap();

    let (mut restored, status) = AutocorrectEngine::from_dictionary_file(&exported, EngineConfig::default());
    assert!(matches!(status, LoadStatus::Loaded { .. }));
    restored.load_learning_data(&learning).unwrap();
    assert_eq!(restored.dictionary.frequency("BRAILLE"), Some(6));

    let suggestions = restored.get_suggestions("dw dko", 10);
    assert!(suggestions.iter().any(|s| s.word == "BRAILLE"));
}

#[test]
fn explicit_frequencies_rank_common_words_higher() {
    let mut engine = AutocorrectEngine::empty(EngineConfig::default());
    let mut frequencies = BTreeMap::new();
    frequencies.insert("CAT".to_string(), 1);
    frequencies.insert("CAN".to_string(), 10);
    frequencies.insert("CAP".to_string(), 1000);
    engine.bulk_load(DictionarySource::SeedFrequencies(frequencies));

    let codec = BrailleCodec::new();
    // C A followed by an empty cell: every CA? word is two edits away.
    let input = format!("{} X", codec.word_to_chords("CA"));
    let suggestions = engine.get_suggestions(&input, 5);
    let words: Vec<&str> = suggestions.iter().map(|s| s.word.as_str()).collect();
    assert_eq!(words, vec!["CAN", "CAP", "CAT"]);
    assert_eq!(suggestions[0].score, suggestions[1].score);
    assert!(suggestions[1].score > suggestions[2].score);
}
