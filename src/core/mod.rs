pub mod converter;
pub mod dictionary;
pub mod engine;
pub mod ranking;
pub mod trie;
pub mod types;
