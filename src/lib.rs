// src/lib.rs

pub mod config;
pub mod core;
pub mod error;
pub mod fuzzy;
pub mod learning;
pub mod logging;
pub mod persistence;

pub use crate::config::EngineConfig;
pub use crate::core::converter::BrailleCodec;
pub use crate::core::dictionary::DictionarySource;
pub use crate::core::engine::{AutocorrectEngine, LoadStatus};
pub use crate::core::types::{DotSet, EngineStats, Suggestion};
pub use crate::error::{AutocorrectError, Result};
