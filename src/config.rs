use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub const DEFAULT_MAX_EDIT_DISTANCE: usize = 3;
pub const DEFAULT_ACCEPTANCE_THRESHOLD: f64 = 0.3;
pub const DEFAULT_NEAR_MATCH_THRESHOLD: f64 = 0.8;
pub const DEFAULT_FREQUENCY_WEIGHT: f64 = 0.1;
pub const DEFAULT_FREQUENCY_CAP: u64 = 10;
pub const DEFAULT_CORRECTION_BOOST: u64 = 5;

/// Tunables for search, ranking and learning.
///
/// Deserializes with per-field defaults, so a config file only needs the
/// keys it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub max_edit_distance: usize,
    /// Substitutions need a similarity strictly above this.
    pub acceptance_threshold: f64,
    /// Substitutions at or above this similarity cost nothing.
    pub near_match_threshold: f64,
    pub frequency_weight: f64,
    pub frequency_cap: u64,
    pub correction_boost: u64,
    /// Caps visited search states per query. `None` is unbounded.
    pub max_search_steps: Option<usize>,
    /// Offer words previously confirmed for the same input as candidates.
    pub recall_corrections: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_edit_distance: DEFAULT_MAX_EDIT_DISTANCE,
            acceptance_threshold: DEFAULT_ACCEPTANCE_THRESHOLD,
            near_match_threshold: DEFAULT_NEAR_MATCH_THRESHOLD,
            frequency_weight: DEFAULT_FREQUENCY_WEIGHT,
            frequency_cap: DEFAULT_FREQUENCY_CAP,
            correction_boost: DEFAULT_CORRECTION_BOOST,
            max_search_steps: None,
            recall_corrections: true,
        }
    }
}

impl EngineConfig {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}
