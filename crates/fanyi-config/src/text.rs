use std::env;

use fanyi_core::{DEFAULT_DETECTION_THRESHOLD, OutputCase, PreprocessMode};
use serde::{Deserialize, Serialize};

fn default_detection_threshold() -> f64 {
    env::var("DETECTION_THRESHOLD")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_DETECTION_THRESHOLD)
}

fn default_cache_capacity() -> usize {
    env::var("CACHE_CAPACITY")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(256)
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct TextConfig {
    #[serde(default)]
    pub preprocess: PreprocessMode,
    /// Identifier style applied to translated text
    #[serde(default)]
    pub output_case: OutputCase,
    /// English-letter ratio above which input counts as English
    #[serde(default = "default_detection_threshold")]
    pub detection_threshold: f64,
    /// Translations remembered per session, 0 turns the cache off
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            preprocess: PreprocessMode::default(),
            output_case: OutputCase::default(),
            detection_threshold: default_detection_threshold(),
            cache_capacity: default_cache_capacity(),
        }
    }
}
