use std::env;

use fanyi_core::LangTag;
use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    false
}

fn default_provider() -> String {
    "deepl".to_string()
}

fn default_api_key() -> String {
    env::var("DEEPL_API_KEY").unwrap_or_default()
}

fn default_api_url() -> String {
    env::var("DEEPL_API_URL")
        .unwrap_or_else(|_| "https://api-free.deepl.com/v2/translate".to_string())
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct TranslatorConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_provider")]
    pub provider: String,
    /// `auto` lets the English/Chinese heuristic pick
    #[serde(default)]
    pub from_lang: LangTag,
    #[serde(default)]
    pub to_lang: LangTag,
    #[serde(default = "default_api_key")]
    pub api_key: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

impl TranslatorConfig {
    /// Enabled and carrying credentials
    pub fn is_usable(&self) -> bool {
        self.enabled && !self.api_key.is_empty()
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            provider: default_provider(),
            from_lang: LangTag::Auto,
            to_lang: LangTag::Auto,
            api_key: default_api_key(),
            api_url: default_api_url(),
        }
    }
}
