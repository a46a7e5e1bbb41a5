use serde::{Deserialize, Serialize};

fn default_max_text_lines() -> u32 {
    3
}

fn default_show_source() -> bool {
    true
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct DisplayConfig {
    /// Lines of translated text printed per result, 0 for no limit
    #[serde(default = "default_max_text_lines")]
    pub max_text_lines: u32,
    /// Print the language pair and provider above each result
    #[serde(default = "default_show_source")]
    pub show_source: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_text_lines: default_max_text_lines(),
            show_source: default_show_source(),
        }
    }
}
