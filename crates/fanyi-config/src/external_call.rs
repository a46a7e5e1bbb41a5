use std::env;

use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    env::var("EXTERNAL_CALL_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(50020)
}

/// Loopback listener that lets other programs trigger translations,
/// e.g. `curl 127.0.0.1:50020/translate -d 'hello world'`
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct ExternalCallConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ExternalCallConfig {
    pub fn new() -> Self {
        Self {
            enabled: default_enabled(),
            host: default_host(),
            port: default_port(),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn prefix(&self) -> String {
        format!("http://{}/", self.bind_addr())
    }
}

impl Default for ExternalCallConfig {
    fn default() -> Self {
        Self::new()
    }
}
