use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use fanyi_config::Config;
use serde::{Deserialize, Serialize};

/// Env var pointing at a profile used when `--config` is not given
const PROFILE_ENV: &str = "FANYI_PROFILE";

/// Represents a user profile
#[derive(Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub value: Config,
}

/// `path` if given, otherwise `$FANYI_PROFILE`
pub fn resolve_profile_path(path: Option<&Path>) -> Option<PathBuf> {
    path.map(Path::to_path_buf)
        .or_else(|| env::var(PROFILE_ENV).ok().map(PathBuf::from))
}

/// Load the config from `path`, then `$FANYI_PROFILE`, falling back to
/// env-var defaults
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match resolve_profile_path(path) {
        Some(path) => {
            let profile = load_profile(&path)?;
            tracing::info!("Loaded profile '{}' from {}", profile.name, path.display());
            Ok(profile.value)
        }
        None => {
            tracing::info!("No profile given, using defaults");
            Ok(Config::new())
        }
    }
}

pub fn load_profile(path: &Path) -> anyhow::Result<Profile> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read profile {}", path.display()))?;
    let profile = serde_json::from_str(&data)
        .with_context(|| format!("failed to parse profile {}", path.display()))?;
    Ok(profile)
}

/// Write a profile holding the default config. Refuses to overwrite.
pub fn init_profile(path: &Path, name: &str) -> anyhow::Result<()> {
    if path.exists() {
        anyhow::bail!("profile {} already exists", path.display());
    }

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let profile = Profile {
        name: name.into(),
        value: Config::new(),
    };
    fs::write(path, serde_json::to_string_pretty(&profile)?)?;
    tracing::info!("Created profile '{}' at {}", name, path.display());
    Ok(())
}
