use super::types::SplitterConfig;
use crate::api::{Result, SplitError};
use std::collections::HashMap;
use std::sync::OnceLock;

static PRESETS: OnceLock<std::result::Result<HashMap<&'static str, SplitterConfig>, String>> =
    OnceLock::new();

macro_rules! embed_preset {
    ($name:expr, $path:expr) => {
        ($name, include_str!($path))
    };
}

fn load_embedded_presets() -> std::result::Result<HashMap<&'static str, SplitterConfig>, String> {
    let mut presets = HashMap::new();

    let embedded = [
        embed_preset!("default", "../../../configs/presets/default.toml"),
        embed_preset!("en", "../../../configs/presets/en.toml"),
    ];

    for (name, toml_content) in embedded {
        let config: SplitterConfig = toml::from_str(toml_content)
            .map_err(|e| format!("Failed to parse {name} preset: {e}"))?;
        presets.insert(name, config);
    }

    Ok(presets)
}

fn presets() -> Result<&'static HashMap<&'static str, SplitterConfig>> {
    PRESETS
        .get_or_init(load_embedded_presets)
        .as_ref()
        .map_err(|message| SplitError::Configuration(message.clone()))
}

/// Built-in preset by name
pub fn get_preset(name: &str) -> Result<&'static SplitterConfig> {
    presets()?
        .get(name)
        .ok_or_else(|| SplitError::UnknownPreset(name.to_string()))
}

/// Names of the built-in presets, sorted
pub fn list_presets() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = presets()
        .map(|presets| presets.keys().copied().collect())
        .unwrap_or_default();
    names.sort_unstable();
    names
}
