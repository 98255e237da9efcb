//! Configuration schema definitions.

use std::path::PathBuf;

use promptrelay_core::{Platform, TemplateMap};
use serde::{Deserialize, Serialize};

/// Root configuration file contents.
///
/// Platforms and templates here are the *user's* additions and overrides;
/// merging with the built-in catalog happens in [`crate::Store`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,

    #[serde(default)]
    pub platforms: Vec<Platform>,

    #[serde(default)]
    pub templates: TemplateMap,
}

/// Flat settings table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Target language substituted for `{{targetLang}}`.
    #[serde(default = "default_lang")]
    pub default_lang: String,

    /// Locale of the message catalog.
    #[serde(default = "default_locale")]
    pub locale: String,

    /// Chrome remote debugging port.
    #[serde(default = "default_debug_port")]
    pub debug_port: u16,

    /// Run a launched Chrome headless.
    #[serde(default)]
    pub headless: bool,

    /// Chrome profile directory for persistent login state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_lang: default_lang(),
            locale: default_locale(),
            debug_port: default_debug_port(),
            headless: false,
            profile_dir: None,
        }
    }
}

fn default_lang() -> String {
    "English".to_string()
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_debug_port() -> u16 {
    9222
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
