//! Merged configuration view.
//!
//! The store is the "get with defaults" read path: built-in platforms,
//! actions and templates merged with the user's config file. It is read
//! fresh per operation; nothing here caches across dispatches.

use std::path::{Path, PathBuf};

use promptrelay_core::{
    builtin_actions, builtin_platforms, builtin_templates, Action, Platform, Template, TemplateMap,
};
use tracing::debug;

use crate::error::ConfigError;
use crate::loader::ConfigLoader;
use crate::schema::{Config, Settings};

/// Merged view over built-in defaults and user configuration.
#[derive(Debug, Clone)]
pub struct Store {
    pub settings: Settings,
    pub platforms: Vec<Platform>,
    pub actions: Vec<Action>,
    pub templates: TemplateMap,
}

impl Store {
    /// Load from `path` if it exists, otherwise pure defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = if path.exists() {
            debug!(path = %path.display(), "loading config");
            ConfigLoader::load(path)?
        } else {
            debug!(path = %path.display(), "no config file, using defaults");
            Config::default()
        };
        Ok(Self::from_config(config))
    }

    /// Load from an explicitly requested path. Unlike [`Store::load`],
    /// a missing file is an error rather than a silent default.
    pub fn load_required(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        Ok(Self::from_config(ConfigLoader::load(path)?))
    }

    /// Merge a parsed config with the built-in catalog. User platforms
    /// append (a user platform with a built-in key replaces the built-in
    /// entry); user template lists override per action key.
    pub fn from_config(config: Config) -> Self {
        let mut platforms = builtin_platforms();
        for user in config.platforms {
            match platforms.iter_mut().find(|p| p.key == user.key) {
                Some(existing) => *existing = user,
                None => platforms.push(user),
            }
        }

        let mut templates = builtin_templates();
        for (action_key, list) in config.templates {
            templates.insert(action_key, list);
        }

        let mut settings = config.settings;
        if let Some(dir) = settings.profile_dir.take() {
            let expanded = ConfigLoader::expand_path(&dir.to_string_lossy());
            settings.profile_dir = Some(PathBuf::from(expanded));
        }

        Self {
            settings,
            platforms,
            actions: builtin_actions(),
            templates,
        }
    }

    /// Default config file location: `~/.promptrelay/config.toml`.
    pub fn default_path() -> PathBuf {
        config_dir().join("config.toml")
    }

    pub fn find_platform(&self, key: &str) -> Option<&Platform> {
        self.platforms.iter().find(|p| p.key == key)
    }

    pub fn find_action(&self, key: &str) -> Option<&Action> {
        self.actions.iter().find(|a| a.key == key)
    }

    /// Template lookup by action and template id.
    pub fn find_template(&self, action_key: &str, template_id: &str) -> Option<&Template> {
        self.templates
            .get(action_key)?
            .iter()
            .find(|t| t.id == template_id)
    }

    /// Fallback template when nothing matches: translate keeps its language
    /// directive, everything else passes the selection through unchanged.
    pub fn fallback_template(action_key: &str) -> Template {
        let text = if action_key == "translate" {
            "Translate to {{targetLang}}: {{selectedText}}"
        } else {
            "{{selectedText}}"
        };
        Template {
            id: "default".to_string(),
            name: "Default".to_string(),
            text: text.to_string(),
        }
    }
}

/// The promptrelay home directory: `~/.promptrelay`.
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".promptrelay"))
        .unwrap_or_else(|| PathBuf::from(".promptrelay"))
}
