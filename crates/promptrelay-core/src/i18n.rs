//! Localization catalog.
//!
//! Message catalogs live as flat JSON objects in `locales/<locale>.json`
//! next to the config file. Lookups fall back to a caller-supplied default,
//! then to the key itself, so untranslated keys stay visible instead of
//! failing the operation. Template names and texts may be indirect catalog
//! keys; [`Catalog::resolve`] handles that case.

use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Locale file not found for '{0}' (tried '{0}' and 'en')")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid catalog JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// In-memory key → message mapping for one locale.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    messages: HashMap<String, String>,
}

impl Catalog {
    /// Empty catalog; every lookup falls through to its default.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load `locales/<locale>.json` from `dir`, falling back to `en` when
    /// the requested locale file is missing.
    pub fn load(dir: &Path, locale: &str) -> Result<Self, CatalogError> {
        let path = dir.join("locales").join(format!("{locale}.json"));
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && locale != "en" => {
                debug!(locale, "locale file missing, falling back to en");
                let fallback = dir.join("locales").join("en.json");
                std::fs::read_to_string(&fallback)
                    .map_err(|_| CatalogError::NotFound(locale.to_string()))?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CatalogError::NotFound(locale.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        Self::from_json(&content)
    }

    /// Parse a catalog from a JSON object of key → message strings.
    pub fn from_json(content: &str) -> Result<Self, CatalogError> {
        let messages: HashMap<String, String> = serde_json::from_str(content)?;
        Ok(Self { messages })
    }

    /// Look up `key`, falling back to `default`, then to the key itself.
    pub fn get<'a>(&'a self, key: &'a str, default: &'a str) -> &'a str {
        match self.messages.get(key) {
            Some(msg) => msg.as_str(),
            None if !default.is_empty() => default,
            None => key,
        }
    }

    /// Resolve text that may be an indirect catalog key: returns the
    /// translation when one exists, otherwise the text verbatim.
    pub fn resolve<'a>(&'a self, text: &'a str) -> &'a str {
        self.get(text, text)
    }
}
