//! Configuration loader.

use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::schema::Config;

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load configuration from a string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let config: Config = toml::from_str(&expanded)?;
        Ok(config)
    }

    /// Expand environment variables in the format `${VAR}`.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();
        let re = regex::Regex::new(r"\$\{([^}]+)\}").unwrap();

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let var_value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }

    /// Expand shell-style paths (e.g. `~/.promptrelay`).
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_empty_config() {
        let config = ConfigLoader::load_str("").unwrap();
        assert_eq!(config.settings.debug_port, 9222);
    }

    #[test]
    fn test_load_basic_config() {
        let content = r#"
            [settings]
            default_lang = "French"
            debug_port = 9333
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.settings.default_lang, "French");
        assert_eq!(config.settings.debug_port, 9333);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[settings]").unwrap();
        writeln!(file, "locale = \"vi\"").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.settings.locale, "vi");
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = ConfigLoader::load(Path::new("/nonexistent/path/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_invalid_toml() {
        let result = ConfigLoader::load_str("invalid = [unclosed");
        assert!(result.is_err());
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: test-only env var with a unique name
        unsafe {
            std::env::set_var("PROMPTRELAY_TEST_VAR", "Spanish");
        }
        let content = "[settings]\ndefault_lang = \"${PROMPTRELAY_TEST_VAR}\"";
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.settings.default_lang, "Spanish");
        unsafe {
            std::env::remove_var("PROMPTRELAY_TEST_VAR");
        }
    }

    #[test]
    fn test_expand_env_vars_not_set() {
        let content = "value = \"${NONEXISTENT_TEST_VAR_98765}\"";
        let result = ConfigLoader::load_str(content);
        assert!(matches!(result, Err(ConfigError::EnvVarNotSet(_))));
    }

    #[test]
    fn test_expand_path() {
        let expanded = ConfigLoader::expand_path("~/.promptrelay");
        assert!(!expanded.starts_with('~'));
        let plain = ConfigLoader::expand_path("/usr/local/etc");
        assert_eq!(plain, "/usr/local/etc");
    }
}
