//! Configuration validation.

use std::collections::HashSet;

use url::Url;

use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ValidationIssue::new(path, message));
    }

    fn warning(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ValidationIssue::new(path, message));
    }
}

/// A single validation finding.
#[derive(Debug)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a parsed config file.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_settings(config, &mut result);
        Self::validate_platforms(config, &mut result);
        Self::validate_templates(config, &mut result);

        result
    }

    fn validate_settings(config: &Config, result: &mut ValidationResult) {
        if config.settings.debug_port == 0 {
            result.error("settings.debug_port", "Port cannot be 0");
        }
        if config.settings.default_lang.is_empty() {
            result.error("settings.default_lang", "Target language cannot be empty");
        }
    }

    fn validate_platforms(config: &Config, result: &mut ValidationResult) {
        let mut seen: HashSet<&str> = HashSet::new();

        for (i, platform) in config.platforms.iter().enumerate() {
            let path = format!("platforms[{}]", i);

            if platform.key.is_empty() {
                result.error(&path, "Platform key cannot be empty");
            } else if !seen.insert(platform.key.as_str()) {
                result.error(&path, format!("Duplicate platform key '{}'", platform.key));
            }

            // Injection targets must name a page to inject into.
            if platform.requires_injection() && platform.url.is_empty() {
                result.error(
                    format!("{}.url", path),
                    "A platform with input_selector must have a url",
                );
            }

            if !platform.url.is_empty() && Url::parse(&platform.url).is_err() {
                result.error(format!("{}.url", path), format!("Invalid URL '{}'", platform.url));
            }

            if let Some(template) = &platform.url_template {
                if !template.contains("{{prompt}}") {
                    result.warning(
                        format!("{}.url_template", path),
                        "url_template has no {{prompt}} token; the prompt will be appended as a query parameter",
                    );
                }
            }

            if platform.send_selector.is_some() && platform.input_selector.is_none() {
                result.warning(
                    format!("{}.send_selector", path),
                    "send_selector without input_selector has no effect",
                );
            }
        }
    }

    fn validate_templates(config: &Config, result: &mut ValidationResult) {
        for (action_key, list) in &config.templates {
            if list.is_empty() {
                result.warning(
                    format!("templates.{}", action_key),
                    "Empty template list hides the built-in templates for this action",
                );
            }
            for (i, template) in list.iter().enumerate() {
                if template.id.is_empty() {
                    result.error(
                        format!("templates.{}[{}].id", action_key, i),
                        "Template id cannot be empty",
                    );
                }
                if template.text.is_empty() {
                    result.warning(
                        format!("templates.{}[{}].text", action_key, i),
                        "Empty template text always assembles to an empty prompt",
                    );
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
