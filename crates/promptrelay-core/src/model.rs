//! Platform, action and template descriptors.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use url::Url;

/// A configured chat destination: a URL plus optional automation selectors.
///
/// A platform with an `input_selector` is a DOM-injection target and its
/// `url` is the page to inject into. Without one, the platform is
/// URL-addressable and the prompt is embedded in the opened URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    /// Unique identifier (e.g. "chatgpt").
    pub key: String,

    /// Display name. May be an indirect localization key.
    pub name: String,

    /// Destination URL.
    pub url: String,

    /// URL with a `{{prompt}}` token, for platforms that accept a prompt
    /// via query string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_template: Option<String>,

    /// CSS selector of the chat input element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_selector: Option<String>,

    /// CSS selector of the send button.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub send_selector: Option<String>,
}

impl Platform {
    /// Whether this platform needs in-page DOM automation rather than a
    /// URL-embedded prompt.
    pub fn requires_injection(&self) -> bool {
        self.input_selector.is_some()
    }

    /// Parsed destination URL, if valid.
    pub fn parsed_url(&self) -> Option<Url> {
        Url::parse(&self.url).ok()
    }
}

/// A category of transformation (answer/rewrite/translate). Purely
/// descriptive; templates are grouped under its key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Action {
    pub key: String,
    pub name: String,
}

/// A named prompt pattern with `{{placeholder}}` tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    pub id: String,

    /// Display name. May be an indirect localization key.
    pub name: String,

    /// Template text. May itself be an indirect localization key.
    pub text: String,
}

/// Templates grouped by action key.
pub type TemplateMap = HashMap<String, Vec<Template>>;

#[cfg(test)]
mod tests {
    use super::*;

    fn platform(input_selector: Option<&str>) -> Platform {
        Platform {
            key: "test".to_string(),
            name: "Test".to_string(),
            url: "https://example.com/chat".to_string(),
            url_template: None,
            input_selector: input_selector.map(|s| s.to_string()),
            send_selector: None,
        }
    }

    #[test]
    fn test_requires_injection() {
        assert!(!platform(None).requires_injection());
        assert!(platform(Some("textarea")).requires_injection());
    }

    #[test]
    fn test_parsed_url() {
        let p = platform(None);
        let url = p.parsed_url().unwrap();
        assert_eq!(url.host_str(), Some("example.com"));
        assert_eq!(url.path(), "/chat");
    }

    #[test]
    fn test_parsed_url_invalid() {
        let mut p = platform(None);
        p.url = "not a url".to_string();
        assert!(p.parsed_url().is_none());
    }

    #[test]
    fn test_platform_deserialize_optional_fields() {
        let json = r##"{
            "key": "chatgpt",
            "name": "ChatGPT",
            "url": "https://chat.openai.com/",
            "input_selector": "#prompt-textarea",
            "send_selector": "button[data-testid=send-button]"
        }"##;
        let p: Platform = serde_json::from_str(json).unwrap();
        assert_eq!(p.key, "chatgpt");
        assert!(p.requires_injection());
        assert!(p.url_template.is_none());
    }
}
