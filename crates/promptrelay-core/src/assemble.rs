//! Prompt assembly: `{{path}}` placeholder substitution.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::{Captures, Regex};
use serde_json::{json, Value};

/// Matches `{{path}}` where path is dot-separated word segments.
fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{\{([\w.]+)\}\}").unwrap())
}

/// Substitute every `{{path}}` placeholder in `template` with the string
/// value reached by walking `path` dot-segment-wise through `data`.
///
/// A placeholder whose path is absent at any segment is left byte-for-byte
/// unchanged, braces included. Substituted values are not re-expanded
/// (single pass). An empty template yields an empty string. Never panics.
pub fn assemble(template: &str, data: &Value) -> String {
    if template.is_empty() {
        return String::new();
    }

    placeholder_re()
        .replace_all(template, |caps: &Captures| -> Cow<'static, str> {
            match resolve_path(data, &caps[1]) {
                Some(value) => Cow::Owned(value),
                None => Cow::Owned(caps[0].to_string()),
            }
        })
        .into_owned()
}

/// Walk a dot path through nested JSON objects. Returns the rendered leaf
/// value, or `None` if any segment is missing or a non-object is indexed.
fn resolve_path(data: &Value, path: &str) -> Option<String> {
    let mut current = data;
    for segment in path.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    Some(render_value(current))
}

/// Render a leaf value the way the template output expects: strings
/// verbatim, scalars via display, containers via compact JSON.
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Builder for the ephemeral per-invocation data mapping fed to
/// [`assemble`]. Constructed fresh per dispatch, never persisted.
#[derive(Debug, Clone, Default)]
pub struct PromptContext {
    selected_text: String,
    url: String,
    target_lang: String,
    action: String,
    platform: String,
}

impl PromptContext {
    pub fn new(selected_text: impl Into<String>) -> Self {
        Self {
            selected_text: selected_text.into(),
            ..Self::default()
        }
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn target_lang(mut self, lang: impl Into<String>) -> Self {
        self.target_lang = lang.into();
        self
    }

    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = action.into();
        self
    }

    pub fn platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = platform.into();
        self
    }

    /// Flatten into the JSON mapping consumed by the assembler.
    pub fn into_value(self) -> Value {
        json!({
            "selectedText": self.selected_text,
            "url": self.url,
            "targetLang": self.target_lang,
            "action": self.action,
            "platform": self.platform,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitutes_present_key() {
        let data = json!({"selectedText": "Explain quicksort"});
        let out = assemble("Answer concisely: {{selectedText}}", &data);
        assert_eq!(out, "Answer concisely: Explain quicksort");
    }

    #[test]
    fn test_absent_key_left_verbatim() {
        let data = json!({"selectedText": "hi"});
        let out = assemble("{{missing}} and {{selectedText}}", &data);
        assert_eq!(out, "{{missing}} and hi");
    }

    #[test]
    fn test_empty_template_yields_empty() {
        let data = json!({"anything": "x"});
        assert_eq!(assemble("", &data), "");
    }

    #[test]
    fn test_dot_path_resolution() {
        let data = json!({"a": {"b": "x"}});
        assert_eq!(assemble("{{a.b}}", &data), "x");
        assert_eq!(assemble("{{a.c}}", &data), "{{a.c}}");
    }

    #[test]
    fn test_dot_path_through_non_object() {
        let data = json!({"a": "leaf"});
        // "a" is not an object, so "a.b" cannot be walked.
        assert_eq!(assemble("{{a.b}}", &data), "{{a.b}}");
    }

    #[test]
    fn test_no_recursive_expansion() {
        let data = json!({"a": "{{b}}", "b": "never"});
        // The substituted value contains placeholder syntax but must not be
        // expanded again.
        assert_eq!(assemble("{{a}}", &data), "{{b}}");
    }

    #[test]
    fn test_repeated_placeholder() {
        let data = json!({"x": "1"});
        assert_eq!(assemble("{{x}}+{{x}}", &data), "1+1");
    }

    #[test]
    fn test_non_string_leaf_rendered() {
        let data = json!({"n": 42, "b": true, "nothing": null});
        assert_eq!(assemble("{{n}} {{b}} [{{nothing}}]", &data), "42 true []");
    }

    #[test]
    fn test_non_object_data_leaves_placeholders() {
        assert_eq!(assemble("{{x}}", &json!("just a string")), "{{x}}");
        assert_eq!(assemble("{{x}}", &Value::Null), "{{x}}");
    }

    #[test]
    fn test_context_into_value() {
        let data = PromptContext::new("text")
            .url("https://example.com")
            .target_lang("English")
            .action("answer")
            .platform("chatgpt")
            .into_value();

        assert_eq!(data["selectedText"], "text");
        assert_eq!(data["targetLang"], "English");
        assert_eq!(
            assemble("Translate to {{targetLang}}: {{selectedText}}", &data),
            "Translate to English: text"
        );
    }
}
