//! Built-in platform, action and template catalog.
//!
//! These are the out-of-the-box destinations and prompt patterns; user
//! configuration appends platforms and overrides template lists per action
//! key. Selectors are deliberately absent here: chat UIs change their
//! markup often enough that selector pairs belong in user config, where
//! they can be fixed without a release.

use crate::model::{Action, Platform, Template, TemplateMap};

fn platform(key: &str, name: &str, url: &str, url_template: Option<&str>) -> Platform {
    Platform {
        key: key.to_string(),
        name: name.to_string(),
        url: url.to_string(),
        url_template: url_template.map(|s| s.to_string()),
        input_selector: None,
        send_selector: None,
    }
}

/// Default chat destinations.
pub fn builtin_platforms() -> Vec<Platform> {
    vec![
        platform(
            "chatgpt",
            "ChatGPT",
            "https://chat.openai.com/",
            Some("https://chat.openai.com/?q={{prompt}}"),
        ),
        platform(
            "gemini",
            "Gemini",
            "https://gemini.google.com/",
            Some("https://gemini.google.com/?q={{prompt}}"),
        ),
        platform(
            "claude",
            "Claude",
            "https://claude.ai/",
            Some("https://claude.ai/?q={{prompt}}"),
        ),
        platform("poe", "POE", "https://poe.com/", None),
        platform(
            "perplexity",
            "Perplexity",
            "https://www.perplexity.ai/",
            Some("https://www.perplexity.ai/search?q={{prompt}}"),
        ),
        platform(
            "deepseek",
            "DeepSeek",
            "https://deepseek.ai/",
            Some("https://deepseek.ai/?q={{prompt}}"),
        ),
    ]
}

/// Default actions.
pub fn builtin_actions() -> Vec<Action> {
    vec![
        Action { key: "answer".to_string(), name: "Answer".to_string() },
        Action { key: "rewrite".to_string(), name: "Rewrite".to_string() },
        Action { key: "translate".to_string(), name: "Translate".to_string() },
    ]
}

fn template(id: &str, name: &str, text: &str) -> Template {
    Template {
        id: id.to_string(),
        name: name.to_string(),
        text: text.to_string(),
    }
}

/// Default templates, grouped by action key.
pub fn builtin_templates() -> TemplateMap {
    let mut map = TemplateMap::new();

    map.insert(
        "answer".to_string(),
        vec![
            template("quick", "Quick version", "Answer concisely: {{selectedText}}"),
            template("short", "Short version", "Provide a short answer for: {{selectedText}}"),
            template(
                "detailed",
                "Detailed version",
                "Provide a detailed, step-by-step answer for: {{selectedText}}",
            ),
        ],
    );

    map.insert(
        "rewrite".to_string(),
        vec![
            template("quick", "Quick version", "Rewrite concisely: {{selectedText}}"),
            template("short", "Short version", "Rewrite in a short style: {{selectedText}}"),
            template(
                "detailed",
                "Detailed version",
                "Rewrite with expanded detail and polish: {{selectedText}}",
            ),
        ],
    );

    map.insert(
        "translate".to_string(),
        vec![
            template("quick", "Quick version", "Translate to {{targetLang}}: {{selectedText}}"),
            template(
                "formal",
                "Formal",
                "Translate to {{targetLang}} in a formal tone: {{selectedText}}",
            ),
            template(
                "casual",
                "Casual",
                "Translate to {{targetLang}} in a casual tone: {{selectedText}}",
            ),
        ],
    );

    map
}
