//! Destination URL construction for URL-addressable platforms.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::model::Platform;

/// Characters left unescaped by `encodeURIComponent`: alphanumerics plus
/// `- _ . ! ~ * ' ( )`. Everything else is percent-encoded.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Token replaced with the percent-encoded prompt in URL templates.
const PROMPT_TOKEN: &str = "{{prompt}}";

/// Percent-encode a prompt for URL embedding.
pub fn encode_prompt(prompt: &str) -> String {
    utf8_percent_encode(prompt, COMPONENT).to_string()
}

/// Build the URL a URL-addressable platform is opened at.
///
/// If the platform's URL template (or URL) contains a `{{prompt}}` token,
/// the encoded prompt replaces it. Otherwise the encoded prompt is appended
/// as a `prompt` query parameter, with `?` or `&` chosen by whether the URL
/// already carries a query string.
pub fn destination_url(platform: &Platform, prompt: &str) -> String {
    let base = platform
        .url_template
        .as_deref()
        .filter(|t| !t.is_empty())
        .unwrap_or(&platform.url);

    let encoded = encode_prompt(prompt);

    if base.contains(PROMPT_TOKEN) {
        return base.replace(PROMPT_TOKEN, &encoded);
    }

    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{}{}prompt={}", base, separator, encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn platform(url: &str, url_template: Option<&str>) -> Platform {
        Platform {
            key: "x".to_string(),
            name: "X".to_string(),
            url: url.to_string(),
            url_template: url_template.map(|s| s.to_string()),
            input_selector: None,
            send_selector: None,
        }
    }

    #[test]
    fn test_encode_prompt_spaces() {
        assert_eq!(encode_prompt("hi there"), "hi%20there");
    }

    #[test]
    fn test_encode_prompt_reserved() {
        assert_eq!(encode_prompt("a&b=c?d"), "a%26b%3Dc%3Fd");
        assert_eq!(encode_prompt("tilde~dot."), "tilde~dot.");
    }

    #[test]
    fn test_token_replacement() {
        let p = platform("https://x.com/", Some("https://x.com/?q={{prompt}}"));
        assert_eq!(
            destination_url(&p, "hi there"),
            "https://x.com/?q=hi%20there"
        );
    }

    #[test]
    fn test_token_in_plain_url() {
        let p = platform("https://x.com/?q={{prompt}}", None);
        assert_eq!(destination_url(&p, "hi"), "https://x.com/?q=hi");
    }

    #[test]
    fn test_append_without_query() {
        let p = platform("https://x.com/chat", None);
        assert_eq!(destination_url(&p, "hi"), "https://x.com/chat?prompt=hi");
    }

    #[test]
    fn test_append_with_existing_query() {
        let p = platform("https://x.com/chat?x=1", None);
        assert_eq!(
            destination_url(&p, "hi"),
            "https://x.com/chat?x=1&prompt=hi"
        );
    }

    #[test]
    fn test_empty_template_falls_back_to_url() {
        let p = platform("https://x.com/chat", Some(""));
        assert_eq!(destination_url(&p, "hi"), "https://x.com/chat?prompt=hi");
    }

    #[test]
    fn test_unicode_prompt() {
        let p = platform("https://x.com/chat", None);
        assert_eq!(
            destination_url(&p, "发送"),
            "https://x.com/chat?prompt=%E5%8F%91%E9%80%81"
        );
    }
}
