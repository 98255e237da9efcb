//! In-page automation routine builder.
//!
//! The routine runs inside the target page's JS context via
//! `Runtime.evaluate` with `awaitPromise`, so its result comes back as a
//! structured value instead of console output. Selector and prompt values
//! are embedded as one JSON object, never spliced into JS source directly.

use promptrelay_core::Platform;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dispatcher::Tuning;
use crate::error::DispatchError;

/// Parameters handed to the in-page routine.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FillConfig<'a> {
    input_selector: &'a str,
    send_selector: Option<&'a str>,
    prompt: &'a str,
    poll_interval_ms: u64,
    max_attempts: u32,
    settle_delay_ms: u64,
}

/// Result resolved by the in-page routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct FillOutcome {
    /// The input element was found and its content set.
    pub filled: bool,
    /// The send button was found enabled and clicked.
    pub clicked: bool,
}

impl FillOutcome {
    pub fn from_value(value: &Value) -> Result<Self, DispatchError> {
        serde_json::from_value(value.clone())
            .map_err(|_| DispatchError::UnexpectedResult(value.to_string()))
    }
}

/// The fill-and-send routine. `__CFG__` is replaced with the JSON config.
///
/// Polls for the input element at a fixed interval with a bounded attempt
/// count. Value elements go through the prototype's native value setter so
/// reactive frameworks that wrap the `value` property still observe the
/// write; contenteditable targets use `execCommand('insertText')`. Bubbling
/// `input` and `change` events follow either way, since chat UIs gate their
/// send controls on them. The send click waits out a settling delay and
/// retries once if the button is missing or disabled.
const FILL_ROUTINE: &str = r#"
(function (cfg) {
  return new Promise(function (resolve) {
    var attempts = 0;
    var timer = setInterval(function () {
      var el = document.querySelector(cfg.inputSelector);
      if (!el) {
        attempts += 1;
        if (attempts >= cfg.maxAttempts) {
          clearInterval(timer);
          console.warn('[promptrelay] input not found: ' + cfg.inputSelector);
          resolve({ filled: false, clicked: false });
        }
        return;
      }
      clearInterval(timer);
      el.focus();
      if (el.isContentEditable || el.hasAttribute('contenteditable')) {
        document.execCommand('insertText', false, cfg.prompt);
      } else {
        var proto = el.tagName === 'TEXTAREA'
          ? window.HTMLTextAreaElement.prototype
          : window.HTMLInputElement.prototype;
        var desc = Object.getOwnPropertyDescriptor(proto, 'value');
        if (desc && desc.set) {
          desc.set.call(el, cfg.prompt);
        } else {
          el.value = cfg.prompt;
        }
      }
      el.dispatchEvent(new Event('input', { bubbles: true }));
      el.dispatchEvent(new Event('change', { bubbles: true }));
      if (!cfg.sendSelector) {
        resolve({ filled: true, clicked: false });
        return;
      }
      var clickSend = function (retriesLeft) {
        var btn = document.querySelector(cfg.sendSelector);
        if (btn && !btn.disabled) {
          btn.click();
          resolve({ filled: true, clicked: true });
          return;
        }
        if (retriesLeft > 0) {
          setTimeout(function () { clickSend(retriesLeft - 1); }, cfg.settleDelayMs);
          return;
        }
        console.warn('[promptrelay] send button unavailable: ' + cfg.sendSelector);
        resolve({ filled: true, clicked: false });
      };
      setTimeout(function () { clickSend(1); }, cfg.settleDelayMs);
    }, cfg.pollIntervalMs);
  });
})(__CFG__)
"#;

/// Build the fill routine for a platform and prompt.
pub fn build_fill_script(
    platform: &Platform,
    prompt: &str,
    tuning: &Tuning,
) -> Result<String, DispatchError> {
    let input_selector = platform
        .input_selector
        .as_deref()
        .ok_or_else(|| DispatchError::MissingInputSelector(platform.key.clone()))?;

    let config = FillConfig {
        input_selector,
        send_selector: platform.send_selector.as_deref(),
        prompt,
        poll_interval_ms: tuning.fill_poll_interval.as_millis() as u64,
        max_attempts: tuning.fill_max_attempts,
        settle_delay_ms: tuning.settle_delay.as_millis() as u64,
    };

    let cfg_json = serde_json::to_string(&config)?;
    Ok(FILL_ROUTINE.replace("__CFG__", &cfg_json))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn platform(input: Option<&str>, send: Option<&str>) -> Platform {
        Platform {
            key: "chatgpt".to_string(),
            name: "ChatGPT".to_string(),
            url: "https://chat.openai.com/".to_string(),
            url_template: None,
            input_selector: input.map(|s| s.to_string()),
            send_selector: send.map(|s| s.to_string()),
        }
    }

    #[test]
    fn test_script_embeds_config_json() {
        let p = platform(Some("#prompt-textarea"), Some("button.send"));
        let script = build_fill_script(&p, "hello", &Tuning::default()).unwrap();
        assert!(script.contains(r#""inputSelector":"#));
        assert!(script.contains("#prompt-textarea"));
        assert!(script.contains("button.send"));
        assert!(!script.contains("__CFG__"));
    }

    #[test]
    fn test_prompt_is_json_escaped() {
        let p = platform(Some("textarea"), None);
        let script =
            build_fill_script(&p, "say \"hi\"\nnew line", &Tuning::default()).unwrap();
        assert!(script.contains(r#"say \"hi\"\nnew line"#));
    }

    #[test]
    fn test_missing_input_selector_is_error() {
        let p = platform(None, None);
        let result = build_fill_script(&p, "hello", &Tuning::default());
        assert!(matches!(result, Err(DispatchError::MissingInputSelector(_))));
    }

    #[test]
    fn test_absent_send_selector_serialized_null() {
        let p = platform(Some("textarea"), None);
        let script = build_fill_script(&p, "x", &Tuning::default()).unwrap();
        assert!(script.contains(r#""sendSelector":null"#));
    }

    #[test]
    fn test_tuning_constants_embedded() {
        let p = platform(Some("textarea"), None);
        let tuning = Tuning {
            fill_max_attempts: 7,
            ..Tuning::default()
        };
        let script = build_fill_script(&p, "x", &tuning).unwrap();
        assert!(script.contains(r#""maxAttempts":7"#));
    }

    #[test]
    fn test_outcome_parsing() {
        let value = serde_json::json!({"filled": true, "clicked": false});
        let outcome = FillOutcome::from_value(&value).unwrap();
        assert!(outcome.filled);
        assert!(!outcome.clicked);
    }

    #[test]
    fn test_outcome_parsing_rejects_garbage() {
        let value = serde_json::json!("undefined");
        assert!(FillOutcome::from_value(&value).is_err());
    }
}
