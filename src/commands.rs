//! CLI command handlers.

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use promptrelay_cdp::{Browser, BrowserConfig};
use promptrelay_config::{config_dir, ConfigError, ConfigLoader, ConfigValidator, Store};
use promptrelay_core::{assemble, destination_url, Catalog, Platform, PromptContext};
use promptrelay_dispatch::{DispatchOutcome, Dispatcher};

type CliResult = Result<(), Box<dyn std::error::Error>>;

pub(crate) struct SendArgs {
    pub text: Option<String>,
    pub platform: String,
    pub action: String,
    pub template: Option<String>,
    pub lang: Option<String>,
    pub url: Option<String>,
}

/// Load the store: an explicitly requested config file must exist, the
/// default location falls back to built-in defaults.
fn load_store(config_path: Option<&Path>) -> Result<Store, ConfigError> {
    match config_path {
        Some(path) => Store::load_required(path),
        None => Store::load(&Store::default_path()),
    }
}

/// Resolve the platform and assemble the prompt from store + catalog.
fn prepare(store: &Store, args: SendArgs) -> Result<(Platform, String), Box<dyn std::error::Error>> {
    let platform = store.find_platform(&args.platform).ok_or_else(|| {
        let known: Vec<&str> = store.platforms.iter().map(|p| p.key.as_str()).collect();
        format!(
            "unknown platform '{}' (known: {})",
            args.platform,
            known.join(", ")
        )
    })?;

    if store.find_action(&args.action).is_none() {
        let known: Vec<&str> = store.actions.iter().map(|a| a.key.as_str()).collect();
        return Err(format!(
            "unknown action '{}' (known: {})",
            args.action,
            known.join(", ")
        )
        .into());
    }

    let catalog = match Catalog::load(&config_dir(), &store.settings.locale) {
        Ok(catalog) => catalog,
        Err(e) => {
            info!(error = %e, "no localization catalog, using texts verbatim");
            Catalog::empty()
        }
    };

    // Requested template id must exist; without one, the first template
    // for the action, else the built-in fallback.
    let template = match &args.template {
        Some(id) => store.find_template(&args.action, id).cloned().ok_or_else(|| {
            let known: Vec<&str> = store
                .templates
                .get(&args.action)
                .map(|list| list.iter().map(|t| t.id.as_str()).collect())
                .unwrap_or_default();
            format!(
                "unknown template '{}' for action '{}' (known: {})",
                id,
                args.action,
                known.join(", ")
            )
        })?,
        None => store
            .templates
            .get(&args.action)
            .and_then(|list| list.first())
            .cloned()
            .unwrap_or_else(|| Store::fallback_template(&args.action)),
    };

    let text = match args.text {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf.trim_end().to_string()
        }
    };

    let lang = args
        .lang
        .unwrap_or_else(|| store.settings.default_lang.clone());

    let mut context = PromptContext::new(text)
        .target_lang(lang)
        .action(args.action.clone())
        .platform(platform.key.clone());
    if let Some(url) = args.url {
        context = context.url(url);
    }

    let prompt = assemble(catalog.resolve(&template.text), &context.into_value());
    Ok((platform.clone(), prompt))
}

/// Assemble and deliver a prompt to the platform through the browser.
pub(crate) async fn send(config_path: Option<&Path>, args: SendArgs) -> CliResult {
    let store = load_store(config_path)?;
    let (platform, prompt) = prepare(&store, args)?;

    let browser = Arc::new(Browser::new(BrowserConfig {
        debug_port: store.settings.debug_port,
        profile_dir: store.settings.profile_dir.clone(),
        headless: store.settings.headless,
    }));
    let dispatcher = Dispatcher::new(browser.clone());

    let outcome = dispatcher.dispatch(&platform, &prompt).await?;
    browser.close().await;

    match outcome {
        DispatchOutcome::UrlOpened(url) => {
            println!("opened {url}");
        }
        DispatchOutcome::Sent => {
            println!("prompt sent to {}", platform.name);
        }
        DispatchOutcome::SendSkipped => {
            println!("prompt filled on {}; press send in the browser", platform.name);
        }
        DispatchOutcome::FillTimedOut => {
            // Selector rot on the target page, not a usage error.
            warn!(platform = %platform.key, "chat input not found; prompt not delivered");
            eprintln!("chat input not found on {}; check its selectors", platform.name);
        }
    }
    Ok(())
}

/// Assemble and print without touching the browser.
pub(crate) fn assemble_preview(config_path: Option<&Path>, args: SendArgs) -> CliResult {
    let store = load_store(config_path)?;
    let (platform, prompt) = prepare(&store, args)?;

    println!("{prompt}");
    if !platform.requires_injection() {
        eprintln!("destination: {}", destination_url(&platform, &prompt));
    }
    Ok(())
}

pub(crate) fn list_platforms(config_path: Option<&Path>, format: &str) -> CliResult {
    let store = load_store(config_path)?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&store.platforms)?);
        return Ok(());
    }

    println!("{:<12} {:<12} {:<10} URL", "KEY", "NAME", "MODE");
    for p in &store.platforms {
        let mode = if p.requires_injection() { "inject" } else { "url" };
        println!("{:<12} {:<12} {:<10} {}", p.key, p.name, mode, p.url);
    }
    Ok(())
}

pub(crate) fn list_templates(
    config_path: Option<&Path>,
    action: Option<&str>,
    format: &str,
) -> CliResult {
    let store = load_store(config_path)?;

    if let Some(action) = action {
        if !store.templates.contains_key(action) {
            let known: Vec<&str> = store.templates.keys().map(String::as_str).collect();
            return Err(format!(
                "unknown action '{}' (known: {})",
                action,
                known.join(", ")
            )
            .into());
        }
    }

    if format == "json" {
        match action {
            Some(action) => {
                println!("{}", serde_json::to_string_pretty(&store.templates[action])?)
            }
            None => println!("{}", serde_json::to_string_pretty(&store.templates)?),
        }
        return Ok(());
    }

    let mut actions: Vec<&String> = store.templates.keys().collect();
    actions.sort();
    for key in actions {
        if action.is_some_and(|a| a != key) {
            continue;
        }
        println!("{key}:");
        for t in &store.templates[key] {
            println!("  {:<16} {:<20} {}", t.id, t.name, t.text);
        }
    }
    Ok(())
}

/// Validate the config file, printing errors and warnings.
pub(crate) fn check(config_path: Option<&Path>) -> CliResult {
    let default_path = Store::default_path();
    let path = match config_path {
        Some(path) if !path.exists() => {
            return Err(ConfigError::NotFound(path.display().to_string()).into());
        }
        Some(path) => path,
        None if !default_path.exists() => {
            println!(
                "{}: no config file, built-in defaults apply",
                default_path.display()
            );
            return Ok(());
        }
        None => default_path.as_path(),
    };

    let config = ConfigLoader::load(path)?;
    let result = ConfigValidator::validate(&config);

    for warning in &result.warnings {
        println!("warning: {}: {}", warning.path, warning.message);
    }
    for error in &result.errors {
        println!("error: {}: {}", error.path, error.message);
    }

    if result.is_valid() {
        println!("{}: ok ({} warning(s))", path.display(), result.warnings.len());
        Ok(())
    } else {
        let first = &result.errors[0];
        Err(ConfigError::InvalidValue {
            field: first.path.clone(),
            message: first.message.clone(),
        }
        .into())
    }
}
