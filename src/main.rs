//! promptrelay - relay selected text into AI chat web UIs.
//!
//! Main entry point for the promptrelay CLI.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use promptrelay_config::config_dir;

mod commands;

/// promptrelay CLI.
#[derive(Parser)]
#[command(name = "promptrelay")]
#[command(about = "Relay selected text into AI chat web UIs")]
#[command(version)]
struct Cli {
    /// Configuration file path (default: ~/.promptrelay/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble a prompt and deliver it to a platform
    Send {
        /// Text to relay (reads stdin when omitted)
        text: Option<String>,

        /// Target platform key
        #[arg(short, long, default_value = "chatgpt")]
        platform: String,

        /// Action grouping the template (answer, rewrite, translate)
        #[arg(short, long, default_value = "answer")]
        action: String,

        /// Template id within the action (first template when omitted)
        #[arg(short, long)]
        template: Option<String>,

        /// Target language for the translate action
        #[arg(short, long)]
        lang: Option<String>,

        /// Source page URL, exposed to templates as {{url}}
        #[arg(long)]
        url: Option<String>,
    },

    /// Assemble a prompt and print it without touching the browser
    Assemble {
        /// Text to relay (reads stdin when omitted)
        text: Option<String>,

        /// Target platform key
        #[arg(short, long, default_value = "chatgpt")]
        platform: String,

        /// Action grouping the template
        #[arg(short, long, default_value = "answer")]
        action: String,

        /// Template id within the action (first template when omitted)
        #[arg(short, long)]
        template: Option<String>,

        /// Target language for the translate action
        #[arg(short, long)]
        lang: Option<String>,

        /// Source page URL, exposed to templates as {{url}}
        #[arg(long)]
        url: Option<String>,
    },

    /// List configured platforms
    Platforms {
        /// Output format (table, json)
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// List templates, optionally for one action
    Templates {
        /// Action key to filter by
        action: Option<String>,

        /// Output format (table, json)
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Validate the configuration file
    Check,
}

/// Initialize tracing with console and file output.
///
/// Log files are written to ~/.promptrelay/debug/ with daily rotation.
fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = config_dir().join("debug");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("promptrelay")
        .filename_suffix("log")
        .max_log_files(30)
        .build(&log_dir)?;

    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    // Keep the worker guard alive for the program duration.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(_guard);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_ansi(true))
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing()?;

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Send {
            text,
            platform,
            action,
            template,
            lang,
            url,
        } => {
            commands::send(
                config_path,
                commands::SendArgs {
                    text,
                    platform,
                    action,
                    template,
                    lang,
                    url,
                },
            )
            .await
        }
        Commands::Assemble {
            text,
            platform,
            action,
            template,
            lang,
            url,
        } => commands::assemble_preview(
            config_path,
            commands::SendArgs {
                text,
                platform,
                action,
                template,
                lang,
                url,
            },
        ),
        Commands::Platforms { format } => commands::list_platforms(config_path, &format),
        Commands::Templates { action, format } => {
            commands::list_templates(config_path, action.as_deref(), &format)
        }
        Commands::Check => commands::check(config_path),
    }
}
