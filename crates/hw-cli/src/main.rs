mod config;

use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use hw_core::config::env_lookup;
use hw_core::{check_tokens, BotConfig, Poller, PracticumClient, TelegramNotifier};

use crate::config::LogFormat;

fn version_string() -> &'static str {
    static VERSION: OnceLock<String> = OnceLock::new();
    VERSION.get_or_init(|| {
        let version = env!("CARGO_PKG_VERSION");
        match env!("GIT_HASH") {
            "" => version.to_string(),
            hash => format!("{version} ({hash})"),
        }
    })
}

/// Telegram bot that reports homework review status changes.
///
/// Reads PRACTICUM_TOKEN, TELEGRAM_TOKEN and TELEGRAM_CHAT_ID from the
/// environment or a `.env` file.
#[derive(Parser)]
#[command(name = "homework-bot", version = version_string(), about)]
struct Cli {
    /// Load environment variables from this file instead of `./.env`.
    #[arg(long, value_name = "PATH")]
    env_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // The env file may set LOG_FORMAT and RUST_LOG, so it is read before
    // logging is initialised and its result reported afterwards.
    let env_file = config::load_env_file(cli.env_file.as_deref());

    let log_format = match LogFormat::from_env() {
        Ok(format) => format,
        Err(e) => {
            init_tracing(LogFormat::Pretty);
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };
    init_tracing(log_format);

    match env_file {
        Ok(Some(path)) => tracing::info!(path = %path.display(), "Loaded environment file"),
        Ok(None) => tracing::debug!("No .env file found"),
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    }

    if !check_tokens(env_lookup) {
        tracing::error!("Required environment variables are missing, exiting");
        std::process::exit(1);
    }

    // Required variables are known to be present; only optional values fail here.
    let config = match BotConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(kind = %e.kind(), error = %e, "Invalid configuration, exiting");
            std::process::exit(1);
        }
    };
    tracing::debug!(?config, "Configuration loaded");

    let client = match PracticumClient::build_client(config.request_timeout) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "Failed to build HTTP client");
            std::process::exit(1);
        }
    };

    let api = Arc::new(PracticumClient::from_config(&config, client.clone()));
    tracing::info!(
        endpoint = %api.endpoint(),
        "Watching homework statuses"
    );
    let notifier = Arc::new(TelegramNotifier::from_config(&config, client));

    Poller::from_config(&config, api, notifier)
        .run(shutdown_signal())
        .await;

    tracing::info!("Shutdown complete");
}

fn init_tracing(log_format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match log_format {
        LogFormat::Json => fmt().with_env_filter(filter).json().init(),
        LogFormat::Pretty => fmt().with_env_filter(filter).init(),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Cannot listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
