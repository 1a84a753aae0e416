//! catalog-check - load message catalogs and report what was found
//!
//! Usage:
//!   cargo run                            # Load catalogs, print the load summary as JSON
//!   cargo run -- es "Bot Information"    # Print the translation of a phrase
//!   cargo run -- --watch                 # Stay running and reload on SIGHUP / interval
//!
//! Optional environment variables:
//! - LOCALES_DIR (defaults to locales/pot)
//! - CATALOG_EXTENSION (defaults to po)
//! - FALLBACK_CATALOG (defaults to messages.pot)
//! - CATALOG_RELOAD_SECS (periodic reload in watch mode, disabled by default)

use anyhow::{bail, Context, Result};
use po_translator::config::Config;
use po_translator::i18n::{Translator, TranslatorRegistry};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("po_translator=info".parse()?),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let watch = args.iter().any(|arg| arg == "--watch");
    let positional: Vec<&String> = args.iter().filter(|arg| !arg.starts_with("--")).collect();

    let config = Config::from_env()?;
    info!("Loading catalogs from {}", config.locales_dir.display());

    // The registry is owned here and handed to every translator.
    let registry = TranslatorRegistry::new();
    let translator = Translator::new("catalog-check", config.catalog_source(), &registry);
    let summary = translator
        .load()
        .with_context(|| format!("Failed to load catalogs for '{}'", translator.name()))?;

    match positional.as_slice() {
        [] => println!("{}", serde_json::to_string_pretty(&summary)?),
        [language, phrase] => println!("{}", translator.lookup(phrase, language)),
        _ => bail!("Usage: catalog-check [--watch] [<language> <phrase>]"),
    }

    if watch {
        watch_for_reloads(&registry, &config).await?;
        println!("{}", serde_json::to_string_pretty(&translator.metrics().report())?);
    }

    Ok(())
}

/// Reload every registered translator on SIGHUP or on the configured interval,
/// until Ctrl-C.
async fn watch_for_reloads(registry: &TranslatorRegistry, config: &Config) -> Result<()> {
    let mut ticker = config.reload_interval.map(tokio::time::interval);
    if let Some(ticker) = ticker.as_mut() {
        // the first tick completes immediately; catalogs were just loaded
        ticker.tick().await;
    }

    #[cfg(unix)]
    let mut hangup = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::hangup())
        .context("Failed to install SIGHUP handler")?;

    info!("Watching for reload requests (Ctrl-C to stop)");

    loop {
        let periodic = async {
            match ticker.as_mut() {
                Some(ticker) => {
                    ticker.tick().await;
                }
                None => std::future::pending::<()>().await,
            }
        };

        #[cfg(unix)]
        let signalled = hangup.recv();
        #[cfg(not(unix))]
        let signalled = std::future::pending::<Option<()>>();

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Stopping");
                return Ok(());
            }
            _ = periodic => {
                info!("Periodic catalog reload");
            }
            _ = signalled => {
                info!("SIGHUP received, reloading catalogs");
            }
        }

        let report = registry.reload_all();
        if !report.is_complete() {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
}
