//! Entity Cache - console front end
//!
//! Runs the cache over an in-memory entity store and executes one command per
//! stdin line, printing one JSON document per line on stdout.

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use entity_cache::console::{handle_line, Reply};
use entity_cache::models::Entity;
use entity_cache::{Config, EntityCache, MemoryStore};

/// Main entry point for the entity cache console.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging (stderr)
/// 2. Load configuration from environment variables
/// 3. Start the cache, which spawns the expiration sweeper
/// 4. Execute commands read from stdin
/// 5. On EOF, `quit`, Ctrl+C or SIGTERM stop the sweeper and exit
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "entity_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting entity cache console");

    let config = Config::from_env();
    info!(
        "Configuration loaded: max_size={}, expiration_millis={}",
        config.max_size, config.expiration_millis
    );

    let cache = EntityCache::<Entity, _>::start(MemoryStore::new(), &config)
        .context("failed to start entity cache")?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read from stdin")? else {
                    info!("Input closed, initiating shutdown...");
                    break;
                };

                match handle_line(&cache, &line).await {
                    Reply::Print(json) => {
                        stdout.write_all(json.as_bytes()).await?;
                        stdout.write_all(b"\n").await?;
                        stdout.flush().await?;
                    }
                    Reply::Skip => {}
                    Reply::Quit => {
                        info!("Quit requested, initiating shutdown...");
                        break;
                    }
                }
            }
        }
    }

    cache.shutdown().await;
    info!("Entity cache console shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!(error = %err, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
