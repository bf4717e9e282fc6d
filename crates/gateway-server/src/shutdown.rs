//! Graceful shutdown handling.
//!
//! The server stops accepting connections on Ctrl+C, SIGINT or SIGTERM and
//! lets in-flight summary requests finish.

use std::future::Future;
use tokio::signal;
use tracing::{error, info};

/// Wait for a shutdown signal and return its name.
///
/// A handler that cannot be installed is logged and never fires.
pub async fn shutdown_signal() -> String {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => "ctrl+c",
            Err(e) => {
                error!(error = %e, "Failed to install Ctrl+C handler");
                std::future::pending().await
            }
        }
    };

    #[cfg(unix)]
    let sigterm = unix_signal(signal::unix::SignalKind::terminate(), "sigterm");
    #[cfg(unix)]
    let sigint = unix_signal(signal::unix::SignalKind::interrupt(), "sigint");

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<&str>();
    #[cfg(not(unix))]
    let sigint = std::future::pending::<&str>();

    let signal_name = tokio::select! {
        name = ctrl_c => name,
        name = sigterm => name,
        name = sigint => name,
    };

    info!(signal = signal_name, "Received shutdown signal");
    signal_name.to_string()
}

#[cfg(unix)]
fn unix_signal(
    kind: signal::unix::SignalKind,
    name: &'static str,
) -> impl Future<Output = &'static str> {
    async move {
        match signal::unix::signal(kind) {
            Ok(mut stream) => {
                stream.recv().await;
                name
            }
            Err(e) => {
                error!(signal = name, error = %e, "Failed to install signal handler");
                std::future::pending().await
            }
        }
    }
}

/// Resolve when either `trigger` completes or a process signal arrives.
///
/// Used to stop the server from tests or an embedding application.
pub async fn shutdown_on<F>(trigger: F)
where
    F: Future<Output = ()> + Send,
{
    tokio::select! {
        () = trigger => info!("Shutdown requested"),
        _ = shutdown_signal() => {}
    }
}
