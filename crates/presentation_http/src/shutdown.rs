//! Graceful shutdown with a bounded drain period

use std::{future::Future, io, time::Duration};

use tokio::{signal, sync::oneshot};
use tracing::{info, warn};

/// Wait for shutdown signals (SIGINT, SIGTERM)
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}

/// Shutdown trigger for the server plus a receiver that fires once it has run
///
/// Pass the first value to `with_graceful_shutdown` and the receiver to
/// [`serve_until_drained`].
pub fn signal_pair<S>(signal: S) -> (impl Future<Output = ()> + Send + 'static, oneshot::Receiver<()>)
where
    S: Future<Output = ()> + Send + 'static,
{
    let (tx, rx) = oneshot::channel();
    let trigger = async move {
        signal.await;
        let _ = tx.send(());
    };
    (trigger, rx)
}

/// Drive `server` to completion, abandoning open connections once `timeout`
/// has passed after the shutdown signal
///
/// Returns `Ok(true)` when every connection closed in time.
pub async fn serve_until_drained<F>(
    server: F,
    signalled: oneshot::Receiver<()>,
    timeout: Duration,
) -> io::Result<bool>
where
    F: Future<Output = io::Result<()>>,
{
    let deadline = async move {
        if signalled.await.is_ok() {
            info!("Waiting up to {:?} for connections to close...", timeout);
            tokio::time::sleep(timeout).await;
        } else {
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        result = server => result.map(|()| true),
        () = deadline => {
            warn!(?timeout, "Shutdown timeout elapsed, closing remaining connections");
            Ok(false)
        }
    }
}
