use tokio::signal;

/// Signal that ended the serve loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shutdown {
    Interrupt,
    Terminate,
}

impl Shutdown {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Interrupt => "SIGINT",
            Self::Terminate => "SIGTERM",
        }
    }
}

/// Resolves on the first Ctrl+C or SIGTERM.
///
/// A listener that cannot be installed is logged and never fires; the other
/// one keeps working.
pub async fn shutdown_signal() -> Shutdown {
    tokio::select! {
        () = interrupt() => Shutdown::Interrupt,
        () = terminate() => Shutdown::Terminate,
    }
}

async fn interrupt() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!(error = %e, "cannot listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn terminate() {
    match signal::unix::signal(signal::unix::SignalKind::terminate()) {
        Ok(mut stream) => {
            stream.recv().await;
        }
        Err(e) => {
            tracing::error!(error = %e, "cannot listen for SIGTERM");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate() {
    std::future::pending::<()>().await;
}
