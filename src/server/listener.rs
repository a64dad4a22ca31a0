use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::{TcpListener, TcpStream};
use tracing::info;

use crate::config::Config;
use crate::files::FileService;
use crate::http::connection::Connection;
use crate::http::parser::Limits;
use crate::server::router::Router;

/// Pause after a failed accept, e.g. while the process is out of descriptors.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// Source of accepted client streams.
pub trait Acceptor {
    type Stream: AsyncRead + AsyncWrite + Unpin + Send + 'static;

    fn accept(&self) -> impl Future<Output = io::Result<(Self::Stream, SocketAddr)>> + Send;
}

impl Acceptor for TcpListener {
    type Stream = TcpStream;

    fn accept(&self) -> impl Future<Output = io::Result<(TcpStream, SocketAddr)>> + Send {
        TcpListener::accept(self)
    }
}

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", cfg.listen_addr))?;
    info!(
        addr = %cfg.listen_addr,
        directory = %cfg.directory.display(),
        "Listening"
    );

    let router = Router::new(FileService::new(cfg.directory.clone()));
    serve(listener, router, cfg.limits()).await
}

/// Accepts connections forever, one task per connection.
///
/// Accept failures are logged and retried after a short pause; they never
/// end the loop.
pub async fn serve<A: Acceptor>(listener: A, router: Router, limits: Limits) -> anyhow::Result<()> {
    let router = Arc::new(router);

    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to accept connection");
                tokio::time::sleep(ACCEPT_BACKOFF).await;
                continue;
            }
        };
        info!("Accepted connection from {}", peer);

        let router = router.clone();
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, router).with_limits(limits);
            if let Err(e) = conn.run().await {
                tracing::error!("Connection error from {}: {}", peer, e);
            }
            tracing::debug!(%peer, "Connection closed");
        });
    }
}
