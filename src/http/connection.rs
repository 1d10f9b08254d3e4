use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use bytes::{Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::timeout;
use tracing::Instrument;

use crate::config::ServerConfig;
use crate::http::writer::ResponseWriter;
use crate::static_files::StaticHandler;

/// One accepted connection: a single request, a single response, then close.
pub struct Connection<S> {
    stream: S,
    handler: Arc<StaticHandler>,
    read_buffer_size: usize,
    read_timeout: Option<Duration>,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Bytes),
    Writing(ResponseWriter),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, handler: Arc<StaticHandler>, cfg: &ServerConfig) -> Self {
        Self {
            stream,
            handler,
            read_buffer_size: cfg.read_buffer_size,
            read_timeout: cfg.read_timeout_secs.map(Duration::from_secs),
            state: ConnectionState::Reading,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => match self.read_request().await? {
                    Some(raw) => {
                        self.state = ConnectionState::Processing(raw);
                    }
                    None => {
                        tracing::debug!("client closed before sending a request");
                        self.state = ConnectionState::Closed;
                    }
                },

                ConnectionState::Processing(raw) => {
                    let handler = Arc::clone(&self.handler);
                    let span = tracing::Span::current();
                    let outcome = tokio::task::spawn_blocking(move || {
                        let _entered = span.enter();
                        handler.handle(&raw)
                    })
                    .await
                    .context("request pipeline panicked")?;

                    tracing::info!(
                        status = outcome.status.as_u16(),
                        bytes = outcome.bytes.len(),
                        "response ready"
                    );
                    self.state = ConnectionState::Writing(ResponseWriter::new(outcome.bytes));
                }

                ConnectionState::Writing(mut writer) => {
                    writer.write_to_stream(&mut self.stream).await?;
                    if let Err(e) = self.stream.shutdown().await {
                        tracing::debug!(error = %e, "shutdown after response failed");
                    }
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Performs the one read a request gets. `None` means the peer sent nothing.
    pub async fn read_request(&mut self) -> anyhow::Result<Option<Bytes>> {
        let mut buf = BytesMut::zeroed(self.read_buffer_size);

        let read = self.stream.read(&mut buf[..]);
        let n = match self.read_timeout {
            Some(limit) => timeout(limit, read)
                .await
                .context("timed out waiting for request")??,
            None => read.await?,
        };

        if n == 0 {
            return Ok(None);
        }

        buf.truncate(n);
        Ok(Some(buf.freeze()))
    }
}

/// Drives a connection to completion inside a span carrying the peer address.
pub async fn serve_connection<S>(stream: S, peer: String, handler: Arc<StaticHandler>, cfg: ServerConfig)
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let span = tracing::info_span!("conn", peer = %peer);
    async move {
        let mut conn = Connection::new(stream, handler, &cfg);
        if let Err(e) = conn.run().await {
            tracing::error!(error = %e, "connection error");
        }
    }
    .instrument(span)
    .await
}
