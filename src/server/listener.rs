use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::http::connection::serve_connection;
use crate::static_files::StaticHandler;

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.server.listen_addr).await?;
    info!("Listening on {}", listener.local_addr()?);
    info!(
        root = %cfg.static_files.root,
        error_pages = %cfg.static_files.error_pages,
        "Serving static files"
    );

    serve(listener, cfg).await
}

/// Accepts connections forever, one task per connection.
pub async fn serve(listener: TcpListener, cfg: &Config) -> anyhow::Result<()> {
    let handler = Arc::new(StaticHandler::new(Arc::new(cfg.static_files.clone())));

    loop {
        let (socket, peer) = listener.accept().await?;
        info!("Accepted connection from {}", peer);

        let handler = Arc::clone(&handler);
        let server_cfg = cfg.server.clone();
        tokio::spawn(serve_connection(socket, peer.to_string(), handler, server_cfg));
    }
}
