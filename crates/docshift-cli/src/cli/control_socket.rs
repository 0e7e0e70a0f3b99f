//! Control socket: server (during `docshift serve`) and one-shot client.
//! Protocol: one JSON message per line, one JSON response line per message
//! (see `docshift_core::intercept::wire`).

use anyhow::{Context, Result};
use docshift_core::intercept::{wire, Interceptor};
use docshift_core::verify::Verifier;
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};

/// Binds `path` and spawns the accept loop. Each connection is served on its
/// own task; lines on one connection are handled in order.
pub fn spawn_control_listener<V: Verifier + 'static>(
    interceptor: Arc<Interceptor<V>>,
    path: impl AsRef<Path>,
) -> Result<tokio::task::JoinHandle<()>> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create dir: {}", parent.display()))?;
    }
    let _ = std::fs::remove_file(path);
    let listener = UnixListener::bind(path)
        .with_context(|| format!("bind control socket: {}", path.display()))?;

    let handle = tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((stream, _)) => {
                    let interceptor = Arc::clone(&interceptor);
                    tokio::spawn(serve_connection(interceptor, stream));
                }
                Err(e) => tracing::debug!("control socket accept: {}", e),
            }
        }
    });
    Ok(handle)
}

async fn serve_connection<V: Verifier + 'static>(
    interceptor: Arc<Interceptor<V>>,
    stream: UnixStream,
) {
    let (read, mut write) = stream.into_split();
    let mut lines = BufReader::new(read).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut out = wire::handle_line(&interceptor, line).await.to_string();
        out.push('\n');
        if let Err(e) = write.write_all(out.as_bytes()).await {
            // Peer left while we were working; nothing to report to.
            tracing::debug!("control socket write: {}", e);
            break;
        }
    }
}

/// Sends one message line and returns the response line.
/// `Ok(None)` if no server is listening at `socket_path`.
pub async fn send_line(socket_path: &Path, line: &str) -> Result<Option<String>> {
    if !socket_path.exists() {
        return Ok(None);
    }
    let stream = match UnixStream::connect(socket_path).await {
        Ok(s) => s,
        Err(e) if e.kind() == std::io::ErrorKind::ConnectionRefused => return Ok(None),
        Err(e) => {
            return Err(e).with_context(|| format!("connect: {}", socket_path.display()))
        }
    };
    let (read, mut write) = stream.into_split();
    write
        .write_all(format!("{}\n", line.trim()).as_bytes())
        .await?;
    let mut lines = BufReader::new(read).lines();
    Ok(lines.next_line().await?)
}
