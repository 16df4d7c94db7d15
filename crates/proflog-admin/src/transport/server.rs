//! Admin socket server.
//!
//! Responsibilities:
//! - Own the listener lifecycle: `apply_changes` (re)binds whenever the admin
//!   section changes, an empty path unbinds, `shutdown` unbinds for good.
//! - Run every accepted connection in its own task:
//!   ACCEPTED -> READ_REQUEST -> DISPATCH -> WRITE_RESPONSE -> CLOSED.
//! - Answer malformed or unknown requests with an error frame; only a broken
//!   connection ends without a response.
//!
//! The registry lock is taken inside dispatch while the text is rendered and
//! is released before the response is written.

use std::io;
use std::os::unix::fs::FileTypeExt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use bytes::{Bytes, BytesMut};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{timeout, Instant};
use tracing::Instrument;

use proflog_core::error::{ProflogError, Result};
use proflog_core::protocol::frame::{self, Status};
use proflog_core::protocol::{ErrorBody, REQUEST_HEADER_LEN};

use crate::app_state::AppState;
use crate::config::AdminSection;
use crate::transport::transport;

/// Back-off after a failed `accept` so a persistent error does not spin.
const ACCEPT_RETRY_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy)]
struct Limits {
    request_timeout: Duration,
    max_request_bytes: usize,
}

/// A live listener. Dropping it stops the accept loop and unlinks the path.
struct Bound {
    section: AdminSection,
    path: PathBuf,
    task: JoinHandle<()>,
}

impl Bound {
    async fn stop(mut self) {
        self.task.abort();
        let _ = (&mut self.task).await;
    }
}

impl Drop for Bound {
    fn drop(&mut self) {
        self.task.abort();
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(path = %self.path.display(), error = %e, "admin socket unlink failed"),
        }
        tracing::info!(path = %self.path.display(), "admin socket unbound");
    }
}

/// Process-scoped admin socket service.
pub struct AdminSocket {
    state: AppState,
    bound: Mutex<Option<Bound>>,
    /// Connection ids for log spans, unique across rebinds of this socket.
    conn_seq: Arc<AtomicU64>,
}

impl AdminSocket {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            bound: Mutex::new(None),
            conn_seq: Arc::new(AtomicU64::new(1)),
        }
    }

    /// React to a configuration change.
    ///
    /// An unchanged section is a no-op. Otherwise the current listener (if
    /// any) is torn down and, for a non-empty path, a new one is bound. A bind
    /// failure is logged and returned; the socket then stays disabled.
    /// An invalid section is rejected without touching the current listener.
    pub async fn apply_changes(&self, section: &AdminSection) -> Result<()> {
        section.validate()?;

        let mut bound = self.bound.lock().await;
        if bound.as_ref().is_some_and(|b| b.section == *section) {
            return Ok(());
        }

        if let Some(old) = bound.take() {
            old.stop().await;
        }

        if !section.enabled() {
            tracing::info!("admin socket disabled");
            return Ok(());
        }

        match bind(section, self.state.clone(), Arc::clone(&self.conn_seq)) {
            Ok(b) => {
                *bound = Some(b);
                Ok(())
            }
            Err(e) => {
                tracing::error!(path = %section.socket_path, error = %e, "admin socket bind failed; staying disabled");
                Err(e)
            }
        }
    }

    /// Unbind the listener, if any.
    pub async fn shutdown(&self) {
        if let Some(old) = self.bound.lock().await.take() {
            old.stop().await;
        }
    }

    /// Path currently listened on.
    pub async fn bound_path(&self) -> Option<PathBuf> {
        self.bound.lock().await.as_ref().map(|b| b.path.clone())
    }
}

fn bind(section: &AdminSection, state: AppState, conn_seq: Arc<AtomicU64>) -> Result<Bound> {
    let path = PathBuf::from(&section.socket_path);
    remove_stale(&path)?;

    let listener = UnixListener::bind(&path)
        .map_err(|e| ProflogError::Configuration(format!("bind {}: {e}", path.display())))?;
    tracing::info!(path = %path.display(), "admin socket listening");

    let limits = Limits {
        request_timeout: section.request_timeout(),
        max_request_bytes: section.max_request_bytes,
    };
    let task = tokio::spawn(accept_loop(listener, state, limits, conn_seq));

    Ok(Bound {
        section: section.clone(),
        path,
        task,
    })
}

/// A socket file left behind by a previous process is replaced; anything
/// else at the path is a configuration error.
fn remove_stale(path: &Path) -> Result<()> {
    match std::fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_socket() => {
            tracing::debug!(path = %path.display(), "removing stale admin socket");
            std::fs::remove_file(path).map_err(|e| {
                ProflogError::Configuration(format!("remove stale socket {}: {e}", path.display()))
            })
        }
        Ok(_) => Err(ProflogError::Configuration(format!(
            "{} exists and is not a socket",
            path.display()
        ))),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(ProflogError::Configuration(format!("stat {}: {e}", path.display()))),
    }
}

async fn accept_loop(listener: UnixListener, state: AppState, limits: Limits, conn_seq: Arc<AtomicU64>) {
    loop {
        match listener.accept().await {
            Ok((stream, _addr)) => {
                let conn = conn_seq.fetch_add(1, Ordering::Relaxed);
                let span = tracing::debug_span!("admin_conn", conn);
                let state = state.clone();
                tokio::spawn(
                    async move {
                        if let Err(e) = handle_connection(state, stream, limits).await {
                            tracing::debug!(error = %e, "admin connection ended without response");
                        }
                    }
                    .instrument(span),
                );
            }
            Err(e) => {
                tracing::warn!(error = %e, "admin socket accept failed");
                tokio::time::sleep(ACCEPT_RETRY_DELAY).await;
            }
        }
    }
}

async fn handle_connection(state: AppState, mut stream: UnixStream, limits: Limits) -> Result<()> {
    let request = timeout(limits.request_timeout, read_request(&mut stream, limits.max_request_bytes))
        .await
        .map_err(|_| ProflogError::Transport("request read timed out".into()))?;

    let started = Instant::now();
    let reply = match request {
        // Peer closed before sending a byte (e.g. a client's reachability check).
        Ok(None) => {
            tracing::trace!("admin connection closed without request");
            return Ok(());
        }
        Ok(Some(body)) => {
            state
                .dispatcher()
                .dispatch(&state.command_ctx(), &body)
                .await
        }
        // Nothing usable arrived; no one to answer.
        Err(e @ ProflogError::Transport(_)) => return Err(e),
        Err(e) => Err(e),
    };
    state.metrics().record(reply.is_ok(), started.elapsed());

    let frame = match &reply {
        Ok(text) => frame::encode_response(Status::Ok, text.as_bytes())?,
        Err(e) => {
            tracing::debug!(error = %e, "admin request failed");
            frame::encode_response(Status::Error, ErrorBody::from_error(e).to_json().as_bytes())?
        }
    };

    timeout(limits.request_timeout, stream.write_all(&frame))
        .await
        .map_err(|_| ProflogError::Transport("response write timed out".into()))?
        .map_err(|e| transport("write response", e))?;
    let _ = stream.shutdown().await;
    Ok(())
}

/// `Ok(None)` when the peer closes before the first header byte.
async fn read_request(stream: &mut UnixStream, max_request_bytes: usize) -> Result<Option<Bytes>> {
    let mut header = [0u8; REQUEST_HEADER_LEN];
    let mut filled = 0;
    while filled < REQUEST_HEADER_LEN {
        let n = stream
            .read(&mut header[filled..])
            .await
            .map_err(|e| transport("read request header", e))?;
        if n == 0 {
            if filled == 0 {
                return Ok(None);
            }
            return Err(ProflogError::Transport("read request header: early eof".into()));
        }
        filled += n;
    }
    let len = frame::decode_request_len(&mut &header[..])?;

    if len > max_request_bytes {
        // Drain the body so the peer sees our error frame instead of a reset.
        let mut rest = (&mut *stream).take(len as u64);
        tokio::io::copy(&mut rest, &mut tokio::io::sink())
            .await
            .map_err(|e| transport("drain oversize request", e))?;
        return Err(ProflogError::PayloadTooLarge);
    }

    let mut body = BytesMut::zeroed(len);
    stream
        .read_exact(&mut body)
        .await
        .map_err(|e| transport("read request body", e))?;
    Ok(Some(body.freeze()))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[tokio::test]
    async fn close_before_any_byte_is_not_a_request() {
        let (mut server, mut peer) = UnixStream::pair().unwrap();
        peer.shutdown().await.unwrap();
        assert!(read_request(&mut server, 64).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn close_mid_header_is_a_transport_error() {
        let (mut server, mut peer) = UnixStream::pair().unwrap();
        peer.write_all(&[0, 0]).await.unwrap();
        peer.shutdown().await.unwrap();
        let err = read_request(&mut server, 64).await.expect_err("truncated header");
        assert_eq!(err.client_code().as_str(), "TRANSPORT");
    }

    #[tokio::test]
    async fn header_split_across_writes_is_reassembled() {
        let (mut server, mut peer) = UnixStream::pair().unwrap();
        peer.write_all(&[0, 0]).await.unwrap();
        peer.write_all(&[0, 2]).await.unwrap();
        peer.write_all(b"hi").await.unwrap();
        let body = read_request(&mut server, 64).await.unwrap().unwrap();
        assert_eq!(&body[..], b"hi");
    }
}
