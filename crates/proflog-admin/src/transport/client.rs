//! Admin socket client.
//!
//! Every request uses a fresh connection: write one request frame, read one
//! response frame, close. Failures are returned as `ProflogError`, whose
//! `Display` is the descriptive message for the operator.

use std::path::{Path, PathBuf};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::UnixStream;

use proflog_core::error::{ProflogError, Result};
use proflog_core::protocol::frame::{self, Status};
use proflog_core::protocol::{ErrorBody, RESPONSE_HEADER_LEN};

use crate::transport::transport;

/// Upper bound on a response body the client is willing to buffer.
pub const MAX_RESPONSE_BYTES: usize = 64 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct AdminSocketClient {
    path: PathBuf,
}

impl AdminSocketClient {
    /// Check that a listener is bound at `path`.
    ///
    /// Fails with `Transport` when the path does not exist, is not
    /// accessible, or nobody is accepting on it. The check connection is
    /// half-closed without sending anything, which the server treats as a
    /// quiet close rather than a failed request.
    pub async fn connect(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut check = open(&path).await?;
        let _ = check.shutdown().await;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Fetch the counter dump (empty request).
    pub async fn get_message(&self) -> Result<String> {
        self.request(b"").await
    }

    /// Send one request and return the response text.
    pub async fn request(&self, body: &[u8]) -> Result<String> {
        let mut stream = open(&self.path).await?;

        let req = frame::encode_request(body)?;
        stream
            .write_all(&req)
            .await
            .map_err(|e| transport("write request", e))?;

        let mut header = [0u8; RESPONSE_HEADER_LEN];
        stream
            .read_exact(&mut header)
            .await
            .map_err(|e| transport("read response header", e))?;
        let header = frame::decode_response_header(&mut &header[..])?;
        if header.len > MAX_RESPONSE_BYTES {
            return Err(ProflogError::Transport(format!(
                "response of {} bytes exceeds client limit",
                header.len
            )));
        }

        let mut payload = vec![0u8; header.len];
        stream
            .read_exact(&mut payload)
            .await
            .map_err(|e| transport("read response body", e))?;

        match header.status {
            Status::Ok => String::from_utf8(payload)
                .map_err(|e| ProflogError::Transport(format!("response is not utf-8: {e}"))),
            Status::Error => Err(ErrorBody::parse(&payload)?.into_error()),
        }
    }
}

async fn open(path: &Path) -> Result<UnixStream> {
    UnixStream::connect(path)
        .await
        .map_err(|e| transport(&format!("connect {}", path.display()), e))
}
