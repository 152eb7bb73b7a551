//! Minimal WHOIS client (RFC 3912): send one query line, read until the server closes.

use futures::future::BoxFuture;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use super::{SourceError, WhoisSource};
use crate::config::{WHOIS_MAX_REPLY_BYTES, WHOIS_PORT};

/// A WHOIS query bound to one server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhoisRequest {
    pub query: String,
    pub host: String,
    pub port: u16,
}

/// A validated request, ready to be written to the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedWhois {
    pub addr: String,
    pub body: Vec<u8>,
}

impl WhoisRequest {
    pub fn new(query: &str, host: &str) -> Self {
        WhoisRequest {
            query: query.to_string(),
            host: host.to_string(),
            port: WHOIS_PORT,
        }
    }

    /// Validate the request and build the query line.
    pub fn prepare(&self) -> Result<PreparedWhois, SourceError> {
        let query = self.query.trim();
        if query.is_empty() {
            return Err(SourceError::WhoisPrepare("empty query".to_string()));
        }
        if query.contains(['\r', '\n']) {
            return Err(SourceError::WhoisPrepare(format!(
                "query contains a line break: {query:?}"
            )));
        }
        let host = self.host.trim();
        if host.is_empty() {
            return Err(SourceError::WhoisPrepare("empty host".to_string()));
        }
        Ok(PreparedWhois {
            addr: format!("{host}:{}", self.port),
            body: format!("{query}\r\n").into_bytes(),
        })
    }

    /// Prepare, send and read the full reply as text.
    pub async fn fetch(&self) -> Result<String, SourceError> {
        let prepared = self.prepare()?;
        log::debug!("WHOIS {} -> {}", self.query, prepared.addr);

        let mut stream = TcpStream::connect(&prepared.addr).await?;
        stream.write_all(&prepared.body).await?;
        stream.flush().await?;

        let mut reply = Vec::new();
        let limit = WHOIS_MAX_REPLY_BYTES as u64;
        (&mut stream).take(limit + 1).read_to_end(&mut reply).await?;
        if reply.len() as u64 > limit {
            return Err(SourceError::ReplyTooLarge {
                limit: WHOIS_MAX_REPLY_BYTES,
            });
        }
        log::debug!("WHOIS reply from {}: {} bytes", prepared.addr, reply.len());

        Ok(String::from_utf8_lossy(&reply).into_owned())
    }
}

impl WhoisSource for WhoisRequest {
    fn fetch(&self) -> BoxFuture<'_, Result<String, SourceError>> {
        Box::pin(WhoisRequest::fetch(self))
    }
}
