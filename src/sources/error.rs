//! Errors raised while pulling ranges from an upstream source.

use thiserror::Error;

/// Failure that aborts a whole request; nothing is sent to the client.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("error parsing feed: path={path} error={message}")]
    Feed { path: String, message: String },

    #[error("invalid WHOIS request: {0}")]
    WhoisPrepare(String),

    #[error("WHOIS I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("WHOIS reply too large: more than {limit} bytes")]
    ReplyTooLarge { limit: usize },
}

/// Why a single WHOIS line produced no range. The rest of the reply is still used.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error("Expected exactly two addresses, found {found:?} in {line:?}")]
    WrongTokenCount { line: String, found: Vec<String> },

    #[error("{token} does not appear to be an ip.")]
    InvalidAddress { token: String },
}
