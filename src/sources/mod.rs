//! Upstream range sources.
//!
//! - [`aws`] - AWS `ip-ranges.json` feed and its exclusion rule
//! - [`whois`] - WHOIS query over TCP
//! - [`inetnum`] - range extraction from WHOIS text

pub mod aws;
mod error;
pub mod inetnum;
pub mod whois;

use futures::future::BoxFuture;

pub use aws::{is_excluded, AwsFeedClient, AwsIpRanges, AwsPrefix};
pub use error::{SkipReason, SourceError};
pub use inetnum::{parse_inetnum_line, parse_inetnum_lines, LineResult};
pub use whois::{PreparedWhois, WhoisRequest};

/// Where `/aws` gets its feed from.
pub trait AwsSource: Send + Sync {
    fn fetch(&self) -> BoxFuture<'_, Result<AwsIpRanges, SourceError>>;
}

/// Where `/hinet` gets its WHOIS text from.
pub trait WhoisSource: Send + Sync {
    fn fetch(&self) -> BoxFuture<'_, Result<String, SourceError>>;
}
