//! AWS published IP ranges (`ip-ranges.json`).
//!
//! Fetches the feed, keeps the IPv4 prefixes as published and applies the
//! region/service exclusion used by the `/aws` listing.

use chrono::NaiveDateTime;
use futures::future::BoxFuture;
use serde::Deserialize;

use super::{AwsSource, SourceError};

/// Format of the feed's `createDate` field, e.g. `2024-05-02-20-33-12`.
const CREATE_DATE_FORMAT: &str = "%Y-%m-%d-%H-%M-%S";

/// The parts of `ip-ranges.json` this service reads. Other fields, `ipv6_prefixes`
/// included, are ignored.
#[derive(Deserialize, Debug, Default, Clone)]
pub struct AwsIpRanges {
    #[serde(rename = "syncToken", default)]
    pub sync_token: String,
    #[serde(rename = "createDate", default)]
    pub create_date: String,
    pub prefixes: Vec<AwsPrefix>,
}

/// One IPv4 entry of the feed. `ip_prefix` is kept as the published text.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct AwsPrefix {
    pub ip_prefix: String,
    pub region: String,
    pub service: String,
}

impl AwsIpRanges {
    /// Parse the feed body. Errors carry the JSON path that failed.
    pub fn from_json(json: &str) -> Result<AwsIpRanges, SourceError> {
        let mut deserializer = serde_json::Deserializer::from_str(json);
        serde_path_to_error::deserialize(&mut deserializer).map_err(|e| SourceError::Feed {
            path: e.path().to_string(),
            message: e.inner().to_string(),
        })
    }

    /// Feed creation time, if `createDate` is in the documented format.
    pub fn created(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.create_date, CREATE_DATE_FORMAT).ok()
    }

    /// Prefixes that survive [`is_excluded`], in feed order.
    pub fn into_published_prefixes(self) -> impl Iterator<Item = String> {
        self.prefixes
            .into_iter()
            .filter(|p| !is_excluded(&p.region, &p.service))
            .map(|p| p.ip_prefix)
    }
}

/// Exclusion rule for the `/aws` listing.
///
/// Every `us-east-1` prefix is dropped whatever its service, and so is
/// `GLOBAL` + `AMAZON`. Other `AMAZON` prefixes stay.
pub fn is_excluded(region: &str, service: &str) -> bool {
    region == "us-east-1" || region == "GLOBAL" && service == "AMAZON"
}

/// Live feed over HTTPS.
pub struct AwsFeedClient {
    client: reqwest::Client,
    url: String,
}

impl AwsFeedClient {
    pub fn new(url: &str) -> Self {
        AwsFeedClient {
            client: reqwest::Client::new(),
            url: url.to_string(),
        }
    }

    pub async fn fetch(&self) -> Result<AwsIpRanges, SourceError> {
        log::debug!("GET {}", self.url);
        let body = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        log::debug!("Got {} bytes from {}", body.len(), self.url);

        let ranges = AwsIpRanges::from_json(&body)?;
        match ranges.created() {
            Some(created) => log::info!(
                "AWS feed syncToken={} created={created} prefixes={}",
                ranges.sync_token,
                ranges.prefixes.len()
            ),
            None => log::warn!(
                "AWS feed syncToken={} has unexpected createDate {:?}",
                ranges.sync_token,
                ranges.create_date
            ),
        }
        Ok(ranges)
    }
}

impl AwsSource for AwsFeedClient {
    fn fetch(&self) -> BoxFuture<'_, Result<AwsIpRanges, SourceError>> {
        Box::pin(AwsFeedClient::fetch(self))
    }
}
