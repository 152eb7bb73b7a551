//! Request handlers.

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use colored::Colorize;
use futures::stream;
use itertools::{Either, Itertools};
use std::convert::Infallible;

use super::AppState;
use crate::models::Cidr;
use crate::sources::{parse_inetnum_lines, LineResult, SkipReason, SourceError};

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// `GET /aws`: the AWS feed's IPv4 prefixes minus the excluded region/service pairs.
pub async fn handle_aws(State(state): State<AppState>) -> Response {
    let ranges = match state.aws.fetch().await {
        Ok(ranges) => ranges,
        Err(e) => return handle_error("aws", e),
    };

    log::info!("/aws: filtering {} prefixes", ranges.prefixes.len());
    text_stream(
        ranges
            .into_published_prefixes()
            .map(|prefix| format!("{prefix}\n")),
    )
}

/// `GET /hinet`: WHOIS `inetnum` ranges reduced to CIDR blocks.
pub async fn handle_hinet(State(state): State<AppState>) -> Response {
    let reply = match state.whois.fetch().await {
        Ok(reply) => reply,
        Err(e) => return handle_error("hinet", e),
    };

    let (lines, skipped) = cidr_lines(parse_inetnum_lines(&reply));
    for reason in &skipped {
        log::warn!("/hinet: skipped line: {reason}");
    }
    log::info!(
        "/hinet: {} blocks, {} lines skipped",
        lines.len(),
        skipped.len()
    );

    text_stream(lines)
}

/// Reduce parsed WHOIS lines to output lines, keeping the skip reasons apart.
pub fn cidr_lines(results: Vec<LineResult>) -> (Vec<String>, Vec<SkipReason>) {
    results.into_iter().partition_map(|result| match result {
        Ok(range) => {
            let cidr = Cidr::from(range);
            log::debug!(
                "{range} ({size} addresses{order}) -> {cidr}",
                size = range.size(),
                order = if range.is_ordered() { "" } else { ", reversed" },
            );
            if !cidr.is_network_aligned() {
                log::warn!(
                    "{range} is not a block boundary, published as {cidr} (network {})",
                    cidr.network()
                );
            }
            Either::Left(format!("{cidr}\n"))
        }
        Err(reason) => Either::Right(reason),
    })
}

fn handle_error(route: &str, e: SourceError) -> Response {
    log::error!("{failed} /{route}: {e}", failed = "failed".on_red());
    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}

fn text_stream<I>(lines: I) -> Response
where
    I: IntoIterator<Item = String>,
    I::IntoIter: Send + 'static,
{
    let body = Body::from_stream(stream::iter(lines.into_iter().map(Ok::<_, Infallible>)));
    ([(header::CONTENT_TYPE, TEXT_PLAIN)], body).into_response()
}
