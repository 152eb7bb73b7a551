//! HTTP layer: `/aws` and `/hinet`, each answering a plain-text CIDR list.

mod handlers;

use axum::{routing::get, Router};
use colored::Colorize;
use std::error::Error;
use std::sync::Arc;

use crate::config::Config;
use crate::sources::{AwsFeedClient, AwsSource, WhoisRequest, WhoisSource};

pub use handlers::{cidr_lines, handle_aws, handle_hinet};

/// Source handles shared by every request. Nothing in here is mutated after startup.
#[derive(Clone)]
pub struct AppState {
    pub aws: Arc<dyn AwsSource>,
    pub whois: Arc<dyn WhoisSource>,
}

impl AppState {
    pub fn new(aws: Arc<dyn AwsSource>, whois: Arc<dyn WhoisSource>) -> Self {
        AppState { aws, whois }
    }

    /// Live sources as configured.
    pub fn from_config(config: &Config) -> Self {
        AppState::new(
            Arc::new(AwsFeedClient::new(&config.aws_url)),
            Arc::new(WhoisRequest::new(&config.whois_query, &config.whois_host)),
        )
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/aws", get(handle_aws))
        .route("/hinet", get(handle_hinet))
        .with_state(state)
}

/// Bind to the configured address and serve until the process is stopped.
pub async fn serve(config: &Config) -> Result<(), Box<dyn Error>> {
    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Error binding {addr}: {e}"))?;

    log::info!(
        "Listening on {addr} aws_url={aws} whois={query}@{host}",
        addr = addr.to_string().on_blue(),
        aws = config.aws_url,
        query = config.whois_query,
        host = config.whois_host,
    );

    axum::serve(listener, router(AppState::from_config(config))).await?;
    Ok(())
}
