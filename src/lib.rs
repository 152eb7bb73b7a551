// cargo watch -x 'fmt' -x 'run'  // 'run -- --port 8080'

pub mod config;
pub mod models;
pub mod server;
pub mod sources;

pub use config::Config;
pub use models::{range_to_cidr, Cidr, IpRange};
pub use server::{router, serve, AppState};
