//! Runtime configuration.
//!
//! Values come from the command line, falling back to `IPLISTS_*` environment
//! variables (a `.env` file is loaded first by `main`) and then the defaults below.

use clap::Parser;
use std::net::{IpAddr, SocketAddr};

pub const DEFAULT_BIND: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_AWS_URL: &str = "https://ip-ranges.amazonaws.com/ip-ranges.json";
pub const DEFAULT_WHOIS_HOST: &str = "whois.apnic.net";
pub const DEFAULT_WHOIS_QUERY: &str = "HINET-NET";
pub const DEFAULT_LOG_CONFIG: &str = "log4rs.yml";

/// WHOIS service port (RFC 3912).
pub const WHOIS_PORT: u16 = 43;
/// Upper bound on a WHOIS reply; APNIC answers for HINET-NET are a few KiB.
pub const WHOIS_MAX_REPLY_BYTES: usize = 1024 * 1024;

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(author, version, about = "Republish AWS and HINET address ranges as CIDR lists", long_about = None)]
pub struct Config {
    /// The address to listen on
    #[arg(long, env = "IPLISTS_BIND", default_value = DEFAULT_BIND)]
    pub bind: IpAddr,

    /// The port to listen on
    #[arg(long, env = "IPLISTS_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// URL of the AWS ip-ranges.json feed
    #[arg(long, env = "IPLISTS_AWS_URL", default_value = DEFAULT_AWS_URL)]
    pub aws_url: String,

    /// WHOIS server queried for /hinet
    #[arg(long, env = "IPLISTS_WHOIS_HOST", default_value = DEFAULT_WHOIS_HOST)]
    pub whois_host: String,

    /// WHOIS query string sent for /hinet
    #[arg(long, env = "IPLISTS_WHOIS_QUERY", default_value = DEFAULT_WHOIS_QUERY)]
    pub whois_query: String,

    /// log4rs configuration file
    #[arg(long, env = "IPLISTS_LOG_CONFIG", default_value = DEFAULT_LOG_CONFIG)]
    pub log_config: String,
}

impl Config {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind: IpAddr::from([127, 0, 0, 1]),
            port: DEFAULT_PORT,
            aws_url: DEFAULT_AWS_URL.to_string(),
            whois_host: DEFAULT_WHOIS_HOST.to_string(),
            whois_query: DEFAULT_WHOIS_QUERY.to_string(),
            log_config: DEFAULT_LOG_CONFIG.to_string(),
        }
    }
}
