//! Extraction of address ranges from WHOIS `inetnum` lines.

use lazy_static::lazy_static;
use regex::Regex;
use std::net::Ipv4Addr;

use super::SkipReason;
use crate::models::IpRange;

lazy_static! {
    static ref RE_INETNUM: Regex = Regex::new(r"inetnum.*").expect("Invalid Regex?");
    static ref RE_IPV4: Regex =
        Regex::new(r"([0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3})").expect("Invalid Regex?");
}

/// Outcome for one `inetnum` line.
pub type LineResult = Result<IpRange, SkipReason>;

/// Parse every `inetnum` line of a WHOIS reply, in reply order.
///
/// Only the text from the marker to the end of the line is looked at. A line
/// yields a range when it holds exactly two dotted quads that both parse as
/// IPv4 addresses; anything else comes back as a [`SkipReason`].
pub fn parse_inetnum_lines(reply: &str) -> Vec<LineResult> {
    RE_INETNUM
        .find_iter(reply)
        .map(|m| parse_inetnum_line(m.as_str()))
        .collect()
}

/// Parse the tail of a single line starting at the `inetnum` marker.
pub fn parse_inetnum_line(line: &str) -> LineResult {
    let tokens: Vec<&str> = RE_IPV4.find_iter(line).map(|m| m.as_str()).collect();
    let [start, end] = tokens[..] else {
        return Err(SkipReason::WrongTokenCount {
            line: line.trim_end().to_string(),
            found: tokens.iter().map(|t| t.to_string()).collect(),
        });
    };
    Ok(IpRange::new(parse_token(start)?, parse_token(end)?))
}

fn parse_token(token: &str) -> Result<Ipv4Addr, SkipReason> {
    token.parse().map_err(|_| SkipReason::InvalidAddress {
        token: token.to_string(),
    })
}
