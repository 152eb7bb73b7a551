//! Domain models for iplists.
//!
//! - [`Cidr`] - IPv4 block in CIDR notation, plus the [`range_to_cidr`] reducer
//! - [`IpRange`] - inclusive start/end address pair

mod ipv4;
mod range;

// Re-export public types
pub use ipv4::{broadcast_addr, cut_addr, get_cidr_mask, range_to_cidr, Cidr, MAX_LENGTH};
pub use range::IpRange;
