//! Inclusive IPv4 address range.

use std::net::Ipv4Addr;

/// An inclusive `start`..`end` pair as published by a registry.
///
/// No ordering or alignment is enforced, the pair is kept as found.
#[derive(Eq, PartialEq, Debug, Copy, Clone, Hash)]
pub struct IpRange {
    pub start: Ipv4Addr,
    pub end: Ipv4Addr,
}

impl IpRange {
    pub fn new(start: Ipv4Addr, end: Ipv4Addr) -> Self {
        IpRange { start, end }
    }

    /// Number of addresses covered, counted on the unsigned 32-bit values.
    pub fn size(&self) -> u64 {
        let (lo, hi) = (u32::from(self.start), u32::from(self.end));
        u64::from(lo.abs_diff(hi)) + 1
    }

    /// True when `start <= end` as unsigned 32-bit integers.
    pub fn is_ordered(&self) -> bool {
        self.start <= self.end
    }
}

impl std::fmt::Display for IpRange {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}
