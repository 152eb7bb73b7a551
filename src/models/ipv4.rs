//! IPv4 CIDR blocks and the range-to-prefix reducer.
//!
//! Provides [`Cidr`] for `addr/mask` blocks and [`range_to_cidr`], which turns an
//! inclusive start/end pair into the smallest prefix that covers both ends.

use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::net::Ipv4Addr;
use std::str::FromStr;

use super::IpRange;

/// Maximum length for an IPv4 prefix (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Reduce an inclusive `start`..`end` pair to a CIDR block.
///
/// The prefix length is the number of leading bits `start` and `end` share.
/// The block address is `start` as given, host bits are not cleared; callers
/// are expected to pass the network and broadcast address of a real block.
/// Argument order only changes the rendered address, never the mask.
///
/// # Examples
/// ```
/// use iplists::models::range_to_cidr;
/// use std::net::Ipv4Addr;
/// let cidr = range_to_cidr(Ipv4Addr::new(192, 168, 1, 0), Ipv4Addr::new(192, 168, 1, 255));
/// assert_eq!(cidr.to_string(), "192.168.1.0/24");
/// ```
pub fn range_to_cidr(start: Ipv4Addr, end: Ipv4Addr) -> Cidr {
    let diff = u32::from(start) ^ u32::from(end);
    // leading_zeros == 32 - (highest set bit + 1), and 32 when diff == 0
    let mask = diff.leading_zeros() as u8;
    Cidr { addr: start, mask }
}

/// Netmask bits for a prefix length, e.g. `/20` -> `255.255.240.0`.
///
/// # Examples
/// ```
/// use iplists::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(20).unwrap(), 0xFFFF_F000);
/// assert_eq!(get_cidr_mask(0).unwrap(), 0);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u32, Box<dyn Error>> {
    if len > MAX_LENGTH {
        return Err(format!("Prefix length /{len} is longer than /{MAX_LENGTH}").into());
    }
    // a /0 shifts by 32, which checked_shl refuses
    Ok(u32::MAX
        .checked_shl(u32::from(MAX_LENGTH - len))
        .unwrap_or(0))
}

/// Get the network address for a given IP and prefix length.
pub fn cut_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, Box<dyn Error>> {
    let mask = get_cidr_mask(len)?;
    Ok(Ipv4Addr::from(u32::from(addr) & mask))
}

/// Calculate the broadcast address for a given IP and prefix length.
pub fn broadcast_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, Box<dyn Error>> {
    let mask = get_cidr_mask(len)?;
    Ok(Ipv4Addr::from((u32::from(addr) & mask) | !mask))
}

/// IPv4 block in CIDR notation.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct Cidr {
    /// The block address as rendered, not necessarily the network address.
    pub addr: Ipv4Addr,
    /// The prefix length (0-32).
    pub mask: u8,
}

impl Serialize for Cidr {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Cidr {
    fn deserialize<D>(deserializer: D) -> Result<Cidr, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Cidr::new(&s).map_err(|e| de::Error::custom(format!("invalid CIDR {s}: {e}")))
    }
}

impl Cidr {
    /// Create a new [`Cidr`] from text such as "10.0.0.0/24".
    pub fn new(addr_cidr: &str) -> Result<Cidr, Box<dyn Error>> {
        let (addr, mask) = addr_cidr
            .trim()
            .split_once('/')
            .ok_or("Invalid address/mask")?;
        let addr = Ipv4Addr::from_str(addr).map_err(|_| format!("Invalid address {addr}"))?;
        let mask: u8 = mask.parse()?;
        if mask > MAX_LENGTH {
            return Err("Network length is too long".into());
        }
        Ok(Cidr { addr, mask })
    }

    /// Lowest (network) address of the block.
    pub fn lo(&self) -> Ipv4Addr {
        // mask <= MAX_LENGTH is kept by every constructor
        cut_addr(self.addr, self.mask).unwrap_or(self.addr)
    }

    /// Highest (broadcast) address of the block.
    pub fn hi(&self) -> Ipv4Addr {
        broadcast_addr(self.addr, self.mask).unwrap_or(self.addr)
    }

    /// Same block with the host bits cleared from the address.
    pub fn network(&self) -> Cidr {
        Cidr {
            addr: self.lo(),
            mask: self.mask,
        }
    }

    /// True when `addr` has no host bits set for this prefix length.
    pub fn is_network_aligned(&self) -> bool {
        self.addr == self.lo()
    }
}

impl From<IpRange> for Cidr {
    fn from(range: IpRange) -> Self {
        range_to_cidr(range.start, range.end)
    }
}

impl FromStr for Cidr {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Cidr::new(s)
    }
}

impl std::fmt::Display for Cidr {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(s: &str) -> Ipv4Addr {
        s.parse().unwrap()
    }

    #[test]
    fn test_range_to_cidr_single_address() {
        for s in ["0.0.0.0", "10.1.2.3", "192.168.1.42", "255.255.255.255"] {
            assert_eq!(range_to_cidr(ip(s), ip(s)).to_string(), format!("{s}/32"));
        }
    }

    #[test]
    fn test_range_to_cidr_full_space() {
        assert_eq!(
            range_to_cidr(ip("0.0.0.0"), ip("255.255.255.255")).to_string(),
            "0.0.0.0/0"
        );
    }

    #[test]
    fn test_range_to_cidr_blocks() {
        assert_eq!(
            range_to_cidr(ip("192.168.1.0"), ip("192.168.1.255")).to_string(),
            "192.168.1.0/24"
        );
        assert_eq!(
            range_to_cidr(ip("10.0.0.0"), ip("10.0.0.1")).to_string(),
            "10.0.0.0/31"
        );
        assert_eq!(
            range_to_cidr(ip("61.56.0.0"), ip("61.63.255.255")).to_string(),
            "61.56.0.0/13"
        );
        assert_eq!(
            range_to_cidr(ip("128.0.0.0"), ip("255.255.255.255")).to_string(),
            "128.0.0.0/1"
        );
    }

    #[test]
    fn test_range_to_cidr_mask_is_symmetric() {
        let pairs = [
            ("192.168.1.0", "192.168.1.255"),
            ("10.0.0.0", "10.0.0.1"),
            ("1.2.3.4", "200.1.1.1"),
            ("0.0.0.0", "255.255.255.255"),
        ];
        for (a, b) in pairs {
            let forward = range_to_cidr(ip(a), ip(b));
            let backward = range_to_cidr(ip(b), ip(a));
            assert_eq!(forward.mask, backward.mask, "{a} <-> {b}");
            assert_eq!(forward.addr, ip(a));
            assert_eq!(backward.addr, ip(b));
        }
    }

    #[test]
    fn test_range_to_cidr_keeps_unaligned_start() {
        // Not a real block: the rendered address is the start as given,
        // while the true network address has the host bits cleared.
        let cidr = range_to_cidr(ip("10.0.0.5"), ip("10.0.0.10"));
        assert_eq!(cidr.to_string(), "10.0.0.5/28");
        assert!(!cidr.is_network_aligned());
        assert_eq!(cidr.network().to_string(), "10.0.0.0/28");
    }

    #[test]
    fn test_range_to_cidr_covers_both_ends() {
        let cidr = range_to_cidr(ip("172.16.4.0"), ip("172.16.7.255"));
        assert_eq!(cidr.mask, 22);
        assert!(cidr.lo() <= ip("172.16.4.0"));
        assert!(cidr.hi() >= ip("172.16.7.255"));
    }

    #[test]
    fn test_get_cidr_mask() {
        assert_eq!(get_cidr_mask(0).unwrap(), 0x00000000);
        assert_eq!(get_cidr_mask(8).unwrap(), 0xFF000000);
        assert_eq!(get_cidr_mask(16).unwrap(), 0xFFFF0000);
        assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
        assert_eq!(get_cidr_mask(32).unwrap(), 0xFFFFFFFF);
        assert_eq!(
            get_cidr_mask(33).unwrap_err().to_string(),
            "Prefix length /33 is longer than /32"
        );
    }

    #[test]
    fn test_cut_addr() {
        let ip = Ipv4Addr::new(192, 168, 1, 42);
        assert_eq!(cut_addr(ip, 24).unwrap(), Ipv4Addr::new(192, 168, 1, 0));
        assert_eq!(cut_addr(ip, 16).unwrap(), Ipv4Addr::new(192, 168, 0, 0));
        assert_eq!(cut_addr(ip, 0).unwrap(), Ipv4Addr::new(0, 0, 0, 0));
        assert_eq!(cut_addr(ip, 32).unwrap(), Ipv4Addr::new(192, 168, 1, 42));
        assert!(cut_addr(ip, 33).is_err());
    }

    #[test]
    fn test_broadcast_addr() {
        let ip = Ipv4Addr::new(192, 168, 1, 0);
        assert_eq!(
            broadcast_addr(ip, 24).unwrap(),
            Ipv4Addr::new(192, 168, 1, 255)
        );
        assert_eq!(
            broadcast_addr(ip, 8).unwrap(),
            Ipv4Addr::new(192, 255, 255, 255)
        );
        assert_eq!(
            broadcast_addr(ip, 0).unwrap(),
            Ipv4Addr::new(255, 255, 255, 255)
        );
        assert_eq!(
            broadcast_addr(ip, 32).unwrap(),
            Ipv4Addr::new(192, 168, 1, 0)
        );
    }

    #[test]
    fn test_cidr_new() {
        let cidr = Cidr::new(" 10.0.0.0/24 ").unwrap();
        assert_eq!(cidr.addr, Ipv4Addr::new(10, 0, 0, 0));
        assert_eq!(cidr.mask, 24);
        assert!(Cidr::new("10.0.0.0").is_err());
        assert!(Cidr::new("10.0.0/24").is_err());
        assert!(Cidr::new("10.0.0.0/33").is_err());
        assert_eq!("3.5.140.0/22".parse::<Cidr>().unwrap().mask, 22);
    }

    #[test]
    fn test_cidr_serde() {
        let cidr = Cidr::new("52.95.245.0/24").unwrap();
        let json = serde_json::to_string(&cidr).unwrap();
        assert_eq!(json, r#""52.95.245.0/24""#);
        let back: Cidr = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cidr);
        assert!(serde_json::from_str::<Cidr>(r#""52.95.245.0""#).is_err());
    }

    #[test]
    fn test_cidr_from_range() {
        let range = IpRange::new(ip("1.2.3.0"), ip("1.2.3.255"));
        assert_eq!(Cidr::from(range).to_string(), "1.2.3.0/24");
    }
}
