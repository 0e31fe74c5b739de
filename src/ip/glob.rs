//! Wildcard (glob-style) IPv4 ranges.
//!
//! A glob is a four-octet dotted expression where an octet is a decimal
//! literal, a hyphenated range `a-b`, or `*` (shorthand for `0-255`).
//! Wildcards are confined to a contiguous suffix: everything to the right
//! of the first range octet must cover the full `0-255`. That restriction
//! is exactly what makes a glob equal to one contiguous integer interval.
//!
//! Globs only exist for IPv4; IPv6 input is a conversion error.

use std::fmt;
use std::str::FromStr;

use crate::error::{AddrConversionError, AddrFormatError, Error};
use crate::strategy::AddrFamily;

use super::address::IpAddress;
use super::network::{AddrIter, IpNetwork};
use super::range::IpRange;

const FAMILY: &str = "IPv4 glob";

/// One glob octet as a closed interval of octet values.
type Octet = (u8, u8);

/// A shell-glob style IPv4 range.
///
/// # Example
///
/// ```
/// use addrkit::IpGlob;
///
/// let glob: IpGlob = "192.0.2.*".parse().unwrap();
/// assert_eq!(glob.range().to_string(), "192.0.2.0-192.0.2.255");
/// assert_eq!(glob.cidrs()[0].to_string(), "192.0.2.0/24");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IpGlob {
    octets: [Octet; 4],
}

impl IpGlob {
    /// Parse a glob expression.
    pub fn new(text: &str) -> Result<Self, AddrFormatError> {
        let parts: Vec<&str> = text.split('.').collect();
        if parts.len() != 4 {
            return Err(AddrFormatError::syntax(FAMILY, text, "expected four octets"));
        }

        let mut octets = [(0u8, 0u8); 4];
        for (i, part) in parts.iter().enumerate() {
            octets[i] = parse_octet(part, text)?;
        }

        // Once an octet spans more than one value, every octet to its right
        // must span the full 0-255; anything narrower breaks contiguity.
        let mut widened = false;
        for &(lo, hi) in &octets {
            if widened && (lo, hi) != (0, 255) {
                return Err(AddrFormatError::syntax(
                    FAMILY,
                    text,
                    "wildcards must form a contiguous suffix",
                ));
            }
            if lo != hi {
                widened = true;
            }
        }

        Ok(IpGlob { octets })
    }

    /// The contiguous address interval this glob denotes.
    pub fn range(&self) -> IpRange {
        let mut first = 0u128;
        let mut last = 0u128;
        for &(lo, hi) in &self.octets {
            first = (first << 8) | u128::from(lo);
            last = (last << 8) | u128::from(hi);
        }
        IpRange::from_values(first, last, AddrFamily::Ipv4)
    }

    /// Minimal CIDR decomposition of the glob.
    pub fn cidrs(&self) -> Vec<IpNetwork> {
        self.range().cidrs()
    }

    /// Number of addresses covered.
    pub fn size(&self) -> u128 {
        self.range().size()
    }

    /// True when the address falls inside the glob.
    pub fn contains_addr(&self, ip: &IpAddress) -> bool {
        self.range().contains_addr(ip)
    }

    /// Iterate every address covered, lazily.
    pub fn iter(&self) -> AddrIter {
        self.range().iter()
    }
}

fn parse_octet(part: &str, original: &str) -> Result<Octet, AddrFormatError> {
    if part == "*" {
        return Ok((0, 255));
    }
    if let Some((lo, hi)) = part.split_once('-') {
        let lo = parse_octet_value(lo, original)?;
        let hi = parse_octet_value(hi, original)?;
        if lo > hi {
            return Err(AddrFormatError::syntax(
                FAMILY,
                original,
                "range start exceeds range end",
            ));
        }
        return Ok((lo, hi));
    }
    let v = parse_octet_value(part, original)?;
    Ok((v, v))
}

fn parse_octet_value(text: &str, original: &str) -> Result<u8, AddrFormatError> {
    if text.is_empty() || text.len() > 3 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AddrFormatError::syntax(FAMILY, original, "bad octet"));
    }
    text.parse()
        .map_err(|_| AddrFormatError::syntax(FAMILY, original, "octet out of range"))
}

impl fmt::Display for IpGlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &(lo, hi)) in self.octets.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            match (lo, hi) {
                (0, 255) => f.write_str("*")?,
                (lo, hi) if lo == hi => write!(f, "{lo}")?,
                (lo, hi) => write!(f, "{lo}-{hi}")?,
            }
        }
        Ok(())
    }
}

impl FromStr for IpGlob {
    type Err = AddrFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IpGlob::new(s)
    }
}

/// True if `text` is a well-formed glob. Never fails.
pub fn valid_glob(text: &str) -> bool {
    IpGlob::new(text).is_ok()
}

/// Parse a glob and return its address interval.
pub fn glob_to_iprange(text: &str) -> Result<IpRange, AddrFormatError> {
    Ok(IpGlob::new(text)?.range())
}

/// Parse a glob and decompose it into CIDRs.
pub fn glob_to_cidrs(text: &str) -> Result<Vec<IpNetwork>, AddrFormatError> {
    Ok(IpGlob::new(text)?.cidrs())
}

/// Cover an arbitrary IPv4 range with one or more globs.
///
/// A range expressible as a single glob yields exactly one; otherwise the
/// range is decomposed into CIDRs first, each of which always has a glob.
pub fn iprange_to_globs(start: &IpAddress, end: &IpAddress) -> Result<Vec<IpGlob>, Error> {
    let range = IpRange::new(start.clone(), end.clone())?;
    if range.family() != AddrFamily::Ipv4 {
        return Err(AddrConversionError::Unrepresentable {
            addr: range.to_string(),
            target: "IPv4 glob",
        }
        .into());
    }

    if let Some(glob) = interval_to_glob(range.first_value() as u32, range.last_value() as u32) {
        return Ok(vec![glob]);
    }

    let mut globs = Vec::new();
    for cidr in range.cidrs() {
        let glob = interval_to_glob(cidr.first_value() as u32, cidr.last_value() as u32)
            .ok_or_else(|| AddrConversionError::Unrepresentable {
                addr: cidr.to_string(),
                target: "IPv4 glob",
            })?;
        globs.push(glob);
    }
    Ok(globs)
}

/// Render an aligned IPv4 CIDR as the single glob covering it.
pub fn cidr_to_glob(net: &IpNetwork) -> Result<IpGlob, Error> {
    if net.family() != AddrFamily::Ipv4 {
        return Err(AddrConversionError::Unrepresentable {
            addr: net.to_string(),
            target: "IPv4 glob",
        }
        .into());
    }
    interval_to_glob(net.first_value() as u32, net.last_value() as u32).ok_or_else(|| {
        AddrConversionError::Unrepresentable {
            addr: net.to_string(),
            target: "IPv4 glob",
        }
        .into()
    })
}

/// Build a glob for `[first, last]` when one exists: at most one partial
/// range octet, full wildcards after it.
fn interval_to_glob(first: u32, last: u32) -> Option<IpGlob> {
    let lo = first.to_be_bytes();
    let hi = last.to_be_bytes();
    let mut octets = [(0u8, 0u8); 4];
    let mut widened = false;

    for i in 0..4 {
        if widened && !(lo[i] == 0 && hi[i] == 255) {
            return None;
        }
        if lo[i] > hi[i] {
            return None;
        }
        octets[i] = (lo[i], hi[i]);
        if lo[i] != hi[i] {
            widened = true;
        }
    }
    Some(IpGlob { octets })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_forms() {
        assert!(valid_glob("192.0.2.1"));
        assert!(valid_glob("192.0.2.*"));
        assert!(valid_glob("192.0.2.0-31"));
        assert!(valid_glob("192.0.2-3.*"));
        assert!(valid_glob("*.*.*.*"));
    }

    #[test]
    fn test_parse_rejects_bad_globs() {
        for bad in [
            "192.0.2",       // three octets
            "192.0.2.1.5",   // five octets
            "192.0.*.1",     // literal after wildcard
            "192.0-1.2.3",   // literal after range
            "192.0.2.5-1",   // inverted range
            "192.0.2.0-256", // out of range
            "a.b.c.*",
        ] {
            assert!(!valid_glob(bad), "{bad:?}");
        }
    }

    #[test]
    fn test_range_after_range_needs_full_span() {
        // A second partial range would break contiguity.
        assert!(!valid_glob("10.0-1.0-1.*"));
        // But a full 0-255 written out behaves like '*'.
        assert!(valid_glob("10.0-1.0-255.*"));
    }

    #[test]
    fn test_glob_to_range() {
        assert_eq!(
            glob_to_iprange("192.0.2.*").unwrap().to_string(),
            "192.0.2.0-192.0.2.255"
        );
        assert_eq!(
            glob_to_iprange("10.0.0.1-5").unwrap().to_string(),
            "10.0.0.1-10.0.0.5"
        );
        assert_eq!(
            glob_to_iprange("*.*.*.*").unwrap().to_string(),
            "0.0.0.0-255.255.255.255"
        );
    }

    #[test]
    fn test_glob_to_cidrs() {
        let cidrs: Vec<String> = glob_to_cidrs("192.0.*.*")
            .unwrap()
            .iter()
            .map(|c| c.to_string())
            .collect();
        assert_eq!(cidrs, ["192.0.0.0/16"]);
    }

    #[test]
    fn test_cidr_to_glob() {
        let net = IpNetwork::new("192.0.2.0/24").unwrap();
        assert_eq!(cidr_to_glob(&net).unwrap().to_string(), "192.0.2.*");

        let quarter = IpNetwork::new("192.0.2.64/26").unwrap();
        assert_eq!(cidr_to_glob(&quarter).unwrap().to_string(), "192.0.2.64-127");

        let v6 = IpNetwork::new("2001:db8::/64").unwrap();
        assert!(cidr_to_glob(&v6).is_err());
    }

    #[test]
    fn test_iprange_to_globs_single() {
        let start = IpAddress::new("10.0.0.0").unwrap();
        let end = IpAddress::new("10.0.31.255").unwrap();
        let globs = iprange_to_globs(&start, &end).unwrap();
        assert_eq!(globs.len(), 1);
        assert_eq!(globs[0].to_string(), "10.0.0-31.*");
    }

    #[test]
    fn test_iprange_to_globs_multi() {
        // Not expressible as one glob; falls back to per-CIDR globs.
        let start = IpAddress::new("10.0.0.5").unwrap();
        let end = IpAddress::new("10.0.1.67").unwrap();
        let globs = iprange_to_globs(&start, &end).unwrap();
        assert!(globs.len() > 1);

        // The globs jointly cover exactly the range.
        let mut covered: Vec<(u128, u128)> = globs
            .iter()
            .map(|g| {
                let r = g.range();
                (r.first().value(), r.last().value())
            })
            .collect();
        covered.sort_unstable();
        assert_eq!(covered.first().unwrap().0, start.value());
        assert_eq!(covered.last().unwrap().1, end.value());
        for pair in covered.windows(2) {
            assert_eq!(pair[0].1 + 1, pair[1].0);
        }
    }

    #[test]
    fn test_display_round_trip() {
        for text in ["192.0.2.1", "192.0.2.*", "10.0.0.1-5", "*.*.*.*", "192.0.2-3.*"] {
            let glob = IpGlob::new(text).unwrap();
            assert_eq!(glob.to_string(), text);
            assert_eq!(IpGlob::new(&glob.to_string()).unwrap(), glob);
        }
    }

    #[test]
    fn test_size_and_membership() {
        let glob = IpGlob::new("192.0.2-3.*").unwrap();
        assert_eq!(glob.size(), 512);
        assert!(glob.contains_addr(&IpAddress::new("192.0.3.7").unwrap()));
        assert!(!glob.contains_addr(&IpAddress::new("192.0.4.0").unwrap()));
    }
}
