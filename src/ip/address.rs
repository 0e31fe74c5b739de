//! Individual IP addresses.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use compact_str::CompactString;
use smallvec::SmallVec;

use crate::error::{AddrConversionError, AddrFormatError};
use crate::flags::ParseFlags;
use crate::strategy::ipv6::Ipv6Dialect;
use crate::strategy::{ipv4, ipv6, AddrFamily};

use super::categories;

/// The IPv4-mapped marker bits (`::ffff:0:0/96`).
const MAPPED_BASE: u128 = 0xffff_0000_0000;

/// A single IPv4 or IPv6 address.
///
/// A value is the pair of an unsigned integer and its family strategy.
/// Values are immutable; every operation returns a fresh address. An IPv6
/// address may carry a `%zone` identifier which is preserved verbatim on
/// output but never takes part in comparison or arithmetic.
///
/// # Example
///
/// ```
/// use addrkit::IpAddress;
///
/// let ip: IpAddress = "192.168.0.1".parse().unwrap();
/// assert_eq!(ip.value(), 3232235521);
/// assert_eq!(ip.to_string(), "192.168.0.1");
/// assert!(ip.is_private());
/// ```
#[derive(Debug, Clone)]
pub struct IpAddress {
    value: u128,
    family: AddrFamily,
    zone: Option<CompactString>,
}

impl IpAddress {
    /// Parse an address with default flags, auto-detecting the family.
    pub fn new(text: &str) -> Result<Self, AddrFormatError> {
        Self::parse(text, ParseFlags::empty())
    }

    /// Parse an address under the given flags, auto-detecting the family.
    ///
    /// Detection is structural: anything containing `:` takes the IPv6
    /// grammar, everything else the IPv4 grammar.
    pub fn parse(text: &str, flags: ParseFlags) -> Result<Self, AddrFormatError> {
        if text.contains(':') {
            let (value, zone) = ipv6::parse_with_zone(text)?;
            Ok(IpAddress {
                value,
                family: AddrFamily::Ipv6,
                zone,
            })
        } else {
            let value = ipv4::parse(text, flags)?;
            Ok(IpAddress {
                value: u128::from(value),
                family: AddrFamily::Ipv4,
                zone: None,
            })
        }
    }

    /// Build from a bare integer: IPv4 when the value fits 32 bits, IPv6
    /// otherwise.
    pub fn from_int(value: u128) -> Self {
        let family = if value <= u128::from(u32::MAX) {
            AddrFamily::Ipv4
        } else {
            AddrFamily::Ipv6
        };
        IpAddress {
            value,
            family,
            zone: None,
        }
    }

    /// Build from an integer with an explicit IP family; range-checked.
    pub fn with_family(value: u128, family: AddrFamily) -> Result<Self, AddrFormatError> {
        if !family.is_ip() {
            return Err(AddrFormatError::syntax(
                family.name(),
                format!("{value:#x}"),
                "not an IP family",
            ));
        }
        if value > family.max_int() {
            return Err(AddrFormatError::IntRange {
                family: family.name(),
                value,
            });
        }
        Ok(IpAddress {
            value,
            family,
            zone: None,
        })
    }

    /// Build from a value already known to be within the family range.
    pub(crate) fn from_parts_unchecked(value: u128, family: AddrFamily) -> Self {
        IpAddress {
            value,
            family,
            zone: None,
        }
    }

    /// Build from packed big-endian bytes: 4 bytes for IPv4, 16 for IPv6.
    pub fn from_packed(bytes: &[u8]) -> Result<Self, AddrFormatError> {
        let family = match bytes.len() {
            4 => AddrFamily::Ipv4,
            16 => AddrFamily::Ipv6,
            n => {
                return Err(AddrFormatError::syntax(
                    "IP",
                    format!("{n} bytes"),
                    "packed input must be 4 or 16 bytes",
                ))
            }
        };
        Ok(IpAddress {
            value: family.packed_to_int(bytes)?,
            family,
            zone: None,
        })
    }

    /// The integer value of this address.
    pub fn value(&self) -> u128 {
        self.value
    }

    /// The family strategy of this address.
    pub fn family(&self) -> AddrFamily {
        self.family
    }

    /// IP protocol version, 4 or 6.
    pub fn version(&self) -> u8 {
        match self.family {
            AddrFamily::Ipv4 => 4,
            _ => 6,
        }
    }

    /// Family width in bits.
    pub fn width(&self) -> u32 {
        self.family.width()
    }

    /// Zone identifier, if one was parsed.
    pub fn zone(&self) -> Option<&str> {
        self.zone.as_deref()
    }

    /// Big-endian packed byte form.
    pub fn packed(&self) -> SmallVec<[u8; 16]> {
        self.family.int_to_packed(self.value)
    }

    /// MSB-first word sequence (octets for IPv4, hextets for IPv6).
    pub fn words(&self) -> SmallVec<[u16; 8]> {
        self.family.word_split(self.value)
    }

    /// Number of bits needed to represent the value.
    pub fn bit_length(&self) -> u32 {
        128 - self.value.leading_zeros()
    }

    /// Grouped binary digit string, words joined by the family separator.
    pub fn bits(&self) -> String {
        let sep = if self.family == AddrFamily::Ipv4 { '.' } else { ':' };
        let size = self.family.word_size() as usize;
        let words = self.words();
        let mut out = String::with_capacity((size + 1) * words.len());
        for (i, word) in words.iter().enumerate() {
            if i > 0 {
                out.push(sep);
            }
            out.push_str(&format!("{word:0size$b}"));
        }
        out
    }

    /// `0b...` binary form of the value.
    pub fn to_bin(&self) -> String {
        format!("{:#b}", self.value)
    }

    /// Format the address in a specific IPv6 dialect. IPv4 addresses have a
    /// single canonical form and ignore the dialect.
    pub fn format(&self, dialect: Ipv6Dialect) -> String {
        match self.family {
            AddrFamily::Ipv4 => ipv4::format(self.value as u32),
            _ => ipv6::format_dialect(self.value, dialect),
        }
    }

    /// Reverse-DNS lookup name (`in-addr.arpa` / `ip6.arpa`).
    pub fn reverse_dns(&self) -> String {
        match self.family {
            AddrFamily::Ipv4 => ipv4::to_arpa(self.value as u32),
            _ => ipv6::to_arpa(self.value),
        }
    }

    /// Add a signed offset, staying within the family's address space.
    pub fn offset(&self, delta: i128) -> Result<Self, AddrFormatError> {
        let overflow = || AddrFormatError::Overflow {
            family: self.family.name(),
        };
        let value = if delta >= 0 {
            self.value.checked_add(delta as u128).ok_or_else(overflow)?
        } else {
            self.value
                .checked_sub(delta.unsigned_abs())
                .ok_or_else(overflow)?
        };
        if value > self.family.max_int() {
            return Err(overflow());
        }
        Ok(IpAddress {
            value,
            family: self.family,
            zone: self.zone.clone(),
        })
    }

    fn v4(&self) -> Option<u32> {
        match self.family {
            AddrFamily::Ipv4 => Some(self.value as u32),
            _ => None,
        }
    }

    /// True for loopback addresses (`127.0.0.0/8`, `::1`).
    pub fn is_loopback(&self) -> bool {
        match self.v4() {
            Some(v4) => categories::in_any_v4(v4, &[categories::IPV4_LOOPBACK]),
            None => self.value == 1,
        }
    }

    /// True for internal or private-use addresses. Link-local addresses
    /// count as private.
    pub fn is_private(&self) -> bool {
        let private = match self.v4() {
            Some(v4) => categories::in_any_v4(v4, categories::IPV4_PRIVATE),
            None => categories::in_any_v6(self.value, &[categories::IPV6_PRIVATE]),
        };
        private || self.is_link_local()
    }

    /// True for link-local addresses (`169.254.0.0/16`, `fe80::/10`).
    pub fn is_link_local(&self) -> bool {
        match self.v4() {
            Some(v4) => categories::in_any_v4(v4, &[categories::IPV4_LINK_LOCAL]),
            None => categories::in_any_v6(self.value, &[categories::IPV6_LINK_LOCAL]),
        }
    }

    /// True for multicast addresses (`224.0.0.0/4`, `ff00::/8`).
    pub fn is_multicast(&self) -> bool {
        match self.v4() {
            Some(v4) => categories::in_any_v4(v4, &[categories::IPV4_MULTICAST]),
            None => categories::in_any_v6(self.value, &[categories::IPV6_MULTICAST]),
        }
    }

    /// True for unicast addresses (everything that is not multicast).
    pub fn is_unicast(&self) -> bool {
        !self.is_multicast()
    }

    /// True for IANA reserved addresses.
    pub fn is_reserved(&self) -> bool {
        match self.v4() {
            Some(v4) => categories::in_any_v4(v4, categories::IPV4_RESERVED),
            None => categories::in_any_v6(self.value, categories::IPV6_RESERVED),
        }
    }

    /// True if this is an IPv4-mapped IPv6 address (`::ffff:a.b.c.d`).
    pub fn is_ipv4_mapped(&self) -> bool {
        self.family == AddrFamily::Ipv6 && (self.value >> 32) == 0xffff
    }

    /// True if this is an IPv4-compatible IPv6 address (`::a.b.c.d`).
    pub fn is_ipv4_compat(&self) -> bool {
        self.family == AddrFamily::Ipv6 && (self.value >> 32) == 0
    }

    /// True if the value is a valid netmask (contiguous ones then zeros).
    pub fn is_netmask(&self) -> bool {
        let inverted = (self.value ^ self.family.max_int()).wrapping_add(1);
        inverted & inverted.wrapping_sub(1) == 0
    }

    /// True if the value is a valid hostmask (contiguous zeros then ones).
    pub fn is_hostmask(&self) -> bool {
        let plus_one = self.value.wrapping_add(1);
        plus_one & plus_one.wrapping_sub(1) == 0
    }

    /// Number of leading one bits when this value is a netmask; the family
    /// width otherwise.
    pub fn netmask_bits(&self) -> u32 {
        if !self.is_netmask() {
            return self.family.width();
        }
        let width = self.family.width();
        let ones = (self.value << (128 - width)).leading_ones();
        ones.min(width)
    }

    /// Convert to IPv4. IPv6 inputs must be IPv4-compatible or IPv4-mapped.
    pub fn to_ipv4(&self) -> Result<IpAddress, AddrConversionError> {
        match self.family {
            AddrFamily::Ipv4 => Ok(self.clone()),
            _ if self.value <= u128::from(u32::MAX) => Ok(IpAddress {
                value: self.value,
                family: AddrFamily::Ipv4,
                zone: None,
            }),
            _ if self.is_ipv4_mapped() => Ok(IpAddress {
                value: self.value - MAPPED_BASE,
                family: AddrFamily::Ipv4,
                zone: None,
            }),
            _ => Err(AddrConversionError::Unrepresentable {
                addr: self.to_string(),
                target: "IPv4",
            }),
        }
    }

    /// Convert to an IPv4-mapped IPv6 address (`::ffff:a.b.c.d`).
    pub fn to_ipv6_mapped(&self) -> IpAddress {
        match self.family {
            AddrFamily::Ipv4 => IpAddress {
                value: self.value + MAPPED_BASE,
                family: AddrFamily::Ipv6,
                zone: None,
            },
            _ => self.clone(),
        }
    }

    /// Convert to an IPv4-compatible IPv6 address (`::a.b.c.d`).
    pub fn to_ipv6_compat(&self) -> IpAddress {
        match self.family {
            AddrFamily::Ipv4 => IpAddress {
                value: self.value,
                family: AddrFamily::Ipv6,
                zone: None,
            },
            _ => self.clone(),
        }
    }

    /// Sort key over `(family, value)`; IPv4 orders before IPv6.
    pub(crate) fn sort_key(&self) -> (AddrFamily, u128) {
        (self.family, self.value)
    }
}

impl fmt::Display for IpAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.family.format(self.value))?;
        if let Some(zone) = &self.zone {
            write!(f, "%{zone}")?;
        }
        Ok(())
    }
}

impl fmt::LowerHex for IpAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.value, f)
    }
}

impl fmt::Octal for IpAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Octal::fmt(&self.value, f)
    }
}

impl fmt::Binary for IpAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Binary::fmt(&self.value, f)
    }
}

impl FromStr for IpAddress {
    type Err = AddrFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IpAddress::new(s)
    }
}

// The zone identifier is presentation-only and excluded from comparison.
impl PartialEq for IpAddress {
    fn eq(&self, other: &Self) -> bool {
        self.sort_key() == other.sort_key()
    }
}

impl Eq for IpAddress {}

impl PartialOrd for IpAddress {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for IpAddress {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl Hash for IpAddress {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sort_key().hash(state);
    }
}
