//! CIDR subnets and prefix arithmetic.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::error::{AddrConversionError, AddrFormatError};
use crate::flags::ParseFlags;
use crate::strategy::AddrFamily;

use super::address::IpAddress;

/// An IP subnet: a base address plus a prefix length.
///
/// The base address is not required to be prefix-aligned: `10.0.0.1/24`
/// keeps `10.0.0.1` as its address ([`IpNetwork::ip`]) while
/// [`IpNetwork::network`] computes the masked base `10.0.0.0`. Construction
/// under [`ParseFlags::NOHOST`] masks the host bits away immediately.
///
/// # Example
///
/// ```
/// use addrkit::IpNetwork;
///
/// let net: IpNetwork = "192.0.2.0/24".parse().unwrap();
/// assert_eq!(net.network().to_string(), "192.0.2.0");
/// assert_eq!(net.broadcast().to_string(), "192.0.2.255");
/// assert_eq!(net.size(), 256);
/// ```
#[derive(Debug, Clone)]
pub struct IpNetwork {
    value: u128,
    prefix_len: u32,
    family: AddrFamily,
}

impl IpNetwork {
    /// Parse a network with default flags.
    ///
    /// Accepted forms: `addr/prefix`, `addr/netmask`, `addr/hostmask`
    /// (IPv4), or a bare address which defaults to the host prefix (`/32`
    /// or `/128`).
    pub fn new(text: &str) -> Result<Self, AddrFormatError> {
        Self::parse(text, ParseFlags::empty())
    }

    /// Parse a network under the given flags.
    pub fn parse(text: &str, flags: ParseFlags) -> Result<Self, AddrFormatError> {
        let (addr_part, suffix) = match text.split_once('/') {
            Some((a, s)) => (a, Some(s)),
            None => (text, None),
        };

        let addr = IpAddress::parse(addr_part, flags)?;
        let family = addr.family();

        let prefix_len = match suffix {
            None => family.width(),
            Some(s) => Self::parse_prefix(s, family, flags)?,
        };

        Self::assemble(addr.value(), prefix_len, family, flags)
    }

    /// Parse an abbreviated IPv4 network, expanding missing octets and
    /// inferring a legacy classful prefix when none is given: `10` becomes
    /// `10.0.0.0/8`, `192.168/16` becomes `192.168.0.0/16`. Full addresses
    /// and IPv6 input fall through to [`IpNetwork::new`].
    pub fn with_implicit_prefix(text: &str) -> Result<Self, AddrFormatError> {
        if let Some(expanded) = expand_abbrev(text) {
            Self::new(&expanded)
        } else {
            Self::new(text)
        }
    }

    /// Build from an address and an explicit prefix length.
    pub fn from_parts(addr: IpAddress, prefix_len: u32) -> Result<Self, AddrFormatError> {
        Self::assemble(
            addr.value(),
            prefix_len,
            addr.family(),
            ParseFlags::empty(),
        )
    }

    /// Build a CIDR whose inputs are already validated (aligned or not).
    pub(crate) fn from_cidr_unchecked(value: u128, prefix_len: u32, family: AddrFamily) -> Self {
        debug_assert!(prefix_len <= family.width());
        IpNetwork {
            value,
            prefix_len,
            family,
        }
    }

    fn assemble(
        value: u128,
        prefix_len: u32,
        family: AddrFamily,
        flags: ParseFlags,
    ) -> Result<Self, AddrFormatError> {
        if prefix_len > family.width() {
            return Err(AddrFormatError::PrefixRange {
                family: family.name(),
                prefix: prefix_len,
                width: family.width(),
            });
        }
        let value = if flags.contains(ParseFlags::NOHOST) {
            value & !hostmask(family, prefix_len)
        } else {
            value
        };
        Ok(IpNetwork {
            value,
            prefix_len,
            family,
        })
    }

    /// Interpret a `/suffix`: numeric prefix, netmask, or IPv4 hostmask.
    fn parse_prefix(
        suffix: &str,
        family: AddrFamily,
        flags: ParseFlags,
    ) -> Result<u32, AddrFormatError> {
        if suffix.bytes().all(|b| b.is_ascii_digit()) && !suffix.is_empty() {
            let prefix: u32 = suffix.parse().map_err(|_| AddrFormatError::PrefixRange {
                family: family.name(),
                prefix: u32::MAX,
                width: family.width(),
            })?;
            if prefix > family.width() {
                return Err(AddrFormatError::PrefixRange {
                    family: family.name(),
                    prefix,
                    width: family.width(),
                });
            }
            return Ok(prefix);
        }

        let mask = IpAddress::parse(suffix, flags)?;
        if mask.family() != family {
            return Err(AddrFormatError::syntax(
                family.name(),
                suffix,
                "mask family differs from address family",
            ));
        }
        if mask.is_netmask() {
            Ok(mask.netmask_bits())
        } else if family == AddrFamily::Ipv4 && mask.is_hostmask() {
            // Cisco ACL style: invert the hostmask.
            Ok(family.width() - mask.value().count_ones())
        } else {
            Err(AddrFormatError::syntax(
                family.name(),
                suffix,
                "not a valid netmask or hostmask",
            ))
        }
    }

    /// The address as entered, host bits intact.
    pub fn ip(&self) -> IpAddress {
        // Value is range-checked at construction.
        IpAddress::from_parts_unchecked(self.value, self.family)
    }

    /// The masked network base address.
    pub fn network(&self) -> IpAddress {
        IpAddress::from_parts_unchecked(self.first_value(), self.family)
    }

    /// The last address of the block (the IPv4 broadcast address).
    pub fn broadcast(&self) -> IpAddress {
        IpAddress::from_parts_unchecked(self.last_value(), self.family)
    }

    /// The subnet mask as an address.
    pub fn netmask(&self) -> IpAddress {
        let mask = self.family.max_int() ^ hostmask(self.family, self.prefix_len);
        IpAddress::from_parts_unchecked(mask, self.family)
    }

    /// The host mask as an address.
    pub fn hostmask(&self) -> IpAddress {
        IpAddress::from_parts_unchecked(hostmask(self.family, self.prefix_len), self.family)
    }

    /// The prefix-aligned CIDR this network denotes (host bits zeroed).
    pub fn cidr(&self) -> IpNetwork {
        IpNetwork {
            value: self.first_value(),
            prefix_len: self.prefix_len,
            family: self.family,
        }
    }

    /// Prefix length in bits.
    pub fn prefix_len(&self) -> u32 {
        self.prefix_len
    }

    /// The family strategy of this network.
    pub fn family(&self) -> AddrFamily {
        self.family
    }

    /// IP protocol version, 4 or 6.
    pub fn version(&self) -> u8 {
        if self.family == AddrFamily::Ipv4 {
            4
        } else {
            6
        }
    }

    /// Number of addresses in the block. Saturates at `u128::MAX` for the
    /// full IPv6 space (`::/0`), whose true size exceeds 128 bits.
    pub fn size(&self) -> u128 {
        let shift = self.family.width() - self.prefix_len;
        if shift >= 128 {
            u128::MAX
        } else {
            1u128 << shift
        }
    }

    /// First address value of the block.
    pub(crate) fn first_value(&self) -> u128 {
        self.value & !hostmask(self.family, self.prefix_len)
    }

    /// Last address value of the block.
    pub(crate) fn last_value(&self) -> u128 {
        self.value | hostmask(self.family, self.prefix_len)
    }

    /// True when the base address has no host bits set.
    pub fn is_aligned(&self) -> bool {
        self.value == self.first_value()
    }

    /// Containment test against another network of the same family.
    ///
    /// Cross-family containment is a conversion error.
    pub fn contains(&self, other: &IpNetwork) -> Result<bool, AddrConversionError> {
        if self.family != other.family {
            return Err(AddrConversionError::FamilyMismatch {
                left: self.family.name(),
                right: other.family.name(),
            });
        }
        Ok(self.first_value() <= other.first_value() && other.last_value() <= self.last_value())
    }

    /// Containment test for a single address of the same family.
    pub fn contains_addr(&self, ip: &IpAddress) -> Result<bool, AddrConversionError> {
        if self.family != ip.family() {
            return Err(AddrConversionError::FamilyMismatch {
                left: self.family.name(),
                right: ip.family().name(),
            });
        }
        Ok(self.first_value() <= ip.value() && ip.value() <= self.last_value())
    }

    /// Iterate every address in the block, network through broadcast.
    pub fn iter(&self) -> AddrIter {
        AddrIter::new(self.first_value(), self.last_value(), self.family)
    }

    /// Iterate the block honouring iteration flags:
    /// [`ParseFlags::NOBROADCAST`] drops the IPv4 broadcast address.
    pub fn iter_with(&self, flags: ParseFlags) -> AddrIter {
        let mut last = self.last_value();
        if flags.contains(ParseFlags::NOBROADCAST)
            && self.family == AddrFamily::Ipv4
            && self.size() > 1
        {
            last -= 1;
        }
        AddrIter::new(self.first_value(), last, self.family)
    }

    /// Iterate the addresses usable for hosts.
    ///
    /// IPv4 blocks of prefix 30 or shorter omit the network and broadcast
    /// addresses; `/31` and `/32` yield every address (RFC 3021). IPv6
    /// blocks omit the network identifier except for `/127` and `/128`.
    pub fn iter_hosts(&self) -> AddrIter {
        let first = self.first_value();
        let last = self.last_value();
        match self.family {
            AddrFamily::Ipv4 if self.prefix_len <= 30 => {
                AddrIter::new(first + 1, last - 1, self.family)
            }
            AddrFamily::Ipv6 if self.prefix_len <= 126 => {
                AddrIter::new(first + 1, last, self.family)
            }
            _ => AddrIter::new(first, last, self.family),
        }
    }

    /// Partition the block into aligned children of a longer prefix.
    pub fn subnets(&self, new_prefix: u32) -> Result<SubnetIter, AddrFormatError> {
        if new_prefix > self.family.width() || new_prefix < self.prefix_len {
            return Err(AddrFormatError::PrefixRange {
                family: self.family.name(),
                prefix: new_prefix,
                width: self.family.width(),
            });
        }
        Ok(SubnetIter {
            next: Some(self.first_value()),
            last_first: self.last_value() - hostmask(self.family, new_prefix),
            step: step_size(self.family, new_prefix),
            prefix_len: new_prefix,
            family: self.family,
        })
    }

    /// Enumerate supernets of prefix `current-1` down to `current-levels`,
    /// tightest first.
    pub fn supernets(&self, levels: u32) -> Result<Vec<IpNetwork>, AddrFormatError> {
        if levels > self.prefix_len {
            return Err(AddrFormatError::PrefixRange {
                family: self.family.name(),
                prefix: 0,
                width: self.prefix_len,
            });
        }
        let mut result = Vec::with_capacity(levels as usize);
        for level in 1..=levels {
            let prefix_len = self.prefix_len - level;
            let value = self.first_value() & !hostmask(self.family, prefix_len);
            result.push(IpNetwork {
                value,
                prefix_len,
                family: self.family,
            });
        }
        Ok(result)
    }

    /// The immediate parent block, or `None` at `/0`.
    pub fn supernet(&self) -> Option<IpNetwork> {
        if self.prefix_len == 0 {
            return None;
        }
        let prefix_len = self.prefix_len - 1;
        Some(IpNetwork {
            value: self.first_value() & !hostmask(self.family, prefix_len),
            prefix_len,
            family: self.family,
        })
    }

    /// The adjacent same-size block `step` blocks after this one.
    pub fn next_block(&self, step: u32) -> Result<IpNetwork, AddrFormatError> {
        self.step_by(i128::from(step))
    }

    /// The adjacent same-size block `step` blocks before this one.
    pub fn previous_block(&self, step: u32) -> Result<IpNetwork, AddrFormatError> {
        self.step_by(-i128::from(step))
    }

    fn step_by(&self, steps: i128) -> Result<IpNetwork, AddrFormatError> {
        let overflow = || AddrFormatError::Overflow {
            family: self.family.name(),
        };
        let span = self.size();
        let delta = span.checked_mul(steps.unsigned_abs()).ok_or_else(overflow)?;
        let first = self.first_value();
        let new_first = if steps >= 0 {
            first.checked_add(delta).ok_or_else(overflow)?
        } else {
            first.checked_sub(delta).ok_or_else(overflow)?
        };
        if new_first > self.family.max_int() - (span - 1) {
            return Err(overflow());
        }
        Ok(IpNetwork {
            value: new_first,
            prefix_len: self.prefix_len,
            family: self.family,
        })
    }

    /// Sort key over `(family, first, prefix)`: shorter prefixes order
    /// before their longer-prefix children at the same base.
    pub(crate) fn sort_key(&self) -> (AddrFamily, u128, u32) {
        (self.family, self.first_value(), self.prefix_len)
    }
}

fn hostmask(family: AddrFamily, prefix_len: u32) -> u128 {
    let shift = family.width() - prefix_len;
    if shift >= 128 {
        u128::MAX
    } else {
        (1u128 << shift) - 1
    }
}

fn step_size(family: AddrFamily, prefix_len: u32) -> u128 {
    let shift = family.width() - prefix_len;
    if shift >= 128 {
        u128::MAX
    } else {
        1u128 << shift
    }
}

/// Expand an abbreviated IPv4 network to its verbose `a.b.c.d/p` form.
/// Returns `None` when the input is not a recognisable abbreviation.
fn expand_abbrev(text: &str) -> Option<String> {
    if text.contains(':') {
        return None;
    }

    let (addr_part, prefix) = match text.split_once('/') {
        Some((a, p)) => {
            let prefix: u32 = p.parse().ok()?;
            if prefix > 32 {
                return None;
            }
            (a, Some(prefix))
        }
        None => (text, None),
    };

    let mut octets: Vec<u32> = Vec::with_capacity(4);
    for part in addr_part.split('.') {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let octet: u32 = part.parse().ok()?;
        if octet > 255 {
            return None;
        }
        octets.push(octet);
    }
    if octets.is_empty() || octets.len() > 4 {
        return None;
    }

    // Classful inference only applies to genuinely partial addresses; a
    // full dotted quad without a prefix is a host.
    let prefix = prefix.unwrap_or_else(|| {
        if octets.len() == 4 {
            32
        } else {
            classful_prefix(octets[0])
        }
    });
    while octets.len() < 4 {
        octets.push(0);
    }
    Some(format!(
        "{}.{}.{}.{}/{}",
        octets[0], octets[1], octets[2], octets[3], prefix
    ))
}

/// Legacy classful default prefix for a leading octet.
fn classful_prefix(octet: u32) -> u32 {
    match octet {
        0..=127 => 8,    // class A
        128..=191 => 16, // class B
        192..=223 => 24, // class C
        224 => 4,        // multicast
        225..=239 => 8,  // reserved
        _ => 32,
    }
}

impl fmt::Display for IpNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}",
            self.family.format(self.value),
            self.prefix_len
        )
    }
}

impl FromStr for IpNetwork {
    type Err = AddrFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IpNetwork::new(s)
    }
}

// Equality and ordering are over the denoted block; host bits do not
// participate.
impl PartialEq for IpNetwork {
    fn eq(&self, other: &Self) -> bool {
        self.sort_key() == other.sort_key()
    }
}

impl Eq for IpNetwork {}

impl PartialOrd for IpNetwork {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for IpNetwork {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl Hash for IpNetwork {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sort_key().hash(state);
    }
}

/// Lazy iterator over a closed address interval.
///
/// Addresses are produced on demand; the interval is never materialised.
#[derive(Debug, Clone)]
pub struct AddrIter {
    next: Option<u128>,
    last: u128,
    family: AddrFamily,
}

impl AddrIter {
    pub(crate) fn new(first: u128, last: u128, family: AddrFamily) -> Self {
        let next = if first <= last { Some(first) } else { None };
        AddrIter { next, last, family }
    }
}

impl Iterator for AddrIter {
    type Item = IpAddress;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.next?;
        self.next = if value < self.last {
            Some(value + 1)
        } else {
            None
        };
        Some(IpAddress::from_parts_unchecked(value, self.family))
    }
}

/// Iterator over the aligned children of a subnet partition.
#[derive(Debug, Clone)]
pub struct SubnetIter {
    next: Option<u128>,
    last_first: u128,
    step: u128,
    prefix_len: u32,
    family: AddrFamily,
}

impl Iterator for SubnetIter {
    type Item = IpNetwork;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.next?;
        if value > self.last_first {
            self.next = None;
            return None;
        }
        self.next = value.checked_add(self.step).filter(|v| *v <= self.last_first);
        Some(IpNetwork {
            value,
            prefix_len: self.prefix_len,
            family: self.family,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::N;

    #[test]
    fn test_parse_prefix_forms() {
        let net = IpNetwork::new("192.0.2.0/24").unwrap();
        assert_eq!(net.prefix_len(), 24);
        assert_eq!(net.size(), 256);

        let masked = IpNetwork::new("192.0.2.0/255.255.255.0").unwrap();
        assert_eq!(masked, net);

        let acl = IpNetwork::new("192.0.2.0/0.0.0.255").unwrap();
        assert_eq!(acl, net);
    }

    #[test]
    fn test_bare_address_defaults_to_host_prefix() {
        assert_eq!(IpNetwork::new("10.0.0.1").unwrap().prefix_len(), 32);
        assert_eq!(IpNetwork::new("::1").unwrap().prefix_len(), 128);
    }

    #[test]
    fn test_host_bits_are_retained() {
        let net = IpNetwork::new("10.0.0.1/24").unwrap();
        assert_eq!(net.ip().to_string(), "10.0.0.1");
        assert_eq!(net.network().to_string(), "10.0.0.0");
        assert_eq!(net.to_string(), "10.0.0.1/24");
    }

    #[test]
    fn test_nohost_masks_at_construction() {
        let net = IpNetwork::parse("10.0.0.1/24", N).unwrap();
        assert_eq!(net.ip().to_string(), "10.0.0.0");
        assert_eq!(net.to_string(), "10.0.0.0/24");
    }

    #[test]
    fn test_network_invariants() {
        for text in ["10.0.0.129/25", "0.0.0.0/0", "2001:db8::1/64", "192.0.2.7/32"] {
            let net = IpNetwork::new(text).unwrap();
            assert!(net.network() <= net.ip());
            assert!(net.ip() <= net.broadcast());
            if net.family().width() - net.prefix_len() < 128 {
                assert_eq!(
                    net.broadcast().value() - net.network().value() + 1,
                    net.size()
                );
            }
        }
    }

    #[test]
    fn test_netmask_hostmask_accessors() {
        let net = IpNetwork::new("192.0.2.0/26").unwrap();
        assert_eq!(net.netmask().to_string(), "255.255.255.192");
        assert_eq!(net.hostmask().to_string(), "0.0.0.63");
    }

    #[test]
    fn test_prefix_out_of_range() {
        assert!(IpNetwork::new("10.0.0.0/33").is_err());
        assert!(IpNetwork::new("::/129").is_err());
        assert!(IpNetwork::new("10.0.0.0/255.0.255.0").is_err());
    }

    #[test]
    fn test_implicit_prefix_expansion() {
        assert_eq!(
            IpNetwork::with_implicit_prefix("10").unwrap().to_string(),
            "10.0.0.0/8"
        );
        assert_eq!(
            IpNetwork::with_implicit_prefix("10/16").unwrap().to_string(),
            "10.0.0.0/16"
        );
        assert_eq!(
            IpNetwork::with_implicit_prefix("192.168").unwrap().to_string(),
            "192.168.0.0/16"
        );
        assert_eq!(
            IpNetwork::with_implicit_prefix("128").unwrap().to_string(),
            "128.0.0.0/16"
        );
        assert_eq!(
            IpNetwork::with_implicit_prefix("192.0.2.1").unwrap().to_string(),
            "192.0.2.1/32"
        );
    }

    #[test]
    fn test_containment() {
        let outer = IpNetwork::new("10.0.0.0/8").unwrap();
        let inner = IpNetwork::new("10.1.0.0/16").unwrap();
        assert!(outer.contains(&inner).unwrap());
        assert!(!inner.contains(&outer).unwrap());

        let v6 = IpNetwork::new("2001:db8::/32").unwrap();
        assert!(outer.contains(&v6).is_err());
    }

    #[test]
    fn test_subnet_partition() {
        let net = IpNetwork::new("192.0.2.0/24").unwrap();
        let subnets: Vec<IpNetwork> = net.subnets(26).unwrap().collect();
        assert_eq!(subnets.len(), 4);
        assert_eq!(subnets[0].to_string(), "192.0.2.0/26");
        assert_eq!(subnets[3].to_string(), "192.0.2.192/26");

        // Same prefix yields the block itself.
        let same: Vec<IpNetwork> = net.subnets(24).unwrap().collect();
        assert_eq!(same, vec![net.cidr()]);

        assert!(net.subnets(23).is_err());
    }

    #[test]
    fn test_supernets() {
        let net = IpNetwork::new("192.0.2.64/26").unwrap();
        let supers = net.supernets(3).unwrap();
        assert_eq!(supers.len(), 3);
        assert_eq!(supers[0].to_string(), "192.0.2.0/25");
        assert_eq!(supers[1].to_string(), "192.0.2.0/24");
        assert_eq!(supers[2].to_string(), "192.0.2.0/23");

        assert_eq!(net.supernet().unwrap().to_string(), "192.0.2.0/25");
        assert!(IpNetwork::new("0.0.0.0/0").unwrap().supernet().is_none());
    }

    #[test]
    fn test_adjacent_blocks() {
        let net = IpNetwork::new("192.0.2.0/24").unwrap();
        assert_eq!(net.next_block(1).unwrap().to_string(), "192.0.3.0/24");
        assert_eq!(net.previous_block(1).unwrap().to_string(), "192.0.1.0/24");

        let top = IpNetwork::new("255.255.255.0/24").unwrap();
        assert!(top.next_block(1).is_err());
        let bottom = IpNetwork::new("0.0.0.0/24").unwrap();
        assert!(bottom.previous_block(1).is_err());
    }

    #[test]
    fn test_iteration() {
        let net = IpNetwork::new("192.0.2.0/30").unwrap();
        let all: Vec<String> = net.iter().map(|ip| ip.to_string()).collect();
        assert_eq!(all, ["192.0.2.0", "192.0.2.1", "192.0.2.2", "192.0.2.3"]);

        let hosts: Vec<String> = net.iter_hosts().map(|ip| ip.to_string()).collect();
        assert_eq!(hosts, ["192.0.2.1", "192.0.2.2"]);

        let no_bcast: Vec<String> = net
            .iter_with(ParseFlags::NOBROADCAST)
            .map(|ip| ip.to_string())
            .collect();
        assert_eq!(no_bcast, ["192.0.2.0", "192.0.2.1", "192.0.2.2"]);
    }

    #[test]
    fn test_iteration_tiny_v4_blocks() {
        let p31 = IpNetwork::new("192.0.2.0/31").unwrap();
        assert_eq!(p31.iter_hosts().count(), 2);

        let p32 = IpNetwork::new("192.0.2.1/32").unwrap();
        assert_eq!(p32.iter_hosts().count(), 1);
    }

    #[test]
    fn test_iter_hosts_v6_omits_network_identifier() {
        let net = IpNetwork::new("2001:db8::/126").unwrap();
        let hosts: Vec<String> = net.iter_hosts().map(|ip| ip.to_string()).collect();
        assert_eq!(hosts, ["2001:db8::1", "2001:db8::2", "2001:db8::3"]);
    }

    #[test]
    fn test_equality_ignores_host_bits() {
        let a = IpNetwork::new("10.0.0.1/24").unwrap();
        let b = IpNetwork::new("10.0.0.2/24").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_sort_order() {
        let mut nets: Vec<IpNetwork> = ["10.0.0.0/16", "10.0.0.0/8", "9.0.0.0/8", "::/0"]
            .iter()
            .map(|t| IpNetwork::new(t).unwrap())
            .collect();
        nets.sort();
        let texts: Vec<String> = nets.iter().map(|n| n.to_string()).collect();
        assert_eq!(texts, ["9.0.0.0/8", "10.0.0.0/8", "10.0.0.0/16", "::/0"]);
    }

    #[test]
    fn test_full_v6_space_size_saturates() {
        let net = IpNetwork::new("::/0").unwrap();
        assert_eq!(net.size(), u128::MAX);
    }
}
