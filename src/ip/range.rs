//! Arbitrary address ranges and their CIDR decomposition.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::{AddrConversionError, AddrFormatError, Error};
use crate::strategy::AddrFamily;

use super::address::IpAddress;
use super::network::{AddrIter, IpNetwork};

/// A closed interval `[first, last]` of addresses of one family, with no
/// alignment requirement.
///
/// # Example
///
/// ```
/// use addrkit::IpRange;
///
/// let range: IpRange = "192.0.2.1-192.0.2.9".parse().unwrap();
/// let cidrs: Vec<String> = range.cidrs().iter().map(|c| c.to_string()).collect();
/// assert_eq!(cidrs, ["192.0.2.1/32", "192.0.2.2/31", "192.0.2.4/30", "192.0.2.8/31"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IpRange {
    first: u128,
    last: u128,
    family: AddrFamily,
}

impl IpRange {
    /// Build a range from its boundary addresses.
    pub fn new(start: IpAddress, end: IpAddress) -> Result<Self, Error> {
        if start.family() != end.family() {
            return Err(AddrConversionError::FamilyMismatch {
                left: start.family().name(),
                right: end.family().name(),
            }
            .into());
        }
        if start.value() > end.value() {
            return Err(AddrFormatError::syntax(
                start.family().name(),
                format!("{start}-{end}"),
                "range start exceeds range end",
            )
            .into());
        }
        Ok(IpRange {
            first: start.value(),
            last: end.value(),
            family: start.family(),
        })
    }

    pub(crate) fn from_values(first: u128, last: u128, family: AddrFamily) -> Self {
        debug_assert!(first <= last);
        IpRange {
            first,
            last,
            family,
        }
    }

    /// The first address of the range.
    pub fn first(&self) -> IpAddress {
        IpAddress::from_parts_unchecked(self.first, self.family)
    }

    /// The last address of the range.
    pub fn last(&self) -> IpAddress {
        IpAddress::from_parts_unchecked(self.last, self.family)
    }

    pub(crate) fn first_value(&self) -> u128 {
        self.first
    }

    pub(crate) fn last_value(&self) -> u128 {
        self.last
    }

    /// The family strategy of this range.
    pub fn family(&self) -> AddrFamily {
        self.family
    }

    /// Number of addresses covered. Saturates at `u128::MAX` when the range
    /// spans the entire IPv6 space.
    pub fn size(&self) -> u128 {
        (self.last - self.first).saturating_add(1)
    }

    /// True when an address of the same family falls inside the range.
    pub fn contains_addr(&self, ip: &IpAddress) -> bool {
        ip.family() == self.family && self.first <= ip.value() && ip.value() <= self.last
    }

    /// True when `other` lies entirely inside this range.
    pub fn contains(&self, other: &IpRange) -> bool {
        other.family == self.family && self.first <= other.first && other.last <= self.last
    }

    /// True when a network lies entirely inside this range.
    pub fn contains_network(&self, net: &IpNetwork) -> bool {
        net.family() == self.family
            && self.first <= net.first_value()
            && net.last_value() <= self.last
    }

    /// True when the two ranges share at least one address.
    pub fn overlaps(&self, other: &IpRange) -> bool {
        other.family == self.family && self.first <= other.last && other.first <= self.last
    }

    /// Iterate every address in the range, lazily.
    pub fn iter(&self) -> AddrIter {
        AddrIter::new(self.first, self.last, self.family)
    }

    /// Decompose the interval into the unique minimal ordered sequence of
    /// prefix-aligned CIDR blocks covering exactly `[first, last]`.
    ///
    /// Each step emits the largest aligned block that starts at the current
    /// position and does not overrun the end, then advances past it.
    pub fn cidrs(&self) -> Vec<IpNetwork> {
        let width = self.family.width();
        let mut result = Vec::new();
        let mut first = self.first;

        loop {
            let align_bits = if first == 0 {
                width
            } else {
                first.trailing_zeros().min(width)
            };
            let span_bits = span_log2(first, self.last, width);
            let block_bits = align_bits.min(span_bits);

            if block_bits >= width {
                // The whole family space in one block.
                result.push(IpNetwork::from_cidr_unchecked(0, 0, self.family));
                break;
            }

            let prefix_len = width - block_bits;
            result.push(IpNetwork::from_cidr_unchecked(first, prefix_len, self.family));

            let block_last = first + ((1u128 << block_bits) - 1);
            if block_last >= self.last {
                break;
            }
            first = block_last + 1;
        }

        result
    }

    pub(crate) fn sort_key(&self) -> (AddrFamily, u128, u128) {
        (self.family, self.first, self.last)
    }
}

/// `floor(log2(last - first + 1))`, clamped to the family width.
fn span_log2(first: u128, last: u128, width: u32) -> u32 {
    let diff = last - first;
    if diff == u128::MAX {
        return width;
    }
    (diff + 1).ilog2().min(width)
}

impl fmt::Display for IpRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.first(), self.last())
    }
}

impl FromStr for IpRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s.split_once('-').ok_or_else(|| {
            AddrFormatError::syntax("IP", s, "expected '<first>-<last>'")
        })?;
        IpRange::new(IpAddress::new(start)?, IpAddress::new(end)?)
    }
}

impl PartialOrd for IpRange {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for IpRange {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl From<&IpNetwork> for IpRange {
    fn from(net: &IpNetwork) -> Self {
        IpRange {
            first: net.first_value(),
            last: net.last_value(),
            family: net.family(),
        }
    }
}
