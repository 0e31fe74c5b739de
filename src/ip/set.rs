//! Sets of IP addresses held as canonical CIDR lists.

use std::ops::{BitAnd, BitOr, BitXor, Sub};

use crate::strategy::AddrFamily;

use super::address::IpAddress;
use super::glob::IpGlob;
use super::network::IpNetwork;
use super::ops::{cidr_merge, coalesce};
use super::range::IpRange;

/// Anything reducible to a list of CIDR blocks, the common currency of
/// [`IpSet`] mutation and membership.
pub trait ToCidrs {
    /// The CIDR blocks exactly covering this value.
    fn to_cidrs(&self) -> Vec<IpNetwork>;
}

impl ToCidrs for IpAddress {
    fn to_cidrs(&self) -> Vec<IpNetwork> {
        vec![IpNetwork::from_cidr_unchecked(
            self.value(),
            self.family().width(),
            self.family(),
        )]
    }
}

impl ToCidrs for IpNetwork {
    fn to_cidrs(&self) -> Vec<IpNetwork> {
        vec![self.cidr()]
    }
}

impl ToCidrs for IpRange {
    fn to_cidrs(&self) -> Vec<IpNetwork> {
        self.cidrs()
    }
}

impl ToCidrs for IpGlob {
    fn to_cidrs(&self) -> Vec<IpNetwork> {
        self.cidrs()
    }
}

impl ToCidrs for IpSet {
    fn to_cidrs(&self) -> Vec<IpNetwork> {
        self.cidrs.clone()
    }
}

/// An arbitrary subset of the combined IPv4 and IPv6 address space.
///
/// The representation is always canonical: an ascending list of disjoint,
/// prefix-aligned CIDR blocks that a further merge cannot reduce. Every
/// public operation re-establishes this form, which makes structural
/// equality coincide with point-set equality.
///
/// # Example
///
/// ```
/// use addrkit::{IpNetwork, IpSet};
///
/// let a: IpSet = ["10.0.0.0/25", "10.0.0.128/25"]
///     .iter()
///     .map(|t| t.parse::<IpNetwork>().unwrap())
///     .collect();
/// assert_eq!(a.iter_cidrs().len(), 1);
/// assert_eq!(a.iter_cidrs()[0].to_string(), "10.0.0.0/24");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IpSet {
    cidrs: Vec<IpNetwork>,
}

impl IpSet {
    /// The empty set.
    pub fn new() -> Self {
        IpSet { cidrs: Vec::new() }
    }

    /// Build a set from anything reducible to CIDRs.
    pub fn from_item<T: ToCidrs>(item: &T) -> Self {
        IpSet {
            cidrs: cidr_merge(item.to_cidrs()),
        }
    }

    /// Add a value to the set, merging where possible.
    pub fn add<T: ToCidrs>(&mut self, item: &T) {
        let mut combined = std::mem::take(&mut self.cidrs);
        combined.extend(item.to_cidrs());
        self.cidrs = cidr_merge(combined);
    }

    /// Remove a value from the set. Absent addresses are ignored.
    pub fn remove<T: ToCidrs>(&mut self, item: &T) {
        let removal: Vec<(AddrFamily, u128, u128)> = item
            .to_cidrs()
            .iter()
            .map(|c| (c.family(), c.first_value(), c.last_value()))
            .collect();

        let mut result = Vec::new();
        for family in [AddrFamily::Ipv4, AddrFamily::Ipv6] {
            let keep = self.runs(family);
            let drop = coalesce(
                removal
                    .iter()
                    .filter(|(f, _, _)| *f == family)
                    .map(|&(_, first, last)| (first, last))
                    .collect(),
            );
            for (first, last) in subtract_runs(&keep, &drop) {
                result.extend(IpRange::from_values(first, last, family).cidrs());
            }
        }
        self.cidrs = result;
    }

    /// Add every network from an iterator.
    pub fn update<I: IntoIterator<Item = IpNetwork>>(&mut self, iter: I) {
        let mut combined = std::mem::take(&mut self.cidrs);
        combined.extend(iter);
        self.cidrs = cidr_merge(combined);
    }

    /// Remove all members.
    pub fn clear(&mut self) {
        self.cidrs.clear();
    }

    /// Remove and return the highest CIDR block, if any.
    pub fn pop(&mut self) -> Option<IpNetwork> {
        self.cidrs.pop()
    }

    /// True when the set has no members.
    pub fn is_empty(&self) -> bool {
        self.cidrs.is_empty()
    }

    /// The canonical CIDR list.
    pub fn iter_cidrs(&self) -> &[IpNetwork] {
        &self.cidrs
    }

    /// Iterate every member address, lazily.
    pub fn iter(&self) -> impl Iterator<Item = IpAddress> + '_ {
        self.cidrs.iter().flat_map(|cidr| cidr.iter())
    }

    /// Iterate the maximal contiguous runs of the set as ranges.
    pub fn iter_ranges(&self) -> Vec<IpRange> {
        let mut ranges = Vec::new();
        for family in [AddrFamily::Ipv4, AddrFamily::Ipv6] {
            for (first, last) in self.runs(family) {
                ranges.push(IpRange::from_values(first, last, family));
            }
        }
        ranges
    }

    /// Number of member addresses, saturating at `u128::MAX`.
    pub fn size(&self) -> u128 {
        self.cidrs
            .iter()
            .fold(0u128, |acc, cidr| acc.saturating_add(cidr.size()))
    }

    /// Membership test for a single address.
    pub fn contains_addr(&self, ip: &IpAddress) -> bool {
        self.covering_index(ip.family(), ip.value()).is_some()
    }

    /// Membership test for anything reducible to CIDRs: true when every
    /// covered address is in the set.
    pub fn contains<T: ToCidrs>(&self, item: &T) -> bool {
        let cidrs = item.to_cidrs();
        !cidrs.is_empty()
            && cidrs
                .iter()
                .all(|c| self.covers_interval(c.family(), c.first_value(), c.last_value()))
    }

    /// True when the members form one unbroken run of a single family.
    pub fn is_contiguous(&self) -> bool {
        let v4 = self.runs(AddrFamily::Ipv4);
        let v6 = self.runs(AddrFamily::Ipv6);
        match (v4.len(), v6.len()) {
            (0, 0) | (1, 0) | (0, 1) => true,
            _ => false,
        }
    }

    /// True when the two sets share no address.
    pub fn is_disjoint(&self, other: &IpSet) -> bool {
        for family in [AddrFamily::Ipv4, AddrFamily::Ipv6] {
            if !intersect_runs(&self.runs(family), &other.runs(family)).is_empty() {
                return false;
            }
        }
        true
    }

    /// True when every member of this set is in `other`.
    pub fn is_subset(&self, other: &IpSet) -> bool {
        self.cidrs
            .iter()
            .all(|c| other.covers_interval(c.family(), c.first_value(), c.last_value()))
    }

    /// True when every member of `other` is in this set.
    pub fn is_superset(&self, other: &IpSet) -> bool {
        other.is_subset(self)
    }

    /// Set union.
    pub fn union(&self, other: &IpSet) -> IpSet {
        let mut combined = self.cidrs.clone();
        combined.extend(other.cidrs.iter().cloned());
        IpSet {
            cidrs: cidr_merge(combined),
        }
    }

    /// Set intersection.
    pub fn intersection(&self, other: &IpSet) -> IpSet {
        self.run_op(other, intersect_runs)
    }

    /// Set difference.
    pub fn difference(&self, other: &IpSet) -> IpSet {
        self.run_op(other, |a, b| subtract_runs(a, b))
    }

    /// Symmetric difference: `(A | B) - (A & B)`.
    pub fn symmetric_difference(&self, other: &IpSet) -> IpSet {
        self.union(other).difference(&self.intersection(other))
    }

    fn run_op<F>(&self, other: &IpSet, op: F) -> IpSet
    where
        F: Fn(&[(u128, u128)], &[(u128, u128)]) -> Vec<(u128, u128)>,
    {
        let mut cidrs = Vec::new();
        for family in [AddrFamily::Ipv4, AddrFamily::Ipv6] {
            for (first, last) in op(&self.runs(family), &other.runs(family)) {
                cidrs.extend(IpRange::from_values(first, last, family).cidrs());
            }
        }
        IpSet { cidrs }
    }

    /// The coalesced interval runs of one family. The stored list is sorted
    /// and disjoint, so only adjacency needs folding.
    fn runs(&self, family: AddrFamily) -> Vec<(u128, u128)> {
        coalesce(
            self.cidrs
                .iter()
                .filter(|c| c.family() == family)
                .map(|c| (c.first_value(), c.last_value()))
                .collect(),
        )
    }

    /// Index of the stored CIDR covering `value`, found by binary search.
    fn covering_index(&self, family: AddrFamily, value: u128) -> Option<usize> {
        let idx = self
            .cidrs
            .partition_point(|c| c.sort_key() <= (family, value, u32::MAX));
        let candidate = idx.checked_sub(1)?;
        let cidr = &self.cidrs[candidate];
        (cidr.family() == family && value <= cidr.last_value()).then_some(candidate)
    }

    /// True when `[first, last]` is fully covered, allowing coverage to run
    /// across adjacent stored blocks.
    fn covers_interval(&self, family: AddrFamily, first: u128, last: u128) -> bool {
        let mut cursor = first;
        loop {
            let Some(idx) = self.covering_index(family, cursor) else {
                return false;
            };
            let covered_to = self.cidrs[idx].last_value();
            if covered_to >= last {
                return true;
            }
            cursor = covered_to + 1;
        }
    }
}

impl FromIterator<IpNetwork> for IpSet {
    fn from_iter<I: IntoIterator<Item = IpNetwork>>(iter: I) -> Self {
        IpSet {
            cidrs: cidr_merge(iter),
        }
    }
}

impl BitOr for &IpSet {
    type Output = IpSet;

    fn bitor(self, rhs: &IpSet) -> IpSet {
        self.union(rhs)
    }
}

impl BitAnd for &IpSet {
    type Output = IpSet;

    fn bitand(self, rhs: &IpSet) -> IpSet {
        self.intersection(rhs)
    }
}

impl Sub for &IpSet {
    type Output = IpSet;

    fn sub(self, rhs: &IpSet) -> IpSet {
        self.difference(rhs)
    }
}

impl BitXor for &IpSet {
    type Output = IpSet;

    fn bitxor(self, rhs: &IpSet) -> IpSet {
        self.symmetric_difference(rhs)
    }
}

/// Intersect two sorted disjoint run lists.
fn intersect_runs(a: &[(u128, u128)], b: &[(u128, u128)]) -> Vec<(u128, u128)> {
    let mut out = Vec::new();
    let (mut i, mut j) = (0usize, 0usize);
    while i < a.len() && j < b.len() {
        let lo = a[i].0.max(b[j].0);
        let hi = a[i].1.min(b[j].1);
        if lo <= hi {
            out.push((lo, hi));
        }
        if a[i].1 < b[j].1 {
            i += 1;
        } else {
            j += 1;
        }
    }
    out
}

/// Subtract run list `b` from run list `a`; both sorted, disjoint and
/// non-adjacent.
fn subtract_runs(a: &[(u128, u128)], b: &[(u128, u128)]) -> Vec<(u128, u128)> {
    let mut out = Vec::new();
    let mut j = 0usize;

    for &(lo, hi) in a {
        while j < b.len() && b[j].1 < lo {
            j += 1;
        }
        let mut cursor = lo;
        let mut open = true;
        let mut k = j;
        while k < b.len() && b[k].0 <= hi {
            if b[k].0 > cursor {
                out.push((cursor, b[k].0 - 1));
            }
            match b[k].1.checked_add(1) {
                Some(next) => cursor = cursor.max(next),
                None => {
                    open = false;
                    break;
                }
            }
            k += 1;
        }
        if open && cursor <= hi {
            out.push((cursor, hi));
        }
    }
    out
}
