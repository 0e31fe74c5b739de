//! CIDR list algebra: merge, exclude, span and matching scans.

use crate::error::{AddrConversionError, AddrFormatError, Error};
use crate::strategy::AddrFamily;

use super::address::IpAddress;
use super::network::{AddrIter, IpNetwork};
use super::range::IpRange;

/// Merge networks into the smallest equivalent list of CIDRs.
///
/// Adjacent and overlapping blocks are coalesced transitively; the result
/// is sorted with IPv4 before IPv6 and contains no block nested inside
/// another. Merging is idempotent and order-independent.
pub fn cidr_merge<I>(nets: I) -> Vec<IpNetwork>
where
    I: IntoIterator<Item = IpNetwork>,
{
    let mut v4: Vec<(u128, u128)> = Vec::new();
    let mut v6: Vec<(u128, u128)> = Vec::new();

    for net in nets {
        let interval = (net.first_value(), net.last_value());
        match net.family() {
            AddrFamily::Ipv4 => v4.push(interval),
            _ => v6.push(interval),
        }
    }

    let mut result = Vec::new();
    for (intervals, family) in [(v4, AddrFamily::Ipv4), (v6, AddrFamily::Ipv6)] {
        for (first, last) in coalesce(intervals) {
            result.extend(IpRange::from_values(first, last, family).cidrs());
        }
    }
    result
}

/// Coalesce sorted intervals, joining overlaps and exact adjacency.
pub(crate) fn coalesce(mut intervals: Vec<(u128, u128)>) -> Vec<(u128, u128)> {
    intervals.sort_unstable();
    let mut runs: Vec<(u128, u128)> = Vec::with_capacity(intervals.len());
    for (first, last) in intervals {
        match runs.last_mut() {
            Some((_, run_last)) if first <= run_last.saturating_add(1) => {
                *run_last = (*run_last).max(last);
            }
            _ => runs.push((first, last)),
        }
    }
    runs
}

/// Compute `target \ exclude` as an ordered CIDR list.
///
/// Two CIDRs of one family either nest or are disjoint, so the remainder is
/// found by repeatedly halving the target and keeping the half the excluded
/// block does not occupy.
pub fn cidr_exclude(
    target: &IpNetwork,
    exclude: &IpNetwork,
) -> Result<Vec<IpNetwork>, AddrConversionError> {
    if target.family() != exclude.family() {
        return Err(AddrConversionError::FamilyMismatch {
            left: target.family().name(),
            right: exclude.family().name(),
        });
    }

    let (t_first, t_last) = (target.first_value(), target.last_value());
    let (e_first, e_last) = (exclude.first_value(), exclude.last_value());

    if e_last < t_first || t_last < e_first {
        return Ok(vec![target.cidr()]);
    }
    if e_first <= t_first && t_last <= e_last {
        return Ok(Vec::new());
    }

    // exclude is now a strict sub-block of target.
    let family = target.family();
    let width = family.width();
    let mut result = Vec::new();
    let mut cur_first = t_first;
    let mut prefix_len = target.prefix_len();

    while prefix_len < exclude.prefix_len() {
        prefix_len += 1;
        let half = 1u128 << (width - prefix_len);
        let upper_first = cur_first + half;
        if e_first >= upper_first {
            result.push(IpNetwork::from_cidr_unchecked(cur_first, prefix_len, family));
            cur_first = upper_first;
        } else {
            result.push(IpNetwork::from_cidr_unchecked(upper_first, prefix_len, family));
        }
    }

    result.sort();
    Ok(result)
}

/// The smallest single CIDR containing every input network.
///
/// Errors on an empty sequence or mixed families.
pub fn spanning_cidr(nets: &[IpNetwork]) -> Result<IpNetwork, Error> {
    let first_net = nets.first().ok_or(AddrFormatError::EmptyInput {
        what: "spanning_cidr",
    })?;
    let family = first_net.family();

    let mut lo = first_net.first_value();
    let mut hi = first_net.last_value();
    for net in &nets[1..] {
        if net.family() != family {
            return Err(AddrConversionError::FamilyMismatch {
                left: family.name(),
                right: net.family().name(),
            }
            .into());
        }
        lo = lo.min(net.first_value());
        hi = hi.max(net.last_value());
    }

    Ok(span_block(lo, hi, family))
}

/// The tightest aligned block containing `[lo, hi]`.
pub(crate) fn span_block(lo: u128, hi: u128, family: AddrFamily) -> IpNetwork {
    let width = family.width();
    let xor = lo ^ hi;
    let differing = if xor == 0 { 0 } else { 128 - xor.leading_zeros() };
    let prefix_len = width - differing.min(width);
    let shift = width - prefix_len;
    let base = if shift >= 128 { 0 } else { lo & !((1u128 << shift) - 1) };
    IpNetwork::from_cidr_unchecked(base, prefix_len, family)
}

/// Cover the closed interval `[start, end]` with a minimal CIDR list.
pub fn iprange_to_cidrs(start: &IpAddress, end: &IpAddress) -> Result<Vec<IpNetwork>, Error> {
    Ok(IpRange::new(start.clone(), end.clone())?.cidrs())
}

/// Collapse a CIDR list back into the single contiguous range it covers.
///
/// Errors when the list is empty, mixes families, or leaves gaps.
pub fn cidrs_to_iprange(cidrs: &[IpNetwork]) -> Result<IpRange, Error> {
    let first_net = cidrs.first().ok_or(AddrFormatError::EmptyInput {
        what: "cidrs_to_iprange",
    })?;
    let family = first_net.family();
    for net in cidrs {
        if net.family() != family {
            return Err(AddrConversionError::FamilyMismatch {
                left: family.name(),
                right: net.family().name(),
            }
            .into());
        }
    }

    let runs = coalesce(
        cidrs
            .iter()
            .map(|net| (net.first_value(), net.last_value()))
            .collect(),
    );
    match runs[..] {
        [(first, last)] => Ok(IpRange::from_values(first, last, family)),
        _ => Err(AddrConversionError::Unrepresentable {
            addr: format!("{} CIDRs in {} runs", cidrs.len(), runs.len()),
            target: "contiguous range",
        }
        .into()),
    }
}

/// Lazily iterate the addresses from `start` through `end` inclusive.
pub fn iter_iprange(start: &IpAddress, end: &IpAddress) -> Result<AddrIter, Error> {
    let range = IpRange::new(start.clone(), end.clone())?;
    Ok(range.iter())
}

/// Iterate the distinct addresses covered by a collection of networks,
/// duplicates folded away by a CIDR merge up front.
pub fn iter_unique_ips<I>(nets: I) -> impl Iterator<Item = IpAddress>
where
    I: IntoIterator<Item = IpNetwork>,
{
    cidr_merge(nets).into_iter().flat_map(|cidr| cidr.iter())
}

/// Every CIDR in `cidrs` containing `ip`, in input order.
pub fn all_matching_cidrs(ip: &IpAddress, cidrs: &[IpNetwork]) -> Vec<IpNetwork> {
    cidrs
        .iter()
        .filter(|net| net.contains_addr(ip).unwrap_or(false))
        .cloned()
        .collect()
}

/// The matching CIDR with the shortest prefix (the widest block).
pub fn largest_matching_cidr(ip: &IpAddress, cidrs: &[IpNetwork]) -> Option<IpNetwork> {
    cidrs
        .iter()
        .filter(|net| net.contains_addr(ip).unwrap_or(false))
        .min_by_key(|net| net.prefix_len())
        .cloned()
}

/// The matching CIDR with the longest prefix (the tightest block).
pub fn smallest_matching_cidr(ip: &IpAddress, cidrs: &[IpNetwork]) -> Option<IpNetwork> {
    cidrs
        .iter()
        .filter(|net| net.contains_addr(ip).unwrap_or(false))
        .max_by_key(|net| net.prefix_len())
        .cloned()
}
