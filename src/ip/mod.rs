//! IP address, network, range, glob and set layers.
//!
//! This module provides:
//! - [`IpAddress`] - a single IPv4/IPv6 address
//! - [`IpNetwork`] - a CIDR subnet, aligned or not
//! - [`IpRange`] - an arbitrary closed address interval
//! - [`IpGlob`] - a wildcard-style IPv4 range
//! - [`IpSet`] - an arbitrary subset of the address space in canonical
//!   CIDR form
//! - Free functions for CIDR list algebra (merge, exclude, span, scans)

mod address;
mod categories;
mod glob;
mod network;
mod ops;
mod range;
mod set;

pub use address::IpAddress;
pub use glob::{
    cidr_to_glob, glob_to_cidrs, glob_to_iprange, iprange_to_globs, valid_glob, IpGlob,
};
pub use network::{AddrIter, IpNetwork, SubnetIter};
pub use ops::{
    all_matching_cidrs, cidr_exclude, cidr_merge, cidrs_to_iprange, iprange_to_cidrs,
    iter_iprange, iter_unique_ips, largest_matching_cidr, smallest_matching_cidr, spanning_cidr,
};
pub use range::IpRange;
pub use set::{IpSet, ToCidrs};
