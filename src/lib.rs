//! # addrkit
//!
//! A pure-computation toolkit for Layer-3 (IPv4, IPv6) and Layer-2
//! (EUI-48, EUI-64) network addresses: permissive-but-unambiguous parsing,
//! canonical formatting, CIDR and range arithmetic, set algebra over the
//! combined address space, and indexed lookups over the IEEE OUI/IAB
//! registries. No sockets, no name resolution; everything is CPU-bound and
//! bounded by input length.
//!
//! ## Quick Start
//!
//! ```rust
//! use addrkit::{cidr_merge, IpAddress, IpNetwork, IpSet};
//!
//! // Parse and classify an address.
//! let ip: IpAddress = "192.168.0.1".parse().unwrap();
//! assert!(ip.is_private());
//!
//! // Subnet arithmetic.
//! let net: IpNetwork = "192.168.0.0/16".parse().unwrap();
//! assert!(net.contains_addr(&ip).unwrap());
//!
//! // Set algebra in canonical CIDR form.
//! let lan: IpSet = ["10.0.0.0/8", "192.168.0.0/16"]
//!     .iter()
//!     .map(|t| t.parse::<IpNetwork>().unwrap())
//!     .collect();
//! let reserved: IpSet = ["10.0.0.0/24"]
//!     .iter()
//!     .map(|t| t.parse::<IpNetwork>().unwrap())
//!     .collect();
//! let usable = &lan - &reserved;
//! assert!(usable.contains_addr(&ip));
//!
//! // CIDR list reduction.
//! let merged = cidr_merge(vec![
//!     "192.0.2.0/25".parse().unwrap(),
//!     "192.0.2.128/25".parse().unwrap(),
//! ]);
//! assert_eq!(merged[0].to_string(), "192.0.2.0/24");
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +--------------------------------------------------------------------+
//! |                             addrkit                                |
//! +--------------------------------------------------------------------+
//! |  strategy/  - per-family grammar, formatter, width, packed/words   |
//! |  ip/        - IpAddress, IpNetwork, IpRange, IpGlob, IpSet,        |
//! |               CIDR algebra free functions                          |
//! |  eui/       - Eui values, OUI/EI split, IPv6 derivation            |
//! |  registry/  - memory-mapped IEEE OUI/IAB lookup indices            |
//! |  flags/     - parse and construction flag bits                     |
//! |  error/     - error types                                          |
//! +--------------------------------------------------------------------+
//! ```
//!
//! Every value is the pair of an unsigned integer and a family strategy
//! handle ([`AddrFamily`]); families never mix silently. All values are
//! immutable once constructed, parsing and formatting are pure functions,
//! and the registry indices are built once and published atomically, so
//! everything is safely shareable across threads.
//!
//! ## Registry data
//!
//! The OUI/IAB lookups read the bundled `data/oui.txt` / `data/iab.txt`
//! IEEE flat files at first use (override the location with
//! [`registry::set_data_dir`] or `ADDRKIT_DATA_DIR`). The `mkindex` binary
//! regenerates the `.idx` sidecars that let lookups seek straight to a
//! record.

pub mod error;
pub mod eui;
pub mod flags;
pub mod ip;
pub mod registry;
pub mod strategy;

// Re-export commonly used types at crate root for convenience
pub use error::{AddrConversionError, AddrFormatError, Error, NotRegisteredError, Result};
pub use eui::{Eui, EuiDialect};
pub use flags::{ParseFlags, N, P, Z};
pub use ip::{
    all_matching_cidrs, cidr_exclude, cidr_merge, cidr_to_glob, cidrs_to_iprange, glob_to_cidrs,
    glob_to_iprange, iprange_to_cidrs, iprange_to_globs, iter_iprange, iter_unique_ips,
    largest_matching_cidr, smallest_matching_cidr, spanning_cidr, valid_glob, AddrIter, IpAddress,
    IpGlob, IpNetwork, IpRange, IpSet, SubnetIter, ToCidrs,
};
pub use registry::{iab_registry, oui_registry, set_data_dir, Iab, Oui, OuiRecord, Registry};
pub use strategy::eui48::MacDialect;
pub use strategy::eui64::Eui64Dialect;
pub use strategy::ipv6::Ipv6Dialect;
pub use strategy::AddrFamily;

/// Validation-only entry points. Each returns a boolean and never fails.
pub mod valid {
    use crate::flags::ParseFlags;

    /// True if `text` parses as IPv4 under `flags`.
    pub fn ipv4(text: &str, flags: ParseFlags) -> bool {
        crate::strategy::ipv4::valid(text, flags)
    }

    /// True if `text` parses as IPv6.
    pub fn ipv6(text: &str) -> bool {
        crate::strategy::ipv6::valid(text)
    }

    /// True if `text` parses as an EUI-48 or EUI-64.
    pub fn mac(text: &str) -> bool {
        crate::strategy::eui48::valid(text) || crate::strategy::eui64::valid(text)
    }

    /// True if `text` is a well-formed IPv4 glob.
    pub fn glob(text: &str) -> bool {
        crate::ip::valid_glob(text)
    }
}

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
