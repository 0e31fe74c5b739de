//! Parse and construction flags.
//!
//! Flags are bitwise-OR combinable; each consumer ignores bits that do not
//! apply to it. The single-letter aliases [`P`], [`Z`] and [`N`] mirror the
//! long names for terse call sites.

use bitflags::bitflags;

bitflags! {
    /// Options governing parsing leniency and network construction.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ParseFlags: u8 {
        /// Strict IPv4 parsing: exactly four decimal octets, no leading
        /// zeros, each in `0..=255`. Required for untrusted input.
        const INET_PTON = 0b0000_0001;

        /// Strip leading zeros from IPv4 octets before default-mode parsing.
        const ZEROFILL = 0b0000_0010;

        /// Zero host bits when constructing an `IpNetwork`.
        const NOHOST = 0b0000_0100;

        /// Exclude the broadcast address when iterating a network.
        const NOBROADCAST = 0b0000_1000;
    }
}

/// Alias for [`ParseFlags::INET_PTON`].
pub const P: ParseFlags = ParseFlags::INET_PTON;

/// Alias for [`ParseFlags::ZEROFILL`].
pub const Z: ParseFlags = ParseFlags::ZEROFILL;

/// Alias for [`ParseFlags::NOHOST`].
pub const N: ParseFlags = ParseFlags::NOHOST;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_combine() {
        let flags = P | Z;
        assert!(flags.contains(ParseFlags::INET_PTON));
        assert!(flags.contains(ParseFlags::ZEROFILL));
        assert!(!flags.contains(ParseFlags::NOHOST));
    }

    #[test]
    fn test_default_is_empty() {
        assert_eq!(ParseFlags::default(), ParseFlags::empty());
    }
}
