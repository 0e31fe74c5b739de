//! Per-family address primitives.
//!
//! This module provides:
//! - [`AddrFamily`] - the strategy handle carried by every address value
//! - Family-specific grammars and formatters ([`ipv4`], [`ipv6`], [`eui48`],
//!   [`eui64`])
//!
//! Each family exposes the same capability set: bit width, maximum value,
//! text parsing, canonical formatting, packed-byte conversion and MSB-first
//! word splitting. Higher layers hold an `AddrFamily` next to the integer
//! value and dispatch through it instead of branching on the family inline.

pub mod eui48;
pub mod eui64;
pub mod ipv4;
pub mod ipv6;

use smallvec::SmallVec;

use crate::error::AddrFormatError;
use crate::flags::ParseFlags;

/// Address family tag. Orders IPv4 before IPv6 and EUI-48 before EUI-64,
/// which fixes the sort order of mixed collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AddrFamily {
    /// 32-bit Internet Protocol version 4
    Ipv4,
    /// 128-bit Internet Protocol version 6
    Ipv6,
    /// 48-bit IEEE Extended Unique Identifier (MAC address)
    Eui48,
    /// 64-bit IEEE Extended Unique Identifier
    Eui64,
}

impl AddrFamily {
    /// Width of the family in bits.
    pub const fn width(self) -> u32 {
        match self {
            AddrFamily::Ipv4 => 32,
            AddrFamily::Ipv6 => 128,
            AddrFamily::Eui48 => 48,
            AddrFamily::Eui64 => 64,
        }
    }

    /// Largest representable value, `2^width - 1`.
    pub const fn max_int(self) -> u128 {
        match self {
            AddrFamily::Ipv6 => u128::MAX,
            _ => (1u128 << self.width()) - 1,
        }
    }

    /// Human-readable family name, used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            AddrFamily::Ipv4 => "IPv4",
            AddrFamily::Ipv6 => "IPv6",
            AddrFamily::Eui48 => "EUI-48",
            AddrFamily::Eui64 => "EUI-64",
        }
    }

    /// IP version number (4 or 6) where applicable.
    pub const fn version(self) -> Option<u8> {
        match self {
            AddrFamily::Ipv4 => Some(4),
            AddrFamily::Ipv6 => Some(6),
            _ => None,
        }
    }

    /// Size in bits of one textual word of this family.
    pub const fn word_size(self) -> u32 {
        match self {
            AddrFamily::Ipv4 => 8,
            AddrFamily::Ipv6 => 16,
            AddrFamily::Eui48 | AddrFamily::Eui64 => 8,
        }
    }

    /// Number of textual words making up an address of this family.
    pub const fn word_count(self) -> u32 {
        self.width() / self.word_size()
    }

    /// True for the two IP families.
    pub const fn is_ip(self) -> bool {
        matches!(self, AddrFamily::Ipv4 | AddrFamily::Ipv6)
    }

    /// Parse `text` into an integer using the family grammar.
    ///
    /// `flags` only affects IPv4 (strict/zerofill modes); the other families
    /// ignore it.
    pub fn parse(self, text: &str, flags: ParseFlags) -> Result<u128, AddrFormatError> {
        match self {
            AddrFamily::Ipv4 => ipv4::parse(text, flags).map(u128::from),
            AddrFamily::Ipv6 => ipv6::parse(text),
            AddrFamily::Eui48 => eui48::parse(text).map(u128::from),
            AddrFamily::Eui64 => eui64::parse(text).map(u128::from),
        }
    }

    /// Format `value` in the family's canonical dialect.
    ///
    /// `value` must already be within range; callers uphold this by
    /// construction.
    pub fn format(self, value: u128) -> String {
        match self {
            AddrFamily::Ipv4 => ipv4::format(value as u32),
            AddrFamily::Ipv6 => ipv6::format(value),
            AddrFamily::Eui48 => eui48::format(value as u64, eui48::MacDialect::Eui48),
            AddrFamily::Eui64 => eui64::format(value as u64, eui64::Eui64Dialect::Base),
        }
    }

    /// Convert `value` to its big-endian packed byte form (`width/8` bytes).
    pub fn int_to_packed(self, value: u128) -> SmallVec<[u8; 16]> {
        let bytes = value.to_be_bytes();
        let skip = 16 - (self.width() / 8) as usize;
        SmallVec::from_slice(&bytes[skip..])
    }

    /// Convert a packed big-endian byte sequence back to an integer.
    ///
    /// Errors unless `bytes` is exactly `width/8` bytes long.
    pub fn packed_to_int(self, bytes: &[u8]) -> Result<u128, AddrFormatError> {
        let needed = (self.width() / 8) as usize;
        if bytes.len() != needed {
            return Err(AddrFormatError::PackedLength {
                family: self.name(),
                needed,
                have: bytes.len(),
            });
        }
        let mut buf = [0u8; 16];
        buf[16 - needed..].copy_from_slice(bytes);
        Ok(u128::from_be_bytes(buf))
    }

    /// Split `value` into `word_count` words of `word_size` bits, MSB first.
    pub fn word_split(self, value: u128) -> SmallVec<[u16; 8]> {
        let count = self.word_count();
        let size = self.word_size();
        let mask = (1u128 << size) - 1;
        let mut words = SmallVec::with_capacity(count as usize);
        for i in (0..count).rev() {
            words.push(((value >> (i * size)) & mask) as u16);
        }
        words
    }

    /// Join MSB-first words back into an integer.
    ///
    /// Errors on a wrong word count or an out-of-range word.
    pub fn word_join(self, words: &[u16]) -> Result<u128, AddrFormatError> {
        let count = self.word_count() as usize;
        if words.len() != count {
            return Err(AddrFormatError::syntax(
                self.name(),
                format!("{words:?}"),
                format!("expected {count} words, have {}", words.len()),
            ));
        }
        let size = self.word_size();
        let max_word = (1u32 << size) - 1;
        let mut value = 0u128;
        for &word in words {
            if u32::from(word) > max_word {
                return Err(AddrFormatError::syntax(
                    self.name(),
                    format!("{words:?}"),
                    format!("word {word:#x} exceeds {max_word:#x}"),
                ));
            }
            value = (value << size) | u128::from(word);
        }
        Ok(value)
    }
}

impl std::fmt::Display for AddrFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
