//! IEEE EUI-48 (MAC) and EUI-64 hardware addresses.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use smallvec::SmallVec;

use crate::error::{AddrConversionError, AddrFormatError, Error, NotRegisteredError};
use crate::ip::{IpAddress, IpNetwork};
use crate::registry::{Iab, Oui, IAB_OUIS};
use crate::strategy::eui48::{self, MacDialect};
use crate::strategy::eui64::{self, Eui64Dialect};
use crate::strategy::AddrFamily;

/// Modified EUI-64 universal/local bit (bit 7 of the first octet).
const UL_BIT: u64 = 0x02 << 56;

/// Formatting dialect attached to an EUI value, one variant per width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EuiDialect {
    /// An EUI-48 dialect
    Mac(MacDialect),
    /// An EUI-64 dialect
    Eui64(Eui64Dialect),
}

/// An IEEE Extended Unique Identifier: a MAC address (EUI-48) or EUI-64.
///
/// A value is the pair of an unsigned integer and its family strategy,
/// plus the output dialect it renders with.
///
/// # Example
///
/// ```
/// use addrkit::Eui;
///
/// let mac: Eui = "00-1b-77-49-54-fd".parse().unwrap();
/// assert_eq!(mac.to_string(), "00-1B-77-49-54-FD");
/// assert_eq!(mac.words().as_slice(), &[0x00, 0x1b, 0x77, 0x49, 0x54, 0xfd]);
/// ```
#[derive(Debug, Clone)]
pub struct Eui {
    value: u64,
    family: AddrFamily,
    dialect: EuiDialect,
}

impl Eui {
    /// Parse an EUI string, auto-detecting the width from its grammar.
    pub fn new(text: &str) -> Result<Self, AddrFormatError> {
        if let Ok(value) = eui48::parse(text) {
            return Ok(Self::assemble(value, AddrFamily::Eui48));
        }
        if let Ok(value) = eui64::parse(text) {
            return Ok(Self::assemble(value, AddrFamily::Eui64));
        }
        Err(AddrFormatError::UnknownFamily {
            addr: text.to_string(),
        })
    }

    /// Parse an EUI string with an explicit family.
    pub fn parse(text: &str, family: AddrFamily) -> Result<Self, AddrFormatError> {
        let value = match family {
            AddrFamily::Eui48 => eui48::parse(text)?,
            AddrFamily::Eui64 => eui64::parse(text)?,
            other => {
                return Err(AddrFormatError::syntax(
                    other.name(),
                    text,
                    "not an EUI family",
                ))
            }
        };
        Ok(Self::assemble(value, family))
    }

    /// Build from an integer: EUI-48 when the value fits 48 bits, EUI-64
    /// otherwise.
    pub fn from_int(value: u64) -> Self {
        let family = if value <= AddrFamily::Eui48.max_int() as u64 {
            AddrFamily::Eui48
        } else {
            AddrFamily::Eui64
        };
        Self::assemble(value, family)
    }

    /// Build from an integer with an explicit family; range-checked.
    pub fn with_family(value: u64, family: AddrFamily) -> Result<Self, AddrFormatError> {
        match family {
            AddrFamily::Eui48 | AddrFamily::Eui64 => {}
            other => {
                return Err(AddrFormatError::syntax(
                    other.name(),
                    format!("{value:#x}"),
                    "not an EUI family",
                ))
            }
        }
        if u128::from(value) > family.max_int() {
            return Err(AddrFormatError::IntRange {
                family: family.name(),
                value: u128::from(value),
            });
        }
        Ok(Self::assemble(value, family))
    }

    /// Build from packed big-endian bytes: 6 for EUI-48, 8 for EUI-64.
    pub fn from_packed(bytes: &[u8]) -> Result<Self, AddrFormatError> {
        let family = match bytes.len() {
            6 => AddrFamily::Eui48,
            8 => AddrFamily::Eui64,
            n => {
                return Err(AddrFormatError::syntax(
                    "EUI",
                    format!("{n} bytes"),
                    "packed input must be 6 or 8 bytes",
                ))
            }
        };
        Ok(Self::assemble(family.packed_to_int(bytes)? as u64, family))
    }

    fn assemble(value: u64, family: AddrFamily) -> Self {
        let dialect = match family {
            AddrFamily::Eui48 => EuiDialect::Mac(MacDialect::default()),
            _ => EuiDialect::Eui64(Eui64Dialect::default()),
        };
        Eui {
            value,
            family,
            dialect,
        }
    }

    /// Attach an EUI-48 output dialect; errors for EUI-64 values.
    pub fn with_mac_dialect(mut self, dialect: MacDialect) -> Result<Self, AddrConversionError> {
        if self.family != AddrFamily::Eui48 {
            return Err(AddrConversionError::FamilyMismatch {
                left: self.family.name(),
                right: AddrFamily::Eui48.name(),
            });
        }
        self.dialect = EuiDialect::Mac(dialect);
        Ok(self)
    }

    /// Attach an EUI-64 output dialect; errors for EUI-48 values.
    pub fn with_eui64_dialect(
        mut self,
        dialect: Eui64Dialect,
    ) -> Result<Self, AddrConversionError> {
        if self.family != AddrFamily::Eui64 {
            return Err(AddrConversionError::FamilyMismatch {
                left: self.family.name(),
                right: AddrFamily::Eui64.name(),
            });
        }
        self.dialect = EuiDialect::Eui64(dialect);
        Ok(self)
    }

    /// The integer value.
    pub fn value(&self) -> u64 {
        self.value
    }

    /// The family strategy (EUI-48 or EUI-64).
    pub fn family(&self) -> AddrFamily {
        self.family
    }

    /// Family width in bits.
    pub fn width(&self) -> u32 {
        self.family.width()
    }

    /// The attached output dialect.
    pub fn dialect(&self) -> EuiDialect {
        self.dialect
    }

    /// Big-endian packed byte form.
    pub fn packed(&self) -> SmallVec<[u8; 16]> {
        self.family.int_to_packed(u128::from(self.value))
    }

    /// MSB-first octet sequence.
    pub fn words(&self) -> SmallVec<[u16; 8]> {
        self.family.word_split(u128::from(self.value))
    }

    /// Grouped binary digit string, octets joined by dashes.
    pub fn bits(&self) -> String {
        let words = self.words();
        let mut out = String::with_capacity(9 * words.len());
        for (i, word) in words.iter().enumerate() {
            if i > 0 {
                out.push('-');
            }
            out.push_str(&format!("{word:08b}"));
        }
        out
    }

    /// The 24-bit organisational prefix of this EUI.
    pub fn oui_int(&self) -> u32 {
        (self.value >> (self.family.width() - 24)) as u32
    }

    /// Look up this EUI's OUI in the IEEE registry.
    pub fn oui(&self) -> Result<Oui, Error> {
        Oui::from_int(self.oui_int())
    }

    /// The extension identifier: the octets the OUI does not cover,
    /// dash-separated uppercase.
    pub fn ei(&self) -> String {
        let words = self.words();
        let tail: Vec<String> = words[3..].iter().map(|w| format!("{w:02X}")).collect();
        tail.join("-")
    }

    /// True when this is an EUI-48 inside a registered Individual Address
    /// Block: the OUI is one of the IAB-reserved prefixes and the carved
    /// 12 bits name a known IAB record. Registry failures read as
    /// unregistered.
    pub fn is_iab(&self) -> bool {
        self.family == AddrFamily::Eui48
            && IAB_OUIS.contains(&self.oui_int())
            && self.iab().is_ok()
    }

    /// Look up this EUI's Individual Address Block registration.
    pub fn iab(&self) -> Result<Iab, Error> {
        if self.family != AddrFamily::Eui48 {
            return Err(NotRegisteredError::Iab {
                iab: self.to_string(),
            }
            .into());
        }
        Iab::from_eui(self.value, false)
    }

    /// Expand to an EUI-64: a 48-bit value gets `FF-FE` spliced between
    /// OUI and extension identifier; a 64-bit value is returned as is.
    pub fn eui64(&self) -> Eui {
        match self.family {
            AddrFamily::Eui48 => {
                let upper = self.value >> 24;
                let lower = self.value & 0xff_ffff;
                Self::assemble((upper << 40) | 0xff_fe00_0000 | lower, AddrFamily::Eui64)
            }
            _ => self.clone(),
        }
    }

    /// The modified EUI-64 interface identifier: the EUI-64 expansion with
    /// the universal/local bit inverted (RFC 4291 appendix A).
    pub fn modified_eui64(&self) -> Eui {
        let expanded = self.eui64();
        Self::assemble(expanded.value ^ UL_BIT, AddrFamily::Eui64)
    }

    /// Derive an IPv6 address by combining an IPv6 prefix with this EUI's
    /// modified EUI-64 interface identifier.
    pub fn ipv6(&self, prefix: &IpNetwork) -> Result<IpAddress, AddrConversionError> {
        if prefix.family() != AddrFamily::Ipv6 {
            return Err(AddrConversionError::FamilyMismatch {
                left: prefix.family().name(),
                right: AddrFamily::Ipv6.name(),
            });
        }
        let iid = u128::from(self.modified_eui64().value);
        let value = prefix.network().value() | iid;
        Ok(IpAddress::from_parts_unchecked(value, AddrFamily::Ipv6))
    }

    /// Derive the link-local IPv6 address (`fe80::/64`) for this EUI.
    pub fn ipv6_link_local(&self) -> IpAddress {
        let base = 0xfe80u128 << 112;
        let iid = u128::from(self.modified_eui64().value);
        IpAddress::from_parts_unchecked(base | iid, AddrFamily::Ipv6)
    }

    fn sort_key(&self) -> (AddrFamily, u64) {
        (self.family, self.value)
    }
}

impl fmt::Display for Eui {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self.dialect {
            EuiDialect::Mac(dialect) => eui48::format(self.value, dialect),
            EuiDialect::Eui64(dialect) => eui64::format(self.value, dialect),
        };
        f.write_str(&text)
    }
}

impl FromStr for Eui {
    type Err = AddrFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Eui::new(s)
    }
}

// The dialect is presentation-only and excluded from comparison.
impl PartialEq for Eui {
    fn eq(&self, other: &Self) -> bool {
        self.sort_key() == other.sort_key()
    }
}

impl Eq for Eui {}

impl PartialOrd for Eui {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Eui {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl Hash for Eui {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sort_key().hash(state);
    }
}
