//! EUI-64 grammars and formatting dialects.
//!
//! The same grammar families as EUI-48 at width 64: IEEE dash and UNIX
//! colon forms with eight octet groups, a Cisco-style dotted form with four
//! 16-bit groups, and a bare 16-hex-digit form.

use crate::error::AddrFormatError;

/// Width of an EUI-64 in bits.
pub const WIDTH: u32 = 64;

const FAMILY: &str = "EUI-64";

/// EUI-64 output dialect selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Eui64Dialect {
    /// IEEE canonical: uppercase, dash-separated
    #[default]
    Base,
    /// Lowercase, colon-separated, no zero padding
    Unix,
    /// Lowercase, colon-separated, zero padded
    UnixExpanded,
    /// Dotted 16-bit groups (`001b.77ff.fe49.54fd`)
    Cisco,
    /// Bare 16 hex digits, uppercase
    Bare,
}

/// Parse an EUI-64 string in any accepted form.
pub fn parse(text: &str) -> Result<u64, AddrFormatError> {
    if text.contains('-') {
        join_groups(text, '-', 8, 2)
    } else if text.contains(':') {
        join_groups(text, ':', 8, 2)
    } else if text.contains('.') {
        join_groups(text, '.', 4, 4)
    } else {
        if text.len() != 16 || !text.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(AddrFormatError::syntax(FAMILY, text, "expected 16 hex digits"));
        }
        u64::from_str_radix(text, 16)
            .map_err(|_| AddrFormatError::syntax(FAMILY, text, "bad hex"))
    }
}

fn join_groups(
    text: &str,
    sep: char,
    count: usize,
    max_digits: usize,
) -> Result<u64, AddrFormatError> {
    let groups: Vec<&str> = text.split(sep).collect();
    if groups.len() != count {
        return Err(AddrFormatError::syntax(FAMILY, text, "bad group count"));
    }
    let bits = (64 / count) as u32;
    let mut value = 0u64;
    for group in groups {
        if group.is_empty()
            || group.len() > max_digits
            || !group.bytes().all(|b| b.is_ascii_hexdigit())
        {
            return Err(AddrFormatError::syntax(FAMILY, text, "bad hex group"));
        }
        let word = u64::from_str_radix(group, 16)
            .map_err(|_| AddrFormatError::syntax(FAMILY, text, "bad hex group"))?;
        value = (value << bits) | word;
    }
    Ok(value)
}

/// Format a 64-bit value in the requested dialect.
pub fn format(value: u64, dialect: Eui64Dialect) -> String {
    match dialect {
        Eui64Dialect::Base | Eui64Dialect::Unix | Eui64Dialect::UnixExpanded => {
            let octets: Vec<String> = (0..8)
                .rev()
                .map(|i| {
                    let b = (value >> (i * 8)) & 0xff;
                    match dialect {
                        Eui64Dialect::Base => format!("{b:02X}"),
                        Eui64Dialect::Unix => format!("{b:x}"),
                        _ => format!("{b:02x}"),
                    }
                })
                .collect();
            let sep = if dialect == Eui64Dialect::Base { "-" } else { ":" };
            octets.join(sep)
        }
        Eui64Dialect::Cisco => format!(
            "{:04x}.{:04x}.{:04x}.{:04x}",
            (value >> 48) & 0xffff,
            (value >> 32) & 0xffff,
            (value >> 16) & 0xffff,
            value & 0xffff
        ),
        Eui64Dialect::Bare => format!("{value:016X}"),
    }
}

/// True if `text` parses as an EUI-64. Never fails.
pub fn valid(text: &str) -> bool {
    parse(text).is_ok()
}
