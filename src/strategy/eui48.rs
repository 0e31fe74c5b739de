//! EUI-48 (MAC address) grammars and formatting dialects.
//!
//! Accepted textual forms:
//!
//! | form | example |
//! |------|---------|
//! | IEEE dash | `00-1B-77-49-54-FD` |
//! | UNIX colon | `0:1b:77:49:54:fd` (zero-compressed) |
//! | Cisco triple | `001b.7749.54fd` |
//! | bare | `001B774954FD` |
//! | PostgreSQL | `001b77:4954fd` |
//!
//! The separator structure picks the grammar, so any string matches at most
//! one form and a zero-compressed UNIX string still resolves to a single
//! 48-bit value.

use crate::error::AddrFormatError;

/// Width of an EUI-48 in bits.
pub const WIDTH: u32 = 48;

const FAMILY: &str = "EUI-48";

/// MAC / EUI-48 output dialect selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MacDialect {
    /// IEEE canonical: uppercase, dash-separated (`AA-BB-CC-DD-EE-FF`)
    #[default]
    Eui48,
    /// UNIX style: lowercase, colon-separated, no zero padding
    Unix,
    /// UNIX style with zero padding (`aa:bb:cc:dd:ee:ff`)
    UnixExpanded,
    /// Cisco triple-hextet (`aabb.ccdd.eeff`)
    Cisco,
    /// Bare 12 hex digits, uppercase
    Bare,
    /// PostgreSQL macaddr (`aabbcc:ddeeff`)
    Pgsql,
}

/// Parse an EUI-48 string in any accepted form.
pub fn parse(text: &str) -> Result<u64, AddrFormatError> {
    if text.contains('-') {
        join_groups(text, '-', 6, 2)
    } else if text.contains(':') {
        let groups = text.split(':').count();
        match groups {
            6 => join_groups(text, ':', 6, 2),
            2 => join_groups(text, ':', 2, 6).and_then(|v| {
                // PostgreSQL halves are fixed-width.
                if text.split(':').all(|g| g.len() == 6) {
                    Ok(v)
                } else {
                    Err(AddrFormatError::syntax(FAMILY, text, "bad PostgreSQL form"))
                }
            }),
            _ => Err(AddrFormatError::syntax(FAMILY, text, "bad group count")),
        }
    } else if text.contains('.') {
        join_groups(text, '.', 3, 4)
    } else {
        if text.len() != 12 || !text.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(AddrFormatError::syntax(FAMILY, text, "expected 12 hex digits"));
        }
        u64::from_str_radix(text, 16)
            .map_err(|_| AddrFormatError::syntax(FAMILY, text, "bad hex"))
    }
}

/// Join `count` separator-delimited hex groups of up to `max_digits` digits.
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
    let bits = (48 / count) as u32;
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

/// Format a 48-bit value in the requested dialect.
pub fn format(value: u64, dialect: MacDialect) -> String {
    let b: Vec<u8> = (0..6).rev().map(|i| ((value >> (i * 8)) & 0xff) as u8).collect();
    match dialect {
        MacDialect::Eui48 => format!(
            "{:02X}-{:02X}-{:02X}-{:02X}-{:02X}-{:02X}",
            b[0], b[1], b[2], b[3], b[4], b[5]
        ),
        MacDialect::Unix => format!(
            "{:x}:{:x}:{:x}:{:x}:{:x}:{:x}",
            b[0], b[1], b[2], b[3], b[4], b[5]
        ),
        MacDialect::UnixExpanded => format!(
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            b[0], b[1], b[2], b[3], b[4], b[5]
        ),
        MacDialect::Cisco => format!(
            "{:04x}.{:04x}.{:04x}",
            (value >> 32) & 0xffff,
            (value >> 16) & 0xffff,
            value & 0xffff
        ),
        MacDialect::Bare => format!("{value:012X}"),
        MacDialect::Pgsql => format!("{:06x}:{:06x}", value >> 24, value & 0xff_ffff),
    }
}

/// True if `text` parses as an EUI-48. Never fails.
pub fn valid(text: &str) -> bool {
    parse(text).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTEL: u64 = 0x001b_7749_54fd;

    #[test]
    fn test_parse_all_grammars() {
        assert_eq!(parse("00-1B-77-49-54-FD").unwrap(), INTEL);
        assert_eq!(parse("00:1b:77:49:54:fd").unwrap(), INTEL);
        assert_eq!(parse("0:1b:77:49:54:fd").unwrap(), INTEL);
        assert_eq!(parse("001b.7749.54fd").unwrap(), INTEL);
        assert_eq!(parse("001B774954FD").unwrap(), INTEL);
        assert_eq!(parse("001b77:4954fd").unwrap(), INTEL);
    }

    #[test]
    fn test_parse_zero_compression() {
        assert_eq!(parse("0:0:0:0:0:0").unwrap(), 0);
        assert_eq!(parse("1:2:3:4:5:6").unwrap(), 0x0102_0304_0506);
        assert_eq!(parse("1b.0.54fd").unwrap(), 0x001b_0000_54fd);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in [
            "",
            "00-1B-77-49-54",       // five groups
            "00-1B-77-49-54-FD-AA", // seven groups
            "001B774954F",          // 11 digits
            "001B774954FDA",        // 13 digits
            "00:1b:77:49:54:fg",    // non-hex
            "001:b77:4954fd",       // bad pgsql
            "1b77:4954fd",          // short pgsql half
            "001b.7749",            // two cisco groups
            "00-1B-77-49-54-FDD",   // three-digit group
        ] {
            assert!(parse(bad).is_err(), "{bad:?}");
        }
    }

    #[test]
    fn test_format_dialects() {
        assert_eq!(format(INTEL, MacDialect::Eui48), "00-1B-77-49-54-FD");
        assert_eq!(format(INTEL, MacDialect::Unix), "0:1b:77:49:54:fd");
        assert_eq!(format(INTEL, MacDialect::UnixExpanded), "00:1b:77:49:54:fd");
        assert_eq!(format(INTEL, MacDialect::Cisco), "001b.7749.54fd");
        assert_eq!(format(INTEL, MacDialect::Bare), "001B774954FD");
        assert_eq!(format(INTEL, MacDialect::Pgsql), "001b77:4954fd");
    }

    #[test]
    fn test_round_trip_all_dialects() {
        for dialect in [
            MacDialect::Eui48,
            MacDialect::Unix,
            MacDialect::UnixExpanded,
            MacDialect::Cisco,
            MacDialect::Bare,
            MacDialect::Pgsql,
        ] {
            assert_eq!(parse(&format(INTEL, dialect)).unwrap(), INTEL);
        }
    }
}
