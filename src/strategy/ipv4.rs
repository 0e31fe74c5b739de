//! IPv4 grammar and canonical formatter.
//!
//! Two parse modes are supported:
//!
//! - the default mode mirrors the POSIX `inet_aton` grammar: one to four
//!   dot-separated parts, each decimal, octal (leading `0`) or hex (leading
//!   `0x`), with partial forms packed the historical way (`127.1` is
//!   `127.0.0.1`);
//! - [`ParseFlags::INET_PTON`] requires exactly four decimal octets with no
//!   leading zeros, which is the only safe mode for untrusted input.
//!
//! [`ParseFlags::ZEROFILL`] strips leading zeros from decimal octets before
//! either mode is applied.

use crate::error::AddrFormatError;
use crate::flags::ParseFlags;

/// Width of an IPv4 address in bits.
pub const WIDTH: u32 = 32;

/// Largest IPv4 value.
pub const MAX_INT: u32 = u32::MAX;

const FAMILY: &str = "IPv4";

/// Parse an IPv4 address string into its 32-bit value.
pub fn parse(text: &str, flags: ParseFlags) -> Result<u32, AddrFormatError> {
    let mut owned;
    let mut addr = text;

    if flags.contains(ParseFlags::ZEROFILL) {
        owned = String::with_capacity(text.len());
        for (i, part) in text.split('.').enumerate() {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(AddrFormatError::syntax(
                    FAMILY,
                    text,
                    "zerofill requires decimal octets",
                ));
            }
            let stripped = part.trim_start_matches('0');
            if i > 0 {
                owned.push('.');
            }
            owned.push_str(if stripped.is_empty() { "0" } else { stripped });
        }
        addr = &owned;
    }

    if flags.contains(ParseFlags::INET_PTON) {
        parse_pton(addr, text)
    } else {
        parse_aton(addr, text)
    }
}

/// Strict four-decimal-octet grammar (`inet_pton` equivalent).
fn parse_pton(addr: &str, original: &str) -> Result<u32, AddrFormatError> {
    let mut value = 0u32;
    let mut count = 0usize;

    for part in addr.split('.') {
        count += 1;
        if count > 4 {
            return Err(AddrFormatError::syntax(FAMILY, original, "too many octets"));
        }
        if part.is_empty() || part.len() > 3 || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AddrFormatError::syntax(
                FAMILY,
                original,
                "octets must be decimal",
            ));
        }
        if part.len() > 1 && part.starts_with('0') {
            return Err(AddrFormatError::syntax(
                FAMILY,
                original,
                "leading zeros are not permitted",
            ));
        }
        let octet: u32 = part
            .parse()
            .map_err(|_| AddrFormatError::syntax(FAMILY, original, "octet out of range"))?;
        if octet > 255 {
            return Err(AddrFormatError::syntax(FAMILY, original, "octet exceeds 255"));
        }
        value = (value << 8) | octet;
    }

    if count != 4 {
        return Err(AddrFormatError::syntax(
            FAMILY,
            original,
            "expected four octets",
        ));
    }
    Ok(value)
}

/// Permissive legacy grammar (`inet_aton` equivalent).
fn parse_aton(addr: &str, original: &str) -> Result<u32, AddrFormatError> {
    let parts: Vec<&str> = addr.split('.').collect();
    if parts.len() > 4 {
        return Err(AddrFormatError::syntax(FAMILY, original, "too many parts"));
    }

    let mut values = Vec::with_capacity(parts.len());
    for part in &parts {
        let v = parse_c_numeric(part)
            .ok_or_else(|| AddrFormatError::syntax(FAMILY, original, "unparseable part"))?;
        values.push(v);
    }

    // Historical packed interpretation: the final part spans the remaining
    // bytes, the leading parts are single octets.
    let value = match values[..] {
        [a] => a,
        [a, b] => {
            check_limit(a, 0xff, original)?;
            check_limit(b, 0x00ff_ffff, original)?;
            (a << 24) | b
        }
        [a, b, c] => {
            check_limit(a, 0xff, original)?;
            check_limit(b, 0xff, original)?;
            check_limit(c, 0xffff, original)?;
            (a << 24) | (b << 16) | c
        }
        [a, b, c, d] => {
            for v in [a, b, c, d] {
                check_limit(v, 0xff, original)?;
            }
            (a << 24) | (b << 16) | (c << 8) | d
        }
        _ => return Err(AddrFormatError::syntax(FAMILY, original, "empty address")),
    };

    Ok(value)
}

fn check_limit(value: u32, limit: u32, original: &str) -> Result<(), AddrFormatError> {
    if value > limit {
        return Err(AddrFormatError::syntax(FAMILY, original, "part out of range"));
    }
    Ok(())
}

/// Parse one part with C `strtoul` base conventions: `0x` hex, leading `0`
/// octal, decimal otherwise. Returns `None` on syntax or 32-bit overflow.
fn parse_c_numeric(part: &str) -> Option<u32> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return None;
    }
    let (digits, radix) = if let Some(hex) = part.strip_prefix("0x").or_else(|| part.strip_prefix("0X")) {
        (hex, 16)
    } else if part.len() > 1 && part.starts_with('0') {
        (&part[1..], 8)
    } else {
        (part, 10)
    };
    if digits.is_empty() {
        return None;
    }
    u32::from_str_radix(digits, radix).ok()
}

/// Format a 32-bit value in canonical dotted-decimal notation.
pub fn format(value: u32) -> String {
    let b = value.to_be_bytes();
    format!("{}.{}.{}.{}", b[0], b[1], b[2], b[3])
}

/// Reverse-DNS name for a 32-bit value (`d.c.b.a.in-addr.arpa`).
pub fn to_arpa(value: u32) -> String {
    let b = value.to_be_bytes();
    format!("{}.{}.{}.{}.in-addr.arpa", b[3], b[2], b[1], b[0])
}

/// True if `text` parses as IPv4 under `flags`. Never fails.
pub fn valid(text: &str, flags: ParseFlags) -> bool {
    parse(text, flags).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::{P, Z};

    #[test]
    fn test_parse_dotted_quad() {
        assert_eq!(parse("192.168.0.1", ParseFlags::empty()).unwrap(), 3232235521);
        assert_eq!(parse("0.0.0.0", ParseFlags::empty()).unwrap(), 0);
        assert_eq!(
            parse("255.255.255.255", ParseFlags::empty()).unwrap(),
            u32::MAX
        );
    }

    #[test]
    fn test_parse_aton_partial_forms() {
        // inet_aton packs partial addresses from both ends.
        assert_eq!(parse("127.1", ParseFlags::empty()).unwrap(), 0x7f000001);
        assert_eq!(parse("127.0.1", ParseFlags::empty()).unwrap(), 0x7f000001);
        assert_eq!(parse("1", ParseFlags::empty()).unwrap(), 1);
        assert_eq!(parse("3232235521", ParseFlags::empty()).unwrap(), 3232235521);
    }

    #[test]
    fn test_parse_aton_radix_forms() {
        assert_eq!(parse("0xC0.0xA8.0.1", ParseFlags::empty()).unwrap(), 3232235521);
        assert_eq!(parse("0300.0250.0.01", ParseFlags::empty()).unwrap(), 3232235521);
        assert_eq!(parse("0x7f.0.0.0x1", ParseFlags::empty()).unwrap(), 0x7f000001);
    }

    #[test]
    fn test_parse_aton_rejects_garbage() {
        for bad in ["", ".", "1.2.3.4.5", "256.1.1.1", "1.2.3.", "0x", "08.1.1.1", "a.b.c.d"] {
            assert!(parse(bad, ParseFlags::empty()).is_err(), "{bad:?}");
        }
    }

    #[test]
    fn test_parse_pton_strict() {
        assert_eq!(parse("192.168.0.1", P).unwrap(), 3232235521);

        for bad in [
            "0xC0.0xA8.0.1", // hex octets
            "127.1",         // partial
            "010.0.0.1",     // leading zero
            "256.0.0.1",     // out of range
            "1.2.3.4.5",
        ] {
            assert!(parse(bad, P).is_err(), "{bad:?}");
        }
    }

    #[test]
    fn test_parse_zerofill() {
        assert_eq!(parse("010.020.030.040", Z).unwrap(), parse("10.20.30.40", ParseFlags::empty()).unwrap());
        // Zerofill then strict parsing combine.
        assert_eq!(parse("010.020.030.040", Z | P).unwrap(), parse("10.20.30.40", P).unwrap());
        // Zerofill rejects non-decimal parts outright.
        assert!(parse("0x10.0.0.1", Z).is_err());
    }

    #[test]
    fn test_format_canonical() {
        assert_eq!(format(3232235521), "192.168.0.1");
        assert_eq!(format(0), "0.0.0.0");
        assert_eq!(format(u32::MAX), "255.255.255.255");
    }

    #[test]
    fn test_round_trip() {
        for value in [0u32, 1, 0x7f000001, 0xc0a80001, u32::MAX] {
            assert_eq!(parse(&format(value), P).unwrap(), value);
        }
    }

    #[test]
    fn test_to_arpa() {
        assert_eq!(to_arpa(0xc0a80001), "1.0.168.192.in-addr.arpa");
    }

    #[test]
    fn test_valid_never_panics() {
        assert!(valid("10.0.0.1", ParseFlags::empty()));
        assert!(!valid("10.0.0.256", ParseFlags::empty()));
        assert!(!valid("", ParseFlags::empty()));
    }
}
