//! IPv6 grammar (RFC 4291) and formatters (RFC 5952).
//!
//! The parser accepts the full RFC 4291 grammar: up to eight hextets, at
//! most one `::` elision, an optional embedded IPv4 dotted quad in the last
//! 32 bits, and a trailing `%zone` suffix which is carried verbatim but does
//! not affect the integer value. Leading zeros inside a hextet are accepted
//! on input and never emitted on output.
//!
//! Three output dialects are provided:
//!
//! - [`Ipv6Dialect::Compact`] - RFC 5952: lowercase, leading zeros
//!   suppressed, the longest (left-most on ties) run of two or more zero
//!   hextets collapsed to `::`
//! - [`Ipv6Dialect::Full`] - eight 4-digit lowercase hextets, no collapse
//! - [`Ipv6Dialect::Verbose`] - full form, uppercase

use compact_str::CompactString;

use crate::error::AddrFormatError;
use crate::flags::ParseFlags;

use super::ipv4;

/// Width of an IPv6 address in bits.
pub const WIDTH: u32 = 128;

const FAMILY: &str = "IPv6";

/// IPv6 output dialect selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ipv6Dialect {
    /// RFC 5952 compact form (the canonical dialect)
    #[default]
    Compact,
    /// Eight zero-padded lowercase hextets
    Full,
    /// Eight zero-padded uppercase hextets
    Verbose,
}

/// Parse an IPv6 address string, discarding any `%zone` suffix.
pub fn parse(text: &str) -> Result<u128, AddrFormatError> {
    parse_with_zone(text).map(|(value, _)| value)
}

/// Parse an IPv6 address string, returning the value and the zone
/// identifier when one is present.
///
/// The zone is kept verbatim; it never contributes to the integer value.
/// Zone identifiers containing `/` are rejected.
pub fn parse_with_zone(text: &str) -> Result<(u128, Option<CompactString>), AddrFormatError> {
    let (addr, zone) = match text.split_once('%') {
        Some((addr, zone)) => {
            if zone.is_empty() {
                return Err(AddrFormatError::syntax(FAMILY, text, "empty zone identifier"));
            }
            if zone.contains('/') {
                return Err(AddrFormatError::syntax(
                    FAMILY,
                    text,
                    "zone identifier must not contain '/'",
                ));
            }
            (addr, Some(CompactString::new(zone)))
        }
        None => (text, None),
    };

    let value = parse_addr(addr, text)?;
    Ok((value, zone))
}

fn parse_addr(addr: &str, original: &str) -> Result<u128, AddrFormatError> {
    let mut words: [u16; 8] = [0; 8];

    match addr.split_once("::") {
        Some((head, tail)) => {
            if tail.contains("::") {
                return Err(AddrFormatError::syntax(
                    FAMILY,
                    original,
                    "more than one '::'",
                ));
            }
            // An embedded IPv4 quad occupies the last 32 bits, which the
            // head side never reaches once a '::' is present.
            let head_words = side_words(head, original, false)?;
            let tail_words = side_words(tail, original, true)?;
            let used = head_words.len() + tail_words.len();
            if used > 7 {
                return Err(AddrFormatError::syntax(
                    FAMILY,
                    original,
                    "'::' must elide at least one group",
                ));
            }
            words[..head_words.len()].copy_from_slice(&head_words);
            words[8 - tail_words.len()..].copy_from_slice(&tail_words);
        }
        None => {
            let all = side_words(addr, original, true)?;
            if all.len() != 8 {
                return Err(AddrFormatError::syntax(
                    FAMILY,
                    original,
                    "expected eight groups",
                ));
            }
            words.copy_from_slice(&all);
        }
    }

    let mut value = 0u128;
    for word in words {
        value = (value << 16) | u128::from(word);
    }
    Ok(value)
}

/// Expand one side of a (possibly elided) address into hextet words. An
/// embedded IPv4 dotted quad is only legal as the final group and yields two
/// words.
fn side_words(side: &str, original: &str, allow_v4: bool) -> Result<Vec<u16>, AddrFormatError> {
    let mut words = Vec::with_capacity(8);
    if side.is_empty() {
        return Ok(words);
    }

    let groups: Vec<&str> = side.split(':').collect();
    for (i, group) in groups.iter().enumerate() {
        if group.contains('.') {
            if !allow_v4 || i != groups.len() - 1 {
                return Err(AddrFormatError::syntax(
                    FAMILY,
                    original,
                    "embedded IPv4 must be the final group",
                ));
            }
            let v4 = ipv4::parse(group, ParseFlags::INET_PTON)
                .map_err(|_| AddrFormatError::syntax(FAMILY, original, "bad embedded IPv4"))?;
            words.push((v4 >> 16) as u16);
            words.push((v4 & 0xffff) as u16);
        } else {
            if group.is_empty()
                || group.len() > 4
                || !group.bytes().all(|b| b.is_ascii_hexdigit())
            {
                return Err(AddrFormatError::syntax(FAMILY, original, "bad hex group"));
            }
            let word = u16::from_str_radix(group, 16)
                .map_err(|_| AddrFormatError::syntax(FAMILY, original, "bad hex group"))?;
            words.push(word);
        }
    }
    Ok(words)
}

/// Format in the canonical RFC 5952 compact dialect.
pub fn format(value: u128) -> String {
    format_dialect(value, Ipv6Dialect::Compact)
}

/// Format in the requested dialect.
pub fn format_dialect(value: u128, dialect: Ipv6Dialect) -> String {
    let words = split_words(value);
    match dialect {
        Ipv6Dialect::Compact => format_compact(&words),
        Ipv6Dialect::Full => {
            let tokens: Vec<String> = words.iter().map(|w| format!("{w:04x}")).collect();
            tokens.join(":")
        }
        Ipv6Dialect::Verbose => {
            let tokens: Vec<String> = words.iter().map(|w| format!("{w:04X}")).collect();
            tokens.join(":")
        }
    }
}

fn split_words(value: u128) -> [u16; 8] {
    let mut words = [0u16; 8];
    for (i, word) in words.iter_mut().enumerate() {
        *word = ((value >> (112 - i * 16)) & 0xffff) as u16;
    }
    words
}

/// RFC 5952: collapse the longest run of two or more zero hextets, choosing
/// the left-most run on ties; never collapse a lone zero hextet.
fn format_compact(words: &[u16; 8]) -> String {
    let mut best_start = 0usize;
    let mut best_len = 0usize;
    let mut run_start = 0usize;
    let mut run_len = 0usize;

    for (i, &word) in words.iter().enumerate() {
        if word == 0 {
            if run_len == 0 {
                run_start = i;
            }
            run_len += 1;
            if run_len > best_len {
                best_start = run_start;
                best_len = run_len;
            }
        } else {
            run_len = 0;
        }
    }

    if best_len < 2 {
        let tokens: Vec<String> = words.iter().map(|w| format!("{w:x}")).collect();
        return tokens.join(":");
    }

    let head: Vec<String> = words[..best_start].iter().map(|w| format!("{w:x}")).collect();
    let tail: Vec<String> = words[best_start + best_len..]
        .iter()
        .map(|w| format!("{w:x}"))
        .collect();
    format!("{}::{}", head.join(":"), tail.join(":"))
}

/// Reverse-DNS name: 32 reversed nibbles under `ip6.arpa`.
pub fn to_arpa(value: u128) -> String {
    let mut out = String::with_capacity(72);
    for i in 0..32 {
        let nibble = (value >> (i * 4)) & 0xf;
        out.push(char::from_digit(nibble as u32, 16).unwrap_or('0'));
        out.push('.');
    }
    out.push_str("ip6.arpa");
    out
}

/// True if `text` parses as IPv6. Never fails.
pub fn valid(text: &str) -> bool {
    parse(text).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_forms() {
        assert_eq!(parse("::").unwrap(), 0);
        assert_eq!(parse("::1").unwrap(), 1);
        assert_eq!(parse("1::").unwrap(), 1 << 112);
        assert_eq!(
            parse("2001:db8::ff00:42:8329").unwrap(),
            0x2001_0db8_0000_0000_0000_ff00_0042_8329
        );
        assert_eq!(
            parse("2001:0db8:0000:0000:0000:ff00:0042:8329").unwrap(),
            0x2001_0db8_0000_0000_0000_ff00_0042_8329
        );
    }

    #[test]
    fn test_parse_embedded_ipv4() {
        assert_eq!(parse("::ffff:1.2.3.4").unwrap(), 0xffff_0102_0304);
        assert_eq!(parse("::1.2.3.4").unwrap(), 0x0102_0304);
        assert_eq!(
            parse("0:0:0:0:0:ffff:192.168.0.1").unwrap(),
            0xffff_c0a8_0001
        );
    }

    #[test]
    fn test_parse_zone() {
        let (value, zone) = parse_with_zone("fe80::1%eth0").unwrap();
        assert_eq!(value, 0xfe80_0000_0000_0000_0000_0000_0000_0001);
        assert_eq!(zone.as_deref(), Some("eth0"));

        // Zone never changes the value.
        assert_eq!(parse("fe80::1%eth0").unwrap(), parse("fe80::1").unwrap());
    }

    #[test]
    fn test_parse_rejects_bad_zone() {
        assert!(parse("fe80::1%").is_err());
        assert!(parse("fe80::1%eth0/64").is_err());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in [
            "",
            ":",
            ":::",
            "1::2::3",
            "1:2:3:4:5:6:7",
            "1:2:3:4:5:6:7:8:9",
            "12345::",
            "g::1",
            "1.2.3.4::",
            "::1.2.3.4.5",
            "::ffff:1.2.3",
        ] {
            assert!(parse(bad).is_err(), "{bad:?}");
        }
    }

    #[test]
    fn test_parse_single_group_elision() {
        // '::' standing for exactly one zero group is accepted on input.
        assert_eq!(
            parse("1:2:3:4:5:6:7::").unwrap(),
            parse("1:2:3:4:5:6:7:0").unwrap()
        );
        assert_eq!(
            parse("::2:3:4:5:6:7:8").unwrap(),
            parse("0:2:3:4:5:6:7:8").unwrap()
        );
    }

    #[test]
    fn test_format_compact_rfc5952() {
        assert_eq!(format(0), "::");
        assert_eq!(format(1), "::1");
        assert_eq!(
            format(0x2001_0db8_0000_0000_0000_ff00_0042_8329),
            "2001:db8::ff00:42:8329"
        );
        // Left-most longest zero run wins.
        assert_eq!(
            format(parse("1:0:0:4:0:0:0:8").unwrap()),
            "1:0:0:4::8"
        );
        // A single zero hextet is never collapsed.
        assert_eq!(format(parse("1:0:2:3:4:5:6:7").unwrap()), "1:0:2:3:4:5:6:7");
        // Equal-length runs: the left one is collapsed.
        assert_eq!(format(parse("1:0:0:3:4:0:0:7").unwrap()), "1::3:4:0:0:7");
        assert_eq!(format(1 << 112), "1::");
    }

    #[test]
    fn test_format_full_and_verbose() {
        let value = parse("2001:db8::1").unwrap();
        assert_eq!(
            format_dialect(value, Ipv6Dialect::Full),
            "2001:0db8:0000:0000:0000:0000:0000:0001"
        );
        assert_eq!(
            format_dialect(value, Ipv6Dialect::Verbose),
            "2001:0DB8:0000:0000:0000:0000:0000:0001"
        );
    }

    #[test]
    fn test_round_trip() {
        for text in ["::", "::1", "fe80::1", "2001:db8::ff00:42:8329", "1:0:0:4::8"] {
            let value = parse(text).unwrap();
            assert_eq!(format(value), text);
            assert_eq!(parse(&format(value)).unwrap(), value);
        }
    }

    #[test]
    fn test_to_arpa() {
        assert_eq!(
            to_arpa(1),
            "1.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.ip6.arpa"
        );
    }
}
