//! Line-based scanner for IEEE flat-file registries.
//!
//! The OUI and IAB files share one shape: a free-text header, then records
//! introduced by a `(hex)` line carrying the assigned prefix and the
//! organisation name, followed by a `(base 16)` line and an indented
//! address block. Records are located by byte offset so lookups can slice
//! the mapped file directly. Line endings may be LF or CRLF.
//!
//! Malformed record headers are skipped and counted, never fatal; the
//! count is kept on the built index for test assertions.

use tracing::warn;

/// Byte location of one record within the source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawRecord {
    /// 24-bit OUI or 36-bit IAB prefix
    pub prefix: u64,
    /// Byte offset of the record's `(hex)` line
    pub offset: u64,
    /// Record length in bytes, up to the next record or EOF
    pub length: u64,
}

/// Result of scanning a registry file.
#[derive(Debug, Default)]
pub(crate) struct ScanOutcome {
    pub records: Vec<RawRecord>,
    pub skipped: u64,
}

const HEX_MARKER: &[u8] = b"(hex)";
const BASE16_MARKER: &[u8] = b"(base 16)";

/// Scan `oui.txt`: one record per `(hex)` line, keyed by the 24-bit OUI.
pub(crate) fn scan_oui(data: &[u8]) -> ScanOutcome {
    scan(data, |header_line, _| parse_oui_prefix(header_line))
}

/// Scan `iab.txt`: the `(hex)` line carries the 24-bit OUI and the
/// `(base 16)` line the 12-bit sub-block, giving a 36-bit prefix.
pub(crate) fn scan_iab(data: &[u8]) -> ScanOutcome {
    scan(data, |header_line, body| {
        let oui = parse_oui_prefix(header_line)?;
        let sub = body
            .iter()
            .find(|line| contains(line, BASE16_MARKER))
            .and_then(|line| parse_iab_sub_block(line))?;
        Some((oui << 12) | sub)
    })
}

/// Shared record-walk: find `(hex)` boundaries, hand each record's header
/// and body lines to `key` for prefix extraction.
fn scan<F>(data: &[u8], key: F) -> ScanOutcome
where
    F: Fn(&[u8], &[&[u8]]) -> Option<u64>,
{
    let mut outcome = ScanOutcome::default();

    // (offset, header, body lines) of the record being accumulated.
    let mut current: Option<(u64, &[u8], Vec<&[u8]>)> = None;
    let mut current_end = 0u64;
    let mut in_header = true;

    let mut offset = 0u64;
    for line in split_lines(data) {
        let line_end = offset + line.len() as u64;

        if contains(line, HEX_MARKER) {
            in_header = false;
            if let Some((rec_offset, header, body)) = current.take() {
                finish_record(&mut outcome, rec_offset, current_end - rec_offset, header, &body, &key);
            }
            current = Some((offset, line, Vec::new()));
        } else if !in_header {
            if let Some((_, _, body)) = current.as_mut() {
                body.push(line);
            }
        }

        current_end = line_end;
        offset = line_end;
    }

    if let Some((rec_offset, header, body)) = current.take() {
        finish_record(&mut outcome, rec_offset, current_end - rec_offset, header, &body, &key);
    }

    outcome
}

fn finish_record<F>(
    outcome: &mut ScanOutcome,
    offset: u64,
    length: u64,
    header: &[u8],
    body: &[&[u8]],
    key: &F,
) where
    F: Fn(&[u8], &[&[u8]]) -> Option<u64>,
{
    match key(header, body) {
        Some(prefix) => outcome.records.push(RawRecord {
            prefix,
            offset,
            length,
        }),
        None => {
            outcome.skipped += 1;
            warn!(
                offset,
                line = %String::from_utf8_lossy(header).trim(),
                "skipping malformed registry record"
            );
        }
    }
}

/// Iterate lines including their terminators, so offsets stay exact for
/// both LF and CRLF input.
fn split_lines(data: &[u8]) -> impl Iterator<Item = &[u8]> {
    let mut rest = data;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let end = rest
            .iter()
            .position(|&b| b == b'\n')
            .map(|i| i + 1)
            .unwrap_or(rest.len());
        let (line, tail) = rest.split_at(end);
        rest = tail;
        Some(line)
    })
}

fn contains(line: &[u8], needle: &[u8]) -> bool {
    line.windows(needle.len()).any(|w| w == needle)
}

/// Extract the 24-bit prefix from a `XX-XX-XX   (hex)  Org` line.
fn parse_oui_prefix(line: &[u8]) -> Option<u64> {
    let text = std::str::from_utf8(line).ok()?;
    let token = text.split_whitespace().next()?;
    let digits: String = token.chars().filter(|c| *c != '-').collect();
    if digits.len() != 6 {
        return None;
    }
    u64::from_str_radix(&digits, 16).ok()
}

/// Extract the 12-bit sub-block from an `ABC000-ABCFFF  (base 16)  Org`
/// line.
fn parse_iab_sub_block(line: &[u8]) -> Option<u64> {
    let text = std::str::from_utf8(line).ok()?;
    let token = text.split_whitespace().next()?;
    let start = token.split('-').next()?;
    if start.len() != 6 {
        return None;
    }
    let value = u64::from_str_radix(start, 16).ok()?;
    Some(value >> 12)
}

/// Parse the human fields out of one record's bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParsedRecord {
    pub org: String,
    pub address: Vec<String>,
}

pub(crate) fn parse_record_text(record: &[u8]) -> ParsedRecord {
    let mut org = String::new();
    let mut address = Vec::new();

    for line in split_lines(record) {
        let text = String::from_utf8_lossy(line);
        let trimmed = text.trim();
        if trimmed.is_empty() {
            continue;
        }
        if contains(line, HEX_MARKER) {
            // Organisation name follows the `(hex)` marker token.
            let tokens: Vec<&str> = trimmed.split_whitespace().collect();
            org = tokens.get(2..).unwrap_or(&[]).join(" ");
        } else if contains(line, BASE16_MARKER) {
            continue;
        } else {
            address.push(trimmed.to_string());
        }
    }

    ParsedRecord { org, address }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_OUI: &str = "\
  OUI                             Organization\n\
  company_id                      Organization\n\
                                  Address\n\
\n\
  00-CA-FE   (hex)\t\tACME CORPORATION\n\
  00CAFE     (base 16)\t\tACME CORPORATION\n\
\t\t\t\t1 MAIN STREET\n\
\t\t\t\tSPRINGFIELD\n\
\t\t\t\tUNITED STATES\n\
\n\
  00-1B-77   (hex)\t\tIntel Corporate\n\
  001B77     (base 16)\t\tIntel Corporate\n\
\t\t\t\tLot 8, Jalan Hi-Tech 2/3\n\
\t\t\t\tKulim Kedah 09000\n\
\t\t\t\tMY\n";

    #[test]
    fn test_scan_oui_finds_records() {
        let outcome = scan_oui(SAMPLE_OUI.as_bytes());
        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.skipped, 0);
        assert_eq!(outcome.records[0].prefix, 0x00cafe);
        assert_eq!(outcome.records[1].prefix, 0x001b77);
    }

    #[test]
    fn test_scan_offsets_slice_whole_records() {
        let data = SAMPLE_OUI.as_bytes();
        let outcome = scan_oui(data);
        let rec = outcome.records[0];
        let slice = &data[rec.offset as usize..(rec.offset + rec.length) as usize];
        assert!(slice.starts_with(b"  00-CA-FE"));
        assert!(slice.ends_with(b"UNITED STATES\n\n"));
    }

    #[test]
    fn test_scan_handles_crlf() {
        let crlf = SAMPLE_OUI.replace('\n', "\r\n");
        let outcome = scan_oui(crlf.as_bytes());
        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.records[0].prefix, 0x00cafe);
    }

    #[test]
    fn test_scan_counts_malformed_records() {
        let bad = "  NOT-AN-OUI   (hex)\t\tBROKEN LTD\n\n".to_string() + SAMPLE_OUI;
        let outcome = scan_oui(bad.as_bytes());
        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.skipped, 1);
    }

    #[test]
    fn test_parse_record_text() {
        let data = SAMPLE_OUI.as_bytes();
        let outcome = scan_oui(data);
        let rec = outcome.records[1];
        let parsed =
            parse_record_text(&data[rec.offset as usize..(rec.offset + rec.length) as usize]);
        assert_eq!(parsed.org, "Intel Corporate");
        assert_eq!(
            parsed.address,
            ["Lot 8, Jalan Hi-Tech 2/3", "Kulim Kedah 09000", "MY"]
        );
    }

    const SAMPLE_IAB: &str = "\
  00-50-C2   (hex)\t\tT.L.S. Corp.\n\
  64A000-64AFFF     (base 16)\t\tT.L.S. Corp.\n\
\t\t\t\t2101 Superior Avenue\n\
\t\t\t\tUNITED STATES\n";

    #[test]
    fn test_scan_iab_combines_prefix() {
        let outcome = scan_iab(SAMPLE_IAB.as_bytes());
        assert_eq!(outcome.records.len(), 1);
        // (0x0050c2 << 12) | 0x64a
        assert_eq!(outcome.records[0].prefix, 0x0050c2 << 12 | 0x64a);
    }
}
