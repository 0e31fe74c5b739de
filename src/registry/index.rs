//! Sidecar index files for the IEEE registries.
//!
//! One record per line, tab-separated, sorted ascending by prefix:
//!
//! ```text
//! prefix<TAB>offset<TAB>length<TAB>count
//! ```
//!
//! `count` is the total number of records sharing the prefix (historical
//! duplicates), repeated on each of that prefix's lines. The index lets a
//! lookup seek straight to the byte range of a single record instead of
//! rescanning the whole file. `mkindex` regenerates the sidecars whenever
//! the source data changes.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::Path;

use smallvec::SmallVec;
use tracing::warn;

use super::parse::RawRecord;

/// Per-prefix list of `(offset, length)` byte ranges, in file order.
pub(crate) type IndexMap = HashMap<u64, SmallVec<[(u64, u64); 1]>>;

/// Group scanned records by prefix, preserving file order within a prefix.
pub(crate) fn build_map(records: &[RawRecord]) -> IndexMap {
    let mut map = IndexMap::with_capacity(records.len());
    for rec in records {
        map.entry(rec.prefix)
            .or_default()
            .push((rec.offset, rec.length));
    }
    map
}

/// Serialise an index map to its sidecar file.
pub(crate) fn write_index(path: &Path, map: &IndexMap) -> std::io::Result<()> {
    let mut prefixes: Vec<u64> = map.keys().copied().collect();
    prefixes.sort_unstable();

    let mut out = Vec::with_capacity(map.len() * 32);
    for prefix in prefixes {
        let entries = &map[&prefix];
        for (offset, length) in entries {
            writeln!(out, "{prefix}\t{offset}\t{length}\t{}", entries.len())?;
        }
    }
    fs::write(path, out)
}

/// Load a sidecar index. Malformed lines are skipped with a warning.
pub(crate) fn read_index(path: &Path) -> std::io::Result<IndexMap> {
    let text = fs::read_to_string(path)?;
    let mut map = IndexMap::new();
    for (lineno, line) in text.lines().enumerate() {
        if line.is_empty() {
            continue;
        }
        match parse_index_line(line) {
            Some((prefix, offset, length)) => {
                map.entry(prefix).or_default().push((offset, length));
            }
            None => {
                warn!(path = %path.display(), lineno, "skipping malformed index line");
            }
        }
    }
    Ok(map)
}

fn parse_index_line(line: &str) -> Option<(u64, u64, u64)> {
    let mut fields = line.split('\t');
    let prefix = fields.next()?.parse().ok()?;
    let offset = fields.next()?.parse().ok()?;
    let length = fields.next()?.parse().ok()?;
    let _count: u32 = fields.next()?.parse().ok()?;
    Some((prefix, offset, length))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_records() -> Vec<RawRecord> {
        vec![
            RawRecord {
                prefix: 0x080030,
                offset: 100,
                length: 50,
            },
            RawRecord {
                prefix: 0x001b77,
                offset: 0,
                length: 100,
            },
            RawRecord {
                prefix: 0x080030,
                offset: 150,
                length: 60,
            },
        ]
    }

    #[test]
    fn test_build_map_groups_duplicates() {
        let map = build_map(&sample_records());
        assert_eq!(map.len(), 2);
        assert_eq!(map[&0x001b77].as_slice(), &[(0, 100)]);
        assert_eq!(map[&0x080030].as_slice(), &[(100, 50), (150, 60)]);
    }

    #[test]
    fn test_index_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("oui.idx");

        let map = build_map(&sample_records());
        write_index(&path, &map).unwrap();

        let loaded = read_index(&path).unwrap();
        assert_eq!(loaded, map);
    }

    #[test]
    fn test_index_file_is_sorted_with_counts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("oui.idx");
        write_index(&path, &build_map(&sample_records())).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        // 0x001b77 = 7031, 0x080030 = 524336
        assert_eq!(lines, ["7031\t0\t100\t1", "524336\t100\t50\t2", "524336\t150\t60\t2"]);
    }

    #[test]
    fn test_read_index_skips_malformed_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("oui.idx");
        std::fs::write(&path, "7053\t0\t10\t1\nnot a record\n9\t1\t2\t1\n").unwrap();

        let loaded = read_index(&path).unwrap();
        assert_eq!(loaded.len(), 2);
    }
}
