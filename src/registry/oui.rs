//! OUI and IAB lookup over the bundled IEEE registry files.

use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use compact_str::CompactString;
use memmap2::Mmap;
use smallvec::SmallVec;

use crate::error::{AddrFormatError, Error, NotRegisteredError};

use super::index::{build_map, read_index, write_index, IndexMap};
use super::parse::{parse_record_text, scan_iab, scan_oui, ScanOutcome};

/// The two OUIs reserved by the IEEE for Individual Address Blocks.
pub const IAB_OUIS: [u32; 2] = [0x0050c2, 0x40d855];

/// One registration parsed from a registry file.
///
/// A single 24-bit OUI may carry several historical registrations; records
/// for one prefix keep their file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OuiRecord {
    /// Registered prefix (24-bit OUI, or 36-bit IAB prefix)
    pub prefix: u64,
    /// Organisation name as present in the data file
    pub org: CompactString,
    /// Indented address block lines
    pub address: Vec<CompactString>,
    /// Byte offset of the record in the source file
    pub offset: u64,
    /// Record size in bytes
    pub size: u64,
}

/// A build-once lookup index over one IEEE registry file.
///
/// The file is memory-mapped; lookups slice the map at the indexed byte
/// range and parse a single record. When a `.idx` sidecar is present next
/// to the data file it is loaded instead of rescanning the file.
#[derive(Debug)]
pub struct Registry {
    mmap: Mmap,
    index: IndexMap,
    skipped: u64,
}

/// Which flat-file grammar a registry file uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RegistryKind {
    Oui,
    Iab,
}

impl Registry {
    /// Open and index an `oui.txt`-format registry file.
    pub fn open_oui(path: &Path) -> Result<Self, Error> {
        Self::open(path, RegistryKind::Oui)
    }

    /// Open and index an `iab.txt`-format registry file.
    pub fn open_iab(path: &Path) -> Result<Self, Error> {
        Self::open(path, RegistryKind::Iab)
    }

    /// Open and index a registry file. A missing file is a fatal I/O error.
    fn open(path: &Path, kind: RegistryKind) -> Result<Self, Error> {
        let file = File::open(path)?;
        // Safety: the registry files are bundled read-only data; they are
        // not mutated while mapped.
        let mmap = unsafe { Mmap::map(&file)? };

        let sidecar = path.with_extension("idx");
        if sidecar.is_file() {
            let index = read_index(&sidecar)?;
            return Ok(Registry {
                mmap,
                index,
                skipped: 0,
            });
        }

        let ScanOutcome { records, skipped } = match kind {
            RegistryKind::Oui => scan_oui(&mmap),
            RegistryKind::Iab => scan_iab(&mmap),
        };
        Ok(Registry {
            mmap,
            index: build_map(&records),
            skipped,
        })
    }

    /// All registrations for a prefix, in file order; `None` when the
    /// prefix is not registered.
    pub fn lookup(&self, prefix: u64) -> Option<Vec<OuiRecord>> {
        let entries = self.index.get(&prefix)?;
        let mut records = Vec::with_capacity(entries.len());
        for &(offset, size) in entries {
            let end = (offset + size).min(self.mmap.len() as u64);
            let parsed = parse_record_text(&self.mmap[offset as usize..end as usize]);
            records.push(OuiRecord {
                prefix,
                org: CompactString::new(&parsed.org),
                address: parsed
                    .address
                    .iter()
                    .map(|line| CompactString::new(line))
                    .collect(),
                offset,
                size,
            });
        }
        Some(records)
    }

    /// Number of distinct registered prefixes.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// True when no prefix is registered.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Count of malformed lines skipped during the build.
    pub fn skipped_lines(&self) -> u64 {
        self.skipped
    }
}

/// Regenerate the OUI `.idx` sidecar from a registry data file. Returns
/// the number of records indexed.
pub fn build_oui_index(data_path: &Path, index_path: &Path) -> Result<usize, Error> {
    let data = std::fs::read(data_path)?;
    let outcome = scan_oui(&data);
    write_index(index_path, &build_map(&outcome.records))?;
    Ok(outcome.records.len())
}

/// Regenerate the IAB `.idx` sidecar from a registry data file. Returns
/// the number of records indexed.
pub fn build_iab_index(data_path: &Path, index_path: &Path) -> Result<usize, Error> {
    let data = std::fs::read(data_path)?;
    let outcome = scan_iab(&data);
    write_index(index_path, &build_map(&outcome.records))?;
    Ok(outcome.records.len())
}

static DATA_DIR: OnceLock<PathBuf> = OnceLock::new();
static OUI_REGISTRY: OnceLock<Registry> = OnceLock::new();
static IAB_REGISTRY: OnceLock<Registry> = OnceLock::new();

/// Override the directory holding `oui.txt` / `iab.txt` before first
/// registry use. Returns false when the location was already fixed.
pub fn set_data_dir<P: Into<PathBuf>>(dir: P) -> bool {
    DATA_DIR.set(dir.into()).is_ok()
}

/// The active registry data directory: an explicit [`set_data_dir`] value,
/// the `ADDRKIT_DATA_DIR` environment variable, or the crate's bundled
/// `data/` directory.
pub fn data_dir() -> PathBuf {
    if let Some(dir) = DATA_DIR.get() {
        return dir.clone();
    }
    if let Some(dir) = std::env::var_os("ADDRKIT_DATA_DIR") {
        return PathBuf::from(dir);
    }
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/data"))
}

/// The process-wide OUI registry, built on first access.
///
/// Construction is idempotent and the result is published atomically;
/// concurrent first callers may race the build but only one wins.
pub fn oui_registry() -> Result<&'static Registry, Error> {
    if let Some(registry) = OUI_REGISTRY.get() {
        return Ok(registry);
    }
    let built = Registry::open(&data_dir().join("oui.txt"), RegistryKind::Oui)?;
    Ok(OUI_REGISTRY.get_or_init(|| built))
}

/// The process-wide IAB registry, built on first access.
pub fn iab_registry() -> Result<&'static Registry, Error> {
    if let Some(registry) = IAB_REGISTRY.get() {
        return Ok(registry);
    }
    let built = Registry::open(&data_dir().join("iab.txt"), RegistryKind::Iab)?;
    Ok(IAB_REGISTRY.get_or_init(|| built))
}

/// A 24-bit Organisationally Unique Identifier with its registrations.
///
/// # Example
///
/// ```no_run
/// use addrkit::Oui;
///
/// let oui = Oui::new("00-1B-77").unwrap();
/// assert_eq!(oui.registration(0).unwrap().org, "Intel Corporate");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Oui {
    value: u32,
    records: Vec<OuiRecord>,
}

impl Oui {
    /// Look up an OUI given as `AA-BB-CC` or bare `AABBCC` hex.
    pub fn new(text: &str) -> Result<Self, Error> {
        let digits: String = text.chars().filter(|c| *c != '-').collect();
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(AddrFormatError::syntax("OUI", text, "expected six hex digits").into());
        }
        // Six hex digits always fit.
        let value = u32::from_str_radix(&digits, 16).unwrap_or(0);
        Self::from_int(value)
    }

    /// Look up an OUI by its 24-bit integer value.
    pub fn from_int(value: u32) -> Result<Self, Error> {
        if value > 0xff_ffff {
            return Err(AddrFormatError::IntRange {
                family: "OUI",
                value: u128::from(value),
            }
            .into());
        }
        let records = oui_registry()?
            .lookup(u64::from(value))
            .ok_or_else(|| NotRegisteredError::Oui {
                oui: format_oui(value),
            })?;
        Ok(Oui { value, records })
    }

    /// The 24-bit prefix value.
    pub fn value(&self) -> u32 {
        self.value
    }

    /// The `i`-th registration record, in file order.
    pub fn registration(&self, i: usize) -> Option<&OuiRecord> {
        self.records.get(i)
    }

    /// Total number of registrations for this prefix.
    pub fn reg_count(&self) -> usize {
        self.records.len()
    }
}

impl fmt::Display for Oui {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_oui(self.value))
    }
}

fn format_oui(value: u32) -> String {
    format!(
        "{:02X}-{:02X}-{:02X}",
        (value >> 16) & 0xff,
        (value >> 8) & 0xff,
        value & 0xff
    )
}

/// A 36-bit Individual Address Block carved out of a reserved OUI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Iab {
    value: u64,
    record: OuiRecord,
}

impl Iab {
    /// Split a 48-bit EUI into its 36-bit IAB prefix and 12-bit user part.
    ///
    /// With `strict` set, non-zero user bits are rejected. Errors when the
    /// upper 24 bits are not a reserved IAB OUI.
    pub fn split_eui(eui: u64, strict: bool) -> Result<(u64, u64), NotRegisteredError> {
        let oui = (eui >> 24) as u32;
        if !IAB_OUIS.contains(&oui) {
            return Err(NotRegisteredError::Iab {
                iab: format!("{eui:#014x}"),
            });
        }
        let prefix = eui >> 12;
        let user = eui & 0xfff;
        if strict && user != 0 {
            return Err(NotRegisteredError::Iab {
                iab: format!("{eui:#014x}"),
            });
        }
        Ok((prefix, user))
    }

    /// Look up an IAB given as a full EUI-48 string (`00-50-C2-AB-C0-00`).
    pub fn new(text: &str) -> Result<Self, Error> {
        let digits: String = text.chars().filter(|c| *c != '-').collect();
        if digits.len() != 12 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(AddrFormatError::syntax("IAB", text, "expected a full EUI-48").into());
        }
        let eui = u64::from_str_radix(&digits, 16).unwrap_or(0);
        Self::from_eui(eui, false)
    }

    /// Look up an IAB from a 48-bit EUI value.
    pub fn from_eui(eui: u64, strict: bool) -> Result<Self, Error> {
        let (prefix, _user) = Iab::split_eui(eui, strict)?;
        Self::from_prefix(prefix)
    }

    /// Look up an IAB by its 36-bit prefix value.
    pub fn from_prefix(prefix: u64) -> Result<Self, Error> {
        let records = iab_registry()?
            .lookup(prefix)
            .ok_or_else(|| NotRegisteredError::Iab {
                iab: format_iab(prefix),
            })?;
        // IAB prefixes are unique; keep the first record.
        let record = records
            .into_iter()
            .next()
            .ok_or_else(|| NotRegisteredError::Iab {
                iab: format_iab(prefix),
            })?;
        Ok(Iab {
            value: prefix,
            record,
        })
    }

    /// The 36-bit prefix value.
    pub fn value(&self) -> u64 {
        self.value
    }

    /// The registration record.
    pub fn registration(&self) -> &OuiRecord {
        &self.record
    }
}

impl fmt::Display for Iab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_iab(self.value))
    }
}

fn format_iab(prefix: u64) -> String {
    let eui = prefix << 12;
    let b: Vec<u64> = (0..6).rev().map(|i| (eui >> (i * 8)) & 0xff).collect();
    format!(
        "{:02X}-{:02X}-{:02X}-{:02X}-{:02X}-{:02X}",
        b[0], b[1], b[2], b[3], b[4], b[5]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn testdata_dir() -> PathBuf {
        PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/data"))
    }

    fn open_oui() -> Registry {
        Registry::open_oui(&testdata_dir().join("oui.txt")).unwrap()
    }

    fn open_iab() -> Registry {
        Registry::open_iab(&testdata_dir().join("iab.txt")).unwrap()
    }

    #[test]
    fn test_registry_opens_bundled_file() {
        let registry = open_oui();
        assert!(!registry.is_empty());
        assert_eq!(registry.skipped_lines(), 0);
    }

    #[test]
    fn test_lookup_known_oui() {
        let registry = open_oui();
        let records = registry.lookup(0x001b77).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].org, "Intel Corporate");
        assert!(!records[0].address.is_empty());
    }

    #[test]
    fn test_lookup_duplicate_registrations_keep_file_order() {
        let registry = open_oui();
        let records = registry.lookup(0x080030).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].org, "NETWORK RESEARCH CORPORATION");
        assert_eq!(records[1].org, "ROYAL MELBOURNE INST OF TECH");
        assert_eq!(records[2].org, "CERN");
    }

    #[test]
    fn test_lookup_missing_prefix() {
        let registry = open_oui();
        assert!(registry.lookup(0xfffffe).is_none());
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let err = Registry::open_oui(Path::new("/nonexistent/oui.txt"));
        assert!(matches!(err, Err(Error::Io(_))));
    }

    #[test]
    fn test_iab_registry_lookup() {
        let registry = open_iab();
        let prefix = (0x0050c2 << 12) | 0x64a;
        let records = registry.lookup(prefix).unwrap();
        assert_eq!(records[0].org, "T.L.S. Corp.");
    }

    #[test]
    fn test_split_eui() {
        let (prefix, user) = Iab::split_eui(0x0050c264a123, false).unwrap();
        assert_eq!(prefix, (0x0050c2 << 12) | 0x64a);
        assert_eq!(user, 0x123);

        assert!(Iab::split_eui(0x0050c264a123, true).is_err());
        assert!(Iab::split_eui(0x0050c264a000, true).is_ok());
        assert!(Iab::split_eui(0x001b774954fd, false).is_err());
    }

    #[test]
    fn test_format_helpers() {
        assert_eq!(format_oui(0x001b77), "00-1B-77");
        assert_eq!(format_iab((0x0050c2 << 12) | 0x64a), "00-50-C2-64-A0-00");
    }

    #[test]
    fn test_index_sidecar_round_trip() {
        let data = std::fs::read(testdata_dir().join("oui.txt")).unwrap();
        let outcome = scan_oui(&data);

        let dir = tempfile::tempdir().unwrap();
        let data_path = dir.path().join("oui.txt");
        std::fs::write(&data_path, &data).unwrap();
        write_index(&dir.path().join("oui.idx"), &build_map(&outcome.records)).unwrap();

        // Re-open through the sidecar and get identical results.
        let registry = Registry::open_oui(&data_path).unwrap();
        let direct = open_oui();
        assert_eq!(
            registry.lookup(0x001b77).unwrap(),
            direct.lookup(0x001b77).unwrap()
        );
        assert_eq!(registry.len(), direct.len());
    }
}
