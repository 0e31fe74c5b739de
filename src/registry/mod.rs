//! IEEE registry lookups (OUI and IAB).
//!
//! This module provides:
//! - [`Oui`] / [`Iab`] - lookup handles over the registration data
//! - [`Registry`] - a build-once, memory-mapped index over one data file
//! - [`oui_registry`] / [`iab_registry`] - the lazily-built process-wide
//!   indices
//!
//! The bundled `oui.txt` / `iab.txt` files are parsed once at first use:
//! a line scan locates each record's byte range, and lookups slice the
//! mapped file to parse a single record on demand. A `.idx` sidecar (see
//! the `mkindex` binary) skips the scan entirely. Missing data files are a
//! fatal configuration error at first use; malformed records are skipped,
//! counted and logged, never fatal.

mod index;
mod oui;
mod parse;

pub use oui::{
    build_iab_index, build_oui_index, data_dir, iab_registry, oui_registry, set_data_dir, Iab,
    Oui, OuiRecord, Registry, IAB_OUIS,
};
