//! Error types for addrkit.
//!
//! This module provides structured error types for all addrkit operations:
//!
//! - [`enum@Error`] - Main error enum that wraps all error types
//! - [`AddrFormatError`] - Syntactic or range violations at parse time
//! - [`AddrConversionError`] - Operations across incompatible address families
//! - [`NotRegisteredError`] - IEEE registry lookup misses
//!
//! All errors implement `std::error::Error` and can be converted to
//! `anyhow::Error`. Constructors are all-or-nothing: after a parse failure no
//! partial state escapes.

use thiserror::Error;

/// Main error type for addrkit operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Syntactic or range violation while parsing or constructing a value
    #[error("format error: {0}")]
    Format(#[from] AddrFormatError),

    /// Arithmetic or containment between incompatible address families
    #[error("conversion error: {0}")]
    Conversion(#[from] AddrConversionError),

    /// Registry lookup miss
    #[error("registry error: {0}")]
    NotRegistered(#[from] NotRegisteredError),

    /// I/O error (registry data files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised when textual, integer or packed input fails validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddrFormatError {
    /// Text did not match the family's grammar
    #[error("{family}: unrecognised address {addr:?}: {reason}")]
    Syntax {
        family: &'static str,
        addr: String,
        reason: String,
    },

    /// Integer outside the family's value range
    #[error("{family}: integer {value:#x} out of range")]
    IntRange { family: &'static str, value: u128 },

    /// Packed byte input of the wrong length
    #[error("{family}: packed input needs {needed} bytes, have {have}")]
    PackedLength {
        family: &'static str,
        needed: usize,
        have: usize,
    },

    /// Prefix length outside `[0, width]`
    #[error("{family}: prefix /{prefix} out of range (width {width})")]
    PrefixRange {
        family: &'static str,
        prefix: u32,
        width: u32,
    },

    /// Arithmetic offset left the family's address space
    #[error("{family}: offset result outside address space")]
    Overflow { family: &'static str },

    /// No family grammar matched the input
    #[error("could not detect address family of {addr:?}")]
    UnknownFamily { addr: String },

    /// An operation needed a non-empty sequence of inputs
    #[error("{what}: sequence must not be empty")]
    EmptyInput { what: &'static str },
}

impl AddrFormatError {
    /// Shorthand for the common [`AddrFormatError::Syntax`] case.
    pub(crate) fn syntax(
        family: &'static str,
        addr: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        AddrFormatError::Syntax {
            family,
            addr: addr.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised when two values of incompatible families meet.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddrConversionError {
    /// Mixed-family arithmetic or containment
    #[error("family mismatch: {left} vs {right}")]
    FamilyMismatch {
        left: &'static str,
        right: &'static str,
    },

    /// Value has no representation in the target family
    #[error("{addr} has no {target} representation")]
    Unrepresentable { addr: String, target: &'static str },
}

/// Errors raised when a parsed identifier is absent from the IEEE registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotRegisteredError {
    /// OUI prefix not present in `oui.txt`
    #[error("OUI {oui} not registered")]
    Oui { oui: String },

    /// IAB prefix not present in `iab.txt`
    #[error("IAB {iab} not registered")]
    Iab { iab: String },
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
