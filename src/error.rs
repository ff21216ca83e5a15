//! Custom error types for the payload crate.
//!
//! This module defines `PayloadError`, the single error type returned by every
//! fallible operation in the crate. It is built with `thiserror` and groups the
//! failures a caller can meet while loading and inspecting a payload:
//!
//! - **`Io`**: the configuration source could not be opened or read.
//! - **`Json`** / **`Yaml`**: the source was read but does not match the payload schema.
//! - **`UnknownFormat`**: no decoder could be chosen from the file extension.
//! - **`DuplicateId`**: two records share an instrument ID. The load is aborted.
//! - **`InvalidAbbreviation`** / **`InvalidName`** / **`InvalidStateValue`**: a state
//!   lookup missed the state tables.
//! - **`Resolution`**: an instrument address could not be resolved to a UDP endpoint.
//! - **`Config`** / **`Configuration`**: application settings failed to load or validate.
//!
//! Parsing an address into its 6-byte wire form is deliberately not represented
//! here. `Instrument::address_bytes` returns an `Option` because a malformed
//! address is an ordinary outcome the caller branches on.

use std::path::PathBuf;
use thiserror::Error;

/// Convenience alias for results using the crate error type.
pub type PayloadResult<T> = std::result::Result<T, PayloadError>;

/// Errors produced while loading or querying the instrument payload.
#[derive(Error, Debug)]
pub enum PayloadError {
    /// The configuration source could not be opened or fully read.
    #[error("I/O error reading '{}': {source}", .path.display())]
    Io {
        /// Source that failed.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// JSON source did not match the payload schema.
    #[error("Invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML source did not match the payload schema.
    #[error("Invalid YAML payload: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// No decoder is registered for the file extension.
    #[error("Unknown payload format for '{}'. Use a .json, .yaml or .yml file", .0.display())]
    UnknownFormat(PathBuf),

    /// Two records in one source share the same instrument ID.
    #[error("Duplicate instrument ID: {0}")]
    DuplicateId(i64),

    /// Text did not match any state abbreviation.
    #[error("state: invalid abbreviation -> {0}")]
    InvalidAbbreviation(String),

    /// Text did not match any state name.
    #[error("state: invalid name -> {0}")]
    InvalidName(String),

    /// Numeric value outside the five legal states.
    #[error("state: invalid value -> {0}")]
    InvalidStateValue(u8),

    /// Address could not be resolved as a UDP endpoint.
    #[error("Failed to resolve UDP address '{address}': {source}")]
    Resolution {
        /// Address as configured.
        address: String,
        /// Underlying resolver failure.
        #[source]
        source: std::io::Error,
    },

    /// Settings could not be extracted from their sources.
    #[error("Configuration error: {0}")]
    Config(#[from] figment::Error),

    /// Settings were extracted but hold invalid values.
    #[error("Configuration validation error: {0}")]
    Configuration(String),
}
