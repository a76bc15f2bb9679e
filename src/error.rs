//! Error types for the GHRSST reader.
//!
//! This module provides a unified error handling approach using `thiserror`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for reader operations.
pub type Result<T> = std::result::Result<T, GhrsstError>;

/// Errors that can occur while opening or reading a GHRSST product.
#[derive(Debug, Error)]
pub enum GhrsstError {
    /// Failed to open a file.
    #[error("Failed to open file: {path}")]
    FileOpen {
        /// Path that could not be opened.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// No tar member matched the SST product predicate.
    #[error("No GHRSST SST-skin netCDF member found in archive: {archive}")]
    NoMatchingMember {
        /// Archive that was scanned.
        archive: PathBuf,
    },

    /// Failed to read the tar container.
    #[error("Failed to read archive {path}")]
    Archive {
        /// Archive path.
        path: PathBuf,
        /// Underlying I/O error from the tar reader.
        #[source]
        source: std::io::Error,
    },

    /// Failed to open or read the netCDF payload.
    #[error("NetCDF error: {0}")]
    NetCDF(String),

    /// A dimension expected in the file is absent.
    #[error("Dimension not found: {name}")]
    MissingDimension {
        /// Dimension name.
        name: String,
    },

    /// A time attribute did not match `YYYYMMDDTHHMMSSZ`.
    #[error("Malformed time attribute {attribute}: {value:?}")]
    MalformedTime {
        /// Attribute name.
        attribute: String,
        /// Raw attribute value.
        value: String,
        /// Parse failure.
        #[source]
        source: chrono::ParseError,
    },

    /// A global attribute is absent or not a string.
    #[error("Attribute not found: {name}")]
    MissingAttribute {
        /// Attribute name.
        name: String,
    },

    /// No variable carries the requested standard name.
    #[error("Variable not found: {name}")]
    VariableNotFound {
        /// Requested name.
        name: String,
    },

    /// The dataset info map has no `standard_name` entry.
    #[error("Dataset info has no standard_name entry")]
    MissingStandardName,

    /// The handler was already released.
    #[error("File handler has been released")]
    Released,

    /// Invalid reader configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Variable type cannot be decoded into a numeric array.
    #[error("Unsupported type {dtype} for variable {variable}")]
    UnsupportedType {
        /// Variable name.
        variable: String,
        /// netCDF type description.
        dtype: String,
    },

    /// Chunk index outside the chunk grid.
    #[error("Chunk index out of range: {index:?}")]
    ChunkOutOfRange {
        /// Requested block index.
        index: Vec<usize>,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GhrsstError {
    /// Create a FileOpen error.
    pub fn file_open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileOpen {
            path: path.into(),
            source,
        }
    }

    /// Create an Archive error.
    pub fn archive(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Archive {
            path: path.into(),
            source,
        }
    }

    /// Create a MissingAttribute error.
    pub fn missing_attribute(name: impl Into<String>) -> Self {
        Self::MissingAttribute { name: name.into() }
    }

    /// Create a MissingDimension error.
    pub fn missing_dimension(name: impl Into<String>) -> Self {
        Self::MissingDimension { name: name.into() }
    }

    /// Create a VariableNotFound error.
    pub fn variable_not_found(name: impl Into<String>) -> Self {
        Self::VariableNotFound { name: name.into() }
    }
}

impl From<netcdf::Error> for GhrsstError {
    fn from(err: netcdf::Error) -> Self {
        Self::NetCDF(err.to_string())
    }
}
