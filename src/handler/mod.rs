//! File handler contract shared with the host processing framework.
//!
//! The host matches filenames against its patterns, builds a [`FilenameInfo`]
//! from the match, and constructs one handler per physical file. Datasets are
//! then requested by [`DatasetKey`] together with a [`DatasetInfo`] map.

mod ghrsst;

pub use ghrsst::{GhrsstL2FileHandler, DIMENSION_RENAMES};

use crate::data::LazyArray;
use crate::error::Result;
use chrono::NaiveDateTime;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// A value extracted from a filename by the host's pattern matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaValue {
    /// Raw text.
    Text(String),
    /// Integer field.
    Int(i64),
    /// Parsed timestamp.
    Time(NaiveDateTime),
}

impl MetaValue {
    /// The timestamp, if this value holds one.
    pub fn as_time(&self) -> Option<NaiveDateTime> {
        match self {
            MetaValue::Time(t) => Some(*t),
            _ => None,
        }
    }
}

impl fmt::Display for MetaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetaValue::Text(s) => f.write_str(s),
            MetaValue::Int(i) => write!(f, "{}", i),
            MetaValue::Time(t) => write!(f, "{}", t.format("%Y-%m-%dT%H:%M:%S")),
        }
    }
}

impl From<&str> for MetaValue {
    fn from(s: &str) -> Self {
        MetaValue::Text(s.to_string())
    }
}

impl From<String> for MetaValue {
    fn from(s: String) -> Self {
        MetaValue::Text(s)
    }
}

impl From<NaiveDateTime> for MetaValue {
    fn from(t: NaiveDateTime) -> Self {
        MetaValue::Time(t)
    }
}

/// Metadata parsed from the filename.
pub type FilenameInfo = HashMap<String, MetaValue>;

/// Static description of the file type from the reader configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FiletypeInfo {
    /// File type identifier.
    pub file_type: String,
    /// Reader the file type is bound to.
    pub file_reader: String,
    /// Filename patterns that select this file type.
    pub file_patterns: Vec<String>,
}

impl FiletypeInfo {
    /// Create file type info with no patterns.
    pub fn new(file_type: impl Into<String>, file_reader: impl Into<String>) -> Self {
        Self {
            file_type: file_type.into(),
            file_reader: file_reader.into(),
            file_patterns: Vec::new(),
        }
    }
}

/// Identifies a dataset requested by the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DatasetKey {
    /// Dataset name.
    pub name: String,
    /// Nominal resolution in metres, if the host tracks one.
    pub resolution: Option<u32>,
}

impl DatasetKey {
    /// Key with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resolution: None,
        }
    }
}

/// Reader-configuration entries for a dataset.
pub type DatasetInfo = HashMap<String, String>;

/// Behaviour every file handler offers the host.
pub trait FileHandler {
    /// Path of the source file.
    fn filename(&self) -> &Path;

    /// Filename metadata, including parsed times.
    fn filename_info(&self) -> &FilenameInfo;

    /// File type configuration.
    fn filetype_info(&self) -> &FiletypeInfo;

    /// Observation start.
    fn start_time(&self) -> NaiveDateTime;

    /// Observation end.
    fn end_time(&self) -> NaiveDateTime;

    /// Sensors that contributed to the file.
    fn sensor_names(&self) -> Vec<String> {
        Vec::new()
    }

    /// Look up a dataset without reading its values.
    fn get_dataset(&self, key: &DatasetKey, info: &DatasetInfo) -> Result<LazyArray<'_>>;
}
