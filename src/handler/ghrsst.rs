//! File handler for GHRSST level-2 netCDF products.

use super::{DatasetInfo, DatasetKey, FileHandler, FilenameInfo, FiletypeInfo, MetaValue};
use crate::config::{Engine, ReaderConfig};
use crate::data::{is_tar_path, ArchiveMember, Dataset, LazyArray};
use crate::error::{GhrsstError, Result};
use crate::time::parse_ghrsst_time;
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

/// Source-specific dimension names and the generic names they are exposed as.
pub const DIMENSION_RENAMES: [(&str, &str); 2] = [("ni", "x"), ("nj", "y")];

/// Handler for one GHRSST L2P file, plain or packed in a tar archive.
///
/// The file is opened on construction. Dropping the handler (or calling
/// [`GhrsstL2FileHandler::release`]) closes the dataset and removes any payload
/// extracted from an archive.
#[derive(Debug)]
pub struct GhrsstL2FileHandler {
    filename: PathBuf,
    filename_info: FilenameInfo,
    filetype_info: FiletypeInfo,
    config: ReaderConfig,
    start_time: NaiveDateTime,
    end_time: NaiveDateTime,
    // Declared before `archive` so the file is closed before its payload is removed.
    dataset: Option<Dataset>,
    archive: Option<ArchiveMember>,
}

impl GhrsstL2FileHandler {
    /// Open `path` with the default configuration.
    pub fn new(
        path: impl AsRef<Path>,
        filename_info: FilenameInfo,
        filetype_info: FiletypeInfo,
        engine: Option<Engine>,
    ) -> Result<Self> {
        Self::with_config(
            path,
            filename_info,
            filetype_info,
            engine,
            ReaderConfig::default(),
        )
    }

    /// Open `path`; `engine`, when given, overrides `config.engine`.
    pub fn with_config(
        path: impl AsRef<Path>,
        mut filename_info: FilenameInfo,
        filetype_info: FiletypeInfo,
        engine: Option<Engine>,
        config: ReaderConfig,
    ) -> Result<Self> {
        config.validate()?;
        let path = path.as_ref();
        let engine = engine.unwrap_or(config.engine);
        let chunks: Vec<(&str, usize)> = DIMENSION_RENAMES
            .iter()
            .map(|&(raw, _)| (raw, config.chunk_size))
            .collect();

        std::fs::metadata(path).map_err(|e| GhrsstError::file_open(path, e))?;

        let (archive, mut dataset) = if is_tar_path(path) {
            let member = ArchiveMember::extract_in(path, config.scratch_dir.as_deref())?;
            let payload = member.payload_path().ok_or(GhrsstError::Released)?;
            let dataset = Dataset::open(payload, engine, &chunks)?;
            (Some(member), dataset)
        } else {
            (None, Dataset::open(path, engine, &chunks)?)
        };

        dataset.rename_dims(&DIMENSION_RENAMES)?;

        let start_time =
            parse_ghrsst_time("start_time", &required_attribute(&dataset, "start_time")?)?;
        let end_time =
            parse_ghrsst_time("stop_time", &required_attribute(&dataset, "stop_time")?)?;
        filename_info.insert("start_time".to_string(), MetaValue::Time(start_time));
        filename_info.insert("end_time".to_string(), MetaValue::Time(end_time));

        tracing::info!(
            path = %path.display(),
            member = archive.as_ref().map(ArchiveMember::member_name),
            %start_time,
            %end_time,
            "opened GHRSST L2 file"
        );

        Ok(Self {
            filename: path.to_path_buf(),
            filename_info,
            filetype_info,
            config,
            start_time,
            end_time,
            dataset: Some(dataset),
            archive,
        })
    }

    /// Observation start, from the `start_time` attribute.
    pub fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }

    /// Observation end, from the `stop_time` attribute.
    pub fn end_time(&self) -> NaiveDateTime {
        self.end_time
    }

    /// The `sensor` global attribute, lowercased.
    pub fn sensor(&self) -> Result<String> {
        self.dataset()?
            .attribute_string("sensor")
            .map(|s| s.to_lowercase())
            .ok_or_else(|| GhrsstError::missing_attribute("sensor"))
    }

    /// The open dataset.
    pub fn dataset(&self) -> Result<&Dataset> {
        self.dataset.as_ref().ok_or(GhrsstError::Released)
    }

    /// Archive member the dataset was read from, if the source was a tar file.
    pub fn archive_member(&self) -> Option<&ArchiveMember> {
        self.archive.as_ref()
    }

    /// Configuration the handler was opened with.
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Whether [`GhrsstL2FileHandler::release`] has run.
    pub fn is_released(&self) -> bool {
        self.dataset.is_none()
    }

    /// Look up the variable named by `info["standard_name"]`, squeezed.
    pub fn get_dataset(&self, key: &DatasetKey, info: &DatasetInfo) -> Result<LazyArray<'_>> {
        let standard_name = info
            .get("standard_name")
            .ok_or(GhrsstError::MissingStandardName)?;
        tracing::debug!(dataset = %key.name, %standard_name, "loading dataset");
        Ok(self.dataset()?.lazy_variable(standard_name)?.squeeze())
    }

    /// Close the dataset and remove any extracted archive payload.
    ///
    /// Safe to call repeatedly; never fails.
    pub fn release(&mut self) {
        let was_open = self.dataset.take().is_some();
        if let Some(archive) = self.archive.as_mut() {
            archive.release();
        }
        if was_open {
            tracing::info!(path = %self.filename.display(), "released GHRSST L2 file");
        }
    }
}

fn required_attribute(dataset: &Dataset, name: &str) -> Result<String> {
    dataset
        .attribute_string(name)
        .ok_or_else(|| GhrsstError::missing_attribute(name))
}

impl Drop for GhrsstL2FileHandler {
    fn drop(&mut self) {
        self.release();
    }
}

impl FileHandler for GhrsstL2FileHandler {
    fn filename(&self) -> &Path {
        &self.filename
    }

    fn filename_info(&self) -> &FilenameInfo {
        &self.filename_info
    }

    fn filetype_info(&self) -> &FiletypeInfo {
        &self.filetype_info
    }

    fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }

    fn end_time(&self) -> NaiveDateTime {
        self.end_time
    }

    fn sensor_names(&self) -> Vec<String> {
        self.sensor().ok().into_iter().collect()
    }

    fn get_dataset(&self, key: &DatasetKey, info: &DatasetInfo) -> Result<LazyArray<'_>> {
        GhrsstL2FileHandler::get_dataset(self, key, info)
    }
}
