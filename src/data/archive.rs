//! Locating the SST payload inside a tar container.
//!
//! libnetcdf can only open files by path, so the selected member is copied
//! into a temporary file that lives exactly as long as the [`ArchiveMember`].

use crate::error::{GhrsstError, Result};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Extension marking a tar container.
pub const TAR_EXTENSION: &str = "tar";

/// Suffix every candidate member must carry.
pub const NETCDF_SUFFIX: &str = ".nc";

/// Substring identifying the SST-skin product.
pub const SST_SKIN_MARKER: &str = "GHRSST-SSTskin";

/// Whether a path names a tar container.
pub fn is_tar_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(TAR_EXTENSION))
}

/// Whether an archive member holds the SST-skin netCDF payload.
pub fn is_sst_member(name: &str) -> bool {
    name.ends_with(NETCDF_SUFFIX) && name.contains(SST_SKIN_MARKER)
}

/// The SST member extracted from a tar archive.
#[derive(Debug)]
pub struct ArchiveMember {
    archive_path: PathBuf,
    member_name: String,
    payload: Option<NamedTempFile>,
}

impl ArchiveMember {
    /// Scan `archive_path` in stored order and extract the first SST member
    /// into the system temp directory.
    pub fn extract(archive_path: &Path) -> Result<Self> {
        Self::extract_in(archive_path, None)
    }

    /// Like [`ArchiveMember::extract`], placing the payload in `scratch_dir` when given.
    pub fn extract_in(archive_path: &Path, scratch_dir: Option<&Path>) -> Result<Self> {
        let file =
            File::open(archive_path).map_err(|e| GhrsstError::file_open(archive_path, e))?;
        let mut archive = tar::Archive::new(file);
        let entries = archive
            .entries()
            .map_err(|e| GhrsstError::archive(archive_path, e))?;

        for entry in entries {
            let mut entry = entry.map_err(|e| GhrsstError::archive(archive_path, e))?;
            let name = entry
                .path()
                .map_err(|e| GhrsstError::archive(archive_path, e))?
                .to_string_lossy()
                .into_owned();

            if !entry.header().entry_type().is_file() || !is_sst_member(&name) {
                tracing::debug!(member = %name, "skipping archive member");
                continue;
            }

            tracing::debug!(
                archive = %archive_path.display(),
                member = %name,
                size = entry.size(),
                "extracting SST member"
            );
            let mut builder = tempfile::Builder::new();
            builder.prefix("ghrsst-").suffix(NETCDF_SUFFIX);
            let mut payload = match scratch_dir {
                Some(dir) => builder.tempfile_in(dir)?,
                None => builder.tempfile()?,
            };
            std::io::copy(&mut entry, payload.as_file_mut())
                .map_err(|e| GhrsstError::archive(archive_path, e))?;
            payload.as_file_mut().flush()?;

            return Ok(Self {
                archive_path: archive_path.to_path_buf(),
                member_name: name,
                payload: Some(payload),
            });
        }

        Err(GhrsstError::NoMatchingMember {
            archive: archive_path.to_path_buf(),
        })
    }

    /// Path of the tar container.
    pub fn archive_path(&self) -> &Path {
        &self.archive_path
    }

    /// Name of the selected member inside the container.
    pub fn member_name(&self) -> &str {
        &self.member_name
    }

    /// Location of the extracted payload, until released.
    pub fn payload_path(&self) -> Option<&Path> {
        self.payload.as_ref().map(NamedTempFile::path)
    }

    /// Whether the payload has been released.
    pub fn is_released(&self) -> bool {
        self.payload.is_none()
    }

    /// Remove the extracted payload. Idempotent; never fails.
    pub fn release(&mut self) {
        if let Some(payload) = self.payload.take() {
            if let Err(err) = payload.close() {
                tracing::debug!(
                    archive = %self.archive_path.display(),
                    error = %err,
                    "failed to remove extracted payload"
                );
            }
        }
    }
}

impl Drop for ArchiveMember {
    fn drop(&mut self) {
        self.release();
    }
}
