//! Reader configuration.

use crate::error::{GhrsstError, Result};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Environment variable overriding the chunk size.
pub const CHUNK_SIZE_ENV: &str = "GHRSST_CHUNK_SIZE";

/// Default tile length along the spatial axes.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// How libnetcdf opens the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Engine {
    /// Open on disk; values are read when a chunk is computed.
    #[default]
    Netcdf,
    /// Load the whole file into memory at open time.
    NetcdfDiskless,
}

impl Engine {
    /// Get the engine name.
    pub fn name(&self) -> &'static str {
        match self {
            Engine::Netcdf => "netcdf",
            Engine::NetcdfDiskless => "netcdf-diskless",
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Engine {
    type Err = GhrsstError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "netcdf" | "netcdf4" => Ok(Engine::Netcdf),
            "netcdf-diskless" | "diskless" => Ok(Engine::NetcdfDiskless),
            other => Err(GhrsstError::InvalidConfig(format!(
                "unknown engine: {}",
                other
            ))),
        }
    }
}

/// Configuration passed into every file handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Chunk length along `x` and `y`.
    pub chunk_size: usize,
    /// Backend used to open the netCDF payload.
    pub engine: Engine,
    /// Directory for payloads extracted from archives (system temp dir if unset).
    pub scratch_dir: Option<PathBuf>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            engine: Engine::default(),
            scratch_dir: None,
        }
    }
}

impl ReaderConfig {
    /// Build a configuration from defaults and `GHRSST_CHUNK_SIZE`.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Ok(raw) = std::env::var(CHUNK_SIZE_ENV) {
            config.chunk_size = raw.trim().parse().map_err(|_| {
                GhrsstError::InvalidConfig(format!("{}={:?} is not a size", CHUNK_SIZE_ENV, raw))
            })?;
        }
        config.validate()?;
        Ok(config)
    }

    /// Set the chunk size.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Set the engine.
    pub fn with_engine(mut self, engine: Engine) -> Self {
        self.engine = engine;
        self
    }

    /// Set the directory archive payloads are extracted into.
    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = Some(dir.into());
        self
    }

    /// Check the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(GhrsstError::InvalidConfig(
                "chunk size must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_parses_known_names() {
        assert_eq!("netcdf".parse::<Engine>().unwrap(), Engine::Netcdf);
        assert_eq!("NETCDF4".parse::<Engine>().unwrap(), Engine::Netcdf);
        assert_eq!(
            "netcdf-diskless".parse::<Engine>().unwrap(),
            Engine::NetcdfDiskless
        );
        assert!("h5netcdf".parse::<Engine>().is_err());
    }

    #[test]
    fn zero_chunk_size_is_rejected() {
        let config = ReaderConfig::default().with_chunk_size(0);
        assert!(matches!(
            config.validate(),
            Err(GhrsstError::InvalidConfig(_))
        ));
        assert!(ReaderConfig::default().validate().is_ok());
    }
}
