//! Open netCDF dataset with renamed dimensions.

use super::attributes::{attr_value_to_f64, collect_attributes};
use super::lazy_array::{Axis, Decoding, LazyArray};
use crate::config::Engine;
use crate::error::{GhrsstError, Result};
use netcdf::AttributeValue;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// An open netCDF file.
///
/// Dimension and variable names can be remapped once after opening; every
/// name this type hands out is the remapped one.
pub struct Dataset {
    path: PathBuf,
    file: netcdf::File,
    /// Raw dimension name to chunk length.
    chunks: HashMap<String, usize>,
    /// `(raw, exposed)` pairs.
    renames: Vec<(String, String)>,
}

impl std::fmt::Debug for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dataset")
            .field("path", &self.path)
            .field("chunks", &self.chunks)
            .field("renames", &self.renames)
            .finish_non_exhaustive()
    }
}

impl Dataset {
    /// Open a netCDF file, tiling the named raw dimensions at the given lengths.
    pub fn open(path: &Path, engine: Engine, chunks: &[(&str, usize)]) -> Result<Self> {
        tracing::debug!(path = %path.display(), %engine, "opening netCDF dataset");

        let file = match engine {
            Engine::Netcdf => netcdf::open(path),
            Engine::NetcdfDiskless => netcdf::open_with(path, netcdf::Options::DISKLESS),
        }
        .map_err(|e| GhrsstError::NetCDF(format!("Failed to open {}: {}", path.display(), e)))?;

        Ok(Self {
            path: path.to_path_buf(),
            file,
            chunks: chunks
                .iter()
                .map(|(name, len)| (name.to_string(), *len))
                .collect(),
            renames: Vec::new(),
        })
    }

    /// Path the dataset was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rename dimensions, and any variables sharing their names.
    ///
    /// A target already used by another dimension or variable is rejected.
    /// All renames are checked before any is applied.
    pub fn rename_dims(&mut self, mapping: &[(&str, &str)]) -> Result<()> {
        let exposed: Vec<String> = self.dimensions().into_iter().map(|(n, _)| n).collect();
        let variables = self.variable_names();

        for &(from, to) in mapping {
            if !exposed.iter().any(|n| n == from) {
                return Err(GhrsstError::missing_dimension(from));
            }
            let taken = exposed.iter().chain(&variables).any(|n| n == to);
            let clashes = taken && !mapping.iter().any(|&(other, _)| other == to);
            if clashes {
                return Err(GhrsstError::InvalidConfig(format!(
                    "cannot rename {} to {}: name already in use",
                    from, to
                )));
            }
        }

        for &(from, to) in mapping {
            let raw = self.raw_name(from).unwrap_or(from).to_string();
            tracing::debug!(from = %from, to = %to, "renaming dimension");
            self.renames.retain(|(r, _)| *r != raw);
            self.renames.push((raw, to.to_string()));
        }
        Ok(())
    }

    fn exposed_name(&self, raw: &str) -> String {
        self.renames
            .iter()
            .find(|(r, _)| r == raw)
            .map(|(_, e)| e.clone())
            .unwrap_or_else(|| raw.to_string())
    }

    fn raw_name<'a>(&'a self, exposed: &'a str) -> Option<&'a str> {
        if let Some((raw, _)) = self.renames.iter().find(|(_, e)| e == exposed) {
            return Some(raw);
        }
        if self.renames.iter().any(|(r, _)| r == exposed) {
            return None;
        }
        Some(exposed)
    }

    /// Dimension names and lengths.
    pub fn dimensions(&self) -> Vec<(String, usize)> {
        self.file
            .dimensions()
            .map(|dim| (self.exposed_name(&dim.name()), dim.len()))
            .collect()
    }

    /// Length of a dimension by its exposed name.
    pub fn dimension_len(&self, name: &str) -> Option<usize> {
        let raw = self.raw_name(name)?;
        self.file.dimension(raw).map(|d| d.len())
    }

    /// Names of all root-level variables.
    pub fn variable_names(&self) -> Vec<String> {
        self.file
            .variables()
            .map(|var| self.exposed_name(&var.name()))
            .collect()
    }

    /// Global attributes rendered as text.
    pub fn attributes(&self) -> HashMap<String, String> {
        collect_attributes(self.file.attributes())
    }

    /// A string-valued global attribute.
    pub fn attribute_string(&self, name: &str) -> Option<String> {
        match self.file.attribute(name)?.value().ok()? {
            AttributeValue::Str(s) => Some(s),
            AttributeValue::Strs(v) => Some(v.join(", ")),
            _ => None,
        }
    }

    /// Look up a variable and wrap it without reading any values.
    pub fn lazy_variable(&self, name: &str) -> Result<LazyArray<'_>> {
        let variable = self
            .raw_name(name)
            .and_then(|raw| self.file.variable(raw))
            .ok_or_else(|| GhrsstError::variable_not_found(name))?;

        let axes = variable
            .dimensions()
            .iter()
            .map(|dim| {
                let raw = dim.name();
                let len = dim.len();
                let chunk = self
                    .chunks
                    .get(raw.as_str())
                    .map(|c| (*c).min(len))
                    .unwrap_or(len);
                Axis {
                    name: self.exposed_name(&raw),
                    len,
                    chunk,
                }
            })
            .collect();

        let attributes = collect_attributes(variable.attributes());
        let numeric = |key: &str| variable.attribute(key).as_ref().and_then(attr_value_to_f64);
        let decoding = Decoding {
            fill_value: numeric("_FillValue"),
            missing_value: numeric("missing_value"),
            scale_factor: numeric("scale_factor"),
            add_offset: numeric("add_offset"),
        };

        Ok(LazyArray::new(
            name.to_string(),
            variable,
            axes,
            attributes,
            decoding,
        ))
    }
}
