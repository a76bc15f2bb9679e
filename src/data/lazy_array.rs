//! Chunked, deferred view of a netCDF variable.

use crate::error::{GhrsstError, Result};
use ndarray::{ArrayD, IxDyn};
use netcdf::types::{FloatType, IntType, NcVariableType};
use std::collections::HashMap;
use std::ops::Range;

/// One dimension of a variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Axis {
    /// Dimension name.
    pub name: String,
    /// Dimension length.
    pub len: usize,
    /// Tile length along this dimension.
    pub chunk: usize,
}

impl Axis {
    /// Tile lengths covering the axis, the last one possibly short.
    pub fn chunk_lengths(&self) -> Vec<usize> {
        if self.len == 0 || self.chunk == 0 {
            return vec![self.len];
        }
        let mut lengths = vec![self.chunk; self.len / self.chunk];
        if self.len % self.chunk != 0 {
            lengths.push(self.len % self.chunk);
        }
        lengths
    }
}

/// CF decoding parameters read from variable attributes.
///
/// Only masking and linear unpacking are applied. Time variables such as
/// `time` or `sst_dtime` come back as raw offsets; their epoch is available
/// through [`LazyArray::time_units`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Decoding {
    /// `_FillValue`.
    pub fill_value: Option<f64>,
    /// `missing_value`.
    pub missing_value: Option<f64>,
    /// `scale_factor`.
    pub scale_factor: Option<f64>,
    /// `add_offset`.
    pub add_offset: Option<f64>,
}

impl Decoding {
    /// Mask fill values to NaN, then apply scale and offset.
    pub fn apply(&self, raw: f64) -> f64 {
        if self.fill_value == Some(raw) || self.missing_value == Some(raw) {
            return f64::NAN;
        }
        raw * self.scale_factor.unwrap_or(1.0) + self.add_offset.unwrap_or(0.0)
    }
}

/// A variable whose values stay on disk until computed.
///
/// Borrows the dataset it came from, so it cannot outlive the handler that
/// owns that dataset.
pub struct LazyArray<'f> {
    name: String,
    variable: netcdf::Variable<'f>,
    axes: Vec<Axis>,
    /// `false` for axes dropped by [`LazyArray::squeeze`].
    keep: Vec<bool>,
    attributes: HashMap<String, String>,
    decoding: Decoding,
}

impl std::fmt::Debug for LazyArray<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazyArray")
            .field("name", &self.name)
            .field("dims", &self.dims())
            .field("shape", &self.shape())
            .field("decoding", &self.decoding)
            .finish_non_exhaustive()
    }
}

macro_rules! read_widened {
    ($var:expr, $extents:expr, $t:ty) => {{
        let values: Vec<$t> = $var.get_values($extents)?;
        values.into_iter().map(|v| v as f64).collect::<Vec<f64>>()
    }};
}

impl<'f> LazyArray<'f> {
    pub(crate) fn new(
        name: String,
        variable: netcdf::Variable<'f>,
        axes: Vec<Axis>,
        attributes: HashMap<String, String>,
        decoding: Decoding,
    ) -> Self {
        let keep = vec![true; axes.len()];
        Self {
            name,
            variable,
            axes,
            keep,
            attributes,
            decoding,
        }
    }

    fn kept_axes(&self) -> impl Iterator<Item = &Axis> + '_ {
        self.axes
            .iter()
            .zip(&self.keep)
            .filter(|(_, keep)| **keep)
            .map(|(axis, _)| axis)
    }

    /// Variable name as requested.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Dimension names.
    pub fn dims(&self) -> Vec<&str> {
        self.kept_axes().map(|a| a.name.as_str()).collect()
    }

    /// Dimension lengths.
    pub fn shape(&self) -> Vec<usize> {
        self.kept_axes().map(|a| a.len).collect()
    }

    /// Number of dimensions.
    pub fn ndim(&self) -> usize {
        self.kept_axes().count()
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        self.shape().iter().product()
    }

    /// Whether the array holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Tile lengths per dimension.
    pub fn chunks(&self) -> Vec<Vec<usize>> {
        self.kept_axes().map(Axis::chunk_lengths).collect()
    }

    /// Number of tiles per dimension.
    pub fn num_blocks(&self) -> Vec<usize> {
        self.kept_axes().map(|a| a.chunk_lengths().len()).collect()
    }

    /// Variable attributes rendered as text.
    pub fn attributes(&self) -> &HashMap<String, String> {
        &self.attributes
    }

    /// A single attribute.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// CF time units (`"<unit> since <epoch>"`), if this is a time variable.
    pub fn time_units(&self) -> Option<&str> {
        self.attribute("units").filter(|units| units.contains(" since "))
    }

    /// Decoding applied when values are computed.
    pub fn decoding(&self) -> Decoding {
        self.decoding
    }

    /// Drop every length-1 dimension.
    pub fn squeeze(mut self) -> Self {
        for (keep, axis) in self.keep.iter_mut().zip(&self.axes) {
            if axis.len == 1 {
                *keep = false;
            }
        }
        self
    }

    /// Read and decode every value.
    pub fn compute(&self) -> Result<ArrayD<f64>> {
        let ranges: Vec<Range<usize>> = self.kept_axes().map(|a| 0..a.len).collect();
        self.read_region(&ranges)
    }

    /// Read and decode a single tile, addressed by its block index per dimension.
    pub fn compute_chunk(&self, block: &[usize]) -> Result<ArrayD<f64>> {
        let out_of_range = || GhrsstError::ChunkOutOfRange {
            index: block.to_vec(),
        };
        if block.len() != self.ndim() {
            return Err(out_of_range());
        }

        let mut ranges = Vec::with_capacity(block.len());
        for (axis, &b) in self.kept_axes().zip(block) {
            let lengths = axis.chunk_lengths();
            if b >= lengths.len() {
                return Err(out_of_range());
            }
            let start: usize = lengths[..b].iter().sum();
            ranges.push(start..start + lengths[b]);
        }
        self.read_region(&ranges)
    }

    /// Read a hyperslab given one range per kept dimension.
    fn read_region(&self, ranges: &[Range<usize>]) -> Result<ArrayD<f64>> {
        let mut kept = ranges.iter();
        let extents: Vec<netcdf::Extent> = self
            .axes
            .iter()
            .zip(&self.keep)
            .map(|(_, keep)| {
                let range = if *keep {
                    kept.next().cloned().unwrap_or(0..0)
                } else {
                    0..1
                };
                netcdf::Extent::from(range)
            })
            .collect();
        let shape: Vec<usize> = ranges.iter().map(|r| r.len()).collect();

        tracing::debug!(variable = %self.name, ?ranges, "reading region");

        let raw = self.read_raw(extents)?;
        let decoded: Vec<f64> = raw.into_iter().map(|v| self.decoding.apply(v)).collect();
        ArrayD::from_shape_vec(IxDyn(&shape), decoded)
            .map_err(|e| GhrsstError::NetCDF(format!("Invalid shape/data size: {}", e)))
    }

    fn read_raw(&self, extents: Vec<netcdf::Extent>) -> Result<Vec<f64>> {
        let extents = netcdf::Extents::from(extents);
        let var = &self.variable;

        let values = match var.vartype() {
            NcVariableType::Float(FloatType::F64) => {
                let values: Vec<f64> = var.get_values(extents)?;
                values
            }
            NcVariableType::Float(FloatType::F32) => read_widened!(var, extents, f32),
            NcVariableType::Int(IntType::I64) => read_widened!(var, extents, i64),
            NcVariableType::Int(IntType::I32) => read_widened!(var, extents, i32),
            NcVariableType::Int(IntType::I16) => read_widened!(var, extents, i16),
            NcVariableType::Int(IntType::I8) => read_widened!(var, extents, i8),
            NcVariableType::Int(IntType::U64) => read_widened!(var, extents, u64),
            NcVariableType::Int(IntType::U32) => read_widened!(var, extents, u32),
            NcVariableType::Int(IntType::U16) => read_widened!(var, extents, u16),
            NcVariableType::Int(IntType::U8) => read_widened!(var, extents, u8),
            other => {
                return Err(GhrsstError::UnsupportedType {
                    variable: self.name.clone(),
                    dtype: format!("{:?}", other),
                })
            }
        };
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axis(len: usize, chunk: usize) -> Axis {
        Axis {
            name: "x".to_string(),
            len,
            chunk,
        }
    }

    #[test]
    fn chunk_lengths_cover_axis() {
        assert_eq!(axis(10, 4).chunk_lengths(), vec![4, 4, 2]);
        assert_eq!(axis(8, 4).chunk_lengths(), vec![4, 4]);
        assert_eq!(axis(3, 3).chunk_lengths(), vec![3]);
        assert_eq!(axis(0, 0).chunk_lengths(), vec![0]);
    }

    #[test]
    fn decoding_masks_then_scales() {
        let decoding = Decoding {
            fill_value: Some(-32768.0),
            missing_value: None,
            scale_factor: Some(0.01),
            add_offset: Some(273.15),
        };
        assert!(decoding.apply(-32768.0).is_nan());
        assert!((decoding.apply(100.0) - 274.15).abs() < 1e-9);
        assert_eq!(Decoding::default().apply(5.0), 5.0);
    }
}
