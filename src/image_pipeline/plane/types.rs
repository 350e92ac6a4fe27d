//! Image plane data types

use crate::image_pipeline::common::error::{Result, SkipperError};

/// Storage type of a plane, as declared by the FITS `BITPIX` keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitPix {
    /// 8-bit unsigned integer
    U8,
    /// 16-bit signed integer
    I16,
    /// 32-bit signed integer
    I32,
    /// 64-bit signed integer
    I64,
    /// IEEE single precision
    F32,
    /// IEEE double precision
    F64,
}

impl BitPix {
    pub fn code(self) -> i64 {
        match self {
            Self::U8 => 8,
            Self::I16 => 16,
            Self::I32 => 32,
            Self::I64 => 64,
            Self::F32 => -32,
            Self::F64 => -64,
        }
    }
}

/// A row-major 2-D pixel buffer without padding.
///
/// Pixels are held as `f64` whatever the storage type was; `bitpix` and
/// `bzero` only record where the values came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePlane {
    width: usize,
    height: usize,
    bitpix: BitPix,
    bzero: f64,
    data: Vec<f64>,
}

impl ImagePlane {
    pub fn new(width: usize, height: usize, bitpix: BitPix, data: Vec<f64>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(SkipperError::MalformedExtension(format!(
                "empty plane {}x{}",
                width, height
            )));
        }
        let expected = width.checked_mul(height).ok_or_else(|| {
            SkipperError::MalformedExtension(format!("plane {}x{} is too large", width, height))
        })?;
        if data.len() != expected {
            return Err(SkipperError::MalformedExtension(format!(
                "plane {}x{} holds {} pixels, expected {}",
                width,
                height,
                data.len(),
                expected
            )));
        }

        Ok(Self {
            width,
            height,
            bitpix,
            bzero: 0.0,
            data,
        })
    }

    pub fn with_bzero(mut self, bzero: f64) -> Self {
        self.bzero = bzero;
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn bitpix(&self) -> BitPix {
        self.bitpix
    }

    pub fn bzero(&self) -> f64 {
        self.bzero
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.width..(row + 1) * self.width]
    }

    pub fn rows(&self) -> std::slice::ChunksExact<'_, f64> {
        self.data.chunks_exact(self.width)
    }

    pub fn rows_mut(&mut self) -> std::slice::ChunksExactMut<'_, f64> {
        self.data.chunks_exact_mut(self.width)
    }

    pub fn same_shape(&self, other: &ImagePlane) -> bool {
        self.width == other.width && self.height == other.height
    }
}
