use crate::image_pipeline::common::error::{Result, SkipperError};
use crate::image_pipeline::plane::types::ImagePlane;

/// An interleaved Skipper readout: consecutive raw columns cycle through
/// the samples, so column `c` of sample `s` sits at raw column
/// `sample_count * c + s`.
#[derive(Debug, Clone)]
pub struct RawExtension {
    plane: ImagePlane,
    sample_count: usize,
}

impl RawExtension {
    /// Wraps a raw plane whose width must be a whole multiple of
    /// `nominal_width`.
    pub fn new(plane: ImagePlane, nominal_width: usize) -> Result<Self> {
        if nominal_width == 0 {
            return Err(SkipperError::MalformedExtension(
                "nominal width must be non-zero".to_string(),
            ));
        }
        let width = plane.width();
        if width < nominal_width || width % nominal_width != 0 {
            return Err(SkipperError::MalformedExtension(format!(
                "raw width {} is not a multiple of the image width {}",
                width, nominal_width
            )));
        }

        Ok(Self {
            sample_count: width / nominal_width,
            plane,
        })
    }

    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Width of one de-interleaved sample.
    pub fn nominal_width(&self) -> usize {
        self.plane.width() / self.sample_count
    }

    pub fn height(&self) -> usize {
        self.plane.height()
    }

    pub fn plane(&self) -> &ImagePlane {
        &self.plane
    }

    /// Strided view of one sample within raw row `row`.
    pub fn sample_row(&self, row: usize, sample_index: usize) -> Result<RawSampleView<'_>> {
        RawSampleView::new(self.plane.row(row), self.sample_count, sample_index)
    }
}

/// Read-only strided access to one sample of an interleaved raw row.
#[derive(Debug, Clone, Copy)]
pub struct RawSampleView<'a> {
    row: &'a [f64],
    sample_count: usize,
    sample_index: usize,
}

impl<'a> RawSampleView<'a> {
    pub fn new(row: &'a [f64], sample_count: usize, sample_index: usize) -> Result<Self> {
        if sample_index >= sample_count {
            return Err(SkipperError::InvalidSampleIndex {
                index: sample_index,
                sample_count,
            });
        }
        Ok(Self {
            row,
            sample_count,
            sample_index,
        })
    }

    fn len(&self) -> usize {
        self.row.len() / self.sample_count
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + 'a {
        let row: &'a [f64] = self.row;
        row[..self.len() * self.sample_count]
            .iter()
            .skip(self.sample_index)
            .step_by(self.sample_count)
            .copied()
    }
}
