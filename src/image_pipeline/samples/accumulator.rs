use crate::image_pipeline::common::error::{Result, SkipperError};
use crate::image_pipeline::plane::{BitPix, ImagePlane};

/// Running pixel-wise sum of corrected samples for one extension.
///
/// `finalize` consumes the accumulator, so a buffer cannot be divided
/// twice or reused for the next extension without starting from zero.
#[derive(Debug)]
pub struct SampleAccumulator {
    running: ImagePlane,
    accumulated: usize,
}

impl SampleAccumulator {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let pixels = width.checked_mul(height).ok_or_else(|| {
            SkipperError::MalformedExtension(format!("mean plane {}x{} is too large", width, height))
        })?;
        Ok(Self {
            running: ImagePlane::new(width, height, BitPix::F32, vec![0.0; pixels])?,
            accumulated: 0,
        })
    }

    pub fn accumulate(&mut self, corrected: &ImagePlane) -> Result<()> {
        if !self.running.same_shape(corrected) {
            return Err(SkipperError::MalformedExtension(format!(
                "sample {}x{} does not match running mean {}x{}",
                corrected.width(),
                corrected.height(),
                self.running.width(),
                self.running.height()
            )));
        }

        self.running
            .data_mut()
            .iter_mut()
            .zip(corrected.data())
            .for_each(|(sum, v)| *sum += v);
        self.accumulated += 1;
        Ok(())
    }

    pub fn accumulated(&self) -> usize {
        self.accumulated
    }

    /// Divides the running sum by `sample_count` and returns the mean plane.
    pub fn finalize(mut self, sample_count: usize) -> Result<ImagePlane> {
        if sample_count == 0 || sample_count != self.accumulated {
            return Err(SkipperError::SampleCountMismatch {
                expected: sample_count,
                accumulated: self.accumulated,
            });
        }

        let n = sample_count as f64;
        self.running.data_mut().iter_mut().for_each(|v| *v /= n);
        Ok(self.running)
    }
}
