use crate::image_pipeline::common::error::{Result, SkipperError};
use crate::image_pipeline::plane::{ImagePlane, RawExtension};

/// Copies sample `sample_index` out of an interleaved raw extension.
///
/// Output pixel `(row, col)` is raw pixel `(row, sample_count * col + sample_index)`.
pub fn extract_sample(raw: &RawExtension, sample_index: usize) -> Result<ImagePlane> {
    let sample_count = raw.sample_count();
    if sample_index >= sample_count {
        return Err(SkipperError::InvalidSampleIndex {
            index: sample_index,
            sample_count,
        });
    }

    let width = raw.nominal_width();
    let height = raw.height();
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        data.extend(raw.sample_row(row, sample_index)?.iter());
    }

    Ok(ImagePlane::new(width, height, raw.plane().bitpix(), data)?
        .with_bzero(raw.plane().bzero()))
}
