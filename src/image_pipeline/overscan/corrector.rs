use crate::image_pipeline::common::error::{Result, SkipperError};
use crate::image_pipeline::overscan::estimator::BaselineEstimator;
use crate::image_pipeline::overscan::layout::OverscanLayout;
use crate::image_pipeline::plane::ImagePlane;

/// Baselines subtracted from one row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowBaseline {
    pub left_mean: f64,
    pub right_mean: f64,
}

/// Subtracts the trimmed-mean overscan baseline from each half of `row`.
pub fn correct_row(row: &mut [f64], layout: &OverscanLayout) -> Result<RowBaseline> {
    correct_row_with(row, layout, BaselineEstimator::TrimmedMean)
}

pub fn correct_row_with(
    row: &mut [f64],
    layout: &OverscanLayout,
    estimator: BaselineEstimator,
) -> Result<RowBaseline> {
    if row.len() != layout.image_cols() {
        return Err(SkipperError::MalformedExtension(format!(
            "row has {} columns, layout expects {}",
            row.len(),
            layout.image_cols()
        )));
    }

    let left_mean = estimator.estimate(&row[layout.left_window()], layout)?;
    let right_mean = estimator.estimate(&row[layout.right_window()], layout)?;

    let (left, right) = row.split_at_mut(layout.half_width());
    left.iter_mut().for_each(|p| *p -= left_mean);
    right.iter_mut().for_each(|p| *p -= right_mean);

    Ok(RowBaseline {
        left_mean,
        right_mean,
    })
}

/// Corrects every row of a de-interleaved sample in place.
pub fn correct_plane(
    plane: &mut ImagePlane,
    layout: &OverscanLayout,
    estimator: BaselineEstimator,
) -> Result<()> {
    for row in plane.rows_mut() {
        correct_row_with(row, layout, estimator)?;
    }
    Ok(())
}
