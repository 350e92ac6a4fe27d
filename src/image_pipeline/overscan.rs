//! Overscan baseline estimation and subtraction
//!
//! Every readout row carries two overscan windows, one per amplifier
//! half. A robust mean of each window is subtracted from its half-row.

mod layout;
mod estimator;
mod corrector;
mod saturation;

pub use layout::OverscanLayout;
pub use estimator::{BaselineEstimator, central_third_mean, trimmed_mean, trimmed_mean_with_min};
pub use corrector::{RowBaseline, correct_plane, correct_row, correct_row_with};
pub use saturation::{SaturationPolicy, count_saturated, is_saturated, saturation_threshold};
