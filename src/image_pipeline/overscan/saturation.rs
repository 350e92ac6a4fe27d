use crate::image_pipeline::plane::{BitPix, ImagePlane};

/// Thresholds for the advisory saturation check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SaturationPolicy {
    /// Fraction of the full-scale value at which a pixel counts as saturated.
    pub margin: f64,
    /// Full-scale value for storage types without a natural ceiling.
    pub fallback_level: f64,
}

impl Default for SaturationPolicy {
    fn default() -> Self {
        Self {
            margin: 0.99,
            fallback_level: 65535.0,
        }
    }
}

pub fn saturation_threshold(bitpix: BitPix, bzero: f64, policy: &SaturationPolicy) -> f64 {
    let full_scale = match bitpix {
        BitPix::U8 => 128.0 + bzero,
        BitPix::I16 => 32768.0 + bzero,
        _ => policy.fallback_level,
    };
    full_scale * policy.margin
}

pub fn is_saturated(value: f64, bitpix: BitPix, bzero: f64, policy: &SaturationPolicy) -> bool {
    value >= saturation_threshold(bitpix, bzero, policy)
}

/// Number of pixels at or above the saturation threshold of `plane`.
pub fn count_saturated(plane: &ImagePlane, policy: &SaturationPolicy) -> usize {
    let threshold = saturation_threshold(plane.bitpix(), plane.bzero(), policy);
    plane.data().iter().filter(|&&v| v >= threshold).count()
}
