//! Pixel plane types
//!
//! Owned image buffers plus the strided views used to pull one sample
//! out of an interleaved Skipper readout.

pub mod types;
mod raw_view;

pub use types::{BitPix, ImagePlane};
pub use raw_view::{RawExtension, RawSampleView};
