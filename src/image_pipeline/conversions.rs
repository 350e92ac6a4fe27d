//! Pipeline conversions module
//!
//! Orchestrates reading a raw Skipper container, correcting every image
//! extension and writing the averaged (and optionally per-sample) output.

mod types;
mod skipper_pipeline;


pub use types::{ExtensionKind, ExtensionReport, ProcessingReport};
pub use skipper_pipeline::SkipperPipeline;
