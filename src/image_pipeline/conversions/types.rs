//! Processing report types

use std::path::PathBuf;

use crate::image_pipeline::common::timing::PipelineTimings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionKind {
    /// Copied unchanged (tables, header-only HDUs, empty images)
    PassThrough,
    /// Corrected and averaged over its samples
    Image,
}

/// What happened to one input extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionReport {
    /// Position of the extension in the input container
    pub index: usize,
    pub kind: ExtensionKind,
    /// Samples found in the interleaved readout (0 for pass-through)
    pub sample_count: usize,
    /// Width of the averaged output plane
    pub width: usize,
    /// Height of the averaged output plane
    pub height: usize,
    /// Raw pixels at or above the saturation threshold
    pub saturated_pixels: usize,
}

impl ExtensionReport {
    pub fn pass_through(index: usize) -> Self {
        Self {
            index,
            kind: ExtensionKind::PassThrough,
            sample_count: 0,
            width: 0,
            height: 0,
            saturated_pixels: 0,
        }
    }
}

/// Summary of a processing run
#[derive(Debug, Clone, Default)]
pub struct ProcessingReport {
    pub extensions: Vec<ExtensionReport>,
    pub timings: PipelineTimings,
    /// Per-sample container, when one was written
    pub sample_output: Option<PathBuf>,
}

impl ProcessingReport {
    pub fn image_extensions(&self) -> impl Iterator<Item = &ExtensionReport> {
        self.extensions.iter().filter(|e| e.kind == ExtensionKind::Image)
    }

    pub fn total_samples(&self) -> usize {
        self.extensions.iter().map(|e| e.sample_count).sum()
    }
}
