//! Skipper CCD processing pipeline
//!
//! Raw Skipper readouts interleave several non-destructive samples of
//! every pixel. This module splits them apart, subtracts the overscan
//! baseline of each row half, and averages the corrected samples.

pub mod common;
pub mod plane;
pub mod overscan;
pub mod samples;
pub mod fits;
pub mod conversions;

pub use common::{
    PipelineTimings,
    ProcessingConfig,
    ProcessingConfigBuilder,
    Result,
    SkipperError,
};

pub use plane::{
    BitPix,
    ImagePlane,
    RawExtension,
    RawSampleView,
};

pub use overscan::{
    BaselineEstimator,
    OverscanLayout,
    RowBaseline,
    SaturationPolicy,
    correct_row,
    trimmed_mean,
};

pub use samples::{
    SampleAccumulator,
    extract_sample,
};

pub use fits::{
    ContainerReader,
    ContainerWriter,
    FitsReader,
    FitsWriter,
};

pub use conversions::{
    ExtensionKind,
    ExtensionReport,
    ProcessingReport,
    SkipperPipeline,
};
