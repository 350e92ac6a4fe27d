//! Common utilities module
//!
//! Error type, processing configuration and timing helpers shared by the
//! pipeline stages.

pub mod error;
pub mod config;
pub mod timing;

pub use error::{Result, SkipperError};
pub use config::{ProcessingConfig, ProcessingConfigBuilder};
pub use timing::{ExtensionTiming, PipelineTimings};
