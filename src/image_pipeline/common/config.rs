//! Processing configuration types

use std::path::{Path, PathBuf};

use crate::image_pipeline::overscan::{BaselineEstimator, OverscanLayout, SaturationPolicy};

/// Prefix added to the output file name for the per-sample container.
pub const DEFAULT_SAMPLE_PREFIX: &str = "samples_";

/// Configuration for one Skipper processing run
#[derive(Debug, Clone)]
pub struct ProcessingConfig {
    /// Readout row geometry, fixed for a given detector
    pub layout: OverscanLayout,
    /// Baseline estimator applied to each overscan window
    pub estimator: BaselineEstimator,
    /// Also write every corrected sample to a second container
    pub save_samples: bool,
    /// Emit per-sample progress events at info level
    pub verbose: bool,
    /// Prefix for the per-sample container's file name
    pub sample_prefix: String,
    /// Thresholds for the advisory saturation warning
    pub saturation: SaturationPolicy,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            layout: OverscanLayout::SKIPPER,
            estimator: BaselineEstimator::TrimmedMean,
            save_samples: false,
            verbose: true,
            sample_prefix: DEFAULT_SAMPLE_PREFIX.to_string(),
            saturation: SaturationPolicy::default(),
        }
    }
}

impl ProcessingConfig {
    pub fn builder() -> ProcessingConfigBuilder {
        ProcessingConfigBuilder::default()
    }

    /// Path of the per-sample container: the output's file name with
    /// `sample_prefix` in front, in the same directory.
    pub fn samples_path(&self, output: &Path) -> PathBuf {
        match output.file_name() {
            Some(name) => {
                let mut prefixed = self.sample_prefix.clone();
                prefixed.push_str(&name.to_string_lossy());
                output.with_file_name(prefixed)
            }
            None => PathBuf::from(format!("{}{}", self.sample_prefix, output.display())),
        }
    }
}

/// Builder for ProcessingConfig
#[derive(Default)]
pub struct ProcessingConfigBuilder {
    layout: Option<OverscanLayout>,
    estimator: Option<BaselineEstimator>,
    save_samples: Option<bool>,
    verbose: Option<bool>,
    sample_prefix: Option<String>,
    saturation: Option<SaturationPolicy>,
}

impl ProcessingConfigBuilder {
    pub fn layout(mut self, layout: OverscanLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    pub fn estimator(mut self, estimator: BaselineEstimator) -> Self {
        self.estimator = Some(estimator);
        self
    }

    pub fn save_samples(mut self, enable: bool) -> Self {
        self.save_samples = Some(enable);
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = Some(verbose);
        self
    }

    pub fn sample_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.sample_prefix = Some(prefix.into());
        self
    }

    pub fn saturation(mut self, policy: SaturationPolicy) -> Self {
        self.saturation = Some(policy);
        self
    }

    pub fn build(self) -> ProcessingConfig {
        let default = ProcessingConfig::default();
        ProcessingConfig {
            layout: self.layout.unwrap_or(default.layout),
            estimator: self.estimator.unwrap_or(default.estimator),
            save_samples: self.save_samples.unwrap_or(default.save_samples),
            verbose: self.verbose.unwrap_or(default.verbose),
            sample_prefix: self.sample_prefix.unwrap_or(default.sample_prefix),
            saturation: self.saturation.unwrap_or(default.saturation),
        }
    }
}
