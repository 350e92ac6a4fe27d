use tracing::{debug, info, instrument, warn};
use std::path::Path;
use std::time::Instant;

use crate::image_pipeline::{
    common::{
        config::ProcessingConfig,
        error::{Result, SkipperError},
    },
    conversions::types::{ExtensionKind, ExtensionReport, ProcessingReport},
    fits::{ContainerReader, ContainerWriter, FitsReader, FitsWriter},
    overscan::{correct_plane, count_saturated},
    plane::RawExtension,
    samples::{SampleAccumulator, extract_sample},
};

/// Extension-by-extension Skipper correction.
///
/// Non-image extensions are copied unchanged to every output. Image
/// extensions are split into their samples, each sample gets its
/// overscan baseline subtracted row by row, and the mean of the
/// corrected samples is written in place of the raw extension.
pub struct SkipperPipeline<R: ContainerReader, W: ContainerWriter<Source = R::Container>> {
    reader: R,
    writer: W,
    config: ProcessingConfig,
}

impl SkipperPipeline<FitsReader, FitsWriter> {
    pub fn new(config: ProcessingConfig) -> Self {
        Self {
            reader: FitsReader,
            writer: FitsWriter,
            config,
        }
    }
}

fn remove_existing(path: &Path) -> Result<()> {
    if path.exists() {
        warn!(path = %path.display(), "Output file exists, will overwrite");
        std::fs::remove_file(path)?;
    }
    Ok(())
}

impl<R: ContainerReader, W: ContainerWriter<Source = R::Container>> SkipperPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: ProcessingConfig) -> Self {
        Self {
            reader,
            writer,
            config,
        }
    }

    /// Processes `input_path` into `output_path`, plus the per-sample
    /// container next to it when `save_samples` is set.
    ///
    /// Existing output files are deleted first. A failure aborts the run
    /// and leaves whatever was already written on disk.
    #[instrument(skip(self, input_path, output_path))]
    pub fn process_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<ProcessingReport> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        if !input_path.exists() {
            return Err(SkipperError::InputNotFound(input_path.to_path_buf()));
        }

        let samples_path = self
            .config
            .save_samples
            .then(|| self.config.samples_path(output_path));

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            "Processing file"
        );

        remove_existing(output_path)?;
        if let Some(path) = &samples_path {
            remove_existing(path)?;
        }

        let mut input = {
            let _span = tracing::info_span!("open_input").entered();
            self.reader.open_for_read(input_path)?
        };

        let mut samples_out = match &samples_path {
            Some(path) => {
                let _span = tracing::info_span!("create_samples_output").entered();
                Some(self.writer.create_container(path)?)
            }
            None => None,
        };
        let mut mean_out = {
            let _span = tracing::info_span!("create_output").entered();
            self.writer.create_container(output_path)?
        };

        let mut report = self.process(&mut input, &mut mean_out, samples_out.as_mut())?;

        self.writer.finish(mean_out)?;
        if let Some(out) = samples_out {
            self.writer.finish(out)?;
        }
        report.sample_output = samples_path;

        info!(
            extensions = report.extensions.len(),
            samples = report.total_samples(),
            elapsed_ms = report.timings.total_duration().as_secs_f64() * 1000.0,
            "Processing complete"
        );
        Ok(report)
    }

    /// Runs every extension of an open input through the pipeline, in
    /// stored order.
    pub fn process(
        &self,
        input: &mut R::Container,
        mean_out: &mut W::Container,
        mut samples_out: Option<&mut W::Container>,
    ) -> Result<ProcessingReport> {
        let plane_count = self.reader.plane_count(input);
        let mut report = ProcessingReport::default();

        for index in 0..plane_count {
            let _span = tracing::info_span!("extension", index).entered();
            let started = Instant::now();

            let extension = if self.reader.is_image_plane(input, index)? {
                self.process_image_plane(input, index, plane_count, mean_out, samples_out.as_deref_mut())?
            } else {
                debug!(index, "Copying non-image extension");
                self.writer.copy_plane_verbatim(input, index, mean_out)?;
                if let Some(out) = samples_out.as_deref_mut() {
                    self.writer.copy_plane_verbatim(input, index, out)?;
                }
                ExtensionReport::pass_through(index)
            };

            report.timings.record(index, extension.sample_count, started.elapsed());
            report.extensions.push(extension);
        }

        Ok(report)
    }

    fn process_image_plane(
        &self,
        input: &mut R::Container,
        index: usize,
        plane_count: usize,
        mean_out: &mut W::Container,
        mut samples_out: Option<&mut W::Container>,
    ) -> Result<ExtensionReport> {
        let layout = &self.config.layout;

        let raw_plane = self.reader.read_plane(input, index)?;
        let saturated_pixels = count_saturated(&raw_plane, &self.config.saturation);
        if saturated_pixels > 0 {
            warn!(index, saturated_pixels, "Extension has saturated pixels");
        }

        let raw = RawExtension::new(raw_plane, layout.image_cols())?;
        let sample_count = raw.sample_count();
        let (width, height) = (raw.nominal_width(), raw.height());
        debug!(index, sample_count, width, height, "Correcting image extension");

        let mut accumulator = SampleAccumulator::new(width, height)?;
        for sample_index in 0..sample_count {
            let _span = tracing::debug_span!("sample", sample_index).entered();

            let mut sample = extract_sample(&raw, sample_index)?;
            correct_plane(&mut sample, layout, self.config.estimator)?;
            accumulator.accumulate(&sample)?;

            if let Some(out) = samples_out.as_deref_mut() {
                let name = format!("SAMPLE_{}_{}", index, sample_index);
                self.writer.write_image_plane(out, &name, &sample)?;
            }
            self.report_progress(index, plane_count, sample_index, sample_count);
        }
        drop(raw);

        let mean = accumulator.finalize(sample_count)?;
        let name = format!("MEAN_{}", index);
        if let Some(out) = samples_out {
            self.writer.write_image_plane(out, &name, &mean)?;
        }
        self.writer.write_image_plane(mean_out, &name, &mean)?;

        Ok(ExtensionReport {
            index,
            kind: ExtensionKind::Image,
            sample_count,
            width,
            height,
            saturated_pixels,
        })
    }

    fn report_progress(&self, index: usize, plane_count: usize, sample_index: usize, sample_count: usize) {
        let done = index * sample_count + sample_index + 1;
        let total = plane_count * sample_count;
        let percent = (done as f64 / total as f64 * 100.0) as u32;
        if self.config.verbose {
            info!(extension = index, sample = sample_index, done, total, percent, "Sample corrected");
        } else {
            debug!(extension = index, sample = sample_index, done, total, percent, "Sample corrected");
        }
    }

    pub fn config(&self) -> &ProcessingConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ProcessingConfig) {
        self.config = config;
    }
}
