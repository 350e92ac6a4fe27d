use std::time::Duration;

/// Wall-clock time spent on one input extension.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtensionTiming {
    pub index: usize,
    /// Corrected samples, 0 for a pass-through copy
    pub samples: usize,
    pub duration: Duration,
}

impl ExtensionTiming {
    /// Mean time per corrected sample, `None` for pass-through copies.
    pub fn per_sample(&self) -> Option<Duration> {
        u32::try_from(self.samples)
            .ok()
            .filter(|&n| n > 0)
            .map(|n| self.duration / n)
    }
}

/// Per-extension timings of one processing run, in input order.
#[derive(Debug, Clone, Default)]
pub struct PipelineTimings {
    extensions: Vec<ExtensionTiming>,
}

impl PipelineTimings {
    pub fn record(&mut self, index: usize, samples: usize, duration: Duration) {
        self.extensions.push(ExtensionTiming {
            index,
            samples,
            duration,
        });
    }

    pub fn extensions(&self) -> &[ExtensionTiming] {
        &self.extensions
    }

    pub fn total_duration(&self) -> Duration {
        self.extensions.iter().map(|e| e.duration).sum()
    }

    pub fn total_samples(&self) -> usize {
        self.extensions.iter().map(|e| e.samples).sum()
    }

    pub fn print_summary(&self) {
        let total = self.total_duration();
        println!("\nExtension Timing Summary:");
        println!("{:-<64}", "");
        for ext in &self.extensions {
            let label = match ext.samples {
                0 => format!("ext {} (copied)", ext.index),
                n => format!("ext {} ({} samples)", ext.index, n),
            };
            let percentage = if total.is_zero() {
                0.0
            } else {
                ext.duration.as_secs_f64() / total.as_secs_f64() * 100.0
            };
            match ext.per_sample() {
                Some(each) => println!(
                    "{:<24} {:>10.3}ms ({:>5.1}%) {:>9.3}ms/sample",
                    label,
                    ext.duration.as_secs_f64() * 1000.0,
                    percentage,
                    each.as_secs_f64() * 1000.0
                ),
                None => println!(
                    "{:<24} {:>10.3}ms ({:>5.1}%)",
                    label,
                    ext.duration.as_secs_f64() * 1000.0,
                    percentage
                ),
            }
        }
        println!("{:-<64}", "");
        println!(
            "{:<24} {:>10.3}ms  {} samples",
            "Total",
            total.as_secs_f64() * 1000.0,
            self.total_samples()
        );
    }
}
