//! Per-sample extraction and mean accumulation

mod demux;
mod accumulator;

pub use demux::extract_sample;
pub use accumulator::SampleAccumulator;
