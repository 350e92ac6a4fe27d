//! Container I/O
//!
//! Format-agnostic reader/writer traits used by the pipeline, and their
//! FITS implementation on top of cfitsio.

mod reader;
mod writer;
mod fits_reader;
mod fits_writer;

pub use reader::ContainerReader;
pub use writer::ContainerWriter;
pub use fits_reader::{FitsInput, FitsReader};
pub use fits_writer::{FitsOutput, FitsWriter};
