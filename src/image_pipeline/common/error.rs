use std::path::PathBuf;

use thiserror::Error;

/// Exit status for aborts raised by the correction core itself.
pub const PROCESSING_EXIT_CODE: i32 = 3;

#[derive(Error, Debug)]
pub enum SkipperError {
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// A cfitsio call failed; `status` is the library's own status code.
    #[error("Container error (status {status}): {message}")]
    ContainerIo { status: i32, message: String },

    /// A container failure that carries no cfitsio status.
    #[error("Container error: {0}")]
    Container(String),

    #[error("Malformed extension: {0}")]
    MalformedExtension(String),

    #[error("Invalid overscan region: {0}")]
    InvalidRegion(String),

    #[error("Sample index {index} out of range for {sample_count} samples")]
    InvalidSampleIndex { index: usize, sample_count: usize },

    #[error("Expected {expected} accumulated samples, got {accumulated}")]
    SampleCountMismatch { expected: usize, accumulated: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<fitsio::errors::Error> for SkipperError {
    fn from(err: fitsio::errors::Error) -> Self {
        match err {
            fitsio::errors::Error::Fits(e) => Self::ContainerIo {
                status: e.status,
                message: e.message,
            },
            fitsio::errors::Error::Io(e) => Self::Io(e),
            other => Self::Container(other.to_string()),
        }
    }
}

impl SkipperError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InputNotFound(_) => 1,
            Self::ContainerIo { status, .. } => *status,
            Self::Container(_)
            | Self::Io(_)
            | Self::MalformedExtension(_)
            | Self::InvalidRegion(_)
            | Self::InvalidSampleIndex { .. }
            | Self::SampleCountMismatch { .. } => PROCESSING_EXIT_CODE,
        }
    }
}

pub type Result<T> = std::result::Result<T, SkipperError>;
