use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, VisError>;

/// Every failure mode of a run. All of these are fatal: the pipeline never
/// retries, it surfaces the error and the process exits non-zero.
#[derive(Debug, Error)]
pub enum VisError {
    #[error("failed to read audio file {}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("audio decode failed: {0}")]
    Decode(String),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("transform size {0} is not a power of two")]
    InvalidSize(usize),

    #[error("render sink failure")]
    RenderSink(#[from] io::Error),
}

impl From<symphonia::core::errors::Error> for VisError {
    fn from(err: symphonia::core::errors::Error) -> Self {
        VisError::Decode(err.to_string())
    }
}
