use std::path::PathBuf;
use thiserror::Error;

/// The main error type for aeroprep operations.
#[derive(Debug, Error)]
pub enum AeroprepError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to read source directory {dir}: {source}")]
    SourceDirRead {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no label files (*.txt) found in {dir}")]
    NoLabelFiles { dir: PathBuf },

    #[error("no images found in {dir}")]
    NoImages { dir: PathBuf },

    #[error("no image with parsable labels found in {dir} after {attempts} attempt(s)")]
    NoAnnotatedSample { dir: PathBuf, attempts: usize },

    #[error("failed to read image {path}: {source}")]
    ImageRead {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to write annotated image {path}: {source}")]
    ImageWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("split ratio must be strictly between 0.0 and 1.0, got {0}")]
    InvalidRatio(f64),

    #[error("failed to serialize report: {0}")]
    ReportJson(#[from] serde_json::Error),
}
