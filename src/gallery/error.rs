use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config error: {0}")]
    ConfigError(#[from] toml_edit::de::Error),

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("Not found")]
    NotFound,
}

/// Failure to read the source tree. Fatal for the run.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Library root does not exist: {0}")]
    RootMissing(PathBuf),

    #[error("Library root is not readable: {path}: {source}")]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure to produce one thumbnail. The file stays missing and is retried on the next run.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Image error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Frame extraction failed ({status}): {stderr}")]
    FrameExtraction { status: String, stderr: String },

    #[error("Frame extraction timed out after {0}s")]
    Timeout(u64),

    #[error("Failed to persist thumbnail: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("Generation task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
