use crate::Config;
use std::path::PathBuf;
use std::process::Stdio;
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Debug, Error)]
pub enum StartupCheckError {
    #[error("Failed to create cache directory: {0}")]
    CacheDirectoryCreationFailed(#[from] std::io::Error),

    #[error("Library root does not exist or is not readable: {0}")]
    LibraryRootMissing(PathBuf),

    #[error("Video badge missing: {0}")]
    BadgeMissing(PathBuf),

    #[error("Frame extractor not runnable: {0}")]
    FrameExtractorUnavailable(PathBuf),
}

impl StartupCheckError {
    /// Critical failures stop the run; the rest only degrade video thumbnails.
    pub fn is_critical(&self) -> bool {
        matches!(
            self,
            StartupCheckError::LibraryRootMissing(_)
                | StartupCheckError::CacheDirectoryCreationFailed(_)
        )
    }
}

pub async fn perform_startup_checks(config: &Config) -> Result<(), Vec<StartupCheckError>> {
    let mut errors = Vec::new();

    info!("Performing startup checks...");

    let root = &config.library.root;
    match tokio::fs::read_dir(root).await {
        Ok(_) => info!("Library root is accessible: {:?}", root),
        Err(e) => {
            error!("Library root {:?} is not accessible: {}", root, e);
            errors.push(StartupCheckError::LibraryRootMissing(root.clone()));
        }
    }

    // Only create the cache directory under a root that exists
    if errors.is_empty() {
        let cache_dir = config.cache_directory();
        if !cache_dir.exists() {
            info!("Cache directory does not exist, creating: {:?}", cache_dir);
            if let Err(e) = tokio::fs::create_dir_all(&cache_dir).await {
                error!("Failed to create cache directory {:?}: {}", cache_dir, e);
                errors.push(StartupCheckError::CacheDirectoryCreationFailed(e));
            }
        } else {
            info!("Cache directory exists: {:?}", cache_dir);
        }
    }

    let badge = &config.thumbnail.badge;
    if badge.exists() {
        info!("Video badge found: {:?}", badge);
    } else {
        warn!("Video badge missing: {:?}", badge);
        errors.push(StartupCheckError::BadgeMissing(badge.clone()));
    }

    let ffmpeg = &config.video.ffmpeg;
    let runnable = tokio::process::Command::new(ffmpeg)
        .arg("-version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .status()
        .await
        .map(|status| status.success())
        .unwrap_or(false);
    if runnable {
        info!("Frame extractor available: {:?}", ffmpeg);
    } else {
        warn!(
            "Frame extractor {:?} is not runnable, video thumbnails will fail",
            ffmpeg
        );
        errors.push(StartupCheckError::FrameExtractorUnavailable(ffmpeg.clone()));
    }

    if errors.is_empty() {
        info!("All startup checks passed");
        Ok(())
    } else {
        error!("Startup checks failed with {} errors", errors.len());
        Err(errors)
    }
}
