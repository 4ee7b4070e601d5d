// Gallery module - Main entry point
pub mod cache;
pub mod classify;
mod core;
mod error;
pub mod image_processing;
pub mod index;
pub mod reconcile;
mod types;

// Re-export public items
pub use cache::{ensure_cache_dir, list_cached};
pub use self::core::scan_sources;
pub use error::{GalleryError, GenerationError, ScanError};
pub use image_processing::ThumbnailGenerator;
pub use index::{GalleryIndex, group_by_date, month_name};
pub use reconcile::Reconciler;
pub use types::*;

use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Result of one scan, reconcile and index pass.
#[derive(Debug, Clone)]
pub struct SyncOutcome {
    pub index: GalleryIndex,
    pub report: ReconcileReport,
}

pub struct Gallery {
    pub(crate) config: crate::Config,
    pub(crate) generator: Arc<ThumbnailGenerator>,
}

impl Gallery {
    pub fn new(config: crate::Config) -> Self {
        let generator = Arc::new(ThumbnailGenerator::new(&config));
        Self { config, generator }
    }

    pub fn with_generator(config: crate::Config, generator: ThumbnailGenerator) -> Self {
        Self {
            config,
            generator: Arc::new(generator),
        }
    }

    pub fn config(&self) -> &crate::Config {
        &self.config
    }

    pub fn cache_directory(&self) -> PathBuf {
        self.config.cache_directory()
    }

    /// Scan the tree, generate missing thumbnails and build the date index.
    ///
    /// Only a scan failure aborts. Per-file generation failures are counted in the
    /// report and the file is left out of the index.
    pub async fn sync(&self, cancel: &CancellationToken) -> Result<SyncOutcome, GalleryError> {
        info!("Syncing gallery at {:?}", self.config.library.root);

        let sources = self.scan_sources()?;

        let cache_dir = self.cache_directory();
        ensure_cache_dir(&cache_dir)?;
        let mut cached = list_cached(&cache_dir)?;

        let reconciler = Reconciler::new(
            self.generator.clone(),
            self.config.reconcile.worker_count(),
        );
        let report = reconciler.reconcile(&sources, &mut cached, cancel).await;

        // Re-read from disk; the directory is the source of truth
        let cached = list_cached(&cache_dir)?;
        let index = GalleryIndex::new(
            sources,
            &cached,
            &self.config.video.suffix,
            self.primary_video_extension(),
        );

        info!(
            "Gallery ready: {} entries, {} generated, {} failed",
            index.len(),
            report.generated,
            report.failed
        );

        Ok(SyncOutcome { index, report })
    }

    /// Index of what is already cached, without generating anything.
    pub fn cached_index(&self) -> Result<GalleryIndex, GalleryError> {
        let sources = self.scan_sources()?;
        let cached = self.cached_thumbnails()?;
        Ok(GalleryIndex::new(
            sources,
            &cached,
            &self.config.video.suffix,
            self.primary_video_extension(),
        ))
    }

    fn primary_video_extension(&self) -> &str {
        self.config
            .classifier
            .video_extensions
            .first()
            .map(String::as_str)
            .unwrap_or("mp4")
    }
}
