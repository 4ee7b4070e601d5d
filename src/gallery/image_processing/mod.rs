// Image processing module - turns one source file into one cache entry
pub mod badge;
pub mod formats;
pub mod orientation;
mod resize;
mod types;
pub mod video;

pub use orientation::Rotation;
pub use resize::fit_square;
pub use types::{OutputFormat, ThumbnailSettings};

use super::{GenerationError, MediaFile, MediaKind};
use crate::{Config, VideoConfig};
use image::{DynamicImage, RgbaImage};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Produces missing thumbnails. Holds no per-file state between calls.
#[derive(Clone)]
pub struct ThumbnailGenerator {
    cache_dir: PathBuf,
    settings: ThumbnailSettings,
    video: VideoConfig,
    badge: Option<Arc<RgbaImage>>,
}

impl ThumbnailGenerator {
    /// Build a generator for `config`, loading the video badge once.
    pub fn new(config: &Config) -> Self {
        let badge_path = &config.thumbnail.badge;
        let badge = match badge::load_badge(badge_path, config.thumbnail.badge_size) {
            Ok(badge) => Some(badge),
            Err(e) => {
                warn!(
                    "Video badge {:?} unavailable ({}), video thumbnails will have no badge",
                    badge_path, e
                );
                None
            }
        };

        Self::with_badge(config, badge)
    }

    pub fn with_badge(config: &Config, badge: Option<RgbaImage>) -> Self {
        Self {
            cache_dir: config.cache_directory(),
            settings: ThumbnailSettings::from(&config.thumbnail),
            video: config.video.clone(),
            badge: badge.map(Arc::new),
        }
    }

    /// Write the thumbnail for `file` into the cache directory and return its cache name.
    pub async fn generate(&self, file: &MediaFile) -> Result<String, GenerationError> {
        debug!("Generating thumbnail for {:?}", file.source_path);

        match file.kind {
            MediaKind::Image => self.generate_image(file).await?,
            MediaKind::Video => self.generate_video(file).await?,
        }

        Ok(file.cache_name.clone())
    }

    async fn generate_image(&self, file: &MediaFile) -> Result<(), GenerationError> {
        let source = file.source_path.clone();
        let cache_dir = self.cache_dir.clone();
        let cache_name = file.cache_name.clone();
        let settings = self.settings;

        tokio::task::spawn_blocking(move || -> Result<(), GenerationError> {
            let decoded = image::open(&source)?;
            let rotation = Rotation::from_orientation(orientation::read_orientation(&source));
            let thumbnail = fit_square(&rotation.apply(decoded), settings.size);
            formats::save_atomic(&thumbnail, &cache_dir, &cache_name, settings.jpeg_quality)?;
            Ok(())
        })
        .await?
    }

    async fn generate_video(&self, file: &MediaFile) -> Result<(), GenerationError> {
        let frame_dir = tempfile::TempDir::new()?;
        let frame = video::extract_frame(
            &self.video.ffmpeg,
            &file.source_path,
            &frame_dir.path().join("frame.jpg"),
            Duration::from_secs(self.video.timeout_secs),
        )
        .await?;

        let cache_dir = self.cache_dir.clone();
        let cache_name = file.cache_name.clone();
        let settings = self.settings;
        let badge = self.badge.clone();

        tokio::task::spawn_blocking(move || -> Result<(), GenerationError> {
            let decoded = image::open(&frame)?;
            let thumbnail = video_thumbnail(&decoded, settings, badge.as_deref());
            formats::save_atomic(&thumbnail, &cache_dir, &cache_name, settings.jpeg_quality)?;
            drop(frame_dir);
            Ok(())
        })
        .await?
    }
}

fn video_thumbnail(
    frame: &DynamicImage,
    settings: ThumbnailSettings,
    badge: Option<&RgbaImage>,
) -> DynamicImage {
    let thumbnail = fit_square(frame, settings.size);
    match badge {
        Some(badge) => badge::apply_badge(&thumbnail, badge, settings.badge_margin),
        None => thumbnail,
    }
}
