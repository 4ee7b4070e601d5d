use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub mod gallery;
pub mod startup_checks;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub library: LibraryConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub thumbnail: ThumbnailConfig,
    #[serde(default)]
    pub video: VideoConfig,
    #[serde(default)]
    pub reconcile: ReconcileConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LibraryConfig {
    /// Root of the photo tree.
    pub root: PathBuf,
    /// Reserved subdirectory of `root` holding the thumbnails. Never scanned for sources.
    #[serde(default = "default_cache_directory_name")]
    pub cache_directory_name: String,
}

/// Heuristic exclusion rules for source filenames.
///
/// These are not semantic checks. They exist to keep specific unwanted extensions
/// (`.3gp` for the third-from-last rule, any `*4` extension such as `.mp4` for the
/// trailing rule) out of the gallery.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClassifierConfig {
    #[serde(default)]
    pub reject_trailing_4: bool,
    #[serde(default = "default_true")]
    pub reject_third_from_last_3: bool,
    #[serde(default = "default_video_extensions")]
    pub video_extensions: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ThumbnailConfig {
    /// Edge length of the square thumbnails, in pixels.
    pub size: u32,
    pub jpeg_quality: Option<u8>,
    /// Icon composited onto video thumbnails.
    pub badge: PathBuf,
    pub badge_size: u32,
    /// Distance of the badge from the bottom and right edges.
    pub badge_margin: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct VideoConfig {
    pub ffmpeg: PathBuf,
    pub timeout_secs: u64,
    /// Appended to the video stem to form the thumbnail name (`{stem}{suffix}.jpg`).
    pub suffix: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ReconcileConfig {
    /// Parallel generations. `None` or `0` uses the available parallelism.
    pub workers: Option<usize>,
}

fn default_cache_directory_name() -> String {
    "Thumbnails".to_string()
}

fn default_true() -> bool {
    true
}

fn default_video_extensions() -> Vec<String> {
    vec!["mp4".to_string()]
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: "Gallery Time".to_string(),
        }
    }
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("photos"),
            cache_directory_name: default_cache_directory_name(),
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            reject_trailing_4: false,
            reject_third_from_last_3: true,
            video_extensions: default_video_extensions(),
        }
    }
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            size: 300,
            jpeg_quality: Some(85),
            badge: PathBuf::from("static/video_badge.png"),
            badge_size: 32,
            badge_margin: 20,
        }
    }
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            ffmpeg: PathBuf::from("ffmpeg"),
            timeout_secs: 30,
            suffix: "_video".to_string(),
        }
    }
}

impl Config {
    /// Load a TOML config file, falling back to defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self, gallery::GalleryError> {
        if !path.exists() {
            tracing::info!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        Ok(toml_edit::de::from_str::<Config>(&content)?)
    }

    pub fn cache_directory(&self) -> PathBuf {
        self.library.root.join(&self.library.cache_directory_name)
    }
}

impl ReconcileConfig {
    pub fn worker_count(&self) -> usize {
        match self.workers {
            Some(n) if n > 0 => n,
            _ => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
        }
    }
}
