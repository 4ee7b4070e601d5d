use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Jpeg,
    Png,
}

impl OutputFormat {
    /// Encoding for a cache entry, chosen by the extension of its name.
    ///
    /// Image thumbnails keep the source filename, so a `.png` source stays PNG on disk.
    /// Everything else is written as JPEG.
    pub fn for_cache_name(cache_name: &str) -> Self {
        match Path::new(cache_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("png") => OutputFormat::Png,
            _ => OutputFormat::Jpeg,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ThumbnailSettings {
    pub size: u32,
    pub jpeg_quality: u8,
    pub badge_margin: u32,
}

impl From<&crate::ThumbnailConfig> for ThumbnailSettings {
    fn from(config: &crate::ThumbnailConfig) -> Self {
        Self {
            size: config.size,
            jpeg_quality: config.jpeg_quality.unwrap_or(85),
            badge_margin: config.badge_margin,
        }
    }
}
