use super::{Gallery, MediaKind};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, warn};

/// Extension of every video thumbnail.
pub const VIDEO_THUMBNAIL_EXTENSION: &str = "jpg";

/// Thumbnails being written are named `.{random}.part` until renamed into place.
pub(crate) const PARTIAL_PREFIX: &str = ".";
pub(crate) const PARTIAL_SUFFIX: &str = ".part";

impl Gallery {
    /// Names of the thumbnails currently in the cache directory.
    pub fn cached_thumbnails(&self) -> std::io::Result<HashSet<String>> {
        list_cached(&self.cache_directory())
    }
}

/// List the cache directory. A missing directory is an empty cache.
///
/// Dotfiles are in-flight temporary files and never count as entries.
pub fn list_cached(cache_dir: &Path) -> std::io::Result<HashSet<String>> {
    let entries = match std::fs::read_dir(cache_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("Cache directory {:?} not found, starting empty", cache_dir);
            return Ok(HashSet::new());
        }
        Err(e) => return Err(e),
    };

    let mut cached = HashSet::new();
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str()
            && !name.starts_with('.')
        {
            cached.insert(name.to_string());
        }
    }

    debug!("Found {} cached thumbnails in {:?}", cached.len(), cache_dir);
    Ok(cached)
}

/// Create the cache directory, or clear out temporaries an interrupted run left behind.
pub fn ensure_cache_dir(cache_dir: &Path) -> std::io::Result<()> {
    if !cache_dir.exists() {
        info!("Creating cache directory: {:?}", cache_dir);
        std::fs::create_dir_all(cache_dir)?;
        return Ok(());
    }

    let removed = remove_partial_files(cache_dir)?;
    if removed > 0 {
        info!("Removed {} unfinished thumbnails from {:?}", removed, cache_dir);
    }
    Ok(())
}

fn is_partial_file(name: &str) -> bool {
    name.starts_with(PARTIAL_PREFIX) && name.ends_with(PARTIAL_SUFFIX)
}

fn remove_partial_files(cache_dir: &Path) -> std::io::Result<usize> {
    let mut removed = 0;
    for entry in std::fs::read_dir(cache_dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if entry.file_name().to_str().is_some_and(is_partial_file) {
            match std::fs::remove_file(entry.path()) {
                Ok(()) => removed += 1,
                Err(e) => warn!("Failed to remove {:?}: {}", entry.path(), e),
            }
        }
    }
    Ok(removed)
}

/// Thumbnail name for a source: the source name itself for images,
/// `{stem}{suffix}.jpg` for videos.
pub fn cache_name_for(source_name: &str, kind: MediaKind, video_suffix: &str) -> String {
    match kind {
        MediaKind::Image => source_name.to_string(),
        MediaKind::Video => format!(
            "{}{}.{}",
            file_stem(source_name),
            video_suffix,
            VIDEO_THUMBNAIL_EXTENSION
        ),
    }
}

/// Inverse of [`cache_name_for`], assuming videos use `video_extension`.
pub fn source_name_for(cache_name: &str, video_suffix: &str, video_extension: &str) -> String {
    let video_tail = format!("{}.{}", video_suffix, VIDEO_THUMBNAIL_EXTENSION);
    match cache_name.strip_suffix(&video_tail) {
        Some(stem) if !stem.is_empty() => format!("{}.{}", stem, video_extension),
        _ => cache_name.to_string(),
    }
}

fn file_stem(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) if idx > 0 => &name[..idx],
        _ => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_cache_name_for_image_is_identity() {
        assert_eq!(
            cache_name_for("20230115a.jpg", MediaKind::Image, "_video"),
            "20230115a.jpg"
        );
    }

    #[test]
    fn test_video_name_round_trip() {
        let cache_name = cache_name_for("20230115_120000.mp4", MediaKind::Video, "_video");
        assert_eq!(cache_name, "20230115_120000_video.jpg");
        assert_eq!(
            source_name_for(&cache_name, "_video", "mp4"),
            "20230115_120000.mp4"
        );
    }

    #[test]
    fn test_source_name_for_image_is_identity() {
        assert_eq!(
            source_name_for("20230115a.jpg", "_video", "mp4"),
            "20230115a.jpg"
        );
        assert_eq!(source_name_for("_video.jpg", "_video", "mp4"), "_video.jpg");
    }

    #[test]
    fn test_list_cached_missing_dir_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let cached = list_cached(&temp_dir.path().join("Thumbnails")).unwrap();
        assert!(cached.is_empty());
    }

    #[test]
    fn test_ensure_cache_dir_removes_unfinished_thumbnails() {
        let temp_dir = TempDir::new().unwrap();
        let cache_dir = temp_dir.path().join("Thumbnails");
        ensure_cache_dir(&cache_dir).unwrap();
        std::fs::write(cache_dir.join("20230115a.jpg"), b"x").unwrap();
        std::fs::write(cache_dir.join(".tmpAbC123.part"), b"x").unwrap();
        std::fs::write(cache_dir.join(".DS_Store"), b"x").unwrap();

        ensure_cache_dir(&cache_dir).unwrap();

        assert!(!cache_dir.join(".tmpAbC123.part").exists());
        assert!(cache_dir.join(".DS_Store").exists());
        assert!(cache_dir.join("20230115a.jpg").exists());
    }

    #[test]
    fn test_list_cached_ignores_temporaries_and_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let cache_dir = temp_dir.path().join("Thumbnails");
        ensure_cache_dir(&cache_dir).unwrap();
        std::fs::write(cache_dir.join("20230115a.jpg"), b"x").unwrap();
        std::fs::write(cache_dir.join(".tmpAbC123"), b"x").unwrap();
        std::fs::create_dir(cache_dir.join("nested")).unwrap();

        let cached = list_cached(&cache_dir).unwrap();
        assert_eq!(cached.len(), 1);
        assert!(cached.contains("20230115a.jpg"));
    }
}
