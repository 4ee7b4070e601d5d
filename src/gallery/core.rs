use super::cache::cache_name_for;
use super::classify::{Classified, classify};
use super::{Gallery, MediaFile, ScanError};
use crate::ClassifierConfig;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

impl Gallery {
    /// Scan the configured library root for gallery sources, sorted by filename.
    pub fn scan_sources(&self) -> Result<Vec<MediaFile>, ScanError> {
        scan_sources(
            &self.config.library.root,
            &self.config.library.cache_directory_name,
            &self.config.classifier,
            &self.config.video.suffix,
        )
    }
}

/// Walk `root` and collect every file accepted by the classifier.
///
/// Directories named `cache_dir_name` are pruned at any depth. The result is sorted by
/// filename, which is chronological for the `YYYYMMDD` grammar. When the same filename
/// occurs in several directories, or two sources map to one thumbnail name, the first
/// one in walk order wins.
pub fn scan_sources(
    root: &Path,
    cache_dir_name: &str,
    rules: &ClassifierConfig,
    video_suffix: &str,
) -> Result<Vec<MediaFile>, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::RootMissing(root.to_path_buf()));
    }
    std::fs::read_dir(root).map_err(|source| ScanError::RootUnreadable {
        path: root.to_path_buf(),
        source,
    })?;

    debug!("Scanning library root: {:?}", root);

    let mut sources: HashMap<String, MediaFile> = HashMap::new();
    // Thumbnail name -> source name that claimed it
    let mut issued: HashMap<String, String> = HashMap::new();

    let walker = WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !(entry.file_type().is_dir() && entry.file_name() == cache_dir_name));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry under {:?}: {}", root, e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let Some(name) = entry.file_name().to_str() else {
            debug!("Skipping non UTF-8 filename: {:?}", entry.path());
            continue;
        };
        if name.starts_with('.') {
            continue;
        }

        let Some(classified) = classify(name, rules) else {
            continue;
        };

        if let Some(existing) = sources.get(name) {
            debug!(
                "Duplicate filename {:?}, keeping {:?}",
                entry.path(),
                existing.source_path
            );
            continue;
        }

        let file = media_file(name, classified, entry.path(), video_suffix);
        if let Some(owner) = issued.get(&file.cache_name) {
            warn!(
                "{:?} would share thumbnail {} with {}, skipping",
                entry.path(),
                file.cache_name,
                owner
            );
            continue;
        }

        issued.insert(file.cache_name.clone(), file.name.clone());
        sources.insert(file.name.clone(), file);
    }

    let mut sources: Vec<MediaFile> = sources.into_values().collect();
    sources.sort_by(|a, b| a.name.cmp(&b.name));

    info!("Found {} gallery sources under {:?}", sources.len(), root);
    Ok(sources)
}

fn media_file(name: &str, classified: Classified, path: &Path, video_suffix: &str) -> MediaFile {
    let source_path = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());

    MediaFile {
        name: name.to_string(),
        year: classified.year,
        month: classified.month,
        day: classified.day,
        kind: classified.kind,
        source_path,
        cache_name: cache_name_for(name, classified.kind, video_suffix),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::MediaKind;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, b"").unwrap();
    }

    fn names(files: &[MediaFile]) -> Vec<&str> {
        files.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_scan_sorts_across_directories() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(&root.join("24/2401/20240101c.jpg"));
        touch(&root.join("23/2302/20230220b.jpg"));
        touch(&root.join("23/2301/20230115a.jpg"));
        touch(&root.join("notes.txt"));

        let files = scan_sources(root, "Thumbnails", &ClassifierConfig::default(), "_video")
            .unwrap();

        assert_eq!(
            names(&files),
            vec!["20230115a.jpg", "20230220b.jpg", "20240101c.jpg"]
        );
        assert!(files.iter().all(|f| f.source_path.is_absolute()));
        assert!(files[0].source_path.ends_with("23/2301/20230115a.jpg"));
    }

    #[test]
    fn test_scan_skips_cache_directory_at_any_depth() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(&root.join("20230115a.jpg"));
        touch(&root.join("Thumbnails/20230116b.jpg"));
        touch(&root.join("23/Thumbnails/20230117c.jpg"));
        touch(&root.join("23/Thumbnails.jpg/20230118d.jpg"));

        let files = scan_sources(root, "Thumbnails", &ClassifierConfig::default(), "_video")
            .unwrap();

        assert_eq!(names(&files), vec!["20230115a.jpg", "20230118d.jpg"]);
    }

    #[test]
    fn test_scan_classifies_videos() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(&root.join("20230115_120000.mp4"));
        touch(&root.join(".20230115_hidden.jpg"));

        let files = scan_sources(root, "Thumbnails", &ClassifierConfig::default(), "_video")
            .unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].kind, MediaKind::Video);
        assert_eq!(files[0].cache_name, "20230115_120000_video.jpg");
    }

    #[test]
    fn test_scan_keeps_first_duplicate() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(&root.join("a/20230115a.jpg"));
        touch(&root.join("b/20230115a.jpg"));

        let files = scan_sources(root, "Thumbnails", &ClassifierConfig::default(), "_video")
            .unwrap();

        assert_eq!(files.len(), 1);
        assert!(files[0].source_path.ends_with("a/20230115a.jpg"));
    }

    #[test]
    fn test_scan_skips_thumbnail_name_collision() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(&root.join("20230115a.mp4"));
        touch(&root.join("20230115a_video.jpg"));

        let files = scan_sources(root, "Thumbnails", &ClassifierConfig::default(), "_video")
            .unwrap();

        assert_eq!(names(&files), vec!["20230115a.mp4"]);
        assert_eq!(files[0].kind, MediaKind::Video);
        assert_eq!(files[0].cache_name, "20230115a_video.jpg");
    }

    #[test]
    fn test_scan_missing_root_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let result = scan_sources(
            &temp_dir.path().join("missing"),
            "Thumbnails",
            &ClassifierConfig::default(),
            "_video",
        );
        assert!(matches!(result, Err(ScanError::RootMissing(_))));
    }
}
