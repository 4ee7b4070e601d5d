use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

/// A source file whose name passed the classifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaFile {
    /// Filename, unique within the source tree.
    pub name: String,
    pub year: u16,
    pub month: u8,
    /// Display only.
    pub day: u8,
    pub kind: MediaKind,
    pub source_path: PathBuf,
    /// Name of this file's thumbnail in the cache directory.
    pub cache_name: String,
}

/// All files of one (year, month), in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateBucket {
    pub year: u16,
    pub month: u8,
    pub files: Vec<MediaFile>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearGroup {
    pub year: u16,
    pub months: Vec<DateBucket>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    #[default]
    Ascending,
    /// Most recent first.
    Descending,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    pub generated: usize,
    pub failed: usize,
    pub already_cached: usize,
    pub cancelled: bool,
}

impl MediaFile {
    pub fn is_video(&self) -> bool {
        self.kind == MediaKind::Video
    }
}

impl DateBucket {
    pub fn month_name(&self) -> Option<&'static str> {
        super::index::month_name(self.month)
    }
}
