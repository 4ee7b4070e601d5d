use super::cache::source_name_for;
use super::{DateBucket, MediaFile, Order, YearGroup};
use chrono::Month;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Group pre-sorted files by year, then month, in one pass.
///
/// A new year group opens whenever the year changes and a new month bucket whenever
/// the month changes. Input order is preserved, so buckets come out in the order the
/// input visits them.
pub fn group_by_date<'a>(files: impl IntoIterator<Item = &'a MediaFile>) -> Vec<YearGroup> {
    let mut years: Vec<YearGroup> = Vec::new();

    for file in files {
        if years.last().is_none_or(|group| group.year != file.year) {
            years.push(YearGroup {
                year: file.year,
                months: Vec::new(),
            });
        }
        let Some(year) = years.last_mut() else {
            continue;
        };

        match year.months.last_mut() {
            Some(bucket) if bucket.month == file.month => bucket.files.push(file.clone()),
            _ => year.months.push(DateBucket {
                year: file.year,
                month: file.month,
                files: vec![file.clone()],
            }),
        }
    }

    years
}

/// English month name, `None` outside 1..=12.
pub fn month_name(month: u8) -> Option<&'static str> {
    Month::try_from(month).ok().map(|m| m.name())
}

/// The finalized list of sources that have a thumbnail, ascending by filename.
#[derive(Debug, Clone, Default)]
pub struct GalleryIndex {
    entries: Vec<MediaFile>,
    by_cache_name: HashMap<String, usize>,
    video_suffix: String,
    video_extension: String,
}

impl GalleryIndex {
    /// Keep the sources whose cache entry exists. `sources` must be sorted.
    pub fn new(
        sources: Vec<MediaFile>,
        cached: &HashSet<String>,
        video_suffix: &str,
        video_extension: &str,
    ) -> Self {
        let entries: Vec<MediaFile> = sources
            .into_iter()
            .filter(|file| cached.contains(&file.cache_name))
            .collect();
        let by_cache_name = entries
            .iter()
            .enumerate()
            .map(|(idx, file)| (file.cache_name.clone(), idx))
            .collect();

        Self {
            entries,
            by_cache_name,
            video_suffix: video_suffix.to_string(),
            video_extension: video_extension.to_string(),
        }
    }

    pub fn entries(&self) -> &[MediaFile] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Year groups in the requested order. Descending walks the sorted entries backwards.
    pub fn years(&self, order: Order) -> Vec<YearGroup> {
        match order {
            Order::Ascending => group_by_date(&self.entries),
            Order::Descending => group_by_date(self.entries.iter().rev()),
        }
    }

    pub fn get(&self, cache_name: &str) -> Option<&MediaFile> {
        self.by_cache_name
            .get(cache_name)
            .map(|&idx| &self.entries[idx])
    }

    /// Source filename a cache entry was generated from.
    pub fn source_name(&self, cache_name: &str) -> String {
        match self.get(cache_name) {
            Some(file) => file.name.clone(),
            None => source_name_for(cache_name, &self.video_suffix, &self.video_extension),
        }
    }

    /// Absolute path of the original behind a cache entry.
    pub fn original_path(&self, cache_name: &str) -> Option<&Path> {
        self.get(cache_name).map(|file| file.source_path.as_path())
    }
}
