//! Filename grammar: `YYYYMMDD*.ext`.
//!
//! The first eight characters are fixed-width digit fields. Values are not checked
//! against the calendar, so `20231345x.jpg` is accepted with month 13.

use super::MediaKind;
use crate::ClassifierConfig;
use std::ops::Range;
use std::path::Path;

const DECADE_PREFIX: &str = "20";
const YEAR: Range<usize> = 0..4;
const MONTH: Range<usize> = 4..6;
const DAY: Range<usize> = 6..8;
const DATE_WIDTH: usize = DAY.end;

/// Fields parsed from an accepted filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classified {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub kind: MediaKind,
}

/// Classify a filename. `None` means the file is not part of the gallery.
pub fn classify(name: &str, rules: &ClassifierConfig) -> Option<Classified> {
    if !name.starts_with(DECADE_PREFIX) || is_excluded(name, rules) {
        return None;
    }

    let date = name.get(..DATE_WIDTH)?;
    if !date.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let extension = Path::new(name).extension()?.to_str()?;

    Some(Classified {
        year: date[YEAR].parse().ok()?,
        month: date[MONTH].parse().ok()?,
        day: date[DAY].parse().ok()?,
        kind: kind_for_extension(extension, rules),
    })
}

/// Heuristic suffix filtering. Operates on raw characters of the full filename.
fn is_excluded(name: &str, rules: &ClassifierConfig) -> bool {
    let mut tail = name.chars().rev();
    let last = tail.next();
    let third_from_last = tail.nth(1);

    (rules.reject_trailing_4 && last == Some('4'))
        || (rules.reject_third_from_last_3 && third_from_last == Some('3'))
}

fn kind_for_extension(extension: &str, rules: &ClassifierConfig) -> MediaKind {
    if rules
        .video_extensions
        .iter()
        .any(|ext| ext.eq_ignore_ascii_case(extension))
    {
        MediaKind::Video
    } else {
        MediaKind::Image
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> ClassifierConfig {
        ClassifierConfig::default()
    }

    #[test]
    fn test_accepts_canonical_name() {
        let classified = classify("20230115y.jpg", &rules()).unwrap();
        assert_eq!(classified.year, 2023);
        assert_eq!(classified.month, 1);
        assert_eq!(classified.day, 15);
        assert_eq!(classified.kind, MediaKind::Image);

        let classified = classify("20241231_235959.jpg", &rules()).unwrap();
        assert_eq!((classified.year, classified.month, classified.day), (2024, 12, 31));
    }

    #[test]
    fn test_rejects_wrong_decade() {
        assert!(classify("19991231x.jpg", &rules()).is_none());
        assert!(classify("IMG_0001.jpg", &rules()).is_none());
    }

    #[test]
    fn test_rejects_non_matching_grammar() {
        assert!(classify("2023011xy3.jpg", &rules()).is_none());
        assert!(classify("2023-01-15.jpg", &rules()).is_none());
        assert!(classify("2023.jpg", &rules()).is_none());
        assert!(classify("20230115", &rules()).is_none());
    }

    #[test]
    fn test_third_from_last_heuristic() {
        assert!(classify("20230115x.3gp", &rules()).is_none());

        let permissive = ClassifierConfig {
            reject_third_from_last_3: false,
            ..rules()
        };
        assert!(classify("20230115x.3gp", &permissive).is_some());
    }

    #[test]
    fn test_trailing_4_heuristic_is_off_by_default() {
        let classified = classify("20230115x.mp4", &rules()).unwrap();
        assert_eq!(classified.kind, MediaKind::Video);

        let strict = ClassifierConfig {
            reject_trailing_4: true,
            ..rules()
        };
        assert!(classify("20230115x.mp4", &strict).is_none());
        assert!(classify("20230115x.jpg", &strict).is_some());
    }

    #[test]
    fn test_no_calendar_validation() {
        let classified = classify("20231345x.jpg", &rules()).unwrap();
        assert_eq!(classified.month, 13);
        assert_eq!(classified.day, 45);
    }

    #[test]
    fn test_video_extension_case_insensitive() {
        let classified = classify("20230115x.MP4", &rules()).unwrap();
        assert_eq!(classified.kind, MediaKind::Video);
    }

    #[test]
    fn test_non_ascii_name_does_not_panic() {
        assert!(classify("20é30115x.jpg", &rules()).is_none());
        assert!(classify("2023011é.jpg", &rules()).is_none());
    }
}
