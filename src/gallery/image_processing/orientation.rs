use image::DynamicImage;
use std::path::Path;
use tracing::trace;

/// Counter-clockwise rotation applied to a decoded image before thumbnailing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    None,
    Ccw90,
    Ccw180,
    Ccw270,
}

impl Rotation {
    /// Only orientation tags 6, 8 and 3 rotate. Mirrored orientations (2, 4, 5, 7)
    /// are left as decoded.
    pub fn from_orientation(tag: Option<u16>) -> Self {
        match tag {
            Some(6) => Rotation::Ccw270,
            Some(8) => Rotation::Ccw90,
            Some(3) => Rotation::Ccw180,
            _ => Rotation::None,
        }
    }

    pub fn apply(self, image: DynamicImage) -> DynamicImage {
        // image's rotate90/rotate270 turn clockwise
        match self {
            Rotation::None => image,
            Rotation::Ccw90 => image.rotate270(),
            Rotation::Ccw180 => image.rotate180(),
            Rotation::Ccw270 => image.rotate90(),
        }
    }
}

/// EXIF orientation tag of `path`, if it has one.
pub fn read_orientation(path: &Path) -> Option<u16> {
    let exif = match rexif::parse_file(path) {
        Ok(exif) => exif,
        Err(e) => {
            trace!("No EXIF data for {}: {}", path.display(), e);
            return None;
        }
    };

    exif.entries
        .iter()
        .find(|entry| entry.tag == rexif::ExifTag::Orientation)
        .and_then(|entry| match &entry.value {
            rexif::TagValue::U16(values) => values.first().copied(),
            _ => None,
        })
}
