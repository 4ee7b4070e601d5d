use image::{DynamicImage, GenericImageView, RgbaImage, imageops::FilterType};
use std::path::Path;
use tracing::debug;

/// Load the video badge, scaled to `size`×`size`.
pub fn load_badge(path: &Path, size: u32) -> Result<RgbaImage, image::ImageError> {
    let badge = image::open(path)?;
    let badge = if badge.dimensions() != (size, size) {
        debug!(
            "Scaling badge {:?} from {:?} to {}x{}",
            path,
            badge.dimensions(),
            size,
            size
        );
        badge.resize_exact(size, size, FilterType::Lanczos3)
    } else {
        badge
    };
    Ok(badge.to_rgba8())
}

/// Composite `badge` near the bottom-right corner, `margin` pixels from both edges.
/// Transparent badge pixels are alpha-blended over the thumbnail.
pub fn apply_badge(thumbnail: &DynamicImage, badge: &RgbaImage, margin: u32) -> DynamicImage {
    let mut canvas = thumbnail.to_rgba8();
    let (x, y) = badge_origin(canvas.dimensions(), badge.dimensions(), margin);
    image::imageops::overlay(&mut canvas, badge, x, y);
    DynamicImage::ImageRgba8(canvas)
}

pub(crate) fn badge_origin(
    (width, height): (u32, u32),
    (badge_width, badge_height): (u32, u32),
    margin: u32,
) -> (i64, i64) {
    (
        width.saturating_sub(badge_width.saturating_add(margin)) as i64,
        height.saturating_sub(badge_height.saturating_add(margin)) as i64,
    )
}
