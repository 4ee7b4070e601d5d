use image::{DynamicImage, imageops::FilterType};

/// Center-crop and resize to a `size`×`size` square.
pub fn fit_square(image: &DynamicImage, size: u32) -> DynamicImage {
    if image.width() == size && image.height() == size {
        return image.clone();
    }
    image.resize_to_fill(size, size, FilterType::Lanczos3)
}
