use crate::gallery::image_processing::{Rotation, fit_square};
use image::{DynamicImage, GenericImageView, ImageBuffer, Rgb};

const RED: Rgb<u8> = Rgb([255, 0, 0]);
const BLUE: Rgb<u8> = Rgb([0, 0, 255]);

// 2x1 image: red on the left, blue on the right
fn two_pixel_image() -> DynamicImage {
    let mut img = ImageBuffer::new(2, 1);
    img.put_pixel(0, 0, RED);
    img.put_pixel(1, 0, BLUE);
    DynamicImage::ImageRgb8(img)
}

fn rgb_at(img: &DynamicImage, x: u32, y: u32) -> [u8; 3] {
    let p = img.get_pixel(x, y);
    [p[0], p[1], p[2]]
}

#[test]
fn test_orientation_tag_mapping() {
    assert_eq!(Rotation::from_orientation(Some(6)), Rotation::Ccw270);
    assert_eq!(Rotation::from_orientation(Some(8)), Rotation::Ccw90);
    assert_eq!(Rotation::from_orientation(Some(3)), Rotation::Ccw180);
    assert_eq!(Rotation::from_orientation(Some(1)), Rotation::None);
    assert_eq!(Rotation::from_orientation(Some(2)), Rotation::None);
    assert_eq!(Rotation::from_orientation(Some(5)), Rotation::None);
    assert_eq!(Rotation::from_orientation(None), Rotation::None);
}

#[test]
fn test_tag_6_turns_counter_clockwise_270() {
    // Counter-clockwise 270 == clockwise 90: left pixel ends up on top
    let rotated = Rotation::from_orientation(Some(6)).apply(two_pixel_image());
    assert_eq!(rotated.dimensions(), (1, 2));
    assert_eq!(rgb_at(&rotated, 0, 0), [255, 0, 0]);
    assert_eq!(rgb_at(&rotated, 0, 1), [0, 0, 255]);
}

#[test]
fn test_tag_8_turns_counter_clockwise_90() {
    // Right pixel ends up on top
    let rotated = Rotation::from_orientation(Some(8)).apply(two_pixel_image());
    assert_eq!(rotated.dimensions(), (1, 2));
    assert_eq!(rgb_at(&rotated, 0, 0), [0, 0, 255]);
    assert_eq!(rgb_at(&rotated, 0, 1), [255, 0, 0]);
}

#[test]
fn test_tag_3_turns_180() {
    let rotated = Rotation::from_orientation(Some(3)).apply(two_pixel_image());
    assert_eq!(rotated.dimensions(), (2, 1));
    assert_eq!(rgb_at(&rotated, 0, 0), [0, 0, 255]);
    assert_eq!(rgb_at(&rotated, 1, 0), [255, 0, 0]);
}

#[test]
fn test_unknown_tag_leaves_pixels() {
    let original = two_pixel_image();
    let rotated = Rotation::from_orientation(Some(7)).apply(original.clone());
    assert_eq!(rotated, original);
}

#[test]
fn test_fit_square_center_crops() {
    // 300x100 with a wide green band in the middle; the square crop lies inside it
    let img = ImageBuffer::from_fn(300, 100, |x, _| match x {
        0..90 => Rgb([255u8, 0, 0]),
        90..210 => Rgb([0, 255, 0]),
        _ => Rgb([0, 0, 255]),
    });
    let fitted = fit_square(&DynamicImage::ImageRgb8(img), 50);

    assert_eq!(fitted.dimensions(), (50, 50));
    for (x, y) in [(0, 0), (25, 25), (49, 49), (0, 49)] {
        let pixel = rgb_at(&fitted, x, y);
        assert!(
            pixel[1] > 200 && pixel[0] < 30 && pixel[2] < 30,
            "pixel ({}, {}) should come from the green band: {:?}",
            x,
            y,
            pixel
        );
    }
}

#[test]
fn test_fit_square_upscales_small_sources() {
    let img = ImageBuffer::from_pixel(10, 20, Rgb([10u8, 20, 30]));
    let fitted = fit_square(&DynamicImage::ImageRgb8(img), 64);
    assert_eq!(fitted.dimensions(), (64, 64));
}
