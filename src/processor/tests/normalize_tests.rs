use image::{DynamicImage, ImageBuffer, Luma, LumaA, Rgb, Rgba};

use crate::processor::normalize::flatten_onto_white;

#[test]
fn opaque_rgb_passes_through() {
    let img = DynamicImage::ImageRgb8(ImageBuffer::from_pixel(4, 4, Rgb([10u8, 20, 30])));
    let flattened = flatten_onto_white(&img);
    assert_eq!(flattened.get_pixel(0, 0), &Rgb([10u8, 20, 30]));
}

#[test]
fn grayscale_converts_to_rgb() {
    let img = DynamicImage::ImageLuma8(ImageBuffer::from_pixel(2, 2, Luma([128u8])));
    let flattened = flatten_onto_white(&img);
    let pixel = flattened.get_pixel(0, 0);
    assert_eq!(pixel[0], pixel[1]);
    assert_eq!(pixel[1], pixel[2]);
}

#[test]
fn fully_transparent_becomes_white() {
    let img = DynamicImage::ImageRgba8(ImageBuffer::from_pixel(3, 3, Rgba([200u8, 0, 0, 0])));
    let flattened = flatten_onto_white(&img);
    assert_eq!(flattened.get_pixel(1, 1), &Rgb([255u8, 255, 255]));
}

#[test]
fn fully_opaque_alpha_keeps_color() {
    let img = DynamicImage::ImageRgba8(ImageBuffer::from_pixel(2, 2, Rgba([200u8, 50, 25, 255])));
    let flattened = flatten_onto_white(&img);
    assert_eq!(flattened.get_pixel(0, 0), &Rgb([200u8, 50, 25]));
}

#[test]
fn half_transparent_black_blends_to_mid_gray() {
    let img = DynamicImage::ImageRgba8(ImageBuffer::from_pixel(1, 1, Rgba([0u8, 0, 0, 128])));
    let flattened = flatten_onto_white(&img);
    let pixel = flattened.get_pixel(0, 0);
    // 0*128/255 + 255*127/255 = 127
    assert_eq!(pixel, &Rgb([127u8, 127, 127]));
}

#[test]
fn gray_alpha_composites_onto_white() {
    let img = DynamicImage::ImageLumaA8(ImageBuffer::from_pixel(2, 2, LumaA([0u8, 0])));
    let flattened = flatten_onto_white(&img);
    assert_eq!(flattened.get_pixel(0, 0), &Rgb([255u8, 255, 255]));
}

#[test]
fn dimensions_are_preserved() {
    let img = DynamicImage::ImageRgba8(ImageBuffer::from_pixel(7, 5, Rgba([1u8, 2, 3, 4])));
    let flattened = flatten_onto_white(&img);
    assert_eq!(flattened.dimensions(), (7, 5));
}
