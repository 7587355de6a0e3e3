use image::{DynamicImage, ImageBuffer, Rgb, RgbImage};

/// Flatten a decoded image to an opaque RGB buffer.
///
/// Images carrying an alpha channel are composited onto a white background;
/// everything else is converted to RGB8. Several target encodings cannot
/// represent transparency, and the same normalized buffer feeds every
/// rendition, so flattening is applied uniformly.
pub fn flatten_onto_white(image: &DynamicImage) -> RgbImage {
    if !image.color().has_alpha() {
        return image.to_rgb8();
    }

    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    let mut flattened: RgbImage = ImageBuffer::new(width, height);

    for (out, pixel) in flattened.pixels_mut().zip(rgba.pixels()) {
        let alpha = pixel[3] as u32;
        *out = Rgb([
            blend_onto_white(pixel[0], alpha),
            blend_onto_white(pixel[1], alpha),
            blend_onto_white(pixel[2], alpha),
        ]);
    }

    flattened
}

fn blend_onto_white(channel: u8, alpha: u32) -> u8 {
    // (c*a + 255*(255-a)) / 255, rounded
    let value = channel as u32 * alpha + 255 * (255 - alpha);
    ((value + 127) / 255) as u8
}
