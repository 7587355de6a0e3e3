use image::{RgbImage, imageops, imageops::FilterType};

/// Downscale proportionally so the larger dimension equals `max_dimension`.
/// Images already within the bound are returned unchanged.
pub fn clamp_dimensions(image: RgbImage, max_dimension: u32) -> RgbImage {
    let (width, height) = image.dimensions();
    if width <= max_dimension && height <= max_dimension {
        return image;
    }

    let (new_width, new_height) = scaled_dimensions(width, height, max_dimension, max_dimension);
    imageops::resize(&image, new_width, new_height, FilterType::Lanczos3)
}

/// Produce a copy constrained to fit within `max_width` x `max_height`,
/// preserving aspect ratio. Never upscales.
pub fn thumbnail(image: &RgbImage, max_width: u32, max_height: u32) -> RgbImage {
    let (width, height) = image.dimensions();
    if width <= max_width && height <= max_height {
        return image.clone();
    }

    let (new_width, new_height) = scaled_dimensions(width, height, max_width, max_height);
    imageops::resize(image, new_width, new_height, FilterType::Lanczos3)
}

/// Scaled dimensions fitting within the bounds, floored to integers with a
/// floor of 1 px per axis.
pub fn scaled_dimensions(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    let ratio = f64::min(
        max_width as f64 / width as f64,
        max_height as f64 / height as f64,
    );
    let new_width = ((width as f64 * ratio) as u32).max(1);
    let new_height = ((height as f64 * ratio) as u32).max(1);
    (new_width, new_height)
}
