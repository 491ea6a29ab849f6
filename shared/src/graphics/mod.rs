pub mod color;

use image::{Rgb, RgbImage};

use self::color::Color;

/// Copies a row-major `size × size` colour buffer into an image.
pub fn to_rgb_image(size: u32, pixels: &[Color]) -> RgbImage {
    RgbImage::from_fn(size, size, |x, y| {
        let (r, g, b) = pixels[(y * size + x) as usize];
        Rgb([r, g, b])
    })
}
