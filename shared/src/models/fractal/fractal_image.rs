use image::RgbImage;

use super::root_registry::RootEntry;
use crate::graphics::{self, color::Color};

/// A rendered `size × size` grid, row `y` / column `x`, plus the roots
/// behind its colours.
#[derive(Debug, Clone, PartialEq)]
pub struct FractalImage {
    pub size: usize,
    pub pixels: Vec<Color>,
    pub roots: Vec<RootEntry>,
}

impl FractalImage {
    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.size || y >= self.size {
            return None;
        }
        self.pixels.get(y * self.size + x).copied()
    }

    /// Roots that have a textual form, i.e. everything but the reserved
    /// non-convergent entry.
    pub fn discovered_roots(&self) -> impl Iterator<Item = &RootEntry> {
        self.roots.iter().filter(|entry| !entry.root.is_nan())
    }

    pub fn to_rgb_image(&self) -> RgbImage {
        graphics::to_rgb_image(self.size as u32, &self.pixels)
    }
}
