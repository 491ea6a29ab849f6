use complex_rs::complex::Complex;
use serde::Serialize;

use crate::graphics::color::{root_color, Color, NON_CONVERGENT};

/// Roots closer than this (in `|Δre| + |Δim|`) share a colour.
pub const ROOT_TOLERANCE: f64 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RootEntry {
    pub root: Complex,
    pub color: Color,
}

/// Roots found so far with their colours, in order of discovery.
///
/// The first entry is always the `NaN` root with the non-convergent colour.
#[derive(Debug, Clone)]
pub struct RootRegistry {
    entries: Vec<RootEntry>,
    discovered: usize,
}

impl Default for RootRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RootRegistry {
    pub fn new() -> Self {
        Self {
            entries: vec![RootEntry {
                root: Complex::nan(),
                color: NON_CONVERGENT,
            }],
            discovered: 0,
        }
    }

    /// A `NaN` in the same component on both sides is a match on its own,
    /// whatever the other component holds.
    pub fn same_root(a: Complex, b: Complex) -> bool {
        a.l1_distance(b) < ROOT_TOLERANCE
            || (a.re.is_nan() && b.re.is_nan())
            || (a.im.is_nan() && b.im.is_nan())
    }

    pub fn color_of(&self, root: Complex) -> Option<Color> {
        self.entries
            .iter()
            .find(|entry| Self::same_root(entry.root, root))
            .map(|entry| entry.color)
    }

    /// The colour of `root`, registering it with the next palette colour if
    /// no known root matches.
    pub fn resolve(&mut self, root: Complex) -> Color {
        if let Some(color) = self.color_of(root) {
            return color;
        }

        let color = root_color(self.discovered);
        self.discovered += 1;
        self.entries.push(RootEntry { root, color });
        color
    }

    pub fn entries(&self) -> &[RootEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<RootEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
