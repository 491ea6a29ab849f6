pub type Color = (u8, u8, u8);

/// Colour of cells whose iteration found no root.
pub const NON_CONVERGENT: Color = (0x00, 0x00, 0x00);

/// Colours handed out to roots in order of discovery.
pub const PALETTE: [Color; 20] = [
    (0xF7, 0x6A, 0x6A),
    (0xF7, 0x92, 0x6A),
    (0xFC, 0xC4, 0x41),
    (0xF7, 0xC0, 0x6A),
    (0xF7, 0xE1, 0x6A),
    (0xF6, 0xF7, 0x6A),
    (0xCE, 0xF7, 0x6A),
    (0xCE, 0xDD, 0x5D),
    (0xA8, 0xE5, 0x77),
    (0x78, 0xF7, 0x6A),
    (0x6A, 0xF7, 0xD9),
    (0x6A, 0xE3, 0xF7),
    (0x6A, 0xB8, 0xF7),
    (0x6A, 0x83, 0xF7),
    (0xAA, 0x6A, 0xF7),
    (0xCB, 0x6A, 0xF7),
    (0xF7, 0x6A, 0xD7),
    (0xF7, 0x6A, 0xB9),
    (0xF7, 0x6A, 0x98),
    (0xF7, 0x6A, 0x74),
];

/// Colour of the `index`-th discovered root. Past the end of the palette
/// every root gets the last colour.
pub fn root_color(index: usize) -> Color {
    PALETTE[index.min(PALETTE.len() - 1)]
}

pub fn to_hex((r, g, b): Color) -> String {
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_saturates_at_last_color() {
        assert_eq!(root_color(0), (0xF7, 0x6A, 0x6A));
        assert_eq!(root_color(19), (0xF7, 0x6A, 0x74));
        assert_eq!(root_color(20), root_color(19));
        assert_eq!(root_color(1000), root_color(19));
    }

    #[test]
    fn palette_never_hands_out_the_reserved_color() {
        assert!(PALETTE.iter().all(|color| *color != NON_CONVERGENT));
    }

    #[test]
    fn formats_as_lowercase_hex() {
        assert_eq!(to_hex((0xF7, 0x6A, 0x6A)), "#f76a6a");
        assert_eq!(to_hex(NON_CONVERGENT), "#000000");
    }
}
