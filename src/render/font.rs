//! 3x5 bitmap digits for the score HUD.

pub const GLYPH_WIDTH: usize = 3;
pub const GLYPH_HEIGHT: usize = 5;
/// Blank columns between glyphs.
pub const GLYPH_SPACING: usize = 1;

#[rustfmt::skip]
const DIGITS: [[u8; 15]; 10] = [
    [1,1,1, 1,0,1, 1,0,1, 1,0,1, 1,1,1], // 0
    [0,1,0, 1,1,0, 0,1,0, 0,1,0, 1,1,1], // 1
    [1,1,1, 0,0,1, 1,1,1, 1,0,0, 1,1,1], // 2
    [1,1,1, 0,0,1, 0,1,1, 0,0,1, 1,1,1], // 3
    [1,0,1, 1,0,1, 1,1,1, 0,0,1, 0,0,1], // 4
    [1,1,1, 1,0,0, 1,1,1, 0,0,1, 1,1,1], // 5
    [1,1,1, 1,0,0, 1,1,1, 1,0,1, 1,1,1], // 6
    [1,1,1, 0,0,1, 0,1,0, 0,1,0, 0,1,0], // 7
    [1,1,1, 1,0,1, 1,1,1, 1,0,1, 1,1,1], // 8
    [1,1,1, 1,0,1, 1,1,1, 0,0,1, 1,1,1], // 9
];

/// Glyph bitmap for a character, row-major. Unsupported characters are blank.
pub fn glyph(ch: char) -> [u8; 15] {
    ch.to_digit(10)
        .map(|d| DIGITS[d as usize])
        .unwrap_or([0; 15])
}

/// Width of `text` in font pixels.
pub fn text_width(text: &str) -> usize {
    let n = text.chars().count();
    if n == 0 {
        return 0;
    }
    n * GLYPH_WIDTH + (n - 1) * GLYPH_SPACING
}

/// Font-pixel cells lit by `text`, as (column, row) from the text origin.
pub fn lit_cells(text: &str) -> Vec<(usize, usize)> {
    let mut cells = Vec::new();
    for (i, ch) in text.chars().enumerate() {
        let origin = i * (GLYPH_WIDTH + GLYPH_SPACING);
        let bits = glyph(ch);
        for row in 0..GLYPH_HEIGHT {
            for col in 0..GLYPH_WIDTH {
                if bits[row * GLYPH_WIDTH + col] == 1 {
                    cells.push((origin + col, row));
                }
            }
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_width() {
        assert_eq!(text_width(""), 0);
        assert_eq!(text_width("7"), 3);
        assert_eq!(text_width("42"), 7);
    }

    #[test]
    fn test_one_has_seven_cells() {
        assert_eq!(lit_cells("1").len(), 7);
    }

    #[test]
    fn test_unknown_glyph_blank() {
        assert!(lit_cells("x").is_empty());
    }
}
