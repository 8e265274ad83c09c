//! Bitmap text drawing using the Spleen fonts.
//!
//! Two sizes are used on a label:
//!
//! | Font      | Cell  | Used for                          |
//! |-----------|-------|-----------------------------------|
//! | `Caption` | 6×12  | human-readable id under the bars  |
//! | `Heading` | 8×16  | shop name and price               |
//!
//! Bold is a double strike shifted one pixel right, so bold text is one
//! pixel wider than regular text.
//!
//! Spleen has no `₹`, so the rupee sign is drawn from bitmaps bundled here.

use image::{Rgba, RgbaImage};
use spleen_font::{PSF2Font, FONT_6X12, FONT_8X16};

use crate::error::{LabelError, LabelResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelFont {
    Caption,
    Heading,
}

impl LabelFont {
    pub const fn char_width(self) -> u32 {
        match self {
            LabelFont::Caption => 6,
            LabelFont::Heading => 8,
        }
    }

    pub const fn char_height(self) -> u32 {
        match self {
            LabelFont::Caption => 12,
            LabelFont::Heading => 16,
        }
    }

    /// `font-size` used when the same text is emitted as SVG.
    pub const fn svg_font_size(self) -> u32 {
        self.char_height()
    }
}

// =============================================================================
// Bundled Glyphs
// =============================================================================

const RUPEE_8X16: [&str; 16] = [
    "........",
    "........",
    ".######.",
    ".....##.",
    ".######.",
    ".....##.",
    "....##..",
    ".####...",
    "..##....",
    "...##...",
    "....##..",
    ".....##.",
    "......##",
    "........",
    "........",
    "........",
];

const RUPEE_6X12: [&str; 12] = [
    "......",
    "......",
    "#####.",
    "...##.",
    "#####.",
    "...##.",
    "..##..",
    "###...",
    ".##...",
    "..##..",
    "...##.",
    "......",
];

/// Rows of a glyph Spleen lacks, `#` for ink.
fn bundled_glyph(font: LabelFont, c: char) -> Option<&'static [&'static str]> {
    match (font, c) {
        (LabelFont::Heading, '₹') => Some(&RUPEE_8X16),
        (LabelFont::Caption, '₹') => Some(&RUPEE_6X12),
        _ => None,
    }
}

/// Pixel width of `text` in `font`.
pub fn text_width(font: LabelFont, text: &str, bold: bool) -> u32 {
    let chars = text.chars().count() as u32;
    if chars == 0 {
        return 0;
    }
    chars * font.char_width() + u32::from(bold)
}

/// Draws `text` with its top-left corner at (`x`, `y`).
///
/// Pixels falling outside the canvas are clipped. Characters neither Spleen
/// nor the bundled glyphs cover are drawn as an outlined box.
pub fn draw_text(
    canvas: &mut RgbaImage,
    font: LabelFont,
    text: &str,
    x: i64,
    y: i64,
    color: Rgba<u8>,
    bold: bool,
) -> LabelResult<()> {
    let mut spleen = match font {
        LabelFont::Caption => PSF2Font::new(FONT_6X12),
        LabelFont::Heading => PSF2Font::new(FONT_8X16),
    }
    .map_err(|_| LabelError::Font(format!("cannot load {:?} font", font)))?;
    let (cw, ch) = (font.char_width() as i64, font.char_height() as i64);
    let strikes: &[i64] = if bold { &[0, 1] } else { &[0] };

    for (i, c) in text.chars().enumerate() {
        let origin_x = x + i as i64 * cw;
        let mut buf = [0u8; 4];
        let utf8 = c.encode_utf8(&mut buf);

        if let Some(rows) = bundled_glyph(font, c) {
            for (row_y, row) in rows.iter().enumerate() {
                for (col_x, cell) in row.bytes().enumerate() {
                    if cell != b'#' {
                        continue;
                    }
                    for dx in strikes {
                        put(canvas, origin_x + col_x as i64 + dx, y + row_y as i64, color);
                    }
                }
            }
            continue;
        }

        match spleen.glyph_for_utf8(utf8.as_bytes()) {
            Some(glyph) => {
                for (row_y, row) in glyph.enumerate() {
                    for (col_x, on) in row.enumerate() {
                        if !on {
                            continue;
                        }
                        for dx in strikes {
                            put(
                                canvas,
                                origin_x + col_x as i64 + dx,
                                y + row_y as i64,
                                color,
                            );
                        }
                    }
                }
            }
            None => draw_box(canvas, origin_x, y, cw, ch, color),
        }
    }

    Ok(())
}

/// Fills a rectangle, clipped to the canvas.
pub fn fill_rect(canvas: &mut RgbaImage, x: i64, y: i64, w: i64, h: i64, color: Rgba<u8>) {
    for py in y..y + h {
        for px in x..x + w {
            put(canvas, px, py, color);
        }
    }
}

fn draw_box(canvas: &mut RgbaImage, x: i64, y: i64, w: i64, h: i64, color: Rgba<u8>) {
    // One pixel inset so neighbouring boxes stay distinguishable
    let (x0, y0, x1, y1) = (x + 1, y + 1, x + w - 2, y + h - 2);
    for px in x0..=x1 {
        put(canvas, px, y0, color);
        put(canvas, px, y1, color);
    }
    for py in y0..=y1 {
        put(canvas, x0, py, color);
        put(canvas, x1, py, color);
    }
}

fn put(canvas: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>) {
    if x < 0 || y < 0 || x >= canvas.width() as i64 || y >= canvas.height() as i64 {
        return;
    }
    canvas.put_pixel(x as u32, y as u32, color);
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    #[test]
    fn test_text_width() {
        assert_eq!(text_width(LabelFont::Caption, "P001", false), 24);
        assert_eq!(text_width(LabelFont::Heading, "P001", true), 33);
        assert_eq!(text_width(LabelFont::Heading, "", true), 0);
    }

    #[test]
    fn test_draw_text_marks_pixels() {
        let mut canvas = RgbaImage::from_pixel(40, 20, WHITE);
        draw_text(&mut canvas, LabelFont::Heading, "AB", 2, 2, BLACK, true).unwrap();
        assert!(canvas.pixels().any(|p| *p == BLACK));
    }

    #[test]
    fn test_rupee_is_drawn_not_boxed() {
        for font in [LabelFont::Heading, LabelFont::Caption] {
            let (w, h) = (font.char_width(), font.char_height());
            let mut rupee = RgbaImage::from_pixel(w, h, WHITE);
            draw_text(&mut rupee, font, "₹", 0, 0, BLACK, false).unwrap();

            let mut boxed = RgbaImage::from_pixel(w, h, WHITE);
            draw_box(&mut boxed, 0, 0, w as i64, h as i64, BLACK);

            assert!(rupee.pixels().any(|p| *p == BLACK));
            assert_ne!(rupee, boxed);
            // The box outline's top-left corner stays blank
            assert_eq!(*rupee.get_pixel(1, 1), WHITE);
        }
    }

    #[test]
    fn test_bundled_glyphs_fit_their_cells() {
        for font in [LabelFont::Heading, LabelFont::Caption] {
            let rows = bundled_glyph(font, '₹').unwrap();
            assert_eq!(rows.len() as u32, font.char_height());
            assert!(rows.iter().all(|r| r.len() as u32 == font.char_width()));
        }
    }

    #[test]
    fn test_draw_text_clips_offscreen() {
        let mut canvas = RgbaImage::from_pixel(4, 4, WHITE);
        draw_text(&mut canvas, LabelFont::Caption, "WIDE TEXT", -20, -3, BLACK, false).unwrap();
        draw_text(&mut canvas, LabelFont::Caption, "X", 100, 100, BLACK, false).unwrap();
    }
}
