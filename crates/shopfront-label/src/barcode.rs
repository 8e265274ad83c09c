//! Code128 barcode as a vector surface.
//!
//! The surface is a list of filled rectangles and text runs. It can be
//! serialized to SVG for on-screen preview, or painted onto a raster label.
//!
//! ```text
//! ┌──────────────────────────────────────────┐ ─┬─
//! │ margin                                   │  5
//! │  ▌ ▌▌ ▐ ▌▌▐▐ ▌ ▌▐▌ ▐▌▌ ▐ ▌▐▐▌ ▌▐▌ ▌▐ ▌▌  │  40  bars (2px per module)
//! │                  P001                    │  12  caption, bold 6×12
//! │                                          │  5
//! └──────────────────────────────────────────┘ ─┴─
//! ```
//!
//! Ids the encoder rejects produce an error surface instead: a red
//! `Error for <id>` text with placeholder dimensions. Rendering never fails.

use barcoders::sym::code128::Code128;
use image::{Rgba, RgbaImage};
use tracing::warn;

use crate::error::LabelResult;
use crate::font::{draw_text, fill_rect, text_width, LabelFont};

/// Pixels per barcode module.
pub const MODULE_WIDTH: u32 = 2;

/// Height of the bars, excluding the caption.
pub const BAR_HEIGHT: u32 = 40;

/// Quiet zone around the bars.
pub const QUIET_MARGIN: u32 = 5;

/// Per-character width of the error placeholder.
pub const PLACEHOLDER_CHAR_WIDTH: u32 = 12;

/// Added to [`BAR_HEIGHT`] for the error placeholder.
pub const PLACEHOLDER_EXTRA_HEIGHT: u32 = 15;

// =============================================================================
// Surface Elements
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    Black,
    White,
    Red,
}

impl Fill {
    pub const fn rgba(self) -> Rgba<u8> {
        match self {
            Fill::Black => Rgba([0, 0, 0, 255]),
            Fill::White => Rgba([255, 255, 255, 255]),
            Fill::Red => Rgba([255, 0, 0, 255]),
        }
    }

    pub const fn hex(self) -> &'static str {
        match self {
            Fill::Black => "#000000",
            Fill::White => "#ffffff",
            Fill::Red => "#ff0000",
        }
    }
}

/// One drawable item, positioned relative to the surface's top-left corner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceElement {
    Rect {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        fill: Fill,
    },
    /// `x`/`y` is the top-left of the first glyph cell.
    Text {
        x: u32,
        y: u32,
        text: String,
        font: LabelFont,
        bold: bool,
        fill: Fill,
    },
}

impl SurfaceElement {
    /// Right and bottom edges.
    fn extent(&self) -> (u32, u32) {
        match self {
            SurfaceElement::Rect {
                x, y, width, height, ..
            } => (x + width, y + height),
            SurfaceElement::Text {
                x, y, text, font, bold, ..
            } => (
                x + text_width(*font, text, *bold),
                y + font.char_height(),
            ),
        }
    }
}

// =============================================================================
// Barcode Surface
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarcodeSurface {
    product_id: String,
    elements: Vec<SurfaceElement>,
    /// Set only for error surfaces, whose text is not measured.
    placeholder: Option<(u32, u32)>,
}

impl BarcodeSurface {
    /// Renders `product_id` as Code128 with the id printed underneath.
    pub fn render(product_id: &str) -> Self {
        match encode_code128(product_id) {
            Some(modules) => Self::from_modules(product_id, &modules),
            None => {
                warn!(product_id, "Barcode encoder rejected id, drawing error marker");
                Self::error(product_id)
            }
        }
    }

    fn from_modules(product_id: &str, modules: &[u8]) -> Self {
        let width = modules.len() as u32 * MODULE_WIDTH + 2 * QUIET_MARGIN;
        let caption_font = LabelFont::Caption;
        let height = QUIET_MARGIN + BAR_HEIGHT + caption_font.char_height() + QUIET_MARGIN;

        let mut elements = vec![SurfaceElement::Rect {
            x: 0,
            y: 0,
            width,
            height,
            fill: Fill::White,
        }];

        // Merge runs of adjacent bar modules into one rectangle
        let mut run_start: Option<usize> = None;
        for (i, &module) in modules.iter().chain(std::iter::once(&0)).enumerate() {
            match (module == 1, run_start) {
                (true, None) => run_start = Some(i),
                (false, Some(start)) => {
                    elements.push(SurfaceElement::Rect {
                        x: QUIET_MARGIN + start as u32 * MODULE_WIDTH,
                        y: QUIET_MARGIN,
                        width: (i - start) as u32 * MODULE_WIDTH,
                        height: BAR_HEIGHT,
                        fill: Fill::Black,
                    });
                    run_start = None;
                }
                _ => {}
            }
        }

        let caption_width = text_width(caption_font, product_id, true);
        elements.push(SurfaceElement::Text {
            x: width.saturating_sub(caption_width) / 2,
            y: QUIET_MARGIN + BAR_HEIGHT,
            text: product_id.to_string(),
            font: caption_font,
            bold: true,
            fill: Fill::Black,
        });

        BarcodeSurface {
            product_id: product_id.to_string(),
            elements,
            placeholder: None,
        }
    }

    fn error(product_id: &str) -> Self {
        let width = product_id.chars().count() as u32 * PLACEHOLDER_CHAR_WIDTH;
        let height = BAR_HEIGHT + PLACEHOLDER_EXTRA_HEIGHT;

        BarcodeSurface {
            product_id: product_id.to_string(),
            elements: vec![SurfaceElement::Text {
                x: 10,
                y: 8,
                text: format!("Error for {}", product_id),
                font: LabelFont::Caption,
                bold: false,
                fill: Fill::Red,
            }],
            placeholder: Some((width, height)),
        }
    }

    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    pub fn elements(&self) -> &[SurfaceElement] {
        &self.elements
    }

    /// True when the encoder rejected the id.
    pub fn is_error(&self) -> bool {
        self.placeholder.is_some()
    }

    /// Measured (width, height). Error surfaces report the placeholder size.
    pub fn bounding_box(&self) -> (u32, u32) {
        if let Some(size) = self.placeholder {
            return size;
        }
        self.elements
            .iter()
            .map(SurfaceElement::extent)
            .fold((0, 0), |(w, h), (x, y)| (w.max(x), h.max(y)))
    }

    /// Serializes the surface as a standalone SVG document.
    pub fn to_svg(&self) -> String {
        let (width, height) = self.bounding_box();
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = width,
            h = height
        );

        for element in &self.elements {
            match element {
                SurfaceElement::Rect {
                    x,
                    y,
                    width,
                    height,
                    fill,
                } => svg.push_str(&format!(
                    r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
                    x,
                    y,
                    width,
                    height,
                    fill.hex()
                )),
                SurfaceElement::Text {
                    x,
                    y,
                    text,
                    font,
                    bold,
                    fill,
                } => svg.push_str(&format!(
                    r#"<text x="{}" y="{}" dominant-baseline="hanging" font-family="monospace" font-size="{}" font-weight="{}" fill="{}">{}</text>"#,
                    x,
                    y,
                    font.svg_font_size(),
                    if *bold { "bold" } else { "normal" },
                    fill.hex(),
                    escape_xml(text)
                )),
            }
        }

        svg.push_str("</svg>");
        svg
    }

    /// Rasterizes the surface with its top-left corner at (`x`, `y`).
    pub fn paint(&self, canvas: &mut RgbaImage, x: i64, y: i64) -> LabelResult<()> {
        for element in &self.elements {
            match element {
                SurfaceElement::Rect {
                    x: rx,
                    y: ry,
                    width,
                    height,
                    fill,
                } => fill_rect(
                    canvas,
                    x + *rx as i64,
                    y + *ry as i64,
                    *width as i64,
                    *height as i64,
                    fill.rgba(),
                ),
                SurfaceElement::Text {
                    x: tx,
                    y: ty,
                    text,
                    font,
                    bold,
                    fill,
                } => draw_text(
                    canvas,
                    *font,
                    text,
                    x + *tx as i64,
                    y + *ty as i64,
                    fill.rgba(),
                    *bold,
                )?,
            }
        }
        Ok(())
    }
}

// =============================================================================
// Encoding
// =============================================================================

/// Selects character set A in barcoders' Code128 syntax.
const SET_A: char = '\u{00C0}';
/// Selects character set B.
const SET_B: char = '\u{0181}';

/// Code128 set a character can be written in, `None` when both carry it.
fn required_set(c: char) -> Option<char> {
    match c {
        '\0'..='\u{1F}' => Some(SET_A),
        '`'..='~' => Some(SET_B),
        _ => None,
    }
}

/// Encodes `data` as Code128, starting in set B and switching to set A
/// around control characters.
///
/// Returns one entry per module (1 = bar), or `None` for empty ids and
/// anything outside ASCII `0x00..=0x7E`.
///
/// ## Example
/// ```rust
/// use shopfront_label::barcode::encode_code128;
///
/// assert!(encode_code128("P001").is_some());
/// assert!(encode_code128("TAB\tID").is_some());
/// assert!(encode_code128("Kurti€").is_none());
/// ```
pub fn encode_code128(data: &str) -> Option<Vec<u8>> {
    if data.is_empty() || !data.chars().all(|c| c <= '~') {
        return None;
    }

    let mut current = data.chars().find_map(required_set).unwrap_or(SET_B);
    let mut prefixed = String::with_capacity(data.len() + 2);
    prefixed.push(current);
    for c in data.chars() {
        if let Some(set) = required_set(c) {
            if set != current {
                prefixed.push(set);
                current = set;
            }
        }
        prefixed.push(c);
    }

    Code128::new(&prefixed).ok().map(|barcode| barcode.encode())
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}
