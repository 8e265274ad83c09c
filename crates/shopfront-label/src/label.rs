//! Label composition: shop name, barcode and price on one PNG.
//!
//! ## Layout
//! ```text
//!  y
//!  0 ┌──────────────────────────────┐
//!    │ padding                      │
//!  5 │        SHOP NAME (16)        │  bold, centered
//!    │ padding                      │
//! 26 │   ┌──────────────────────┐   │
//!    │   │   barcode surface    │   │  centered, measured height
//!    │   └──────────────────────┘   │
//!    │ padding                      │
//!    │          ₹499.00 (16)        │  bold, centered
//!    │ padding                      │
//!    └──────────────────────────────┘
//!
//! width  = max(surface width + 2 × padding, 200)
//! height = shop name height + surface height + price height + 4 × padding
//! ```

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};
use shopfront_core::Money;
use tracing::debug;

use crate::barcode::{BarcodeSurface, Fill};
use crate::error::{LabelError, LabelResult};
use crate::font::{draw_text, text_width, LabelFont};

/// Gap between label regions and around the edges.
pub const PADDING: u32 = 5;

/// Labels are never narrower than this.
pub const MIN_LABEL_WIDTH: u32 = 200;

/// Header stripped by the export bridge before decoding.
pub const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

const TEXT_FONT: LabelFont = LabelFont::Heading;

/// What goes on a label.
#[derive(Debug, Clone, Copy)]
pub struct LabelSpec<'a> {
    pub shop_name: &'a str,
    pub product_id: &'a str,
    pub price: Money,
    pub currency_symbol: &'a str,
}

/// Axis-aligned area of the label, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// Where each part of the label was drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelRegions {
    pub shop_name: Region,
    pub barcode: Region,
    pub price: Region,
}

/// A rendered label.
#[derive(Debug, Clone)]
pub struct LabelImage {
    png: Vec<u8>,
    width: u32,
    height: u32,
    regions: LabelRegions,
    surface: BarcodeSurface,
    filename: String,
}

impl LabelImage {
    pub fn png_bytes(&self) -> &[u8] {
        &self.png
    }

    pub fn into_png(self) -> Vec<u8> {
        self.png
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn regions(&self) -> &LabelRegions {
        &self.regions
    }

    /// The barcode drawn in the middle region, also usable as an SVG preview.
    pub fn surface(&self) -> &BarcodeSurface {
        &self.surface
    }

    /// Default file name offered by the save prompt.
    pub fn suggested_filename(&self) -> &str {
        &self.filename
    }

    /// `data:image/png;base64,...` form of the PNG.
    pub fn data_url(&self) -> String {
        format!("{}{}", PNG_DATA_URL_PREFIX, STANDARD.encode(&self.png))
    }
}

/// Renders a complete label.
///
/// Never fails because of the id: ids the encoder rejects produce a label
/// with a red error marker in the barcode region.
///
/// ## Example
/// ```rust
/// use shopfront_core::Money;
/// use shopfront_label::{render_label, LabelSpec};
///
/// let label = render_label(&LabelSpec {
///     shop_name: "Fashion World",
///     product_id: "P001",
///     price: Money::from_major_minor(499, 0),
///     currency_symbol: "₹",
/// })
/// .unwrap();
///
/// assert!(label.width() >= 200);
/// assert!(label.data_url().starts_with("data:image/png;base64,"));
/// ```
pub fn render_label(spec: &LabelSpec<'_>) -> LabelResult<LabelImage> {
    let surface = BarcodeSurface::render(spec.product_id);
    let (surface_w, surface_h) = surface.bounding_box();
    let price_text = spec.price.format_with(spec.currency_symbol);
    let text_h = TEXT_FONT.char_height();

    let width = (surface_w + 2 * PADDING).max(MIN_LABEL_WIDTH);
    let height = text_h + surface_h + text_h + 4 * PADDING;

    let shop_y = PADDING;
    let barcode_y = text_h + 2 * PADDING;
    let price_y = barcode_y + surface_h + PADDING;

    let mut canvas = RgbaImage::from_pixel(width, height, Fill::White.rgba());

    let shop_name = draw_centered(&mut canvas, spec.shop_name, shop_y)?;

    let barcode_x = (width - surface_w) / 2;
    surface.paint(&mut canvas, barcode_x as i64, barcode_y as i64)?;
    let barcode = Region {
        x: barcode_x,
        y: barcode_y,
        width: surface_w,
        height: surface_h,
    };

    let price = draw_centered(&mut canvas, &price_text, price_y)?;

    let png = encode_png(&canvas)?;
    debug!(
        product_id = spec.product_id,
        width,
        height,
        bytes = png.len(),
        "Rendered barcode label"
    );

    Ok(LabelImage {
        png,
        width,
        height,
        regions: LabelRegions {
            shop_name,
            barcode,
            price,
        },
        filename: suggested_filename(spec.shop_name, spec.product_id, spec.price),
        surface,
    })
}

/// `<shop name, whitespace runs → '_'>-<id>-Price<whole units>.png`
///
/// ## Example
/// ```rust
/// use shopfront_core::Money;
/// use shopfront_label::suggested_filename;
///
/// assert_eq!(
///     suggested_filename("Fashion  World", "P001", Money::from_cents(49950)),
///     "Fashion_World-P001-Price500.png"
/// );
/// ```
pub fn suggested_filename(shop_name: &str, product_id: &str, price: Money) -> String {
    let mut shop = String::with_capacity(shop_name.len());
    let mut in_space = false;
    for c in shop_name.chars() {
        if c.is_whitespace() {
            if !in_space {
                shop.push('_');
            }
            in_space = true;
        } else {
            shop.push(c);
            in_space = false;
        }
    }

    format!("{}-{}-Price{}.png", shop, product_id, price.round_major())
}

fn draw_centered(canvas: &mut RgbaImage, text: &str, y: u32) -> LabelResult<Region> {
    let width = text_width(TEXT_FONT, text, true);
    let x = canvas.width().saturating_sub(width) / 2;
    draw_text(
        canvas,
        TEXT_FONT,
        text,
        x as i64,
        y as i64,
        Fill::Black.rgba(),
        true,
    )?;

    Ok(Region {
        x,
        y,
        width: width.min(canvas.width()),
        height: TEXT_FONT.char_height(),
    })
}

fn encode_png(canvas: &RgbaImage) -> LabelResult<Vec<u8>> {
    let mut png_bytes = Vec::new();
    PngEncoder::new(&mut png_bytes)
        .write_image(
            canvas.as_raw(),
            canvas.width(),
            canvas.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| LabelError::ImageEncode(e.to_string()))?;
    Ok(png_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::barcode::BAR_HEIGHT;

    fn spec(product_id: &str) -> LabelSpec<'_> {
        LabelSpec {
            shop_name: "Fashion World",
            product_id,
            price: Money::from_major_minor(499, 0),
            currency_symbol: "Rs.",
        }
    }

    fn decode(label: &LabelImage) -> RgbaImage {
        image::load_from_memory_with_format(label.png_bytes(), image::ImageFormat::Png)
            .unwrap()
            .to_rgba8()
    }

    fn has_pixel(img: &RgbaImage, region: &Region, fill: Fill) -> bool {
        img.enumerate_pixels()
            .any(|(x, y, p)| region.contains(x, y) && *p == fill.rgba())
    }

    #[test]
    fn test_label_geometry() {
        let label = render_label(&spec("P001")).unwrap();
        let (surface_w, surface_h) = label.surface().bounding_box();

        assert_eq!(label.width(), (surface_w + 10).max(200));
        assert_eq!(label.height(), 16 + surface_h + 16 + 20);

        let regions = label.regions();
        assert_eq!(regions.shop_name.y, 5);
        assert_eq!(regions.barcode.y, 26);
        assert_eq!(regions.price.y, 26 + surface_h + 5);
        assert_eq!(
            regions.price.y + regions.price.height + PADDING,
            label.height()
        );
    }

    #[test]
    fn test_png_has_three_inked_regions() {
        let label = render_label(&spec("P001")).unwrap();
        let img = decode(&label);
        assert_eq!((img.width(), img.height()), (label.width(), label.height()));

        let regions = label.regions();
        assert!(has_pixel(&img, &regions.shop_name, Fill::Black));
        assert!(has_pixel(&img, &regions.barcode, Fill::Black));
        assert!(has_pixel(&img, &regions.price, Fill::Black));
    }

    #[test]
    fn test_long_id_widens_label() {
        let label = render_label(&spec("FW-2024-SUMMER-COLLECTION-0001")).unwrap();
        assert!(label.width() > MIN_LABEL_WIDTH);
        assert_eq!(label.regions().barcode.x, PADDING);
    }

    #[test]
    fn test_invalid_id_still_renders() {
        let label = render_label(&spec("Kurti€")).unwrap();
        assert!(label.surface().is_error());

        let img = decode(&label);
        let regions = label.regions();
        assert_eq!(regions.barcode.height, BAR_HEIGHT + 15);
        assert_eq!(label.width(), MIN_LABEL_WIDTH);
        assert!(has_pixel(&img, &regions.shop_name, Fill::Black));
        assert!(has_pixel(&img, &regions.price, Fill::Black));
        assert!(img.pixels().any(|p| *p == Fill::Red.rgba()));
    }

    fn rupee_spec(product_id: &str) -> LabelSpec<'_> {
        LabelSpec {
            currency_symbol: "₹",
            price: Money::from_major_minor(199, 0),
            ..spec(product_id)
        }
    }

    /// True when the rows a missing-glyph box would outline are blank in
    /// the first character cell of `region`.
    fn first_cell_unboxed(img: &RgbaImage, region: &Region) -> bool {
        let cell_w = TEXT_FONT.char_width() + 1;
        [1, TEXT_FONT.char_height() - 2].iter().all(|dy| {
            (region.x + 1..region.x + cell_w - 2)
                .all(|x| *img.get_pixel(x, region.y + dy) == Fill::White.rgba())
        })
    }

    #[test]
    fn test_rupee_price_label() {
        let label = render_label(&rupee_spec("ABC123")).unwrap();
        assert!(!label.surface().is_error());
        assert_eq!(label.suggested_filename(), "Fashion_World-ABC123-Price199.png");

        let img = decode(&label);
        let price = label.regions().price;
        assert_eq!(price.width, text_width(TEXT_FONT, "₹199.00", true));
        assert!(has_pixel(&img, &price, Fill::Black));
        assert!(first_cell_unboxed(&img, &price));
    }

    #[test]
    fn test_rupee_price_on_error_marker_label() {
        let label = render_label(&rupee_spec("Kurti€")).unwrap();
        assert!(label.surface().is_error());

        let img = decode(&label);
        assert!(img.pixels().any(|p| *p == Fill::Red.rgba()));
        assert!(first_cell_unboxed(&img, &label.regions().price));
    }

    #[test]
    fn test_data_url_round_trips_png() {
        let label = render_label(&spec("P001")).unwrap();
        let url = label.data_url();
        let payload = url.strip_prefix(PNG_DATA_URL_PREFIX).unwrap();
        assert_eq!(STANDARD.decode(payload).unwrap(), label.png_bytes());
        assert_eq!(label.suggested_filename(), "Fashion_World-P001-Price499.png");
    }
}
